use comfy_table::{Cell, Table};

use kopeyka::error::Result;
use kopeyka::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let classifier = settings.classifier()?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Category", "Keywords"]);
    for (i, category) in classifier.categories().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&category.name),
            Cell::new(category.keywords.join(", ")),
        ]);
    }
    println!("Categories (first match wins)\n{table}");

    for o in classifier.overrides() {
        println!("Override: \"{}\" \u{2192} {}", o.phrase, o.category);
    }
    println!("Default:  {}", classifier.default_category());
    println!("Units:    {}", settings.parser().currency_units().join(", "));
    Ok(())
}
