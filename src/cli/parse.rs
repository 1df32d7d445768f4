use kopeyka::error::Result;
use kopeyka::fmt::signed;
use kopeyka::settings::load_settings;

pub fn run(message: &str) -> Result<()> {
    let settings = load_settings();
    let parser = settings.parser();
    let classifier = settings.classifier()?;

    match parser.parse(message) {
        Ok(None) => println!("Not a transaction"),
        Err(e) => println!("{}", e.prompt()),
        Ok(Some(txn)) => {
            println!("Kind:        {}", txn.kind().as_str());
            println!("Amount:      {}", signed(txn.kind(), txn.amount));
            println!("Description: {}", txn.description);
            println!("Category:    {}", classifier.classify(&txn.description));
        }
    }
    Ok(())
}
