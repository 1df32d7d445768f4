use kopeyka::db::{get_connection, list_categories};
use kopeyka::error::Result;
use kopeyka::settings::{load_settings, settings_file_exists};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db_path = settings.db_path();

    println!("Settings:   {}", if settings_file_exists() { "saved" } else { "(defaults)" });
    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db_path.display());
    println!("User:       {}", settings.user_id);
    println!("Units:      {}", settings.currency_units.join(", "));
    println!(
        "Keywords:   {}",
        settings.keywords_file.as_deref().unwrap_or("(built-in)")
    );

    if db_path.exists() {
        let conn = get_connection(&db_path)?;
        let users: i64 = conn.query_row("SELECT count(*) FROM users", [], |r| r.get(0))?;
        let transactions: i64 =
            conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
        let categories = list_categories(&conn)?;

        println!();
        println!("Users:         {users}");
        println!("Transactions:  {transactions}");
        println!("Categories:    {}", categories.len());
        for c in &categories {
            println!("  {:>3}  {}", c.sort_order, c.name);
        }
    } else {
        println!();
        println!("Database not found. Run `kopeyka init` to set up.");
    }

    Ok(())
}
