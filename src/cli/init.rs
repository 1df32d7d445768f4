use std::path::PathBuf;

use kopeyka::db::{get_connection, init_db, seed_categories};
use kopeyka::error::Result;
use kopeyka::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    // Fail before touching disk if a custom keyword table is broken.
    let classifier = settings.classifier()?;

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;

    let conn = get_connection(&settings.db_path())?;
    init_db(&conn)?;
    seed_categories(&conn, &classifier.category_names())?;

    println!("Initialized kopeyka at {}", resolved.display());
    Ok(())
}
