use colored::Colorize;

use crate::error::Result;
use crate::settings::{self, Settings};
use crate::store::Store;

pub fn run(data_dir: Option<String>) -> Result<()> {
    let settings = match data_dir {
        Some(dir) => Settings {
            data_dir: settings::shellexpand_path(&dir),
        },
        None => Settings::default(),
    };
    settings::save_settings(&settings)?;

    std::fs::create_dir_all(&settings.data_dir)?;
    Store::open(&settings::db_path())?;

    println!("{}", "libreta is ready.".green().bold());
    println!("Data directory: {}", settings.data_dir);
    println!("\nNext steps:");
    println!("  libreta demo              load sample data to explore");
    println!("  libreta clients add       register your first client");
    println!("  libreta report --staff    build a daily sales report");
    Ok(())
}
