use std::path::Path;

use anyhow::Result;

use crate::config::Settings;

pub fn init(path: &Path) -> Result<()> {
    if Settings::create_default_config(path)? {
        println!("Created {}", path.display());
        println!("Fill in your semester, timetable and account, then run `timetable-sync auth`.");
    } else {
        println!("Config already exists at {}", path.display());
    }
    Ok(())
}

pub fn path(path: &Path) {
    println!("{}", path.display());
}
