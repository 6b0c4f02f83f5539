use clap::Subcommand;
use inkdown_core::CoreError;

use crate::settings::Settings;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,
    /// Print the configuration file location
    Path,
    /// Set a configuration value (match_distance, board_path)
    Set { key: String, value: String },
}

pub fn run(action: ConfigAction) -> i32 {
    match execute(action) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn execute(action: ConfigAction) -> Result<(), CoreError> {
    match action {
        ConfigAction::Show => {
            let settings = Settings::load()?;
            println!("match_distance = {}", settings.match_distance);
            match settings.board_path {
                Some(path) => println!("board_path = {}", path.display()),
                None => println!("board_path = (default: {})", Settings::dir().join("board.json").display()),
            }
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", Settings::path().display());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load()?;
            settings.set(&key, &value)?;
            settings.save()?;
            println!("{key} = {value}");
            Ok(())
        }
    }
}
