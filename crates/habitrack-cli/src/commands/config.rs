use clap::Subcommand;
use habitrack_core::storage::data_dir;
use habitrack_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value, e.g. `strip.days` or `seed.titles`
    Get { key: String },
    /// Change one value and write the config file
    Set {
        key: String,
        /// Plain value, or JSON for lists: '["Run","Read"]'
        value: String,
    },
    /// Print the whole configuration as JSON
    List,
    /// Print where the config file lives
    Path,
    /// Overwrite the config file with defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            tracing::info!(%key, "config updated");
            if let Some(stored) = config.get(&key) {
                println!("{key} = {stored}");
            }
        }
        ConfigAction::List => {
            println!("{}", serde_json::to_string_pretty(&Config::load()?)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::path_in(&data_dir()?).display());
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("defaults written to {}", Config::path_in(&data_dir()?).display());
        }
    }
    Ok(())
}
