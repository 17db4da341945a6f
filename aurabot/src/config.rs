use std::path::PathBuf;

use auracore::preset::{PresetError, PresetTable};
use clap::Parser;

pub const PREDEFINED_BOT_TOKEN_RELEASE: Option<&str> = option_env!("PREDEFINED_BOT_TOKEN_RELEASE");
pub const PREDEFINED_BOT_TOKEN_DEBUG: Option<&str> = option_env!("PREDEFINED_BOT_TOKEN_DEBUG");
pub const PREDEFINED_BOT_TOKEN: Option<&str> = if cfg!(debug_assertions) {
    PREDEFINED_BOT_TOKEN_DEBUG
} else {
    PREDEFINED_BOT_TOKEN_RELEASE
};
pub const BOT_TOKEN_HELP: &str = if PREDEFINED_BOT_TOKEN_RELEASE.is_some() {
    "Environment variable name containing the bot token. If not set, uses precompiled token"
} else {
    "Environment variable name containing the bot token (required)"
};

pub const DEFAULT_EVENTS_DIR: &str = "events";

/// A Telegram bot that keeps a running aura score from emoji messages
#[derive(Parser, Debug)]
#[command(name = "aurabot")]
#[command(about = "A Telegram bot that keeps a running aura score", long_about = None)]
pub struct Args {
    #[arg(long, help = BOT_TOKEN_HELP)]
    pub bot_token_env: Option<String>,

    /// Store aura events in YAML files, one per chat (default directory: events)
    #[arg(long, value_name = "DIR")]
    pub persistent_storage: Option<Option<PathBuf>>,

    /// YAML file with emoji presets replacing the built-in table
    #[arg(long, value_name = "FILE")]
    pub presets: Option<PathBuf>,
}

impl Args {
    /// Get the bot token from the environment variable named on the command line
    /// or from the precompiled token
    pub fn get_token(&self) -> Result<String, String> {
        if let Some(env_name) = &self.bot_token_env {
            std::env::var(env_name)
                .map_err(|_| format!("Environment variable {} not found", env_name))
        } else if let Some(predefined) = PREDEFINED_BOT_TOKEN {
            Ok(predefined.to_string())
        } else {
            Err(
                "No bot token provided and no precompiled token available. Use --bot-token-env"
                    .to_string(),
            )
        }
    }

    /// Preset table from `--presets` or the built-in one
    pub fn load_presets(&self) -> Result<PresetTable, PresetError> {
        match &self.presets {
            Some(path) => PresetTable::load(path),
            None => Ok(PresetTable::builtin()),
        }
    }
}
