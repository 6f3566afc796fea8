use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use log::warn;
use serde::{Deserialize, Serialize};

pub const DIR_NAME: &str = "MovieQuiz";
pub const SETTINGS_FILE: &str = "settings.json";
pub const STATISTICS_FILE: &str = "statistics.json";
pub const LOG_FILE: &str = "moviequiz.log";

const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_questions_per_round")]
    pub questions_per_round: usize,

    #[serde(default = "default_true")]
    pub shuffle: bool,

    #[serde(default = "default_feedback_millis")]
    pub feedback_millis: u64,

    #[serde(default)]
    pub feed_path: Option<PathBuf>,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}
fn default_questions_per_round() -> usize {
    10
}
fn default_true() -> bool {
    true
}
fn default_feedback_millis() -> u64 {
    1000
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: CURRENT_VERSION,
            questions_per_round: default_questions_per_round(),
            shuffle: true,
            feedback_millis: default_feedback_millis(),
            feed_path: None,
        }
    }
}

/// `<data dir>/MovieQuiz`, if the platform has a data directory.
pub fn data_dir() -> Option<PathBuf> {
    let dirs = BaseDirs::new()?;
    Some(dirs.data_dir().join(DIR_NAME))
}

impl Settings {
    /// Reads `settings.json` from `dir`, writing the defaults when absent.
    pub fn load_from(dir: &Path) -> Self {
        let path = dir.join(SETTINGS_FILE);
        if let Ok(contents) = fs::read_to_string(&path) {
            match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    settings.validate();
                    return settings;
                }
                Err(e) => warn!("ignoring invalid {}: {e}", path.display()),
            }
        }

        let default = Settings::default();
        if let Err(e) = default.save_to(dir) {
            warn!("could not write default settings: {e}");
        }
        default
    }

    pub fn save_to(&self, dir: &Path) -> Result<(), std::io::Error> {
        fs::create_dir_all(dir)?;
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(SETTINGS_FILE), contents)
    }

    /// Applies `MOVIEQUIZ_FEED` on top of the file settings.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("MOVIEQUIZ_FEED") {
            if !path.is_empty() {
                self.feed_path = Some(PathBuf::from(path));
            }
        }
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    fn validate(&mut self) {
        if self.questions_per_round == 0 {
            warn!("questions_per_round must be positive, using the default");
            self.questions_per_round = default_questions_per_round();
        }
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("MOVIEQUIZ_SEED")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
    }
}
