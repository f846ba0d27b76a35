use std::path::PathBuf;

use crate::error::{LessonError, Result};

pub const VERSE_FILE_VAR: &str = "HIFZ_VERSE_FILE";
pub const LESSON_SEED_VAR: &str = "HIFZ_LESSON_SEED";
pub const PRETTY_VAR: &str = "HIFZ_PRETTY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub verse_file: Option<PathBuf>,
    /// Makes the generated lesson reproducible when set
    pub lesson_seed: Option<u64>,
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verse_file: None,
            lesson_seed: None,
            pretty: true,
        }
    }
}

impl Config {
    /// Reads the environment (after `.env`, if the caller loaded one).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup(VERSE_FILE_VAR).filter(|p| !p.trim().is_empty()) {
            config.verse_file = Some(PathBuf::from(path));
        }

        if let Some(seed) = lookup(LESSON_SEED_VAR).filter(|s| !s.trim().is_empty()) {
            let seed = seed.trim().parse::<u64>().map_err(|_| {
                LessonError::Config(format!("{} must be a number, got {:?}", LESSON_SEED_VAR, seed))
            })?;
            config.lesson_seed = Some(seed);
        }

        if let Some(pretty) = lookup(PRETTY_VAR) {
            config.pretty = match pretty.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(LessonError::Config(format!(
                        "{} must be true or false, got {:?}",
                        PRETTY_VAR, other
                    )))
                }
            };
        }

        Ok(config)
    }
}
