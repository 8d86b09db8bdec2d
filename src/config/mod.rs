use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: String,
    /// bcrypt work factor used when hashing access codes
    pub access_cost: u32,
    pub link_length: usize,
    pub max_link_attempts: u32,
}

pub const DEFAULT_ACCESS_COST: u32 = bcrypt::DEFAULT_COST;
pub const MIN_ACCESS_COST: u32 = 4;
pub const MAX_ACCESS_COST: u32 = 31;
pub const DEFAULT_LINK_LENGTH: usize = 6;
pub const DEFAULT_MAX_LINK_ATTEMPTS: u32 = 5;

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            access_cost: DEFAULT_ACCESS_COST,
            link_length: DEFAULT_LINK_LENGTH,
            max_link_attempts: DEFAULT_MAX_LINK_ATTEMPTS,
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.skedjit`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skedjit")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("skedjit.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("skedjit.sqlite")
    }

    /// Resolve a `--db` value: relative names live in the config directory.
    pub fn resolve_database(name: &str) -> PathBuf {
        let p = Path::new(name);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)?
        } else {
            Config::default()
        };

        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the core cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if !(MIN_ACCESS_COST..=MAX_ACCESS_COST).contains(&self.access_cost) {
            return Err(AppError::Config(format!(
                "access_cost must be between {} and {}, got {}",
                MIN_ACCESS_COST,
                MAX_ACCESS_COST,
                self.access_cost
            )));
        }
        if !(4..=32).contains(&self.link_length) {
            return Err(AppError::Config(format!(
                "link_length must be between 4 and 32, got {}",
                self.link_length
            )));
        }
        if self.max_link_attempts == 0 {
            return Err(AppError::Config(
                "max_link_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => Self::resolve_database(&name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(db_path)
    }
}
