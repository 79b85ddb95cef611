//! User defaults for the command line tool.
//!
//! Read from a TOML file, every key optional:
//!
//! ```toml
//! diaspora = true
//! short_format = false
//! hebrew = false
//! latitude = 40.71
//! longitude = -74.0
//! utc_offset_minutes = -240
//! ```

use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::holiday::Location;
use crate::locale::{FormatStyle, Locale};
use crate::sun::Coordinates;

const CONFIG_PATH_ENV_VAR: &str = "HDATE_CONFIG_FILE";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Syntax(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub diaspora: Option<bool>,
    pub short_format: Option<bool>,
    pub hebrew: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub utc_offset_minutes: Option<i32>,
}

/// Candidate config files, most specific first.
pub fn find_configfile_locations(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut locations = Vec::with_capacity(4);
    if let Some(path) = explicit {
        locations.push(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("hdate").join("config.toml"));
    }
    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".hdate.toml"));
    }
    locations
}

impl Config {
    /// Loads the first config file found.
    ///
    /// An explicitly given file has to exist, the default locations are
    /// skipped when missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match find_configfile_locations(None)
            .into_iter()
            .find(|path| path.is_file())
        {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("reading config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    pub fn location(&self) -> Location {
        match self.diaspora {
            Some(true) => Location::Diaspora,
            _ => Location::Israel,
        }
    }

    pub fn style(&self) -> FormatStyle {
        match self.short_format {
            Some(true) => FormatStyle::Short,
            _ => FormatStyle::Long,
        }
    }

    /// `None` leaves the choice to the environment.
    pub fn locale(&self) -> Option<Locale> {
        self.hebrew.map(|hebrew| {
            if hebrew {
                Locale::Hebrew
            } else {
                Locale::English
            }
        })
    }

    /// Configured position, if both latitude and longitude are set.
    pub fn coordinates(&self) -> Option<Result<Coordinates, crate::Error>> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
