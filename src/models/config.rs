use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::goal::bound_daily_goal;
use crate::models::profile::{HeightUnit, WeightUnit};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub goals: Goals,
}

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Units {
    #[serde(default)]
    pub height: HeightUnit,
    #[serde(default)]
    pub weight: WeightUnit,
}

impl Units {
    pub fn imperial() -> Self {
        Self {
            height: HeightUnit::Imperial,
            weight: WeightUnit::Imperial,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default = "default_daily_calories")]
    pub default_daily_calories: f64,
}

fn default_daily_calories() -> f64 {
    2200.0
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            default_daily_calories: default_daily_calories(),
        }
    }
}

impl Config {
    /// Load config from the standard path, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the standard path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        let contents = toml::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut options = OpenOptions::new();
            options.write(true).create(true).truncate(true).mode(0o600);
            let mut file = options.open(&path)?;
            file.write_all(contents.as_bytes())?;

            // open() keeps the mode of a pre-existing file
            let mut perms = file.metadata()?.permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&path, perms)?;
            }
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&path, contents)?;
        }

        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Apply a `key = value` setting from the command line.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "units.system" => match value {
                "metric" => self.units = Units::default(),
                "imperial" => self.units = Units::imperial(),
                _ => anyhow::bail!("units.system must be 'metric' or 'imperial'"),
            },
            "units.height" => self.units.height = value.parse()?,
            "units.weight" => self.units.weight = value.parse()?,
            "goals.default_daily_calories" => {
                let kcal: f64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid calorie value: {}", value))?;
                if !kcal.is_finite() {
                    anyhow::bail!("invalid calorie value: {}", value);
                }
                self.goals.default_daily_calories = bound_daily_goal(kcal);
            }
            _ => anyhow::bail!("unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("PLATEWISE_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".platewise")
    }

    pub fn path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    pub fn db_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }
}
