use crate::errors::{AppError, AppResult};
use crate::models::station::Station;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_window_months")]
    pub history_window_months: u32,
    #[serde(default = "default_overuse_ratio")]
    pub overuse_ratio: f64,
    #[serde(default = "default_overuse_min_count")]
    pub overuse_min_count: u32,
    #[serde(default = "default_manual_station")]
    pub manual_station: String,
    #[serde(default = "default_stations")]
    pub stations: Vec<Station>,
}

fn default_window_months() -> u32 {
    6
}
fn default_overuse_ratio() -> f64 {
    1.5
}
fn default_overuse_min_count() -> u32 {
    5
}
fn default_manual_station() -> String {
    "Notes".to_string()
}
fn default_stations() -> Vec<Station> {
    vec![
        Station::new("Plock", 0),
        Station::new("Pack", 2),
        Station::new("KM", 0),
        Station::new("Decating", 0),
        Station::new("Rep", 0),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            history_window_months: default_window_months(),
            overuse_ratio: default_overuse_ratio(),
            overuse_min_count: default_overuse_min_count(),
            manual_station: default_manual_station(),
            stations: default_stations(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rstationrota")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rstationrota")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rstationrota.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rstationrota.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut cfg: Config = serde_yaml::from_str(&content)?;
            cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
            Ok(cfg)
        } else {
            Ok(Self::default())
        }
    }

    /// Look up a distributable station by name.
    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name == name)
    }

    pub fn station_names(&self) -> Vec<String> {
        self.stations.iter().map(|s| s.name.clone()).collect()
    }

    pub fn is_manual_station(&self, name: &str) -> bool {
        self.manual_station == name
    }

    /// Return every problem found in the configuration (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.stations.is_empty() {
            problems.push("no stations configured".to_string());
        }

        let mut seen = HashSet::new();
        for s in &self.stations {
            if s.name.trim().is_empty() {
                problems.push("station with an empty name".to_string());
            } else if s.name.contains(':') {
                problems.push(format!("station name '{}' must not contain ':'", s.name));
            }
            if !seen.insert(s.name.as_str()) {
                problems.push(format!("duplicate station '{}'", s.name));
            }
        }

        if seen.contains(self.manual_station.as_str()) {
            problems.push(format!(
                "manual station '{}' is also listed as a distributable station",
                self.manual_station
            ));
        }

        if self.overuse_ratio.is_nan() || self.overuse_ratio <= 0.0 {
            problems.push(format!(
                "overuse_ratio must be positive, got {}",
                self.overuse_ratio
            ));
        }

        if self.history_window_months == 0 {
            problems.push("history_window_months must be at least 1".to_string());
        }

        problems
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rstationrota.sqlite")
        };

        let config = Self::with_database(db_path.clone());

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }

    pub fn ensure_valid(&self) -> AppResult<()> {
        let problems = self.validate();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Config(problems.join("; ")))
        }
    }
}
