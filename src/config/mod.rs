use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database (the durable source of truth).
    pub database: String,
    /// Path to the Excel workbook mirrored by the sync.
    pub workbook: String,
    /// Timezone used to render/parse workbook date and time strings.
    /// Either an IANA zone name ("Europe/Prague") or the sentinel "system"
    /// meaning the host machine's local zone. Storage is always UTC.
    #[serde(default = "default_excel_timezone")]
    pub excel_timezone: String,
}

fn default_excel_timezone() -> String {
    "system".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            workbook: Self::workbook_file().to_string_lossy().to_string(),
            excel_timezone: default_excel_timezone(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("timebook")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".timebook")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timebook.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("timebook.sqlite")
    }

    /// Return the full path of the Excel workbook
    pub fn workbook_file() -> PathBuf {
        Self::config_dir().join("timebook.xlsx")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)
        } else {
            Ok(Config::default())
        }
    }

    /// Initialize the configuration file and the data file paths.
    ///
    /// `custom_db` / `custom_workbook` override the default locations.
    /// In test mode the config file is not written, so test runs never
    /// touch the user's real configuration.
    pub fn init_all(
        custom_db: Option<String>,
        custom_workbook: Option<String>,
        is_test: bool,
    ) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let resolve = |name: Option<String>, default: PathBuf| -> PathBuf {
            match name {
                Some(n) => {
                    let p = PathBuf::from(&n);
                    if p.is_absolute() { p } else { dir.join(p) }
                }
                None => default,
            }
        };

        let db_path = resolve(custom_db, Self::database_file());
        let workbook_path = resolve(custom_workbook, Self::workbook_file());

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            workbook: workbook_path.to_string_lossy().to_string(),
            excel_timezone: default_excel_timezone(),
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
