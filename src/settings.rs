//! # Settings Module
//!
//! ## Purpose
//! User preferences of the calculator: the default unit for amounts of substance and the
//! number of decimal places shown for molar mass, reagent mass and moles. Settings are
//! kept in a JSON file (`molmass_settings.json` in the working directory by default).
//!
//! ## Architecture
//! - **Settings**: serializable preferences with the defaults of the calculator
//!   (mmol, 3 decimals for molar mass, 4 for reagent mass (analytical balance), 6 for moles)
//! - **SettingsManager**: loads, validates, updates and saves `Settings`
//! - **Global Access**: `OnceLock<Mutex<..>>` singleton behind `with_settings` and
//!   `with_settings_mut`; tests get their own manager and never touch the real file
//!
//! ## Configuration Format
//! ```json
//! {
//!   "default_unit": "mmol",
//!   "precision_molar_mass": 3,
//!   "precision_reagent_mass": 4,
//!   "precision_moles": 6
//! }
//! ```
//!
//! ## Usage
//! ```rust
//! use molmass_calc::settings::with_settings;
//!
//! let decimals = with_settings(|manager| manager.settings().precision_molar_mass);
//! assert!(decimals <= 15);
//! ```
use crate::MolarMass::units::{AmountUnit, UnknownUnit};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "molmass_settings.json";
/// more decimals than an f64 can meaningfully show
pub const MAX_PRECISION: usize = 15;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unknown setting '{0}'")]
    UnknownKey(String),
    #[error(transparent)]
    Unit(#[from] UnknownUnit),
    #[error("invalid precision '{0}', expected an integer from 0 to 15")]
    InvalidPrecision(String),
    #[error("settings file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings format error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_unit: AmountUnit,
    pub precision_molar_mass: usize,
    pub precision_reagent_mass: usize,
    pub precision_moles: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_unit: AmountUnit::Mmol,
            precision_molar_mass: 3,
            precision_reagent_mass: 4,
            precision_moles: 6,
        }
    }
}

impl Settings {
    /// names accepted by `SettingsManager::set_value`
    pub const KEYS: [&'static str; 4] = [
        "default_unit",
        "precision_molar_mass",
        "precision_reagent_mass",
        "precision_moles",
    ];

    fn check(&self) -> Result<(), SettingsError> {
        for precision in [
            self.precision_molar_mass,
            self.precision_reagent_mass,
            self.precision_moles,
        ] {
            if precision > MAX_PRECISION {
                return Err(SettingsError::InvalidPrecision(precision.to_string()));
            }
        }
        Ok(())
    }
}

fn parse_precision(value: &str) -> Result<usize, SettingsError> {
    match value.trim().parse::<usize>() {
        Ok(p) if p <= MAX_PRECISION => Ok(p),
        _ => Err(SettingsError::InvalidPrecision(value.to_string())),
    }
}

#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings: Settings,
    config_file: PathBuf,
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsManager {
    /// Loads `molmass_settings.json` from the working directory, or uses defaults.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_SETTINGS_FILE)
    }

    /// Loads settings from `config_file`. A missing or unreadable file gives defaults;
    /// the path is remembered for `save_config`.
    pub fn with_config_file(config_file: impl AsRef<Path>) -> Self {
        let config_file = config_file.as_ref().to_path_buf();
        let settings = match Self::load_config(&config_file) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "failed to load settings from {}: {}; using defaults",
                    config_file.display(),
                    e
                );
                Settings::default()
            }
        };
        Self {
            settings,
            config_file,
        }
    }

    fn load_config(config_file: &Path) -> Result<Settings, SettingsError> {
        if !config_file.exists() {
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(config_file)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.check()?;
        info!("settings loaded from {}", config_file.display());
        Ok(settings)
    }

    /// Writes the current settings as pretty JSON. Does nothing in unit tests, so the
    /// real settings file is never overwritten.
    pub fn save_config(&self) -> Result<(), SettingsError> {
        #[cfg(test)]
        {
            Ok(())
        }

        #[cfg(not(test))]
        {
            self.write_to(&self.config_file)
        }
    }

    /// writes the current settings to an explicit path
    pub fn write_to(&self, path: &Path) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(&self.settings)?;
        fs::write(path, content)?;
        info!("settings saved to {}", path.display());
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Updates one setting by name and saves the file. If saving fails the previous
    /// value is restored.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.set_value_with(key, value, Self::save_config)
    }

    fn set_value_with<F>(&mut self, key: &str, value: &str, persist: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&Self) -> Result<(), SettingsError>,
    {
        let previous = self.settings.clone();
        match key {
            "default_unit" => self.settings.default_unit = value.parse()?,
            "precision_molar_mass" => self.settings.precision_molar_mass = parse_precision(value)?,
            "precision_reagent_mass" => {
                self.settings.precision_reagent_mass = parse_precision(value)?
            }
            "precision_moles" => self.settings.precision_moles = parse_precision(value)?,
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        if let Err(e) = persist(self) {
            warn!("setting {} not saved, keeping previous value: {}", key, e);
            self.settings = previous;
            return Err(e);
        }
        info!("setting {} = {}", key, value.trim());
        Ok(())
    }

    /// Current value of a setting by name, as text.
    pub fn get_value(&self, key: &str) -> Option<String> {
        let s = &self.settings;
        match key {
            "default_unit" => Some(s.default_unit.to_string()),
            "precision_molar_mass" => Some(s.precision_molar_mass.to_string()),
            "precision_reagent_mass" => Some(s.precision_reagent_mass.to_string()),
            "precision_moles" => Some(s.precision_moles.to_string()),
            _ => None,
        }
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), SettingsError> {
        let previous = std::mem::take(&mut self.settings);
        if let Err(e) = self.save_config() {
            self.settings = previous;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(not(test))]
static SETTINGS_MANAGER: OnceLock<Mutex<SettingsManager>> = OnceLock::new();

#[cfg(test)]
static TEST_SETTINGS_MANAGER: OnceLock<Mutex<SettingsManager>> = OnceLock::new();

fn settings_manager() -> &'static Mutex<SettingsManager> {
    #[cfg(test)]
    {
        TEST_SETTINGS_MANAGER.get_or_init(|| {
            Mutex::new(SettingsManager {
                settings: Settings::default(),
                config_file: PathBuf::from("test_settings.json"),
            })
        })
    }

    #[cfg(not(test))]
    {
        SETTINGS_MANAGER.get_or_init(|| Mutex::new(SettingsManager::new()))
    }
}

/// Read-only access to the process-wide settings.
pub fn with_settings<F, R>(f: F) -> R
where
    F: FnOnce(&SettingsManager) -> R,
{
    // settings stay usable after a panic in another holder of the lock
    let manager = settings_manager()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&manager)
}

/// Mutable access to the process-wide settings.
pub fn with_settings_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut SettingsManager) -> R,
{
    let mut manager = settings_manager()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_unit, AmountUnit::Mmol);
        assert_eq!(settings.precision_molar_mass, 3);
        assert_eq!(settings.precision_reagent_mass, 4);
        assert_eq!(settings.precision_moles, 6);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let manager = SettingsManager::with_config_file(dir.path().join("absent.json"));
        assert_eq!(manager.settings(), &Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{ "default_unit": "mol", "precision_molar_mass": 2 }}"#
        )
        .unwrap();
        let manager = SettingsManager::with_config_file(file.path());
        let settings = manager.settings();
        assert_eq!(settings.default_unit, AmountUnit::Mol);
        assert_eq!(settings.precision_molar_mass, 2);
        // fields absent from the file keep their defaults
        assert_eq!(settings.precision_reagent_mass, 4);
        assert_eq!(settings.precision_moles, 6);
    }

    #[test]
    fn test_broken_file_gives_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();
        let manager = SettingsManager::with_config_file(file.path());
        assert_eq!(manager.settings(), &Settings::default());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "precision_moles": 40 }}"#).unwrap();
        let manager = SettingsManager::with_config_file(file.path());
        assert_eq!(manager.settings(), &Settings::default());
    }

    #[test]
    fn test_write_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut manager = SettingsManager::with_config_file(&path);
        manager.set_value("default_unit", "mol").unwrap();
        manager.set_value("precision_moles", "8").unwrap();
        manager.write_to(&path).unwrap();

        let reloaded = SettingsManager::with_config_file(&path);
        assert_eq!(reloaded.settings().default_unit, AmountUnit::Mol);
        assert_eq!(reloaded.settings().precision_moles, 8);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"default_unit\": \"mol\""));
    }

    #[test]
    fn test_failed_save_keeps_previous_value() {
        let dir = tempdir().unwrap();
        let mut manager = SettingsManager::with_config_file(dir.path().join("s.json"));
        let unwritable = dir.path().join("missing_dir").join("s.json");
        let result = manager.set_value_with("precision_moles", "9", |m| m.write_to(&unwritable));
        assert!(matches!(result, Err(SettingsError::Io(_))));
        assert_eq!(manager.settings().precision_moles, 6);
        assert_eq!(manager.get_value("precision_moles"), Some("6".to_string()));

        let writable = dir.path().join("s.json");
        manager
            .set_value_with("precision_moles", "9", |m| m.write_to(&writable))
            .unwrap();
        assert_eq!(manager.settings().precision_moles, 9);
    }

    #[test]
    fn test_set_value_validation() {
        let dir = tempdir().unwrap();
        let mut manager = SettingsManager::with_config_file(dir.path().join("s.json"));
        assert!(matches!(
            manager.set_value("colour", "blue"),
            Err(SettingsError::UnknownKey(_))
        ));
        assert!(matches!(
            manager.set_value("default_unit", "kmol"),
            Err(SettingsError::Unit(_))
        ));
        assert!(matches!(
            manager.set_value("precision_molar_mass", "-1"),
            Err(SettingsError::InvalidPrecision(_))
        ));
        assert!(matches!(
            manager.set_value("precision_molar_mass", "16"),
            Err(SettingsError::InvalidPrecision(_))
        ));
        assert_eq!(manager.settings(), &Settings::default());

        manager.set_value("precision_reagent_mass", " 2 ").unwrap();
        assert_eq!(
            manager.get_value("precision_reagent_mass"),
            Some("2".to_string())
        );
        assert_eq!(manager.get_value("colour"), None);
        manager.reset_to_defaults().unwrap();
        assert_eq!(manager.settings(), &Settings::default());
    }

    #[test]
    fn test_every_key_is_readable() {
        let manager = SettingsManager {
            settings: Settings::default(),
            config_file: PathBuf::from("unused.json"),
        };
        for key in Settings::KEYS {
            assert!(manager.get_value(key).is_some(), "{}", key);
        }
    }

    #[test]
    fn test_global_access() {
        let unit = with_settings(|manager| manager.settings().default_unit);
        assert_eq!(unit, AmountUnit::Mmol);
        with_settings_mut(|manager| manager.set_value("precision_molar_mass", "3")).unwrap();
        assert_eq!(
            with_settings(|manager| manager.settings().precision_molar_mass),
            3
        );
    }
}
