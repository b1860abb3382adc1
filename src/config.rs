//! Screen and backup-adapter settings.
//!
//! Defaults are always available. With the `config` feature the settings can
//! also be read from `<config dir>/pinconfirm/config.toml`:
//!
//! ```toml
//! keyboard = "alphanumeric"
//! animation_ms = 500
//! theme = "high-contrast"
//!
//! [backup]
//! latency_ms = 1200
//! fail = false
//! ```

use crate::backup::PinSetResult;
use crate::error::{PinConfirmError, Result};
use crate::pin::KeyboardMode;
use std::time::Duration;

/// How long the success/failure animation plays before the label is cleared.
pub const DEFAULT_ANIMATION_MS: u64 = 750;
pub const DEFAULT_BACKUP_LATENCY_MS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ScreenConfig {
    pub keyboard: KeyboardSetting,
    pub animation_ms: u64,
    pub theme: String,
    pub backup: BackupConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct BackupConfig {
    pub latency_ms: u64,
    pub fail: bool,
}

/// Keyboard setting as spelled in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum KeyboardSetting {
    #[default]
    Numeric,
    Alphanumeric,
}

impl KeyboardSetting {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "numeric" => Ok(Self::Numeric),
            "alphanumeric" | "alpha" => Ok(Self::Alphanumeric),
            other => Err(PinConfirmError::invalid_argument(format!(
                "unknown keyboard '{other}', expected numeric or alphanumeric"
            ))),
        }
    }
}

impl From<KeyboardSetting> for KeyboardMode {
    fn from(setting: KeyboardSetting) -> Self {
        match setting {
            KeyboardSetting::Numeric => KeyboardMode::Numeric,
            KeyboardSetting::Alphanumeric => KeyboardMode::AlphaNumeric,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            keyboard: KeyboardSetting::default(),
            animation_ms: DEFAULT_ANIMATION_MS,
            theme: "default".to_string(),
            backup: BackupConfig::default(),
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_BACKUP_LATENCY_MS,
            fail: false,
        }
    }
}

impl BackupConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn outcome(&self) -> PinSetResult {
        if self.fail {
            PinSetResult::Failure
        } else {
            PinSetResult::Success
        }
    }
}

impl ScreenConfig {
    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn keyboard_mode(&self) -> KeyboardMode {
        self.keyboard.into()
    }

    /// Load settings from the user's config file, falling back to defaults
    /// when the file does not exist.
    #[cfg(feature = "config")]
    pub fn load() -> Result<Self> {
        match dirs::config_dir() {
            Some(dir) => {
                let path = dir.join("pinconfirm").join("config.toml");
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
            None => Ok(Self::default()),
        }
    }

    #[cfg(not(feature = "config"))]
    pub fn load() -> Result<Self> {
        Ok(Self::default())
    }

    #[cfg(feature = "config")]
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            PinConfirmError::config(format!("cannot read {}: {}", path.display(), err))
        })?;
        Self::from_toml(&text)
    }

    #[cfg(feature = "config")]
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|err| PinConfirmError::config(format!("invalid config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        crate::render::ColorTheme::from_name(&self.theme)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ScreenConfig::default();
        assert_eq!(config.keyboard_mode(), KeyboardMode::Numeric);
        assert_eq!(config.animation(), Duration::from_millis(750));
        assert_eq!(config.backup.outcome(), PinSetResult::Success);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn keyboard_setting_parsing() {
        assert_eq!(KeyboardSetting::parse("Numeric").unwrap(), KeyboardSetting::Numeric);
        assert_eq!(
            KeyboardMode::from(KeyboardSetting::parse("alphanumeric").unwrap()),
            KeyboardMode::AlphaNumeric
        );
        assert!(KeyboardSetting::parse("dvorak").is_err());
    }

    #[test]
    fn failing_backup_outcome() {
        let backup = BackupConfig {
            latency_ms: 0,
            fail: true,
        };
        assert_eq!(backup.outcome(), PinSetResult::Failure);
        assert!(backup.latency().is_zero());
    }

    #[test]
    fn unknown_theme_fails_validation() {
        let config = ScreenConfig {
            theme: "neon".to_string(),
            ..ScreenConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "config")]
    mod file {
        use super::*;
        use std::io::Write;

        #[test]
        fn parses_partial_toml_with_defaults() {
            let config = ScreenConfig::from_toml(
                "keyboard = \"alphanumeric\"\n[backup]\nfail = true\n",
            )
            .unwrap();
            assert_eq!(config.keyboard_mode(), KeyboardMode::AlphaNumeric);
            assert!(config.backup.fail);
            assert_eq!(config.backup.latency_ms, DEFAULT_BACKUP_LATENCY_MS);
            assert_eq!(config.animation_ms, DEFAULT_ANIMATION_MS);
        }

        #[test]
        fn reads_from_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "animation_ms = 200\ntheme = \"monochrome\"").unwrap();

            let config = ScreenConfig::from_file(file.path()).unwrap();
            assert_eq!(config.animation_ms, 200);
            assert_eq!(config.theme, "monochrome");
        }

        #[test]
        fn rejects_bad_values() {
            assert!(ScreenConfig::from_toml("theme = \"neon\"").is_err());
            assert!(ScreenConfig::from_toml("keyboard = \"dvorak\"").is_err());
        }
    }
}
