use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub languages: LanguageSettings,
    pub session: SessionSettings,
    pub export: ExportSettings,
}

/// Language validation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LanguageSettings {
    /// Codes accepted by the transcript store.
    pub supported: Vec<String>,
    /// Code used when a requested language is unknown.
    pub fallback: String,
}

/// Recognition session configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionSettings {
    /// Maximum recording duration in seconds.
    pub max_recording_secs: u64,
    /// Request interim hypotheses from the engine.
    pub partial_results: bool,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportSettings {
    /// Prefix for derived export file names.
    pub file_prefix: String,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            supported: defaults::SUPPORTED_LANGUAGES
                .iter()
                .map(|code| code.to_string())
                .collect(),
            fallback: defaults::FALLBACK_LANGUAGE.to_string(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_recording_secs: defaults::MAX_RECORDING_SECS,
            partial_results: true,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_prefix: defaults::EXPORT_FILE_PREFIX.to_string(),
        }
    }
}

impl From<&SessionSettings> for crate::session::SessionConfig {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            max_recording: Duration::from_secs(settings.max_recording_secs),
            partial_results: settings.partial_results,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Self::default()
                } else {
                    panic!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VOICESCRIBE_LANGUAGES → languages.supported (comma separated)
    /// - VOICESCRIBE_MAX_RECORDING_SECS → session.max_recording_secs
    /// - VOICESCRIBE_FILE_PREFIX → export.file_prefix
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(languages) = std::env::var("VOICESCRIBE_LANGUAGES")
            && !languages.is_empty()
        {
            self.languages.supported = languages
                .split(',')
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty())
                .collect();
        }

        if let Ok(secs) = std::env::var("VOICESCRIBE_MAX_RECORDING_SECS")
            && let Ok(secs) = secs.parse::<u64>()
            && secs > 0
        {
            self.session.max_recording_secs = secs;
        }

        if let Ok(prefix) = std::env::var("VOICESCRIBE_FILE_PREFIX")
            && !prefix.is_empty()
        {
            self.export.file_prefix = prefix;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/voicescribe/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("voicescribe")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to serialize tests that modify environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // SAFETY: These helpers are only used in tests with ENV_LOCK held,
    // ensuring no concurrent access to environment variables.
    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) }
    }

    fn clear_voicescribe_env() {
        remove_env("VOICESCRIBE_LANGUAGES");
        remove_env("VOICESCRIBE_MAX_RECORDING_SECS");
        remove_env("VOICESCRIBE_FILE_PREFIX");
    }

    #[test]
    fn test_default_config_has_correct_values() {
        let config = Config::default();

        assert_eq!(config.languages.supported, vec!["en", "ru", "kk"]);
        assert_eq!(config.languages.fallback, "en");
        assert_eq!(config.session.max_recording_secs, 60);
        assert!(config.session.partial_results);
        assert_eq!(config.export.file_prefix, "VoiceScribe");
    }

    #[test]
    fn test_load_from_toml_file() {
        let toml_content = r#"
            [languages]
            supported = ["en", "ru"]
            fallback = "ru"

            [session]
            max_recording_secs = 120
            partial_results = false

            [export]
            file_prefix = "Memo"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.languages.supported, vec!["en", "ru"]);
        assert_eq!(config.languages.fallback, "ru");
        assert_eq!(config.session.max_recording_secs, 120);
        assert!(!config.session.partial_results);
        assert_eq!(config.export.file_prefix, "Memo");
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let toml_content = r#"
            [session]
            max_recording_secs = 30
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.session.max_recording_secs, 30);
        assert!(config.session.partial_results);
        assert_eq!(config.languages.supported, vec!["en", "ru", "kk"]);
        assert_eq!(config.export.file_prefix, "VoiceScribe");
    }

    #[test]
    fn test_env_override_languages() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_voicescribe_env();

        set_env("VOICESCRIBE_LANGUAGES", "en, ru");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.languages.supported, vec!["en", "ru"]);

        clear_voicescribe_env();
    }

    #[test]
    fn test_env_override_max_recording() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_voicescribe_env();

        set_env("VOICESCRIBE_MAX_RECORDING_SECS", "90");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.session.max_recording_secs, 90);

        clear_voicescribe_env();
    }

    #[test]
    fn test_env_override_rejects_invalid_duration() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_voicescribe_env();

        set_env("VOICESCRIBE_MAX_RECORDING_SECS", "not-a-number");
        let config = Config::default().with_env_overrides();
        assert_eq!(config.session.max_recording_secs, 60);

        set_env("VOICESCRIBE_MAX_RECORDING_SECS", "0");
        let config = Config::default().with_env_overrides();
        assert_eq!(config.session.max_recording_secs, 60);

        clear_voicescribe_env();
    }

    #[test]
    fn test_env_override_empty_string_ignored() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_voicescribe_env();

        set_env("VOICESCRIBE_FILE_PREFIX", "");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.export.file_prefix, "VoiceScribe");

        clear_voicescribe_env();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let invalid_toml = r#"
            [session
            max_recording_secs = "broken
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_toml.as_bytes()).unwrap();

        let result = Config::load(temp_file.path());

        assert!(result.is_err());
    }

    #[test]
    fn test_default_path_is_xdg_compliant() {
        let path = Config::default_path();
        let path_str = path.to_string_lossy();

        assert!(path_str.contains("voicescribe"));
        assert!(path_str.ends_with("config.toml"));
    }

    #[test]
    fn test_load_or_default_returns_default_for_missing_file() {
        let missing_path = Path::new("/tmp/nonexistent_voicescribe_config_12345.toml");
        let config = Config::load_or_default(missing_path);

        assert_eq!(config, Config::default());
    }

    #[test]
    #[should_panic(expected = "Failed to load config")]
    fn test_load_or_default_panics_on_invalid_toml() {
        let invalid_toml = r#"
            [session
            max_recording_secs = "broken
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_toml.as_bytes()).unwrap();

        Config::load_or_default(temp_file.path());
    }

    #[test]
    fn test_session_settings_convert_to_session_config() {
        let settings = SessionSettings {
            max_recording_secs: 45,
            partial_results: false,
        };
        let config = crate::session::SessionConfig::from(&settings);

        assert_eq!(config.max_recording, Duration::from_secs(45));
        assert!(!config.partial_results);
    }
}
