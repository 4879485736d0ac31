//! Configuration loading.
//!
//! Loads application settings from environment variables (optionally seeded
//! from a local `.env` file) into a typed `Settings` record that is read once
//! at startup and never mutated afterwards. Every field has a documented
//! default, so loading only fails when a value is present but malformed.

use std::env;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "tiwhanawhana=debug,tower_http=info";

/// Default display title for the orchestrator
pub const DEFAULT_PROJECT_NAME: &str = "Tiwhanawhana Orchestrator";

/// Application settings.
///
/// Each field is sourced from the environment variable named in its doc
/// comment, falling back to the stated default when the variable is unset or
/// empty. Variable names are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Display title used in the root status payload (`PROJECT_NAME`)
    pub project_name: String,
    /// Debug flag reported by the root handler (`DEBUG`, default false)
    pub debug: bool,
    /// Address the HTTP server binds (`FASTAPI_HOST`, default "0.0.0.0")
    pub host: String,
    /// Port the HTTP server listens on (`FASTAPI_PORT`, default 8000)
    pub port: u16,
    /// Comma-separated allowed CORS origins (`CORS_ORIGINS`, default empty)
    pub cors_origins: String,

    /// Supabase project URL (`SUPABASE_URL`)
    pub supabase_url: Option<String>,
    /// Supabase service key (`SUPABASE_KEY`)
    pub supabase_key: Option<String>,
    /// Supabase publishable key (`PUBLISHABLE_KEY`)
    pub publishable_key: Option<String>,

    /// OpenAI API key (`OPENAI_API_KEY`)
    pub openai_api_key: Option<String>,
    /// Embedding model identifier (`EMBEDDING_MODEL`)
    pub embedding_model: String,
    /// OCR model identifier (`OCR_MODEL`)
    pub ocr_model: String,
    /// Translation model identifier (`TRANSLATION_MODEL`)
    pub translation_model: String,
    /// Assistant model identifier (`ASSISTANT_MODEL`)
    pub assistant_model: String,
    /// Local LLM model identifier (`LOCAL_LLM_MODEL`)
    pub local_llm_model: String,

    /// Database connection string (`DATABASE_URL`)
    pub database_url: Option<String>,

    /// Root directory for orchestrator data (`MAURI_ROOT`, default "~/mauri",
    /// stored verbatim with no tilde expansion)
    pub mauri_root: String,
    /// Directory for log output (`LOGS_DIR`, default "logs/")
    pub logs_dir: String,
    /// Directory for uploaded files (`UPLOADS_DIR`, default "uploads/")
    pub uploads_dir: String,
    /// Directory for cached artifacts (`CACHE_DIR`, default "cache/")
    pub cache_dir: String,

    /// Supabase table for memories (`SUPABASE_TABLE_MEMORY`)
    pub supabase_table_memory: Option<String>,
    /// Supabase table for uploads (`SUPABASE_TABLE_UPLOADS`)
    pub supabase_table_uploads: Option<String>,
    /// Supabase table for summaries (`SUPABASE_TABLE_SUMMARIES`)
    pub supabase_table_summaries: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            debug: false,
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: String::new(),
            supabase_url: None,
            supabase_key: None,
            publishable_key: None,
            openai_api_key: None,
            embedding_model: "text-embedding-3-large".to_string(),
            ocr_model: "gpt-4o-mini".to_string(),
            translation_model: "gpt-4o-mini".to_string(),
            assistant_model: "gpt-5".to_string(),
            local_llm_model: "llama3".to_string(),
            database_url: None,
            mauri_root: "~/mauri".to_string(),
            logs_dir: "logs/".to_string(),
            uploads_dir: "uploads/".to_string(),
            cache_dir: "cache/".to_string(),
            supabase_table_memory: None,
            supabase_table_uploads: None,
            supabase_table_summaries: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// Unset or empty variables keep their defaults. A present but malformed
    /// typed value (non-numeric `FASTAPI_PORT`, unrecognizable `DEBUG`) is a
    /// hard error so startup fails before the server accepts traffic.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(value) = env_value("PROJECT_NAME") {
            settings.project_name = value;
        }
        if let Some(value) = env_value("DEBUG") {
            settings.debug = parse_bool("DEBUG", &value)?;
        }
        if let Some(value) = env_value("FASTAPI_HOST") {
            settings.host = value;
        }
        if let Some(value) = env_value("FASTAPI_PORT") {
            settings.port = value
                .parse()
                .map_err(|_| ConfigError::invalid("FASTAPI_PORT", &value, "a TCP port number"))?;
        }
        if let Some(value) = env_value("CORS_ORIGINS") {
            settings.cors_origins = value;
        }

        settings.supabase_url = env_value("SUPABASE_URL");
        settings.supabase_key = env_value("SUPABASE_KEY");
        settings.publishable_key = env_value("PUBLISHABLE_KEY");

        settings.openai_api_key = env_value("OPENAI_API_KEY");
        if let Some(value) = env_value("EMBEDDING_MODEL") {
            settings.embedding_model = value;
        }
        if let Some(value) = env_value("OCR_MODEL") {
            settings.ocr_model = value;
        }
        if let Some(value) = env_value("TRANSLATION_MODEL") {
            settings.translation_model = value;
        }
        if let Some(value) = env_value("ASSISTANT_MODEL") {
            settings.assistant_model = value;
        }
        if let Some(value) = env_value("LOCAL_LLM_MODEL") {
            settings.local_llm_model = value;
        }

        settings.database_url = env_value("DATABASE_URL");

        if let Some(value) = env_value("MAURI_ROOT") {
            settings.mauri_root = value;
        }
        if let Some(value) = env_value("LOGS_DIR") {
            settings.logs_dir = value;
        }
        if let Some(value) = env_value("UPLOADS_DIR") {
            settings.uploads_dir = value;
        }
        if let Some(value) = env_value("CACHE_DIR") {
            settings.cache_dir = value;
        }

        settings.supabase_table_memory = env_value("SUPABASE_TABLE_MEMORY");
        settings.supabase_table_uploads = env_value("SUPABASE_TABLE_UPLOADS");
        settings.supabase_table_summaries = env_value("SUPABASE_TABLE_SUMMARIES");

        Ok(settings)
    }

    /// Allowed CORS origins as a list.
    ///
    /// Splits `cors_origins` on commas, trims whitespace, and drops empty
    /// entries while preserving order. Returns an empty list when the field
    /// is empty.
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Look up an environment variable by name, case-insensitively.
///
/// Returns `None` when the variable is unset or set to an empty string, so
/// callers fall back to their defaults.
fn env_value(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .or_else(|| {
            env::vars()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .filter(|value| !value.is_empty())
}

/// Parse a boolean environment value.
///
/// Accepts "1"/"true"/"yes"/"on" and "0"/"false"/"no"/"off" in any case.
fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, value, "a boolean")),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, expected: &'static str) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    /// Every variable `from_env` reads. Tests clear these before running so
    /// the ambient environment cannot leak in.
    const ALL_VARS: &[&str] = &[
        "PROJECT_NAME",
        "DEBUG",
        "FASTAPI_HOST",
        "FASTAPI_PORT",
        "CORS_ORIGINS",
        "SUPABASE_URL",
        "SUPABASE_KEY",
        "PUBLISHABLE_KEY",
        "OPENAI_API_KEY",
        "EMBEDDING_MODEL",
        "OCR_MODEL",
        "TRANSLATION_MODEL",
        "ASSISTANT_MODEL",
        "LOCAL_LLM_MODEL",
        "DATABASE_URL",
        "MAURI_ROOT",
        "LOGS_DIR",
        "UPLOADS_DIR",
        "CACHE_DIR",
        "SUPABASE_TABLE_MEMORY",
        "SUPABASE_TABLE_UPLOADS",
        "SUPABASE_TABLE_SUMMARIES",
    ];

    /// The process environment is shared across test threads, so tests that
    /// touch it take this lock first.
    fn env_lock() -> MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn clear_env() {
        for key in ALL_VARS {
            env::remove_var(key);
        }
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let _guard = env_lock();
        clear_env();

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.project_name, DEFAULT_PROJECT_NAME);
        assert!(!settings.debug);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.cors_origins, "");
        assert_eq!(settings.embedding_model, "text-embedding-3-large");
        assert_eq!(settings.ocr_model, "gpt-4o-mini");
        assert_eq!(settings.translation_model, "gpt-4o-mini");
        assert_eq!(settings.assistant_model, "gpt-5");
        assert_eq!(settings.local_llm_model, "llama3");
        assert_eq!(settings.mauri_root, "~/mauri");
        assert_eq!(settings.logs_dir, "logs/");
        assert_eq!(settings.uploads_dir, "uploads/");
        assert_eq!(settings.cache_dir, "cache/");
        assert!(settings.supabase_url.is_none());
        assert!(settings.openai_api_key.is_none());
        assert!(settings.database_url.is_none());
        assert!(settings.supabase_table_memory.is_none());
    }

    #[test]
    fn env_values_override_defaults() {
        let _guard = env_lock();
        clear_env();

        env::set_var("PROJECT_NAME", "Foo");
        env::set_var("DEBUG", "true");
        env::set_var("FASTAPI_HOST", "127.0.0.1");
        env::set_var("FASTAPI_PORT", "9000");
        env::set_var("SUPABASE_URL", "https://example.supabase.co");

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.project_name, "Foo");
        assert!(settings.debug);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 9000);
        assert_eq!(
            settings.supabase_url.as_deref(),
            Some("https://example.supabase.co")
        );

        clear_env();
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let _guard = env_lock();
        clear_env();

        env::set_var("PROJECT_NAME", "");
        env::set_var("DEBUG", "");
        env::set_var("SUPABASE_KEY", "");

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.project_name, DEFAULT_PROJECT_NAME);
        assert!(!settings.debug);
        assert!(settings.supabase_key.is_none());

        clear_env();
    }

    #[test]
    fn variable_names_match_case_insensitively() {
        let _guard = env_lock();
        clear_env();

        // Lowercase names are distinct environment entries on Unix
        env::set_var("project_name", "Kupe");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.project_name, "Kupe");

        env::remove_var("project_name");
    }

    #[test]
    fn malformed_port_fails_construction() {
        let _guard = env_lock();
        clear_env();

        env::set_var("FASTAPI_PORT", "not-a-port");

        let err = Settings::from_env().unwrap_err();
        assert!(err.to_string().contains("FASTAPI_PORT"));

        clear_env();
    }

    #[test]
    fn malformed_debug_flag_fails_construction() {
        let _guard = env_lock();
        clear_env();

        env::set_var("DEBUG", "maybe");

        let err = Settings::from_env().unwrap_err();
        assert!(err.to_string().contains("DEBUG"));

        clear_env();
    }

    #[test]
    fn boolean_coercion_accepts_common_spellings() {
        for value in ["1", "true", "YES", "On"] {
            assert!(parse_bool("DEBUG", value).unwrap());
        }
        for value in ["0", "false", "NO", "Off"] {
            assert!(!parse_bool("DEBUG", value).unwrap());
        }
    }

    #[test]
    fn cors_origin_list_trims_and_drops_empty_entries() {
        let settings = Settings {
            cors_origins: "a, b ,,c".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.cors_origin_list(), vec!["a", "b", "c"]);
    }

    #[test]
    fn cors_origin_list_is_empty_for_empty_field() {
        let settings = Settings::default();
        assert!(settings.cors_origin_list().is_empty());
    }
}
