use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_INPUT_FILE, DEFAULT_MAX_RECORDS, DEFAULT_TABLE, ENV_PROJECT_REF,
    ENV_PUBLIC_URL, ENV_SERVICE_KEY, ENV_URL, SYSTEM_USER_ID,
};
use crate::error::{ImportError, Result};
use crate::pipeline::ingestion::expand_home;

/// Settings for one import run
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    pub input_file: PathBuf,
    pub table: String,
    pub batch_size: usize,
    pub max_records: usize,
    /// Owner recorded on every inserted row
    pub user_id: Uuid,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            input_file: expand_home(DEFAULT_INPUT_FILE),
            table: DEFAULT_TABLE.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            max_records: DEFAULT_MAX_RECORDS,
            user_id: SYSTEM_USER_ID,
        }
    }
}

impl ImportConfig {
    /// Overlays values present in a config file.
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(input_file) = file.input_file {
            self.input_file = expand_home(&input_file);
        }
        if let Some(table) = file.table {
            self.table = table;
        }
        if let Some(batch_size) = file.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(max_records) = file.max_records {
            self.max_records = max_records;
        }
        if let Some(user_id) = file.user_id {
            self.user_id = user_id;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(ImportError::Config("batch_size must be at least 1".to_string()));
        }
        if self.max_records == 0 {
            return Err(ImportError::Config("max_records must be at least 1".to_string()));
        }
        if self.table.trim().is_empty() {
            return Err(ImportError::Config("table name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Optional TOML overrides, e.g. `ufo_import.toml`:
///
/// ```toml
/// input_file = "~/data/ufo_sightings_enriched.json"
/// batch_size = 250
/// max_records = 2000
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub input_file: Option<String>,
    pub table: Option<String>,
    pub batch_size: Option<usize>,
    pub max_records: Option<usize>,
    pub user_id: Option<Uuid>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ImportError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: FileConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Database endpoint and service key, read from the environment
#[derive(Clone)]
pub struct Credentials {
    pub url: String,
    pub service_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("service_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// URL comes from the public URL, the plain URL, or a project ref, in that
    /// order. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let url = get(ENV_PUBLIC_URL).or_else(|| get(ENV_URL)).or_else(|| {
            get(ENV_PROJECT_REF).map(|project_ref| format!("https://{}.supabase.co", project_ref))
        });
        let service_key = get(ENV_SERVICE_KEY);

        match (url, service_key) {
            (Some(url), Some(service_key)) => Ok(Self { url, service_key }),
            _ => Err(ImportError::Config(format!(
                "Missing {} or {}",
                ENV_URL, ENV_SERVICE_KEY
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_credentials_prefer_public_url() {
        let creds = Credentials::from_lookup(lookup(&[
            ("NEXT_PUBLIC_SUPABASE_URL", "https://public.supabase.co"),
            ("SUPABASE_URL", "https://plain.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
        ]))
        .unwrap();
        assert_eq!(creds.url, "https://public.supabase.co");
        assert_eq!(creds.service_key, "service-key");
    }

    #[test]
    fn test_credentials_from_project_ref() {
        let creds = Credentials::from_lookup(lookup(&[
            ("SUPABASE_PROJECT_REF", "abcdxyz"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
        ]))
        .unwrap();
        assert_eq!(creds.url, "https://abcdxyz.supabase.co");
    }

    #[test]
    fn test_missing_credentials() {
        let err = Credentials::from_lookup(lookup(&[("SUPABASE_URL", "https://x.supabase.co")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY"
        );

        let blank_key = Credentials::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "  "),
        ]));
        assert!(blank_key.is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials {
            url: "https://x.supabase.co".to_string(),
            service_key: "super-secret".to_string(),
        };
        assert!(!format!("{:?}", creds).contains("super-secret"));
    }

    #[test]
    fn test_file_config_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "input_file = \"/data/sightings.json\"").unwrap();
        writeln!(file, "batch_size = 100").unwrap();
        writeln!(file, "max_records = 750").unwrap();

        let config = ImportConfig::default().merge_file(FileConfig::load(file.path()).unwrap());
        assert_eq!(config.input_file, PathBuf::from("/data/sightings.json"));
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.max_records, 750);
        assert_eq!(config.table, "aletheia_investigations");
        assert_eq!(config.user_id, Uuid::nil());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_config_rejects_unknown_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "batchsize = 100").unwrap();
        assert!(matches!(FileConfig::load(file.path()), Err(ImportError::Toml(_))));
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let config = ImportConfig {
            batch_size: 0,
            ..ImportConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ImportConfig {
            max_records: 0,
            ..ImportConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
