use crate::domain::model::Collection;
use crate::utils::error::{KpiError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const SOURCE_TYPES: [&str; 2] = ["http", "local"];
pub const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub dashboard: DashboardInfo,
    pub source: SourceConfig,
    #[serde(default)]
    pub collections: CollectionPaths,
    #[serde(default)]
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub r#type: String,
    pub endpoint: Option<String>,
    pub directory: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

/// Where each collection lives, relative to the endpoint or directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionPaths {
    pub dozenten: String,
    pub raeume: String,
    pub teilnehmer: String,
    pub kurse: String,
    pub anmeldungen: String,
}

impl Default for CollectionPaths {
    fn default() -> Self {
        Self {
            dozenten: Collection::Instructors.name().to_string(),
            raeume: Collection::Rooms.name().to_string(),
            teilnehmer: Collection::Participants.name().to_string(),
            kurse: Collection::Courses.name().to_string(),
            anmeldungen: Collection::Enrollments.name().to_string(),
        }
    }
}

impl CollectionPaths {
    pub fn path(&self, collection: Collection) -> &str {
        match collection {
            Collection::Instructors => &self.dozenten,
            Collection::Rooms => &self.raeume,
            Collection::Participants => &self.teilnehmer,
            Collection::Courses => &self.kurse,
            Collection::Enrollments => &self.anmeldungen,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Http,
    Local,
}

impl TomlConfig {
    /// Minimal config reading JSON snapshots from `directory`.
    pub fn local(directory: impl Into<String>) -> Self {
        Self {
            dashboard: DashboardInfo {
                name: "snapshot".to_string(),
                description: None,
            },
            source: SourceConfig {
                r#type: "local".to_string(),
                endpoint: None,
                directory: Some(directory.into()),
                timeout_seconds: None,
                headers: None,
            },
            collections: CollectionPaths::default(),
            output: OutputConfig::default(),
            logging: None,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(KpiError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| KpiError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| KpiError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn source_kind(&self) -> Result<SourceKind> {
        match self.source.r#type.as_str() {
            "http" => Ok(SourceKind::Http),
            "local" => Ok(SourceKind::Local),
            other => Err(KpiError::InvalidConfigValueError {
                field: "source.type".to_string(),
                value: other.to_string(),
                reason: format!("Valid values: {}", SOURCE_TYPES.join(", ")),
            }),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("dashboard.name", &self.dashboard.name)?;

        match self.source_kind()? {
            SourceKind::Http => {
                let endpoint =
                    validation::validate_required_field("source.endpoint", &self.source.endpoint)?;
                validation::validate_url("source.endpoint", endpoint)?;
            }
            SourceKind::Local => {
                let directory = validation::validate_required_field(
                    "source.directory",
                    &self.source.directory,
                )?;
                validation::validate_path("source.directory", directory)?;
            }
        }

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }

        for collection in Collection::ALL {
            validation::validate_non_empty_string(
                &format!("collections.{}", collection.name()),
                self.collections.path(collection),
            )?;
        }

        validation::validate_one_of("output.format", &self.output.format, &OUTPUT_FORMATS)?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_http_config() {
        let toml_content = r#"
[dashboard]
name = "Kursverwaltung"

[source]
type = "http"
endpoint = "https://records.example.com/rest"
timeout_seconds = 10

[source.headers]
X-API-Key = "secret"

[collections]
kurse = "apps/k1/records"
anmeldungen = "apps/a1/records"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.dashboard.name, "Kursverwaltung");
        assert_eq!(config.source_kind().unwrap(), SourceKind::Http);
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.collections.path(Collection::Courses), "apps/k1/records");
        assert_eq!(config.collections.path(Collection::Rooms), "raeume");
        assert_eq!(config.output.format, "text");
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("KURS_KPI_ENV_SUBSTITUTION_TEST_KEY", "from-env");

        let toml_content = r#"
[dashboard]
name = "test"

[source]
type = "http"
endpoint = "https://records.example.com"
headers = { X-API-Key = "${KURS_KPI_ENV_SUBSTITUTION_TEST_KEY}", X-Other = "${KURS_KPI_UNSET_VAR}" }
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let headers = config.source.headers.unwrap();
        assert_eq!(headers["X-API-Key"], "from-env");
        assert_eq!(headers["X-Other"], "${KURS_KPI_UNSET_VAR}");
    }

    #[test]
    fn test_config_validation() {
        let invalid_endpoint = r#"
[dashboard]
name = "test"

[source]
type = "http"
endpoint = "invalid-url"
"#;
        let config = TomlConfig::from_toml_str(invalid_endpoint).unwrap();
        assert!(config.validate().is_err());

        let missing_directory = r#"
[dashboard]
name = "test"

[source]
type = "local"
"#;
        let config = TomlConfig::from_toml_str(missing_directory).unwrap();
        assert!(matches!(
            config.validate(),
            Err(KpiError::MissingConfigError { .. })
        ));

        let mut config = TomlConfig::local("./snapshot");
        assert!(config.validate().is_ok());
        config.output.format = "xml".to_string();
        assert!(config.validate().is_err());
        config.output.format = "json".to_string();
        config.source.r#type = "ftp".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[dashboard]
name = "file-test"

[source]
type = "local"
directory = "./snapshot"

[output]
format = "json"

[logging]
json = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.dashboard.name, "file-test");
        assert_eq!(config.output.format, "json");
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }
}
