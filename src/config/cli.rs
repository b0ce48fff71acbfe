use crate::config::toml_config::{TomlConfig, OUTPUT_FORMATS};
use crate::utils::error::{KpiError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "kurs-kpi")]
#[command(about = "Course dashboard KPIs from instructor, room, participant, course and enrollment records")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long, conflicts_with = "config", help = "Directory with <collection>.json snapshots")]
    pub snapshot_dir: Option<String>,

    #[arg(long, help = "Output format: text or json")]
    pub format: Option<String>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the TOML config (or builds a snapshot config) and applies
    /// command-line overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        self.validate()?;

        let mut config = match (&self.config, &self.snapshot_dir) {
            (Some(path), _) => TomlConfig::from_file(path)?,
            (None, Some(dir)) => TomlConfig::local(dir.clone()),
            (None, None) => {
                return Err(KpiError::MissingConfigError {
                    field: "--config or --snapshot-dir".to_string(),
                })
            }
        };

        if let Some(format) = &self.format {
            config.output.format = format.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.config.is_none() && self.snapshot_dir.is_none() {
            return Err(KpiError::MissingConfigError {
                field: "--config or --snapshot-dir".to_string(),
            });
        }
        if let Some(dir) = &self.snapshot_dir {
            validation::validate_path("--snapshot-dir", dir)?;
        }
        if let Some(format) = &self.format {
            validation::validate_one_of("--format", format, &OUTPUT_FORMATS)?;
        }
        Ok(())
    }
}
