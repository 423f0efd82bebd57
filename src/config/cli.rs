use crate::config::toml_config::{FareConfig, DEFAULT_CONFIG_FILE};
use crate::core::tariff::Revision;
use crate::utils::error::{FareError, Result};
use crate::utils::validation::{validate_path, validate_range, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "ride-fare")]
#[command(about = "Estimate ride fares from tiered time-of-day rate tables")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Override the preference file location from config
    #[arg(long, global = true)]
    pub prefs: Option<String>,

    /// Override the storage revision from config
    #[arg(long, global = true, value_enum)]
    pub revision: Option<Revision>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Estimate the fare for a trip distance
    Quote {
        /// Trip distance in kilometers
        #[arg(allow_hyphen_values = true)]
        distance: String,

        /// Tier index; defaults to the tier for the current hour
        #[arg(short, long)]
        tier: Option<usize>,

        /// Pick the tier for this hour of day instead of the current one
        #[arg(long)]
        hour: Option<u32>,
    },

    /// List all tiers and their rates
    Rules,

    /// Edit one field of a tier
    Edit {
        /// Tier index
        index: usize,

        /// Field name, e.g. baseFare or unit_price; `name` renames the tier
        field: String,

        value: String,
    },

    /// Show or set the global discount multiplier
    Discount {
        /// New discount between 0.01 and 1.0
        value: Option<f64>,
    },

    /// Show which tier applies at an hour of day
    Tier {
        #[arg(long)]
        hour: Option<u32>,
    },

    /// Restore the built-in fare table
    Reset,
}

impl CliConfig {
    /// 命令列參數優先於設定檔
    pub fn apply_overrides(&self, mut config: FareConfig) -> FareConfig {
        if let Some(prefs) = &self.prefs {
            tracing::debug!("🔧 Preference path overridden to: {}", prefs);
            config.storage.path = Some(prefs.clone());
        }
        if let Some(revision) = self.revision {
            tracing::debug!("🔧 Revision overridden to: {}", revision);
            config.storage.revision = Some(revision);
        }
        config
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config", &self.config)?;
        if let Some(prefs) = &self.prefs {
            validate_path("prefs", prefs)?;
        }

        match &self.command {
            Command::Quote { hour: Some(hour), .. } | Command::Tier { hour: Some(hour) } => {
                validate_range("hour", *hour, 0, 23)?;
            }
            Command::Discount { value: Some(value) } => {
                validate_range("discount", *value, 0.01, 1.0)?;
            }
            Command::Edit { field, .. } if field.trim().is_empty() => {
                return Err(FareError::UnknownField {
                    name: field.clone(),
                });
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote_with_overrides() {
        let cli = CliConfig::try_parse_from([
            "ride-fare",
            "quote",
            "12.5",
            "--tier",
            "1",
            "--revision",
            "v1",
            "--prefs",
            "/tmp/p.json",
        ])
        .unwrap();

        match &cli.command {
            Command::Quote { distance, tier, hour } => {
                assert_eq!(distance, "12.5");
                assert_eq!(*tier, Some(1));
                assert_eq!(*hour, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let config = cli.apply_overrides(FareConfig::default());
        assert_eq!(config.revision(), Revision::V1);
        assert_eq!(config.storage.path.as_deref(), Some("/tmp/p.json"));
    }

    #[test]
    fn test_negative_distance_is_accepted() {
        let cli = CliConfig::try_parse_from(["ride-fare", "quote", "-3"]).unwrap();
        assert!(matches!(cli.command, Command::Quote { ref distance, .. } if distance == "-3"));
    }

    #[test]
    fn test_validation_rejects_bad_hour_and_discount() {
        let cli = CliConfig::try_parse_from(["ride-fare", "tier", "--hour", "24"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = CliConfig::try_parse_from(["ride-fare", "discount", "1.5"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = CliConfig::try_parse_from(["ride-fare", "discount", "0.85"]).unwrap();
        assert!(cli.validate().is_ok());
    }
}
