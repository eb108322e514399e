//! Pricing configuration
//!
//! Rates live in a YAML file so the shop can change them without a rebuild.
//! Every field is optional; anything left out keeps the published default.
//!
//! ```yaml
//! version: 1
//! exchange_rate: 180
//! service_fee:
//!   threshold_yen: 25000
//!   single_item_yen: 500
//!   tiers:
//!     - max_quantity: 5
//!       per_unit_yen: 400
//!     - max_quantity: 10
//!       per_unit_yen: 300
//!   overflow_per_unit_yen: 300
//!   percentage: 0.02
//! volumetric_divisor: 6000
//! bulk_contact_quantity: 10
//! ```

use crate::error::{Error, Result};
use crate::fee::ServiceFeeSchedule;
use crate::volumetric::DEFAULT_DIVISOR;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "order_price.yaml";

/// Above this quantity the shop asks customers to get in touch
pub const DEFAULT_BULK_CONTACT_QUANTITY: u32 = 10;

/// Pricing configuration (`order_price.yaml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PricingConfig {
    /// Schema version for migrations
    #[serde(default = "default_version")]
    pub version: u32,

    /// Initial exchange rate, VND per 1 JPY
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: f64,

    /// Service fee schedule
    #[serde(default)]
    pub service_fee: ServiceFeeSchedule,

    /// cm³ per kg for the volumetric estimate
    #[serde(default = "default_volumetric_divisor")]
    pub volumetric_divisor: f64,

    /// Quantities above this get the bulk-order notice
    #[serde(default = "default_bulk_contact_quantity")]
    pub bulk_contact_quantity: u32,
}

fn default_version() -> u32 {
    1
}

fn default_exchange_rate() -> f64 {
    180.0
}

fn default_volumetric_divisor() -> f64 {
    DEFAULT_DIVISOR
}

fn default_bulk_contact_quantity() -> u32 {
    DEFAULT_BULK_CONTACT_QUANTITY
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            exchange_rate: default_exchange_rate(),
            service_fee: ServiceFeeSchedule::default(),
            volumetric_divisor: default_volumetric_divisor(),
            bulk_contact_quantity: default_bulk_contact_quantity(),
        }
    }
}

impl PricingConfig {
    /// Parse and validate YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PricingConfig = serde_norway::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Load a config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::from_yaml(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] when none is given
    ///
    /// A missing default file falls back to built-in defaults. A missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if !default_path.exists() {
                    tracing::warn!(
                        "Could not find {}. Using default pricing.",
                        DEFAULT_CONFIG_FILE
                    );
                    return Ok(Self::default());
                }
                Self::load_from_file(default_path)
            }
        }
    }

    /// Check rates and tiers for values the calculator cannot use
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported config version: {}",
                self.version
            )));
        }

        let fee = &self.service_fee;
        let amounts = [
            ("exchange_rate", self.exchange_rate),
            ("service_fee.threshold_yen", fee.threshold_yen),
            ("service_fee.single_item_yen", fee.single_item_yen),
            ("service_fee.overflow_per_unit_yen", fee.overflow_per_unit_yen),
            ("service_fee.percentage", fee.percentage),
        ];
        for (name, value) in amounts {
            check_amount(name, value)?;
        }

        if !(self.volumetric_divisor.is_finite() && self.volumetric_divisor > 0.0) {
            return Err(Error::Config(format!(
                "volumetric_divisor must be positive, got {}",
                self.volumetric_divisor
            )));
        }

        let mut previous = 1;
        for (i, tier) in fee.tiers.iter().enumerate() {
            check_amount(&format!("service_fee.tiers[{}].per_unit_yen", i), tier.per_unit_yen)?;
            if tier.max_quantity <= previous {
                return Err(Error::Config(format!(
                    "service_fee.tiers[{}].max_quantity must be greater than {}, got {}",
                    i, previous, tier.max_quantity
                )));
            }
            previous = tier.max_quantity;
        }

        Ok(())
    }
}

fn check_amount(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::QuantityTier;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = PricingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.exchange_rate, 180.0);
        assert_eq!(config.service_fee.threshold_yen, 25_000.0);
        assert_eq!(config.volumetric_divisor, 6000.0);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = PricingConfig::from_yaml("exchange_rate: 172.5\n").unwrap();
        assert_eq!(config.exchange_rate, 172.5);
        assert_eq!(config.service_fee, ServiceFeeSchedule::default());
        assert_eq!(config.bulk_contact_quantity, 10);
    }

    #[test]
    fn test_nested_override() {
        let yaml = r#"
service_fee:
  percentage: 0.03
  tiers:
    - max_quantity: 4
      per_unit_yen: 450
"#;
        let config = PricingConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.service_fee.percentage, 0.03);
        assert_eq!(config.service_fee.single_item_yen, 500.0);
        assert_eq!(
            config.service_fee.tiers,
            vec![QuantityTier {
                max_quantity: 4,
                per_unit_yen: 450.0
            }]
        );
    }

    #[test]
    fn test_rejects_unknown_version() {
        let err = PricingConfig::from_yaml("version: 2\n").unwrap_err();
        assert!(err.to_string().contains("Unsupported config version"));
    }

    #[test]
    fn test_rejects_negative_rate() {
        let err = PricingConfig::from_yaml("exchange_rate: -1\n").unwrap_err();
        assert!(err.to_string().contains("exchange_rate"));
    }

    #[test]
    fn test_rejects_zero_divisor() {
        assert!(PricingConfig::from_yaml("volumetric_divisor: 0\n").is_err());
    }

    #[test]
    fn test_rejects_unordered_tiers() {
        let yaml = r#"
service_fee:
  tiers:
    - max_quantity: 10
      per_unit_yen: 300
    - max_quantity: 5
      per_unit_yen: 400
"#;
        let err = PricingConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("tiers[1].max_quantity"));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        assert!(matches!(
            PricingConfig::from_yaml("exchange_rate: [1, 2"),
            Err(Error::Yaml(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = PricingConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(PricingConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "exchange_rate: 165").unwrap();
        let config = PricingConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.exchange_rate, 165.0);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            PricingConfig::load(Some(&missing)),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_invalid_file_names_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "volumetric_divisor: -5").unwrap();
        let err = PricingConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("volumetric_divisor"));
    }
}
