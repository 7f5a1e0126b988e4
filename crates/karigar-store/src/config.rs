//! # Store Configuration
//!
//! Pricing constants and the coupon table, loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KARIGAR_TAX_RATE_BPS=1800                                          │
//! │     KARIGAR_FREE_SHIPPING_THRESHOLD_PAISE=1000000                      │
//! │     KARIGAR_SHIPPING_FEE_PAISE=20000                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cart/karigar.toml (Linux)                                │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     18% GST, free shipping above ₹10,000, ₹200 fee, launch coupons     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [pricing]
//! tax_rate_bps = 1800
//! free_shipping_threshold_paise = 1000000
//! shipping_fee_paise = 20000
//!
//! [[coupons]]
//! code = "WELCOME10"
//! rate_bps = 1000
//! min_purchase_paise = 0
//! max_discount_paise = 200000
//! ```
//!
//! Omitting `[[coupons]]` keeps the launch coupon table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use karigar_core::validation::{normalize_coupon_code, validate_price, validate_rate_bps};
use karigar_core::{CouponBook, CouponRule, Money, PricingConfig, Rate};

use crate::error::{ConfigError, ConfigResult};

const ENV_TAX_RATE_BPS: &str = "KARIGAR_TAX_RATE_BPS";
const ENV_FREE_SHIPPING_THRESHOLD: &str = "KARIGAR_FREE_SHIPPING_THRESHOLD_PAISE";
const ENV_SHIPPING_FEE: &str = "KARIGAR_SHIPPING_FEE_PAISE";

// =============================================================================
// Pricing Settings
// =============================================================================

/// `[pricing]` section, in file units (basis points and paise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold_paise: i64,

    #[serde(default = "default_shipping_fee")]
    pub shipping_fee_paise: i64,
}

fn default_tax_rate_bps() -> u32 {
    PricingConfig::default().tax_rate.bps()
}

fn default_free_shipping_threshold() -> i64 {
    PricingConfig::default().free_shipping_threshold.paise()
}

fn default_shipping_fee() -> i64 {
    PricingConfig::default().shipping_fee.paise()
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate_bps: default_tax_rate_bps(),
            free_shipping_threshold_paise: default_free_shipping_threshold(),
            shipping_fee_paise: default_shipping_fee(),
        }
    }
}

impl From<PricingSettings> for PricingConfig {
    fn from(settings: PricingSettings) -> Self {
        PricingConfig {
            tax_rate: Rate::from_bps(settings.tax_rate_bps),
            free_shipping_threshold: Money::from_paise(settings.free_shipping_threshold_paise),
            shipping_fee: Money::from_paise(settings.shipping_fee_paise),
        }
    }
}

// =============================================================================
// Coupon Settings
// =============================================================================

/// One `[[coupons]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponSettings {
    pub code: String,
    pub rate_bps: u32,
    #[serde(default)]
    pub min_purchase_paise: i64,
    pub max_discount_paise: i64,
}

impl From<&CouponRule> for CouponSettings {
    fn from(rule: &CouponRule) -> Self {
        CouponSettings {
            code: rule.code.clone(),
            rate_bps: rule.rate.bps(),
            min_purchase_paise: rule.min_purchase.paise(),
            max_discount_paise: rule.max_discount.paise(),
        }
    }
}

impl From<&CouponSettings> for CouponRule {
    fn from(settings: &CouponSettings) -> Self {
        CouponRule::new(
            &settings.code,
            Rate::from_bps(settings.rate_bps),
            Money::from_paise(settings.min_purchase_paise),
            Money::from_paise(settings.max_discount_paise),
        )
    }
}

fn default_coupons() -> Vec<CouponSettings> {
    CouponBook::default().rules().map(CouponSettings::from).collect()
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default = "default_coupons")]
    pub coupons: Vec<CouponSettings>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            pricing: PricingSettings::default(),
            coupons: default_coupons(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`karigar.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_rate_bps("tax_rate_bps", self.pricing.tax_rate_bps)?;
        validate_price(
            "free_shipping_threshold_paise",
            Money::from_paise(self.pricing.free_shipping_threshold_paise),
        )?;
        validate_price(
            "shipping_fee_paise",
            Money::from_paise(self.pricing.shipping_fee_paise),
        )?;

        let mut seen = BTreeSet::new();
        for coupon in &self.coupons {
            let code = normalize_coupon_code(&coupon.code)?;
            validate_rate_bps("rate_bps", coupon.rate_bps)?;
            validate_price("min_purchase_paise", Money::from_paise(coupon.min_purchase_paise))?;
            validate_price("max_discount_paise", Money::from_paise(coupon.max_discount_paise))?;

            if !seen.insert(code.clone()) {
                return Err(ConfigError::DuplicateCoupon(code));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`; unparsable values are logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(ENV_TAX_RATE_BPS) {
            match raw.trim().parse::<u32>() {
                Ok(bps) => {
                    debug!(bps, "Overriding tax rate from environment");
                    self.pricing.tax_rate_bps = bps;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_TAX_RATE_BPS),
            }
        }

        if let Some(raw) = lookup(ENV_FREE_SHIPPING_THRESHOLD) {
            match raw.trim().parse::<i64>() {
                Ok(paise) => {
                    debug!(paise, "Overriding free shipping threshold from environment");
                    self.pricing.free_shipping_threshold_paise = paise;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_FREE_SHIPPING_THRESHOLD),
            }
        }

        if let Some(raw) = lookup(ENV_SHIPPING_FEE) {
            match raw.trim().parse::<i64>() {
                Ok(paise) => {
                    debug!(paise, "Overriding shipping fee from environment");
                    self.pricing.shipping_fee_paise = paise;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_SHIPPING_FEE),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("in", "karigar", "cart")
            .map(|dirs| dirs.config_dir().join("karigar.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Pricing constants in domain units.
    pub fn pricing_config(&self) -> PricingConfig {
        self.pricing.into()
    }

    /// The coupon table.
    pub fn coupon_book(&self) -> CouponBook {
        CouponBook::from_rules(self.coupons.iter().map(CouponRule::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_storefront() {
        let config = StoreConfig::default();
        assert_eq!(config.pricing_config(), PricingConfig::default());
        assert_eq!(config.coupon_book(), CouponBook::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = StoreConfig::from_toml("[pricing]\nshipping_fee_paise = 15000\n").unwrap();
        assert_eq!(config.pricing.shipping_fee_paise, 15_000);
        assert_eq!(config.pricing.tax_rate_bps, 1800);
        assert_eq!(config.coupons.len(), 4);
    }

    #[test]
    fn test_custom_coupon_table() {
        let config = StoreConfig::from_toml(
            r#"
            [[coupons]]
            code = "diwali15"
            rate_bps = 1500
            max_discount_paise = 300000
            "#,
        )
        .unwrap();

        let book = config.coupon_book();
        assert_eq!(book.len(), 1);
        let rule = book.get("DIWALI15").unwrap();
        assert_eq!(rule.min_purchase, Money::zero());
        assert_eq!(rule.max_discount, Money::from_rupees(3_000));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = StoreConfig::default();
        config.pricing.tax_rate_bps = 10_001;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = StoreConfig::default();
        config.pricing.shipping_fee_paise = -1;
        assert!(config.validate().is_err());

        let mut config = StoreConfig::default();
        config.coupons.push(CouponSettings {
            code: "welcome10".to_string(),
            rate_bps: 500,
            min_purchase_paise: 0,
            max_discount_paise: 100,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateCoupon(code)) if code == "WELCOME10"
        ));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_TAX_RATE_BPS, "1200"),
            (ENV_SHIPPING_FEE, "not-a-number"),
        ]);

        let mut config = StoreConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.pricing.tax_rate_bps, 1200);
        assert_eq!(config.pricing.shipping_fee_paise, 20_000);
    }

    #[test]
    fn test_save_and_load_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("karigar.toml");

        let mut config = StoreConfig::default();
        config.pricing.free_shipping_threshold_paise = 500_000;
        config.save(Some(path.clone())).unwrap();

        let loaded = StoreConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.pricing.free_shipping_threshold_paise, 500_000);
        assert_eq!(loaded.coupon_book(), config.coupon_book());
    }

    #[test]
    fn test_load_or_default_falls_back_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("karigar.toml");
        std::fs::write(&path, "pricing = [").unwrap();

        assert!(StoreConfig::load(Some(path.clone())).is_err());
        assert_eq!(
            StoreConfig::load_or_default(Some(path)).pricing,
            PricingSettings::default()
        );
    }
}
