//! Pricing configuration for gostcalc.
//!
//! This module defines free-tier allowances and unit prices for each billable
//! Cloud Firestore resource.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CalculationError, Result};
use crate::size::DocumentPadding;

// ============================================================================
// Constants
// ============================================================================

/// Fixed number of days in a billing month.
pub const MONTH_NUM_OF_DAYS: u32 = 30;

/// 1 GB in bytes, the pricing unit for storage and network.
pub const ONE_GB: u64 = 1_000_000_000;

/// Operations per pricing unit for writes, reads and deletes.
pub const OPERATION_UNIT: u64 = 100_000;

/// Free stored bytes per month (1 GiB).
pub const MONTHLY_FREE_STORAGE: u64 = 1_073_741_824;

/// Free network bytes per month (10 GiB).
pub const MONTHLY_FREE_NETWORK: u64 = 10_737_418_240;

/// Free writes per day.
pub const FREE_WRITES_DAILY: u64 = 20_000;

/// Free reads per day.
pub const FREE_READS_DAILY: u64 = 50_000;

/// Free deletes per day.
pub const FREE_DELETES_DAILY: u64 = 20_000;

/// Decimal places amounts are rounded to (cents).
pub const CURRENCY_SCALE: u32 = 2;

/// A billable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Stored documents and their index entries.
    Storage,
    /// Network traffic.
    Network,
    /// Document writes.
    Write,
    /// Document reads.
    Read,
    /// Document deletes.
    Delete,
}

impl Resource {
    /// All resources in display order.
    pub const ALL: [Self; 5] = [
        Self::Network,
        Self::Storage,
        Self::Write,
        Self::Read,
        Self::Delete,
    ];

    /// Get the resource name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Network => "network",
            Self::Write => "write",
            Self::Read => "read",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| CalculationError::InvalidPricing(format!("unknown resource: {s}")))
    }
}

/// The period a free-tier allowance covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeTierPeriod {
    /// Allowance resets every day; priced daily.
    Daily,
    /// Allowance covers the whole month; priced monthly.
    Monthly,
}

/// Pricing for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePricing {
    /// Free quantity (operations or bytes) per period.
    pub free_allowance: u64,
    /// Period the free allowance applies to.
    pub free_period: FreeTierPeriod,
    /// Quantity covered by one unit price.
    pub unit_size: u64,
    /// Price in USD per unit.
    pub unit_price: Decimal,
}

impl ResourcePricing {
    /// Pricing with a daily operation allowance.
    #[must_use]
    pub fn daily(free_allowance: u64, unit_size: u64, unit_price: Decimal) -> Self {
        Self {
            free_allowance,
            free_period: FreeTierPeriod::Daily,
            unit_size,
            unit_price,
        }
    }

    /// Pricing with a monthly byte allowance.
    #[must_use]
    pub fn monthly(free_allowance: u64, unit_size: u64, unit_price: Decimal) -> Self {
        Self {
            free_allowance,
            free_period: FreeTierPeriod::Monthly,
            unit_size,
            unit_price,
        }
    }

    /// Price a quantity: subtract the free allowance, clamp at zero, convert
    /// to units and multiply by the unit price.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::Overflow`] if the decimal pipeline overflows.
    pub fn price(&self, quantity: Decimal) -> Result<Decimal> {
        let free = Decimal::from(self.free_allowance);
        let billable = quantity
            .checked_sub(free)
            .ok_or(CalculationError::overflow("billable quantity"))?
            .max(Decimal::ZERO);

        billable
            .checked_div(Decimal::from(self.unit_size))
            .and_then(|units| units.checked_mul(self.unit_price))
            .ok_or(CalculationError::overflow("unit pricing"))
    }

    fn validate(&self, resource: Resource) -> Result<()> {
        if self.unit_size == 0 {
            return Err(CalculationError::InvalidPricing(format!(
                "{resource} unit size must be positive"
            )));
        }
        if self.unit_price.is_sign_negative() {
            return Err(CalculationError::InvalidPricing(format!(
                "{resource} unit price must not be negative"
            )));
        }
        Ok(())
    }
}

/// Pricing configuration for all billable resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Stored bytes.
    pub storage: ResourcePricing,

    /// Network bytes.
    pub network: ResourcePricing,

    /// Document writes.
    pub write: ResourcePricing,

    /// Document reads.
    pub read: ResourcePricing,

    /// Document deletes.
    pub delete: ResourcePricing,

    /// Padding used for document size estimation.
    pub document_padding: DocumentPadding,

    /// Days in a billing month.
    pub days_in_month: u32,

    /// Decimal places amounts are rounded to.
    pub currency_scale: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            storage: ResourcePricing::monthly(MONTHLY_FREE_STORAGE, ONE_GB, Decimal::new(18, 2)), // $0.18 per GB
            network: ResourcePricing::monthly(MONTHLY_FREE_NETWORK, ONE_GB, Decimal::new(12, 2)), // $0.12 per GB
            write: ResourcePricing::daily(FREE_WRITES_DAILY, OPERATION_UNIT, Decimal::new(18, 2)), // $0.18 per 100K
            read: ResourcePricing::daily(FREE_READS_DAILY, OPERATION_UNIT, Decimal::new(6, 2)), // $0.06 per 100K
            delete: ResourcePricing::daily(FREE_DELETES_DAILY, OPERATION_UNIT, Decimal::new(2, 2)), // $0.02 per 100K
            document_padding: DocumentPadding::default(),
            days_in_month: MONTH_NUM_OF_DAYS,
            currency_scale: CURRENCY_SCALE,
        }
    }
}

impl PricingConfig {
    /// Pricing for a single resource.
    #[must_use]
    pub const fn resource(&self, resource: Resource) -> &ResourcePricing {
        match resource {
            Resource::Storage => &self.storage,
            Resource::Network => &self.network,
            Resource::Write => &self.write,
            Resource::Read => &self.read,
            Resource::Delete => &self.delete,
        }
    }

    /// Check the configuration can be used for pricing.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidPricing`] for a zero unit size, a
    /// negative unit price or a zero-day month.
    pub fn validate(&self) -> Result<()> {
        for resource in Resource::ALL {
            self.resource(resource).validate(resource)?;
        }
        if self.days_in_month == 0 {
            return Err(CalculationError::InvalidPricing(
                "days in month must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pricing_config() {
        let config = PricingConfig::default();
        assert_eq!(config.days_in_month, 30);
        assert_eq!(config.write.unit_price, Decimal::new(18, 2));
        assert_eq!(config.read.free_allowance, 50_000);
        assert_eq!(config.storage.free_period, FreeTierPeriod::Monthly);
        assert_eq!(config.delete.free_period, FreeTierPeriod::Daily);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn resource_lookup() {
        let config = PricingConfig::default();
        assert_eq!(config.resource(Resource::Network).free_allowance, MONTHLY_FREE_NETWORK);
        assert_eq!(config.resource(Resource::Storage).unit_size, ONE_GB);
    }

    #[test]
    fn resource_names_round_trip() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>().unwrap(), resource);
        }
        assert!("egress".parse::<Resource>().is_err());
    }

    #[test]
    fn price_subtracts_free_allowance() {
        let pricing = ResourcePricing::daily(20_000, 100_000, Decimal::new(18, 2));
        // (100000 - 20000) / 100000 * 0.18
        assert_eq!(pricing.price(Decimal::from(100_000)).unwrap(), Decimal::new(144, 3));
    }

    #[test]
    fn price_clamps_below_free_allowance() {
        let pricing = ResourcePricing::daily(20_000, 100_000, Decimal::new(18, 2));
        assert_eq!(pricing.price(Decimal::from(5_000)).unwrap(), Decimal::ZERO);
        assert_eq!(pricing.price(Decimal::from(20_000)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn validate_rejects_zero_unit() {
        let mut config = PricingConfig::default();
        config.read.unit_size = 0;
        assert!(matches!(
            config.validate(),
            Err(CalculationError::InvalidPricing(_))
        ));
    }

    #[test]
    fn validate_rejects_negative_price() {
        let mut config = PricingConfig::default();
        config.network.unit_price = Decimal::new(-1, 2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_month() {
        let config = PricingConfig {
            days_in_month: 0,
            ..PricingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PricingConfig =
            serde_json::from_str(r#"{ "days_in_month": 31, "currency_scale": 4 }"#).unwrap();
        assert_eq!(config.days_in_month, 31);
        assert_eq!(config.currency_scale, 4);
        assert_eq!(config.write, PricingConfig::default().write);
    }
}
