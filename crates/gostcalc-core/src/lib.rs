//! Core cost model for gostcalc.
//!
//! This crate estimates what a Cloud Firestore workload costs per month:
//!
//! - **Documents**: `Document`, `Value`, `Fields`
//! - **Sizing**: `DocumentSizeEstimator`, `DocumentPadding`
//! - **Pricing**: `PricingConfig`, `ResourcePricing`, `Resource`
//! - **Calculators**: `DailyCostCalculator`, `MonthlyCostCalculator`
//!
//! # Example
//!
//! ```
//! use gostcalc_core::{CostCalculator, MonthlyCostCalculator, PricingConfig};
//! use rust_decimal::Decimal;
//!
//! let config = PricingConfig::default();
//! let writes = MonthlyCostCalculator::write(&config);
//!
//! // 100,000 writes a day: $0.14 daily, $4.20 a month
//! assert_eq!(writes.calculate(100_000)?, Decimal::new(420, 2));
//! # Ok::<(), gostcalc_core::CalculationError>(())
//! ```
//!
//! # Amounts
//!
//! All amounts are `rust_decimal::Decimal` in USD, rounded to
//! `PricingConfig::currency_scale` places. Usage below a free allowance
//! costs zero, never a negative amount.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod calculator;
pub mod document;
pub mod error;
pub mod pricing;
pub mod size;

pub use calculator::{
    CostCalculator, DailyCostCalculator, MonthlyCostCalculator, Operations, Payload, UsageSource,
};
pub use document::{fields, Document, DocumentSpec, Fields, Value};
pub use error::{CalculationError, Result};
pub use pricing::{
    FreeTierPeriod, PricingConfig, Resource, ResourcePricing, CURRENCY_SCALE,
    FREE_DELETES_DAILY, FREE_READS_DAILY, FREE_WRITES_DAILY, MONTHLY_FREE_NETWORK,
    MONTHLY_FREE_STORAGE, MONTH_NUM_OF_DAYS, ONE_GB, OPERATION_UNIT,
};
pub use size::{DocumentPadding, DocumentSizeEstimator};
