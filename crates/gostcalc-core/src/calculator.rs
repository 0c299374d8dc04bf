//! Daily and monthly cost calculators.
//!
//! Every resource is priced in two stages. The daily stage turns a request
//! count into a quantity (operations or bytes); the monthly stage projects it
//! over [`PricingConfig::days_in_month`]. Where the free allowance is applied
//! depends on the resource's [`FreeTierPeriod`]:
//!
//! - **Daily** (writes, reads, deletes): the daily stage subtracts the free
//!   allowance and returns money; the monthly stage multiplies it out.
//! - **Monthly** (storage, network): the daily stage returns bytes; the
//!   monthly stage multiplies them out, then subtracts the free allowance and
//!   prices per GB.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::document::Document;
use crate::error::{CalculationError, Result};
use crate::pricing::{FreeTierPeriod, PricingConfig, Resource, ResourcePricing};
use crate::size::DocumentSizeEstimator;

/// Something billed per request, sized in the resource's native quantity.
pub trait UsageSource {
    /// Quantity a single request consumes (one operation, or a byte size).
    fn request_size(&self, estimator: &DocumentSizeEstimator) -> u64;
}

/// Plain operations, each counting as one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Operations;

impl UsageSource for Operations {
    fn request_size(&self, _: &DocumentSizeEstimator) -> u64 {
        1
    }
}

impl UsageSource for Document {
    fn request_size(&self, estimator: &DocumentSizeEstimator) -> u64 {
        estimator.document_size(self)
    }
}

/// Bytes sent over the network per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(Vec<u8>);

impl Payload {
    /// Wrap raw payload bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Serialize `value` as JSON and use the encoded bytes as payload.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::Serialization`] if `value` cannot be
    /// encoded.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self(serde_json::to_vec(value)?))
    }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl UsageSource for Payload {
    fn request_size(&self, _: &DocumentSizeEstimator) -> u64 {
        u64::try_from(self.0.len()).unwrap_or(u64::MAX)
    }
}

/// A calculator that maps a daily request count to an amount.
pub trait CostCalculator {
    /// The resource being priced.
    fn resource(&self) -> Resource;

    /// Calculate the amount for `count` requests per day.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::Overflow`] if the decimal pipeline overflows.
    fn calculate(&self, count: u64) -> Result<Decimal>;
}

/// Daily stage for one resource.
#[derive(Debug, Clone)]
pub struct DailyCostCalculator<S> {
    resource: Resource,
    pricing: ResourcePricing,
    estimator: DocumentSizeEstimator,
    currency_scale: u32,
    days_in_month: u32,
    source: S,
}

impl<S: UsageSource> DailyCostCalculator<S> {
    /// Create a daily calculator for `resource` priced by `config`.
    #[must_use]
    pub fn new(resource: Resource, config: &PricingConfig, source: S) -> Self {
        Self {
            resource,
            pricing: config.resource(resource).clone(),
            estimator: DocumentSizeEstimator::new(config.document_padding),
            currency_scale: config.currency_scale,
            days_in_month: config.days_in_month,
            source,
        }
    }

    /// Pricing applied by this calculator.
    #[must_use]
    pub const fn pricing(&self) -> &ResourcePricing {
        &self.pricing
    }

    /// The per-request source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Quantity consumed per day: request size times `count`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::Overflow`] if the product does not fit.
    pub fn quantity(&self, count: u64) -> Result<Decimal> {
        let size = self.source.request_size(&self.estimator);
        Decimal::from(size)
            .checked_mul(Decimal::from(count))
            .ok_or(CalculationError::overflow("daily quantity"))
    }

    /// Round to the currency scale, always keeping exactly that many places.
    fn round(&self, amount: Decimal) -> Decimal {
        let mut amount = amount
            .round_dp_with_strategy(self.currency_scale, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(self.currency_scale);
        amount
    }
}

impl DailyCostCalculator<Document> {
    /// Daily stored bytes for `document`.
    #[must_use]
    pub fn storage(config: &PricingConfig, document: Document) -> Self {
        Self::new(Resource::Storage, config, document)
    }
}

impl DailyCostCalculator<Payload> {
    /// Daily network bytes for `payload`.
    #[must_use]
    pub fn network(config: &PricingConfig, payload: Payload) -> Self {
        Self::new(Resource::Network, config, payload)
    }
}

impl DailyCostCalculator<Operations> {
    /// Daily write cost.
    #[must_use]
    pub fn write(config: &PricingConfig) -> Self {
        Self::new(Resource::Write, config, Operations)
    }

    /// Daily read cost.
    #[must_use]
    pub fn read(config: &PricingConfig) -> Self {
        Self::new(Resource::Read, config, Operations)
    }

    /// Daily delete cost.
    #[must_use]
    pub fn delete(config: &PricingConfig) -> Self {
        Self::new(Resource::Delete, config, Operations)
    }
}

impl<S: UsageSource> CostCalculator for DailyCostCalculator<S> {
    fn resource(&self) -> Resource {
        self.resource
    }

    /// Operations resources return the daily cost, rounded to the currency
    /// scale. Byte resources return the daily byte quantity, unpriced.
    fn calculate(&self, count: u64) -> Result<Decimal> {
        let quantity = self.quantity(count)?;

        let daily = match self.pricing.free_period {
            FreeTierPeriod::Monthly => quantity,
            FreeTierPeriod::Daily => self.round(self.pricing.price(quantity)?),
        };

        tracing::debug!(
            resource = %self.resource,
            count,
            %quantity,
            %daily,
            "Calculated daily amount"
        );

        Ok(daily)
    }
}

/// Monthly stage for one resource, wrapping its daily stage.
#[derive(Debug, Clone)]
pub struct MonthlyCostCalculator<S> {
    daily: DailyCostCalculator<S>,
}

impl<S: UsageSource> MonthlyCostCalculator<S> {
    /// Wrap a daily calculator, projecting over the month length of the
    /// configuration it was built from.
    #[must_use]
    pub const fn new(daily: DailyCostCalculator<S>) -> Self {
        Self { daily }
    }

    /// The wrapped daily stage.
    #[must_use]
    pub const fn daily(&self) -> &DailyCostCalculator<S> {
        &self.daily
    }
}

impl MonthlyCostCalculator<Document> {
    /// Monthly storage cost for `document`.
    #[must_use]
    pub fn storage(config: &PricingConfig, document: Document) -> Self {
        Self::new(DailyCostCalculator::storage(config, document))
    }
}

impl MonthlyCostCalculator<Payload> {
    /// Monthly network cost for `payload`.
    #[must_use]
    pub fn network(config: &PricingConfig, payload: Payload) -> Self {
        Self::new(DailyCostCalculator::network(config, payload))
    }
}

impl MonthlyCostCalculator<Operations> {
    /// Monthly write cost.
    #[must_use]
    pub fn write(config: &PricingConfig) -> Self {
        Self::new(DailyCostCalculator::write(config))
    }

    /// Monthly read cost.
    #[must_use]
    pub fn read(config: &PricingConfig) -> Self {
        Self::new(DailyCostCalculator::read(config))
    }

    /// Monthly delete cost.
    #[must_use]
    pub fn delete(config: &PricingConfig) -> Self {
        Self::new(DailyCostCalculator::delete(config))
    }
}

impl<S: UsageSource> CostCalculator for MonthlyCostCalculator<S> {
    fn resource(&self) -> Resource {
        self.daily.resource
    }

    fn calculate(&self, count: u64) -> Result<Decimal> {
        let daily = self.daily.calculate(count)?;
        let monthly = daily
            .checked_mul(Decimal::from(self.daily.days_in_month))
            .ok_or(CalculationError::overflow("monthly projection"))?;

        let cost = match self.daily.pricing.free_period {
            FreeTierPeriod::Daily => monthly,
            FreeTierPeriod::Monthly => self.daily.round(self.daily.pricing.price(monthly)?),
        };

        tracing::debug!(
            resource = %self.daily.resource,
            count,
            days = self.daily.days_in_month,
            %cost,
            "Calculated monthly cost"
        );

        Ok(cost)
    }
}
