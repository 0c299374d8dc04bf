//! Runs calculators for a command and formats the results.

use std::fmt;
use std::path::Path;

use gostcalc_core::{
    CostCalculator, Document, DocumentSpec, FreeTierPeriod, MonthlyCostCalculator, Payload,
    PricingConfig, Resource, UsageSource,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cli::{Command, UsageArgs};
use crate::config::{load_json_file, read_file};
use crate::error::ConfigError;
use crate::samples;

/// Cost estimate for one resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    /// The priced resource.
    pub resource: Resource,
    /// Requests per day.
    pub daily_count: u64,
    /// Daily cost, for resources priced per day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_cost: Option<Decimal>,
    /// Daily bytes, for resources priced per month.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_bytes: Option<Decimal>,
    /// Monthly cost in USD.
    pub monthly_cost: Decimal,
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = title(self.resource);
        if let Some(daily) = self.daily_cost {
            writeln!(f, "Estimated Daily {title} Cost: ${daily}")?;
        }
        if let Some(bytes) = self.daily_bytes {
            writeln!(f, "Estimated Daily {title}: {bytes} bytes")?;
        }
        write!(f, "Estimated {title} Cost: ${}", self.monthly_cost)
    }
}

/// Estimates produced by one command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Per-resource estimates.
    pub estimates: Vec<Estimate>,
    /// Sum of monthly costs, present when more than one resource was priced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
}

impl Report {
    /// Render as text, or as pretty JSON when `json` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding fails.
    pub fn render(&self, json: bool) -> Result<String, serde_json::Error> {
        if json {
            return serde_json::to_string_pretty(self);
        }

        let mut lines: Vec<String> = self.estimates.iter().map(ToString::to_string).collect();
        if let Some(total) = self.total {
            lines.push(format!("Estimated Total Cost: ${total}"));
        }
        Ok(lines.join("\n"))
    }
}

fn title(resource: Resource) -> &'static str {
    match resource {
        Resource::Network => "Networking",
        Resource::Storage => "Storage",
        Resource::Write => "Writes",
        Resource::Read => "Reads",
        Resource::Delete => "Deletes",
    }
}

/// Run `command` against `config`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if inputs cannot be loaded or a calculation fails.
pub fn run(command: &Command, config: &PricingConfig) -> Result<Report, ConfigError> {
    let usage = command.usage();

    let estimates = match command {
        Command::Network { payload, .. } => {
            let payload = load_payload(payload.as_deref())?;
            vec![estimate(&MonthlyCostCalculator::network(config, payload), usage)?]
        }
        Command::Storage { document, .. } => {
            let document = load_document(document.as_deref())?;
            vec![estimate(&MonthlyCostCalculator::storage(config, document), usage)?]
        }
        Command::Write { .. } => vec![estimate(&MonthlyCostCalculator::write(config), usage)?],
        Command::Read { .. } => vec![estimate(&MonthlyCostCalculator::read(config), usage)?],
        Command::Delete { .. } => vec![estimate(&MonthlyCostCalculator::delete(config), usage)?],
        Command::All {
            document, payload, ..
        } => {
            let payload = load_payload(payload.as_deref())?;
            let document = load_document(document.as_deref())?;
            vec![
                estimate(&MonthlyCostCalculator::network(config, payload), usage)?,
                estimate(&MonthlyCostCalculator::storage(config, document), usage)?,
                estimate(&MonthlyCostCalculator::write(config), usage)?,
                estimate(&MonthlyCostCalculator::read(config), usage)?,
                estimate(&MonthlyCostCalculator::delete(config), usage)?,
            ]
        }
    };

    let total = (estimates.len() > 1).then(|| estimates.iter().map(|e| e.monthly_cost).sum());

    Ok(Report { estimates, total })
}

fn estimate<S: UsageSource>(
    calc: &MonthlyCostCalculator<S>,
    usage: &UsageArgs,
) -> Result<Estimate, ConfigError> {
    let daily_count = usage.daily_count()?;
    tracing::debug!(
        resource = %calc.resource(),
        count = usage.count,
        population = usage.population,
        daily_count,
        "Estimating monthly cost"
    );

    let monthly_cost = calc.calculate(daily_count)?;

    let (mut daily_cost, mut daily_bytes) = (None, None);
    if usage.daily {
        let daily = calc.daily().calculate(daily_count)?;
        match calc.daily().pricing().free_period {
            FreeTierPeriod::Daily => daily_cost = Some(daily),
            FreeTierPeriod::Monthly => daily_bytes = Some(daily),
        }
    }

    Ok(Estimate {
        resource: calc.resource(),
        daily_count,
        daily_cost,
        daily_bytes,
        monthly_cost,
    })
}

fn load_document(path: Option<&Path>) -> Result<Document, ConfigError> {
    match path {
        Some(path) => {
            let spec: DocumentSpec = load_json_file(path)?;
            Ok(Document::try_from(spec)?)
        }
        None => Ok(samples::qr_record()?),
    }
}

fn load_payload(path: Option<&Path>) -> Result<Payload, ConfigError> {
    match path {
        Some(path) => Ok(Payload::new(read_file(path)?)),
        None => Ok(samples::scan_payload()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(count: u64, population: u64, daily: bool) -> UsageArgs {
        UsageArgs {
            count,
            population,
            daily,
        }
    }

    #[test]
    fn write_report_text() {
        let command = Command::Write {
            usage: usage(1, 100_000, true),
        };
        let report = run(&command, &PricingConfig::default()).unwrap();

        assert_eq!(report.total, None);
        assert_eq!(
            report.render(false).unwrap(),
            "Estimated Daily Writes Cost: $0.14\nEstimated Writes Cost: $4.20"
        );
    }

    #[test]
    fn read_report_json() {
        let command = Command::Read {
            usage: usage(4, 100_000, false),
        };
        let report = run(&command, &PricingConfig::default()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&report.render(true).unwrap()).unwrap();

        assert_eq!(value["estimates"][0]["resource"], "read");
        assert_eq!(value["estimates"][0]["daily_count"], 400_000);
        assert_eq!(value["estimates"][0]["monthly_cost"], "6.30");
        assert!(value["estimates"][0].get("daily_cost").is_none());
        assert!(value.get("total").is_none());
    }

    #[test]
    fn storage_reports_daily_bytes() {
        let command = Command::Storage {
            usage: usage(1, 1, true),
            document: None,
        };
        let report = run(&command, &PricingConfig::default()).unwrap();
        let estimate = &report.estimates[0];

        assert_eq!(estimate.resource, Resource::Storage);
        assert!(estimate.daily_cost.is_none());
        let size = samples::qr_record().unwrap().size();
        assert_eq!(estimate.daily_bytes, Some(Decimal::from(size)));
        // One record a day stays inside the free tier.
        assert_eq!(estimate.monthly_cost, Decimal::ZERO);
    }

    #[test]
    fn all_sums_every_resource() {
        let command = Command::All {
            usage: usage(10, 1_000_000, false),
            document: None,
            payload: None,
        };
        let report = run(&command, &PricingConfig::default()).unwrap();

        assert_eq!(report.estimates.len(), 5);
        let sum: Decimal = report.estimates.iter().map(|e| e.monthly_cost).sum();
        assert_eq!(report.total, Some(sum));
        assert!(report
            .render(false)
            .unwrap()
            .ends_with(&format!("Estimated Total Cost: ${sum}")));
    }

    #[test]
    fn missing_document_file_fails() {
        let command = Command::Storage {
            usage: usage(1, 1, false),
            document: Some("/definitely/not/here.json".into()),
        };
        assert!(matches!(
            run(&command, &PricingConfig::default()),
            Err(ConfigError::Read { .. })
        ));
    }
}
