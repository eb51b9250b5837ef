//! Data models for extracted lease terms

use super::parser::{is_mentioned, parse_amount};
use serde::{Deserialize, Deserializer, Serialize};

/// Extracted contract text as handed over by the OCR collaborator.
/// `batch_id` ties log lines back to the upload; `text` is used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContract {
    pub batch_id: String,
    pub text: String,
}

/// The closed set of lease terms the extraction collaborator reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKey {
    MonthlyPayment,
    DownPayment,
    LeaseTermMonths,
    InterestRateApr,
    ResidualValue,
    MileageAllowancePerYear,
    ExcessMileageFee,
    EarlyTerminationFee,
    BuyoutPrice,
    MaintenanceResponsibilities,
    WarrantyCoverage,
    PenaltiesLateFees,
}

impl TermKey {
    pub const ALL: [TermKey; 12] = [
        Self::MonthlyPayment,
        Self::DownPayment,
        Self::LeaseTermMonths,
        Self::InterestRateApr,
        Self::ResidualValue,
        Self::MileageAllowancePerYear,
        Self::ExcessMileageFee,
        Self::EarlyTerminationFee,
        Self::BuyoutPrice,
        Self::MaintenanceResponsibilities,
        Self::WarrantyCoverage,
        Self::PenaltiesLateFees,
    ];

    /// Wire name used by the extraction collaborator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MonthlyPayment => "monthly_payment",
            Self::DownPayment => "down_payment",
            Self::LeaseTermMonths => "lease_term_months",
            Self::InterestRateApr => "interest_rate_apr",
            Self::ResidualValue => "residual_value",
            Self::MileageAllowancePerYear => "mileage_allowance_per_year",
            Self::ExcessMileageFee => "excess_mileage_fee",
            Self::EarlyTerminationFee => "early_termination_fee",
            Self::BuyoutPrice => "buyout_price",
            Self::MaintenanceResponsibilities => "maintenance_responsibilities",
            Self::WarrantyCoverage => "warranty_coverage",
            Self::PenaltiesLateFees => "penalties_late_fees",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::MonthlyPayment => "Monthly Payment",
            Self::DownPayment => "Down Payment",
            Self::LeaseTermMonths => "Lease Term",
            Self::InterestRateApr => "Interest Rate / MF",
            Self::ResidualValue => "Residual Value",
            Self::MileageAllowancePerYear => "Annual Mileage",
            Self::ExcessMileageFee => "Excess Mileage Fee",
            Self::EarlyTerminationFee => "Termination Fee",
            Self::BuyoutPrice => "Buyout Option",
            Self::MaintenanceResponsibilities => "Maintenance",
            Self::WarrantyCoverage => "Warranty",
            Self::PenaltiesLateFees => "Late Fees",
        }
    }
}

/// Structured lease terms ("SLA") extracted from a contract.
///
/// Every value is the collaborator's display string. Non-string values on
/// the wire are treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlaTerms {
    #[serde(default, deserialize_with = "display_string")]
    pub monthly_payment: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub down_payment: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub lease_term_months: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub interest_rate_apr: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub residual_value: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub mileage_allowance_per_year: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub excess_mileage_fee: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub early_termination_fee: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub buyout_price: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub maintenance_responsibilities: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub warranty_coverage: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub penalties_late_fees: Option<String>,
}

fn display_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

impl SlaTerms {
    /// Raw value for a term, exactly as extracted
    pub fn get(&self, key: TermKey) -> Option<&str> {
        let value = match key {
            TermKey::MonthlyPayment => &self.monthly_payment,
            TermKey::DownPayment => &self.down_payment,
            TermKey::LeaseTermMonths => &self.lease_term_months,
            TermKey::InterestRateApr => &self.interest_rate_apr,
            TermKey::ResidualValue => &self.residual_value,
            TermKey::MileageAllowancePerYear => &self.mileage_allowance_per_year,
            TermKey::ExcessMileageFee => &self.excess_mileage_fee,
            TermKey::EarlyTerminationFee => &self.early_termination_fee,
            TermKey::BuyoutPrice => &self.buyout_price,
            TermKey::MaintenanceResponsibilities => &self.maintenance_responsibilities,
            TermKey::WarrantyCoverage => &self.warranty_coverage,
            TermKey::PenaltiesLateFees => &self.penalties_late_fees,
        };
        value.as_deref()
    }

    /// Set a term value, builder style
    pub fn with(mut self, key: TermKey, value: impl Into<String>) -> Self {
        let slot = match key {
            TermKey::MonthlyPayment => &mut self.monthly_payment,
            TermKey::DownPayment => &mut self.down_payment,
            TermKey::LeaseTermMonths => &mut self.lease_term_months,
            TermKey::InterestRateApr => &mut self.interest_rate_apr,
            TermKey::ResidualValue => &mut self.residual_value,
            TermKey::MileageAllowancePerYear => &mut self.mileage_allowance_per_year,
            TermKey::ExcessMileageFee => &mut self.excess_mileage_fee,
            TermKey::EarlyTerminationFee => &mut self.early_termination_fee,
            TermKey::BuyoutPrice => &mut self.buyout_price,
            TermKey::MaintenanceResponsibilities => &mut self.maintenance_responsibilities,
            TermKey::WarrantyCoverage => &mut self.warranty_coverage,
            TermKey::PenaltiesLateFees => &mut self.penalties_late_fees,
        };
        *slot = Some(value.into());
        self
    }

    /// Whether the contract states this term at all
    pub fn is_stated(&self, key: TermKey) -> bool {
        is_mentioned(self.get(key))
    }

    /// Parsed amount, `0.0` when absent or unparseable
    pub fn amount(&self, key: TermKey) -> f64 {
        parse_amount(self.get(key))
    }

    /// Parsed amount only when the term is stated with a positive value.
    /// A stated "$0" buyout is not a free car.
    pub fn stated_amount(&self, key: TermKey) -> Option<f64> {
        if !self.is_stated(key) {
            return None;
        }
        let value = self.amount(key);
        (value > 0.0).then_some(value)
    }

    /// Terms the contract leaves out
    pub fn missing_terms(&self) -> Vec<TermKey> {
        TermKey::ALL
            .into_iter()
            .filter(|key| !self.is_stated(*key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_extraction_result() {
        let json = r#"{
            "monthly_payment": "$450",
            "lease_term_months": "36 months",
            "residual_value": "$18,000",
            "buyout_price": "Not Mentioned",
            "warranty_coverage": 3,
            "unexpected_key": "ignored"
        }"#;

        let sla: SlaTerms = serde_json::from_str(json).unwrap();
        assert_eq!(sla.get(TermKey::MonthlyPayment), Some("$450"));
        assert_eq!(sla.get(TermKey::WarrantyCoverage), None);
        assert_eq!(sla.get(TermKey::DownPayment), None);
        assert!(!sla.is_stated(TermKey::BuyoutPrice));
        assert_eq!(sla.stated_amount(TermKey::ResidualValue), Some(18000.0));
    }

    #[test]
    fn test_null_values_are_missing() {
        let sla: SlaTerms = serde_json::from_str(r#"{"buyout_price": null}"#).unwrap();
        assert_eq!(sla.get(TermKey::BuyoutPrice), None);
    }

    #[test]
    fn test_stated_zero_is_not_an_amount() {
        let sla = SlaTerms::default().with(TermKey::BuyoutPrice, "$0");
        assert!(sla.is_stated(TermKey::BuyoutPrice));
        assert_eq!(sla.amount(TermKey::BuyoutPrice), 0.0);
        assert_eq!(sla.stated_amount(TermKey::BuyoutPrice), None);
    }

    #[test]
    fn test_missing_terms() {
        let sla = SlaTerms::default()
            .with(TermKey::MonthlyPayment, "$399")
            .with(TermKey::WarrantyCoverage, "Not Mentioned");
        let missing = sla.missing_terms();
        assert_eq!(missing.len(), 11);
        assert!(!missing.contains(&TermKey::MonthlyPayment));
        assert!(missing.contains(&TermKey::WarrantyCoverage));
    }

    #[test]
    fn test_key_names_match_wire_format() {
        for key in TermKey::ALL {
            let wire = serde_json::to_value(key).unwrap();
            assert_eq!(wire.as_str(), Some(key.as_str()));
        }
    }
}
