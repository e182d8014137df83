use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::outcome::RightsAssessment;

/// Identifier wrapper for a collateral item under analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only description of the collateral; only the type label is consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    #[serde(default)]
    pub property_type: Option<String>,
}

impl PropertyDescriptor {
    pub fn new(property_type: impl Into<String>) -> Self {
        Self {
            property_type: Some(property_type.into()),
        }
    }
}

/// Evidence gathered for one collateral item before the rule engine runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimEvidenceRecord {
    pub record_id: RecordId,
    pub amounts: DueDiligenceAmounts,
    pub auction: AuctionContext,
    pub deposit: DepositEvidence,
    pub wage: WageEvidence,
    pub tax: TaxEvidence,
    pub valuation: Valuation,
}

/// Claim amounts confirmed through manual document review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DueDiligenceAmounts {
    pub senior_mortgage: Decimal,
    pub lien: Decimal,
    pub small_deposit: Decimal,
    pub lease_deposit: Decimal,
    pub wage_claim: Decimal,
    pub current_tax: Decimal,
    pub senior_tax: Decimal,
}

impl DueDiligenceAmounts {
    /// Reject negative amounts before they reach the rule engine.
    pub fn validate(&self) -> Result<(), EvidenceError> {
        let fields = [
            ("senior_mortgage", self.senior_mortgage),
            ("lien", self.lien),
            ("small_deposit", self.small_deposit),
            ("lease_deposit", self.lease_deposit),
            ("wage_claim", self.wage_claim),
            ("current_tax", self.current_tax),
            ("senior_tax", self.senior_tax),
        ];

        match fields.iter().find(|(_, amount)| *amount < Decimal::ZERO) {
            Some((field, amount)) => Err(EvidenceError::NegativeAmount {
                field: *field,
                amount: *amount,
            }),
            None => Ok(()),
        }
    }
}

/// Auction lifecycle fields as recorded by the loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuctionContext {
    pub status: AuctionStatus,
    pub claim_deadline_passed: bool,
}

/// Two-valued auction lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    #[default]
    NotOpened,
    Opened,
}

impl AuctionStatus {
    /// Parse a stored status label; anything unrecognized is treated as not opened.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "opened" | "open" | "개시" | "경매개시" => Self::Opened,
            _ => Self::NotOpened,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AuctionStatus::NotOpened => "not_opened",
            AuctionStatus::Opened => "opened",
        }
    }
}

/// Tenancy evidence used by the deposit/lease rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepositEvidence {
    pub survey_report_submitted: Option<bool>,
    pub has_tenant: Option<bool>,
    pub tenant_claim_submitted: Option<bool>,
    pub tenant_date_before_mortgage: Option<bool>,
    pub tenant_registry_available: bool,
    pub commercial_lease_registry_available: bool,
    pub address_match: Option<bool>,
}

impl DepositEvidence {
    /// Collapse the tri-state flags into plain booleans, absent meaning `false`.
    pub fn facts(&self) -> DepositFacts {
        DepositFacts {
            survey: self.survey_report_submitted.unwrap_or(false),
            tenant: self.has_tenant.unwrap_or(false),
            tenant_claimed: self.tenant_claim_submitted.unwrap_or(false),
            before_mortgage: self.tenant_date_before_mortgage.unwrap_or(false),
            tenant_registry: self.tenant_registry_available,
            commercial_lease_registry: self.commercial_lease_registry_available,
            address_match: self.address_match.unwrap_or(false),
        }
    }
}

/// Resolved deposit evidence with every flag defaulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepositFacts {
    pub survey: bool,
    pub tenant: bool,
    pub tenant_claimed: bool,
    pub before_mortgage: bool,
    pub tenant_registry: bool,
    pub commercial_lease_registry: bool,
    pub address_match: bool,
}

/// Wage-claim evidence and the debtor classification it depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WageEvidence {
    pub debtor_type: DebtorType,
    pub has_wage_claim: bool,
    pub wage_claim_submitted: bool,
    pub provisional_seizure_estimated: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtorType {
    Individual,
    #[default]
    BusinessOrCorporate,
}

impl DebtorType {
    /// Parse a stored debtor label; sole proprietors and corporations share a branch.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "individual" | "개인" => Self::Individual,
            _ => Self::BusinessOrCorporate,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DebtorType::Individual => "individual",
            DebtorType::BusinessOrCorporate => "business_or_corporate",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxEvidence {
    pub current_tax_claim: bool,
    pub senior_tax_claim: bool,
}

/// Valuation figures feeding the estimators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Valuation {
    pub housing_official_price: Option<Decimal>,
    pub initial_appraisal_value: Option<Decimal>,
}

/// Record handed to the engine and handed back with its assessment attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RightsAnalysis {
    pub evidence: ClaimEvidenceRecord,
    pub assessment: Option<RightsAssessment>,
}

impl RightsAnalysis {
    pub fn new(evidence: ClaimEvidenceRecord) -> Self {
        Self {
            evidence,
            assessment: None,
        }
    }
}

/// Validation failures raised at the evidence boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvidenceError {
    #[error("due-diligence amount `{field}` must not be negative (found {amount})")]
    NegativeAmount { field: &'static str, amount: Decimal },
}
