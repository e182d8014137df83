//! Priority-claim determination for distressed-loan collateral.
//!
//! The engine decides, per collateral item, how much of each senior claim is
//! deducted from recoverable value and records the decision path as a case
//! code with a fixed justification.

pub mod category;
pub mod context;
pub mod distribution;
pub mod domain;
pub mod estimates;
pub mod outcome;
pub mod router;
mod rules;

pub use category::PropertyCategory;
pub use context::{AuctionStage, RuleContext};
pub use distribution::{
    simulate, DistributionInputs, DistributionSummary, RiskAssessment, RiskLevel,
};
pub use domain::{
    AuctionContext, AuctionStatus, ClaimEvidenceRecord, DebtorType, DepositEvidence, DepositFacts,
    DueDiligenceAmounts, EvidenceError, PropertyDescriptor, RecordId, RightsAnalysis, TaxEvidence,
    Valuation, WageEvidence,
};
pub use estimates::{
    estimate_current_tax, estimate_small_deposit, EstimationPolicy, SmallDepositTier,
};
pub use outcome::{
    ClaimLine, CurrentTaxSource, DepositCase, DepositDisposition, RightsAssessment, TaxCase,
    WageCase,
};
pub use router::{rights_router, EvaluationView};

/// Stateless engine that applies the claim rules under one estimation policy.
#[derive(Debug, Clone, Default)]
pub struct RightsAnalysisEngine {
    policy: EstimationPolicy,
}

impl RightsAnalysisEngine {
    pub fn new(policy: EstimationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EstimationPolicy {
        &self.policy
    }

    pub fn evaluate(
        &self,
        record: &ClaimEvidenceRecord,
        property: Option<&PropertyDescriptor>,
    ) -> RightsAssessment {
        let context = RuleContext::derive(record, property);
        let assessment = rules::assess(context, record, &self.policy);

        tracing::debug!(
            record_id = %record.record_id,
            category = assessment.category.label(),
            stage = ?assessment.stage,
            deposit_case = %assessment.deposit_case,
            wage_case = %assessment.wage_case,
            tax_case = %assessment.tax_case,
            "rights analysis evaluated"
        );

        assessment
    }

    /// Replace the record's assessment with a fresh evaluation.
    pub fn apply_rules(&self, analysis: &mut RightsAnalysis, property: Option<&PropertyDescriptor>) {
        analysis.assessment = Some(self.evaluate(&analysis.evidence, property));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn opened_residential() -> ClaimEvidenceRecord {
        let mut record = ClaimEvidenceRecord::default();
        record.record_id = RecordId("P-001".to_string());
        record.auction = AuctionContext {
            status: AuctionStatus::Opened,
            claim_deadline_passed: true,
        };
        record.deposit = DepositEvidence {
            survey_report_submitted: Some(true),
            has_tenant: Some(true),
            tenant_claim_submitted: Some(true),
            ..DepositEvidence::default()
        };
        record.amounts.small_deposit = Decimal::from(42_000_000);
        record.amounts.senior_mortgage = Decimal::from(120_000_000);
        record
    }

    #[test]
    fn evaluate_reflects_a_claimed_small_deposit() {
        let engine = RightsAnalysisEngine::default();
        let assessment = engine.evaluate(&opened_residential(), Some(&PropertyDescriptor::new("아파트")));

        assert_eq!(assessment.category, PropertyCategory::Residential);
        assert_eq!(assessment.stage, AuctionStage::ClaimsClosed);
        assert_eq!(assessment.deposit_case, DepositCase::R1);
        assert_eq!(assessment.small_deposit.reflected, Decimal::from(42_000_000));
        assert_eq!(assessment.lease_deposit.reflected, Decimal::ZERO);
        assert_eq!(assessment.senior_mortgage.reflected, Decimal::from(120_000_000));
    }

    #[test]
    fn apply_rules_overwrites_a_previous_assessment() {
        let engine = RightsAnalysisEngine::default();
        let mut analysis = RightsAnalysis::new(opened_residential());

        engine.apply_rules(&mut analysis, None);
        let first = analysis.assessment.clone().expect("assessment attached");

        analysis.evidence.deposit.tenant_claim_submitted = Some(false);
        analysis.evidence.deposit.tenant_date_before_mortgage = Some(true);
        engine.apply_rules(&mut analysis, None);
        let second = analysis.assessment.expect("assessment attached");

        assert_eq!(first.deposit_case, DepositCase::R1);
        assert_eq!(second.deposit_case, DepositCase::R3);
        assert_eq!(second.small_deposit.reflected, Decimal::ZERO);
    }

    #[test]
    fn missing_property_descriptor_is_residential() {
        let engine = RightsAnalysisEngine::default();
        let assessment = engine.evaluate(&ClaimEvidenceRecord::default(), None);

        assert_eq!(assessment.category, PropertyCategory::Residential);
        assert_eq!(assessment.stage, AuctionStage::NotOpened);
        assert_eq!(assessment.deposit_case, DepositCase::R17);
        assert_eq!(assessment.small_deposit.reflected, Decimal::from(55_000_000));
    }

    #[test]
    fn custom_policy_drives_the_tax_estimate() {
        let policy = EstimationPolicy {
            current_tax_default: Decimal::from(750_000),
            ..EstimationPolicy::default()
        };
        let engine = RightsAnalysisEngine::new(policy);
        let assessment = engine.evaluate(&ClaimEvidenceRecord::default(), None);

        assert_eq!(assessment.tax_case, TaxCase::T9);
        assert_eq!(assessment.current_tax.reflected, Decimal::from(750_000));
    }
}
