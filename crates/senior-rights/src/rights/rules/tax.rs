use super::super::context::{AuctionStage, RuleContext};
use super::super::domain::{ClaimEvidenceRecord, TaxEvidence};
use super::super::estimates::EstimationPolicy;
use super::super::outcome::{ClaimLine, CurrentTaxSource, TaxCase};

pub(crate) struct TaxOutcome {
    pub(crate) current_tax: ClaimLine,
    pub(crate) senior_tax: ClaimLine,
    pub(crate) case: TaxCase,
}

pub(crate) fn apply(
    context: RuleContext,
    record: &ClaimEvidenceRecord,
    policy: &EstimationPolicy,
) -> TaxOutcome {
    let case = resolve_case(context.stage, &record.tax);

    let current_tax = match case.current_tax_source() {
        CurrentTaxSource::Claimed => {
            ClaimLine::reflect(record.amounts.current_tax, case.current_tax_reason())
        }
        CurrentTaxSource::Estimated => ClaimLine::reflect(
            policy.current_tax(record.valuation.initial_appraisal_value),
            case.current_tax_reason(),
        ),
        CurrentTaxSource::Absent => ClaimLine::zero(case.current_tax_reason()),
    };

    let senior_tax = if case.reflects_senior_tax() {
        ClaimLine::reflect(record.amounts.senior_tax, case.senior_tax_reason())
    } else {
        ClaimLine::zero(case.senior_tax_reason())
    };

    TaxOutcome {
        current_tax,
        senior_tax,
        case,
    }
}

/// Senior tax has no estimation fallback; only current-year tax is estimated.
pub(crate) fn resolve_case(stage: AuctionStage, evidence: &TaxEvidence) -> TaxCase {
    match (stage, evidence.current_tax_claim, evidence.senior_tax_claim) {
        (AuctionStage::ClaimsClosed, true, true) => TaxCase::T1,
        (AuctionStage::ClaimsClosed, true, false) => TaxCase::T2,
        (AuctionStage::ClaimsClosed, false, true) => TaxCase::T3,
        (AuctionStage::ClaimsClosed, false, false) => TaxCase::T4,
        (AuctionStage::ClaimsOpen, true, true) => TaxCase::T5,
        (AuctionStage::ClaimsOpen, true, false) => TaxCase::T6,
        (AuctionStage::ClaimsOpen, false, true) => TaxCase::T7,
        (AuctionStage::ClaimsOpen, false, false) => TaxCase::T8,
        (AuctionStage::NotOpened, _, _) => TaxCase::T9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rights::category::PropertyCategory;
    use rust_decimal::Decimal;

    fn record(current: bool, senior: bool) -> ClaimEvidenceRecord {
        let mut record = ClaimEvidenceRecord::default();
        record.tax = TaxEvidence {
            current_tax_claim: current,
            senior_tax_claim: senior,
        };
        record.amounts.current_tax = Decimal::from(1_200_000);
        record.amounts.senior_tax = Decimal::from(3_400_000);
        record.valuation.initial_appraisal_value = Some(Decimal::from(200_000_000));
        record
    }

    fn run(stage: AuctionStage, record: &ClaimEvidenceRecord) -> TaxOutcome {
        let context = RuleContext {
            category: PropertyCategory::Residential,
            stage,
        };
        apply(context, record, &EstimationPolicy::default())
    }

    #[test]
    fn after_deadline_each_claim_reflects_independently() {
        let both = run(AuctionStage::ClaimsClosed, &record(true, true));
        assert_eq!(both.case, TaxCase::T1);
        assert_eq!(both.current_tax.reflected, Decimal::from(1_200_000));
        assert_eq!(both.senior_tax.reflected, Decimal::from(3_400_000));

        let senior_only = run(AuctionStage::ClaimsClosed, &record(false, true));
        assert_eq!(senior_only.case, TaxCase::T3);
        assert_eq!(senior_only.current_tax.reflected, Decimal::ZERO);
        assert_eq!(senior_only.senior_tax.reflected, Decimal::from(3_400_000));

        let none = run(AuctionStage::ClaimsClosed, &record(false, false));
        assert_eq!(none.case, TaxCase::T4);
        assert_eq!(none.current_tax.reflected, Decimal::ZERO);
        assert_eq!(none.senior_tax.reflected, Decimal::ZERO);
    }

    #[test]
    fn before_deadline_without_claims_estimates_current_tax_only() {
        let outcome = run(AuctionStage::ClaimsOpen, &record(false, false));
        assert_eq!(outcome.case, TaxCase::T8);
        assert_eq!(outcome.current_tax.reflected, Decimal::from(600_000));
        assert_eq!(outcome.senior_tax.reflected, Decimal::ZERO);

        let current_only = run(AuctionStage::ClaimsOpen, &record(true, false));
        assert_eq!(current_only.case, TaxCase::T6);
        assert_eq!(current_only.current_tax.reflected, Decimal::from(1_200_000));
    }

    #[test]
    fn not_opened_always_estimates_and_ignores_claims() {
        let mut record = record(true, true);
        record.valuation.initial_appraisal_value = None;

        let outcome = run(AuctionStage::NotOpened, &record);
        assert_eq!(outcome.case, TaxCase::T9);
        assert_eq!(outcome.current_tax.reflected, Decimal::from(500_000));
        assert_eq!(outcome.senior_tax.reflected, Decimal::ZERO);
    }
}
