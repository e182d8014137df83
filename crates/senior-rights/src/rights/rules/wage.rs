use super::super::context::{AuctionStage, RuleContext};
use super::super::domain::{ClaimEvidenceRecord, DebtorType, WageEvidence};
use super::super::outcome::{ClaimLine, WageCase};

pub(crate) fn apply(context: RuleContext, record: &ClaimEvidenceRecord) -> (ClaimLine, WageCase) {
    let survey = record.deposit.facts().survey;
    let case = resolve_case(context.stage, survey, &record.wage);

    let line = if case.reflects_claim() {
        ClaimLine::reflect(record.amounts.wage_claim, case.reason())
    } else {
        ClaimLine::zero(case.reason())
    };

    (line, case)
}

/// Individual debtors cannot owe priority wages, so only the justification
/// varies. For business debtors a formal filing outranks a provisional
/// seizure, which outranks other wage evidence; the first present decides the
/// justification.
pub(crate) fn resolve_case(stage: AuctionStage, survey: bool, evidence: &WageEvidence) -> WageCase {
    match evidence.debtor_type {
        DebtorType::Individual => match (stage, survey) {
            (AuctionStage::ClaimsClosed, _) => WageCase::I1,
            (AuctionStage::ClaimsOpen, true) => WageCase::I2,
            (AuctionStage::ClaimsOpen, false) => WageCase::I3,
            (AuctionStage::NotOpened, _) => WageCase::I4,
        },
        DebtorType::BusinessOrCorporate => match stage {
            AuctionStage::ClaimsClosed if evidence.wage_claim_submitted => WageCase::B1,
            AuctionStage::ClaimsClosed => WageCase::B2,
            AuctionStage::ClaimsOpen if evidence.wage_claim_submitted => WageCase::B3,
            AuctionStage::ClaimsOpen if evidence.provisional_seizure_estimated => WageCase::B4,
            AuctionStage::ClaimsOpen if evidence.has_wage_claim => WageCase::B5,
            AuctionStage::ClaimsOpen => WageCase::B6,
            AuctionStage::NotOpened if evidence.provisional_seizure_estimated => WageCase::B7,
            AuctionStage::NotOpened if evidence.has_wage_claim => WageCase::B8,
            AuctionStage::NotOpened => WageCase::B9,
        },
    }
}
