use rust_decimal::Decimal;

use super::super::domain::ClaimEvidenceRecord;
use super::super::outcome::ClaimLine;

const SENIOR_MORTGAGE_REFLECTED: &str = "Senior mortgage confirmed and reflected.";
const LIEN_REFLECTED: &str = "Lien confirmed by site investigation and reflected.";

pub(crate) fn senior_mortgage(record: &ClaimEvidenceRecord) -> ClaimLine {
    presence(record.amounts.senior_mortgage, SENIOR_MORTGAGE_REFLECTED)
}

pub(crate) fn lien(record: &ClaimEvidenceRecord) -> ClaimLine {
    presence(record.amounts.lien, LIEN_REFLECTED)
}

fn presence(amount: Decimal, reason: &'static str) -> ClaimLine {
    if amount > Decimal::ZERO {
        ClaimLine::reflect(amount, reason)
    } else {
        ClaimLine::not_applicable()
    }
}
