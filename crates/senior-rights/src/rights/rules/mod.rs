pub(crate) mod deposit;
mod encumbrance;
pub(crate) mod tax;
pub(crate) mod wage;

use super::context::RuleContext;
use super::domain::ClaimEvidenceRecord;
use super::estimates::EstimationPolicy;
use super::outcome::RightsAssessment;

/// Run the five claim rules in order against one record.
pub(crate) fn assess(
    context: RuleContext,
    record: &ClaimEvidenceRecord,
    policy: &EstimationPolicy,
) -> RightsAssessment {
    let senior_mortgage = encumbrance::senior_mortgage(record);
    let lien = encumbrance::lien(record);
    let deposit = deposit::apply(context, record, policy);
    let (wage_claim, wage_case) = wage::apply(context, record);
    let tax = tax::apply(context, record, policy);

    RightsAssessment {
        category: context.category,
        stage: context.stage,
        senior_mortgage,
        lien,
        small_deposit: deposit.small_deposit,
        lease_deposit: deposit.lease_deposit,
        deposit_case: deposit.case,
        wage_claim,
        wage_case,
        current_tax: tax.current_tax,
        senior_tax: tax.senior_tax,
        tax_case: tax.case,
    }
}
