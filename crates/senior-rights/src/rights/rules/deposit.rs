use super::super::category::PropertyCategory;
use super::super::context::{AuctionStage, RuleContext};
use super::super::domain::{ClaimEvidenceRecord, DepositFacts};
use super::super::estimates::EstimationPolicy;
use super::super::outcome::{ClaimLine, DepositCase, DepositDisposition};

const SENIOR_LEASE_REFLECTED: &str =
    "Tenancy predates the mortgage registration, senior lease deposit reflected.";

/// What the tenancy evidence says about the occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occupancy {
    Vacant,
    Occupied {
        claimed: bool,
        /// Move-in predates the mortgage registration.
        senior: bool,
    },
}

impl Occupancy {
    fn from_facts(facts: &DepositFacts) -> Self {
        if facts.tenant {
            Occupancy::Occupied {
                claimed: facts.tenant_claimed,
                senior: facts.before_mortgage,
            }
        } else {
            Occupancy::Vacant
        }
    }
}

pub(crate) struct DepositOutcome {
    pub(crate) small_deposit: ClaimLine,
    pub(crate) lease_deposit: ClaimLine,
    pub(crate) case: DepositCase,
}

pub(crate) fn apply(
    context: RuleContext,
    record: &ClaimEvidenceRecord,
    policy: &EstimationPolicy,
) -> DepositOutcome {
    let case = resolve_case(context.category, context.stage, &record.deposit.facts());
    let reason = case.reason();
    let amounts = &record.amounts;

    let (small_deposit, lease_deposit) = match case.disposition() {
        DepositDisposition::SmallDeposit => (
            ClaimLine::reflect(amounts.small_deposit, reason),
            ClaimLine::not_applicable(),
        ),
        DepositDisposition::LeaseDeposit => (
            ClaimLine::zero(reason),
            ClaimLine::reflect(amounts.lease_deposit, SENIOR_LEASE_REFLECTED),
        ),
        DepositDisposition::EstimatedSmallDeposit => (
            ClaimLine::reflect(
                policy.small_deposit(record.valuation.housing_official_price),
                reason,
            ),
            ClaimLine::not_applicable(),
        ),
        DepositDisposition::Zero => (ClaimLine::zero(reason), ClaimLine::not_applicable()),
    };

    DepositOutcome {
        small_deposit,
        lease_deposit,
        case,
    }
}

/// Select the single deposit case for a category, stage and evidence set.
pub(crate) fn resolve_case(
    category: PropertyCategory,
    stage: AuctionStage,
    facts: &DepositFacts,
) -> DepositCase {
    match category {
        PropertyCategory::Residential => residential(stage, facts),
        PropertyCategory::Land => land(stage, facts),
        PropertyCategory::Commercial => commercial(stage, facts),
    }
}

fn residential(stage: AuctionStage, facts: &DepositFacts) -> DepositCase {
    use AuctionStage::*;
    use Occupancy::*;

    let occupancy = Occupancy::from_facts(facts);

    // (stage, survey, tenant registry, occupancy, address matches owner)
    match (
        stage,
        facts.survey,
        facts.tenant_registry,
        occupancy,
        facts.address_match,
    ) {
        (ClaimsClosed, true, _, Occupied { claimed: true, .. }, _) => DepositCase::R1,
        (ClaimsClosed, true, _, Occupied { claimed: false, senior: false }, _) => DepositCase::R2,
        (ClaimsClosed, true, _, Occupied { claimed: false, senior: true }, _) => DepositCase::R3,
        (ClaimsClosed, true, _, Vacant, _) => DepositCase::R4,
        (ClaimsClosed, false, _, Occupied { claimed: true, .. }, _) => DepositCase::R19,
        (ClaimsClosed, false, _, _, _) => DepositCase::R20,

        (ClaimsOpen, true, _, Occupied { claimed: true, .. }, _) => DepositCase::R5,
        (ClaimsOpen, true, _, Occupied { claimed: false, senior: false }, _) => DepositCase::R6,
        (ClaimsOpen, true, _, Occupied { claimed: false, senior: true }, _) => DepositCase::R7,
        (ClaimsOpen, true, _, Vacant, _) => DepositCase::R8,
        (ClaimsOpen, false, true, Occupied { senior: false, .. }, _) => DepositCase::R9,
        (ClaimsOpen, false, true, Occupied { senior: true, .. }, _) => DepositCase::R10,
        (ClaimsOpen, false, true, Vacant, _) => DepositCase::R11,
        (ClaimsOpen, false, false, _, false) => DepositCase::R12,
        (ClaimsOpen, false, false, _, true) => DepositCase::R13,

        (NotOpened, _, true, Occupied { senior: false, .. }, _) => DepositCase::R14,
        (NotOpened, _, true, Occupied { senior: true, .. }, _) => DepositCase::R15,
        (NotOpened, _, true, Vacant, _) => DepositCase::R16,
        (NotOpened, _, false, _, false) => DepositCase::R17,
        (NotOpened, _, false, _, true) => DepositCase::R18,
    }
}

fn land(stage: AuctionStage, facts: &DepositFacts) -> DepositCase {
    match (stage, facts.survey) {
        (AuctionStage::ClaimsClosed, true) => DepositCase::L1,
        (AuctionStage::ClaimsClosed, false) => DepositCase::L5,
        (AuctionStage::ClaimsOpen, true) => DepositCase::L2,
        (AuctionStage::ClaimsOpen, false) => DepositCase::L3,
        (AuctionStage::NotOpened, _) => DepositCase::L4,
    }
}

/// Mirrors the residential tree with the commercial lease registry in place of
/// the tenant registry. Without any registry the commercial default is zero.
fn commercial(stage: AuctionStage, facts: &DepositFacts) -> DepositCase {
    use AuctionStage::*;
    use Occupancy::*;

    let occupancy = Occupancy::from_facts(facts);

    // (stage, survey, commercial lease registry, occupancy)
    match (
        stage,
        facts.survey,
        facts.commercial_lease_registry,
        occupancy,
    ) {
        (ClaimsClosed, true, _, Occupied { claimed: true, .. }) => DepositCase::C1,
        (ClaimsClosed, true, _, Occupied { claimed: false, senior: false }) => DepositCase::C2,
        (ClaimsClosed, true, _, Occupied { claimed: false, senior: true }) => DepositCase::C3,
        (ClaimsClosed, true, _, Vacant) => DepositCase::C4,
        (ClaimsClosed, false, _, Occupied { claimed: true, .. }) => DepositCase::C16,
        (ClaimsClosed, false, _, _) => DepositCase::C17,

        (ClaimsOpen, true, _, Occupied { claimed: true, .. }) => DepositCase::C5,
        (ClaimsOpen, true, _, Occupied { claimed: false, senior: false }) => DepositCase::C6,
        (ClaimsOpen, true, _, Occupied { claimed: false, senior: true }) => DepositCase::C7,
        (ClaimsOpen, true, _, Vacant) => DepositCase::C8,
        (ClaimsOpen, false, true, Occupied { senior: false, .. }) => DepositCase::C9,
        (ClaimsOpen, false, true, Occupied { senior: true, .. }) => DepositCase::C10,
        (ClaimsOpen, false, true, Vacant) => DepositCase::C11,
        (ClaimsOpen, false, false, _) => DepositCase::C12,

        (NotOpened, _, true, Occupied { .. }) => DepositCase::C13,
        (NotOpened, _, true, Vacant) => DepositCase::C14,
        (NotOpened, _, false, _) => DepositCase::C15,
    }
}
