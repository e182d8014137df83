use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::category::PropertyCategory;
use super::context::AuctionStage;

pub(crate) const NOT_APPLICABLE: &str = "Not applicable.";

/// Reflected amount for one claim type with the justification behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClaimLine {
    pub reflected: Decimal,
    pub reason: &'static str,
}

impl ClaimLine {
    pub(crate) fn reflect(amount: Decimal, reason: &'static str) -> Self {
        Self {
            reflected: amount.max(Decimal::ZERO),
            reason,
        }
    }

    pub(crate) fn zero(reason: &'static str) -> Self {
        Self {
            reflected: Decimal::ZERO,
            reason,
        }
    }

    pub(crate) fn not_applicable() -> Self {
        Self::zero(NOT_APPLICABLE)
    }
}

/// Where a deposit case sends its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositDisposition {
    /// Reflect the small-deposit DD amount.
    SmallDeposit,
    /// Reflect the lease-deposit DD amount; small deposit stays zero.
    LeaseDeposit,
    /// Reflect the statutory small-deposit estimate.
    EstimatedSmallDeposit,
    Zero,
}

macro_rules! serialize_as_code {
    ($($case:ty),+ $(,)?) => {
        $(
            impl Serialize for $case {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.code())
                }
            }

            impl std::fmt::Display for $case {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.code())
                }
            }
        )+
    };
}

serialize_as_code!(DepositCase, WageCase, TaxCase);

/// Terminal branch of the deposit/lease decision tree.
///
/// `R*` cases are residential, `L*` land and `C*` commercial. `R19`/`R20`,
/// `L5` and `C16`/`C17` cover an opened auction past its claim deadline with
/// no survey report on file; none of them reflect a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DepositCase {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    R16,
    R17,
    R18,
    R19,
    R20,
    L1,
    L2,
    L3,
    L4,
    L5,
    C1,
    C2,
    C3,
    C4,
    C5,
    C6,
    C7,
    C8,
    C9,
    C10,
    C11,
    C12,
    C13,
    C14,
    C15,
    C16,
    C17,
}

const CLOSED_SURVEY_CLAIMED: &str = "Claim deadline passed; survey report confirms a tenant and the auction file shows the tenant's distribution claim, reflected.";
const CLOSED_SURVEY_UNCLAIMED: &str = "Claim deadline passed; survey report confirms a tenant but no distribution claim was filed, not reflected.";
const CLOSED_SURVEY_VACANT: &str =
    "Claim deadline passed; survey report in the auction file shows no tenant, not reflected.";
const CLOSED_NO_SURVEY_CLAIMED: &str = "Claim deadline passed; no survey report filed, so the tenant's distribution claim cannot be confirmed, not reflected.";
const CLOSED_NO_SURVEY_UNCLAIMED: &str = "Claim deadline passed; no survey report filed and no tenant distribution claim on file, not reflected.";
const OPEN_SURVEY_CLAIMED: &str = "Auction opened, claim deadline not passed; survey report confirms a tenant and the auction file shows the tenant's distribution claim, reflected.";
const OPEN_SURVEY_JUNIOR: &str = "Auction opened, claim deadline not passed; survey report confirms a tenant, senior small deposit reflected.";
const OPEN_SURVEY_SENIOR: &str = "Auction opened, claim deadline not passed; survey report confirms a senior tenant, senior lease deposit reflected.";
const OPEN_SURVEY_VACANT: &str = "Auction opened, claim deadline not passed; survey report in the auction file shows no tenant, not reflected.";

impl DepositCase {
    pub const ALL: [DepositCase; 42] = [
        DepositCase::R1,
        DepositCase::R2,
        DepositCase::R3,
        DepositCase::R4,
        DepositCase::R5,
        DepositCase::R6,
        DepositCase::R7,
        DepositCase::R8,
        DepositCase::R9,
        DepositCase::R10,
        DepositCase::R11,
        DepositCase::R12,
        DepositCase::R13,
        DepositCase::R14,
        DepositCase::R15,
        DepositCase::R16,
        DepositCase::R17,
        DepositCase::R18,
        DepositCase::R19,
        DepositCase::R20,
        DepositCase::L1,
        DepositCase::L2,
        DepositCase::L3,
        DepositCase::L4,
        DepositCase::L5,
        DepositCase::C1,
        DepositCase::C2,
        DepositCase::C3,
        DepositCase::C4,
        DepositCase::C5,
        DepositCase::C6,
        DepositCase::C7,
        DepositCase::C8,
        DepositCase::C9,
        DepositCase::C10,
        DepositCase::C11,
        DepositCase::C12,
        DepositCase::C13,
        DepositCase::C14,
        DepositCase::C15,
        DepositCase::C16,
        DepositCase::C17,
    ];

    /// Code, disposition and justification for every case.
    const fn entry(self) -> (&'static str, DepositDisposition, &'static str) {
        use DepositDisposition::*;

        match self {
            DepositCase::R1 => ("CASE_R1", SmallDeposit, CLOSED_SURVEY_CLAIMED),
            DepositCase::R2 => ("CASE_R2", Zero, CLOSED_SURVEY_UNCLAIMED),
            DepositCase::R3 => ("CASE_R3", LeaseDeposit, CLOSED_SURVEY_UNCLAIMED),
            DepositCase::R4 => ("CASE_R4", Zero, CLOSED_SURVEY_VACANT),
            DepositCase::R5 => ("CASE_R5", SmallDeposit, OPEN_SURVEY_CLAIMED),
            DepositCase::R6 => ("CASE_R6", SmallDeposit, OPEN_SURVEY_JUNIOR),
            DepositCase::R7 => ("CASE_R7", LeaseDeposit, OPEN_SURVEY_SENIOR),
            DepositCase::R8 => ("CASE_R8", Zero, OPEN_SURVEY_VACANT),
            DepositCase::R9 => (
                "CASE_R9",
                SmallDeposit,
                "Auction opened, claim deadline not passed; no survey report filed. Tenant registry shows a tenant, small deposit reflected as an estimate.",
            ),
            DepositCase::R10 => (
                "CASE_R10",
                LeaseDeposit,
                "Auction opened, claim deadline not passed; no survey report filed. Tenant registry shows a senior tenant, senior lease deposit reflected as an estimate.",
            ),
            DepositCase::R11 => (
                "CASE_R11",
                Zero,
                "Auction opened, claim deadline not passed; no survey report filed. Tenant registry shows no tenant, not reflected.",
            ),
            DepositCase::R12 => (
                "CASE_R12",
                EstimatedSmallDeposit,
                "Auction opened, claim deadline not passed; no survey report filed and no tenant registry provided. Collateral address differs from the owner's registered address, small deposit conservatively estimated.",
            ),
            DepositCase::R13 => (
                "CASE_R13",
                Zero,
                "Auction opened, claim deadline not passed; no survey report filed and no tenant registry provided. Collateral address matches the owner's registered address, not reflected.",
            ),
            DepositCase::R14 => (
                "CASE_R14",
                SmallDeposit,
                "Auction not opened; tenant registry shows a tenant, small deposit reflected as an estimate.",
            ),
            DepositCase::R15 => (
                "CASE_R15",
                LeaseDeposit,
                "Auction not opened; tenant registry shows a tenant who moved in before the mortgage registration, lease deposit reflected as an estimate.",
            ),
            DepositCase::R16 => (
                "CASE_R16",
                Zero,
                "Auction not opened; tenant registry shows no tenant, not reflected.",
            ),
            DepositCase::R17 => (
                "CASE_R17",
                EstimatedSmallDeposit,
                "Auction not opened; no tenant registry provided. Collateral address differs from the owner's registered address, small deposit conservatively estimated.",
            ),
            DepositCase::R18 => (
                "CASE_R18",
                Zero,
                "Auction not opened; no tenant registry provided. Collateral address matches the owner's registered address, not reflected.",
            ),
            DepositCase::R19 => ("CASE_R19", Zero, CLOSED_NO_SURVEY_CLAIMED),
            DepositCase::R20 => ("CASE_R20", Zero, CLOSED_NO_SURVEY_UNCLAIMED),
            DepositCase::L1 => (
                "CASE_L1",
                Zero,
                "Claim deadline passed; survey report in the auction file confirms no tenant.",
            ),
            DepositCase::L2 => (
                "CASE_L2",
                Zero,
                "Auction opened, claim deadline not passed; survey report in the auction file confirms no tenant.",
            ),
            DepositCase::L3 => (
                "CASE_L3",
                Zero,
                "Auction opened, claim deadline not passed; no survey report filed, but land is presumed to carry no tenant, not reflected.",
            ),
            DepositCase::L4 => (
                "CASE_L4",
                Zero,
                "Auction not opened; land is presumed to carry no tenant, not reflected.",
            ),
            DepositCase::L5 => (
                "CASE_L5",
                Zero,
                "Claim deadline passed; no survey report filed, but land is presumed to carry no tenant, not reflected.",
            ),
            DepositCase::C1 => ("CASE_C1", SmallDeposit, CLOSED_SURVEY_CLAIMED),
            DepositCase::C2 => ("CASE_C2", Zero, CLOSED_SURVEY_UNCLAIMED),
            DepositCase::C3 => ("CASE_C3", LeaseDeposit, CLOSED_SURVEY_UNCLAIMED),
            DepositCase::C4 => ("CASE_C4", Zero, CLOSED_SURVEY_VACANT),
            DepositCase::C5 => ("CASE_C5", SmallDeposit, OPEN_SURVEY_CLAIMED),
            DepositCase::C6 => ("CASE_C6", SmallDeposit, OPEN_SURVEY_JUNIOR),
            DepositCase::C7 => ("CASE_C7", LeaseDeposit, OPEN_SURVEY_SENIOR),
            DepositCase::C8 => ("CASE_C8", Zero, OPEN_SURVEY_VACANT),
            DepositCase::C9 => (
                "CASE_C9",
                SmallDeposit,
                "Auction opened, claim deadline not passed; no survey report filed. Commercial lease registry shows a tenant, small deposit reflected as an estimate.",
            ),
            DepositCase::C10 => (
                "CASE_C10",
                LeaseDeposit,
                "Auction opened, claim deadline not passed; no survey report filed. Commercial lease registry shows a senior tenant, senior lease deposit reflected as an estimate.",
            ),
            DepositCase::C11 => (
                "CASE_C11",
                Zero,
                "Auction opened, claim deadline not passed; no survey report filed. Commercial lease registry shows no tenant, not reflected.",
            ),
            DepositCase::C12 => (
                "CASE_C12",
                Zero,
                "Auction opened, claim deadline not passed; no survey report filed and no commercial lease registry provided. Commercial leases are presumed to carry no senior deposit, not reflected.",
            ),
            DepositCase::C13 => (
                "CASE_C13",
                SmallDeposit,
                "Auction not opened; commercial lease registry shows a tenant, small deposit reflected as an estimate.",
            ),
            DepositCase::C14 => (
                "CASE_C14",
                Zero,
                "Auction not opened; commercial lease registry shows no tenant, not reflected.",
            ),
            DepositCase::C15 => (
                "CASE_C15",
                Zero,
                "Auction not opened; no commercial lease registry provided. Commercial leases are presumed to carry no senior deposit, not reflected.",
            ),
            DepositCase::C16 => ("CASE_C16", Zero, CLOSED_NO_SURVEY_CLAIMED),
            DepositCase::C17 => ("CASE_C17", Zero, CLOSED_NO_SURVEY_UNCLAIMED),
        }
    }

    pub const fn code(self) -> &'static str {
        self.entry().0
    }

    pub const fn disposition(self) -> DepositDisposition {
        self.entry().1
    }

    pub const fn reason(self) -> &'static str {
        self.entry().2
    }

    pub const fn category(self) -> PropertyCategory {
        match self {
            DepositCase::L1
            | DepositCase::L2
            | DepositCase::L3
            | DepositCase::L4
            | DepositCase::L5 => PropertyCategory::Land,
            DepositCase::C1
            | DepositCase::C2
            | DepositCase::C3
            | DepositCase::C4
            | DepositCase::C5
            | DepositCase::C6
            | DepositCase::C7
            | DepositCase::C8
            | DepositCase::C9
            | DepositCase::C10
            | DepositCase::C11
            | DepositCase::C12
            | DepositCase::C13
            | DepositCase::C14
            | DepositCase::C15
            | DepositCase::C16
            | DepositCase::C17 => PropertyCategory::Commercial,
            _ => PropertyCategory::Residential,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|case| case.code() == code)
    }
}

/// Terminal branch of the wage-claim rule.
///
/// `I*` cases cover individual debtors and never reflect an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WageCase {
    /// Claim deadline passed; covers filed wage claims too.
    I1,
    I2,
    I3,
    I4,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
    B8,
    B9,
}

impl WageCase {
    pub const ALL: [WageCase; 13] = [
        WageCase::I1,
        WageCase::I2,
        WageCase::I3,
        WageCase::I4,
        WageCase::B1,
        WageCase::B2,
        WageCase::B3,
        WageCase::B4,
        WageCase::B5,
        WageCase::B6,
        WageCase::B7,
        WageCase::B8,
        WageCase::B9,
    ];

    const fn entry(self) -> (&'static str, bool, &'static str) {
        match self {
            WageCase::I1 => (
                "WAGE_I1",
                false,
                "Auction opened, claim deadline passed; an individual debtor cannot owe priority wages, filed or not, not reflected.",
            ),
            WageCase::I2 => (
                "WAGE_I2",
                false,
                "Auction opened, claim deadline not passed; survey report shows no wage claim and an individual debtor cannot owe priority wages, not reflected.",
            ),
            WageCase::I3 => (
                "WAGE_I3",
                false,
                "Auction opened, claim deadline not passed; no survey report filed, but an individual debtor cannot owe priority wages, not reflected.",
            ),
            WageCase::I4 => (
                "WAGE_I4",
                false,
                "Auction not opened; an individual debtor cannot owe priority wages, not reflected.",
            ),
            WageCase::B1 => (
                "WAGE_B1",
                true,
                "Auction opened, claim deadline passed; wage claim filing confirmed in the auction file, reflected.",
            ),
            WageCase::B2 => (
                "WAGE_B2",
                false,
                "Auction opened, claim deadline passed; no wage claim filing confirmed, not reflected.",
            ),
            WageCase::B3 => (
                "WAGE_B3",
                true,
                "Auction opened, claim deadline not passed; wage creditors have filed a distribution claim, reflected with the deadline in view.",
            ),
            WageCase::B4 => (
                "WAGE_B4",
                true,
                "Auction opened, claim deadline not passed; no wage claim filing, but a related provisional seizure is confirmed, reflected considering wage records.",
            ),
            WageCase::B5 => (
                "WAGE_B5",
                true,
                "Auction opened, claim deadline not passed; no wage claim filing and no related seizure, but wage records indicate a claim, reflected.",
            ),
            WageCase::B6 => (
                "WAGE_B6",
                false,
                "Auction opened, claim deadline not passed; no wage claim filing and no related seizure, no wage claim expected, not reflected.",
            ),
            WageCase::B7 => (
                "WAGE_B7",
                true,
                "Auction not opened; an estimated wage-related provisional seizure is confirmed, reflected as an estimate considering wage records.",
            ),
            WageCase::B8 => (
                "WAGE_B8",
                true,
                "Auction not opened; no wage-related seizure confirmed, but wage records indicate a claim, reflected as an estimate.",
            ),
            WageCase::B9 => (
                "WAGE_B9",
                false,
                "Auction not opened; no wage-related seizure confirmed and no wage claim expected, not reflected.",
            ),
        }
    }

    pub const fn code(self) -> &'static str {
        self.entry().0
    }

    /// Whether the wage-claim DD amount is reflected.
    pub const fn reflects_claim(self) -> bool {
        self.entry().1
    }

    pub const fn reason(self) -> &'static str {
        self.entry().2
    }
}

/// How the tax rule settles the current-year tax line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentTaxSource {
    Claimed,
    Estimated,
    Absent,
}

/// Terminal branch of the tax rule. `T1..T4` past the deadline, `T5..T8`
/// before it, `T9` before the auction opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaxCase {
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    T8,
    T9,
}

impl TaxCase {
    pub const ALL: [TaxCase; 9] = [
        TaxCase::T1,
        TaxCase::T2,
        TaxCase::T3,
        TaxCase::T4,
        TaxCase::T5,
        TaxCase::T6,
        TaxCase::T7,
        TaxCase::T8,
        TaxCase::T9,
    ];

    /// Code, current-tax source, current-tax reason, senior-tax reflected, senior-tax reason.
    const fn entry(self) -> (&'static str, CurrentTaxSource, &'static str, bool, &'static str) {
        use CurrentTaxSource::*;

        match self {
            TaxCase::T1 => (
                "TAX_T1",
                Claimed,
                "Auction opened, claim deadline passed; current-year tax and senior tax claims in the auction file reflected.",
                true,
                "Senior tax claim in the auction file reflected.",
            ),
            TaxCase::T2 => (
                "TAX_T2",
                Claimed,
                "Auction opened, claim deadline passed; current-year tax claim in the auction file reflected.",
                false,
                NOT_APPLICABLE,
            ),
            TaxCase::T3 => (
                "TAX_T3",
                Absent,
                NOT_APPLICABLE,
                true,
                "Auction opened, claim deadline passed; senior tax claim in the auction file reflected.",
            ),
            TaxCase::T4 => ("TAX_T4", Absent, NOT_APPLICABLE, false, NOT_APPLICABLE),
            TaxCase::T5 => (
                "TAX_T5",
                Claimed,
                "Auction opened, claim deadline not passed; current-year tax and senior tax claims in the auction file reflected.",
                true,
                "Senior tax claim in the auction file reflected.",
            ),
            TaxCase::T6 => (
                "TAX_T6",
                Claimed,
                "Auction opened, claim deadline not passed; current-year tax claim in the auction file reflected.",
                false,
                NOT_APPLICABLE,
            ),
            TaxCase::T7 => (
                "TAX_T7",
                Absent,
                NOT_APPLICABLE,
                true,
                "Auction opened, claim deadline not passed; senior tax claim in the auction file reflected.",
            ),
            TaxCase::T8 => (
                "TAX_T8",
                Estimated,
                "Auction opened, claim deadline not passed; no priority tax beyond current-year tax expected, current-year tax estimated.",
                false,
                NOT_APPLICABLE,
            ),
            TaxCase::T9 => (
                "TAX_T9",
                Estimated,
                "Auction not opened; no priority tax beyond current-year tax expected, current-year tax estimated.",
                false,
                NOT_APPLICABLE,
            ),
        }
    }

    pub const fn code(self) -> &'static str {
        self.entry().0
    }

    pub const fn current_tax_source(self) -> CurrentTaxSource {
        self.entry().1
    }

    pub const fn current_tax_reason(self) -> &'static str {
        self.entry().2
    }

    pub const fn reflects_senior_tax(self) -> bool {
        self.entry().3
    }

    pub const fn senior_tax_reason(self) -> &'static str {
        self.entry().4
    }
}

/// Everything the engine derives for one collateral item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RightsAssessment {
    pub category: PropertyCategory,
    pub stage: AuctionStage,
    pub senior_mortgage: ClaimLine,
    pub lien: ClaimLine,
    pub small_deposit: ClaimLine,
    pub lease_deposit: ClaimLine,
    pub deposit_case: DepositCase,
    pub wage_claim: ClaimLine,
    pub wage_case: WageCase,
    pub current_tax: ClaimLine,
    pub senior_tax: ClaimLine,
    pub tax_case: TaxCase,
}

impl RightsAssessment {
    /// Sum of every reflected senior claim.
    pub fn senior_rights_total(&self) -> Decimal {
        [
            self.senior_mortgage,
            self.lien,
            self.small_deposit,
            self.lease_deposit,
            self.wage_claim,
            self.current_tax,
            self.senior_tax,
        ]
        .iter()
        .map(|line| line.reflected)
        .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn deposit_codes_are_unique_and_round_trip() {
        let codes: HashSet<_> = DepositCase::ALL.iter().map(|case| case.code()).collect();
        assert_eq!(codes.len(), DepositCase::ALL.len());

        for case in DepositCase::ALL {
            assert_eq!(DepositCase::from_code(case.code()), Some(case));
            assert!(!case.reason().is_empty());
        }
        assert_eq!(DepositCase::from_code("CASE_X1"), None);
    }

    #[test]
    fn deposit_codes_are_prefixed_by_category() {
        for case in DepositCase::ALL {
            let prefix = match case.category() {
                PropertyCategory::Residential => "CASE_R",
                PropertyCategory::Land => "CASE_L",
                PropertyCategory::Commercial => "CASE_C",
            };
            assert!(case.code().starts_with(prefix), "{case:?}");
        }
    }

    #[test]
    fn land_cases_never_reflect() {
        assert!(DepositCase::ALL
            .iter()
            .filter(|case| case.category() == PropertyCategory::Land)
            .all(|case| case.disposition() == DepositDisposition::Zero));
    }

    #[test]
    fn individual_wage_cases_never_reflect() {
        for case in [WageCase::I1, WageCase::I2, WageCase::I3, WageCase::I4] {
            assert!(!case.reflects_claim());
        }
    }

    #[test]
    fn case_codes_serialize_as_strings() {
        let json = serde_json::to_string(&(DepositCase::C12, WageCase::B4, TaxCase::T8))
            .expect("serialize codes");
        assert_eq!(json, r#"["CASE_C12","WAGE_B4","TAX_T8"]"#);
    }

    #[test]
    fn claim_line_never_reflects_negative_amounts() {
        let line = ClaimLine::reflect(Decimal::from(-5), "x");
        assert_eq!(line.reflected, Decimal::ZERO);
    }
}
