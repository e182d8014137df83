use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::outcome::RightsAssessment;

/// Share of the winning bid assumed for auction fees when none are supplied.
const ESTIMATED_FEE_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 3);
/// Recovery rates at or above these bounds rate low and medium risk.
const LOW_RISK_FLOOR: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
const MEDIUM_RISK_FLOOR: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const SENIOR_SHARE_WARNING: &str = " Senior claims exceed 50% of the expected winning bid.";

/// Expected sale figures used to project what remains after senior claims.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionInputs {
    pub expected_winning_bid: Option<Decimal>,
    pub auction_fees: Option<Decimal>,
    pub loan_cap: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_recovery_rate(rate: Decimal) -> Self {
        if rate >= LOW_RISK_FLOOR {
            RiskLevel::Low
        } else if rate >= MEDIUM_RISK_FLOOR {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub senior_rights_total: Decimal,
    /// Supplied fees, or 1.5% of the expected bid.
    pub auction_fees: Decimal,
    pub distributable_amount: Decimal,
    pub amount_after_senior: Decimal,
    /// Proceeds after senior claims, limited to the loan cap when one is set.
    pub recovery_amount: Decimal,
    /// Percentage of the loan cap recovered, two decimal places.
    pub recovery_rate: Decimal,
    pub risk: RiskAssessment,
}

/// Project the sale proceeds left for the loan once senior claims are paid.
pub fn simulate(assessment: &RightsAssessment, inputs: &DistributionInputs) -> DistributionSummary {
    let senior_rights_total = assessment.senior_rights_total();

    let auction_fees = match (inputs.auction_fees, inputs.expected_winning_bid) {
        (Some(fees), _) => fees,
        (None, Some(bid)) => {
            (bid * ESTIMATED_FEE_RATE).round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        }
        (None, None) => Decimal::ZERO,
    };

    let distributable_amount = match inputs.expected_winning_bid {
        Some(bid) => bid - auction_fees,
        None => Decimal::ZERO,
    };

    let amount_after_senior = (distributable_amount - senior_rights_total).max(Decimal::ZERO);

    // Without a cap the whole remainder counts as recovered.
    let (recovery_amount, recovery_rate) = match inputs.loan_cap {
        Some(cap) if cap > Decimal::ZERO => {
            let recovered = amount_after_senior.min(cap);
            let rate = (recovered / cap * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
            (recovered, rate)
        }
        _ => (amount_after_senior, Decimal::ONE_HUNDRED),
    };

    let risk = assess_risk(
        recovery_rate,
        senior_rights_total,
        inputs.expected_winning_bid.unwrap_or(Decimal::ZERO),
    );

    DistributionSummary {
        senior_rights_total,
        auction_fees,
        distributable_amount,
        amount_after_senior,
        recovery_amount,
        recovery_rate,
        risk,
    }
}

fn assess_risk(recovery_rate: Decimal, senior_rights_total: Decimal, bid: Decimal) -> RiskAssessment {
    let level = RiskLevel::from_recovery_rate(recovery_rate);

    let mut shown = recovery_rate;
    shown.rescale(1);
    let mut reason = match level {
        RiskLevel::Low => format!("Expected recovery rate {shown}% is healthy."),
        RiskLevel::Medium => format!("Expected recovery rate {shown}% needs attention."),
        RiskLevel::High => format!("Expected recovery rate {shown}% carries a high loss risk."),
    };

    if senior_rights_total > bid / Decimal::TWO {
        reason.push_str(SENIOR_SHARE_WARNING);
    }

    RiskAssessment { level, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rights::{ClaimEvidenceRecord, RightsAnalysisEngine};

    fn assessment_with_mortgage(amount: i64) -> RightsAssessment {
        let mut record = ClaimEvidenceRecord::default();
        record.amounts.senior_mortgage = Decimal::from(amount);
        // Registry lookup with no tenant and a matching address keeps the deposit at zero.
        record.deposit.tenant_registry_available = true;
        RightsAnalysisEngine::default().evaluate(&record, None)
    }

    #[test]
    fn proceeds_after_senior_claims_drive_recovery() {
        let assessment = assessment_with_mortgage(100_000_000);
        let inputs = DistributionInputs {
            expected_winning_bid: Some(Decimal::from(300_000_000)),
            auction_fees: Some(Decimal::from(5_000_000)),
            loan_cap: Some(Decimal::from(240_000_000)),
        };

        let summary = simulate(&assessment, &inputs);
        // senior total is the mortgage plus the 500,000 current-tax default
        assert_eq!(summary.senior_rights_total, Decimal::from(100_500_000));
        assert_eq!(summary.auction_fees, Decimal::from(5_000_000));
        assert_eq!(summary.distributable_amount, Decimal::from(295_000_000));
        assert_eq!(summary.amount_after_senior, Decimal::from(194_500_000));
        assert_eq!(summary.recovery_amount, Decimal::from(194_500_000));
        assert_eq!(summary.recovery_rate, Decimal::new(8104, 2));
        assert_eq!(summary.risk.level, RiskLevel::Low);
        assert_eq!(summary.risk.reason, "Expected recovery rate 81.0% is healthy.");
    }

    #[test]
    fn recovery_is_capped_at_the_loan_cap() {
        let assessment = assessment_with_mortgage(0);
        let inputs = DistributionInputs {
            expected_winning_bid: Some(Decimal::from(500_000_000)),
            auction_fees: None,
            loan_cap: Some(Decimal::from(100_000_000)),
        };

        let summary = simulate(&assessment, &inputs);
        assert_eq!(summary.recovery_amount, Decimal::from(100_000_000));
        assert_eq!(summary.recovery_rate, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn missing_fees_are_estimated_from_the_bid() {
        let assessment = assessment_with_mortgage(0);
        let inputs = DistributionInputs {
            expected_winning_bid: Some(Decimal::from(300_000_000)),
            ..DistributionInputs::default()
        };

        let summary = simulate(&assessment, &inputs);
        assert_eq!(summary.auction_fees, Decimal::from(4_500_000));
        assert_eq!(summary.distributable_amount, Decimal::from(295_500_000));

        // Sub-won results round to whole won.
        let odd_bid = DistributionInputs {
            expected_winning_bid: Some(Decimal::from(1_000_033)),
            ..DistributionInputs::default()
        };
        assert_eq!(simulate(&assessment, &odd_bid).auction_fees, Decimal::from(15_000));
    }

    #[test]
    fn no_loan_cap_recovers_everything_after_senior() {
        let assessment = assessment_with_mortgage(50_000_000);
        let inputs = DistributionInputs {
            expected_winning_bid: Some(Decimal::from(300_000_000)),
            ..DistributionInputs::default()
        };

        let summary = simulate(&assessment, &inputs);
        // 300,000,000 - 4,500,000 fees - 50,500,000 senior
        assert_eq!(summary.amount_after_senior, Decimal::from(245_000_000));
        assert_eq!(summary.recovery_amount, Decimal::from(245_000_000));
        assert_eq!(summary.recovery_rate, Decimal::ONE_HUNDRED);
        assert_eq!(summary.risk.level, RiskLevel::Low);

        let zero_cap = DistributionInputs {
            loan_cap: Some(Decimal::ZERO),
            ..inputs
        };
        assert_eq!(simulate(&assessment, &zero_cap).recovery_rate, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn missing_bid_leaves_nothing_to_distribute() {
        let assessment = assessment_with_mortgage(100_000_000);

        let summary = simulate(&assessment, &DistributionInputs::default());
        assert_eq!(summary.auction_fees, Decimal::ZERO);
        assert_eq!(summary.distributable_amount, Decimal::ZERO);
        assert_eq!(summary.amount_after_senior, Decimal::ZERO);
        assert_eq!(summary.recovery_amount, Decimal::ZERO);
    }

    #[test]
    fn risk_bands_follow_the_recovery_rate() {
        assert_eq!(RiskLevel::from_recovery_rate(Decimal::from(80)), RiskLevel::Low);
        assert_eq!(RiskLevel::from_recovery_rate(Decimal::new(7999, 2)), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_recovery_rate(Decimal::from(50)), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_recovery_rate(Decimal::new(4999, 2)), RiskLevel::High);
    }

    #[test]
    fn heavy_senior_claims_add_a_warning() {
        let assessment = assessment_with_mortgage(200_000_000);
        let inputs = DistributionInputs {
            expected_winning_bid: Some(Decimal::from(300_000_000)),
            loan_cap: Some(Decimal::from(200_000_000)),
            ..DistributionInputs::default()
        };

        let summary = simulate(&assessment, &inputs);
        // 295,500,000 - 200,500,000 leaves 95,000,000 of a 200,000,000 cap
        assert_eq!(summary.recovery_rate, Decimal::new(4750, 2));
        assert_eq!(summary.risk.level, RiskLevel::High);
        assert_eq!(
            summary.risk.reason,
            "Expected recovery rate 47.5% carries a high loss risk. Senior claims exceed 50% of the expected winning bid."
        );

        let light = simulate(&assessment_with_mortgage(10_000_000), &inputs);
        assert!(!light.risk.reason.contains("exceed 50%"));
    }
}
