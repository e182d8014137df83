use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Price tier for the statutory small-deposit estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmallDepositTier {
    /// Applies when the official price is strictly above this figure.
    pub above: Decimal,
    pub amount: Decimal,
}

/// Figures backing the small-deposit and current-tax estimators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationPolicy {
    /// Checked in order; the first tier whose floor is exceeded wins.
    pub small_deposit_tiers: Vec<SmallDepositTier>,
    pub small_deposit_floor: Decimal,
    pub small_deposit_default: Decimal,
    pub current_tax_rate: Decimal,
    pub current_tax_default: Decimal,
}

impl Default for EstimationPolicy {
    fn default() -> Self {
        Self {
            small_deposit_tiers: vec![
                SmallDepositTier {
                    above: Decimal::from(900_000_000),
                    amount: Decimal::from(55_000_000),
                },
                SmallDepositTier {
                    above: Decimal::from(600_000_000),
                    amount: Decimal::from(37_000_000),
                },
            ],
            small_deposit_floor: Decimal::from(25_000_000),
            small_deposit_default: Decimal::from(55_000_000),
            current_tax_rate: Decimal::new(3, 3),
            current_tax_default: Decimal::from(500_000),
        }
    }
}

impl EstimationPolicy {
    pub fn small_deposit(&self, housing_official_price: Option<Decimal>) -> Decimal {
        let Some(price) = housing_official_price else {
            return self.small_deposit_default;
        };

        self.small_deposit_tiers
            .iter()
            .find(|tier| price > tier.above)
            .map(|tier| tier.amount)
            .unwrap_or(self.small_deposit_floor)
    }

    pub fn current_tax(&self, appraisal_value: Option<Decimal>) -> Decimal {
        match appraisal_value {
            Some(value) => (value * self.current_tax_rate)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven),
            None => self.current_tax_default,
        }
    }
}

/// Statutory small-deposit estimate from the official housing price.
pub fn estimate_small_deposit(housing_official_price: Option<Decimal>) -> Decimal {
    EstimationPolicy::default().small_deposit(housing_official_price)
}

/// Current-year tax estimate from the initial appraisal value.
pub fn estimate_current_tax(appraisal_value: Option<Decimal>) -> Decimal {
    EstimationPolicy::default().current_tax(appraisal_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn won(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn small_deposit_follows_price_tiers() {
        assert_eq!(estimate_small_deposit(Some(won(950_000_000))), won(55_000_000));
        assert_eq!(estimate_small_deposit(Some(won(650_000_000))), won(37_000_000));
        assert_eq!(estimate_small_deposit(Some(won(400_000_000))), won(25_000_000));
        assert_eq!(estimate_small_deposit(None), won(55_000_000));
    }

    #[test]
    fn small_deposit_tier_floors_are_exclusive() {
        assert_eq!(estimate_small_deposit(Some(won(900_000_000))), won(37_000_000));
        assert_eq!(estimate_small_deposit(Some(won(600_000_000))), won(25_000_000));
        assert_eq!(estimate_small_deposit(Some(Decimal::ZERO)), won(25_000_000));
    }

    #[test]
    fn current_tax_is_a_rounded_share_of_appraisal() {
        assert_eq!(estimate_current_tax(Some(won(200_000_000))), won(600_000));
        assert_eq!(estimate_current_tax(Some(won(123_456_789))), won(370_370));
        assert_eq!(estimate_current_tax(None), won(500_000));
    }

    #[test]
    fn current_tax_rounds_half_to_even() {
        // 500 * 0.003 = 1.5 and 2500 * 0.003 = 7.5
        assert_eq!(estimate_current_tax(Some(won(500))), won(2));
        assert_eq!(estimate_current_tax(Some(won(2_500))), won(8));
        // 833.5 * 0.003 = 2.5005 rounds up past the midpoint
        assert_eq!(
            estimate_current_tax(Some(Decimal::new(8335, 1))),
            won(3)
        );
    }

    #[test]
    fn custom_policy_overrides_rate() {
        let policy = EstimationPolicy {
            current_tax_rate: Decimal::new(5, 3),
            ..EstimationPolicy::default()
        };
        assert_eq!(policy.current_tax(Some(won(200_000_000))), won(1_000_000));
    }
}
