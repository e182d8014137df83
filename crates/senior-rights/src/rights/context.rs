use serde::{Deserialize, Serialize};

use super::category::PropertyCategory;
use super::domain::{AuctionContext, AuctionStatus, ClaimEvidenceRecord, PropertyDescriptor};

/// Auction phase with the claim deadline folded in.
///
/// The deadline only means something once the auction has opened, so the
/// not-opened phase carries no deadline variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStage {
    NotOpened,
    /// Opened, claim deadline not yet passed.
    ClaimsOpen,
    /// Opened, claim deadline passed.
    ClaimsClosed,
}

impl AuctionStage {
    pub const ALL: [AuctionStage; 3] = [
        AuctionStage::NotOpened,
        AuctionStage::ClaimsOpen,
        AuctionStage::ClaimsClosed,
    ];

    pub fn from_auction(auction: &AuctionContext) -> Self {
        match (auction.status, auction.claim_deadline_passed) {
            (AuctionStatus::NotOpened, _) => Self::NotOpened,
            (AuctionStatus::Opened, false) => Self::ClaimsOpen,
            (AuctionStatus::Opened, true) => Self::ClaimsClosed,
        }
    }

    pub const fn status(self) -> AuctionStatus {
        match self {
            AuctionStage::NotOpened => AuctionStatus::NotOpened,
            AuctionStage::ClaimsOpen | AuctionStage::ClaimsClosed => AuctionStatus::Opened,
        }
    }

    pub const fn claim_deadline_passed(self) -> bool {
        matches!(self, AuctionStage::ClaimsClosed)
    }
}

/// Shared context derived once per evaluation and handed to every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    pub category: PropertyCategory,
    pub stage: AuctionStage,
}

impl RuleContext {
    pub fn derive(record: &ClaimEvidenceRecord, property: Option<&PropertyDescriptor>) -> Self {
        Self {
            category: PropertyCategory::categorize(property),
            stage: AuctionStage::from_auction(&record.auction),
        }
    }
}
