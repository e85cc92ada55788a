use {
    crate::{Addr, AirdropError, AirdropResult, CampaignId, Hash256, StdError, Timestamp, Uint128},
    serde::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
};

/// Outcome of validating a claim.
///
/// The string forms (`"CampaignEnded"`, `"BudgetExhausted"`, ...) are the
/// contract with any calling UI or CLI, and are stable.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
)]
pub enum ClaimStatus {
    /// The claim may proceed and must be recorded in the ledger.
    Eligible,
    /// The campaign is inactive, hasn't started, or has ended.
    CampaignEnded,
    /// The remaining budget can't cover the claim.
    BudgetExhausted,
    /// The claimer has used up the per-user claim allowance.
    MaxClaimsReached,
    /// The claimer claimed too recently.
    CooldownActive,
    /// Invalid Merkle proof, already claimed from an allowlist, or gating
    /// conditions not met.
    Ineligible,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    pub fn is_eligible(&self) -> bool {
        *self == ClaimStatus::Eligible
    }

    /// Convert into a result: `Ok` if eligible, `ClaimRejected` otherwise.
    pub fn into_result(self) -> AirdropResult<()> {
        if self.is_eligible() {
            Ok(())
        } else {
            Err(AirdropError::ClaimRejected(self))
        }
    }
}

/// Per user, per campaign claim history.
///
/// An address that has never claimed is represented by the default (zero)
/// record rather than an error.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClaimRecord {
    pub claim_count: u32,
    pub last_claim_time: Option<Timestamp>,
    #[serde_as(as = "DisplayFromStr")]
    pub total_claimed: Uint128,
}

impl ClaimRecord {
    pub fn has_claimed(&self) -> bool {
        self.claim_count > 0
    }

    /// Return the record after one more claim of `amount` at `now`.
    pub fn after_claim(&self, amount: Uint128, now: Timestamp) -> AirdropResult<Self> {
        let claim_count = self
            .claim_count
            .checked_add(1)
            .ok_or_else(|| StdError::overflow("+", self.claim_count, 1))?;
        let total_claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or_else(|| StdError::overflow("+", self.total_claimed, amount))?;

        Ok(Self {
            claim_count,
            last_claim_time: Some(now),
            total_claimed,
        })
    }
}

/// A single request by an address to receive tokens from a campaign.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    pub campaign_id: CampaignId,
    pub claimer: Addr,
    /// Amount committed to in the allowlist. Ignored for fixed-amount
    /// campaigns.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub amount: Option<Uint128>,
    /// Merkle proof, from leaf to root. Empty for fixed-amount campaigns.
    #[serde(default)]
    pub proof: Vec<Hash256>,
}

impl ClaimRequest {
    pub fn new(campaign_id: CampaignId, claimer: Addr) -> Self {
        Self {
            campaign_id,
            claimer,
            amount: None,
            proof: Vec::new(),
        }
    }

    pub fn allowlist(
        campaign_id: CampaignId,
        claimer: Addr,
        amount: Uint128,
        proof: Vec<Hash256>,
    ) -> Self {
        Self {
            campaign_id,
            claimer,
            amount: Some(amount),
            proof,
        }
    }
}

/// A user's claim history in a campaign together with their current
/// eligibility.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserClaimInfo {
    pub claim_count: u32,
    pub last_claim_time: Option<Timestamp>,
    #[serde_as(as = "DisplayFromStr")]
    pub total_claimed: Uint128,
    pub can_claim_now: bool,
    /// When the cooldown expires, if a cooldown is what blocks the claim.
    pub next_claim_time: Option<Timestamp>,
    pub status: ClaimStatus,
}

impl UserClaimInfo {
    pub fn new(record: ClaimRecord, status: ClaimStatus, next_claim_time: Option<Timestamp>) -> Self {
        Self {
            claim_count: record.claim_count,
            last_claim_time: record.last_claim_time,
            total_claimed: record.total_claimed,
            can_claim_now: status.is_eligible(),
            next_claim_time,
            status,
        }
    }
}

// ----------------------------------- tests -----------------------------------
