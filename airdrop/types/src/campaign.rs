use {
    crate::{Addr, AirdropError, AirdropResult, Duration, Hash256, Timestamp, Uint128},
    serde::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
};

pub type CampaignId = u64;

/// Basis points in 100%.
pub const BPS_ONE: u128 = 10_000;

/// The eligibility model of a campaign, fixed when the campaign is created.
#[serde_as]
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum CampaignKind {
    /// Fixed amount per claim, one claim per address.
    Simple,
    /// Fixed amount per claim, repeated claims subject to a cooldown and an
    /// optional per-user cap.
    Faucet,
    /// Fixed amount per claim; the claimer must meet every condition.
    Conditional(ClaimConditions),
    /// Fixed amount per claim; the claimer must hold enough of a token.
    HolderGated {
        token: Addr,
        #[serde_as(as = "DisplayFromStr")]
        min_balance: Uint128,
    },
    /// Fixed amount per claim; the claimer must own an NFT of the collection.
    #[strum(serialize = "NFTGated")]
    NftGated { collection: Addr },
    /// Allowlist campaign. Each recipient claims the amount committed to in
    /// the Merkle tree, once.
    Merkle { merkle_root: Hash256 },
}

impl CampaignKind {
    pub fn is_allowlist(&self) -> bool {
        matches!(self, CampaignKind::Merkle { .. })
    }

    pub fn merkle_root(&self) -> Option<Hash256> {
        match self {
            CampaignKind::Merkle { merkle_root } => Some(*merkle_root),
            _ => None,
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ClaimConditions {
    /// Minimum balance of the chain's native token.
    #[serde_as(as = "DisplayFromStr")]
    pub min_native_balance: Uint128,
    /// Minimum time since the account was first seen.
    pub min_account_age: Duration,
    /// Whether contract accounts are excluded.
    pub requires_eoa: bool,
    /// If non-empty, the claimer must own an NFT of at least one of these
    /// collections.
    pub required_nfts: Vec<Addr>,
    /// The claimer must meet every one of these token balance requirements.
    pub token_requirements: Vec<TokenRequirement>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenRequirement {
    pub token: Addr,
    #[serde_as(as = "DisplayFromStr")]
    pub min_balance: Uint128,
}

/// A configured, time-bounded token distribution with a budget.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub kind: CampaignKind,
    /// Fixed amount per claim. `None` for allowlist campaigns, where the
    /// amount comes from the recipient list.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub claim_amount: Option<Uint128>,
    #[serde_as(as = "DisplayFromStr")]
    pub total_budget: Uint128,
    #[serde_as(as = "DisplayFromStr")]
    pub claimed_amount: Uint128,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub cooldown_period: Duration,
    /// Zero means unbounded.
    pub max_claims_per_user: u32,
    pub active: bool,
    pub created_at: Timestamp,
}

impl Campaign {
    pub fn remaining_budget(&self) -> Uint128 {
        self.total_budget.saturating_sub(self.claimed_amount)
    }

    pub fn has_started(&self, now: Timestamp) -> bool {
        self.start_time <= now
    }

    pub fn has_ended(&self, now: Timestamp) -> bool {
        now > self.end_time
    }

    /// Whether claims are accepted at all at the given time, disregarding
    /// budget and per-user state.
    pub fn is_currently_active(&self, now: Timestamp) -> bool {
        self.active && self.has_started(now) && !self.has_ended(now)
    }
}

/// Share of the budget already claimed, in basis points.
fn progress_bps(claimed: Uint128, budget: Uint128) -> u128 {
    if budget == 0 {
        return 0;
    }

    claimed
        .checked_mul(BPS_ONE)
        .map(|scaled| scaled / budget)
        .unwrap_or_else(|| claimed / (budget / BPS_ONE).max(1))
}

/// Parameters for creating a campaign.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CampaignParams {
    pub name: String,
    pub kind: CampaignKind,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub claim_amount: Option<Uint128>,
    #[serde_as(as = "DisplayFromStr")]
    pub total_budget: Uint128,
    /// Defaults to the creation time.
    pub start_time: Option<Timestamp>,
    pub duration: Duration,
    pub cooldown_period: Duration,
    pub max_claims_per_user: u32,
}

impl CampaignParams {
    fn fixed<N>(
        name: N,
        kind: CampaignKind,
        claim_amount: Uint128,
        total_budget: Uint128,
        duration: Duration,
    ) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            claim_amount: Some(claim_amount),
            total_budget,
            start_time: None,
            duration,
            cooldown_period: Duration::ZERO,
            max_claims_per_user: 1,
        }
    }

    pub fn simple<N>(name: N, claim_amount: Uint128, total_budget: Uint128, duration: Duration) -> Self
    where
        N: Into<String>,
    {
        Self::fixed(name, CampaignKind::Simple, claim_amount, total_budget, duration)
    }

    pub fn faucet<N>(
        name: N,
        claim_amount: Uint128,
        total_budget: Uint128,
        duration: Duration,
        cooldown_period: Duration,
        max_claims_per_user: u32,
    ) -> Self
    where
        N: Into<String>,
    {
        Self {
            cooldown_period,
            max_claims_per_user,
            ..Self::fixed(name, CampaignKind::Faucet, claim_amount, total_budget, duration)
        }
    }

    pub fn conditional<N>(
        name: N,
        claim_amount: Uint128,
        total_budget: Uint128,
        duration: Duration,
        conditions: ClaimConditions,
    ) -> Self
    where
        N: Into<String>,
    {
        let kind = CampaignKind::Conditional(conditions);
        Self::fixed(name, kind, claim_amount, total_budget, duration)
    }

    pub fn holder_gated<N>(
        name: N,
        claim_amount: Uint128,
        total_budget: Uint128,
        duration: Duration,
        token: Addr,
        min_balance: Uint128,
    ) -> Self
    where
        N: Into<String>,
    {
        let kind = CampaignKind::HolderGated { token, min_balance };
        Self::fixed(name, kind, claim_amount, total_budget, duration)
    }

    pub fn nft_gated<N>(
        name: N,
        claim_amount: Uint128,
        total_budget: Uint128,
        duration: Duration,
        collection: Addr,
    ) -> Self
    where
        N: Into<String>,
    {
        let kind = CampaignKind::NftGated { collection };
        Self::fixed(name, kind, claim_amount, total_budget, duration)
    }

    pub fn merkle<N>(
        name: N,
        merkle_root: Hash256,
        total_amount: Uint128,
        duration: Duration,
    ) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            kind: CampaignKind::Merkle { merkle_root },
            claim_amount: None,
            total_budget: total_amount,
            start_time: None,
            duration,
            cooldown_period: Duration::ZERO,
            max_claims_per_user: 0,
        }
    }

    pub fn with_start_time(mut self, start_time: Timestamp) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_cooldown(mut self, cooldown_period: Duration) -> Self {
        self.cooldown_period = cooldown_period;
        self
    }

    pub fn with_max_claims_per_user(mut self, max_claims_per_user: u32) -> Self {
        self.max_claims_per_user = max_claims_per_user;
        self
    }

    /// Validate the parameters and turn them into a fresh campaign.
    ///
    /// Simple campaigns are normalized to one claim per address with no
    /// cooldown, regardless of what the parameters say. Allowlist campaigns
    /// get no cooldown and no claim cap: an address's single claim is tracked
    /// by its claim record and a repeat is rejected as ineligible.
    pub fn into_campaign(self, id: CampaignId, now: Timestamp) -> AirdropResult<Campaign> {
        if self.name.trim().is_empty() {
            return Err(AirdropError::validation("campaign name must not be empty"));
        }

        if self.total_budget == 0 {
            return Err(AirdropError::validation("total budget must be positive"));
        }

        if self.duration.is_zero() {
            return Err(AirdropError::validation(
                "end time must be after start time",
            ));
        }

        match (&self.kind, self.claim_amount) {
            (CampaignKind::Merkle { .. }, Some(_)) => {
                return Err(AirdropError::validation(
                    "allowlist campaigns take amounts from the recipient list, not a fixed claim amount",
                ));
            },
            (CampaignKind::Merkle { .. }, None) => {},
            (_, None) | (_, Some(0)) => {
                return Err(AirdropError::validation("claim amount must be positive"));
            },
            (_, Some(claim_amount)) if claim_amount > self.total_budget => {
                return Err(AirdropError::validation(format!(
                    "claim amount {claim_amount} exceeds total budget {}",
                    self.total_budget
                )));
            },
            _ => {},
        }

        let start_time = self.start_time.unwrap_or(now);
        let end_time = start_time
            .checked_add(self.duration)
            .ok_or_else(|| AirdropError::validation("end time overflows"))?;

        let (cooldown_period, max_claims_per_user) = match &self.kind {
            CampaignKind::Simple => (Duration::ZERO, 1),
            CampaignKind::Merkle { .. } => (Duration::ZERO, 0),
            _ => (self.cooldown_period, self.max_claims_per_user),
        };

        Ok(Campaign {
            id,
            name: self.name,
            kind: self.kind,
            claim_amount: self.claim_amount,
            total_budget: self.total_budget,
            claimed_amount: 0,
            start_time,
            end_time,
            cooldown_period,
            max_claims_per_user,
            active: true,
            created_at: now,
        })
    }
}

/// Aggregate statistics across every campaign in a ledger.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignSummary {
    pub campaigns: usize,
    pub active_campaigns: usize,
    #[serde_as(as = "DisplayFromStr")]
    pub total_budget: Uint128,
    #[serde_as(as = "DisplayFromStr")]
    pub total_claimed: Uint128,
    pub progress_bps: u128,
}

impl CampaignSummary {
    pub fn from_campaigns<'a, I>(campaigns: I, now: Timestamp) -> Self
    where
        I: IntoIterator<Item = &'a Campaign>,
    {
        let mut summary = campaigns
            .into_iter()
            .fold(Self::default(), |mut summary, campaign| {
                summary.campaigns += 1;
                summary.total_budget = summary.total_budget.saturating_add(campaign.total_budget);
                summary.total_claimed = summary.total_claimed.saturating_add(campaign.claimed_amount);
                if campaign.is_currently_active(now) {
                    summary.active_campaigns += 1;
                }
                summary
            });

        summary.progress_bps = progress_bps(summary.total_claimed, summary.total_budget);
        summary
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{JsonDeExt, JsonSerExt, ResultExt},
        test_case::test_case,
    };

    const NOW: Timestamp = Timestamp::from_seconds(1_000);

    #[test_case(
        CampaignParams::simple("", 50, 100, Duration::from_days(1)),
        "name must not be empty";
        "empty name"
    )]
    #[test_case(
        CampaignParams::simple("x", 50, 0, Duration::from_days(1)),
        "total budget must be positive";
        "zero budget"
    )]
    #[test_case(
        CampaignParams::simple("x", 50, 100, Duration::ZERO),
        "end time must be after start time";
        "zero duration"
    )]
    #[test_case(
        CampaignParams::simple("x", 0, 100, Duration::from_days(1)),
        "claim amount must be positive";
        "zero claim amount"
    )]
    #[test_case(
        CampaignParams::simple("x", 101, 100, Duration::from_days(1)),
        "exceeds total budget";
        "claim amount above budget"
    )]
    #[test_case(
        CampaignParams {
            claim_amount: Some(1),
            ..CampaignParams::merkle("x", Hash256::ZERO, 100, Duration::from_days(1))
        },
        "not a fixed claim amount";
        "allowlist with claim amount"
    )]
    #[test_case(
        CampaignParams::simple("x", 1, 100, Duration::MAX).with_start_time(NOW),
        "end time overflows";
        "end time overflow"
    )]
    fn invalid_params(params: CampaignParams, expect_err: &str) {
        params.into_campaign(1, NOW).should_fail_with_error(expect_err);
    }

    #[test]
    fn simple_campaigns_are_normalized() {
        let campaign = CampaignParams::simple("launch", 50, 100, Duration::from_days(30))
            .with_cooldown(Duration::from_hours(1))
            .with_max_claims_per_user(5)
            .into_campaign(7, NOW)
            .should_succeed();

        assert_eq!(campaign.id, 7);
        assert_eq!(campaign.start_time, NOW);
        assert_eq!(campaign.end_time, NOW + Duration::from_days(30));
        assert_eq!(campaign.cooldown_period, Duration::ZERO);
        assert_eq!(campaign.max_claims_per_user, 1);
        assert_eq!(campaign.claimed_amount, 0);
        assert!(campaign.active);
    }

    #[test]
    fn allowlist_campaigns_have_no_claim_cap() {
        let campaign = CampaignParams::merkle("x", Hash256::ZERO, 100, Duration::from_days(1))
            .with_cooldown(Duration::from_hours(1))
            .with_max_claims_per_user(3)
            .into_campaign(1, NOW)
            .should_succeed();

        assert_eq!(campaign.cooldown_period, Duration::ZERO);
        assert_eq!(campaign.max_claims_per_user, 0);
    }

    #[test]
    fn faucet_campaigns_keep_rate_limits() {
        let campaign = CampaignParams::faucet(
            "faucet",
            10,
            1_000,
            Duration::from_days(30),
            Duration::from_hours(24),
            10,
        )
        .with_start_time(Timestamp::from_seconds(5_000))
        .into_campaign(1, NOW)
        .should_succeed();

        assert_eq!(campaign.cooldown_period, Duration::from_hours(24));
        assert_eq!(campaign.max_claims_per_user, 10);
        assert!(!campaign.has_started(NOW));
        assert!(!campaign.is_currently_active(NOW));
        assert!(campaign.is_currently_active(Timestamp::from_seconds(5_000)));
    }

    #[test]
    fn activity_window_is_inclusive() {
        let campaign = CampaignParams::simple("x", 1, 10, Duration::from_seconds(100))
            .into_campaign(1, NOW)
            .should_succeed();

        assert!(campaign.is_currently_active(NOW));
        assert!(campaign.is_currently_active(NOW + Duration::from_seconds(100)));
        assert!(!campaign.is_currently_active(NOW + Duration::from_seconds(101)));
    }

    #[test]
    fn kind_names() {
        let nft = CampaignKind::NftGated {
            collection: Addr::mock(1),
        };

        assert_eq!(CampaignKind::Simple.to_string(), "Simple");
        assert_eq!(nft.to_string(), "NFTGated");
        assert_eq!(
            nft.to_json_string().should_succeed(),
            format!(r#"{{"nft_gated":{{"collection":"{}"}}}}"#, Addr::mock(1))
        );
    }

    #[test]
    fn amounts_serialize_as_strings() {
        let campaign = CampaignParams::merkle(
            "allowlist",
            Hash256::ZERO,
            100_000_000_000_000_000_000,
            Duration::from_days(30),
        )
        .into_campaign(1, NOW)
        .should_succeed();

        let json = campaign.to_json_string().should_succeed();
        assert!(json.contains(r#""total_budget":"100000000000000000000""#));
        assert!(json.contains(r#""claim_amount":null"#));

        json.deserialize_json::<Campaign>()
            .should_succeed_and_equal(campaign);
    }

    #[test]
    fn summary_across_campaigns() {
        let mut a = CampaignParams::simple("a", 50, 100, Duration::from_days(1))
            .into_campaign(1, NOW)
            .should_succeed();
        let mut b = CampaignParams::simple("b", 50, 300, Duration::from_days(1))
            .into_campaign(2, NOW)
            .should_succeed();

        a.claimed_amount = 100;
        b.active = false;

        let summary = CampaignSummary::from_campaigns([&a, &b], NOW);

        assert_eq!(summary, CampaignSummary {
            campaigns: 2,
            active_campaigns: 1,
            total_budget: 400,
            total_claimed: 100,
            progress_bps: 2_500,
        });
    }
}
