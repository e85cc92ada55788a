use {
    airdrop_types::{
        Addr, CampaignKind, ClaimConditions, Duration, Timestamp, TokenRequirement, Uint128,
    },
    serde::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
    std::collections::{BTreeMap, BTreeSet},
};

/// Read access to the on-chain facts that gated campaigns depend on.
pub trait ConditionQuerier {
    fn native_balance(&self, address: Addr) -> Uint128;

    fn token_balance(&self, token: Addr, address: Addr) -> Uint128;

    fn owns_nft(&self, collection: Addr, address: Addr) -> bool;

    /// When the account was first observed. `None` if never.
    fn first_seen(&self, address: Addr) -> Option<Timestamp>;

    fn is_contract(&self, address: Addr) -> bool;

    /// Time since the account was first observed. Zero for unknown accounts.
    fn account_age(&self, address: Addr, now: Timestamp) -> Duration {
        self.first_seen(address)
            .map(|first_seen| now - first_seen)
            .unwrap_or(Duration::ZERO)
    }
}

/// A snapshot of balances and account facts, loadable from JSON.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Holdings {
    /// Address => native token balance.
    #[serde_as(as = "BTreeMap<_, DisplayFromStr>")]
    pub native: BTreeMap<Addr, Uint128>,
    /// Token => address => balance.
    #[serde_as(as = "BTreeMap<_, BTreeMap<_, DisplayFromStr>>")]
    pub tokens: BTreeMap<Addr, BTreeMap<Addr, Uint128>>,
    /// Collection => owners.
    pub nfts: BTreeMap<Addr, BTreeSet<Addr>>,
    pub first_seen: BTreeMap<Addr, Timestamp>,
    pub contracts: BTreeSet<Addr>,
}

impl ConditionQuerier for Holdings {
    fn native_balance(&self, address: Addr) -> Uint128 {
        self.native.get(&address).copied().unwrap_or(0)
    }

    fn token_balance(&self, token: Addr, address: Addr) -> Uint128 {
        self.tokens
            .get(&token)
            .and_then(|balances| balances.get(&address))
            .copied()
            .unwrap_or(0)
    }

    fn owns_nft(&self, collection: Addr, address: Addr) -> bool {
        self.nfts
            .get(&collection)
            .is_some_and(|owners| owners.contains(&address))
    }

    fn first_seen(&self, address: Addr) -> Option<Timestamp> {
        self.first_seen.get(&address).copied()
    }

    fn is_contract(&self, address: Addr) -> bool {
        self.contracts.contains(&address)
    }
}

/// The conditions a claimer must meet for campaigns of the given kind, or
/// `None` if the kind isn't gated.
pub fn gating_conditions(kind: &CampaignKind) -> Option<ClaimConditions> {
    match kind {
        CampaignKind::Conditional(conditions) => Some(conditions.clone()),
        CampaignKind::HolderGated { token, min_balance } => Some(ClaimConditions {
            token_requirements: vec![TokenRequirement {
                token: *token,
                min_balance: *min_balance,
            }],
            ..Default::default()
        }),
        CampaignKind::NftGated { collection } => Some(ClaimConditions {
            required_nfts: vec![*collection],
            ..Default::default()
        }),
        CampaignKind::Simple | CampaignKind::Faucet | CampaignKind::Merkle { .. } => None,
    }
}

/// Each claim condition evaluated separately for one address.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConditionReport {
    pub meets_native_balance: bool,
    pub is_eoa: bool,
    pub meets_account_age: bool,
    pub owns_required_nft: bool,
    pub meets_token_balances: bool,
    pub overall_result: bool,
    /// The first condition that failed, if any.
    pub failure_reason: Option<String>,
}

impl ConditionReport {
    pub fn check<Q>(conditions: &ClaimConditions, querier: &Q, address: Addr, now: Timestamp) -> Self
    where
        Q: ConditionQuerier + ?Sized,
    {
        let mut failures = Vec::new();

        let meets_native_balance = querier.native_balance(address) >= conditions.min_native_balance;
        if !meets_native_balance {
            failures.push(format!(
                "native balance below {}",
                conditions.min_native_balance
            ));
        }

        let is_eoa = !querier.is_contract(address);
        if conditions.requires_eoa && !is_eoa {
            failures.push("contract accounts are not allowed".to_string());
        }

        let meets_account_age = querier.account_age(address, now) >= conditions.min_account_age;
        if !meets_account_age {
            failures.push(format!(
                "account younger than {} seconds",
                conditions.min_account_age
            ));
        }

        let owns_required_nft = conditions.required_nfts.is_empty()
            || conditions
                .required_nfts
                .iter()
                .any(|collection| querier.owns_nft(*collection, address));
        if !owns_required_nft {
            failures.push("no NFT of a required collection".to_string());
        }

        let meets_token_balances = match conditions
            .token_requirements
            .iter()
            .find(|req| querier.token_balance(req.token, address) < req.min_balance)
        {
            Some(req) => {
                failures.push(format!(
                    "balance of token {} below {}",
                    req.token, req.min_balance
                ));
                false
            },
            None => true,
        };

        Self {
            meets_native_balance,
            is_eoa,
            meets_account_age,
            owns_required_nft,
            meets_token_balances,
            overall_result: failures.is_empty(),
            failure_reason: failures.into_iter().next(),
        }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        airdrop_types::{JsonDeExt, ResultExt},
    };

    const NOW: Timestamp = Timestamp::from_seconds(1_000_000);

    fn holdings() -> Holdings {
        r#"{
            "native": {
                "0x0000000000000000000000000000000000000001": "1000"
            },
            "tokens": {
                "0x00000000000000000000000000000000000000aa": {
                    "0x0000000000000000000000000000000000000001": "500"
                }
            },
            "nfts": {
                "0x00000000000000000000000000000000000000bb": [
                    "0x0000000000000000000000000000000000000001"
                ]
            },
            "first_seen": {
                "0x0000000000000000000000000000000000000001": 0,
                "0x0000000000000000000000000000000000000002": 999000
            },
            "contracts": ["0x0000000000000000000000000000000000000003"]
        }"#
        .deserialize_json()
        .should_succeed()
    }

    #[test]
    fn holdings_answer_queries() {
        let holdings = holdings();

        assert_eq!(holdings.native_balance(Addr::mock(1)), 1000);
        assert_eq!(holdings.native_balance(Addr::mock(2)), 0);
        assert_eq!(holdings.token_balance(Addr::mock(0xaa), Addr::mock(1)), 500);
        assert_eq!(holdings.token_balance(Addr::mock(0xcc), Addr::mock(1)), 0);
        assert!(holdings.owns_nft(Addr::mock(0xbb), Addr::mock(1)));
        assert!(!holdings.owns_nft(Addr::mock(0xbb), Addr::mock(2)));
        assert!(holdings.is_contract(Addr::mock(3)));
        assert_eq!(holdings.account_age(Addr::mock(2), NOW), Duration::from_seconds(1_000));
        assert_eq!(holdings.account_age(Addr::mock(9), NOW), Duration::ZERO);
    }

    #[test]
    fn all_conditions_met() {
        let conditions = ClaimConditions {
            min_native_balance: 1000,
            min_account_age: Duration::from_days(7),
            requires_eoa: true,
            required_nfts: vec![Addr::mock(0xcc), Addr::mock(0xbb)],
            token_requirements: vec![TokenRequirement {
                token: Addr::mock(0xaa),
                min_balance: 500,
            }],
        };

        let report = ConditionReport::check(&conditions, &holdings(), Addr::mock(1), NOW);

        assert!(report.overall_result);
        assert_eq!(report.failure_reason, None);
    }

    #[test]
    fn first_failure_is_reported() {
        let conditions = ClaimConditions {
            min_account_age: Duration::from_days(7),
            requires_eoa: true,
            ..Default::default()
        };

        let report = ConditionReport::check(&conditions, &holdings(), Addr::mock(3), NOW);

        assert!(!report.overall_result);
        assert!(!report.is_eoa);
        assert!(!report.meets_account_age);
        assert!(report.meets_native_balance);
        assert_eq!(
            report.failure_reason.as_deref(),
            Some("contract accounts are not allowed")
        );
    }

    #[test]
    fn gated_kinds_become_conditions() {
        let holder = CampaignKind::HolderGated {
            token: Addr::mock(0xaa),
            min_balance: 501,
        };
        let nft = CampaignKind::NftGated {
            collection: Addr::mock(0xbb),
        };

        assert!(gating_conditions(&CampaignKind::Faucet).is_none());

        let report = ConditionReport::check(
            &gating_conditions(&holder).unwrap(),
            &holdings(),
            Addr::mock(1),
            NOW,
        );
        assert!(!report.meets_token_balances);

        let report = ConditionReport::check(
            &gating_conditions(&nft).unwrap(),
            &holdings(),
            Addr::mock(1),
            NOW,
        );
        assert!(report.overall_result);
    }
}
