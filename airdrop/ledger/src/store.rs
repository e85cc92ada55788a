use {
    airdrop_types::{Addr, AirdropError, AirdropResult, Campaign, CampaignId, ClaimRecord},
    serde::{Deserialize, Serialize},
    std::{
        collections::BTreeMap,
        sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
    },
};

/// A claim that has passed validation, ready to be committed.
///
/// The store applies `campaign` and `record` only if the state it holds still
/// equals the observed snapshots the claim was validated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimCommit {
    pub claimer: Addr,
    pub observed_campaign: Campaign,
    pub observed_record: ClaimRecord,
    pub campaign: Campaign,
    pub record: ClaimRecord,
}

/// Persistent state behind a [`Ledger`](crate::Ledger).
///
/// Implementations must make `commit_claim` a single indivisible step: no
/// reader may observe the campaign update without the claim record update,
/// or the other way around.
pub trait LedgerStore {
    /// Allocate the next campaign ID. IDs start from 1 and are never reused.
    fn next_campaign_id(&self) -> AirdropResult<CampaignId>;

    fn load_campaign(&self, campaign_id: CampaignId) -> AirdropResult<Option<Campaign>>;

    fn save_campaign(&self, campaign: &Campaign) -> AirdropResult<()>;

    /// Set the campaign's `active` flag in place, leaving every other field
    /// as currently stored. Returns the updated campaign, or `None` if it
    /// doesn't exist.
    fn set_active(&self, campaign_id: CampaignId, active: bool) -> AirdropResult<Option<Campaign>>;

    fn load_claim(&self, campaign_id: CampaignId, claimer: Addr) -> AirdropResult<Option<ClaimRecord>>;

    /// All campaigns, in ascending order of ID.
    fn campaigns(&self) -> AirdropResult<Vec<Campaign>>;

    /// All claim records of a campaign, in ascending order of address.
    fn claims(&self, campaign_id: CampaignId) -> AirdropResult<Vec<(Addr, ClaimRecord)>>;

    /// Compare-and-swap the campaign and the claimer's record. Fails with
    /// `ConcurrencyConflict` if either changed since it was observed.
    fn commit_claim(&self, commit: ClaimCommit) -> AirdropResult<()>;
}

/// Serializable contents of a [`MemStore`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LedgerSnapshot {
    /// The most recently assigned campaign ID. Zero if none.
    pub last_campaign_id: CampaignId,
    pub campaigns: BTreeMap<CampaignId, Campaign>,
    pub claims: BTreeMap<CampaignId, BTreeMap<Addr, ClaimRecord>>,
}

/// An in-memory ledger store. Clones share the same underlying state.
#[derive(Clone, Default)]
pub struct MemStore {
    inner: Arc<RwLock<LedgerSnapshot>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(snapshot)),
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.with_read(|inner| inner.clone())
    }

    fn with_read<C, T>(&self, callback: C) -> T
    where
        C: FnOnce(RwLockReadGuard<LedgerSnapshot>) -> T,
    {
        let lock = self.inner.read().unwrap_or_else(|err| {
            panic!("MemStore is poisoned: {err:?}");
        });
        callback(lock)
    }

    fn with_write<C, T>(&self, callback: C) -> T
    where
        C: FnOnce(RwLockWriteGuard<LedgerSnapshot>) -> T,
    {
        let lock = self.inner.write().unwrap_or_else(|err| {
            panic!("MemStore is poisoned: {err:?}");
        });
        callback(lock)
    }
}

impl LedgerStore for MemStore {
    fn next_campaign_id(&self) -> AirdropResult<CampaignId> {
        self.with_write(|mut inner| {
            inner.last_campaign_id = inner
                .last_campaign_id
                .checked_add(1)
                .ok_or_else(|| AirdropError::validation("campaign ID space exhausted"))?;
            Ok(inner.last_campaign_id)
        })
    }

    fn load_campaign(&self, campaign_id: CampaignId) -> AirdropResult<Option<Campaign>> {
        Ok(self.with_read(|inner| inner.campaigns.get(&campaign_id).cloned()))
    }

    fn save_campaign(&self, campaign: &Campaign) -> AirdropResult<()> {
        self.with_write(|mut inner| {
            inner.campaigns.insert(campaign.id, campaign.clone());
        });
        Ok(())
    }

    fn set_active(&self, campaign_id: CampaignId, active: bool) -> AirdropResult<Option<Campaign>> {
        Ok(self.with_write(|mut inner| {
            inner.campaigns.get_mut(&campaign_id).map(|campaign| {
                campaign.active = active;
                campaign.clone()
            })
        }))
    }

    fn load_claim(&self, campaign_id: CampaignId, claimer: Addr) -> AirdropResult<Option<ClaimRecord>> {
        Ok(self.with_read(|inner| {
            inner
                .claims
                .get(&campaign_id)
                .and_then(|claims| claims.get(&claimer))
                .copied()
        }))
    }

    fn campaigns(&self) -> AirdropResult<Vec<Campaign>> {
        Ok(self.with_read(|inner| inner.campaigns.values().cloned().collect()))
    }

    fn claims(&self, campaign_id: CampaignId) -> AirdropResult<Vec<(Addr, ClaimRecord)>> {
        Ok(self.with_read(|inner| {
            inner
                .claims
                .get(&campaign_id)
                .map(|claims| claims.iter().map(|(addr, record)| (*addr, *record)).collect())
                .unwrap_or_default()
        }))
    }

    fn commit_claim(&self, commit: ClaimCommit) -> AirdropResult<()> {
        let campaign_id = commit.campaign.id;

        self.with_write(|mut inner| {
            let current_campaign = inner.campaigns.get(&campaign_id);
            let current_record = inner
                .claims
                .get(&campaign_id)
                .and_then(|claims| claims.get(&commit.claimer))
                .copied()
                .unwrap_or_default();

            if current_campaign != Some(&commit.observed_campaign)
                || current_record != commit.observed_record
            {
                return Err(AirdropError::ConcurrencyConflict { campaign_id });
            }

            inner.campaigns.insert(campaign_id, commit.campaign);
            inner
                .claims
                .entry(campaign_id)
                .or_default()
                .insert(commit.claimer, commit.record);

            Ok(())
        })
    }
}

// ----------------------------------- tests -----------------------------------
