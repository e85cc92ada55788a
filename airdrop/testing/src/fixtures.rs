use {
    airdrop_ledger::{ConditionQuerier, Ledger, LedgerStore, MemStore},
    airdrop_merkle::MerkleTree,
    airdrop_types::{
        Addr, CampaignId, CampaignParams, ClaimRequest, Duration, Recipient, Timestamp, Uint128,
    },
};

/// A fixed point in time for tests to start from: 2024-11-28T05:10:02Z.
pub const GENESIS: Timestamp = Timestamp::from_seconds(1_732_770_602);

/// Recipients `Addr::mock(1)` to `Addr::mock(count)`, the i-th receiving
/// `i * 100` tokens.
pub fn mock_recipients(count: u8) -> Vec<Recipient> {
    (1..=count)
        .map(|i| {
            Recipient::new(Addr::mock(i), i as Uint128 * 100).with_reason(format!("recipient #{i}"))
        })
        .collect()
}

/// A ledger backed by a fresh in-memory store.
pub fn mock_ledger() -> Ledger<MemStore> {
    Ledger::new(MemStore::new())
}

/// An allowlist campaign over the given recipients, budgeted at exactly the
/// sum of their amounts and open for 30 days from `GENESIS`.
pub struct Allowlist {
    pub campaign_id: CampaignId,
    pub tree: MerkleTree,
}

impl Allowlist {
    pub fn create<S, Q>(ledger: &Ledger<S, Q>, recipients: Vec<Recipient>) -> Self
    where
        S: LedgerStore,
        Q: ConditionQuerier,
    {
        let tree = MerkleTree::build(recipients).expect("failed to build Merkle tree");

        let params = CampaignParams::merkle(
            "allowlist",
            tree.root(),
            tree.total_amount(),
            Duration::from_days(30),
        )
        .with_start_time(GENESIS);
        let campaign_id = ledger
            .create_campaign(params, GENESIS)
            .expect("failed to create allowlist campaign");

        Self { campaign_id, tree }
    }

    /// A well-formed claim request for the given recipient.
    pub fn request(&self, claimer: Addr) -> ClaimRequest {
        let amount = self.tree.amount(claimer).expect("not a recipient");
        let proof = self.tree.proof(claimer).expect("not a recipient");

        ClaimRequest::allowlist(self.campaign_id, claimer, amount, proof)
    }
}
