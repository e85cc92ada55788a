use {
    crate::{hash_leaf, hash_pair},
    airdrop_types::{
        Addr, AirdropError, AirdropResult, CampaignFile, CampaignId, EligibilityEntry, Hash256,
        Recipient, RecipientProof, Uint128,
    },
    std::collections::BTreeMap,
};

/// A Merkle tree over a recipient list.
///
/// Leaves are sorted before the tree is built, and sibling pairs are sorted
/// before hashing, so the root only depends on the set of `(address, amount)`
/// pairs, not on their order in the input. At each level, an unpaired last
/// node is promoted to the next level unchanged.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// `layers[0]` are the sorted leaves; the last layer holds just the root.
    layers: Vec<Vec<Hash256>>,
    /// Recipients, in input order.
    recipients: Vec<Recipient>,
    /// Address => (index in `recipients`, index in `layers[0]`).
    positions: BTreeMap<Addr, (usize, usize)>,
    total_amount: Uint128,
}

impl MerkleTree {
    pub fn build(recipients: Vec<Recipient>) -> AirdropResult<Self> {
        if recipients.is_empty() {
            return Err(AirdropError::validation("recipient list is empty"));
        }

        let mut total_amount: Uint128 = 0;
        let mut leaves = Vec::with_capacity(recipients.len());
        let mut input_positions = BTreeMap::new();

        for (index, recipient) in recipients.iter().enumerate() {
            if recipient.address.inner() == &[0; 20] {
                return Err(AirdropError::validation("zero address is not allowed"));
            }

            if recipient.amount == 0 {
                return Err(AirdropError::validation(format!(
                    "amount must be positive for recipient {}",
                    recipient.address
                )));
            }

            if input_positions.insert(recipient.address, index).is_some() {
                return Err(AirdropError::validation(format!(
                    "duplicate recipient {}",
                    recipient.address
                )));
            }

            total_amount = total_amount.checked_add(recipient.amount).ok_or_else(|| {
                AirdropError::validation("total amount overflows 128-bit unsigned integer")
            })?;

            leaves.push((hash_leaf(recipient.address, recipient.amount), recipient.address));
        }

        // Addresses are unique, so leaves are too, and sorting is total.
        leaves.sort();

        let positions = leaves
            .iter()
            .enumerate()
            .map(|(leaf_index, (_, address))| (*address, (input_positions[address], leaf_index)))
            .collect();

        let mut layers = vec![leaves.into_iter().map(|(leaf, _)| leaf).collect::<Vec<_>>()];
        while let Some(layer) = layers.last().filter(|layer| layer.len() > 1) {
            let next = layer
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => hash_pair(*a, *b),
                    [a] => *a,
                    _ => unreachable!("chunks of two are never empty"),
                })
                .collect();
            layers.push(next);
        }

        tracing::debug!(
            recipients = recipients.len(),
            depth = layers.len() - 1,
            "Built Merkle tree"
        );

        Ok(Self {
            layers,
            recipients,
            positions,
            total_amount,
        })
    }

    pub fn root(&self) -> Hash256 {
        // `build` guarantees there's at least one layer with exactly one node
        // at the top.
        self.layers[self.layers.len() - 1][0]
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    pub fn total_amount(&self) -> Uint128 {
        self.total_amount
    }

    pub fn amount(&self, address: Addr) -> Option<Uint128> {
        self.positions
            .get(&address)
            .map(|(input_index, _)| self.recipients[*input_index].amount)
    }

    /// The proof of the given address, ordered from leaf to root.
    pub fn proof(&self, address: Addr) -> Option<Vec<Hash256>> {
        self.positions
            .get(&address)
            .map(|(_, leaf_index)| self.proof_at(*leaf_index))
    }

    fn proof_at(&self, mut index: usize) -> Vec<Hash256> {
        let mut proof = Vec::with_capacity(self.layers.len() - 1);

        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = index ^ 1;
            // An unpaired last node has no sibling at this level.
            if sibling < layer.len() {
                proof.push(layer[sibling]);
            }
            index /= 2;
        }

        proof
    }

    /// Every recipient with their proof, in input order.
    pub fn entries(&self) -> Vec<EligibilityEntry> {
        self.recipients
            .iter()
            .map(|recipient| EligibilityEntry {
                address: recipient.address,
                amount: recipient.amount,
                proof: self.proof(recipient.address).unwrap_or_default(),
            })
            .collect()
    }

    /// Produce the document distributed to claimants.
    pub fn campaign_file<N>(&self, campaign_id: Option<CampaignId>, campaign_name: N) -> CampaignFile
    where
        N: Into<String>,
    {
        let recipients = self
            .recipients
            .iter()
            .map(|recipient| RecipientProof {
                address: recipient.address,
                amount: recipient.amount,
                proof: self.proof(recipient.address).unwrap_or_default(),
                reason: recipient.reason.clone(),
            })
            .collect();

        CampaignFile {
            campaign_id,
            campaign_name: campaign_name.into(),
            merkle_root: self.root(),
            total_amount: self.total_amount,
            recipients,
        }
    }
}

/// Rebuild the tree from a campaign file and check it commits to the root
/// the file claims.
pub fn rebuild_campaign_file(file: &CampaignFile) -> AirdropResult<MerkleTree> {
    let recipients = file
        .recipients
        .iter()
        .map(|entry| Recipient::new(entry.address, entry.amount).with_reason(entry.reason.clone()))
        .collect();

    let tree = MerkleTree::build(recipients)?;

    if tree.root() != file.merkle_root {
        return Err(AirdropError::validation(format!(
            "campaign file root {} doesn't match recipient list root {}",
            file.merkle_root,
            tree.root()
        )));
    }

    if tree.total_amount() != file.total_amount {
        return Err(AirdropError::validation(format!(
            "campaign file total amount {} doesn't match recipient list total {}",
            file.total_amount,
            tree.total_amount()
        )));
    }

    Ok(tree)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{keccak256, verify_proof},
        airdrop_types::ResultExt,
        test_case::test_case,
    };

    fn recipients(amounts: &[Uint128]) -> Vec<Recipient> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| Recipient::new(Addr::mock(i as u8 + 1), *amount))
            .collect()
    }

    #[test]
    fn single_recipient() {
        let tree = MerkleTree::build(recipients(&[100])).should_succeed();

        assert_eq!(tree.root(), hash_leaf(Addr::mock(1), 100));
        assert_eq!(tree.proof(Addr::mock(1)), Some(vec![]));
        assert_eq!(tree.total_amount(), 100);
    }

    #[test]
    fn two_recipients() {
        let tree = MerkleTree::build(recipients(&[100, 50])).should_succeed();

        let leaf1 = hash_leaf(Addr::mock(1), 100);
        let leaf2 = hash_leaf(Addr::mock(2), 50);

        assert_eq!(tree.root(), hash_pair(leaf1, leaf2));
        assert_eq!(tree.proof(Addr::mock(1)), Some(vec![leaf2]));
        assert_eq!(tree.proof(Addr::mock(2)), Some(vec![leaf1]));
        assert_eq!(tree.total_amount(), 150);

        let proof = tree.proof(Addr::mock(1)).unwrap();
        assert!(verify_proof(tree.root(), Addr::mock(1), 100, &proof));
        assert!(!verify_proof(tree.root(), Addr::mock(1), 99, &proof));
        assert!(!verify_proof(tree.root(), Addr::mock(2), 100, &proof));
    }

    #[test]
    fn odd_node_is_promoted() {
        let tree = MerkleTree::build(recipients(&[1, 2, 3])).should_succeed();

        let mut leaves = [
            hash_leaf(Addr::mock(1), 1),
            hash_leaf(Addr::mock(2), 2),
            hash_leaf(Addr::mock(3), 3),
        ];
        leaves.sort();

        let expect = hash_pair(hash_pair(leaves[0], leaves[1]), leaves[2]);
        assert_eq!(tree.root(), expect);

        // The promoted leaf's proof skips the level where it had no sibling.
        let lone = [1, 2, 3]
            .into_iter()
            .map(Addr::mock)
            .find(|addr| tree.proof(*addr).is_some_and(|proof| proof.len() == 1))
            .unwrap();
        assert_eq!(tree.proof(lone), Some(vec![hash_pair(leaves[0], leaves[1])]));
    }

    #[test_case(&[1, 2, 3, 4, 5, 6, 7] ; "seven recipients")]
    #[test_case(&[10; 16] ; "sixteen recipients")]
    #[test_case(&[u128::MAX / 2, u128::MAX / 2] ; "large amounts")]
    fn every_entry_verifies(amounts: &[Uint128]) {
        let tree = MerkleTree::build(recipients(amounts)).should_succeed();
        let entries = tree.entries();

        assert_eq!(entries.len(), amounts.len());

        for (entry, amount) in entries.iter().zip(amounts) {
            assert_eq!(entry.amount, *amount);
            assert!(verify_proof(tree.root(), entry.address, entry.amount, &entry.proof));
        }
    }

    #[test]
    fn input_order_is_irrelevant() {
        let forward = recipients(&[5, 4, 3, 2, 1]);
        let mut backward = forward.clone();
        backward.reverse();

        let a = MerkleTree::build(forward).should_succeed();
        let b = MerkleTree::build(backward).should_succeed();

        assert_eq!(a.root(), b.root());
        assert_eq!(a.proof(Addr::mock(3)), b.proof(Addr::mock(3)));
    }

    #[test_case(vec![], "recipient list is empty" ; "empty list")]
    #[test_case(recipients(&[1, 0]), "amount must be positive" ; "zero amount")]
    #[test_case(
        vec![Recipient::new(Addr::mock(0), 1)],
        "zero address is not allowed" ;
        "zero address"
    )]
    #[test_case(
        vec![Recipient::new(Addr::mock(1), 1), Recipient::new(Addr::mock(1), 2)],
        "duplicate recipient" ;
        "duplicate address"
    )]
    #[test_case(recipients(&[u128::MAX, 1]), "total amount overflows" ; "total overflow")]
    fn invalid_recipient_lists(recipients: Vec<Recipient>, expect_err: &str) {
        MerkleTree::build(recipients).should_fail_with_error(expect_err);
    }

    #[test]
    fn campaign_file_round_trip() {
        let list = recipients(&[100, 50])
            .into_iter()
            .map(|r| r.with_reason("early supporter"))
            .collect();
        let tree = MerkleTree::build(list).should_succeed();
        let file = tree.campaign_file(Some(1), "launch");

        assert_eq!(file.merkle_root, tree.root());
        assert_eq!(file.total_amount, 150);
        assert_eq!(file.recipients[0].reason, "early supporter");

        rebuild_campaign_file(&file)
            .should_succeed_and(|rebuilt| rebuilt.root() == tree.root());

        let mut tampered = file.clone();
        tampered.recipients[1].amount = 51;
        rebuild_campaign_file(&tampered).should_fail_with_error("doesn't match");

        let mut tampered = file;
        tampered.merkle_root = keccak256(b"forged");
        rebuild_campaign_file(&tampered).should_fail_with_error("doesn't match");
    }
}
