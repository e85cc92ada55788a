use {
    crate::{Addr, CampaignId, Hash256, Uint128},
    serde::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr, PickFirst},
};

/// One line of a recipient list, as supplied by the campaign operator.
///
/// Amounts may be given either as decimal strings or JSON numbers; they are
/// always written back as strings.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub address: Addr,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub amount: Uint128,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

impl Recipient {
    pub fn new(address: Addr, amount: Uint128) -> Self {
        Self {
            address,
            amount,
            reason: String::new(),
        }
    }

    pub fn with_reason<R>(mut self, reason: R) -> Self
    where
        R: Into<String>,
    {
        self.reason = reason.into();
        self
    }
}

/// An allowlist entry together with its membership proof.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EligibilityEntry {
    pub address: Addr,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Uint128,
    /// Sibling hashes, ordered from leaf to root.
    pub proof: Vec<Hash256>,
}

/// An eligibility entry as distributed to claimants.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecipientProof {
    pub address: Addr,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Uint128,
    pub proof: Vec<Hash256>,
    #[serde(default)]
    pub reason: String,
}

/// The document distributed out-of-band to claimants of an allowlist
/// campaign.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignFile {
    /// `None` until the campaign has been created in a ledger.
    pub campaign_id: Option<CampaignId>,
    #[serde(default)]
    pub campaign_name: String,
    pub merkle_root: Hash256,
    #[serde_as(as = "DisplayFromStr")]
    pub total_amount: Uint128,
    pub recipients: Vec<RecipientProof>,
}

impl CampaignFile {
    /// Find the entry of the given address.
    pub fn find(&self, address: Addr) -> Option<&RecipientProof> {
        self.recipients.iter().find(|entry| entry.address == address)
    }
}

// ----------------------------------- tests -----------------------------------
