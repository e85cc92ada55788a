use {
    crate::{CampaignId, ClaimStatus},
    data_encoding::DecodeError,
    std::any::type_name,
};

/// Errors from encoding, decoding and arithmetic on the primitive types.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StdError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("data is of incorrect length: expecting {expect}, found {actual}")]
    IncorrectLength { expect: usize, actual: usize },

    #[error("arithmetic overflow: {a} {op} {b}")]
    Overflow {
        op: &'static str,
        a: String,
        b: String,
    },

    #[error("failed to serialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Serialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },

    #[error("failed to deserialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Deserialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },
}

impl StdError {
    pub fn incorrect_length(expect: usize, actual: usize) -> Self {
        Self::IncorrectLength { expect, actual }
    }

    pub fn overflow<T>(op: &'static str, a: T, b: T) -> Self
    where
        T: ToString,
    {
        Self::Overflow {
            op,
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn serialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        R: ToString,
    {
        Self::Serialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }

    pub fn deserialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        R: ToString,
    {
        Self::Deserialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }
}

pub type StdResult<T> = core::result::Result<T, StdError>;

/// Errors surfaced by the tree builder and the campaign ledger.
///
/// None of these are fatal: every error is local to one request and leaves the
/// ledger consistent.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AirdropError {
    #[error(transparent)]
    Std(#[from] StdError),

    /// Malformed input, rejected before any state change.
    #[error("validation error: {reason}")]
    Validation { reason: String },

    /// The claim validator rejected the claim. No state was changed.
    #[error("claim rejected: {0}")]
    ClaimRejected(ClaimStatus),

    /// The campaign changed between validation and commit. The caller should
    /// retry the claim.
    #[error("concurrency conflict on campaign {campaign_id}, retry the claim")]
    ConcurrencyConflict { campaign_id: CampaignId },

    #[error("not found: {what}")]
    NotFound { what: String },
}

impl AirdropError {
    pub fn validation<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::Validation {
            reason: reason.to_string(),
        }
    }

    pub fn not_found<W>(what: W) -> Self
    where
        W: ToString,
    {
        Self::NotFound {
            what: what.to_string(),
        }
    }

    pub fn campaign_not_found(campaign_id: CampaignId) -> Self {
        Self::not_found(format!("campaign {campaign_id}"))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }

    /// Return the rejection reason, if this error is a claim rejection.
    pub fn rejection(&self) -> Option<ClaimStatus> {
        match self {
            Self::ClaimRejected(status) => Some(*status),
            _ => None,
        }
    }
}

pub type AirdropResult<T> = core::result::Result<T, AirdropError>;
