use {
    crate::{gating_conditions, ConditionQuerier, ConditionReport},
    airdrop_merkle::verify_proof,
    airdrop_types::{Campaign, CampaignKind, ClaimRecord, ClaimRequest, ClaimStatus, Timestamp, Uint128},
};

/// The amount a request would claim from the campaign, if determinable.
///
/// Fixed-amount campaigns pay their configured amount regardless of what the
/// request says; allowlist campaigns pay the amount the request commits to.
pub fn claim_amount(campaign: &Campaign, request: &ClaimRequest) -> Option<Uint128> {
    match campaign.kind {
        CampaignKind::Merkle { .. } => request.amount,
        _ => campaign.claim_amount,
    }
}

/// Decide whether a claim may proceed.
///
/// The checks run in a fixed order and the first failing one determines the
/// result, so terminal reasons (campaign over, budget gone) are reported
/// before transient ones (cooldown):
///
/// 1. outside `[start_time, end_time]` or deactivated => `CampaignEnded`
/// 2. remaining budget below the claim amount, or none left when the amount
///    is unknown => `BudgetExhausted`
/// 3. per-user claim cap reached => `MaxClaimsReached`
/// 4. within the cooldown of the last claim => `CooldownActive`
/// 5. invalid proof, already claimed from an allowlist, or gating conditions
///    not met => `Ineligible`
pub fn validate_claim<Q>(
    campaign: &Campaign,
    record: &ClaimRecord,
    request: &ClaimRequest,
    querier: &Q,
    now: Timestamp,
) -> ClaimStatus
where
    Q: ConditionQuerier + ?Sized,
{
    if !campaign.is_currently_active(now) {
        return ClaimStatus::CampaignEnded;
    }

    let amount = claim_amount(campaign, request);

    // Without an amount, only a drained budget is known to be insufficient,
    // since every claim is of a positive amount. The missing amount itself
    // fails at step 5.
    let remaining_budget = campaign.remaining_budget();
    let budget_exhausted = match amount {
        Some(amount) => remaining_budget < amount,
        None => remaining_budget == 0,
    };
    if budget_exhausted {
        return ClaimStatus::BudgetExhausted;
    }

    if campaign.max_claims_per_user > 0 && record.claim_count >= campaign.max_claims_per_user {
        return ClaimStatus::MaxClaimsReached;
    }

    if let Some(next_claim_time) = next_claim_time(campaign, record) {
        if now < next_claim_time {
            return ClaimStatus::CooldownActive;
        }
    }

    if !is_eligible(campaign, record, request, amount, querier, now) {
        return ClaimStatus::Ineligible;
    }

    ClaimStatus::Eligible
}

/// When the claimer's cooldown expires. `None` if the campaign has no
/// cooldown or the claimer has never claimed.
pub fn next_claim_time(campaign: &Campaign, record: &ClaimRecord) -> Option<Timestamp> {
    if campaign.cooldown_period.is_zero() {
        return None;
    }

    record
        .last_claim_time
        .map(|last_claim_time| last_claim_time + campaign.cooldown_period)
}

fn is_eligible<Q>(
    campaign: &Campaign,
    record: &ClaimRecord,
    request: &ClaimRequest,
    amount: Option<Uint128>,
    querier: &Q,
    now: Timestamp,
) -> bool
where
    Q: ConditionQuerier + ?Sized,
{
    if let CampaignKind::Merkle { merkle_root } = campaign.kind {
        let Some(amount) = amount else {
            return false;
        };

        return !record.has_claimed()
            && verify_proof(merkle_root, request.claimer, amount, &request.proof);
    }

    match gating_conditions(&campaign.kind) {
        Some(conditions) => {
            ConditionReport::check(&conditions, querier, request.claimer, now).overall_result
        },
        None => true,
    }
}

// ----------------------------------- tests -----------------------------------
