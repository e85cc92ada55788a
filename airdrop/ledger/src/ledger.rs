use {
    crate::{
        claim_amount, gating_conditions, next_claim_time, validate_claim, ClaimCommit,
        ConditionQuerier, ConditionReport, Holdings, LedgerStore,
    },
    airdrop_types::{
        Addr, AirdropError, AirdropResult, Campaign, CampaignId, CampaignParams, CampaignSummary,
        ClaimRecord, ClaimRequest, ClaimStatus, Timestamp, Uint128, UserClaimInfo,
    },
    tracing::{debug, info, warn},
};

/// Campaign bookkeeping over an injected store.
///
/// Every mutation of a campaign's `claimed_amount` goes through
/// [`Ledger::record_claim`], which commits the campaign and the claimer's
/// record together and never lets `claimed_amount` exceed `total_budget`.
pub struct Ledger<S, Q = Holdings> {
    store: S,
    querier: Q,
}

impl<S> Ledger<S>
where
    S: LedgerStore,
{
    /// Create a ledger whose gated campaigns see no holdings at all.
    pub fn new(store: S) -> Self {
        Self::with_querier(store, Holdings::default())
    }
}

impl<S, Q> Ledger<S, Q>
where
    S: LedgerStore,
    Q: ConditionQuerier,
{
    pub fn with_querier(store: S, querier: Q) -> Self {
        Self { store, querier }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_campaign(&self, params: CampaignParams, now: Timestamp) -> AirdropResult<CampaignId> {
        // Validate before allocating an ID, so that invalid params don't
        // leave a gap in the sequence.
        params.clone().into_campaign(0, now)?;

        let campaign_id = self.store.next_campaign_id()?;
        let campaign = params.into_campaign(campaign_id, now)?;

        self.store.save_campaign(&campaign)?;

        info!(
            campaign_id,
            name = %campaign.name,
            kind = %campaign.kind,
            total_budget = campaign.total_budget,
            start_time = %campaign.start_time,
            end_time = %campaign.end_time,
            "Created campaign"
        );

        Ok(campaign_id)
    }

    pub fn get_campaign_info(&self, campaign_id: CampaignId) -> AirdropResult<Campaign> {
        self.store
            .load_campaign(campaign_id)?
            .ok_or_else(|| AirdropError::campaign_not_found(campaign_id))
    }

    /// The claimer's record. An address that never claimed, or a campaign
    /// that doesn't exist, gets the zero record.
    pub fn get_claim_record(&self, campaign_id: CampaignId, claimer: Addr) -> AirdropResult<ClaimRecord> {
        Ok(self
            .store
            .load_claim(campaign_id, claimer)?
            .unwrap_or_default())
    }

    pub fn get_user_claim_info(
        &self,
        campaign_id: CampaignId,
        claimer: Addr,
        now: Timestamp,
    ) -> AirdropResult<UserClaimInfo> {
        // Nothing can be claimed from a campaign that doesn't exist.
        let Some(campaign) = self.store.load_campaign(campaign_id)? else {
            return Ok(UserClaimInfo::new(
                ClaimRecord::default(),
                ClaimStatus::CampaignEnded,
                None,
            ));
        };
        let record = self.store.load_claim(campaign_id, claimer)?.unwrap_or_default();

        // Fixed-amount campaigns can be fully evaluated without a request.
        // Allowlist campaigns can't without a proof, so past the budget and
        // time checks we report what we know: whether the address already
        // claimed.
        let request = ClaimRequest::new(campaign_id, claimer);
        let status = match validate_claim(&campaign, &record, &request, &self.querier, now) {
            ClaimStatus::Ineligible if campaign.kind.is_allowlist() && !record.has_claimed() => {
                ClaimStatus::Eligible
            },
            status => status,
        };

        let next_claim_time = next_claim_time(&campaign, &record).filter(|t| now < *t);

        Ok(UserClaimInfo::new(record, status, next_claim_time))
    }

    /// Evaluate each gating condition of the campaign for the given address.
    /// `None` if the campaign isn't gated or doesn't exist.
    pub fn check_conditions(
        &self,
        campaign_id: CampaignId,
        claimer: Addr,
        now: Timestamp,
    ) -> AirdropResult<Option<ConditionReport>> {
        let Some(campaign) = self.store.load_campaign(campaign_id)? else {
            return Ok(None);
        };

        Ok(gating_conditions(&campaign.kind)
            .map(|conditions| ConditionReport::check(&conditions, &self.querier, claimer, now)))
    }

    /// Record a claim that has already been approved.
    ///
    /// Rejects with `BudgetExhausted` instead of overdrawing the budget, and
    /// with `ConcurrencyConflict` if the campaign or the claimer's record
    /// changed concurrently.
    pub fn record_claim(
        &self,
        campaign_id: CampaignId,
        claimer: Addr,
        amount: Uint128,
        now: Timestamp,
    ) -> AirdropResult<ClaimRecord> {
        let campaign = self.get_campaign_info(campaign_id)?;
        let record = self.store.load_claim(campaign_id, claimer)?.unwrap_or_default();

        self.commit(campaign, record, claimer, amount, now)
    }

    fn commit(
        &self,
        observed_campaign: Campaign,
        observed_record: ClaimRecord,
        claimer: Addr,
        amount: Uint128,
        now: Timestamp,
    ) -> AirdropResult<ClaimRecord> {
        let campaign_id = observed_campaign.id;

        if amount == 0 {
            return Err(AirdropError::validation("claim amount must be positive"));
        }

        let claimed_amount = observed_campaign
            .claimed_amount
            .checked_add(amount)
            .filter(|claimed| *claimed <= observed_campaign.total_budget)
            .ok_or(AirdropError::ClaimRejected(ClaimStatus::BudgetExhausted))?;

        let record = observed_record.after_claim(amount, now)?;
        let campaign = Campaign {
            claimed_amount,
            ..observed_campaign.clone()
        };

        let result = self.store.commit_claim(ClaimCommit {
            claimer,
            observed_campaign,
            observed_record,
            campaign,
            record,
        });

        if let Err(err) = result {
            if err.is_conflict() {
                debug!(campaign_id, %claimer, "Claim lost a race, campaign changed concurrently");
            }
            return Err(err);
        }

        info!(
            campaign_id,
            %claimer,
            amount,
            claimed_amount,
            claim_count = record.claim_count,
            "Recorded claim"
        );

        Ok(record)
    }

    /// Validate a claim and, if eligible, record it.
    ///
    /// Validation and commit happen against the same snapshot, so a claim
    /// either is recorded exactly as validated or fails with
    /// `ConcurrencyConflict` and changes nothing.
    pub fn claim(&self, request: &ClaimRequest, now: Timestamp) -> AirdropResult<ClaimRecord> {
        let campaign = self.get_campaign_info(request.campaign_id)?;
        let record = self
            .store
            .load_claim(request.campaign_id, request.claimer)?
            .unwrap_or_default();

        let status = validate_claim(&campaign, &record, request, &self.querier, now);
        status.into_result().inspect_err(|_| {
            debug!(
                campaign_id = request.campaign_id,
                claimer = %request.claimer,
                %status,
                "Rejected claim"
            );
        })?;

        // Eligible implies the amount is known.
        let amount = claim_amount(&campaign, request)
            .ok_or(AirdropError::ClaimRejected(ClaimStatus::Ineligible))?;

        self.commit(campaign, record, request.claimer, amount, now)
    }

    /// Like [`claim`](Self::claim), but retries up to `attempts` times in
    /// total while the claim keeps losing races.
    pub fn claim_with_retry(
        &self,
        request: &ClaimRequest,
        now: Timestamp,
        attempts: usize,
    ) -> AirdropResult<ClaimRecord> {
        let mut last_err = AirdropError::ConcurrencyConflict {
            campaign_id: request.campaign_id,
        };

        for _ in 0..attempts.max(1) {
            match self.claim(request, now) {
                Err(err) if err.is_conflict() => last_err = err,
                result => return result,
            }
        }

        warn!(
            campaign_id = request.campaign_id,
            claimer = %request.claimer,
            attempts,
            "Claim kept conflicting, giving up"
        );

        Err(last_err)
    }

    pub fn deactivate_campaign(&self, campaign_id: CampaignId) -> AirdropResult<Campaign> {
        let campaign = self.get_campaign_info(campaign_id)?;
        if !campaign.active {
            return Ok(campaign);
        }

        let campaign = self.set_active(campaign_id, false)?;

        info!(campaign_id, "Deactivated campaign");

        Ok(campaign)
    }

    pub fn reactivate_campaign(&self, campaign_id: CampaignId, now: Timestamp) -> AirdropResult<Campaign> {
        let campaign = self.get_campaign_info(campaign_id)?;

        if campaign.has_ended(now) {
            return Err(AirdropError::validation(format!(
                "campaign {campaign_id} ended at {} and can't be reactivated",
                campaign.end_time
            )));
        }

        if campaign.active {
            return Ok(campaign);
        }

        let campaign = self.set_active(campaign_id, true)?;

        info!(campaign_id, "Reactivated campaign");

        Ok(campaign)
    }

    // Flips the flag inside the store, so claims committed in the meantime
    // aren't overwritten.
    fn set_active(&self, campaign_id: CampaignId, active: bool) -> AirdropResult<Campaign> {
        self.store
            .set_active(campaign_id, active)?
            .ok_or_else(|| AirdropError::campaign_not_found(campaign_id))
    }

    pub fn campaigns(&self) -> AirdropResult<Vec<Campaign>> {
        self.store.campaigns()
    }

    /// Campaigns accepting claims at the given time.
    pub fn active_campaigns(&self, now: Timestamp) -> AirdropResult<Vec<Campaign>> {
        Ok(self
            .store
            .campaigns()?
            .into_iter()
            .filter(|campaign| campaign.is_currently_active(now))
            .collect())
    }

    pub fn summary(&self, now: Timestamp) -> AirdropResult<CampaignSummary> {
        let campaigns = self.store.campaigns()?;
        Ok(CampaignSummary::from_campaigns(&campaigns, now))
    }
}
