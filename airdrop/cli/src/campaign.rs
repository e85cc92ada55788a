use {
    crate::{
        context::{now_or, read_json, write_json_atomic, Context},
        format::print_json_pretty,
        tree::load_campaign_file,
    },
    airdrop_types::{
        Addr, CampaignId, CampaignParams, ClaimConditions, Duration, Timestamp, Uint128,
    },
    anyhow::{anyhow, bail},
    clap::{Args, Subcommand, ValueEnum},
    colored::Colorize,
    std::path::PathBuf,
};

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Fixed amount, one claim per address
    Simple,
    /// Fixed amount, repeated claims with a cooldown
    Faucet,
    /// Fixed amount, claimer must meet the conditions in `--conditions`
    Conditional,
    /// Fixed amount, claimer must hold `--min-balance` of `--token`
    Holder,
    /// Fixed amount, claimer must own an NFT of `--collection`
    Nft,
    /// Amounts and eligibility from the Merkle tree in `--campaign-file`
    Merkle,
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long, value_enum)]
    kind: KindArg,
    /// Amount paid per claim (all kinds except merkle)
    #[arg(long)]
    claim_amount: Option<Uint128>,
    /// Total budget [default for merkle: the campaign file's total amount]
    #[arg(long)]
    budget: Option<Uint128>,
    /// How long the campaign runs, in days
    #[arg(long)]
    duration_days: u64,
    /// Start time as UNIX seconds [default: now]
    #[arg(long)]
    start: Option<u64>,
    /// Minimum seconds between claims of the same address
    #[arg(long, default_value_t = 0)]
    cooldown: u64,
    /// Claims allowed per address, 0 for unlimited
    #[arg(long, default_value_t = 1)]
    max_claims: u32,
    #[arg(long)]
    token: Option<Addr>,
    #[arg(long)]
    min_balance: Option<Uint128>,
    #[arg(long)]
    collection: Option<Addr>,
    /// JSON file with the claim conditions
    #[arg(long)]
    conditions: Option<PathBuf>,
    /// Campaign file built with `tree build`; its campaign ID is filled in
    /// once the campaign is created
    #[arg(long)]
    campaign_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum CampaignCmd {
    /// Create a new campaign
    Create(Box<CreateArgs>),
    /// Show a campaign
    Info { id: CampaignId },
    /// List campaigns currently accepting claims
    List {
        /// Include inactive and ended campaigns
        #[arg(long)]
        all: bool,
        /// Evaluate at this UNIX time [default: now]
        #[arg(long)]
        at: Option<u64>,
    },
    /// Stop accepting claims
    Deactivate { id: CampaignId },
    /// Resume accepting claims, if the campaign hasn't ended
    Reactivate {
        id: CampaignId,
        #[arg(long)]
        at: Option<u64>,
    },
    /// Totals across all campaigns
    Summary {
        #[arg(long)]
        at: Option<u64>,
    },
}

impl CampaignCmd {
    pub fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let ledger = ctx.load_ledger()?;

        match self {
            CampaignCmd::Create(args) => {
                let now = now_or(None)?;
                let campaign_file = args.campaign_file.clone();
                let params = args.into_params(now)?;

                let id = ledger.create_campaign(params, now)?;
                ctx.save_ledger(&ledger)?;

                if let Some(path) = campaign_file {
                    let mut file = load_campaign_file(&path)?;
                    file.campaign_id = Some(id);
                    write_json_atomic(&path, &file)?;
                }

                println!("{} {id}", "Created campaign".bold());

                print_json_pretty(ledger.get_campaign_info(id)?)
            },
            CampaignCmd::Info { id } => print_json_pretty(ledger.get_campaign_info(id)?),
            CampaignCmd::List { all, at } => {
                let campaigns = if all {
                    ledger.campaigns()?
                } else {
                    ledger.active_campaigns(now_or(at)?)?
                };

                print_json_pretty(campaigns)
            },
            CampaignCmd::Deactivate { id } => {
                let campaign = ledger.deactivate_campaign(id)?;
                ctx.save_ledger(&ledger)?;

                print_json_pretty(campaign)
            },
            CampaignCmd::Reactivate { id, at } => {
                let campaign = ledger.reactivate_campaign(id, now_or(at)?)?;
                ctx.save_ledger(&ledger)?;

                print_json_pretty(campaign)
            },
            CampaignCmd::Summary { at } => print_json_pretty(ledger.summary(now_or(at)?)?),
        }
    }
}

impl CreateArgs {
    fn into_params(self, now: Timestamp) -> anyhow::Result<CampaignParams> {
        let duration = Duration::from_days(self.duration_days);

        let params = match self.kind {
            KindArg::Merkle => {
                let path = self
                    .campaign_file
                    .as_ref()
                    .ok_or(anyhow!("merkle campaigns need --campaign-file"))?;
                let file = load_campaign_file(path)?;

                if let Some(budget) = self.budget {
                    if budget < file.total_amount {
                        bail!(
                            "budget {budget} is less than the campaign file's total amount {}",
                            file.total_amount
                        );
                    }
                }

                CampaignParams::merkle(
                    self.name,
                    file.merkle_root,
                    self.budget.unwrap_or(file.total_amount),
                    duration,
                )
            },
            KindArg::Simple => {
                let (claim_amount, budget) = self.fixed_amounts()?;
                CampaignParams::simple(self.name, claim_amount, budget, duration)
            },
            KindArg::Faucet => {
                let (claim_amount, budget) = self.fixed_amounts()?;
                CampaignParams::faucet(
                    self.name,
                    claim_amount,
                    budget,
                    duration,
                    Duration::from_seconds(self.cooldown),
                    self.max_claims,
                )
            },
            KindArg::Conditional => {
                let (claim_amount, budget) = self.fixed_amounts()?;
                let conditions = match &self.conditions {
                    Some(path) => read_json::<ClaimConditions>(path)?,
                    None => bail!("conditional campaigns need --conditions"),
                };

                CampaignParams::conditional(self.name, claim_amount, budget, duration, conditions)
                    .with_cooldown(Duration::from_seconds(self.cooldown))
                    .with_max_claims_per_user(self.max_claims)
            },
            KindArg::Holder => {
                let (claim_amount, budget) = self.fixed_amounts()?;
                let token = self.token.ok_or(anyhow!("--token is required"))?;
                let min_balance = self.min_balance.ok_or(anyhow!("--min-balance is required"))?;

                CampaignParams::holder_gated(
                    self.name,
                    claim_amount,
                    budget,
                    duration,
                    token,
                    min_balance,
                )
                .with_cooldown(Duration::from_seconds(self.cooldown))
                .with_max_claims_per_user(self.max_claims)
            },
            KindArg::Nft => {
                let (claim_amount, budget) = self.fixed_amounts()?;
                let collection = self.collection.ok_or(anyhow!("--collection is required"))?;

                CampaignParams::nft_gated(self.name, claim_amount, budget, duration, collection)
                    .with_cooldown(Duration::from_seconds(self.cooldown))
                    .with_max_claims_per_user(self.max_claims)
            },
        };

        Ok(params.with_start_time(self.start.map(Timestamp::from_seconds).unwrap_or(now)))
    }

    fn fixed_amounts(&self) -> anyhow::Result<(Uint128, Uint128)> {
        let claim_amount = self
            .claim_amount
            .ok_or(anyhow!("--claim-amount is required"))?;
        let budget = self.budget.ok_or(anyhow!("--budget is required"))?;

        Ok((claim_amount, budget))
    }
}
