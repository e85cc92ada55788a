use {
    crate::{
        context::{now_or, Context},
        format::print_json_pretty,
        tree::load_campaign_file,
    },
    airdrop_types::{json, Addr, CampaignId, ClaimRequest},
    anyhow::anyhow,
    clap::Args,
    colored::Colorize,
    std::path::PathBuf,
};

#[derive(Args)]
pub struct ClaimCmd {
    id: CampaignId,
    address: Addr,
    /// Campaign file holding the claimer's amount and proof (merkle campaigns)
    #[arg(long)]
    campaign_file: Option<PathBuf>,
    /// Claim at this UNIX time [default: now]
    #[arg(long)]
    at: Option<u64>,
}

impl ClaimCmd {
    pub fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let ledger = ctx.load_ledger()?;
        let campaign = ledger.get_campaign_info(self.id)?;
        let now = now_or(self.at)?;

        let request = if campaign.kind.is_allowlist() {
            let path = self
                .campaign_file
                .ok_or(anyhow!("claiming from a merkle campaign needs --campaign-file"))?;
            let file = load_campaign_file(&path)?;

            if campaign.kind.merkle_root() != Some(file.merkle_root) {
                return Err(anyhow!(
                    "campaign file root {} doesn't match campaign {}",
                    file.merkle_root,
                    self.id
                ));
            }

            let entry = file
                .find(self.address)
                .ok_or_else(|| anyhow!("{} is not in the campaign file", self.address))?;

            ClaimRequest::allowlist(self.id, self.address, entry.amount, entry.proof.clone())
        } else {
            ClaimRequest::new(self.id, self.address)
        };

        match ledger.claim_with_retry(&request, now, ctx.cfg.ledger.max_retries) {
            Ok(record) => {
                ctx.save_ledger(&ledger)?;

                println!("{}", "Claim accepted".green().bold());

                print_json_pretty(record)
            },
            Err(err) => match err.rejection() {
                Some(status) => {
                    println!("{} {status}", "Claim rejected:".red().bold());

                    print_json_pretty(ledger.get_user_claim_info(self.id, self.address, now)?)?;

                    Err(err.into())
                },
                None => Err(err.into()),
            },
        }
    }
}

#[derive(Args)]
pub struct StatusCmd {
    id: CampaignId,
    address: Addr,
    /// Evaluate at this UNIX time [default: now]
    #[arg(long)]
    at: Option<u64>,
}

impl StatusCmd {
    pub fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let ledger = ctx.load_ledger()?;
        let now = now_or(self.at)?;

        let info = ledger.get_user_claim_info(self.id, self.address, now)?;
        let conditions = ledger.check_conditions(self.id, self.address, now)?;

        print_json_pretty(json!({
            "campaign_id": self.id,
            "address": self.address,
            "claim_info": info,
            "conditions": conditions,
        }))
    }
}
