use {
    crate::{
        context::{read_json, write_json_atomic, Context},
        format::print_json_pretty,
    },
    airdrop_merkle::{batches, rebuild_campaign_file, verify_proof, MerkleTree},
    airdrop_types::{json, Addr, CampaignFile, CampaignId, Recipient, Uint128},
    anyhow::anyhow,
    clap::Subcommand,
    colored::Colorize,
    std::path::{Path, PathBuf},
};

#[derive(Subcommand)]
pub enum TreeCmd {
    /// Build the Merkle tree of a recipient list and write the campaign file
    Build {
        /// JSON array of `{ address, amount, reason? }`
        recipients: PathBuf,
        /// ID of the campaign the file belongs to, if already created
        #[arg(long)]
        campaign_id: Option<CampaignId>,
        /// Human-readable campaign name
        #[arg(long, default_value = "")]
        name: String,
        /// Where to write the campaign file [default: print to stdout]
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Verify one recipient's proof in a campaign file
    Verify {
        campaign_file: PathBuf,
        address: Addr,
        /// Amount to verify [default: the amount in the campaign file]
        #[arg(long)]
        amount: Option<Uint128>,
    },
    /// Split a recipient list into distribution batches
    Batches {
        recipients: PathBuf,
        /// Recipients per batch [default: from config]
        #[arg(long)]
        size: Option<usize>,
    },
}

impl TreeCmd {
    pub fn run(self, ctx: &Context) -> anyhow::Result<()> {
        match self {
            TreeCmd::Build {
                recipients,
                campaign_id,
                name,
                output,
            } => {
                let recipients = read_json::<Vec<Recipient>>(&recipients)?;
                let tree = MerkleTree::build(recipients)?;
                let file = tree.campaign_file(campaign_id, name);

                tracing::info!(
                    recipients = tree.len(),
                    root = %tree.root(),
                    total_amount = tree.total_amount(),
                    "Built campaign file"
                );

                match output {
                    Some(path) => {
                        write_json_atomic(&path, &file)?;
                        println!("{} {}", "Merkle root:".bold(), file.merkle_root);
                        println!("{} {path:?}", "Campaign file written to".bold());
                        Ok(())
                    },
                    None => print_json_pretty(file),
                }
            },
            TreeCmd::Verify {
                campaign_file,
                address,
                amount,
            } => {
                let file = read_json::<CampaignFile>(&campaign_file)?;
                let entry = file
                    .find(address)
                    .ok_or_else(|| anyhow!("{address} is not in the campaign file"))?;
                let amount = amount.unwrap_or(entry.amount);
                let valid = verify_proof(file.merkle_root, address, amount, &entry.proof);

                print_json_pretty(json!({
                    "address": address,
                    "amount": amount.to_string(),
                    "merkle_root": file.merkle_root,
                    "valid": valid,
                }))
            },
            TreeCmd::Batches { recipients, size } => {
                let recipients = read_json::<Vec<Recipient>>(&recipients)?;
                let batches = batches(&recipients, size.unwrap_or(ctx.cfg.batch.size))?;

                let plan = batches
                    .iter()
                    .map(|batch| {
                        json!({
                            "index": batch.index,
                            "recipients": batch.recipients.len(),
                            "total_amount": batch.total_amount.to_string(),
                        })
                    })
                    .collect::<Vec<_>>();

                print_json_pretty(plan)
            },
        }
    }
}

/// Load a campaign file and check its root matches its recipient list.
pub fn load_campaign_file(path: &Path) -> anyhow::Result<CampaignFile> {
    let file = read_json::<CampaignFile>(path)?;
    rebuild_campaign_file(&file)?;
    Ok(file)
}
