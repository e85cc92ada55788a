mod campaign;
mod claim;
mod config;
mod context;
mod format;
mod home_directory;
mod tree;

use {
    crate::{
        campaign::CampaignCmd,
        claim::{ClaimCmd, StatusCmd},
        config::Config,
        context::Context,
        home_directory::HomeDirectory,
        tree::TreeCmd,
    },
    clap::Parser,
    config_parser::parse_config,
    std::{io, path::PathBuf},
    tracing::metadata::LevelFilter,
};

#[derive(Parser)]
#[command(author, version, about, next_display_order = None)]
struct Cli {
    /// Directory for the config file and ledger [default: ~/.airdrop]
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Build and verify Merkle trees of recipient lists
    #[command(subcommand, next_display_order = None)]
    Tree(TreeCmd),

    /// Manage campaigns [alias: c]
    #[command(subcommand, next_display_order = None, alias = "c")]
    Campaign(CampaignCmd),

    /// Claim from a campaign
    Claim(ClaimCmd),

    /// Show an address's claim status in a campaign
    Status(StatusCmd),
}

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Find the home directory from the CLI `--home` flag.
    let app_dir = HomeDirectory::new_or_default(cli.home)?;

    // Parse the config file.
    let cfg: Config = parse_config(app_dir.config_file())?;

    // Set up tracing. Logs go to stderr, keeping stdout for JSON output.
    tracing_subscriber::fmt()
        .with_max_level(cfg.log_level.parse::<LevelFilter>()?)
        .with_writer(io::stderr)
        .init();

    let ctx = Context::new(app_dir, cfg);

    match cli.command {
        Command::Tree(cmd) => cmd.run(&ctx),
        Command::Campaign(cmd) => cmd.run(&ctx),
        Command::Claim(cmd) => cmd.run(&ctx),
        Command::Status(cmd) => cmd.run(&ctx),
    }
}
