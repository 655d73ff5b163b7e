//! DAO governance client CLI
//!
//! Command-line surface over the wallet/contract session: inspect the DAO,
//! create proposals, vote, execute, and withdraw the treasury.

use chrono::Utc;
use clap::{Parser, Subcommand};
use dao_governance_client::wallet::EnvKeyWallet;
use dao_governance_client::{
    Config, DaoSession, DaoSnapshot, ProposalPhase, ProposalView, Result, RpcConfig, Vote,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "dao-client")]
#[command(about = "Client for an NFT-gated DAO governance contract")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Target network (ethereum, sepolia, holesky, localhost)
    #[arg(short, long, global = true)]
    network: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect and show account, balances, and DAO state
    Status,

    /// List all proposals with their current phase
    Proposals,

    /// Create a proposal to purchase an NFT
    Propose {
        /// NFT token id to purchase (non-negative integer)
        #[arg(long)]
        token_id: String,
    },

    /// Vote on an active proposal
    Vote {
        /// Proposal id
        #[arg(long)]
        proposal: u64,

        /// Ballot choice (yay or nay)
        #[arg(long)]
        choice: Vote,
    },

    /// Execute a proposal whose deadline has passed
    Execute {
        /// Proposal id
        #[arg(long)]
        proposal: u64,
    },

    /// Withdraw the treasury (owner only)
    Withdraw,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Load config, letting the CLI flag override the configured network
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(network) = cli.network {
        config.network = network.parse()?;
    }

    if matches!(cli.command, Commands::Config) {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let rpc = RpcConfig::from_env();
    let wallet = EnvKeyWallet::default();
    let session = DaoSession::connect(&wallet, &rpc, &config).await?;

    match cli.command {
        Commands::Status => {
            let snapshot = session.snapshot().await?;
            print_status(&snapshot);
        }
        Commands::Proposals => {
            let snapshot = session.snapshot().await?;
            print_proposals(&snapshot.proposals);
        }
        Commands::Propose { token_id } => {
            let snapshot = session.submit_proposal(&token_id).await?;
            println!("Proposal created.");
            print_status(&snapshot);
        }
        Commands::Vote { proposal, choice } => {
            let snapshot = session.cast_vote(proposal, choice).await?;
            println!("Vote recorded.");
            print_proposals(&snapshot.proposals);
        }
        Commands::Execute { proposal } => {
            let snapshot = session.execute_proposal(proposal).await?;
            println!("Proposal executed.");
            print_proposals(&snapshot.proposals);
        }
        Commands::Withdraw => {
            let (tx_hash, treasury) = session.withdraw_treasury().await?;
            println!("Treasury withdrawn in {}", tx_hash);
            println!("Treasury Balance: {} ETH", treasury.balance);
        }
        Commands::Config => unreachable!("handled before connecting"),
    }

    Ok(())
}

fn print_status(snapshot: &DaoSnapshot) {
    println!("Account: {}", snapshot.account);
    println!("Your Membership NFT Balance: {}", snapshot.nft_balance);
    println!("Treasury Balance: {} ETH", snapshot.treasury.balance);
    println!("Total Number of Proposals: {}", snapshot.proposals.len());
    if snapshot.can_withdraw() {
        println!("You are the DAO owner: `withdraw` is available.");
    }
}

fn print_proposals(proposals: &[ProposalView]) {
    if proposals.is_empty() {
        println!("Total Number of Proposals: 0");
        return;
    }

    let now = Utc::now();
    for p in proposals {
        println!("Proposal ID: {}", p.proposal_id);
        println!("  NFT to Purchase: {}", p.nft_token_id);
        println!("  Deadline: {}", p.deadline);
        println!("  Yay Votes: {}", p.yay_votes);
        println!("  Nay Votes: {}", p.nay_votes);
        println!("  Executed: {}", p.executed);
        match p.phase(now) {
            ProposalPhase::Active => {
                println!("  Voting open: `vote --proposal {} --choice yay|nay`", p.proposal_id);
            }
            ProposalPhase::Executable => {
                println!(
                    "  Ready to execute ({} leading): `execute --proposal {}`",
                    p.leading(),
                    p.proposal_id
                );
            }
            ProposalPhase::Executed => {
                println!("  Proposal Executed");
            }
        }
    }
}
