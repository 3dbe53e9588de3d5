//! `dims`: command line over a local DIMS ledger.

mod config;
mod keyfile;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use dims_client::{AdminClient, IdentityClient, Signer};
use dims_content::ContentStore;
use dims_integrity::IntegrityOutcome;
use dims_ledger::{GenesisConfig, Ledger};
use dims_store_lmdb::LmdbEnvironment;
use dims_types::{AccountAddress, SystemClock, TokenId};
use dims_utils::{format_duration, init_logging, LogFormat};

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "dims", about = "Decentralized identity registry", version)]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base; flags
    /// and environment variables override them.
    #[arg(long, env = "DIMS_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the ledger.
    #[arg(long, env = "DIMS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "DIMS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "DIMS_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Blob directory for the filesystem content backend.
    #[arg(long, env = "DIMS_CONTENT_DIR")]
    content_dir: Option<PathBuf>,

    /// Bearer token for the Pinata content backend.
    #[arg(long, env = "DIMS_PINATA_JWT", hide_env_values = true)]
    pinata_jwt: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new account key file.
    Keygen {
        #[arg(long)]
        out: PathBuf,
    },
    /// Deploy the registry with the given key as admin.
    Init {
        #[arg(long, env = "DIMS_KEY")]
        key: PathBuf,
    },
    /// Store a proof file and register it under your account.
    Register {
        #[arg(long, env = "DIMS_KEY")]
        key: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Re-upload your proof file while the identity is pending.
    UpdateProof {
        #[arg(long, env = "DIMS_KEY")]
        key: PathBuf,
        #[arg(long)]
        file: PathBuf,
    },
    /// Check a registrant's stored proof against its commitment.
    Review {
        #[arg(long, env = "DIMS_KEY")]
        key: PathBuf,
        target: AccountAddress,
    },
    /// Verify a pending identity and mint its badge.
    Verify {
        #[arg(long, env = "DIMS_KEY")]
        key: PathBuf,
        target: AccountAddress,
        /// Skip the proof review.
        #[arg(long)]
        unchecked: bool,
    },
    /// Revoke an identity and burn its badge.
    Revoke {
        #[arg(long, env = "DIMS_KEY")]
        key: PathBuf,
        target: AccountAddress,
    },
    /// Show an identity record.
    Identity { address: AccountAddress },
    /// List verified addresses.
    VerifiedUsers {
        /// Only addresses whose identity is verified right now.
        #[arg(long)]
        current: bool,
    },
    /// Show a badge by owner or token id.
    Badge {
        #[arg(long, conflicts_with = "token", required_unless_present = "token")]
        owner: Option<AccountAddress>,
        #[arg(long)]
        token: Option<u64>,
    },
    /// Print the event log.
    Events {
        #[arg(long, default_value_t = 0)]
        from: u64,
        #[arg(long, default_value_t = 100)]
        limit: usize,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(dir) = &cli.content_dir {
        config.content.dir = dir.clone();
    }
    if let Some(jwt) = &cli.pinata_jwt {
        config.content.pinata_jwt = Some(jwt.clone());
    }
    Ok(config)
}

type LocalLedger = Arc<Ledger<LmdbEnvironment>>;

fn open_env(config: &CliConfig) -> anyhow::Result<LmdbEnvironment> {
    LmdbEnvironment::open_checked(&config.data_dir, config.map_size_bytes())
        .with_context(|| format!("opening ledger at {}", config.data_dir.display()))
}

fn open_ledger(config: &CliConfig) -> anyhow::Result<LocalLedger> {
    let ledger = Ledger::open_existing(open_env(config)?, Arc::new(SystemClock))
        .context("the ledger is not initialised; run `dims init` first")?;
    Ok(Arc::new(ledger))
}

async fn open_content(config: &CliConfig) -> anyhow::Result<Arc<dyn ContentStore>> {
    let store = config.content.build().await.context("opening content store")?;
    tracing::debug!(backend = store.name(), "content store ready");
    Ok(store)
}

fn signer(path: &Path) -> anyhow::Result<Signer> {
    Ok(Signer::new(keyfile::read_key(path)?))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level)?;

    match cli.command {
        Command::Keygen { out } => {
            println!("{}", keyfile::generate_key_file(&out)?);
        }
        Command::Init { key } => {
            let admin = signer(&key)?.address();
            let ledger = Ledger::open(
                open_env(&config)?,
                &GenesisConfig::new(admin),
                Arc::new(SystemClock),
            )?;
            print_json(ledger.deployment())?;
        }
        Command::Register {
            key,
            name,
            email,
            file,
        } => {
            let proof = read_proof(&file).await?;
            let client = IdentityClient::new(
                open_ledger(&config)?,
                open_content(&config).await?,
                signer(&key)?,
                config.client_config(),
            );
            print_json(&client.register_identity(&name, &email, &proof).await?)?;
        }
        Command::UpdateProof { key, file } => {
            let proof = read_proof(&file).await?;
            let client = IdentityClient::new(
                open_ledger(&config)?,
                open_content(&config).await?,
                signer(&key)?,
                config.client_config(),
            );
            print_json(&client.update_proof(&proof).await?)?;
        }
        Command::Review { key, target } => {
            let admin = admin_client(&config, &key).await?;
            review_verdict(admin.review(&target).await?)?;
            println!("match");
        }
        Command::Verify {
            key,
            target,
            unchecked,
        } => {
            let admin = admin_client(&config, &key).await?;
            let receipt = if unchecked {
                admin.verify_unchecked(target).await?
            } else {
                admin.verify_reviewed(target).await?
            };
            let token_id = admin.badge_of(&target).await?;
            tracing::info!(%target, %token_id, "identity verified");
            print_json(&receipt)?;
        }
        Command::Revoke { key, target } => {
            let admin = admin_client(&config, &key).await?;
            print_json(&admin.revoke(target).await?)?;
        }
        Command::Identity { address } => {
            print_json(&open_ledger(&config)?.identity(&address)?)?;
        }
        Command::VerifiedUsers { current } => {
            let ledger = open_ledger(&config)?;
            let users = if current {
                ledger.currently_verified_users()?
            } else {
                ledger.verified_users()?
            };
            for user in users {
                println!("{user}");
            }
        }
        Command::Badge { owner, token } => {
            let ledger = open_ledger(&config)?;
            let token_id = match (owner, token) {
                (Some(owner), _) => ledger.token_id_of(&owner)?,
                (None, Some(id)) => TokenId::new(id),
                (None, None) => bail!("pass --owner or --token"),
            };
            let owner = ledger.owner_of(token_id)?;
            println!("token:  {token_id}");
            println!("owner:  {owner}");
            println!("uri:    {}", ledger.token_uri(token_id)?);
            println!(
                "supply: {} live, {} minted",
                ledger.total_supply()?,
                ledger.token_counter()?
            );
        }
        Command::Events { from, limit } => {
            for event in open_ledger(&config)?.events_since(from, limit)? {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }
    Ok(())
}

async fn admin_client(
    config: &CliConfig,
    key: &Path,
) -> anyhow::Result<AdminClient<LocalLedger, Arc<dyn ContentStore>>> {
    let client_config = config.client_config();
    tracing::debug!(
        timeout = %format_duration(client_config.confirmation_timeout),
        "admin client ready"
    );
    Ok(AdminClient::new(
        open_ledger(config)?,
        open_content(config).await?,
        signer(key)?,
        client_config,
    ))
}

/// `Ok` only when the stored proof matches its commitment.
fn review_verdict(outcome: IntegrityOutcome) -> anyhow::Result<()> {
    match outcome {
        IntegrityOutcome::Match => Ok(()),
        IntegrityOutcome::Mismatch { expected, computed } => {
            bail!("mismatch: expected {expected}, stored content hashes to {computed}")
        }
        IntegrityOutcome::Unavailable { reason } => bail!("proof unavailable: {reason}"),
    }
}

async fn read_proof(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("reading proof file {}", path.display()))
}
