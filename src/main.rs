use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::{OsRng, StdRng};
use threshold_shares::bigint_utils::{parse_secret, secret_to_hex};
use threshold_shares::ledger::ShareLedger;
use threshold_shares::params::SharingParams;
use threshold_shares::sharding::{generate, reconstruct};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "shares-cli")]
#[command(about = "Split secrets into threshold shares and recover them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write sharing parameters to a JSON file
    Init {
        #[arg(long, default_value = "params.json")]
        out: String,
        #[arg(long, default_value = "5")]
        total: usize,
        #[arg(long, default_value = "3")]
        threshold: usize,
        /// Inclusive upper bound for random coefficients (decimal or 0x hex)
        #[arg(long, conflicts_with = "legacy")]
        coefficient_bound: Option<String>,
        /// Use the small [1, 100] coefficient range (no threshold secrecy)
        #[arg(long)]
        legacy: bool,
    },
    /// Split a secret and store every share in the ledger
    Split {
        #[arg(long, default_value = "params.json")]
        params: String,
        #[arg(long, default_value = "ledger.json")]
        ledger: String,
        #[arg(long)]
        secret: String,
        /// Seed the coefficient RNG for reproducible shares
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Fetch shares by ledger id and recover the secret
    Reconstruct {
        #[arg(long, default_value = "params.json")]
        params: String,
        #[arg(long, default_value = "ledger.json")]
        ledger: String,
        #[arg(long, value_delimiter = ' ', num_args = 1..)]
        ids: Vec<u64>,
    },
    /// List the shares stored in the ledger
    Show {
        #[arg(long, default_value = "ledger.json")]
        ledger: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    match cli.command {
        Commands::Init {
            out,
            total,
            threshold,
            coefficient_bound,
            legacy,
        } => {
            let params = match (legacy, coefficient_bound) {
                (true, _) => SharingParams::legacy(total, threshold)?,
                (false, Some(bound)) => {
                    SharingParams::with_bound(total, threshold, parse_secret(&bound)?)?
                }
                (false, None) => SharingParams::new(total, threshold)?,
            };
            params.save(&out)?;
            println!(
                "Initialized parameters at '{}': {} shares, threshold {}, coefficient bound {} bits",
                out,
                params.total,
                params.threshold,
                params.coefficient_bound.bits()
            );
        }

        Commands::Split {
            params,
            ledger,
            secret,
            seed,
        } => {
            let params = SharingParams::load(&params)?;
            let secret = parse_secret(&secret)?;

            let shares = match seed {
                Some(seed) => generate(&secret, &params, &mut StdRng::seed_from_u64(seed))?,
                None => generate(&secret, &params, &mut OsRng)?,
            };

            let mut store = ShareLedger::load(&ledger)?;
            for share in shares {
                let x = share.x();
                let id = store.store_share(share);
                println!("   -> Stored share x = {} as #{}", x, id);
            }
            store.save(&ledger)?;
            info!(ledger = %ledger, total = params.total, "split complete");
            println!(
                "Any {} of these {} shares recover the secret.",
                params.threshold, params.total
            );
        }

        Commands::Reconstruct {
            params,
            ledger,
            ids,
        } => {
            let params = SharingParams::load(&params)?;
            let store = ShareLedger::load(&ledger)?;
            if ids.is_empty() {
                return Err(anyhow!("Pass the share ids to use with --ids"));
            }

            let shares = store.get_shares(&ids)?;
            for (id, share) in ids.iter().zip(&shares) {
                println!("   -> Retrieved #{}: {}", id, share);
            }

            let secret = reconstruct(&shares, params.threshold)?;
            println!("Reconstructed secret: {} ({})", secret, secret_to_hex(&secret));
        }

        Commands::Show { ledger } => {
            let store = ShareLedger::load(&ledger)?;
            println!("{} shares in '{}'", store.shares_count(), ledger);
            for (id, share) in store.iter() {
                println!("#{}: {}", id, share);
            }
        }
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
