use std::path::PathBuf;

use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand};
use eyre::{Error, Result};
use log::info;
use serde::Serialize;
use serde_json::json;

use pump::curve::{format_wad, invariant_error, market_cap, price, verify_invariant};
use pump::error::ClassifiedError;
use pump::launch::Launcher;
use pump::models::LaunchParameters;
use pump::upload::{upload_image_file, PinataUploader};
use pump::utils::app_context::AppContext;
use pump::utils::logger::setup_logger;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the live pool of a token
    Pool {
        /// Token address
        token: Address,
    },
    /// Show the creation metadata of a token
    Metadata {
        /// Token address
        token: Address,
        /// Scan from this block instead of only the recent window
        #[arg(long)]
        from_block: Option<u64>,
    },
    /// Show pool, metadata, price and market cap of a token
    Info {
        /// Token address
        token: Address,
        /// Scan from this block instead of only the recent window
        #[arg(long)]
        from_block: Option<u64>,
    },
    /// Find the block a contract was deployed in
    CreationBlock {
        /// Contract address
        address: Address,
    },
    /// Launch a new token
    Launch(LaunchArgs),
    /// Cross-check curve math against the pool's on-chain fields
    Verify {
        /// Token address
        token: Address,
    },
}

#[derive(Args)]
struct LaunchArgs {
    /// Token name
    #[arg(long)]
    name: String,
    /// Token symbol
    #[arg(long)]
    symbol: String,
    /// Initial buy-in in RON, e.g. "0.5"
    #[arg(long)]
    amount: String,
    /// Token description
    #[arg(long, default_value = "")]
    description: String,
    /// Social links as a JSON object
    #[arg(long, default_value = "{}")]
    extended: String,
    /// Already hosted image
    #[arg(long, conflicts_with = "image")]
    image_url: Option<String>,
    /// Local image to upload first
    #[arg(long)]
    image: Option<PathBuf>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Turns a classified failure into a report carrying its kind.
fn report(error: ClassifiedError) -> Error {
    eyre::eyre!("{} ({}): {}", error.message, error.kind, error.cause)
}

async fn verify(ctx: &AppContext, token: Address) -> Result<()> {
    let pool = ctx.reader().get_pool_state(token).await.map_err(report)?;

    let spot = price(&pool)?;
    let cap = market_cap(&pool)?;
    print_json(&json!({
        "token": token,
        "price": format_wad(spot),
        "onChainPrice": format_wad(pool.last_price),
        "marketCap": format_wad(cap),
        "onChainMarketCap": format_wad(pool.last_mcap_in_eth),
        "invariantError": invariant_error(&pool).map(|e| e.to_string()),
        "onCurve": verify_invariant(&pool),
    }))
}

async fn launch(ctx: &AppContext, args: LaunchArgs) -> Result<()> {
    let image_url = match (args.image_url, args.image) {
        (Some(url), _) => url,
        (None, Some(path)) => {
            let uploader = PinataUploader::from_jwt(ctx.config.pinata_jwt.as_deref())?;
            upload_image_file(&uploader, &path).await.map_err(report)?
        }
        (None, None) => String::new(),
    };

    let params = LaunchParameters {
        name: args.name,
        symbol: args.symbol,
        init_amount_in: args.amount,
        description: args.description,
        extended: args.extended,
        image_url,
    };

    let chain = ctx.signing_chain()?;
    let launcher = Launcher::from_config(&chain, &ctx.config);
    let quote = launcher.quote(&params).await.map_err(report)?;
    info!(
        "main::launch: paying {} RON ({} fee + {} buy-in)",
        format_wad(quote.total_value),
        format_wad(quote.creation_fee),
        format_wad(quote.init_amount)
    );

    let result = launcher.launch_token(&params).await.map_err(report)?;
    print_json(&result)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_logger()?;

    let cli = Cli::parse();
    let ctx = AppContext::from_env().await?;
    info!("main: {:?}", ctx.config);

    match cli.command {
        Commands::Pool { token } => {
            let pool = ctx.reader().get_pool_state(token).await.map_err(report)?;
            print_json(&pool)?;
        }
        Commands::Metadata { token, from_block } => {
            let metadata = ctx
                .reader()
                .get_token_metadata(token, from_block)
                .await
                .map_err(report)?;
            print_json(&json!({
                "metadata": metadata,
                "socials": metadata.socials(),
            }))?;
        }
        Commands::Info { token, from_block } => {
            let info = ctx
                .reader()
                .get_complete_token_info(token, from_block)
                .await
                .map_err(report)?;
            print_json(&info)?;
        }
        Commands::CreationBlock { address } => {
            let block = ctx
                .reader()
                .find_creation_block(address)
                .await
                .map_err(report)?;
            print_json(&json!({ "address": address, "creationBlock": block }))?;
        }
        Commands::Launch(args) => launch(&ctx, args).await?,
        Commands::Verify { token } => verify(&ctx, token).await?,
    }

    Ok(())
}
