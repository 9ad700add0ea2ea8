//! Command line explorer for the synthetic-asset pools.
//!
//! Read-only by design: quoting, allowance inspection, activity listing and
//! trade planning. Actual submission needs a signing wallet, which belongs
//! to the embedding application.

use alloy_primitives::Address;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use synthswap_chain::prelude::{
    Erc20Reads, FaucetReads, PoolReader, PoolReads, RpcProvider, VaultReads, trade_calldata,
};
use synthswap_domain::prelude::*;
use synthswap_domain::presets;
use synthswap_engine::prelude::{EngineConfig, TradeHistory};

#[derive(Parser)]
#[command(name = "synthswap")]
#[command(about = "Synthetic-asset pool trading explorer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured pools with live on-chain stats
    Pools,
    /// Quote a trade for a token pair
    Quote {
        /// Input token symbol (e.g. FDUSD)
        #[arg(short, long)]
        from: String,

        /// Output token symbol (e.g. sEUR)
        #[arg(short, long)]
        to: String,

        /// Human decimal amount to spend
        #[arg(short, long)]
        amount: String,
    },
    /// Check whether an owner's allowance covers a trade
    Allowance {
        /// Owner address
        #[arg(short, long)]
        owner: String,

        /// Input token symbol
        #[arg(short, long)]
        from: String,

        /// Output token symbol
        #[arg(short, long)]
        to: String,

        /// Human decimal amount to spend
        #[arg(short, long)]
        amount: String,
    },
    /// Recent mint/redeem activity for an address
    History {
        /// User address
        #[arg(short, long)]
        user: String,

        /// Maximum entries
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// List configured LP vaults with live rate, supply and position
    Vaults {
        /// Owner address for the LP balance column
        #[arg(short, long)]
        owner: Option<String>,
    },
    /// Faucet claim status for an address
    Faucet {
        /// User address
        #[arg(short, long)]
        user: String,
    },
    /// Print the transaction a swap would submit
    Plan {
        /// Input token symbol
        #[arg(short, long)]
        from: String,

        /// Output token symbol
        #[arg(short, long)]
        to: String,

        /// Human decimal amount to spend
        #[arg(short, long)]
        amount: String,

        /// Slippage tolerance in basis points
        #[arg(long, default_value_t = 50)]
        slippage_bps: u16,

        /// Recipient address
        #[arg(short, long)]
        recipient: String,
    },
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn parse_address(text: &str) -> Result<Address> {
    text.parse::<Address>()
        .with_context(|| format!("invalid address '{text}'"))
}

fn lookup_token<'a>(catalog: &'a TokenCatalog, symbol: &str) -> Result<&'a Token> {
    catalog
        .by_symbol(symbol)
        .with_context(|| format!("unknown token symbol '{symbol}'"))
}

struct App {
    reader: Arc<PoolReader>,
    registry: Arc<PoolRegistry>,
    catalog: TokenCatalog,
    config: EngineConfig,
}

impl App {
    fn from_env() -> Result<Self> {
        let rpc_url = env::var("RPC_URL").context("RPC_URL must be set")?;
        let provider = Arc::new(RpcProvider::new(rpc_url));
        Ok(Self {
            reader: Arc::new(PoolReader::new(provider)),
            registry: Arc::new(presets::default_registry()),
            catalog: presets::default_tokens(),
            config: EngineConfig::default(),
        })
    }

    /// Resolves a pool and classifies the trade for a symbol pair.
    fn resolve_trade(&self, from: &str, to: &str) -> Result<(Token, Token, Pool, TradeDirection)> {
        let from = lookup_token(&self.catalog, from)?.clone();
        let to = lookup_token(&self.catalog, to)?.clone();
        let Some(pool) = self.registry.resolve(from.address, to.address).cloned() else {
            bail!("no pool is configured for {}/{}", from.symbol, to.symbol);
        };
        let Some(direction) = PoolRegistry::classify(from.address, to.address, &pool) else {
            bail!("pair does not belong to pool {}", pool.address);
        };
        Ok((from, to, pool, direction))
    }

    async fn quote(&self, from: &Token, to: &Token, pool: &Pool, direction: TradeDirection, amount: &str) -> Result<(Amount, Quote)> {
        let input = Amount::parse(amount, from.decimals)?;
        if input.is_zero() {
            bail!("amount must be positive");
        }
        let (output_raw, fee_raw) = match direction {
            TradeDirection::Mint => self.reader.mint_quote(pool.address, input.raw).await?,
            TradeDirection::Redeem => self.reader.redeem_quote(pool.address, input.raw).await?,
        };
        let fee_decimals = match direction {
            TradeDirection::Mint => from.decimals,
            TradeDirection::Redeem => to.decimals,
        };
        let quote = Quote::from_trade_info(
            &input,
            Amount::new(output_raw, to.decimals),
            Amount::new(fee_raw, fee_decimals),
        );
        Ok((input, quote))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let app = App::from_env()?;

    match cli.command {
        Commands::Pools => {
            for pool in app.registry.pools() {
                println!("{} ({}) at {}", pool.name, pool.symbol, pool.address);
                println!("  collateral: {}", pool.collateral_symbol);

                let fee = app.reader.fee_percentage(pool.address).await?;
                let supply = app.reader.total_synthetic_tokens(pool.address).await?;
                let collateral = app.reader.total_collateral(pool.address).await?;

                let synthetic_decimals = app.catalog.decimals_of(pool.synthetic_token);
                let collateral_decimals = app.catalog.decimals_of(pool.collateral_token);
                println!("  fee: {}", Amount::new(fee, 18).format());
                println!(
                    "  synthetic supply: {}",
                    Amount::new(supply, synthetic_decimals).format()
                );
                println!(
                    "  collateral (users/LPs/total): {} / {} / {}",
                    Amount::new(collateral.users_collateral, collateral_decimals).format(),
                    Amount::new(collateral.lps_collateral, collateral_decimals).format(),
                    Amount::new(collateral.total_collateral, collateral_decimals).format(),
                );
            }
        }
        Commands::Quote { from, to, amount } => {
            let (from, to, pool, direction) = app.resolve_trade(&from, &to)?;
            let (input, quote) = app.quote(&from, &to, &pool, direction, &amount).await?;

            println!("{direction} via {} ({})", pool.name, pool.address);
            println!("  input:  {} {}", input, from.symbol);
            println!("  output: {} {}", quote.output, to.symbol);
            println!("  fee:    {}", quote.fee);
            match quote.exchange_rate {
                Some(rate) => println!("  rate:   {rate}"),
                None => println!("  rate:   n/a"),
            }
        }
        Commands::Allowance {
            owner,
            from,
            to,
            amount,
        } => {
            let owner = parse_address(&owner)?;
            let (from, _, pool, _) = app.resolve_trade(&from, &to)?;
            let required = Amount::parse(&amount, from.decimals)?;

            if from.is_native() {
                println!("{} is the native asset, no allowance needed", from.symbol);
                return Ok(());
            }

            let balance = app.reader.balance_of(from.address, owner).await?;
            println!(
                "balance of {}: {}",
                from.symbol,
                Amount::new(balance, from.decimals).format()
            );

            let allowance = app
                .reader
                .allowance(from.address, owner, pool.address)
                .await?;
            let state = AllowanceState::new(allowance, required.raw);

            println!(
                "allowance of {} to {}: {}",
                from.symbol,
                pool.address,
                Amount::new(state.allowance, from.decimals).format()
            );
            if state.is_sufficient() {
                println!("  sufficient for {}", required);
            } else {
                println!(
                    "  insufficient, missing {}",
                    state.missing_amount(from.decimals).format()
                );
            }
        }
        Commands::History { user, limit } => {
            let user = parse_address(&user)?;
            let mut config = app.config.clone();
            config.history_limit = limit;

            let history = TradeHistory::new(
                app.reader.clone(),
                app.registry.clone(),
                app.catalog.clone(),
                config,
            );
            let records = history.recent(user).await?;
            if records.is_empty() {
                println!("no recent activity");
            }
            for record in records {
                println!(
                    "[{}] {:?} {} / {} {} (fee {}) tx {}",
                    record.block_number,
                    record.kind,
                    record.synthetic_amount,
                    record.collateral_amount,
                    record.collateral_symbol,
                    record.fee_amount,
                    record.tx_hash,
                );
            }
        }
        Commands::Vaults { owner } => {
            let owner = owner.map(|o| parse_address(&o)).transpose()?;
            for vault in presets::default_vaults() {
                println!("{} ({}x) at {}", vault.name, vault.leverage, vault.address);

                let rate = app.reader.vault_rate(vault.address).await?;
                let supply = app.reader.vault_total_supply(vault.address).await?;
                println!("  rate:       {}", Amount::new(rate, 18).format());
                println!("  LP supply:  {}", Amount::new(supply, 18).format());

                if let Some(owner) = owner {
                    let balance = app.reader.balance_of(vault.address, owner).await?;
                    println!("  LP balance: {}", Amount::new(balance, 18).format());
                }

                let position = app.reader.lp_position(vault.pool, vault.address).await?;
                println!(
                    "  collateral: {} (capacity {}, utilization {}%)",
                    Amount::new(position.actual_collateral, 18).format(),
                    Amount::new(position.capacity, 18).format(),
                    position.utilization,
                );
                println!("  overcollateralized: {}", position.is_overcollateralized);
            }
        }
        Commands::Faucet { user } => {
            let user = parse_address(&user)?;
            let allotment = app
                .reader
                .faucet_allotment(presets::FAUCET_LIMITER, user)
                .await?;

            println!(
                "daily limit: {}",
                Amount::new(allotment.daily_limit, 18).format()
            );
            println!(
                "remaining:   {}",
                Amount::new(allotment.remaining, 18).format()
            );
            if allotment.remaining < allotment.daily_limit && allotment.seconds_until_reset > 0 {
                let s = allotment.seconds_until_reset;
                println!(
                    "resets in:   {:02}:{:02}:{:02}",
                    s / 3600,
                    (s % 3600) / 60,
                    s % 60
                );
            }
        }
        Commands::Plan {
            from,
            to,
            amount,
            slippage_bps,
            recipient,
        } => {
            let recipient = parse_address(&recipient)?;
            let (from, to, pool, direction) = app.resolve_trade(&from, &to)?;
            let (input, quote) = app.quote(&from, &to, &pool, direction, &amount).await?;

            let intent = TradeIntent {
                pool: pool.clone(),
                direction,
                input,
                min_output: quote.output,
                slippage: SlippageTolerance::from_bps(slippage_bps),
                expiration_unix: unix_now() + app.config.deadline_secs,
                recipient,
            };

            println!("{direction} against {} ({})", pool.name, pool.address);
            println!("  spend:        {} {}", intent.input, from.symbol);
            println!("  quoted out:   {} {}", quote.output, to.symbol);
            println!(
                "  min out:      {} (slippage {} bps)",
                Amount::new(intent.adjusted_min_output(), to.decimals).format(),
                intent.slippage.bps(),
            );
            println!("  deadline:     {}", intent.expiration_unix);
            println!("  recipient:    {}", intent.recipient);
            println!(
                "  calldata:     0x{}",
                alloy_primitives::hex::encode(trade_calldata(&intent))
            );
        }
    }

    Ok(())
}
