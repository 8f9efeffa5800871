//! Position Risk Calculator
//!
//! Plans a laddered entry into a leveraged position and reports the blended
//! price, risk, reward and R/R for every partial fill.

use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use risk_calculator::{
    CalculatorConfig, CalculatorState, Direction, Locale, SeedEntry, SortOrder,
};

/// Position risk calculator CLI.
#[derive(Parser)]
#[command(name = "riskcalc")]
#[command(about = "Size laddered entries and check stop/take placement", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Language of validation messages (en, ru)
    #[arg(long, env = "RISKCALC_LOCALE")]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate position metrics for an entry ladder
    Calc {
        /// Position direction (long, short)
        #[arg(short, long)]
        direction: Option<Direction>,

        /// Entry as PRICE:AMOUNT, repeatable (amount in USD)
        #[arg(short, long = "entry", value_parser = parse_entry)]
        entries: Vec<SeedEntry>,

        /// Stop-loss price
        #[arg(short, long)]
        stop: Option<Decimal>,

        /// Take-profit price
        #[arg(short, long)]
        take: Option<Decimal>,

        /// Display order of entries (original, asc, desc)
        #[arg(long, default_value = "original")]
        sort: SortOrder,

        /// Instrument label
        #[arg(long)]
        ticker: Option<String>,

        /// Apply a preset amount as ENTRY_NO:PRESET_NO (both 1-based), repeatable
        #[arg(long = "preset", value_parser = parse_preset_ref)]
        presets: Vec<(usize, usize)>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the quick-fill preset amounts
    Presets,

    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(e) = dotenvy::dotenv() {
        debug!(error = %e, "No .env file loaded");
    }

    let mut config = CalculatorConfig::from_env().context("Failed to load configuration")?;
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    match cli.command {
        Commands::Calc {
            direction,
            entries,
            stop,
            take,
            sort,
            ticker,
            presets,
            json,
        } => {
            let mut state = CalculatorState::new(&config);

            if let Some(direction) = direction {
                state.set_direction(direction);
            }
            if let Some(stop) = stop {
                state.set_stop_loss(stop);
            }
            if let Some(take) = take {
                state.set_take_profit(take);
            }
            if let Some(ticker) = ticker {
                state.set_ticker(ticker.to_uppercase());
            }
            state.set_sort_order(sort);

            let ids = if entries.is_empty() {
                info!("No entries given, using configured defaults");
                state.entries().iter().map(|e| e.id.clone()).collect()
            } else {
                state.load_entries(entries)
            };

            for (entry_no, preset_no) in presets {
                let id = ids
                    .get(entry_no - 1)
                    .with_context(|| format!("No entry #{} to apply a preset to", entry_no))?;
                let amount = state
                    .preset(preset_no - 1)
                    .with_context(|| format!("No preset #{}", preset_no))?;
                state.apply_preset(id, amount);
            }

            info!(
                ticker = %state.ticker(),
                direction = %state.direction(),
                entries = state.entries().len(),
                stop_loss = %state.stop_loss(),
                take_profit = %state.take_profit(),
                "Calculating position"
            );

            let report = state.snapshot();
            if report.risk_reward_suspicious {
                warn!("Risk/reward ratio is outside the expected range");
            }

            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", report);
            }
        }

        Commands::Presets => {
            println!("\n{:>3} {:>12}", "#", "AMOUNT");
            println!("{}", "-".repeat(16));
            for (i, amount) in config.presets.iter().enumerate() {
                println!("{:>3} {:>12}", i + 1, format!("${}", amount));
            }
        }

        Commands::Config => {
            println!("\n=== Calculator Configuration ===\n");
            println!("Ticker:               {}", config.ticker);
            println!("Direction:            {}", config.direction.label());
            println!("Stop-Loss:            {}", config.stop_loss);
            println!("Take-Profit:          {}", config.take_profit);
            println!("Locale:               {}", config.locale);

            println!("\nRisk/Reward Band:");
            println!("  Min:                {}", config.risk_reward_band.min);
            println!("  Max:                {}", config.risk_reward_band.max);

            println!("\nPresets:");
            let presets: Vec<String> = config.presets.iter().map(|p| format!("${}", p)).collect();
            println!("  {}", presets.join(", "));

            println!("\nDefault Entries:");
            for seed in &config.default_entries {
                println!("  {} x ${}", seed.price, seed.amount);
            }
        }
    }

    Ok(())
}

/// Parse `PRICE:AMOUNT`. A bare `PRICE` gets a zero amount.
fn parse_entry(s: &str) -> Result<SeedEntry> {
    let (price, amount) = match s.split_once(':') {
        Some((price, amount)) => (price, amount),
        None => (s, "0"),
    };

    let price = Decimal::from_str(price.trim())
        .with_context(|| format!("Invalid entry price '{}'", price))?;
    let amount = Decimal::from_str(amount.trim())
        .with_context(|| format!("Invalid entry amount '{}'", amount))?;

    if price.is_sign_negative() || amount.is_sign_negative() {
        bail!("Entry '{}' must not be negative", s);
    }

    Ok(SeedEntry { price, amount })
}

/// Parse `ENTRY_NO:PRESET_NO`, both 1-based.
fn parse_preset_ref(s: &str) -> Result<(usize, usize)> {
    let (entry_no, preset_no) = s
        .split_once(':')
        .with_context(|| format!("Expected ENTRY_NO:PRESET_NO, got '{}'", s))?;

    let entry_no: usize = entry_no.trim().parse().context("Invalid entry number")?;
    let preset_no: usize = preset_no.trim().parse().context("Invalid preset number")?;
    if entry_no == 0 || preset_no == 0 {
        bail!("Entry and preset numbers start at 1");
    }

    Ok((entry_no, preset_no))
}
