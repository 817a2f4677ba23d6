//! Rates CLI
//!
//! Command-line interface for the FX rates API.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use rates_client::RatesClient;
use rates_types::{
    CreateProviderRequest, GroupId, ProviderId, ProviderKind, UpdateProviderRequest,
};

#[derive(Parser)]
#[command(name = "rates")]
#[command(author, version, about = "FX rates API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the rates API
    #[arg(long, env = "RATES_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate queries and conversion
    Rate {
        #[command(subcommand)]
        action: RateCommands,
    },
    /// Historical backfill
    Backfill {
        #[command(subcommand)]
        action: BackfillCommands,
    },
    /// Currency catalog
    Currency {
        #[command(subcommand)]
        action: CurrencyCommands,
    },
    /// Provider catalog
    Provider {
        #[command(subcommand)]
        action: ProviderCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum RateCommands {
    /// List stored rates for a base currency over a date range
    List {
        /// Base currency code
        #[arg(long, default_value = "EUR")]
        source: String,
        /// Inclusive start date (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Inclusive end date (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
    },
    /// Fetch one page of stored rates
    Page {
        #[arg(long, default_value = "EUR")]
        source: String,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "10")]
        page_size: u32,
    },
    /// Convert an amount between two currencies at today's rate
    Convert {
        #[arg(long, default_value = "EUR")]
        source: String,
        #[arg(long, default_value = "USD")]
        target: String,
        #[arg(long, default_value = "1")]
        amount: Decimal,
    },
}

#[derive(Subcommand)]
enum BackfillCommands {
    /// Submit a backfill over an inclusive date range
    Load {
        /// Inclusive start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Inclusive end date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },
    /// Poll the progress of a submitted backfill
    Status {
        /// Task group ID (UUID)
        id: String,
    },
}

#[derive(Subcommand)]
enum CurrencyCommands {
    /// Register a currency
    Create {
        /// Three-letter currency code
        code: String,
    },
    /// Get a currency by code
    Get {
        code: String,
    },
    /// List registered currencies
    List,
    /// Remove a currency from the catalog
    Delete {
        code: String,
    },
}

#[derive(Subcommand)]
enum ProviderCommands {
    /// Register a rate provider
    Create {
        /// Unique provider name
        #[arg(long)]
        name: String,
        /// Provider kind (currency_beacon, synthetic)
        #[arg(long)]
        kind: String,
        /// Lower priority is tried first
        #[arg(long, default_value = "1")]
        priority: i32,
        /// Register as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// List providers in resolution order
    List,
    /// Get a provider by ID
    Get {
        /// Provider ID (UUID)
        id: String,
    },
    /// Partially update a provider
    Update {
        /// Provider ID (UUID)
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        priority: Option<i32>,
    },
    /// Delete a provider
    Delete {
        /// Provider ID (UUID)
        id: String,
    },
}

fn parse_kind(s: &str) -> Result<ProviderKind> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Unknown provider kind: {}. Supported: currency_beacon, synthetic", s))
}

fn parse_provider_id(s: &str) -> Result<ProviderId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid provider ID: {}", s))
}

fn parse_group_id(s: &str) -> Result<GroupId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid task ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = RatesClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Rate { action } => match action {
            RateCommands::List { source, from, to } => {
                let rates = client.list_rates(&source, from, to).await?;
                println!("{}", serde_json::to_string_pretty(&rates)?);
            }
            RateCommands::Page {
                source,
                from,
                to,
                page,
                page_size,
            } => {
                let result = client
                    .list_rates_page(&source, from, to, page, page_size)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            RateCommands::Convert {
                source,
                target,
                amount,
            } => {
                let result = client.convert(&source, &target, amount).await?;
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        },

        Commands::Backfill { action } => match action {
            BackfillCommands::Load { start, end } => {
                let response = client.load_historical_rates(start, end).await?;
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
            BackfillCommands::Status { id } => {
                let status = client.task_status(parse_group_id(&id)?).await?;
                println!("{}", serde_json::to_string_pretty(&status)?);
            }
        },

        Commands::Currency { action } => match action {
            CurrencyCommands::Create { code } => {
                let currency = client.create_currency(&code).await?;
                println!("{}", serde_json::to_string_pretty(&currency)?);
            }
            CurrencyCommands::Get { code } => {
                let currency = client.get_currency(&code).await?;
                println!("{}", serde_json::to_string_pretty(&currency)?);
            }
            CurrencyCommands::List => {
                let currencies = client.list_currencies().await?;
                println!("{}", serde_json::to_string_pretty(&currencies)?);
            }
            CurrencyCommands::Delete { code } => {
                client.delete_currency(&code).await?;
                println!("✓ Currency deleted");
            }
        },

        Commands::Provider { action } => match action {
            ProviderCommands::Create {
                name,
                kind,
                priority,
                inactive,
            } => {
                let req = CreateProviderRequest {
                    name,
                    kind: parse_kind(&kind)?,
                    is_active: !inactive,
                    priority,
                };
                let provider = client.create_provider(&req).await?;
                println!("{}", serde_json::to_string_pretty(&provider)?);
            }
            ProviderCommands::List => {
                let providers = client.list_providers().await?;
                println!("{}", serde_json::to_string_pretty(&providers)?);
            }
            ProviderCommands::Get { id } => {
                let provider = client.get_provider(parse_provider_id(&id)?).await?;
                println!("{}", serde_json::to_string_pretty(&provider)?);
            }
            ProviderCommands::Update {
                id,
                name,
                kind,
                active,
                priority,
            } => {
                let req = UpdateProviderRequest {
                    name,
                    kind: kind.as_deref().map(parse_kind).transpose()?,
                    is_active: active,
                    priority,
                };
                let provider = client
                    .update_provider(parse_provider_id(&id)?, &req)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&provider)?);
            }
            ProviderCommands::Delete { id } => {
                client.delete_provider(parse_provider_id(&id)?).await?;
                println!("✓ Provider deleted");
            }
        },
    }

    Ok(())
}
