/*
[INPUT]:  CLI arguments, optional YAML configuration file, environment
[OUTPUT]: Exchange responses printed as JSON, structured errors on stderr
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or startup flow
*/

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use biscoint_adapter::{
    BiscointClient, BiscointError, DEFAULT_BASE, DEFAULT_QUOTE, DEFAULT_TICKER_AMOUNT,
    HttpMethod, OfferRequest, Op, TickerRequest, TradesRequest,
};
use biscoint_cli::{CliConfig, error_report, parse_params, render};

#[derive(Parser, Debug)]
#[command(name = "biscoint", version, about = "Biscoint exchange API client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    /// Tracing filter; logs go to stderr ahead of any error report
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "off")]
    log_level: String,
    /// Override the exchange base URL
    #[arg(long = "api-url", value_name = "URL")]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Current prices for a market
    Ticker {
        #[arg(long, default_value = DEFAULT_BASE)]
        base: String,
        #[arg(long, default_value = DEFAULT_QUOTE)]
        quote: String,
        #[arg(long, default_value = DEFAULT_TICKER_AMOUNT)]
        amount: String,
        #[arg(long = "is-quote", default_value_t = true, action = ArgAction::Set)]
        is_quote: bool,
    },
    /// Exchange fee schedule
    Fees,
    /// Exchange metadata
    Meta,
    /// Account balances
    Balance,
    /// Recent account trades
    Trades {
        #[arg(long)]
        op: Option<Op>,
        #[arg(long)]
        length: Option<u32>,
    },
    /// Request a short-lived offer
    Offer {
        op: Op,
        amount: String,
        /// Amount is in the quote currency
        #[arg(long = "is-quote")]
        is_quote: bool,
        #[arg(long, default_value = DEFAULT_BASE)]
        base: String,
        #[arg(long, default_value = DEFAULT_QUOTE)]
        quote: String,
    },
    /// Confirm a previously requested offer
    Confirm { offer_id: String },
    /// Call any endpoint with raw parameters
    Call {
        endpoint: String,
        #[arg(long, default_value = "GET")]
        method: HttpMethod,
        #[arg(long)]
        private: bool,
        /// Parameter as key=value, repeatable
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    if let Err(err) = init_tracing(&args.log_level) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<String> {
    let config = load_config(args.config_path.as_ref())?
        .with_env()
        .with_api_url(args.api_url);
    let client = config.build_client()?;
    debug!(
        base_url = %client.base_url(),
        authenticated = client.credentials().is_some(),
        "client ready"
    );

    let payload = execute(&client, args.command).await?;
    render(&payload)
}

async fn execute(client: &BiscointClient, command: Command) -> Result<Value> {
    let payload = match command {
        Command::Ticker {
            base,
            quote,
            amount,
            is_quote,
        } => {
            let request = TickerRequest {
                base,
                quote,
                amount,
                is_quote,
            };
            serde_json::to_value(client.get_ticker(&request).await?)?
        }
        Command::Fees => client.get_fees().await?,
        Command::Meta => client.get_meta().await?,
        Command::Balance => serde_json::to_value(client.get_balance().await?)?,
        Command::Trades { op, length } => {
            serde_json::to_value(client.get_trades(&TradesRequest { op, length }).await?)?
        }
        Command::Offer {
            op,
            amount,
            is_quote,
            base,
            quote,
        } => {
            let request = OfferRequest {
                base,
                quote,
                ..OfferRequest::new(op, amount, is_quote)
            };
            serde_json::to_value(client.get_offer(&request).await?)?
        }
        Command::Confirm { offer_id } => serde_json::to_value(client.confirm_offer(&offer_id).await?)?,
        Command::Call {
            endpoint,
            method,
            private,
            params,
        } => {
            let params = parse_params(params.iter().map(String::as_str))?;
            client.call(&endpoint, method, params, private).await?
        }
    };
    Ok(payload)
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<BiscointError>() {
        Some(api_err) => {
            let rendered = render(&error_report(api_err)).unwrap_or_else(|_| api_err.to_string());
            eprintln!("{rendered}");
        }
        None => eprintln!("error: {err:#}"),
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<CliConfig> {
    match path {
        Some(path) => CliConfig::from_file(path).context("load config"),
        None => Ok(CliConfig::default()),
    }
}
