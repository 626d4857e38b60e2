//! Token indexer command-line entry point.
//!
//! Loads the clients configuration, sets up logging and runs one command:
//! - `summary`: fetches a token's pairs from one source and prints the aggregated summary
//! - `fetch`: performs a single resilient fetch and prints the body
//! - `onchain`: reads token or account data through the indexer contracts

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv_override;
use reqwest::Method;
use serde_json::Value;
use std::{
	collections::HashMap,
	env::{set_var, var},
	path::PathBuf,
	str::FromStr,
};
use tracing::{error, info, warn};

use alloy::primitives::Address;
use token_indexer_sdk::{
	models::{ClientsConfig, FetchConfig, SecretValue},
	services::{
		clients::{
			CmcDexScanClient, DexscreenerClient, GeckoTerminalClient, GoldRushClient,
			CMC_DEFAULT_NETWORK, GOLDRUSH_API_KEY_ENV,
		},
		fetch::{create_fetcher, ResponseBody},
		onchain::{NetworkClients, NetworkInput},
	},
	utils::{logging::setup_logging, parse_evm_address, parse_string_to_bytes_size},
};

/// Network used for GeckoTerminal when none is given
const DEFAULT_GECKOTERMINAL_NETWORK: &str = "eth";

#[derive(Parser)]
#[command(
	name = "token-indexer",
	about = "Fetches token market data from DEX aggregators, explorers and on-chain indexers.",
	version
)]
struct Cli {
	/// Path to the clients configuration file (default: config/clients.json)
	#[arg(long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// Write logs to file instead of stdout
	#[arg(long, global = true)]
	log_file: bool,

	/// Set log level (trace, debug, info, warn, error)
	#[arg(long, value_name = "LEVEL", global = true)]
	log_level: Option<String>,

	/// Path to store log files (default: logs/)
	#[arg(long, value_name = "PATH", global = true)]
	log_path: Option<String>,

	/// Maximum log file size before rolling (e.g., "1GB", "500MB", "1024KB")
	#[arg(long, value_name = "SIZE", value_parser = parse_string_to_bytes_size, global = true)]
	log_max_size: Option<u64>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SummarySource {
	Dexscreener,
	Geckoterminal,
	Cmc,
}

#[derive(Subcommand)]
enum Command {
	/// Aggregate every pair of a token into one summary
	Summary {
		#[arg(long, value_enum)]
		source: SummarySource,

		/// Token contract address
		#[arg(long)]
		token: String,

		/// GeckoTerminal network id or CoinMarketCap network slug
		#[arg(long)]
		network: Option<String>,
	},

	/// Fetch one URL with timeout and retries
	Fetch {
		#[arg(long)]
		url: String,

		#[arg(long, default_value = "GET")]
		method: String,

		/// Request body, sent as-is
		#[arg(long)]
		body: Option<String>,

		/// Extra header as NAME:VALUE, repeatable
		#[arg(long = "header", value_name = "NAME:VALUE")]
		headers: Vec<String>,

		#[arg(long)]
		retries: Option<u32>,

		#[arg(long)]
		timeout_ms: Option<u64>,
	},

	/// Read data through the on-chain indexer contracts
	Onchain {
		#[command(subcommand)]
		command: OnchainCommand,
	},
}

#[derive(Subcommand)]
enum OnchainCommand {
	/// ERC20 metadata, balance and allowance
	Erc20 {
		#[arg(long)]
		chain_id: u64,

		#[arg(long, value_parser = parse_evm_address)]
		token: Address,

		#[arg(long, value_parser = parse_evm_address)]
		owner: Address,

		#[arg(long, value_parser = parse_evm_address)]
		spender: Option<Address>,
	},

	/// Native balance and contract status of an account
	Account {
		#[arg(long)]
		chain_id: u64,

		#[arg(long, value_parser = parse_evm_address)]
		address: Address,
	},
}

impl Cli {
	/// Apply CLI options to environment variables, overriding any existing values
	fn apply_to_env(&self) {
		dotenv_override().ok();

		if self.log_file {
			set_var("LOG_MODE", "file");
		}

		if let Ok(level) = var("RUST_LOG") {
			set_var("LOG_LEVEL", level);
		}

		if let Some(level) = &self.log_level {
			set_var("LOG_LEVEL", level);
			set_var("RUST_LOG", level);
		}

		if let Some(path) = &self.log_path {
			set_var("LOG_DATA_DIR", path);
		}

		if let Some(max_size) = &self.log_max_size {
			set_var("LOG_MAX_SIZE", max_size.to_string());
		}
	}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	cli.apply_to_env();

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let config = ClientsConfig::load_or_default(cli.config.as_deref())
		.await
		.context("Failed to load clients configuration")?;

	let output = match cli.command {
		Command::Summary {
			source,
			token,
			network,
		} => run_summary(&config, source, &token, network).await?,
		Command::Fetch {
			url,
			method,
			body,
			headers,
			retries,
			timeout_ms,
		} => run_fetch(&url, &method, body, &headers, retries, timeout_ms).await?,
		Command::Onchain { command } => run_onchain(&config, command).await?,
	};

	println!("{}", output);
	Ok(())
}

async fn run_summary(
	config: &ClientsConfig,
	source: SummarySource,
	token: &str,
	network: Option<String>,
) -> anyhow::Result<String> {
	info!(?source, token, "Building token summary");
	let summary = match source {
		SummarySource::Dexscreener => {
			let client = DexscreenerClient::new(
				config.client_config(DexscreenerClient::NAME, DexscreenerClient::default_config()),
			)?;
			client.get_token_summary(token).await?
		}
		SummarySource::Geckoterminal => {
			let client = GeckoTerminalClient::new(config.client_config(
				GeckoTerminalClient::NAME,
				GeckoTerminalClient::default_config(),
			))?;
			let network = network.as_deref().unwrap_or(DEFAULT_GECKOTERMINAL_NETWORK);
			client.get_token_summary(network, token).await?
		}
		SummarySource::Cmc => {
			let client = CmcDexScanClient::new(
				config.client_config(CmcDexScanClient::NAME, CmcDexScanClient::default_config()),
			)?;
			let network = network.as_deref().unwrap_or(CMC_DEFAULT_NETWORK);
			client.get_token_summary(token, network).await?
		}
	};
	Ok(serde_json::to_string_pretty(&summary)?)
}

async fn run_fetch(
	url: &str,
	method: &str,
	body: Option<String>,
	headers: &[String],
	retries: Option<u32>,
	timeout_ms: Option<u64>,
) -> anyhow::Result<String> {
	let method = Method::from_str(&method.to_uppercase())
		.with_context(|| format!("Invalid HTTP method: {}", method))?;

	let mut header_map = HashMap::new();
	for raw in headers {
		let (name, value) = raw
			.split_once(':')
			.with_context(|| format!("Invalid header '{}', expected NAME:VALUE", raw))?;
		header_map.insert(name.trim().to_string(), value.trim().to_string());
	}

	let mut fetch_config = FetchConfig::new(url);
	if let Some(retries) = retries {
		fetch_config = fetch_config.with_retries(retries);
	}
	if let Some(timeout_ms) = timeout_ms {
		fetch_config = fetch_config.with_timeout_ms(timeout_ms);
	}

	let fetcher = create_fetcher(&fetch_config)?;
	let headers = (!header_map.is_empty()).then_some(header_map);
	let response = fetcher.fetch_json(url, method, headers, body).await?;
	Ok(match response {
		ResponseBody::Json(value) => serde_json::to_string_pretty(&value)?,
		ResponseBody::Text(text) => text,
	})
}

async fn run_onchain(config: &ClientsConfig, command: OnchainCommand) -> anyhow::Result<String> {
	let chain_id = match &command {
		OnchainCommand::Erc20 { chain_id, .. } | OnchainCommand::Account { chain_id, .. } => {
			*chain_id
		}
	};
	let network = config
		.network(chain_id)
		.with_context(|| format!("Unsupported chain id: {}", chain_id))?;

	let wallet_address = match &command {
		OnchainCommand::Erc20 { owner, .. } => *owner,
		OnchainCommand::Account { address, .. } => *address,
	};
	let input = NetworkInput {
		chain_id,
		chain_name: network.chain_name.clone(),
		rpc_url: None,
		factories: Vec::new(),
		bases: Vec::new(),
		wallet_address,
		quote_currency: None,
	};

	let rpc_config = config.client_config("rpc", FetchConfig::new(network.rpc_url.clone()));
	let fetcher = create_fetcher(&rpc_config)?;
	let goldrush = goldrush_client(config);
	let clients = NetworkClients::build(input, config, fetcher, goldrush)?;

	let value: Value = match command {
		OnchainCommand::Erc20 {
			token,
			owner,
			spender,
			..
		} => serde_json::to_value(
			clients
				.erc20_client
				.get(token, owner, spender.unwrap_or(Address::ZERO))
				.await?,
		)?,
		OnchainCommand::Account { address, .. } => {
			serde_json::to_value(clients.address_client.get(address).await?)?
		}
	};
	Ok(serde_json::to_string_pretty(&value)?)
}

/// GoldRush client when a key is configured or present in the environment.
fn goldrush_client(config: &ClientsConfig) -> Option<GoldRushClient> {
	let mut goldrush_config =
		config.client_config(GoldRushClient::NAME, GoldRushClient::default_config());
	if goldrush_config.api_key.is_none() && var(GOLDRUSH_API_KEY_ENV).is_ok() {
		goldrush_config = goldrush_config
			.with_api_key(SecretValue::Environment(GOLDRUSH_API_KEY_ENV.to_string()));
	}
	goldrush_config.api_key.as_ref()?;
	GoldRushClient::new(goldrush_config)
		.inspect_err(|e| warn!("GoldRush client unavailable: {}", e))
		.ok()
}
