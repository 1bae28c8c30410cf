// # cfdns - Cloudflare DNS record updater
//
// Thin integration layer: parse flags, build configuration, wire the
// Cloudflare client and the public IP lookup into a `DnsEngine`, run one
// batch, and exit. All DNS logic lives in cfdns-core.
//
// ## Configuration
//
// - `--token/-t` or `CFDNS_TOKEN_FILE`: API token file (mode 600 or stricter)
// - `--api-url` or `CFDNS_API_URL`: API base URL
// - `--log-level` or `CFDNS_LOG_LEVEL`: trace|debug|info|warn|error
// - `--ip-url` or `CFDNS_IP_URL`: public IP lookup service (update only)
//
// ## Example
//
// ```bash
// cfdns update -t ~/.config/cfdns/token -z example.com -r home,nas
// cfdns delete -t ~/.config/cfdns/token -z example.com -r old.example.com
// cfdns list-records -t ~/.config/cfdns/token -z example.com
// ```

mod args;
mod commands;

use anyhow::{Context, Result};
use args::{Cli, Command};
use cfdns_cloudflare::CloudflareClient;
use cfdns_core::{
    ClientConfig, DnsEngine, IpLookupConfig, RecordSet, StaticRetriever, StringRetriever,
    read_token_file,
};
use cfdns_ip_http::public_ip_retriever;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the possible outcomes of one invocation
///
/// - 0: Every record was processed
/// - 1: Configuration or startup error
/// - 2: One or more operations failed
#[derive(Debug, Clone, Copy)]
enum CfdnsExitCode {
    Success = 0,
    ConfigError = 1,
    OperationFailed = 2,
}

impl From<CfdnsExitCode> for ExitCode {
    fn from(code: CfdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Everything one invocation needs, resolved before any network call
struct Invocation {
    client: ClientConfig,
    ip_lookup: IpLookupConfig,
    action: Action,
}

enum Action {
    Update(RecordSet),
    Delete(RecordSet),
    List { zone_name: String },
}

impl Invocation {
    /// Build the invocation from parsed flags
    ///
    /// Reads the token file; never touches the network.
    fn from_cli(cli: Cli) -> Result<Self> {
        let token_path = cli
            .token_file
            .context("An API token file is required (--token or CFDNS_TOKEN_FILE)")?;
        let token = read_token_file(&token_path)
            .with_context(|| format!("Failed to read token file {}", token_path.display()))?;

        let client = ClientConfig::new(token).with_api_url(cli.api_url);
        client.validate()?;

        let mut ip_lookup = IpLookupConfig::default();

        let action = match cli.command {
            Command::Update(args) => {
                ip_lookup.url = args.ip_url;
                ip_lookup.cache_ttl_secs = args.ip_cache_ttl;

                let mut set = RecordSet::new(args.target.zone.zone_name, args.target.names);
                set.record_type = args.record_type;
                set.ip = args.ip;
                set.ttl = args.ttl;
                set.validate()?;
                Action::Update(set)
            }
            Command::Delete(args) => {
                let set = RecordSet::new(args.zone.zone_name, args.names);
                set.validate()?;
                Action::Delete(set)
            }
            Command::ListRecords(args) => Action::List {
                zone_name: args.zone_name,
            },
            Command::Version => anyhow::bail!("version takes no configuration"),
        };
        ip_lookup.validate()?;

        Ok(Self {
            client,
            ip_lookup,
            action,
        })
    }

    /// Where the client's external IP comes from
    ///
    /// An explicit `--ip` pins the value; otherwise the lookup service is
    /// queried through the cache.
    fn ip_source(&self) -> Result<Arc<dyn StringRetriever>> {
        if let Action::Update(set) = &self.action {
            if let Some(ip) = set.ip.as_deref().map(str::trim).filter(|ip| !ip.is_empty()) {
                return Ok(Arc::new(StaticRetriever::new(ip)));
            }
        }
        Ok(Arc::new(public_ip_retriever(&self.ip_lookup)?))
    }

    fn engine(&self) -> Result<DnsEngine> {
        let client = CloudflareClient::new(&self.client, self.ip_source()?)?;
        Ok(DnsEngine::new(Box::new(client)))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if matches!(cli.command, Command::Version) {
        print_version();
        return CfdnsExitCode::Success.into();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CfdnsExitCode::ConfigError.into();
    }

    let invocation = match Invocation::from_cli(cli) {
        Ok(invocation) => invocation,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return CfdnsExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CfdnsExitCode::OperationFailed.into();
        }
    };

    rt.block_on(async {
        let engine = match invocation.engine() {
            Ok(engine) => engine,
            Err(e) => {
                error!("Configuration error: {:#}", e);
                return CfdnsExitCode::ConfigError;
            }
        };

        match run(&engine, &invocation.action).await {
            Ok(()) => CfdnsExitCode::Success,
            Err(e) => {
                error!("{:#}", e);
                CfdnsExitCode::OperationFailed
            }
        }
    })
    .into()
}

async fn run(engine: &DnsEngine, action: &Action) -> Result<()> {
    let mut out = std::io::stdout().lock();

    match action {
        Action::Update(set) => {
            let records = set.records();
            info!(
                "Updating {} record(s) in zone '{}'",
                records.len(),
                set.zone_name
            );
            commands::update_records(engine, &records, &mut out).await
        }
        Action::Delete(set) => {
            let records = set.records();
            info!(
                "Deleting {} record(s) in zone '{}'",
                records.len(),
                set.zone_name
            );
            commands::delete_records(engine, &records, &mut out).await
        }
        Action::List { zone_name } => commands::list_records(engine, zone_name, &mut out).await,
    }
}

fn print_version() {
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    if let Some(commit) = option_env!("CFDNS_BUILD_COMMIT") {
        println!("Commit: {}", commit);
    }
}
