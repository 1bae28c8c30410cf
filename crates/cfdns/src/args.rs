//! Command-line argument definitions using clap.

use cfdns_core::config::{CLOUDFLARE_API_V4, DEFAULT_IP_LOOKUP_URL};
use cfdns_core::model::{DEFAULT_RECORD_TYPE, DEFAULT_TTL};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// Keeps Cloudflare DNS records pointed at this host's public IP
///
/// Records are matched by exact name inside the named zone. Names given
/// without the zone suffix are qualified under the zone.
#[derive(Parser, Debug)]
#[command(name = "cfdns")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Cloudflare API token file (must not be readable by group or others)
    #[arg(short = 't', long = "token", env = "CFDNS_TOKEN_FILE", global = true)]
    pub token_file: Option<PathBuf>,

    /// Cloudflare API base URL
    #[arg(long, env = "CFDNS_API_URL", global = true, default_value = CLOUDFLARE_API_V4)]
    pub api_url: String,

    /// Log verbosity (logs go to stderr)
    #[arg(long, env = "CFDNS_LOG_LEVEL", global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Point records at the public IP (or --ip), creating them if missing
    Update(UpdateArgs),

    /// Delete records by name
    Delete(RecordArgs),

    /// List every record in a zone
    ListRecords(ZoneArgs),

    /// Display version information
    Version,
}

#[derive(Args, Debug)]
pub struct ZoneArgs {
    /// Name of the zone the records reside in
    #[arg(short = 'z', long)]
    pub zone_name: String,
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    #[command(flatten)]
    pub zone: ZoneArgs,

    /// DNS record name; repeat or separate with commas
    #[arg(short = 'r', long = "dns-record-name", required = true, value_delimiter = ',')]
    pub names: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub target: RecordArgs,

    /// Set the record content to this value instead of the discovered public IP
    #[arg(long)]
    pub ip: Option<String>,

    /// TTL (in seconds) to set on the records
    #[arg(long, default_value_t = DEFAULT_TTL)]
    pub ttl: u32,

    /// Record type used when creating records
    #[arg(long = "type", default_value = DEFAULT_RECORD_TYPE)]
    pub record_type: String,

    /// Service answering with the caller's public IP as plain text
    #[arg(long, env = "CFDNS_IP_URL", default_value = DEFAULT_IP_LOOKUP_URL)]
    pub ip_url: String,

    /// Seconds a discovered public IP is reused
    #[arg(long, default_value_t = 300)]
    pub ip_cache_ttl: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_update_defaults() {
        let cli = Cli::try_parse_from([
            "cfdns", "update", "-t", "/tmp/token", "-z", "example.com", "-r", "host1",
        ])
        .unwrap();

        assert_eq!(cli.token_file, Some(PathBuf::from("/tmp/token")));
        assert_eq!(cli.log_level, LogLevel::Info);
        match cli.command {
            Command::Update(args) => {
                assert_eq!(args.target.zone.zone_name, "example.com");
                assert_eq!(args.target.names, vec!["host1"]);
                assert_eq!(args.ttl, 3600);
                assert_eq!(args.record_type, "A");
                assert_eq!(args.ip, None);
                assert_eq!(args.ip_cache_ttl, 300);
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_record_names_repeat_and_split() {
        let cli = Cli::try_parse_from([
            "cfdns",
            "delete",
            "-z",
            "example.com",
            "-r",
            "a,b",
            "--dns-record-name",
            "c.example.com",
        ])
        .unwrap();

        match cli.command {
            Command::Delete(args) => {
                assert_eq!(args.names, vec!["a", "b", "c.example.com"]);
            }
            other => panic!("expected delete, got {:?}", other),
        }
    }

    #[test]
    fn test_record_name_is_required() {
        let result = Cli::try_parse_from(["cfdns", "update", "-z", "example.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cfdns",
            "list-records",
            "-z",
            "example.com",
            "--log-level",
            "debug",
            "--api-url",
            "http://127.0.0.1:8080/",
        ])
        .unwrap();

        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.api_url, "http://127.0.0.1:8080/");
        assert!(matches!(cli.command, Command::ListRecords(_)));
    }
}
