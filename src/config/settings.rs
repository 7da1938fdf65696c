//! Command-line settings for vCloud Inventory
//!
//! Defines the CLI arguments, subcommands and the connection configuration
//! derived from them.

use clap::{Parser, Subcommand, ValueEnum};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::DEFAULT_SETTINGS_PATH;

/// vCloud Inventory - inventory and environment reporting for vCloud Director
#[derive(Parser, Debug, Clone)]
#[command(name = "vcloud-inventory")]
#[command(author = "vCloud Inventory Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inventory, classify and export vApps from VMware vCloud Director")]
#[command(long_about = r#"
vCloud Inventory walks every organization, virtual datacenter and vApp
visible to the given account, classifies each server into an environment
tier by name pattern, and reports or exports the result.

Examples:
  vcloud-inventory --url https://vcd.example.com -u alice -o Acme list
  vcloud-inventory ... export inventory.xlsx --sort environment
  vcloud-inventory ... backup web-P01 --description "before patching"
  vcloud-inventory classify web-P01 db-D02    # offline, settings only
"#)]
pub struct CliArgs {
    /// vCloud Director URL (e.g. https://vcd.example.com)
    #[arg(long, env = "VCLOUD_URL", value_name = "URL", global = true)]
    pub url: Option<String>,

    /// Username used to log in
    #[arg(short = 'u', long, env = "VCLOUD_USER", value_name = "USER", global = true)]
    pub username: Option<String>,

    /// Password used to log in
    #[arg(long, env = "VCLOUD_PASSWORD", value_name = "PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Organization the user belongs to
    #[arg(short = 'o', long, env = "VCLOUD_ORG", value_name = "ORG", global = true)]
    pub organization: Option<String>,

    /// Data center label written to every inventory row
    #[arg(long, env = "VCLOUD_DATA_CENTER", default_value = "", value_name = "NAME", global = true)]
    pub data_center: String,

    /// Catalog that receives backup templates
    #[arg(long, env = "VCLOUD_CATALOG", value_name = "NAME", global = true)]
    pub catalog: Option<String>,

    /// Path to the settings XML (templates and environment patterns)
    #[arg(short = 's', long, default_value = DEFAULT_SETTINGS_PATH, value_name = "PATH", global = true)]
    pub settings: PathBuf,

    /// API version sent in the Accept header
    #[arg(long, default_value = "1.5", value_name = "VERSION", global = true)]
    pub api_version: String,

    /// HTTP request timeout (e.g. 30s, 2m)
    #[arg(long, default_value = "60s", value_parser = humantime::parse_duration, value_name = "DURATION", global = true)]
    pub timeout: Duration,

    /// Accept self-signed or otherwise invalid TLS certificates
    #[arg(long, global = true)]
    pub accept_invalid_certs: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List every vApp with its environment tier
    #[command(name = "list")]
    List {
        /// Ordering of the listed servers
        #[arg(long, value_enum, default_value = "name")]
        sort: SortKey,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Export the inventory to an .xlsx spreadsheet
    #[command(name = "export")]
    Export {
        /// Output file (default: vcloud-inventory-<date>.xlsx)
        path: Option<PathBuf>,
        /// Ordering of the exported rows
        #[arg(long, value_enum, default_value = "name")]
        sort: SortKey,
    },

    /// Capture a vApp into the backup catalog
    #[command(name = "backup")]
    Backup {
        /// Name of the vApp to back up
        server: String,
        /// Description stored on the template and catalog item
        #[arg(short, long, default_value = "")]
        description: String,
        /// Only validate that the server can be backed up
        #[arg(short = 'n', long)]
        dry_run: bool,
        /// Maximum time to wait for the catalog task (0 = no limit)
        #[arg(long, default_value = "30m", value_parser = humantime::parse_duration)]
        task_timeout: Duration,
        /// Interval between task status polls
        #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
        poll_interval: Duration,
    },

    /// Classify server names against the settings file (no login)
    #[command(name = "classify")]
    Classify {
        /// Server names to classify
        #[arg(required = true)]
        names: Vec<String>,
    },
}

/// Ordering applied to the server list
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Discovery order
    None,
    /// Server name, ascending
    #[default]
    Name,
    /// Environment tier (production first), then name
    Environment,
}

/// Output format for listings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Log line format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Everything needed to open a session against vCloud Director
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the installation
    pub url: Url,
    /// Login user (without organization)
    pub username: String,
    /// Login password
    pub password: String,
    /// Organization of the login user
    pub organization: String,
    /// Data center label used in reports
    pub data_center: String,
    /// Catalog for backups
    pub catalog: Option<String>,
    /// API version for the Accept header
    pub api_version: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Skip TLS certificate validation
    pub accept_invalid_certs: bool,
}

impl ConnectionConfig {
    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, String> {
        let url = args.url.as_deref().ok_or("vCloud URL required (--url or VCLOUD_URL)")?;
        let username = args.username.as_deref().ok_or("Username required (--username or VCLOUD_USER)")?;
        let password = args.password.as_deref().ok_or("Password required (--password or VCLOUD_PASSWORD)")?;
        let organization = args.organization.as_deref().ok_or("Organization required (--organization or VCLOUD_ORG)")?;

        let url = Url::parse(url).map_err(|e| format!("Invalid URL '{}': {}", url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("Unsupported URL scheme '{}'", url.scheme()));
        }

        if username.is_empty() || organization.is_empty() {
            return Err("Username and organization must not be empty".to_string());
        }

        Ok(Self {
            url,
            username: username.to_string(),
            password: password.to_string(),
            organization: organization.to_string(),
            data_center: args.data_center.clone(),
            catalog: args.catalog.clone(),
            api_version: args.api_version.clone(),
            timeout: args.timeout,
            accept_invalid_certs: args.accept_invalid_certs,
        })
    }
}
