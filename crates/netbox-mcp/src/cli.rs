//! Clap derive structures for the `netbox-mcp` binary.

use std::path::PathBuf;

use clap::Parser;

use netbox_config::Overrides;

/// netbox-mcp -- NetBox inventory tools over the Model Context Protocol
#[derive(Debug, Parser)]
#[command(
    name = "netbox-mcp",
    version,
    about = "Expose NetBox inventory operations as MCP tools over stdio",
    long_about = "Serves MCP (JSON-RPC 2.0) on stdin/stdout and translates tool calls\n\
        into authenticated NetBox REST requests. Logs go to stderr."
)]
pub struct Cli {
    /// NetBox instance URL (e.g. https://netbox.example.com)
    #[arg(long, env = "NETBOX_URL")]
    pub url: Option<String>,

    /// NetBox API token
    #[arg(long, env = "NETBOX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "NETBOX_INSECURE")]
    pub insecure: bool,

    /// Custom CA certificate (PEM) for the NetBox endpoint
    #[arg(long, env = "NETBOX_CA_CERT", value_name = "PATH")]
    pub ca_cert: Option<PathBuf>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long, env = "NETBOX_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file to load instead of the platform default
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Flags that were given, as the top config layer. An absent
    /// `--insecure` leaves the file/env value in place.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            token: self.token.clone(),
            insecure: self.insecure.then_some(true),
            ca_cert: self.ca_cert.clone(),
            timeout: self.timeout,
        }
    }
}
