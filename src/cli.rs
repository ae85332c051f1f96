//! Command-line interface configuration.

use argh::FromArgs;
use std::net::SocketAddr;

/// A vanity import redirector for Go packages
#[derive(Debug, FromArgs)]
pub struct Cli {
    /// canonical external base URL, overrides BASE_URL (e.g. 'https://github.com/go-vikunja')
    #[argh(option, long = "base-url")]
    pub base_url: Option<String>,

    /// public hostname this server fronts, overrides DOMAIN (e.g. 'code.vikunja.io')
    #[argh(option)]
    pub domain: Option<String>,

    /// server bind address (default: '127.0.0.1:8000')
    #[argh(option, default = "\"127.0.0.1:8000\".parse().unwrap()")]
    pub bind: SocketAddr,
}
