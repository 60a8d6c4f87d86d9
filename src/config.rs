use clap::Args;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::render::RenderOptions;

/// Server settings. Every flag falls back to a `DOCS_*` environment variable.
#[derive(Debug, Clone, Args)]
pub struct SiteConfig {
    /// Address to bind
    #[arg(long, env = "DOCS_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "DOCS_PORT", default_value_t = 8080)]
    pub port: u16,

    /// How long copy buttons show "Copied!" (milliseconds)
    #[arg(long, env = "DOCS_COPY_RESET_MS", default_value_t = 2000)]
    pub copy_reset_ms: u64,

    /// Delay before scrolling to an in-page anchor (milliseconds)
    #[arg(long, env = "DOCS_SCROLL_DELAY_MS", default_value_t = 100)]
    pub scroll_delay_ms: u64,
}

impl SiteConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            copy_reset_ms: self.copy_reset_ms,
            scroll_delay_ms: self.scroll_delay_ms,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            copy_reset_ms: options.copy_reset_ms,
            scroll_delay_ms: options.scroll_delay_ms,
        }
    }
}
