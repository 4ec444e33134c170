use crate::Result;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging/tracing for a zaplink host process.
///
/// Safe to call once at startup; `RUST_LOG` overrides the default filter.
pub fn init(service_name: &str) -> Result<()> {
    // Default: info for our crates, warn for everything else.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "info,zaplink_core=info,zaplink_client=info,{service_name}=info"
        ))
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .init();

    Ok(())
}
