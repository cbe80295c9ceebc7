//! Structured logging setup (ambient stack, SPEC_FULL.md §0).
//!
//! Mirrors the teacher's compact-by-default / verbose-on-request tracing
//! setup, with `ASSEMBLYZERO_LOG` taking the place of the project-specific
//! env var and falling back to `RUST_LOG`.

use std::io::IsTerminal;

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Returns true if colored/TTY-aware output should be used.
#[must_use]
pub fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn resolve_filter(verbose: bool) -> EnvFilter {
    std::env::var("ASSEMBLYZERO_LOG")
        .ok()
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| {
            if verbose {
                EnvFilter::new("assemblyzero=debug,info")
            } else {
                EnvFilter::new("assemblyzero=info,warn")
            }
        })
}

/// Initialize the global tracing subscriber.
///
/// Filter precedence: `ASSEMBLYZERO_LOG` > `RUST_LOG` > `verbose` default >
/// compact default.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = resolve_filter(verbose);

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).compact())
            .try_init()?;
    }

    Ok(())
}
