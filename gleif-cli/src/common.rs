use std::sync::Arc;

use clap::ValueEnum;
use gleif::{Gleif, GleifBuilder, GleifError, HttpTransport};
use tracing_subscriber::EnvFilter;

/// Environment variable that swaps the network for the built-in demo dataset.
pub const USE_MOCK_ENV: &str = "GLEIF_USE_MOCK";

/// Log levels accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum LogLevel {
    /// Everything, including per-request spans.
    Debug,
    /// Progress messages.
    Info,
    /// Degraded results only.
    #[value(alias = "WARN")]
    Warning,
    /// Failures only.
    Error,
}

impl LogLevel {
    const fn directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

/// Install a stderr subscriber at `level`; `RUST_LOG` takes precedence when set.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Transport and API root for this run: the demo mock when [`USE_MOCK_ENV`]
/// is set, the public registry otherwise.
///
/// # Errors
/// Returns `GleifError::Connector` if the HTTP client cannot be built.
pub fn get_transport() -> Result<(Arc<dyn HttpTransport>, &'static str), GleifError> {
    if std::env::var_os(USE_MOCK_ENV).is_some() {
        tracing::info!("using the built-in demo dataset");
        let mock: Arc<dyn HttpTransport> = Arc::new(gleif_mock::fixtures::demo_transport());
        Ok((mock, gleif_mock::fixtures::DEMO_BASE_URL))
    } else {
        let live: Arc<dyn HttpTransport> = Arc::new(gleif_reqwest::ReqwestTransport::new_default()?);
        Ok((live, gleif::DEFAULT_BASE_URL))
    }
}

/// Builder preloaded with the transport chosen by [`get_transport`].
///
/// # Errors
/// See [`get_transport`].
pub fn builder() -> Result<GleifBuilder, GleifError> {
    let (transport, base_url) = get_transport()?;
    Ok(Gleif::builder().with_transport(transport).base_url(base_url))
}
