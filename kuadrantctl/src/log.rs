use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// How log events are rendered on standard error.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

// === impl LogFormat ===

impl LogFormat {
    /// Installs the global subscriber. Logs are written to standard error so
    /// that manifests written to standard output can be piped.
    pub fn try_init(self, filter: &str) -> Result<()> {
        let filter =
            EnvFilter::try_new(filter).with_context(|| format!("invalid log filter: {filter}"))?;
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);
        match self {
            Self::Plain => builder.try_init(),
            Self::Json => builder.json().try_init(),
        }
        .map_err(|error| anyhow!("failed to initialize logging: {error}"))
    }
}
