// Framework bootstrap for the agent process.

use crate::frameworks::config::{self, LogFormat};
use crate::interface_adapters::clock::SystemClock;
use crate::interface_adapters::errors::AgentError;
use crate::interface_adapters::net::{self, SessionStats};
use crate::use_cases::AgentUseCase;

use tracing::{Instrument, info, info_span};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    let fmt = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match format {
        // Session span (endpoint, agent) on every line.
        LogFormat::Json => fmt.json().with_current_span(true).init(),
        LogFormat::Compact => fmt.compact().init(),
    }

    // Panics still end the process; route them through tracing first.
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "agent panicked");
    }));
}

/// Connect to `endpoint`, greet as `agent_name`, and play until the server hangs up.
pub async fn run(endpoint: &str, agent_name: &str) -> Result<SessionStats, AgentError> {
    let span = info_span!("agent", endpoint, agent = agent_name);

    async move {
        info!("connecting");
        let mut socket = net::connect(endpoint).await?;
        info!("connected");

        let agent = AgentUseCase::new(SystemClock, agent_name);
        net::run_session(&mut socket, &agent).await
    }
    .instrument(span)
    .await
}

pub async fn run_with_config() -> Result<SessionStats, AgentError> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing(config::log_format());

    let endpoint = config::server_url()?;
    let agent_name = config::agent_name();

    run(&endpoint, &agent_name).await
}
