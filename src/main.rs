use std::process::ExitCode;

// Single connection, single task.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match agent_client::run_with_config().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // Every error is fatal; nothing is retried.
            tracing::error!(error = %e, "agent stopped");
            ExitCode::FAILURE
        }
    }
}
