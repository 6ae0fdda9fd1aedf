// Use cases layer: the agent's stimulus-response workflow.

pub mod agent;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use agent::AgentUseCase;
pub use types::{AgentCommand, ServerEvent};
