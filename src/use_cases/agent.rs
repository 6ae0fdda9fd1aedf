use crate::domain::Clock;
use crate::use_cases::types::{AgentCommand, ServerEvent};

// Scripted agent: greet once, then nudge east on every state broadcast.
pub struct AgentUseCase<C> {
    pub clock: C,
    pub agent_name: String,
}

impl<C> AgentUseCase<C>
where
    C: Clock,
{
    pub fn new(clock: C, agent_name: impl Into<String>) -> Self {
        Self {
            clock,
            agent_name: agent_name.into(),
        }
    }

    /// Handshake sent right after connecting. Nothing waits for a reply.
    pub fn hello(&self) -> AgentCommand {
        AgentCommand::Hello {
            agent: self.agent_name.clone(),
        }
    }

    /// Exactly one move per state update; every other message is informational.
    pub fn react(&self, event: &ServerEvent) -> Option<AgentCommand> {
        match event {
            ServerEvent::State { player_pos } => Some(AgentCommand::MoveTo {
                seq: self.clock.now_epoch_millis(),
                target: player_pos.nudged_east(),
            }),
            ServerEvent::Hello { .. }
            | ServerEvent::Ack { .. }
            | ServerEvent::Error { .. }
            | ServerEvent::Unknown { .. } => None,
        }
    }
}
