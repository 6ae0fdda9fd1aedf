// Interface adapters: wire protocol, WebSocket session, and system time.

pub mod clock;
pub mod errors;
pub mod net;
pub mod protocol;
