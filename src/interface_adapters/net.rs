use crate::domain::Clock;
use crate::interface_adapters::errors::AgentError;
use crate::interface_adapters::protocol::{ClientMessage, decode_server_message};
use crate::use_cases::{AgentCommand, AgentUseCase, ServerEvent};

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{Error as WsError, Message, protocol::CloseFrame},
};
use tracing::{debug, info, warn};

pub type AgentSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Per-connection traffic counters, reported when the session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub msgs_in: u64,
    pub msgs_out: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub intents_sent: u64,
}

enum LoopControl {
    Continue,
    Disconnect,
}

pub async fn connect(endpoint: &str) -> Result<AgentSocket, AgentError> {
    // No timeout and no retry: an unreachable server is fatal.
    let (socket, response) = connect_async(endpoint)
        .await
        .map_err(AgentError::Connect)?;
    debug!(status = %response.status(), "websocket upgrade accepted");
    Ok(socket)
}

/// Greet the server, then react to every inbound message until the connection closes.
///
/// Returns the session's traffic counters on an orderly close. Any decode, send or
/// transport failure ends the session with an error.
pub async fn run_session<S, C>(
    socket: &mut WebSocketStream<S>,
    agent: &AgentUseCase<C>,
) -> Result<SessionStats, AgentError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    C: Clock,
{
    let mut stats = SessionStats::default();

    handshake(socket, agent, &mut stats).await?;

    info!("listening for messages");
    let outcome = receive_loop(socket, agent, &mut stats).await;

    debug!(
        msgs_in = stats.msgs_in,
        msgs_out = stats.msgs_out,
        bytes_in = stats.bytes_in,
        bytes_out = stats.bytes_out,
        intents_sent = stats.intents_sent,
        "connection stats"
    );
    info!("disconnected");

    outcome.map(|()| stats)
}

async fn handshake<S, C>(
    socket: &mut WebSocketStream<S>,
    agent: &AgentUseCase<C>,
    stats: &mut SessionStats,
) -> Result<(), AgentError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    C: Clock,
{
    // Fire-and-forget; the server's hello (if any) arrives through the normal loop.
    let hello = ClientMessage::from(agent.hello());
    let bytes = send_message(socket, &hello).await?;
    stats.msgs_out += 1;
    stats.bytes_out += bytes as u64;
    info!(agent = %agent.agent_name, "hello sent");
    Ok(())
}

async fn receive_loop<S, C>(
    socket: &mut WebSocketStream<S>,
    agent: &AgentUseCase<C>,
    stats: &mut SessionStats,
) -> Result<(), AgentError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    C: Clock,
{
    loop {
        let incoming = socket.next().await;
        match handle_incoming(socket, incoming, agent, stats).await? {
            LoopControl::Continue => {}
            LoopControl::Disconnect => return Ok(()),
        }
    }
}

async fn handle_incoming<S, C>(
    socket: &mut WebSocketStream<S>,
    incoming: Option<Result<Message, WsError>>,
    agent: &AgentUseCase<C>,
    stats: &mut SessionStats,
) -> Result<LoopControl, AgentError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    C: Clock,
{
    match incoming {
        Some(Ok(msg)) => match msg {
            Message::Text(text) => handle_payload(socket, text.as_bytes(), agent, stats).await,
            Message::Binary(bytes) => handle_payload(socket, &bytes, agent, stats).await,
            // Control frames are answered by the transport.
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => Ok(LoopControl::Continue),
            Message::Close(frame) => {
                log_close(frame.as_ref());
                Ok(LoopControl::Disconnect)
            }
        },
        Some(Err(WsError::ConnectionClosed | WsError::AlreadyClosed)) | None => {
            info!("websocket closed");
            Ok(LoopControl::Disconnect)
        }
        Some(Err(e)) => {
            warn!(error = %e, "websocket recv error");
            Err(AgentError::Receive(e))
        }
    }
}

async fn handle_payload<S, C>(
    socket: &mut WebSocketStream<S>,
    payload: &[u8],
    agent: &AgentUseCase<C>,
    stats: &mut SessionStats,
) -> Result<LoopControl, AgentError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    C: Clock,
{
    stats.msgs_in += 1;
    stats.bytes_in += payload.len() as u64;

    let event = decode_server_message(payload).map_err(|e| {
        warn!(bytes = payload.len(), error = %e, "failed to parse server message");
        AgentError::Malformed(e)
    })?;
    debug!(kind = event.kind(), "received message");
    log_event(&event, payload);

    if let Some(command) = agent.react(&event) {
        send_command(socket, command, stats).await?;
    }

    Ok(LoopControl::Continue)
}

fn log_event(event: &ServerEvent, payload: &[u8]) {
    match event {
        ServerEvent::State { player_pos } => info!(pos = %player_pos, "player position"),
        ServerEvent::Hello { version } => info!(version = ?version, "server hello"),
        ServerEvent::Ack { seq, tick } => debug!(?seq, ?tick, "received acknowledgment"),
        ServerEvent::Error { seq, reason } => warn!(?seq, %reason, "server reported error"),
        ServerEvent::Unknown { kind } => debug!(
            ?kind,
            payload = %String::from_utf8_lossy(payload),
            "unknown message"
        ),
    }
}

async fn send_command<S>(
    socket: &mut WebSocketStream<S>,
    command: AgentCommand,
    stats: &mut SessionStats,
) -> Result<(), AgentError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let intent = match &command {
        AgentCommand::MoveTo { seq, target } => {
            info!(destination = %target, "moving to");
            Some(*seq)
        }
        AgentCommand::Hello { .. } => None,
    };

    let bytes = send_message(socket, &ClientMessage::from(command)).await?;
    stats.msgs_out += 1;
    stats.bytes_out += bytes as u64;

    if let Some(seq) = intent {
        stats.intents_sent += 1;
        debug!(seq, bytes, "intent sent");
    }
    Ok(())
}

async fn send_message<S>(
    socket: &mut WebSocketStream<S>,
    msg: &ClientMessage,
) -> Result<usize, AgentError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let txt = serde_json::to_string(msg).map_err(AgentError::Encode)?;
    let bytes = txt.len();
    // `send` flushes, so the reply is on the wire before the next receive.
    socket
        .send(Message::text(txt))
        .await
        .map_err(AgentError::Send)?;
    Ok(bytes)
}

fn log_close(frame: Option<&CloseFrame>) {
    match frame {
        Some(frame) => info!(
            code = u16::from(frame.code),
            reason = &*frame.reason,
            "server closed connection"
        ),
        None => info!("server closed connection"),
    }
}
