// Scripted stand-in for the simulation server, one accepted connection per test.
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::{future::Future, time::Duration};
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_tungstenite::{WebSocketStream, accept_async, tungstenite::Message};

pub type ServerSocket = WebSocketStream<tokio::net::TcpStream>;

// Upper bound on any single wait so a broken agent fails the test instead of hanging it.
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

// Bind an ephemeral port, run `script` against the first agent that connects, and return
// the ws:// url together with the script's result handle.
pub async fn spawn_server<F, Fut, T>(script: F) -> (String, JoinHandle<T>)
where
    F: FnOnce(ServerSocket) -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept agent connection");
        let socket = accept_async(stream).await.expect("websocket handshake");
        script(socket).await
    });

    (format!("ws://{addr}"), handle)
}

// Next JSON text message from the agent.
pub async fn recv_json(socket: &mut ServerSocket) -> Value {
    loop {
        let msg = tokio::time::timeout(RECV_TIMEOUT, socket.next())
            .await
            .expect("agent should send within timeout")
            .expect("agent should not hang up")
            .expect("frame should be readable");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).expect("agent should send json");
        }
    }
}

pub async fn send_text(socket: &mut ServerSocket, text: &str) {
    socket
        .send(Message::text(text.to_string()))
        .await
        .expect("send to agent");
}

// Everything the agent still sends until it goes away.
pub async fn drain(socket: &mut ServerSocket) -> Vec<Value> {
    let mut received = Vec::new();
    loop {
        let next = tokio::time::timeout(RECV_TIMEOUT, socket.next())
            .await
            .expect("agent should hang up within timeout");
        match next {
            Some(Ok(Message::Text(text))) => {
                received.push(serde_json::from_str(text.as_str()).expect("agent should send json"))
            }
            Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return received,
            Some(Ok(_)) => {}
        }
    }
}

pub fn state_message(x: i64, y: i64) -> String {
    format!(r#"{{"type":"state","tick":1,"tick_rate":30,"data":{{"player":{{"hp":50,"pos":[{x},{y}]}}}}}}"#)
}
