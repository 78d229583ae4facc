// JSON-over-WebSocket plumbing: one serialized event per text message.

use std::fmt;
use std::io;
use std::net::{TcpStream, ToSocketAddrs};

use itertools::Itertools;
use serde::{de, Serialize};
use tungstenite::protocol::Role;
use tungstenite::{Message, WebSocket};


// Default port of the game server.
pub const PORT: u16 = 5000;


#[derive(Debug)]
pub enum CommunicationError {
    Socket(tungstenite::Error),
    Serde(serde_json::Error),
    Protocol(String),
}

impl fmt::Display for CommunicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunicationError::Socket(err) => write!(f, "socket error: {}", err),
            CommunicationError::Serde(err) => write!(f, "serialization error: {}", err),
            CommunicationError::Protocol(message) => write!(f, "protocol error: {}", message),
        }
    }
}

impl std::error::Error for CommunicationError {}

pub fn write_obj<T, S>(socket: &mut WebSocket<S>, obj: &T) -> Result<(), CommunicationError>
where
    T: Serialize,
    S: io::Read + io::Write,
{
    let serialized = serde_json::to_string(obj).map_err(CommunicationError::Serde)?;
    socket.send(Message::Text(serialized)).map_err(CommunicationError::Socket)
}

pub fn read_obj<T, S>(socket: &mut WebSocket<S>) -> Result<T, CommunicationError>
where
    T: de::DeserializeOwned,
    S: io::Read + io::Write,
{
    let msg = socket.read().map_err(CommunicationError::Socket)?;
    if let Message::Text(msg) = msg {
        serde_json::from_str(&msg).map_err(CommunicationError::Serde)
    } else {
        Err(CommunicationError::Protocol(format!("expected text, got {:?}", msg)))
    }
}

// Reading and writing happen on different threads, each with its own socket handle
// over the same underlying stream.
pub fn clone_websocket(
    socket: &WebSocket<TcpStream>, role: Role,
) -> io::Result<WebSocket<TcpStream>> {
    let stream = socket.get_ref().try_clone()?;
    let config = *socket.get_config();
    Ok(WebSocket::from_raw_socket(stream, role, Some(config)))
}

// Connects to the server and returns (reader, writer) socket handles.
pub fn connect(server_address: &str) -> anyhow::Result<(WebSocket<TcpStream>, WebSocket<TcpStream>)> {
    let addrs = (server_address, PORT).to_socket_addrs()?.collect_vec();
    log::info!("Connecting to {:?}...", addrs);
    let stream = TcpStream::connect(&addrs[..])?;
    let ws_url = format!("ws://{}:{}/", server_address, PORT);
    let (socket_in, _response) = tungstenite::client(ws_url.as_str(), stream)
        .map_err(|err| anyhow::anyhow!("websocket handshake failed: {}", err))?;
    let socket_out = clone_websocket(&socket_in, Role::Client)?;
    Ok((socket_in, socket_out))
}
