//! `network.conflict` object served over a Unix stream socket.
//!
//! Newline-delimited JSON. A client sends
//! `{"object":"network.conflict","method":"status"}` and gets one reply
//! line, or `"method":"subscribe"` and then receives one
//! `{"event":"update","data":{..}}` line per push until it disconnects.

use super::status::StatusPublisher;
use crate::models::StatusReply;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::broadcast::error::RecvError;

/// Name of the object exposed to clients.
pub const OBJECT_NAME: &str = "network.conflict";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub object: String,
    pub method: String,
}

impl Request {
    pub fn new(method: &str) -> Self {
        Request {
            object: OBJECT_NAME.to_string(),
            method: method.to_string(),
        }
    }
}

/// One line sent back to a client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Response {
    Event { event: String, data: StatusReply },
    Error { error: String },
    Status(StatusReply),
}

/// Bound control socket; the file is removed on drop.
pub struct ControlServer {
    listener: UnixListener,
    path: PathBuf,
}

impl ControlServer {
    /// Bind at `path`, replacing a stale socket file.
    pub fn bind(path: &Path) -> Result<Self, Box<dyn Error>> {
        if path.exists() {
            log::warn!("Removing stale control socket {}", path.display());
            std::fs::remove_file(path)
                .map_err(|e| format!("Error removing {}: {e}", path.display()))?;
        }
        let listener = UnixListener::bind(path)
            .map_err(|e| format!("Failed to bind control socket {}: {e}", path.display()))?;
        log::info!("{OBJECT_NAME} object registered at {}", path.display());
        Ok(ControlServer {
            listener,
            path: path.to_path_buf(),
        })
    }

    /// Accept clients forever, one task per connection.
    pub async fn serve(self, publisher: Arc<StatusPublisher>) {
        loop {
            match self.listener.accept().await {
                Ok((stream, _)) => {
                    let publisher = Arc::clone(&publisher);
                    tokio::spawn(async move {
                        if let Err(e) = handle_client(stream, publisher).await {
                            log::debug!("Control client dropped: {e}");
                        }
                    });
                }
                Err(e) => log::warn!("Control socket accept failed: {e}"),
            }
        }
    }
}

impl Drop for ControlServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Answer a single request line.
pub fn respond(line: &str, publisher: &StatusPublisher) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            return Response::Error {
                error: format!("Invalid request: {e}"),
            }
        }
    };
    if request.object != OBJECT_NAME {
        return Response::Error {
            error: format!("Not found: {}", request.object),
        };
    }
    match request.method.as_str() {
        "status" => {
            let status = publisher.query();
            log::info!("status method called - conflict={}", status.conflict as u32);
            Response::Status(status.to_reply())
        }
        other => Response::Error {
            error: format!("Method not found: {other}"),
        },
    }
}

async fn handle_client(
    stream: UnixStream,
    publisher: Arc<StatusPublisher>,
) -> Result<(), Box<dyn Error>> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_subscribe(line) {
            let mut updates = publisher.subscribe();
            log::debug!("Client subscribed to updates");
            loop {
                let status = match updates.recv().await {
                    Ok(status) => status,
                    Err(RecvError::Lagged(n)) => {
                        log::warn!("Subscriber lagged, {n} updates skipped");
                        continue;
                    }
                    Err(RecvError::Closed) => return Ok(()),
                };
                let event = Response::Event {
                    event: "update".to_string(),
                    data: status.to_update(),
                };
                write_line(&mut writer, &event).await?;
            }
        }
        let response = respond(line, &publisher);
        write_line(&mut writer, &response).await?;
    }
    Ok(())
}

fn is_subscribe(line: &str) -> bool {
    serde_json::from_str::<Request>(line)
        .map(|r| r.object == OBJECT_NAME && r.method == "subscribe")
        .unwrap_or(false)
}

async fn write_line<W>(writer: &mut W, response: &Response) -> Result<(), Box<dyn Error>>
where
    W: AsyncWrite + Unpin,
{
    let mut json = serde_json::to_string(response)?;
    json.push('\n');
    writer.write_all(json.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
