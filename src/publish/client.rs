//! Client side of the control socket, used by the `status` and `listen` commands.

use super::control::{Request, Response};
use crate::models::StatusReply;
use std::error::Error;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::UnixStream;

async fn send(
    path: &Path,
    request: &Request,
) -> Result<Lines<BufReader<UnixStream>>, Box<dyn Error>> {
    let mut stream = UnixStream::connect(path)
        .await
        .map_err(|e| format!("Cannot connect to {}: {e}", path.display()))?;

    let mut line = serde_json::to_string(request)?;
    line.push('\n');
    stream.write_all(line.as_bytes()).await?;
    stream.flush().await?;

    Ok(BufReader::new(stream).lines())
}

fn parse(line: &str) -> Result<Response, Box<dyn Error>> {
    serde_json::from_str(line).map_err(|e| format!("Invalid reply {line:?}: {e}").into())
}

/// Call the `status` method once.
pub async fn query_status(path: &Path) -> Result<StatusReply, Box<dyn Error>> {
    let mut lines = send(path, &Request::new("status")).await?;
    let line = lines
        .next_line()
        .await?
        .ok_or("Connection closed before reply")?;
    match parse(&line)? {
        Response::Status(reply) => Ok(reply),
        Response::Error { error } => Err(error.into()),
        Response::Event { .. } => Err("Unexpected event in status reply".into()),
    }
}

/// Subscribe and hand every `update` to `on_update` until the server goes away.
pub async fn listen<F>(path: &Path, mut on_update: F) -> Result<(), Box<dyn Error>>
where
    F: FnMut(&StatusReply),
{
    let mut lines = send(path, &Request::new("subscribe")).await?;
    while let Some(line) = lines.next_line().await? {
        match parse(&line)? {
            Response::Event { data, .. } => on_update(&data),
            Response::Error { error } => return Err(error.into()),
            Response::Status(_) => log::debug!("Ignoring status line while listening"),
        }
    }
    Ok(())
}
