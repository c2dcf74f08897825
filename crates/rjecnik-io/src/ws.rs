use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::StreamExt;
use rjecnik_types::BridgeMessage;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_async;

/// Decode one text frame from the companion page
pub fn parse_bridge_message(text: &str) -> anyhow::Result<BridgeMessage> {
    let message: BridgeMessage = serde_json::from_str(text)?;
    if message.word.trim().is_empty() {
        anyhow::bail!("bridge message without a word");
    }
    Ok(message)
}

/// Accept WebSocket clients on `addr` and hand every valid message to
/// `on_message`. Returns the bound address once listening.
pub async fn start_bridge_listener<F>(addr: &str, on_message: F) -> anyhow::Result<SocketAddr>
where
    F: Fn(BridgeMessage) + Send + Sync + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("Message bridge listening on {}", local_addr);

    let on_message = Arc::new(on_message);
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    tracing::debug!("Bridge client connected: {}", peer);
                    tokio::spawn(serve_client(stream, on_message.clone()));
                }
                Err(e) => tracing::warn!("Bridge accept failed: {}", e),
            }
        }
    });

    Ok(local_addr)
}

async fn serve_client<F>(stream: TcpStream, on_message: Arc<F>)
where
    F: Fn(BridgeMessage) + Send + Sync + 'static,
{
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            tracing::warn!("Bridge handshake failed: {}", e);
            return;
        }
    };
    let (_, mut read) = ws_stream.split();

    while let Some(msg) = read.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!("Bridge client dropped: {}", e);
                break;
            }
        };

        if let Ok(text) = msg.to_text()
            && msg.is_text()
        {
            match parse_bridge_message(text) {
                Ok(message) => on_message(message),
                Err(e) => tracing::warn!("Ignoring bridge frame: {}", e),
            }
        }
    }
}
