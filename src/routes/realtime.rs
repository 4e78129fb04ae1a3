use log::{info, warn};
use rocket::futures::{SinkExt, StreamExt};
use rocket::{get, Shutdown, State};
use rocket_ws::{Channel, Message, WebSocket};

use crate::modules::relay::{decorate, Registry};

/// # realtime relay
/// every text message received is sent back, prefixed, to all connected clients.
#[get("/ws")]
pub fn relay(ws: WebSocket, registry: &State<Registry>, mut shutdown: Shutdown) -> Channel<'static> {
    let registry = registry.inner().clone();

    ws.channel(move |mut stream| {
        Box::pin(async move {
            let (id, mut outgoing) = registry.add();
            info!(target: "routes/realtime:relay", "Client connected (connection: {})", id);

            loop {
                tokio::select! {
                    incoming = stream.next() => match incoming {
                        Some(Ok(Message::Text(message))) => {
                            info!(target: "routes/realtime:relay", "Received: {}", message);
                            registry.broadcast(&decorate(&message));
                        }
                        Some(Ok(Message::Close(_))) | None => break,
                        Some(Ok(_)) => {}
                        Some(Err(error)) => {
                            warn!(target: "routes/realtime:relay", "socket error (connection: {}): {}", id, error);
                            break;
                        }
                    },
                    Some(update) = outgoing.recv() => {
                        if let Err(error) = stream.send(Message::Text(update)).await {
                            warn!(target: "routes/realtime:relay", "failed sending to connection {}: {}", id, error);
                            break;
                        }
                    },
                    _ = &mut shutdown => break,
                }
            }

            registry.remove(id);
            info!(target: "routes/realtime:relay", "Client disconnected (connection: {})", id);
            Ok(())
        })
    })
}
