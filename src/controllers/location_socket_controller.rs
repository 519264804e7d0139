//! Canal WebSocket de los dashboards
//!
//! Cada conexión se registra en el hub; una tarea reenvía los eventos como
//! frames de texto y el bucle de lectura solo vigila la conexión.

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};

use crate::services::TrackingHub;

pub async fn handle_socket(socket: WebSocket, hub: TrackingHub) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let subscription = hub.subscribe().await;
    let subscriber_id = subscription.id;
    let mut receiver = subscription.receiver;

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            if ws_sender.send(Message::Text(message)).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            match msg {
                // Keep-alive del cliente; el contenido se ignora
                Ok(Message::Text(_)) | Ok(Message::Binary(_)) => {}
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    log::debug!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    // Cualquiera de los dos lados que termine cierra la conexión
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    hub.unsubscribe(subscriber_id).await;
}
