//! Hub de seguimiento en vivo
//!
//! Registro de los dashboards conectados. Cada suscriptor recibe los
//! eventos por un canal mpsc acotado; la tarea del WebSocket los reenvía
//! al cliente. El registro vive solo en memoria y arranca vacío.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::{mpsc, RwLock};
use tokio::time::timeout;
use uuid::Uuid;

use crate::models::LocationBroadcast;

/// Extremo receptor entregado a quien abre la conexión
#[derive(Debug)]
pub struct Subscription {
    pub id: Uuid,
    pub receiver: mpsc::Receiver<String>,
}

/// Resultado de un envío masivo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub attempted: usize,
    pub delivered: usize,
    pub pruned: usize,
}

#[derive(Clone)]
pub struct TrackingHub {
    subscribers: Arc<RwLock<HashMap<Uuid, mpsc::Sender<String>>>>,
    buffer: usize,
    send_timeout: Duration,
}

enum SendOutcome {
    Delivered,
    Closed,
    TimedOut,
}

impl TrackingHub {
    pub fn new(buffer: usize, send_timeout: Duration) -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            buffer: buffer.max(1),
            send_timeout,
        }
    }

    pub async fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel(self.buffer);
        let id = Uuid::new_v4();

        let mut subscribers = self.subscribers.write().await;
        subscribers.insert(id, tx);
        log::info!("📡 Suscriptor {} conectado ({} activos)", id, subscribers.len());

        Subscription { id, receiver: rx }
    }

    /// Idempotente: quitar un suscriptor ausente no es un error
    pub async fn unsubscribe(&self, id: Uuid) -> bool {
        let mut subscribers = self.subscribers.write().await;
        let removed = subscribers.remove(&id).is_some();
        if removed {
            log::info!("🔌 Suscriptor {} desconectado ({} activos)", id, subscribers.len());
        }
        removed
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    pub async fn broadcast_location(&self, event: &LocationBroadcast) -> BroadcastReport {
        match serde_json::to_string(event) {
            Ok(message) => self.broadcast(message).await,
            Err(e) => {
                log::error!("❌ No se pudo serializar el evento de ubicación: {}", e);
                BroadcastReport::default()
            }
        }
    }

    /// Envía `message` a cada suscriptor activo.
    ///
    /// Se trabaja sobre una copia del registro y los envíos corren en
    /// paralelo, así la llamada completa tarda a lo sumo un timeout. Los
    /// suscriptores con canal cerrado se eliminan al terminar. Un envío que
    /// excede el timeout pierde solo ese mensaje y conserva al suscriptor.
    pub async fn broadcast(&self, message: String) -> BroadcastReport {
        let snapshot: Vec<(Uuid, mpsc::Sender<String>)> = {
            let subscribers = self.subscribers.read().await;
            subscribers
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        let mut report = BroadcastReport {
            attempted: snapshot.len(),
            ..Default::default()
        };
        let mut dead = Vec::new();

        let sends = snapshot.iter().map(|(id, tx)| {
            let message = message.clone();
            async move { (*id, self.send_one(tx, message).await) }
        });

        for (id, outcome) in join_all(sends).await {
            match outcome {
                SendOutcome::Delivered => report.delivered += 1,
                SendOutcome::Closed => dead.push(id),
                SendOutcome::TimedOut => {
                    log::warn!("⏱️ Suscriptor {} lento, mensaje descartado", id);
                }
            }
        }

        if !dead.is_empty() {
            let mut subscribers = self.subscribers.write().await;
            for id in &dead {
                if subscribers.remove(id).is_some() {
                    report.pruned += 1;
                }
            }
            log::info!("🧹 {} suscriptores muertos eliminados", report.pruned);
        }

        report
    }

    async fn send_one(&self, tx: &mpsc::Sender<String>, message: String) -> SendOutcome {
        match timeout(self.send_timeout, tx.send(message)).await {
            Ok(Ok(())) => SendOutcome::Delivered,
            Ok(Err(_)) => SendOutcome::Closed,
            Err(_) => SendOutcome::TimedOut,
        }
    }
}

impl Default for TrackingHub {
    fn default() -> Self {
        Self::new(64, Duration::from_millis(500))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> LocationBroadcast {
        LocationBroadcast {
            van_id: "van-1".to_string(),
            lat: 18.52,
            lng: 73.85,
            status: "on_route".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fan_out_to_all_subscribers() {
        let hub = TrackingHub::default();
        let mut subs = Vec::new();
        for _ in 0..3 {
            subs.push(hub.subscribe().await);
        }

        let report = hub.broadcast_location(&event()).await;
        assert_eq!(report, BroadcastReport { attempted: 3, delivered: 3, pruned: 0 });

        for sub in subs.iter_mut() {
            let msg = sub.receiver.recv().await.unwrap();
            let decoded: LocationBroadcast = serde_json::from_str(&msg).unwrap();
            assert_eq!(decoded, event());
        }
    }

    #[tokio::test]
    async fn test_removed_subscriber_is_not_attempted() {
        let hub = TrackingHub::default();
        let _a = hub.subscribe().await;
        let b = hub.subscribe().await;
        let _c = hub.subscribe().await;

        assert!(hub.unsubscribe(b.id).await);
        let report = hub.broadcast_location(&event()).await;
        assert_eq!(report.attempted, 2);
        assert_eq!(report.delivered, 2);
    }

    #[tokio::test]
    async fn test_zero_subscribers() {
        let hub = TrackingHub::default();
        let report = hub.broadcast("hello".to_string()).await;
        assert_eq!(report, BroadcastReport::default());
    }

    #[tokio::test]
    async fn test_dead_subscriber_is_pruned_without_affecting_others() {
        let hub = TrackingHub::default();
        let dead = hub.subscribe().await;
        let mut alive = hub.subscribe().await;
        drop(dead.receiver);

        let report = hub.broadcast("ping".to_string()).await;
        assert_eq!(report, BroadcastReport { attempted: 2, delivered: 1, pruned: 1 });
        assert_eq!(alive.receiver.recv().await.as_deref(), Some("ping"));
        assert_eq!(hub.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn test_slow_subscriber_keeps_handle() {
        let hub = TrackingHub::new(1, Duration::from_millis(20));
        let mut slow = hub.subscribe().await;

        hub.broadcast("first".to_string()).await;
        let report = hub.broadcast("second".to_string()).await;
        assert_eq!(report, BroadcastReport { attempted: 1, delivered: 0, pruned: 0 });
        assert_eq!(hub.subscriber_count().await, 1);
        assert_eq!(slow.receiver.recv().await.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_stalled_subscribers_share_one_timeout() {
        let hub = TrackingHub::new(1, Duration::from_millis(200));
        let mut stalled = Vec::new();
        for _ in 0..5 {
            stalled.push(hub.subscribe().await);
        }
        hub.broadcast("fill".to_string()).await;
        let mut listener = hub.subscribe().await;

        let started = std::time::Instant::now();
        let report = hub.broadcast("next".to_string()).await;
        let elapsed = started.elapsed();

        assert_eq!(report, BroadcastReport { attempted: 6, delivered: 1, pruned: 0 });
        assert!(elapsed < Duration::from_millis(600), "broadcast took {:?}", elapsed);
        assert_eq!(listener.receiver.recv().await.as_deref(), Some("next"));
        assert_eq!(hub.subscriber_count().await, 6);
    }

    #[tokio::test]
    async fn test_unsubscribe_is_idempotent() {
        let hub = TrackingHub::default();
        let sub = hub.subscribe().await;
        assert!(hub.unsubscribe(sub.id).await);
        assert!(!hub.unsubscribe(sub.id).await);
        assert_eq!(hub.subscriber_count().await, 0);
    }

    #[tokio::test]
    async fn test_serial_updates_keep_order() {
        let hub = TrackingHub::default();
        let mut sub = hub.subscribe().await;
        for i in 0..5 {
            hub.broadcast(i.to_string()).await;
        }
        for i in 0..5 {
            assert_eq!(sub.receiver.recv().await, Some(i.to_string()));
        }
    }
}
