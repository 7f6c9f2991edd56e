//! Subscriber registry for real-time dashboard updates

use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;
use uuid::Uuid;

use crate::types::WsMessage;

pub type SubscriberId = Uuid;

/// Set of live output channels the simulation loop publishes into.
///
/// Registration is independent of publish timing: a subscriber added between
/// two ticks sees exactly the messages of ticks after its registration.
/// Delivery is a non-blocking channel send, so a slow client backs up only
/// its own channel and never stalls the timer.
pub struct SubscriberRegistry {
    subscribers: Mutex<HashMap<SubscriberId, UnboundedSender<WsMessage>>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    pub async fn subscribe(&self, sender: UnboundedSender<WsMessage>) -> SubscriberId {
        let id = Uuid::new_v4();
        self.subscribers.lock().await.insert(id, sender);
        debug!(subscriber = %id, "Subscriber registered");
        id
    }

    /// No-op when the id is already absent.
    pub async fn unsubscribe(&self, id: SubscriberId) {
        if self.subscribers.lock().await.remove(&id).is_some() {
            debug!(subscriber = %id, "Subscriber removed");
        }
    }

    /// Delivers `message` to every current subscriber. A failed send means
    /// the receiving side is gone; the failing handle is dropped from the
    /// registry after the delivery pass without affecting the others.
    pub async fn publish(&self, message: WsMessage) {
        let mut subscribers = self.subscribers.lock().await;
        let dead: Vec<SubscriberId> = subscribers
            .iter()
            .filter(|(_, sender)| sender.send(message.clone()).is_err())
            .map(|(id, _)| *id)
            .collect();
        for id in dead {
            subscribers.remove(&id);
            debug!(subscriber = %id, "Dropped subscriber after failed delivery");
        }
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.len()
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use tokio::sync::mpsc;

    fn price_message() -> WsMessage {
        WsMessage::PriceUpdate(crate::types::PricePair {
            price_a: dec!(0.7412),
            price_b: dec!(0.7398),
            observed_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn subscribers_receive_each_publish_exactly_once() {
        let registry = SubscriberRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.subscribe(tx).await;

        registry.publish(price_message()).await;

        assert!(rx.recv().await.is_some());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unsubscribed_handles_receive_nothing() {
        let registry = SubscriberRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = registry.subscribe(tx).await;
        registry.unsubscribe(id).await;

        registry.publish(price_message()).await;

        assert!(rx.try_recv().is_err());
        assert_eq!(registry.subscriber_count().await, 0);
    }

    #[tokio::test]
    async fn unsubscribing_an_absent_id_is_a_noop() {
        let registry = SubscriberRegistry::new();
        registry.unsubscribe(Uuid::new_v4()).await;
        assert_eq!(registry.subscriber_count().await, 0);
    }

    #[tokio::test]
    async fn failed_delivery_drops_only_the_dead_subscriber() {
        let registry = SubscriberRegistry::new();

        let (dead_tx, dead_rx) = mpsc::unbounded_channel();
        registry.subscribe(dead_tx).await;
        drop(dead_rx);

        let (live_tx, mut live_rx) = mpsc::unbounded_channel();
        registry.subscribe(live_tx).await;

        registry.publish(price_message()).await;

        // The live subscriber still got the message from the same pass.
        assert!(live_rx.recv().await.is_some());
        // The dead one was pruned.
        assert_eq!(registry.subscriber_count().await, 1);
    }
}
