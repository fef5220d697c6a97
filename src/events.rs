use serde::Serialize;
use tokio::sync::broadcast;

use crate::sos::SosAlert;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SosEventKind {
    Created,
    Updated,
}

#[derive(Debug, Clone, Serialize)]
pub struct SosEvent {
    pub kind: SosEventKind,
    pub alert: SosAlert,
}

/// Fan-out of alert changes to dashboard subscribers. Publishing never
/// blocks; subscribers that fall behind lose the oldest events.
#[derive(Clone)]
pub struct EventHub {
    tx: broadcast::Sender<SosEvent>,
}

impl EventHub {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn publish(&self, kind: SosEventKind, alert: SosAlert) {
        // No subscribers is the normal case outside dashboard hours.
        let _ = self.tx.send(SosEvent { kind, alert });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SosEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sos::{tests::alert, tests::at, Priority};

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let hub = EventHub::new();
        let mut rx = hub.subscribe();
        let created = alert(Priority::Critical, at(6, 15));

        hub.publish(SosEventKind::Created, created.clone());

        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, SosEventKind::Created);
        assert_eq!(event.alert.id, created.id);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let hub = EventHub::new();
        assert_eq!(hub.subscriber_count(), 0);
        hub.publish(SosEventKind::Updated, alert(Priority::Medium, at(7, 0)));
    }
}
