//! 스커틀 이벤트 버스.
//!
//! `tokio::broadcast` 기반 진행 이벤트 라우팅.

use scuttle_core::models::scuttle::ScuttleEvent;
use tokio::sync::broadcast;
use tracing::debug;

/// 스커틀 이벤트 버스
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ScuttleEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// 이벤트 발행 (구독자가 없으면 버려짐)
    pub fn publish(&self, event: ScuttleEvent) {
        debug!(?event, "이벤트 발행");
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScuttleEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(ScuttleEvent::Attempt { attempt: 1 });
        bus.publish(ScuttleEvent::Stopped);

        assert_eq!(rx.recv().await.unwrap(), ScuttleEvent::Attempt { attempt: 1 });
        assert_eq!(rx.recv().await.unwrap(), ScuttleEvent::Stopped);
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        EventBus::default().publish(ScuttleEvent::Stopped);
    }
}
