//! Platform event publication.
//!
//! Mutations that clients must react to immediately (today only language
//! publishes) are announced through an [`EventPublisher`]. The default
//! implementation logs the event; deployments with a realtime channel plug
//! their own publisher in behind the trait.

use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tokio::sync::Mutex;

/// An event emitted after a committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// A language pack version went live.
    LanguagePublished { code: String, version: i32 },
}

impl PlatformEvent {
    /// Topic string clients subscribe to.
    pub fn topic(&self) -> &'static str {
        match self {
            PlatformEvent::LanguagePublished { .. } => "language:published",
        }
    }

    /// Wire payload for the event.
    pub fn payload(&self) -> JsonValue {
        match self {
            PlatformEvent::LanguagePublished { code, version } => json!({
                "code": code,
                "version": version,
            }),
        }
    }
}

/// Publisher trait for platform events.
///
/// Publication is best-effort and happens after the database commit; a
/// failed publish must never fail the mutation.
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: PlatformEvent);
}

/// Default publisher that writes events to the log.
#[derive(Debug, Clone, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: PlatformEvent) {
        tracing::info!(
            topic = %event.topic(),
            payload = %event.payload(),
            "Publishing platform event"
        );
    }
}

/// Mock publisher for tests that records every published event.
#[derive(Debug, Clone, Default)]
pub struct MockEventPublisher {
    events: Arc<Mutex<Vec<PlatformEvent>>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events published so far, in order.
    pub async fn events(&self) -> Vec<PlatformEvent> {
        self.events.lock().await.clone()
    }

    pub async fn clear(&self) {
        self.events.lock().await.clear();
    }
}

#[async_trait::async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: PlatformEvent) {
        tracing::info!(
            topic = %event.topic(),
            payload = %event.payload(),
            "Mock: Would publish platform event"
        );
        self.events.lock().await.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_published_topic_and_payload() {
        let event = PlatformEvent::LanguagePublished {
            code: "DE".to_string(),
            version: 5,
        };
        assert_eq!(event.topic(), "language:published");

        let payload = event.payload();
        assert_eq!(payload["code"], "DE");
        assert_eq!(payload["version"], 5);
    }

    #[tokio::test]
    async fn test_mock_publisher_records_events() {
        let publisher = MockEventPublisher::new();
        publisher
            .publish(PlatformEvent::LanguagePublished {
                code: "FR".to_string(),
                version: 2,
            })
            .await;
        publisher
            .publish(PlatformEvent::LanguagePublished {
                code: "DE".to_string(),
                version: 7,
            })
            .await;

        let events = publisher.events().await;
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            PlatformEvent::LanguagePublished {
                code: "FR".to_string(),
                version: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_mock_publisher_clear() {
        let publisher = MockEventPublisher::new();
        publisher
            .publish(PlatformEvent::LanguagePublished {
                code: "ES".to_string(),
                version: 1,
            })
            .await;
        publisher.clear().await;
        assert!(publisher.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_tracing_publisher_is_fire_and_forget() {
        // Must not panic or block.
        TracingEventPublisher::new()
            .publish(PlatformEvent::LanguagePublished {
                code: "EN".to_string(),
                version: 1,
            })
            .await;
    }
}
