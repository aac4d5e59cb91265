mod email;

use crate::Config;
pub use email::EmailNotifier;
use parkvakt_domain::{ExpiryType, User, Vehicle, ID};
use std::sync::{Arc, Mutex};

/// Transport-agnostic outbound notification capability consumed by the
/// reminder sweep. The sweep only cares about the success of the dispatch.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn send_reminder(
        &self,
        recipient: &User,
        vehicle: &Vehicle,
        expiry_type: ExpiryType,
        days_remaining: i64,
    ) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct Services {
    pub notifier: Arc<dyn INotifier>,
}

impl Services {
    pub fn create(config: &Config) -> Self {
        Self {
            notifier: Arc::new(EmailNotifier::new(config)),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            notifier: Arc::new(InMemoryNotifier::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentReminder {
    pub recipient: String,
    pub vehicle_id: ID,
    pub plate: String,
    pub expiry_type: ExpiryType,
    pub days_remaining: i64,
}

/// Notifier that records dispatches instead of delivering them, used when
/// not running against a real email provider. Sends for plates registered
/// with `fail_plate` error out, so tests can exercise partial failures.
pub struct InMemoryNotifier {
    pub sent: Mutex<Vec<SentReminder>>,
    failing_plates: Mutex<Vec<String>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_plates: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_plate(&self, plate: &str) {
        self.failing_plates.lock().unwrap().push(plate.to_string());
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    async fn send_reminder(
        &self,
        recipient: &User,
        vehicle: &Vehicle,
        expiry_type: ExpiryType,
        days_remaining: i64,
    ) -> anyhow::Result<()> {
        if self.failing_plates.lock().unwrap().contains(&vehicle.plate) {
            anyhow::bail!("Delivery failed for recipient: {}", recipient.email);
        }
        self.sent.lock().unwrap().push(SentReminder {
            recipient: recipient.email.clone(),
            vehicle_id: vehicle.id.clone(),
            plate: vehicle.plate.clone(),
            expiry_type,
            days_remaining,
        });
        Ok(())
    }
}
