use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, RwLock};

use crate::map::MapView;
use crate::models::{Notifier, StatusLevel, StatusMessage};

/// What the dashboard page shows, replaced wholesale after every cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub title: String,
    /// Number of completed refresh cycles
    pub cycle: u64,
    pub updated_at: Option<DateTime<Utc>>,
    pub refresh_interval_secs: u64,
    pub messages: Vec<StatusMessage>,
    /// `None` when the last cycle produced no vehicles
    pub view: Option<MapView>,
}

/// Shared display region written by the refresh task and read by HTTP handlers
#[derive(Clone)]
pub struct Dashboard {
    title: String,
    refresh_interval_secs: u64,
    current: Arc<RwLock<Snapshot>>,
}

impl Dashboard {
    pub fn new(title: impl Into<String>, refresh_interval_secs: u64) -> Self {
        let title = title.into();
        let initial = Snapshot {
            title: title.clone(),
            cycle: 0,
            updated_at: None,
            refresh_interval_secs,
            messages: Vec::new(),
            view: None,
        };
        Self {
            title,
            refresh_interval_secs,
            current: Arc::new(RwLock::new(initial)),
        }
    }

    /// Page title fixed at startup
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the displayed snapshot with the outcome of one cycle
    pub fn publish(&self, messages: Vec<StatusMessage>, view: Option<MapView>) -> u64 {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        let cycle = current.cycle + 1;
        *current = Snapshot {
            title: self.title.clone(),
            cycle,
            updated_at: Some(Utc::now()),
            refresh_interval_secs: self.refresh_interval_secs,
            messages,
            view,
        };
        cycle
    }

    /// Copy of what the page should currently show
    pub fn snapshot(&self) -> Snapshot {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Collects the notifications raised during one refresh cycle
#[derive(Default)]
pub struct CycleReport {
    messages: Mutex<Vec<StatusMessage>>,
}

impl CycleReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_messages(self) -> Vec<StatusMessage> {
        self.messages.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for CycleReport {
    fn notify(&self, message: StatusMessage) {
        match message.level {
            StatusLevel::Success => tracing::info!(text = %message.text, "Status"),
            StatusLevel::Warning => tracing::warn!(text = %message.text, "Status"),
            StatusLevel::Error => tracing::error!(text = %message.text, "Status"),
        }
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);
    }
}
