use crate::error::StoreError;

/// Short phrase for a response status, as shown in alerts.
pub fn status_phrase(status: u16) -> String {
    match status {
        400 => "Bad Request".to_string(),
        500 => "Internal Server Error".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub status: Option<u16>,
}

impl Alert {
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    pub(crate) fn from_store_error(message: &str, err: &StoreError) -> Self {
        match err.status() {
            Some(status) => Self::new(message, Some(status)),
            None => Self::new(format!("{message}: {err}"), None),
        }
    }

    pub fn text(&self) -> String {
        match self.status {
            Some(status) => format!("{} with status {}", self.message, status_phrase(status)),
            None => self.message.clone(),
        }
    }
}

/// Ordered, dismissible alerts. Arrival order is display order.
#[derive(Debug, Clone, Default)]
pub struct AlertList {
    alerts: Vec<Alert>,
}

impl AlertList {
    pub fn push(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    pub fn dismiss(&mut self, index: usize) -> Option<Alert> {
        (index < self.alerts.len()).then(|| self.alerts.remove(index))
    }

    pub fn as_slice(&self) -> &[Alert] {
        &self.alerts
    }
}
