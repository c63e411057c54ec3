use crate::analytics::types::{Alert, AlertKind, Priority};
use tracing::{info, warn};

pub struct AlertNotifier;

impl AlertNotifier {
    /// Log alerts at a level matching their kind and priority
    pub fn notify_alerts(alerts: &[Alert]) {
        for alert in alerts {
            match (alert.kind, alert.priority) {
                (AlertKind::Warning, _) | (AlertKind::Info, Priority::High) => {
                    warn!("Campaign Alert [{}]: {}", alert.priority, alert.message);
                }
                (AlertKind::Info, _) => {
                    info!("Campaign Alert [{}]: {}", alert.priority, alert.message);
                }
            }
        }
    }
}
