pub mod notifier;
pub mod rules;

pub use notifier::AlertNotifier;
pub use rules::{AlertRulesEngine, AlertThresholds};
