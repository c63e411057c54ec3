//! # campaign-pulse
//!
//! Real-time ingestion and analytics for advertising performance data.
//!
//! campaign-pulse keeps a live connection to a performance stream, holds the
//! most recent updates in a bounded buffer, and reduces historical records
//! into the summaries a campaign dashboard is built from: per-date,
//! per-platform and per-campaign totals, ratio metrics, alerts,
//! recommendations and pairwise campaign comparisons.
//!
//! ## Core Features
//!
//! - **Live Stream**: Reconnecting connection state machine with a fixed retry delay
//! - **Update Buffer**: The ten most recent performance updates, newest first
//! - **Consistent Metrics**: One definition of ROAS, CTR, conversion rate, CPC and ROI
//! - **Alerts & Recommendations**: Threshold rules evaluated in a fixed order
//! - **Campaign Comparison**: Side-by-side totals with relative differences
//! - **Export**: CSV and JSON renderings of records and aggregates
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use campaign_pulse::analytics::{AlertRulesEngine, MetricsAggregator};
//! use campaign_pulse::core::{PerformanceRecord, Summary};
//!
//! fn review(records: &[PerformanceRecord]) {
//!     let summary = Summary::from_parts(&[], records);
//!     let alerts = AlertRulesEngine::default().evaluate(&summary);
//!     let top = MetricsAggregator::top_campaigns_by_roi(records, 5);
//!     println!("{} alerts, best campaign: {:?}", alerts.len(), top.first());
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Aggregation, alert, recommendation and comparison engines
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and validation
//! - [`core`] - Domain types, errors, constants and collaborator traits
//! - [`export`] - CSV and JSON export
//! - [`source`] - Historical data loading
//! - [`stream`] - Live connection management and update buffering

/// Aggregation, alert, recommendation and comparison engines
pub mod analytics;
/// Command-line interface and argument parsing
pub mod cli;
/// Configuration management and validation
pub mod config;
/// Core types, errors, constants and collaborator traits
pub mod core;
/// CSV and JSON export services
pub mod export;
/// Historical performance data sources and loaders
pub mod source;
/// Live performance stream
pub mod stream;

// Re-export core functionality for easy access
pub use analytics::{
    AlertRulesEngine, ComparisonEngine, DashboardReport, MetricsAggregator, RecommendationEngine,
};
pub use cli::run_cli;
pub use config::PulseConfig;
pub use core::errors::{PulseError, PulseResult};
pub use core::types::{
    Campaign, CampaignStatus, ConnectionState, PerformanceRecord, Platform, Summary, UpdateEvent,
};
pub use export::{ExportFormat, ExportService};
pub use stream::{ConnectionManager, UpdateBuffer};
