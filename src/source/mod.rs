//! Historical data: the consumed collaborator contract lives in
//! [`crate::core::traits::PerformanceSource`]; this module loads from it.

pub mod file_source;
pub mod loader;

pub use file_source::{Dataset, FileSource};
pub use loader::{AnalyticsData, DashboardLoader, OverviewData};
