pub mod overview;
pub mod quality;

pub use overview::{DatasetOverview, KpiStrip, OverviewAnalyzer};
pub use quality::{QualityAnalyzer, QualityReport};
