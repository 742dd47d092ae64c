pub mod aggregator;
pub mod filter;
pub mod joiner;

pub use aggregator::{
    DistributionView, HeatmapView, MapView, ModeSummary, ProfilePoint, ProfileSeries, ProfileView,
    StationMarker,
};
pub use filter::{DayTypeFilter, HourRange, ProfileFilter};
pub use joiner::StationJoiner;
