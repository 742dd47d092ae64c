pub mod joined;
pub mod snapshot;
pub mod station;
pub mod validation;

pub use joined::JoinedRecord;
pub use snapshot::{DashboardSnapshot, JoinStats, LoadStats, StationTable, ValidationTable};
pub use station::{ModeFlags, ModeSource, StationRecord, TransportMode};
pub use validation::ValidationRecord;
