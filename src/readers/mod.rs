pub mod cache;
pub mod loader;
pub mod source;
pub mod station_reader;
pub mod validation_reader;

pub use cache::TableCache;
pub use loader::DatasetLoader;
pub use station_reader::StationReader;
pub use validation_reader::ValidationReader;
