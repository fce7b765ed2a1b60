pub mod aggregation;
pub mod config_directory;
pub mod generated_class;
pub mod property_file;

pub use aggregation::*;
pub use config_directory::*;
pub use generated_class::*;
pub use property_file::*;
