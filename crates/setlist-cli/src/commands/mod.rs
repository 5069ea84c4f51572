pub mod build;
pub mod config;
pub mod info;
pub mod search;

pub use build::run_build;
pub use info::show_info;
pub use search::run_search;
