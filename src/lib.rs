pub mod config;
pub mod error;
pub mod exporter;
pub mod form;
pub mod importer;
pub mod logging;
pub mod statement;

pub use error::StatementError;
