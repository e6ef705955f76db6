pub mod app;
pub mod catalog;
pub mod coerce;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod flash;
pub mod generator;
pub mod options;
pub mod schema;
pub mod statement;
pub mod store;
pub mod value;
pub mod views;

// Re-export them for easier access from main.rs
pub use app::*;
pub use config::*;
pub use descriptor::*;
pub use error::*;
pub use flash::*;
pub use generator::*;
pub use options::*;
pub use schema::*;
pub use statement::*;
pub use store::*;
pub use value::*;
