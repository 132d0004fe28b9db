//! Hawaii climate API
//!
//! Serves precipitation, station and temperature measurements from a
//! read-only SQLite dataset. Date-range endpoints return per-day
//! min/max/avg temperature over inclusive bounds.

mod dataset;
mod dates;
pub mod db;
pub mod routes;
mod startup;
mod utils;

pub use dataset::*;
pub use dates::*;
pub use db::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;
