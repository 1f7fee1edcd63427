//! Bar persistence: Diesel row models and the `BarStore` implementation.

mod model;
mod repository;

pub use model::{BarRow, NewBarRow, DATE_FORMAT};
pub use repository::BarRepository;
