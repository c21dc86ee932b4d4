pub mod api;
pub mod currency;
pub mod models;

pub use api::{RequestError, TaxApi};
pub use models::*;
