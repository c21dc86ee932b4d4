//! HTTP side of the tax estimate bridge: the JSON request helper and the
//! [`TaxApi`](tax_core::TaxApi) implementation built on it.

pub mod http_api;
pub mod json;

pub use http_api::{ESTIMATE_PATH, HttpTaxApi, LATEST_NET_INCOME_PATH, NET_INCOME_PATH};
pub use json::{JsonClient, JsonResponse};
pub use reqwest::Method;
