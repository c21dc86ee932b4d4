pub mod bridge;
pub mod config;
pub mod csv_loader;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod page;
pub mod presenter;
pub mod registry;
pub mod utils;

pub use bridge::Bridge;
pub use config::{BridgeConfig, FormPresenters};
pub use error::SubmitError;
pub use gate::FormState;
pub use models::{FormId, FormSchema, FormSubmission};
pub use page::{MemoryPage, NodeId, Page, PageEvent};
pub use presenter::ErrorPresenter;
pub use registry::HandlerRegistry;
