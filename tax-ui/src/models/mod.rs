mod form;
mod schema;

pub use form::{FormId, FormSubmission};
pub use schema::{Constraint, FieldSchema, FormSchema, LABEL_MAX_LEN};
