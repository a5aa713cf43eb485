pub mod error;
pub mod types;

pub use error::handler_404;
pub use error::internal_error;
pub use error::{bad_request, conflict, db_error, forbidden, not_found, unauthorized};
