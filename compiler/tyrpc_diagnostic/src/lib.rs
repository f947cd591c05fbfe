//! Error codes for the tyrpc compiler.
//!
//! Every fatal condition a run can hit has a stable code, printed as
//! `error[E1001]: ...` and explained by `tyrpc explain E1001`.

mod error_code;
pub mod errors;

pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
