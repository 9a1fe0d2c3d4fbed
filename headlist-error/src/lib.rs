pub mod ext;
pub mod macros;
pub mod status_code;
pub mod types;

// Publicly re-export all error types and functions from the submodules to
// simplify access from external code.
pub use ext::*;
pub use macros::*;
pub use status_code::*;
pub use types::*;

/// Результат операций над списком.
pub type ListResult<T> = Result<T, ListError>;
