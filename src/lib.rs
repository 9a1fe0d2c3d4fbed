/// Common error types: list operation errors, logging setup errors.
pub mod error;
/// Logging configuration and subscriber installation.
pub mod logging;
/// Singly-linked list container whose head node is the list handle.
pub mod list;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Operation errors and result types.
pub use error::{ErrorExt, ListError, ListResult, LoggingError, StatusCode};
/// Container and invariant validation.
pub use list::{LinkedList, ValidationError};
/// Logging setup.
pub use logging::{init_logging, LogFormat, LoggingConfig};
