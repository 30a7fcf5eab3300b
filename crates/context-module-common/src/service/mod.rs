pub mod monitoring;

pub use tracing;

/// Log the error carried by a [`Result`] and hand the result back untouched.
#[macro_export]
macro_rules! log_if_error {
    ($e: expr) => {
        match $e {
            Ok(v) => Ok(v),
            Err(e) => {
                $crate::service::tracing::error!(message = %e);
                Err(e)
            },
        }
    };
}
