//! Method-level logging wrappers.
//!
//! Each wrapper takes the work to run as a future ("next") and returns a
//! future, so they compose by nesting at the place a method is defined or a
//! handler is registered:
//!
//! ```rust,no_run
//! use weblog::aspect::{log_exceptions, log_returning, Signature};
//!
//! struct Inventory;
//!
//! impl Inventory {
//!     async fn count(&self) -> Result<u32, std::io::Error> {
//!         let signature = Signature::of::<Self>("count");
//!         log_exceptions(signature, log_returning(signature, async { Ok(3) })).await
//!     }
//! }
//! ```

use std::fmt;

mod exception_log;
mod returning_log;
mod time_tracking;

pub use exception_log::log_exceptions;
pub use returning_log::log_returning;
pub use time_tracking::{track_time, BoxError, TimeTrackingError, TIME_TRACKING_MARKER};

/// `tracing` target every line from this crate is written under.
pub const LOG_TARGET: &str = "weblog::aspect";

/// Identifies the wrapped method in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    pub declaring_type: &'static str,
    pub method: &'static str,
}

impl Signature {
    pub const fn new(declaring_type: &'static str, method: &'static str) -> Self {
        Self {
            declaring_type,
            method,
        }
    }

    /// Uses the simple name of `T` (no module path, no generics) as the
    /// declaring type.
    pub fn of<T: ?Sized>(method: &'static str) -> Self {
        Self::new(simple_type_name(std::any::type_name::<T>()), method)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}()", self.declaring_type, self.method)
    }
}

fn simple_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
