//! Redacting wrapper for secrets such as session ids
//!
//! ```
//! use odoorpc_core_types::Sensitive;
//!
//! let session = Sensitive::new("4f1c2b9e");
//! assert_eq!(format!("{:?}", session), "***REDACTED***");
//! assert_eq!(session.expose(), &"4f1c2b9e");
//! ```

use std::fmt;

/// Value that redacts itself in Debug and Display output
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value
    ///
    /// Only the transport should call this, when writing the cookie header.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
