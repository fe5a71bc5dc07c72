//! Result type aliases for Press.

use crate::PressError;

/// A specialized `Result` type for Press operations.
pub type PressResult<T> = Result<T, PressError>;

/// A boxed future returning a `PressResult`.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = PressResult<T>> + Send + 'a>>;
