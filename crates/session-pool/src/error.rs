//! Pool error types.

use thiserror::Error;

/// Errors that can occur during pool operations.
///
/// `E` is the error type of the pooled [`Session`](crate::Session). Factory
/// and session-close failures are carried through in [`PoolError::Session`]
/// unmodified; the pool never wraps them into strings or logs-and-continues
/// past them.
#[derive(Debug, Error)]
pub enum PoolError<E: std::error::Error> {
    /// Operation attempted after, or concurrently with, shutdown.
    #[error("session pool is closed")]
    PoolClosed,

    /// The pool has no creation callback and the idle cache was empty.
    #[error("session factory not set")]
    NoFactory,

    /// A handle whose session was already taken was returned to the pool.
    #[error("handle no longer owns a session")]
    EmptyHandle,

    /// Error raised by the session factory or by closing a session.
    #[error(transparent)]
    Session(E),
}
