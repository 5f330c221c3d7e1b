//! Session and factory contracts consumed by the pool.

/// A poolable session handle.
///
/// The pool treats sessions as opaque values: the only operation it relies
/// on is [`close`](Session::close), invoked once per handle it decides to
/// discard (overflow on release, or while draining during shutdown). Taking
/// `self` by value makes a second close unrepresentable.
pub trait Session: Send + 'static {
    /// Error produced when the session fails to close.
    type Error: std::error::Error + Send + 'static;

    /// Tear down the session, releasing any remote resources it holds.
    fn close(self) -> Result<(), Self::Error>;
}

/// Creation callback invoked on a cache miss.
///
/// The factory dials a fresh session synchronously; any error it returns is
/// handed to the caller unmodified and leaves the pool usable.
pub type SessionFactory<S, E> = dyn Fn() -> Result<S, E> + Send + Sync;
