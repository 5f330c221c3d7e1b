//! RAII guard for checked-out sessions.

use std::ops::{Deref, DerefMut};

use crate::error::PoolError;
use crate::pool::Pool;
use crate::session::Session;

/// A session checked out of a [`Pool`] via [`Pool::checkout`].
///
/// When dropped, the session is handed back to the pool: cached when there is
/// room, closed otherwise. A close error during drop cannot be propagated and
/// is reported at debug level instead; callers that need it should use
/// [`release`](PooledSession::release).
///
/// Dereferencing a guard whose session was taken by
/// [`detach`](PooledSession::detach) panics.
pub struct PooledSession<S: Session> {
    session: Option<S>,
    pool: Pool<S>,
}

impl<S: Session> PooledSession<S> {
    pub(crate) fn new(session: S, pool: Pool<S>) -> Self {
        Self {
            session: Some(session),
            pool,
        }
    }

    /// Take the session out of the guard.
    ///
    /// The guard will no longer return anything to the pool; the caller owns
    /// the session and is responsible for closing it. Returns `None` when the
    /// session was already detached.
    pub fn detach(&mut self) -> Option<S> {
        self.session.take()
    }

    /// Hand the session back to the pool, surfacing any close error from an
    /// overflow discard or from a return to an already-closed pool.
    ///
    /// Fails with [`PoolError::EmptyHandle`] when the session was taken by
    /// [`detach`](PooledSession::detach); nothing is closed and the cache is
    /// untouched in that case.
    pub fn release(mut self) -> Result<(), PoolError<S::Error>> {
        match self.session.take() {
            Some(session) => self.pool.release(session),
            None => Err(PoolError::EmptyHandle),
        }
    }
}

impl<S: Session> Deref for PooledSession<S> {
    type Target = S;

    #[allow(clippy::expect_used)]
    fn deref(&self) -> &Self::Target {
        self.session.as_ref().expect("session was detached")
    }
}

impl<S: Session> DerefMut for PooledSession<S> {
    #[allow(clippy::expect_used)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.session.as_mut().expect("session was detached")
    }
}

impl<S: Session> Drop for PooledSession<S> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(error) = self.pool.release(session) {
                tracing::debug!(%error, "failed to return session to pool on drop");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct TestSession {
        id: usize,
        closes: Arc<AtomicUsize>,
    }

    impl Session for TestSession {
        type Error = io::Error;

        fn close(self) -> Result<(), Self::Error> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn pool_with(closes: &Arc<AtomicUsize>) -> Pool<TestSession> {
        let created = Arc::new(AtomicUsize::new(0));
        let closes = Arc::clone(closes);
        Pool::new(2, move || {
            Ok(TestSession {
                id: created.fetch_add(1, Ordering::SeqCst),
                closes: Arc::clone(&closes),
            })
        })
    }

    #[test]
    fn dropping_the_guard_returns_the_session() {
        let closes = Arc::new(AtomicUsize::new(0));
        let pool = pool_with(&closes);

        let guard = pool.checkout().unwrap();
        assert_eq!(pool.len(), 0);

        drop(guard);
        assert_eq!(pool.len(), 1);
        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn explicit_release_returns_the_session() {
        let closes = Arc::new(AtomicUsize::new(0));
        let pool = pool_with(&closes);

        let guard = pool.checkout().unwrap();
        guard.release().unwrap();
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn detached_session_stays_out_of_the_pool() {
        let closes = Arc::new(AtomicUsize::new(0));
        let pool = pool_with(&closes);

        let mut guard = pool.checkout().unwrap();
        let session = guard.detach().unwrap();
        drop(guard);

        assert_eq!(pool.len(), 0);
        assert_eq!(closes.load(Ordering::SeqCst), 0);

        session.close().unwrap();
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn releasing_an_empty_handle_is_an_error() {
        let closes = Arc::new(AtomicUsize::new(0));
        let pool = pool_with(&closes);

        let mut guard = pool.checkout().unwrap();
        let session = guard.detach().unwrap();

        let err = guard.release().unwrap_err();
        assert!(matches!(err, PoolError::EmptyHandle));

        // The failed release touched neither the cache nor the session.
        assert_eq!(pool.len(), 0);
        assert_eq!(closes.load(Ordering::SeqCst), 0);

        session.close().unwrap();
    }

    #[test]
    fn guard_dereferences_to_the_session() {
        let closes = Arc::new(AtomicUsize::new(0));
        let pool = pool_with(&closes);

        let guard = pool.checkout().unwrap();
        assert_eq!(guard.id, 0);
    }
}
