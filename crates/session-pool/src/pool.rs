//! Bounded session pool.

use std::sync::Arc;

use crossbeam_queue::ArrayQueue;
use parking_lot::Mutex;

use crate::error::PoolError;
use crate::handle::PooledSession;
use crate::session::{Session, SessionFactory};

/// Idle capacity substituted when a pool is built with a capacity of zero.
pub const DEFAULT_CAPACITY: usize = 10;

/// A bounded cache of reusable session handles.
///
/// The pool retains at most `capacity` idle sessions. [`acquire`](Pool::acquire)
/// pops an idle session or dials a fresh one through the factory;
/// [`release`](Pool::release) caches the session or closes it when the cache
/// is full. No operation blocks waiting for a session or for room: every call
/// completes immediately or returns an error.
///
/// Only the *idle* cache is bounded. Sessions in active use are not counted,
/// so concurrent callers can hold more live sessions than `capacity` when the
/// cache runs dry.
///
/// The pool is cheaply cloneable; clones share the same state.
///
/// # Example
///
/// ```rust
/// use session_pool::{Pool, Session};
///
/// struct DbSession;
///
/// impl Session for DbSession {
///     type Error = std::io::Error;
///
///     fn close(self) -> Result<(), Self::Error> {
///         Ok(())
///     }
/// }
///
/// let pool = Pool::new(4, || Ok(DbSession));
///
/// let session = pool.acquire()?;
/// assert_eq!(pool.len(), 0); // checked out, not idle
///
/// pool.release(session)?;
/// assert_eq!(pool.len(), 1);
///
/// pool.close()?;
/// # Ok::<(), session_pool::PoolError<std::io::Error>>(())
/// ```
pub struct Pool<S: Session> {
    inner: Arc<PoolInner<S>>,
}

struct PoolInner<S: Session> {
    capacity: usize,
    /// Guards the identity of the idle-queue and factory references, not the
    /// enqueue/dequeue traffic itself. `None` is the closed state.
    state: Mutex<Option<PoolState<S>>>,
}

struct PoolState<S: Session> {
    idle: Arc<ArrayQueue<S>>,
    factory: Option<Arc<SessionFactory<S, S::Error>>>,
}

impl<S: Session> Clone for Pool<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Session> Pool<S> {
    /// Create a pool that dials new sessions with `factory` on a cache miss.
    ///
    /// A `capacity` of zero substitutes [`DEFAULT_CAPACITY`]. No sessions are
    /// created eagerly; the idle cache starts empty.
    pub fn new<F>(capacity: usize, factory: F) -> Self
    where
        F: Fn() -> Result<S, S::Error> + Send + Sync + 'static,
    {
        Self::build(capacity, Some(Arc::new(factory)))
    }

    /// Create a cache-only pool with no creation callback.
    ///
    /// [`acquire`](Pool::acquire) on an empty cache then fails with
    /// [`PoolError::NoFactory`] instead of dialing.
    pub fn without_factory(capacity: usize) -> Self {
        Self::build(capacity, None)
    }

    fn build(capacity: usize, factory: Option<Arc<SessionFactory<S, S::Error>>>) -> Self {
        let capacity = if capacity == 0 { DEFAULT_CAPACITY } else { capacity };
        Self {
            inner: Arc::new(PoolInner {
                capacity,
                state: Mutex::new(Some(PoolState {
                    idle: Arc::new(ArrayQueue::new(capacity)),
                    factory,
                })),
            }),
        }
    }

    /// Hand out a session: an idle one when the cache holds any, a freshly
    /// dialed one otherwise.
    ///
    /// Factory errors are returned unmodified and leave the pool usable.
    /// Creation is not retried and not gated by capacity.
    pub fn acquire(&self) -> Result<S, PoolError<S::Error>> {
        let (idle, factory) = {
            let state = self.inner.state.lock();
            match state.as_ref() {
                Some(state) => (Arc::clone(&state.idle), state.factory.clone()),
                None => return Err(PoolError::PoolClosed),
            }
        };

        if let Some(session) = idle.pop() {
            tracing::trace!("session acquired from idle cache");
            return Ok(session);
        }

        let factory = factory.ok_or(PoolError::NoFactory)?;
        let session = factory().map_err(PoolError::Session)?;
        tracing::trace!("session dialed by factory");
        Ok(session)
    }

    /// Take ownership of a previously acquired session.
    ///
    /// The session is cached for a future [`acquire`](Pool::acquire) when the
    /// idle cache has room, and closed otherwise (overflow discard). On a
    /// closed pool the session has no destination and is closed directly.
    /// Close errors are returned unmodified.
    pub fn release(&self, session: S) -> Result<(), PoolError<S::Error>> {
        // The whole decision runs under the guard so a concurrent close
        // cannot detach the queue between the closed-check and the push.
        let state = self.inner.state.lock();
        let Some(state) = state.as_ref() else {
            tracing::trace!("pool closed; closing released session");
            return session.close().map_err(PoolError::Session);
        };

        match state.idle.push(session) {
            Ok(()) => {
                tracing::trace!("session returned to idle cache");
                Ok(())
            }
            Err(session) => {
                tracing::trace!("idle cache full; closing released session");
                session.close().map_err(PoolError::Session)
            }
        }
    }

    /// Shut the pool down, draining and closing every idle session.
    ///
    /// The idle queue and the factory are detached together before the drain,
    /// so a second call finds nothing to do and returns `Ok`; no session is
    /// ever closed twice. Draining is fail-stop: the first close error is
    /// returned as-is and sessions still cached at that point are dropped
    /// without a `close` call.
    pub fn close(&self) -> Result<(), PoolError<S::Error>> {
        let Some(state) = self.inner.state.lock().take() else {
            return Ok(());
        };

        tracing::debug!(idle = state.idle.len(), "closing session pool");
        while let Some(session) = state.idle.pop() {
            session.close().map_err(PoolError::Session)?;
        }
        Ok(())
    }

    /// Number of sessions currently cached, zero once the pool is closed.
    ///
    /// A point-in-time snapshot. This counts neither capacity nor sessions in
    /// active use.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .state
            .lock()
            .as_ref()
            .map_or(0, |state| state.idle.len())
    }

    /// Whether the idle cache is currently empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of idle sessions the pool will retain.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Whether the pool has been shut down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().is_none()
    }

    /// Acquire a session wrapped in a guard that returns it to the pool on
    /// drop.
    pub fn checkout(&self) -> Result<PooledSession<S>, PoolError<S::Error>> {
        let session = self.acquire()?;
        Ok(PooledSession::new(session, self.clone()))
    }
}
