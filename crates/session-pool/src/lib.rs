//! # session-pool
//!
//! Bounded, non-blocking pool of reusable session handles.
//!
//! Remote database sessions are expensive to dial. This crate caches idle
//! session handles so callers can acquire and release them without paying
//! creation cost on every use. The pool itself is a single concurrency
//! primitive: it knows nothing about the protocol the sessions speak and
//! touches them only through the two narrow contracts in [`session`].
//!
//! ## Behavior
//!
//! - **Acquire**: pop an idle session, or dial a fresh one through the
//!   caller-supplied factory on a cache miss. Never waits for a session to
//!   become available.
//! - **Release**: cache the session when there is room, close it otherwise
//!   (overflow discard). Never waits for room.
//! - **Close**: one-way shutdown that drains and closes every idle session,
//!   fail-stop on the first close error.
//!
//! Only *idle* sessions are capacity-bounded. The pool is a cache, not a hard
//! limiter: it does not cap how many sessions are concurrently in use, and it
//! performs no health checking or validation on the handles it returns.
//!
//! ## Example
//!
//! ```rust
//! use session_pool::{Pool, Session};
//!
//! struct DbSession;
//!
//! impl Session for DbSession {
//!     type Error = std::io::Error;
//!
//!     fn close(self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! let pool = Pool::new(8, || Ok(DbSession));
//!
//! // RAII checkout: the session goes back to the pool on drop.
//! {
//!     let _session = pool.checkout()?;
//! }
//! assert_eq!(pool.len(), 1);
//!
//! pool.close()?;
//! # Ok::<(), session_pool::PoolError<std::io::Error>>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod handle;
pub mod pool;
pub mod session;

pub use error::PoolError;
pub use handle::PooledSession;
pub use pool::{DEFAULT_CAPACITY, Pool};
pub use session::{Session, SessionFactory};
