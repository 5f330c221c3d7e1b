//! Session pooling example.
//!
//! This example simulates an expensive remote dial and shows how the pool
//! amortizes it: cold acquires pay the dial, warm acquires reuse a cached
//! session, and overflowing returns are closed instead of cached.
//!
//! # Running
//!
//! ```bash
//! cargo run --example pooling
//! ```

// Allow common patterns in example code
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use session_pool::{Pool, Session};

/// Stand-in for a session speaking to a remote database.
struct RemoteSession {
    id: u32,
}

impl Session for RemoteSession {
    type Error = std::io::Error;

    fn close(self) -> Result<(), Self::Error> {
        println!("    [session {}] closed", self.id);
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let dialed = Arc::new(AtomicU32::new(0));
    let dial_counter = Arc::clone(&dialed);

    let pool = Pool::new(2, move || {
        let id = dial_counter.fetch_add(1, Ordering::SeqCst);
        // Pretend the dial costs a network round trip.
        thread::sleep(Duration::from_millis(50));
        println!("    [session {id}] dialed");
        Ok(RemoteSession { id })
    });

    println!("=== Session Pool Example ===\n");

    println!("1. Cold acquire pays the dial:");
    let start = Instant::now();
    let session = pool.acquire()?;
    println!("    acquired session {} in {:?}", session.id, start.elapsed());
    pool.release(session)?;

    println!("\n2. Warm acquire reuses the cached session:");
    let start = Instant::now();
    let session = pool.acquire()?;
    println!("    acquired session {} in {:?}", session.id, start.elapsed());
    pool.release(session)?;

    println!("\n3. RAII checkout returns the session on drop:");
    {
        let session = pool.checkout()?;
        println!("    working with session {}", session.id);
    }
    println!("    idle sessions cached: {}", pool.len());

    println!("\n4. Overflowing returns are closed, not cached (capacity 2):");
    let a = pool.acquire()?;
    let b = pool.acquire()?;
    let c = pool.acquire()?;
    pool.release(a)?;
    pool.release(b)?;
    pool.release(c)?; // cache already full
    println!("    idle sessions cached: {}", pool.len());

    println!("\n5. Shutdown drains the cache:");
    pool.close()?;
    println!("    pool closed: {}", pool.is_closed());
    println!("    total sessions dialed: {}", dialed.load(Ordering::SeqCst));

    Ok(())
}
