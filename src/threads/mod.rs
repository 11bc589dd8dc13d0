//! Dedicated worker threads for parallel matrix assembly.
//!
//! A [`TaskPool`] owns a fixed number of worker threads that take
//! closures from a FIFO queue.  Every queued closure produces a
//! [`TaskHandle`] whose [`join`](TaskHandle::join) blocks until the
//! result is available.

mod pool;
pub use pool::*;
