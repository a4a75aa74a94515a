//! Queue wait-time aggregation engine.
//!
//! Transforms an unordered stream of raw (ping, pong) timestamp pairs into
//! time-ordered, per-day per-edition series of wait-duration samples, with
//! merging of near-simultaneous samples and year-to-edition classification.
//! Pure and synchronous: it performs no I/O and is deterministic over any
//! snapshot of the raw log.

pub mod aggregate;
pub mod edition;
pub mod merge;
pub mod normalize;
pub mod present;
pub mod types;
