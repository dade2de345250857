//! Deterministic random number generation
//!
//! Task picks, result picks and typing jitter all draw from one seeded
//! generator owned by the session. Never reach for another source of
//! randomness inside the engine.

mod xorshift;

pub use xorshift::RngManager;
