//! Install retry policy.
//!
//! Fixed-delay policy for the install loop plus the sleeping seam the
//! workflow goes through, so tests can observe delays without waiting.

mod policy;
mod sleep;

pub use policy::{DeployTimings, RetryDecision};
pub use sleep::{Sleeper, ThreadSleeper};
