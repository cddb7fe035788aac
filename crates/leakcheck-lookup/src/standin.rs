//! Demonstration backend that fabricates results.
//!
//! Draws a uniform `r` in `[0, 1)`:
//!
//! | roll            | severity | count  | breaches                                      |
//! |-----------------|----------|--------|-----------------------------------------------|
//! | `r > 0.7`       | Danger   | 3..=7  | LinkedIn 2021, Facebook 2019, Adobe 2013      |
//! | `0.4 < r <= 0.7`| Warning  | 1..=2  | Dropbox 2012                                  |
//! | `r <= 0.4`      | Safe     | 0      | none                                          |
//!
//! The input value is ignored. Never use this for real answers.

use crate::backend::LookupBackend;
use crate::delay::Delay;
use crate::error::Result;
use async_trait::async_trait;
use leakcheck_core::{LeakResult, QueryKind, Severity};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Rolls strictly above this are `Danger`.
pub const DANGER_ROLL: f64 = 0.7;

/// Rolls strictly above this (and not above [`DANGER_ROLL`]) are `Warning`.
pub const WARNING_ROLL: f64 = 0.4;

const DANGER_BREACHES: [&str; 3] = ["LinkedIn 2021", "Facebook 2019", "Adobe 2013"];
const WARNING_BREACHES: [&str; 1] = ["Dropbox 2012"];

/// Map a roll in `[0, 1)` to a result, drawing the match count from `rng`.
pub fn classify_roll<R: Rng + ?Sized>(roll: f64, rng: &mut R) -> LeakResult {
    let (severity, match_count, labels): (_, _, &[&str]) = if roll > DANGER_ROLL {
        (Severity::Danger, rng.gen_range(3..=7), &DANGER_BREACHES)
    } else if roll > WARNING_ROLL {
        (Severity::Warning, rng.gen_range(1..=2), &WARNING_BREACHES)
    } else {
        return LeakResult::safe();
    };

    let breaches = labels.iter().map(ToString::to_string).collect();
    match LeakResult::new(severity, match_count, breaches) {
        Ok(result) => result,
        Err(e) => unreachable!("stand-in tiers are consistent: {e}"),
    }
}

/// Random demonstration backend with simulated latency.
pub struct StandInBackend {
    rng: Mutex<StdRng>,
    delay: Arc<dyn Delay>,
    latency: Duration,
}

impl StandInBackend {
    /// Create a stand-in seeded from system entropy.
    #[must_use]
    pub fn new(delay: Arc<dyn Delay>, latency: Duration) -> Self {
        Self::with_rng(StdRng::from_entropy(), delay, latency)
    }

    /// Create a stand-in with a fixed seed, for reproducible demos.
    #[must_use]
    pub fn seeded(seed: u64, delay: Arc<dyn Delay>, latency: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), delay, latency)
    }

    fn with_rng(rng: StdRng, delay: Arc<dyn Delay>, latency: Duration) -> Self {
        Self {
            rng: Mutex::new(rng),
            delay,
            latency,
        }
    }
}

#[async_trait]
impl LookupBackend for StandInBackend {
    async fn lookup(&self, value: &str, kind: QueryKind) -> Result<LeakResult> {
        let result = {
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let roll: f64 = rng.gen();
            classify_roll(roll, &mut *rng)
        };

        self.delay.sleep(self.latency).await;

        tracing::debug!(
            "Stand-in lookup for {} ({} chars): {}",
            kind,
            value.len(),
            result.severity()
        );
        Ok(result)
    }

    fn backend_id(&self) -> &str {
        "stand-in"
    }
}
