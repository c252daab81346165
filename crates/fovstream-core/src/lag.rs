// crates/fovstream-core/src/lag.rs
//
// Glass-to-glass lag is a duration between "source frame decoded" and
// "foveated frame ready for the sink", so the timestamp only ever needs to
// support subtraction — wrapping `Instant` keeps it monotonic and avoids
// dealing with clock skew or epoch math the pipeline has no use for.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct LagTimestamp(Instant);

impl LagTimestamp {
    pub fn now() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }

    pub fn since(&self, earlier: LagTimestamp) -> Duration {
        self.0.duration_since(earlier.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn since_measures_forward_duration() {
        let t0 = LagTimestamp::now();
        sleep(Duration::from_millis(5));
        let t1 = LagTimestamp::now();
        assert!(t1.since(t0) >= Duration::from_millis(5));
    }
}
