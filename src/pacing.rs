/*!
    waiting between exchanges with the board

    the board needs time to ingest commands and produces samples at a fixed rate. Every wait in this crate goes through [Delay] so it can be replaced, typically by a recorder in tests.
*/

use std::time::Duration;

/// something able to wait for a given duration
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

/// blocks the current thread, the default waiting strategy
#[derive(Copy, Clone, Debug, Default)]
pub struct Sleep;

impl Delay for Sleep {
    fn delay(&mut self, duration: Duration) {
        if !duration.is_zero()
            {std::thread::sleep(duration)}
    }
}

/// never waits, for running simulations as fast as possible
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn delay(&mut self, _: Duration) {}
}

/// keeps track of the requested waits instead of waiting
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub waits: Vec<Duration>,
}

impl Recorder {
    pub fn new() -> Self {Self::default()}
    /// sum of all requested waits
    pub fn total(&self) -> Duration {
        self.waits.iter().sum()
    }
}

impl Delay for Recorder {
    fn delay(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay(&mut self, duration: Duration) {
        (**self).delay(duration)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn recorder_accumulates() {
        let mut recorder = Recorder::new();
        recorder.delay(Duration::from_millis(10));
        recorder.delay(Duration::from_millis(50));
        assert_eq!(recorder.waits.len(), 2);
        assert_eq!(recorder.total(), Duration::from_millis(60));
    }

    #[test]
    fn sleep_waits() {
        let start = Instant::now();
        Sleep.delay(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
        // zero is skipped entirely
        Sleep.delay(Duration::ZERO);
    }

    #[test]
    fn borrowed_delay() {
        fn pace(mut delay: impl Delay) {
            delay.delay(Duration::from_millis(1));
        }
        let mut recorder = Recorder::new();
        pace(&mut recorder);
        assert_eq!(recorder.waits, [Duration::from_millis(1)]);
    }
}
