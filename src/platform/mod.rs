//! Platform abstraction layer
//!
//! The simulation is driven by a frame clock that is started when a run
//! begins and cancelled when it ends. On the web this is
//! `requestAnimationFrame`; natively (and in tests) the host pumps frames
//! itself and the clock only tracks whether it should.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AnimationFrameClock;

/// A cancellable repeating per-frame callback source
pub trait FrameClock {
    /// Begin delivering frame ticks (no-op if already running)
    fn start(&mut self);
    /// Stop delivering frame ticks; nothing may fire after this returns
    fn cancel(&mut self);
    fn is_running(&self) -> bool;
}

/// Clock for hosts that pump frames themselves
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    running: bool,
    starts: u32,
    cancels: u32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times the clock went from stopped to running
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Times the clock went from running to stopped
    pub fn cancels(&self) -> u32 {
        self.cancels
    }
}

impl FrameClock for ManualClock {
    fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.starts += 1;
        }
    }

    fn cancel(&mut self) {
        if self.running {
            self.running = false;
            self.cancels += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_counts_transitions_once() {
        let mut clock = ManualClock::new();
        clock.cancel();
        assert_eq!(clock.cancels(), 0);

        clock.start();
        clock.start();
        assert!(clock.is_running());
        assert_eq!(clock.starts(), 1);

        clock.cancel();
        clock.cancel();
        assert!(!clock.is_running());
        assert_eq!(clock.cancels(), 1);
    }
}
