//! Position broadcast timing

/// Decides when the next position broadcast is due
///
/// Driven by elapsed time rather than a clock, so it can run from
/// whatever tick the board provides.
#[derive(Debug, Clone)]
pub struct BroadcastSchedule {
    /// 0 disables periodic broadcasts
    interval_ms: u32,
    elapsed_ms: u32,
    /// A peer asked for our position
    requested: bool,
}

impl BroadcastSchedule {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0,
            requested: false,
        }
    }

    /// Broadcast on the next tick regardless of the interval
    pub fn request_now(&mut self) {
        self.requested = true;
    }

    /// Update time tracking
    ///
    /// # Arguments
    /// - `delta_ms`: Time elapsed since last update
    ///
    /// Returns true when a broadcast is due. The interval restarts from
    /// every broadcast, requested or periodic.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);

        let periodic = self.interval_ms != 0 && self.elapsed_ms >= self.interval_ms;
        if periodic || self.requested {
            self.elapsed_ms = 0;
            self.requested = false;
            return true;
        }
        false
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic() {
        let mut s = BroadcastSchedule::new(1000);
        assert!(!s.tick(400));
        assert!(!s.tick(400));
        assert!(s.tick(400));
        // Restarted from the broadcast
        assert!(!s.tick(900));
        assert!(s.tick(100));
    }

    #[test]
    fn test_request_now() {
        let mut s = BroadcastSchedule::new(1000);
        assert!(!s.tick(100));
        s.request_now();
        assert!(s.tick(0));
        assert!(!s.tick(0));
        // Interval restarted by the requested broadcast
        assert!(!s.tick(999));
        assert!(s.tick(1));
    }

    #[test]
    fn test_disabled_interval() {
        let mut s = BroadcastSchedule::new(0);
        assert!(!s.tick(u32::MAX));
        s.request_now();
        assert!(s.tick(0));
    }
}
