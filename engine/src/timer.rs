use std::cmp;
use std::time::{Duration, Instant};

/// A millisecond stopwatch which can be paused.
///
/// Example
/// ---
///
/// ```
/// # use engine::Timer;
/// let mut timer = Timer::new();
/// timer.start();
/// // ... run a frame ...
/// let frame_ms = timer.ticks();
/// timer.pause();
/// assert!(timer.is_paused());
/// assert_eq!(timer.ticks(), timer.ticks());
/// # let _ = frame_ms;
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Timer {
    state: State,
}

#[derive(Copy, Clone, Debug)]
enum State {
    Stopped,
    Running { since: Instant },
    Paused { elapsed: Duration },
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a stopped timer.
    pub fn new() -> Self {
        Timer {
            state: State::Stopped,
        }
    }

    /// Starts (or restarts) the timer from zero.
    pub fn start(&mut self) {
        self.state = State::Running {
            since: Instant::now(),
        };
    }

    pub fn stop(&mut self) {
        self.state = State::Stopped;
    }

    /// Freezes the elapsed time. No-op unless running.
    pub fn pause(&mut self) {
        if let State::Running { since } = self.state {
            self.state = State::Paused {
                elapsed: since.elapsed(),
            };
        }
    }

    /// Resumes counting from where `pause` left off. No-op unless paused.
    pub fn unpause(&mut self) {
        if let State::Paused { elapsed } = self.state {
            let now = Instant::now();
            self.state = State::Running {
                since: now.checked_sub(elapsed).unwrap_or(now),
            };
        }
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        match self.state {
            State::Stopped => false,
            State::Running { .. } | State::Paused { .. } => true,
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        match self.state {
            State::Paused { .. } => true,
            State::Stopped | State::Running { .. } => false,
        }
    }

    /// Time counted since `start`, excluding time spent paused. Zero when stopped.
    pub fn elapsed(&self) -> Duration {
        match self.state {
            State::Stopped => Duration::from_secs(0),
            State::Running { since } => since.elapsed(),
            State::Paused { elapsed } => elapsed,
        }
    }

    /// Same as `elapsed`, in whole milliseconds (saturating).
    pub fn ticks(&self) -> u32 {
        cmp::min(self.elapsed().as_millis(), u128::from(u32::max_value())) as u32
    }
}

#[cfg(test)]
mod test {
    use super::Timer;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_stopped_timer_reads_zero() {
        let mut timer = Timer::new();
        assert!(!timer.is_started());
        assert_eq!(timer.ticks(), 0);

        timer.pause();
        assert!(!timer.is_paused());

        timer.start();
        thread::sleep(Duration::from_millis(5));
        timer.stop();
        assert_eq!(timer.ticks(), 0);
        assert!(!timer.is_started());
    }

    #[test]
    fn test_running_timer_counts() {
        let mut timer = Timer::new();
        timer.start();
        thread::sleep(Duration::from_millis(20));
        assert!(timer.ticks() >= 20);
        assert!(timer.is_started());
        assert!(!timer.is_paused());
    }

    #[test]
    fn test_paused_timer_is_frozen() {
        let mut timer = Timer::new();
        timer.start();
        thread::sleep(Duration::from_millis(10));
        timer.pause();
        assert!(timer.is_paused());
        let frozen = timer.elapsed();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(timer.elapsed(), frozen);

        timer.unpause();
        assert!(!timer.is_paused());
        assert!(timer.elapsed() >= frozen);
        assert!(timer.ticks() >= 10);
    }

    #[test]
    fn test_restart_resets() {
        let mut timer = Timer::new();
        timer.start();
        thread::sleep(Duration::from_millis(30));
        timer.unpause();
        assert!(timer.ticks() >= 30);
        timer.start();
        assert!(timer.ticks() < 30);
    }
}
