//! Temporal smoothing for the per-frame signals: seeded exponential
//! smoothing for scalars and 2D points, a bounded moving average, and a
//! majority vote for boolean gesture flags.

use std::collections::VecDeque;

/// Exponential moving average. The first sample seeds the filter and comes
/// back unchanged; there is never a lerp against an undefined prior value.
#[derive(Debug, Clone)]
pub struct Smoothing {
    value: f32,
    alpha: f32,
    initialized: bool,
}

impl Smoothing {
    pub fn new(alpha: f32) -> Self {
        Self {
            value: 0.0,
            alpha,
            initialized: false,
        }
    }

    pub fn filter(&mut self, raw: f32) -> f32 {
        if !self.initialized {
            self.value = raw;
            self.initialized = true;
            return raw;
        }
        self.value = self.alpha * raw + (1.0 - self.alpha) * self.value;
        self.value
    }

    pub fn reset(&mut self) {
        self.initialized = false;
        self.value = 0.0;
    }
}

/// Two independent EMA channels for a screen-space point.
#[derive(Debug, Clone)]
pub struct Smoothing2 {
    x: Smoothing,
    y: Smoothing,
}

impl Smoothing2 {
    pub fn new(alpha: f32) -> Self {
        Self {
            x: Smoothing::new(alpha),
            y: Smoothing::new(alpha),
        }
    }

    pub fn filter(&mut self, raw: (f32, f32)) -> (f32, f32) {
        (self.x.filter(raw.0), self.y.filter(raw.1))
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

/// Bounded FIFO mean. Newest sample in, oldest evicted past capacity.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: VecDeque<f32>,
    capacity: usize,
}

impl MovingAverage {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, sample: f32) -> f32 {
        self.window.push_back(sample);
        if self.window.len() > self.capacity {
            self.window.pop_front();
        }
        self.window.iter().sum::<f32>() / self.window.len() as f32
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}

/// Sliding-window majority vote over a boolean flag. True iff at least half
/// the window is true.
#[derive(Debug, Clone)]
pub struct MajorityVote {
    window: VecDeque<bool>,
    capacity: usize,
}

impl MajorityVote {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, sample: bool) -> bool {
        self.window.push_back(sample);
        if self.window.len() > self.capacity {
            self.window.pop_front();
        }
        let trues = self.window.iter().filter(|b| **b).count();
        trues * 2 >= self.window.len()
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}

/// Deltas below epsilon are sensor noise during a hold-still pose.
pub fn dead_zone(delta: f32, epsilon: f32) -> f32 {
    if delta.abs() < epsilon {
        0.0
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_seeds_ema() {
        let mut s = Smoothing::new(0.3);
        assert_eq!(s.filter(42.0), 42.0);
        // Second sample lerps toward the raw value.
        let v = s.filter(0.0);
        assert!((v - 29.4).abs() < 1e-4, "got {}", v);
    }

    #[test]
    fn ema_reset_reseeds() {
        let mut s = Smoothing::new(0.5);
        s.filter(10.0);
        s.filter(20.0);
        s.reset();
        assert_eq!(s.filter(-3.0), -3.0);
    }

    #[test]
    fn moving_average_evicts_oldest() {
        let mut m = MovingAverage::new(3);
        assert_eq!(m.push(1.0), 1.0);
        assert_eq!(m.push(3.0), 2.0);
        m.push(5.0);
        // Window is now [3, 5, 7]; the first sample fell off.
        let mean = m.push(7.0);
        assert!((mean - 5.0).abs() < 1e-6);
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn majority_vote_needs_half() {
        let mut v = MajorityVote::new(4);
        assert!(v.push(true));
        assert!(v.push(false)); // 1 of 2 is exactly half
        assert!(!v.push(false)); // 1 of 3
        assert!(v.push(true)); // 2 of 4
    }

    #[test]
    fn dead_zone_suppresses_noise() {
        assert_eq!(dead_zone(0.004, 0.008), 0.0);
        assert_eq!(dead_zone(-0.004, 0.008), 0.0);
        assert_eq!(dead_zone(0.02, 0.008), 0.02);
    }
}
