//! Linear count-up of the statistics.

use std::time::Duration;

/// Parses a count the way the page attributes are written: leading
/// whitespace, an optional sign, then digits. Anything after the digits is
/// ignored, so `"1500+"` is `1500`.
///
/// Counts beyond the integer range keep their magnitude as a float.
pub fn parse_count(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1., rest),
        None => (1., raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: f64 = digits[..end].parse().ok()?;
    Some(sign * value)
}

/// The running value of one counter.
///
/// Each [tick](CounterAnimation::tick) adds `target / (duration / tick)`. The
/// last step may overshoot, in which case the value is clamped to the target
/// and the animation is over.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    step: f64,
    current: f64,
    done: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterTick {
    /// The value to display, floored.
    pub value: f64,
    pub done: bool,
}

impl CounterAnimation {
    /// A zero tick jumps to the target on the first tick.
    pub fn new(target: f64, duration: Duration, tick: Duration) -> Self {
        let ticks = duration.as_nanos() as f64 / tick.as_nanos() as f64;
        let step = target / ticks;
        Self {
            target,
            step: if step.is_finite() && step != 0. {
                step
            } else {
                target
            },
            current: 0.,
            done: false,
        }
    }

    pub fn tick(&mut self) -> CounterTick {
        if !self.done {
            self.current += self.step;
            if self.current >= self.target {
                self.current = self.target;
                self.done = true;
            }
        }
        CounterTick {
            value: self.value(),
            done: self.done,
        }
    }

    pub fn value(&self) -> f64 {
        self.current.floor()
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::CounterAnimation;
    use super::parse_count;

    fn animation(target: f64) -> CounterAnimation {
        CounterAnimation::new(
            target,
            Duration::from_millis(2000),
            Duration::from_millis(16),
        )
    }

    #[test]
    fn counts() {
        assert_eq!(Some(100.), parse_count("100"));
        assert_eq!(Some(1500.), parse_count("1500+"));
        assert_eq!(Some(98.), parse_count("  98%"));
        assert_eq!(Some(-5.), parse_count("-5"));
        assert_eq!(Some(7.), parse_count("+7"));
        assert_eq!(None, parse_count("many"));
        assert_eq!(None, parse_count(""));
        assert_eq!(None, parse_count("-"));
    }

    #[test]
    fn large_counts() {
        assert_eq!(Some(1e19), parse_count("10000000000000000000"));
        let mut animation = animation(1e19);
        let mut last = animation.tick();
        while !last.done {
            last = animation.tick();
        }
        assert_eq!("10000000000000000000", last.value.to_string());
    }

    #[test]
    fn reaches_target_without_exceeding() {
        let mut animation = animation(100.);
        assert_eq!(0.8, animation.step());

        let mut previous = 0.;
        let mut ticks = 0;
        loop {
            let tick = animation.tick();
            ticks += 1;
            assert!(tick.value >= previous, "{} < {previous}", tick.value);
            assert!(tick.value <= 100.);
            previous = tick.value;
            if tick.done {
                break;
            }
            assert!(ticks < 1000, "The animation never ends");
        }
        assert_eq!("100", previous.to_string());
        assert!((125..=126).contains(&ticks), "ticks = {ticks}");
    }

    #[test]
    fn overshoot_is_clamped() {
        // 1.12 per tick: the seventh tick lands on 7.84.
        let mut animation = CounterAnimation::new(
            7.,
            Duration::from_millis(100),
            Duration::from_millis(16),
        );
        let values: Vec<f64> = std::iter::from_fn(|| {
            let tick = animation.tick();
            (!tick.done).then_some(tick.value)
        })
        .collect();
        assert_eq!(vec![1., 2., 3., 4., 5., 6.], values);
        assert_eq!(7., animation.value());
        assert!(animation.is_done());
    }

    #[test]
    fn done_is_sticky() {
        let mut animation = animation(0.);
        let tick = animation.tick();
        assert!(tick.done);
        assert_eq!("0", tick.value.to_string());
        assert_eq!(0., animation.tick().value);
    }

    #[test]
    fn zero_tick() {
        let mut animation = CounterAnimation::new(42., Duration::ZERO, Duration::ZERO);
        let tick = animation.tick();
        assert!(tick.done);
        assert_eq!(42., tick.value);
    }

    #[test]
    fn zero_tick_with_duration() {
        let mut animation = CounterAnimation::new(
            100.,
            Duration::from_millis(2000),
            Duration::ZERO,
        );
        assert_eq!(100., animation.step());
        let tick = animation.tick();
        assert!(tick.done);
        assert_eq!(100., tick.value);
    }
}
