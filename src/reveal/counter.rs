use std::time::Duration;

use crate::schedule::Scheduler;

pub const TICK: Duration = Duration::from_millis(30);
const STEPS: f64 = 50.0;

/// Counts a stat up from zero to the number it displays.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    target: i64,
    current: f64,
    step: f64,
    done: bool,
}

impl Counter {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            current: 0.0,
            step: target as f64 / STEPS,
            done: false,
        }
    }

    /// Reads the leading integer of the displayed text, so `"50+"` counts to 50.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim_start();
        let (sign, digits) = match text.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, text.strip_prefix('+').unwrap_or(text)),
        };
        let end = digits
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(digits.len());
        let value = digits[..end].parse::<i64>().ok()?;
        Some(Self::new(sign * value))
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advances one tick and returns the text to display.
    pub fn tick(&mut self) -> String {
        if self.done {
            return format!("{}+", self.target);
        }
        self.current += self.step;
        if self.current >= self.target as f64 {
            self.done = true;
            format!("{}+", self.target)
        } else {
            format!("{}+", self.current.floor() as i64)
        }
    }
}

/// Drives `counter` on `scheduler`, handing every frame to `on_frame`.
pub fn animate<S, F>(scheduler: &S, counter: Counter, on_frame: F)
where
    S: Scheduler + Clone + 'static,
    F: Fn(String) + 'static,
{
    schedule_tick(scheduler.clone(), counter, on_frame);
}

fn schedule_tick<S, F>(scheduler: S, mut counter: Counter, on_frame: F)
where
    S: Scheduler + Clone + 'static,
    F: Fn(String) + 'static,
{
    let next = scheduler.clone();
    scheduler.schedule_fn(TICK, move || {
        on_frame(counter.tick());
        if !counter.is_done() {
            schedule_tick(next, counter, on_frame);
        }
    });
}
