use std::time::Duration;

use crate::schedule::Scheduler;

const HEADER_SCROLL_THRESHOLD: f64 = 100.0;
const PARALLAX_RATE: f64 = -0.5;
const ACTIVE_SECTION_OFFSET: f64 = 100.0;
const COMPACT_WIDTH: f64 = 768.0;

pub const TYPEWRITER_START: Duration = Duration::from_millis(1000);
pub const TYPEWRITER_SPEED: Duration = Duration::from_millis(50);

pub fn header_scrolled(scroll_y: f64) -> bool {
    scroll_y > HEADER_SCROLL_THRESHOLD
}

pub fn parallax_transform(scroll_y: f64) -> String {
    format!("translate3d(0, {}px, 0)", scroll_y * PARALLAX_RATE)
}

/// Picks the section the nav should highlight: the last one whose top has passed
/// the header line.
pub fn active_section<'a, I>(sections: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    sections
        .into_iter()
        .filter(|(_, top)| *top <= ACTIVE_SECTION_OFFSET)
        .last()
        .map(|(id, _)| id)
}

/// Viewports where experience cards collapse behind their header.
pub fn is_compact(width: f64) -> bool {
    width <= COMPACT_WIDTH
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    pos: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    /// The next prefix of the text, or `None` once everything is typed.
    pub fn step(&mut self) -> Option<String> {
        if self.pos >= self.chars.len() {
            return None;
        }
        self.pos += 1;
        Some(self.chars[..self.pos].iter().collect())
    }
}

/// Waits [`TYPEWRITER_START`], clears the text, then types one character every
/// [`TYPEWRITER_SPEED`].
pub fn type_out<S, F>(scheduler: &S, text: &str, on_frame: F)
where
    S: Scheduler + Clone + 'static,
    F: Fn(String) + 'static,
{
    let writer = Typewriter::new(text);
    let next = scheduler.clone();
    scheduler.schedule_fn(TYPEWRITER_START, move || {
        on_frame(String::new());
        type_next(next, writer, on_frame);
    });
}

fn type_next<S, F>(scheduler: S, mut writer: Typewriter, on_frame: F)
where
    S: Scheduler + Clone + 'static,
    F: Fn(String) + 'static,
{
    let Some(frame) = writer.step() else {
        return;
    };
    on_frame(frame);
    let next = scheduler.clone();
    scheduler.schedule_fn(TYPEWRITER_SPEED, move || type_next(next, writer, on_frame));
}
