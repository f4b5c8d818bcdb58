use tracing::trace;

use crate::{config::NavbarConfig, theme::Theme};

pub trait NavbarView {
    fn set_navbar_background(&self, css: &str);
}

// the navbar goes from translucent to nearly opaque once the page has scrolled
pub fn navbar_background(config: &NavbarConfig, scroll_y: f64, theme: Theme) -> &str {
    let solid = scroll_y > config.solid_threshold;

    match (theme, solid) {
        (Theme::Light, false) => &config.light_translucent,
        (Theme::Light, true) => &config.light_solid,
        (Theme::Dark, false) => &config.dark_translucent,
        (Theme::Dark, true) => &config.dark_solid,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThrottleDecision {
    Run,
    // the caller should retry after this many milliseconds
    Wait(f64),
}

// leading-edge throttle measured against a caller-supplied clock (ms)
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: f64,
    last_run: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: u32) -> Self {
        Throttle {
            interval: f64::from(interval_ms),
            last_run: None,
        }
    }

    pub fn poll(&mut self, now: f64) -> ThrottleDecision {
        match self.last_run {
            Some(last) if now - last < self.interval => {
                ThrottleDecision::Wait(self.interval - (now - last))
            }
            _ => {
                self.last_run = Some(now);
                ThrottleDecision::Run
            }
        }
    }
}

pub const HIDDEN_OPACITY: &str = "0";
pub const HIDDEN_TRANSFORM: &str = "translateY(30px)";
pub const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";
pub const SHOWN_OPACITY: &str = "1";
pub const SHOWN_TRANSFORM: &str = "translateY(0)";

pub trait RevealView {
    // hidden starting styles, applied once before observation begins
    fn conceal(&self, index: usize);

    fn reveal(&self, index: usize);
}

// one-shot visibility tracking for the animated elements
//
// the visibility threshold belongs to the observer options, which decide when
// entries are delivered; any intersecting entry counts as visible here
#[derive(Clone, Debug)]
pub struct RevealSet {
    revealed: Vec<bool>,
}

impl RevealSet {
    pub fn new(count: usize) -> Self {
        RevealSet {
            revealed: vec![false; count],
        }
    }

    pub fn conceal_all<V: RevealView + ?Sized>(&self, view: &V) {
        for index in 0..self.revealed.len() {
            view.conceal(index);
        }
    }

    // returns true only the first time an element is seen intersecting
    pub fn observe(&mut self, index: usize, intersecting: bool, ratio: f64) -> bool {
        let Some(revealed) = self.revealed.get_mut(index) else {
            return false;
        };

        if *revealed || !intersecting {
            return false;
        }

        trace!(index, ratio, "element revealed");
        *revealed = true;
        true
    }

    #[cfg(test)]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PumpAction {
    Run,
    // arm a single timer for this many milliseconds, then call `trailing`
    ScheduleTrailing(u32),
    // a trailing run is already armed
    Skip,
}

// turns raw scroll events into throttled runs plus one trailing run, so the
// last scroll position is always processed
#[derive(Clone, Debug)]
pub struct ScrollPump {
    throttle: Throttle,
    trailing: bool,
}

impl ScrollPump {
    pub fn new(interval_ms: u32) -> Self {
        ScrollPump {
            throttle: Throttle::new(interval_ms),
            trailing: false,
        }
    }

    pub fn scrolled(&mut self, now: f64) -> PumpAction {
        match self.throttle.poll(now) {
            ThrottleDecision::Run => PumpAction::Run,
            ThrottleDecision::Wait(_) if self.trailing => PumpAction::Skip,
            ThrottleDecision::Wait(remaining) => {
                self.trailing = true;
                PumpAction::ScheduleTrailing(remaining.ceil() as u32)
            }
        }
    }

    // the armed timer fired
    pub fn trailing(&mut self, now: f64) -> PumpAction {
        self.trailing = false;
        self.scrolled(now)
    }
}
