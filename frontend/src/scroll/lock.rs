//! Scroll-lock state machine.
//!
//! The engine owns phase, progress and the pinned target. Every input comes
//! with a fresh [`Geometry`] measurement; the engine mutates itself and
//! returns the side effects the DOM shell has to perform. Nothing here holds
//! a reference to the page.

use log::debug;

use super::geometry::{Direction, Geometry, SectionLayout};
use crate::config::ScrollTuning;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Carousel not reached yet, page scrolls natively.
    #[default]
    Before,
    /// Page pinned, vertical input drives the carousel.
    Locked,
    /// Carousel passed, page scrolls natively.
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    EntrySettle,
    ExitSettle,
    SnapSettle,
    /// Fires once document scrolling has been quiet for a moment.
    Idle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    Instant,
    Smooth,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    /// Wheel delta in px, positive downwards.
    Wheel { delta: f64 },
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    TouchEnd,
    /// Keyboard scroll step in px, positive downwards.
    Key { delta: f64 },
    DocumentScroll,
    Resize,
    /// The browser reported the end of a scroll animation.
    ScrollEnd,
    Timer(TimerKind),
    SetProgress(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    PreventDefault,
    ScrollTo { y: f64, behavior: Behavior },
    ScrollBy { dy: f64, behavior: Behavior },
    StartPin,
    StopPin,
    /// (Re)arm a timer, replacing any pending one of the same kind.
    Schedule { timer: TimerKind, after_ms: u32 },
    Cancel(TimerKind),
}

/// What the pin loop should do on this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinTick {
    Hold,
    Correct(f64),
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LockConfig {
    pub section_count: usize,
    pub gap: f64,
}

/// Everything the page needs to render the carousel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LockSnapshot {
    pub phase: Phase,
    pub progress: f64,
    pub max_scroll: f64,
    pub section_count: usize,
    pub current_section: usize,
    pub is_at_start: bool,
    pub is_at_end: bool,
}

impl LockSnapshot {
    pub fn initial(config: LockConfig) -> Self {
        Self {
            phase: Phase::Before,
            progress: 0.0,
            max_scroll: 0.0,
            section_count: config.section_count.max(1),
            current_section: 0,
            is_at_start: true,
            is_at_end: config.section_count <= 1,
        }
    }
}

pub struct LockEngine {
    tuning: ScrollTuning,
    layout: SectionLayout,
    phase: Phase,
    progress: f64,
    target_y: Option<f64>,
    // Lock-entry snap or snap assist still moving the page.
    animating: bool,
    // Exit nudge still moving the page.
    transitioning: bool,
    last_scroll_y: Option<f64>,
    last_direction: Option<Direction>,
    touch_y: Option<f64>,
}

impl LockEngine {
    pub fn new(config: LockConfig, tuning: ScrollTuning) -> Self {
        Self {
            tuning,
            layout: SectionLayout::new(config.section_count, 0.0, config.gap),
            phase: Phase::Before,
            progress: 0.0,
            target_y: None,
            animating: false,
            transitioning: false,
            last_scroll_y: None,
            last_direction: None,
            touch_y: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn target_y(&self) -> Option<f64> {
        self.target_y
    }

    pub fn max_scroll(&self) -> f64 {
        self.layout.max_scroll()
    }

    pub fn layout(&self) -> SectionLayout {
        self.layout
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn snapshot(&self) -> LockSnapshot {
        let max_scroll = self.layout.max_scroll();
        LockSnapshot {
            phase: self.phase,
            progress: self.progress,
            max_scroll,
            section_count: self.layout.section_count,
            current_section: self.layout.section_at(self.progress),
            is_at_start: self.progress <= 0.0,
            is_at_end: self.progress >= max_scroll,
        }
    }

    /// Picks the starting phase for a page that is already scrolled, e.g.
    /// after a restored scroll position put the carousel above the fold.
    pub fn sync_initial(&mut self, geometry: &Geometry) {
        self.remeasure(geometry);
        self.last_scroll_y = Some(geometry.scroll_y);
        self.resync(geometry);
    }

    /// Side of the carousel the page is on, without locking.
    fn resync(&mut self, geometry: &Geometry) {
        if geometry.center_distance() < -self.tuning.center_tolerance {
            self.phase = Phase::After;
            self.progress = self.layout.max_scroll();
        } else {
            self.phase = Phase::Before;
            self.progress = 0.0;
        }
    }

    pub fn handle(&mut self, input: Input, geometry: &Geometry) -> Vec<Effect> {
        self.remeasure(geometry);
        match input {
            Input::Wheel { delta } => self.on_wheel(delta, geometry),
            Input::Key { delta } => {
                if self.phase == Phase::Locked {
                    self.accumulate(delta, geometry)
                } else {
                    Vec::new()
                }
            }
            Input::TouchStart { y } => {
                self.touch_y = Some(y);
                Vec::new()
            }
            Input::TouchMove { y } => {
                let last = self.touch_y.replace(y);
                match (self.phase, last) {
                    (Phase::Locked, Some(last)) => {
                        // Finger moving up scrolls the content down.
                        let delta = (last - y) * self.tuning.touch_sensitivity;
                        self.accumulate(delta, geometry)
                    }
                    // Keep the browser from scrolling the page underneath a lock.
                    (Phase::Locked, None) => vec![Effect::PreventDefault],
                    _ => Vec::new(),
                }
            }
            Input::TouchEnd => {
                self.touch_y = None;
                Vec::new()
            }
            Input::DocumentScroll => self.on_document_scroll(geometry),
            Input::Resize => self.on_resize(geometry),
            Input::ScrollEnd => {
                self.animating = false;
                self.transitioning = false;
                Vec::new()
            }
            Input::Timer(timer) => self.on_timer(timer, geometry),
            Input::SetProgress(value) => {
                let value = self.layout.clamp(value);
                if self.phase == Phase::Locked {
                    self.progress = value;
                    Vec::new()
                } else {
                    self.enter(value, geometry)
                }
            }
        }
    }

    /// One pin-loop frame.
    pub fn tick(&self, scroll_y: f64) -> PinTick {
        if self.phase != Phase::Locked {
            return PinTick::Stop;
        }
        match self.target_y {
            Some(target) if (scroll_y - target).abs() > self.tuning.pin_tolerance => {
                PinTick::Correct(target)
            }
            Some(_) => PinTick::Hold,
            None => PinTick::Stop,
        }
    }

    fn remeasure(&mut self, geometry: &Geometry) {
        if geometry.section_width == self.layout.section_width {
            return;
        }
        self.layout = SectionLayout::new(
            self.layout.section_count,
            geometry.section_width,
            self.layout.gap,
        );
        self.progress = match self.phase {
            Phase::Before => 0.0,
            Phase::Locked => self.layout.clamp(self.progress),
            Phase::After => self.layout.max_scroll(),
        };
    }

    fn on_wheel(&mut self, delta: f64, geometry: &Geometry) -> Vec<Effect> {
        let delta = delta * self.tuning.wheel_sensitivity;
        match self.phase {
            Phase::Locked => self.accumulate(delta, geometry),
            Phase::Before => {
                if delta > 0.0
                    && !self.transitioning
                    && geometry.is_centered_within(self.tuning.entry_tolerance)
                {
                    // The arming event only snaps; it adds no distance.
                    let mut effects = vec![Effect::PreventDefault];
                    effects.extend(self.enter(0.0, geometry));
                    effects
                } else {
                    Vec::new()
                }
            }
            Phase::After => {
                let tolerance = self.tuning.entry_tolerance;
                if delta < 0.0
                    && !self.transitioning
                    && (geometry.bottom_distance().abs() <= tolerance
                        || geometry.is_centered_within(tolerance))
                {
                    let mut effects = vec![Effect::PreventDefault];
                    effects.extend(self.enter(self.layout.max_scroll(), geometry));
                    effects
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn accumulate(&mut self, delta: f64, geometry: &Geometry) -> Vec<Effect> {
        let Some(direction) = Direction::of(delta) else {
            return vec![Effect::PreventDefault];
        };
        let next = self.progress + delta;
        let max_scroll = self.layout.max_scroll();
        if next < 0.0 && direction == Direction::Up {
            self.exit(Phase::Before, geometry)
        } else if next > max_scroll && direction == Direction::Down {
            self.exit(Phase::After, geometry)
        } else {
            self.progress = self.layout.clamp(next);
            vec![Effect::PreventDefault]
        }
    }

    fn enter(&mut self, progress: f64, geometry: &Geometry) -> Vec<Effect> {
        let target = geometry.centering_target();
        debug!(
            "Scroll lock engaged from {:?} at y={} progress={}",
            self.phase, target, progress
        );
        self.phase = Phase::Locked;
        self.progress = self.layout.clamp(progress);
        self.target_y = Some(target);
        self.animating = true;
        self.touch_y = None;
        vec![
            Effect::Cancel(TimerKind::Idle),
            Effect::ScrollTo {
                y: target,
                behavior: Behavior::Instant,
            },
            Effect::StartPin,
            Effect::Schedule {
                timer: TimerKind::EntrySettle,
                after_ms: self.tuning.entry_settle_ms,
            },
        ]
    }

    fn exit(&mut self, phase: Phase, geometry: &Geometry) -> Vec<Effect> {
        let (progress, nudge, direction) = match phase {
            Phase::After => (self.layout.max_scroll(), self.tuning.exit_nudge, Direction::Down),
            _ => (0.0, -self.tuning.exit_nudge, Direction::Up),
        };
        debug!("Scroll lock released into {:?} at y={}", phase, geometry.scroll_y);
        self.phase = phase;
        self.progress = progress;
        self.target_y = None;
        self.animating = false;
        self.transitioning = true;
        self.last_direction = Some(direction);
        vec![
            Effect::PreventDefault,
            Effect::StopPin,
            Effect::Cancel(TimerKind::EntrySettle),
            Effect::ScrollBy {
                dy: nudge,
                behavior: Behavior::Smooth,
            },
            Effect::Schedule {
                timer: TimerKind::ExitSettle,
                after_ms: self.tuning.exit_settle_ms,
            },
        ]
    }

    fn on_document_scroll(&mut self, geometry: &Geometry) -> Vec<Effect> {
        let previous = self.last_scroll_y.replace(geometry.scroll_y);
        let moved = previous.map(|previous| geometry.scroll_y - previous);
        let direction = moved.and_then(Direction::of);
        if direction.is_some() {
            self.last_direction = direction;
        }
        if self.phase == Phase::Locked {
            return Vec::new();
        }

        // Home/End, anchor links or a restored position jump the page
        // somewhere else entirely; that is not a gesture through the carousel.
        if moved.is_some_and(|moved| moved.abs() > geometry.viewport_height) {
            debug!("Page jumped to y={}, resyncing scroll lock", geometry.scroll_y);
            self.resync(geometry);
            return Vec::new();
        }

        let tolerance = self.tuning.center_tolerance;
        let distance = geometry.center_distance();
        // Where the wrapper sat on the previous event; a fast scroll can jump
        // straight over the tolerance band in a single frame.
        let crossed = moved.is_some_and(|moved| {
            let before = distance + moved;
            (before > tolerance && distance < -tolerance)
                || (before < -tolerance && distance > tolerance)
        });
        let reached = geometry.is_centered_within(tolerance) || crossed;

        if !self.transitioning {
            match (self.phase, direction) {
                (Phase::Before, Some(Direction::Down)) if reached => {
                    return self.enter(0.0, geometry);
                }
                (Phase::After, Some(Direction::Up))
                    if reached || geometry.bottom_distance().abs() <= tolerance =>
                {
                    return self.enter(self.layout.max_scroll(), geometry);
                }
                _ => {}
            }
        }

        vec![Effect::Schedule {
            timer: TimerKind::Idle,
            after_ms: self.tuning.idle_debounce_ms,
        }]
    }

    fn on_resize(&mut self, geometry: &Geometry) -> Vec<Effect> {
        if self.phase != Phase::Locked {
            return Vec::new();
        }
        let target = geometry.centering_target();
        self.target_y = Some(target);
        vec![Effect::ScrollTo {
            y: target,
            behavior: Behavior::Instant,
        }]
    }

    fn on_timer(&mut self, timer: TimerKind, geometry: &Geometry) -> Vec<Effect> {
        match timer {
            TimerKind::EntrySettle | TimerKind::SnapSettle => {
                self.animating = false;
                Vec::new()
            }
            TimerKind::ExitSettle => {
                self.transitioning = false;
                Vec::new()
            }
            TimerKind::Idle => self.snap_assist(geometry),
        }
    }

    /// Gently centers the carousel when the reader stopped close to it while
    /// heading towards it.
    fn snap_assist(&mut self, geometry: &Geometry) -> Vec<Effect> {
        if self.phase == Phase::Locked || self.animating || self.transitioning {
            return Vec::new();
        }
        let distance = geometry.center_distance();
        let close = (self.tuning.snap_min_distance..=self.tuning.snap_max_distance)
            .contains(&distance.abs());
        let heading_in = match self.phase {
            Phase::Before => distance > 0.0 && self.last_direction == Some(Direction::Down),
            Phase::After => distance < 0.0 && self.last_direction == Some(Direction::Up),
            Phase::Locked => false,
        };
        if !close || !heading_in {
            return Vec::new();
        }
        debug!("Snap assist towards carousel, {}px off center", distance);
        self.animating = true;
        vec![
            Effect::ScrollTo {
                y: geometry.centering_target(),
                behavior: Behavior::Smooth,
            },
            Effect::Schedule {
                timer: TimerKind::SnapSettle,
                after_ms: self.tuning.snap_settle_ms,
            },
        ]
    }
}
