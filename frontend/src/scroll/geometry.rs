// Layout math shared by the scroll hooks. Nothing in here touches the DOM so it
// can be exercised by plain unit tests.

/// One measurement of the page taken when an input arrives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Document scroll offset (`window.scrollY`).
    pub scroll_y: f64,
    pub viewport_height: f64,
    /// Wrapper top relative to the viewport (bounding client rect).
    pub wrapper_top: f64,
    pub wrapper_height: f64,
    /// Width of one carousel section, the container's client width.
    pub section_width: f64,
}

impl Geometry {
    /// Signed distance from the viewport midpoint to the wrapper midpoint.
    /// Positive while the wrapper sits below the middle of the screen.
    pub fn center_distance(&self) -> f64 {
        (self.wrapper_top + self.wrapper_height / 2.0) - self.viewport_height / 2.0
    }

    /// Document offset at which the wrapper would be exactly centered.
    pub fn centering_target(&self) -> f64 {
        (self.scroll_y + self.center_distance()).max(0.0)
    }

    pub fn is_centered_within(&self, tolerance: f64) -> bool {
        self.center_distance().abs() <= tolerance
    }

    /// Distance between the wrapper's bottom edge and the viewport bottom.
    pub fn bottom_distance(&self) -> f64 {
        (self.wrapper_top + self.wrapper_height) - self.viewport_height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of a vertical delta; zero has none.
    pub fn of(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Direction::Down)
        } else if delta < 0.0 {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

/// A row of equally wide sections separated by a fixed gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionLayout {
    pub section_count: usize,
    pub section_width: f64,
    pub gap: f64,
}

impl SectionLayout {
    pub fn new(section_count: usize, section_width: f64, gap: f64) -> Self {
        Self {
            section_count: section_count.max(1),
            section_width: section_width.max(0.0),
            gap: gap.max(0.0),
        }
    }

    pub fn stride(&self) -> f64 {
        self.section_width + self.gap
    }

    pub fn max_scroll(&self) -> f64 {
        (self.section_count - 1) as f64 * self.stride()
    }

    pub fn clamp(&self, progress: f64) -> f64 {
        progress.clamp(0.0, self.max_scroll())
    }

    pub fn section_at(&self, progress: f64) -> usize {
        let stride = self.stride();
        if stride <= 0.0 {
            return 0;
        }
        let index = (progress / stride).round().max(0.0) as usize;
        index.min(self.section_count - 1)
    }

    pub fn offset_of(&self, section: usize) -> f64 {
        self.clamp(section as f64 * self.stride())
    }
}

// WheelEvent.deltaMode values
const DOM_DELTA_LINE: u32 = 1;
const DOM_DELTA_PAGE: u32 = 2;
const LINE_HEIGHT_PX: f64 = 16.0;

/// Converts a wheel delta to pixels whatever unit the browser reported it in.
pub fn normalize_wheel_delta(delta_y: f64, delta_mode: u32, viewport_height: f64) -> f64 {
    match delta_mode {
        DOM_DELTA_LINE => delta_y * LINE_HEIGHT_PX,
        DOM_DELTA_PAGE => delta_y * viewport_height,
        _ => delta_y,
    }
}

/// Pixel delta for a scrolling key, `None` for keys we leave alone.
pub fn key_delta(key: &str, shift: bool, viewport_height: f64, step: f64) -> Option<f64> {
    let page = viewport_height * 0.9;
    match key {
        "ArrowDown" => Some(step),
        "ArrowUp" => Some(-step),
        "PageDown" => Some(page),
        "PageUp" => Some(-page),
        " " | "Spacebar" => Some(if shift { -page } else { page }),
        _ => None,
    }
}

/// Progress of a sticky section whose vertical travel drives a horizontal
/// track: 0 until the section reaches the top of the viewport, `max_scroll`
/// once its bottom reaches the bottom of the viewport.
pub fn sticky_progress(
    section_top: f64,
    section_height: f64,
    viewport_height: f64,
    max_scroll: f64,
) -> f64 {
    let travel = section_height - viewport_height;
    if travel <= 0.0 {
        return 0.0;
    }
    let ratio = (-section_top / travel).clamp(0.0, 1.0);
    ratio * max_scroll
}

/// Whether an element is inside the band where it should be revealed.
/// `threshold` is the fraction of the viewport the top edge has to climb past.
pub fn in_reveal_zone(top: f64, bottom: f64, viewport_height: f64, threshold: f64) -> bool {
    let trigger = viewport_height * (1.0 - threshold.clamp(0.0, 1.0));
    top < trigger && bottom > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered(section_width: f64) -> Geometry {
        Geometry {
            scroll_y: 1200.0,
            viewport_height: 800.0,
            wrapper_top: 100.0,
            wrapper_height: 600.0,
            section_width,
        }
    }

    #[test]
    fn center_distance_is_zero_when_wrapper_is_centered() {
        let geometry = centered(1000.0);
        assert_eq!(geometry.center_distance(), 0.0);
        assert_eq!(geometry.centering_target(), 1200.0);
        assert!(geometry.is_centered_within(0.0));
    }

    #[test]
    fn centering_target_follows_wrapper_below_center() {
        let geometry = Geometry {
            wrapper_top: 140.0,
            ..centered(1000.0)
        };
        assert_eq!(geometry.center_distance(), 40.0);
        assert_eq!(geometry.centering_target(), 1240.0);
        assert!(geometry.is_centered_within(50.0));
        assert!(!geometry.is_centered_within(5.0));
    }

    #[test]
    fn section_derivation_rounds_to_nearest() {
        let layout = SectionLayout::new(3, 1000.0, 30.0);
        assert_eq!(layout.max_scroll(), 2060.0);
        assert_eq!(layout.section_at(1030.0), 1);
        assert_eq!(layout.section_at(514.0), 0);
        assert_eq!(layout.section_at(516.0), 1);
        assert_eq!(layout.section_at(2060.0), 2);
        assert_eq!(layout.section_at(99_999.0), 2);
    }

    #[test]
    fn single_section_has_no_travel() {
        let layout = SectionLayout::new(0, 900.0, 20.0);
        assert_eq!(layout.section_count, 1);
        assert_eq!(layout.max_scroll(), 0.0);
        assert_eq!(layout.clamp(300.0), 0.0);
    }

    #[test]
    fn wheel_delta_modes() {
        assert_eq!(normalize_wheel_delta(120.0, 0, 800.0), 120.0);
        assert_eq!(normalize_wheel_delta(3.0, 1, 800.0), 48.0);
        assert_eq!(normalize_wheel_delta(-1.0, 2, 800.0), -800.0);
    }

    #[test]
    fn keys_map_to_signed_steps() {
        assert_eq!(key_delta("ArrowDown", false, 800.0, 120.0), Some(120.0));
        assert_eq!(key_delta("ArrowUp", false, 800.0, 120.0), Some(-120.0));
        assert_eq!(key_delta("PageDown", false, 800.0, 120.0), Some(720.0));
        assert_eq!(key_delta(" ", true, 800.0, 120.0), Some(-720.0));
        assert_eq!(key_delta("Enter", false, 800.0, 120.0), None);
    }

    #[test]
    fn sticky_progress_tracks_section_travel() {
        // 3000px tall section in an 800px viewport: 2200px of travel.
        assert_eq!(sticky_progress(250.0, 3000.0, 800.0, 2060.0), 0.0);
        assert_eq!(sticky_progress(-1100.0, 3000.0, 800.0, 2060.0), 1030.0);
        assert_eq!(sticky_progress(-5000.0, 3000.0, 800.0, 2060.0), 2060.0);
        assert_eq!(sticky_progress(-100.0, 600.0, 800.0, 2060.0), 0.0);
    }

    #[test]
    fn reveal_zone_needs_top_past_threshold() {
        assert!(!in_reveal_zone(700.0, 900.0, 800.0, 0.2));
        assert!(in_reveal_zone(600.0, 900.0, 800.0, 0.2));
        assert!(!in_reveal_zone(-400.0, -10.0, 800.0, 0.2));
    }

    #[test]
    fn direction_of_delta() {
        assert_eq!(Direction::of(3.0), Some(Direction::Down));
        assert_eq!(Direction::of(-0.5), Some(Direction::Up));
        assert_eq!(Direction::of(0.0), None);
    }
}
