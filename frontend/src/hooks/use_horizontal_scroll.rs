use web_sys::Element;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::scroll::geometry::{sticky_progress, SectionLayout};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HorizontalScrollState {
    pub progress: f64,
    pub max_scroll: f64,
    pub current_section: usize,
}

impl HorizontalScrollState {
    /// Height the sticky section needs so that its vertical travel covers the
    /// whole horizontal track.
    pub fn section_height_style(&self) -> String {
        format!("height: calc(100vh + {}px);", self.max_scroll)
    }
}

pub fn sticky_state(
    section_top: f64,
    section_height: f64,
    viewport_height: f64,
    layout: SectionLayout,
) -> HorizontalScrollState {
    let max_scroll = layout.max_scroll();
    let progress = sticky_progress(section_top, section_height, viewport_height, max_scroll);
    HorizontalScrollState {
        progress,
        max_scroll,
        current_section: layout.section_at(progress),
    }
}

/// Scroll-linked horizontal track without any locking: the `section` is made
/// tall and sticky, and how far it has been scrolled through decides how far
/// the track has moved. `frame` is the element one panel wide.
#[hook]
pub fn use_horizontal_scroll(
    section: NodeRef,
    frame: NodeRef,
    section_count: usize,
    gap: f64,
) -> HorizontalScrollState {
    let (_, scroll_y) = use_window_scroll();
    let (width, height) = use_window_size();
    let state = use_state_eq(HorizontalScrollState::default);

    {
        let state = state.clone();
        use_effect_with_deps(
            move |(_, _, viewport_height, section_count, gap)| {
                let measured = section
                    .cast::<Element>()
                    .zip(frame.cast::<Element>())
                    .map(|(section, frame)| {
                        let rect = section.get_bounding_client_rect();
                        let layout =
                            SectionLayout::new(*section_count, frame.client_width() as f64, *gap);
                        sticky_state(rect.top(), rect.height(), *viewport_height, layout)
                    });
                if let Some(next) = measured {
                    state.set(next);
                }
                || ()
            },
            (scroll_y, width, height, section_count, gap),
        );
    }

    *state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_follows_section_travel() {
        let layout = SectionLayout::new(4, 900.0, 20.0);
        // 920 * 3 px of track in a section tall enough to cover it exactly.
        let height = 800.0 + 2760.0;

        let above = sticky_state(300.0, height, 800.0, layout);
        assert_eq!(above.progress, 0.0);
        assert_eq!(above.current_section, 0);
        assert_eq!(above.max_scroll, 2760.0);

        let middle = sticky_state(-1380.0, height, 800.0, layout);
        assert_eq!(middle.progress, 1380.0);
        assert_eq!(middle.current_section, 2);

        let below = sticky_state(-9000.0, height, 800.0, layout);
        assert_eq!(below.progress, 2760.0);
        assert_eq!(below.current_section, 3);
    }

    #[test]
    fn height_style_adds_track_length() {
        let state = HorizontalScrollState {
            progress: 0.0,
            max_scroll: 1840.0,
            current_section: 0,
        };
        assert_eq!(state.section_height_style(), "height: calc(100vh + 1840px);");
    }
}
