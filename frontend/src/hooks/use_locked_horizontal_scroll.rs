use std::rc::Rc;

use log::debug;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::ScrollTuning;
use crate::scroll::dom::ScrollLockController;
use crate::scroll::lock::{LockConfig, LockSnapshot, Phase};

#[derive(Clone, PartialEq)]
pub struct LockedHorizontalScrollOptions {
    pub section_count: usize,
    /// Gap between sections in px.
    pub gap: f64,
    pub tuning: Rc<ScrollTuning>,
}

#[derive(Clone, PartialEq)]
pub struct LockedHorizontalScrollHandle {
    pub phase: Phase,
    pub progress: f64,
    pub max_scroll: f64,
    pub current_section: usize,
    pub is_at_start: bool,
    pub is_at_end: bool,
    pub set_progress: Callback<f64>,
    pub jump_to_section: Callback<usize>,
}

impl LockedHorizontalScrollHandle {
    /// Inline style for the horizontally moving track.
    pub fn track_style(&self, gap: f64) -> String {
        format!(
            "display: flex; gap: {}px; transform: translate3d({}px, 0, 0); will-change: transform;",
            gap, -self.progress
        )
    }
}

/// Locks page scrolling while the carousel in `wrapper` is centered and turns
/// vertical input into horizontal progress across the sections inside
/// `container`.
#[hook]
pub fn use_locked_horizontal_scroll(
    container: NodeRef,
    wrapper: NodeRef,
    options: LockedHorizontalScrollOptions,
) -> LockedHorizontalScrollHandle {
    let config = LockConfig {
        section_count: options.section_count,
        gap: options.gap,
    };
    let snapshot = use_state_eq(move || LockSnapshot::initial(config));
    let controller = use_mut_ref(|| None::<ScrollLockController>);

    {
        let snapshot = snapshot.setter();
        let controller = controller.clone();
        use_effect_with_deps(
            move |(_, _, tuning)| {
                let attached = match (container.cast::<HtmlElement>(), wrapper.cast::<HtmlElement>()) {
                    (Some(container), Some(wrapper)) => ScrollLockController::attach(
                        container,
                        wrapper,
                        config,
                        (**tuning).clone(),
                        move |next| snapshot.set(next),
                    ),
                    _ => None,
                };
                if attached.is_none() {
                    debug!("Carousel not measurable yet, scroll lock idle");
                }
                *controller.borrow_mut() = attached;

                move || {
                    if let Some(controller) = controller.borrow_mut().take() {
                        controller.detach();
                    }
                }
            },
            (options.section_count, options.gap, options.tuning.clone()),
        );
    }

    let set_progress = {
        let controller = controller.clone();
        Callback::from(move |value: f64| {
            let current = controller.borrow().clone();
            if let Some(controller) = current {
                controller.set_progress(value);
            }
        })
    };

    let jump_to_section = {
        let controller = controller.clone();
        Callback::from(move |section: usize| {
            let current = controller.borrow().clone();
            if let Some(controller) = current {
                controller.jump_to_section(section);
            }
        })
    };

    let snapshot = *snapshot;
    LockedHorizontalScrollHandle {
        phase: snapshot.phase,
        progress: snapshot.progress,
        max_scroll: snapshot.max_scroll,
        current_section: snapshot.current_section,
        is_at_start: snapshot.is_at_start,
        is_at_end: snapshot.is_at_end,
        set_progress,
        jump_to_section,
    }
}
