use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::Element;
use yew::prelude::*;

use crate::scroll::dom::DomListener;
use crate::scroll::geometry::in_reveal_zone;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnimationOptions {
    /// Fraction of the viewport the element's top has to climb past.
    pub threshold: f64,
    /// Time the element has to stay in the zone before it is revealed.
    pub delay_ms: u32,
    /// Reveal once and stop watching.
    pub once: bool,
}

impl Default for ScrollAnimationOptions {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            delay_ms: 80,
            once: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealAction {
    Arm,
    Disarm,
    Hide,
    Nothing,
}

pub fn next_reveal(visible: bool, armed: bool, in_zone: bool, once: bool) -> RevealAction {
    match (in_zone, visible, armed) {
        (true, false, false) => RevealAction::Arm,
        (false, _, true) => RevealAction::Disarm,
        (false, true, false) if !once => RevealAction::Hide,
        _ => RevealAction::Nothing,
    }
}

fn measure_zone(node: &NodeRef, threshold: f64) -> Option<bool> {
    let element = node.cast::<Element>()?;
    let viewport_height = web_sys::window()?.inner_height().ok()?.as_f64()?;
    let rect = element.get_bounding_client_rect();
    Some(in_reveal_zone(rect.top(), rect.bottom(), viewport_height, threshold))
}

/// Returns true once `node` has scrolled far enough into view.
#[hook]
pub fn use_scroll_animation(node: NodeRef, options: ScrollAnimationOptions) -> bool {
    let visible = use_state_eq(|| false);

    {
        let visible = visible.setter();
        use_effect_with_deps(
            move |options: &ScrollAnimationOptions| {
                let options = *options;
                let shown = Rc::new(Cell::new(false));
                let armed = Rc::new(Cell::new(false));
                let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
                let listener: Rc<RefCell<Option<DomListener>>> = Rc::default();

                let check: Rc<dyn Fn()> = {
                    let pending = pending.clone();
                    let listener = listener.clone();
                    Rc::new(move || {
                        let Some(in_zone) = measure_zone(&node, options.threshold) else {
                            return;
                        };
                        match next_reveal(shown.get(), armed.get(), in_zone, options.once) {
                            RevealAction::Arm => {
                                armed.set(true);
                                let shown = shown.clone();
                                let armed = armed.clone();
                                let visible = visible.clone();
                                let listener = listener.clone();
                                let timeout = Timeout::new(options.delay_ms, move || {
                                    armed.set(false);
                                    shown.set(true);
                                    visible.set(true);
                                    if options.once {
                                        listener.borrow_mut().take();
                                    }
                                });
                                *pending.borrow_mut() = Some(timeout);
                            }
                            RevealAction::Disarm => {
                                armed.set(false);
                                pending.borrow_mut().take();
                            }
                            RevealAction::Hide => {
                                shown.set(false);
                                visible.set(false);
                            }
                            RevealAction::Nothing => {}
                        }
                    })
                };

                if let Some(window) = web_sys::window() {
                    let check = check.clone();
                    *listener.borrow_mut() =
                        DomListener::new(&window, "scroll", true, move |_| check());
                }
                check();

                move || {
                    listener.borrow_mut().take();
                    pending.borrow_mut().take();
                }
            },
            options,
        );
    }

    *visible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_the_zone_arms_once() {
        assert_eq!(next_reveal(false, false, true, true), RevealAction::Arm);
        assert_eq!(next_reveal(false, true, true, true), RevealAction::Nothing);
        assert_eq!(next_reveal(true, false, true, true), RevealAction::Nothing);
    }

    #[test]
    fn leaving_before_the_delay_disarms() {
        assert_eq!(next_reveal(false, true, false, true), RevealAction::Disarm);
        assert_eq!(next_reveal(false, true, false, false), RevealAction::Disarm);
    }

    #[test]
    fn leaving_hides_only_repeatable_reveals() {
        assert_eq!(next_reveal(true, false, false, false), RevealAction::Hide);
        assert_eq!(next_reveal(true, false, false, true), RevealAction::Nothing);
        assert_eq!(next_reveal(false, false, false, false), RevealAction::Nothing);
    }
}
