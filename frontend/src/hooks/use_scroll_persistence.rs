use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use web_sys::Storage;
use yew::prelude::*;

use crate::scroll::dom::DomListener;

const SAVE_DEBOUNCE_MS: u32 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedScroll {
    pub y: f64,
}

pub fn storage_key(key: &str) -> String {
    format!("scroll-position:{}", key)
}

pub fn parse_saved(raw: &str) -> Option<SavedScroll> {
    match serde_json::from_str::<SavedScroll>(raw) {
        Ok(saved) if saved.y.is_finite() && saved.y >= 0.0 => Some(saved),
        Ok(saved) => {
            warn!("Ignoring saved scroll position {}", saved.y);
            None
        }
        Err(e) => {
            warn!("Ignoring unreadable saved scroll position: {}", e);
            None
        }
    }
}

fn session_storage() -> Option<Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}

fn load(storage_key: &str) -> Option<SavedScroll> {
    let raw = session_storage()?.get_item(storage_key).ok().flatten()?;
    parse_saved(&raw)
}

fn save_current(storage_key: &str) {
    let Some(y) = web_sys::window().and_then(|w| w.scroll_y().ok()) else {
        return;
    };
    if let (Some(storage), Ok(raw)) = (session_storage(), serde_json::to_string(&SavedScroll { y })) {
        let _ = storage.set_item(storage_key, &raw);
    }
}

/// Keeps the window scroll offset for `key` in session storage so coming back
/// to a page lands where the reader left it.
#[hook]
pub fn use_scroll_persistence(key: String) {
    use_effect_with_deps(
        move |key: &String| {
            let storage_key = storage_key(key);

            if let (Some(window), Some(saved)) = (web_sys::window(), load(&storage_key)) {
                debug!("Restoring {} to y={}", storage_key, saved.y);
                window.scroll_to_with_x_and_y(0.0, saved.y);
            }

            let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
            let listener = web_sys::window().and_then(|window| {
                let pending = pending.clone();
                let storage_key = storage_key.clone();
                DomListener::new(&window, "scroll", true, move |_| {
                    let storage_key = storage_key.clone();
                    *pending.borrow_mut() = Some(Timeout::new(SAVE_DEBOUNCE_MS, move || {
                        save_current(&storage_key);
                    }));
                })
            });

            move || {
                drop(listener);
                pending.borrow_mut().take();
                save_current(&storage_key);
            }
        },
        key,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced() {
        assert_eq!(storage_key("home"), "scroll-position:home");
    }

    #[test]
    fn saved_positions_must_be_sane() {
        assert_eq!(parse_saved(r#"{"y": 1234.5}"#), Some(SavedScroll { y: 1234.5 }));
        assert_eq!(parse_saved(r#"{"y": -10}"#), None);
        assert_eq!(parse_saved(r#"{"x": 3}"#), None);
        assert_eq!(parse_saved("1234"), None);
    }

    #[test]
    fn saved_position_serializes_as_object() {
        let raw = serde_json::to_string(&SavedScroll { y: 640.0 }).unwrap();
        assert_eq!(raw, r#"{"y":640.0}"#);
        assert_eq!(parse_saved(&raw), Some(SavedScroll { y: 640.0 }));
    }
}
