use std::collections::HashMap;

use super::lock::TimerKind;

/// Everything a controller registered with the page: event listeners, the
/// pin loop and pending timers. Each resource tears itself down on drop, so
/// detaching is just dropping them. Once detached, anything handed in late
/// (a timer re-armed from a callback already in flight) is dropped on the spot.
pub struct Attachment<L, F, T> {
    listeners: Vec<L>,
    frame: Option<F>,
    timers: HashMap<TimerKind, T>,
    detached: bool,
}

impl<L, F, T> Attachment<L, F, T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            frame: None,
            timers: HashMap::new(),
            detached: false,
        }
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn add_listener(&mut self, listener: L) {
        if !self.detached {
            self.listeners.push(listener);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_frame(&self) -> bool {
        self.frame.is_some()
    }

    pub fn set_frame(&mut self, frame: F) {
        if !self.detached {
            self.frame = Some(frame);
        }
    }

    pub fn clear_frame(&mut self) {
        self.frame = None;
    }

    /// Arms `timer`, cancelling whatever was pending under the same kind.
    pub fn set_timer(&mut self, kind: TimerKind, timer: T) {
        if !self.detached {
            self.timers.insert(kind, timer);
        }
    }

    pub fn clear_timer(&mut self, kind: TimerKind) {
        self.timers.remove(&kind);
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Returns false when there was nothing left to detach.
    pub fn detach(&mut self) -> bool {
        if self.detached {
            return false;
        }
        self.detached = true;
        self.listeners.clear();
        self.frame = None;
        self.timers.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn tracked(counter: &Rc<Cell<usize>>) -> Tracked {
        Tracked(counter.clone())
    }

    #[test]
    fn detach_releases_everything_once() {
        let removed = Rc::new(Cell::new(0));
        let cancelled = Rc::new(Cell::new(0));
        let cleared = Rc::new(Cell::new(0));
        let mut attachment = Attachment::new();
        for _ in 0..6 {
            attachment.add_listener(tracked(&removed));
        }
        attachment.set_frame(tracked(&cancelled));
        attachment.set_timer(TimerKind::EntrySettle, tracked(&cleared));
        attachment.set_timer(TimerKind::Idle, tracked(&cleared));

        assert!(attachment.detach());
        assert_eq!(removed.get(), 6);
        assert_eq!(cancelled.get(), 1);
        assert_eq!(cleared.get(), 2);

        assert!(!attachment.detach());
        assert_eq!(removed.get(), 6);
        assert_eq!(cancelled.get(), 1);
        assert_eq!(cleared.get(), 2);
        assert_eq!(attachment.listener_count(), 0);
        assert!(!attachment.has_frame());
        assert_eq!(attachment.pending_timers(), 0);
    }

    #[test]
    fn late_resources_are_dropped_after_detach() {
        let cleared = Rc::new(Cell::new(0));
        let mut attachment: Attachment<Tracked, Tracked, Tracked> = Attachment::new();
        attachment.detach();
        attachment.set_timer(TimerKind::ExitSettle, tracked(&cleared));
        attachment.set_frame(tracked(&cleared));
        attachment.add_listener(tracked(&cleared));
        assert_eq!(cleared.get(), 3);
        assert_eq!(attachment.pending_timers(), 0);
        assert!(!attachment.has_frame());
    }

    #[test]
    fn rearming_a_timer_cancels_the_previous_one() {
        let cleared = Rc::new(Cell::new(0));
        let mut attachment: Attachment<Tracked, Tracked, Tracked> = Attachment::new();
        attachment.set_timer(TimerKind::Idle, tracked(&cleared));
        attachment.set_timer(TimerKind::Idle, tracked(&cleared));
        assert_eq!(cleared.get(), 1);
        assert_eq!(attachment.pending_timers(), 1);
        attachment.clear_timer(TimerKind::Idle);
        assert_eq!(cleared.get(), 2);
    }
}
