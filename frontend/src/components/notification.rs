//! The "you're on the list" toast.
//!
//! Every `show()` bumps a generation counter; an auto-hide only acts if it
//! still belongs to the latest generation, so a dismissed or re-shown toast
//! is never touched by an older timer.

/// Ticket handed out by [`NotificationState::show`] for its auto-hide timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoHide(u64);

#[derive(Debug, Default)]
pub struct NotificationState {
    visible: bool,
    generation: u64,
}

impl NotificationState {
    pub fn show(&mut self) -> AutoHide {
        self.generation += 1;
        self.visible = true;
        AutoHide(self.generation)
    }

    /// Hides immediately. Returns whether it was visible.
    pub fn dismiss(&mut self) -> bool {
        self.generation += 1;
        std::mem::replace(&mut self.visible, false)
    }

    /// Called when an auto-hide timer fires. Returns `true` if it hid the toast.
    pub fn auto_hide(&mut self, ticket: AutoHide) -> bool {
        if self.visible && ticket.0 == self.generation {
            self.visible = false;
            true
        } else {
            false
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::binding::Notification;

#[cfg(target_arch = "wasm32")]
mod binding {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use web_sys::{Document, Element};

    use super::NotificationState;
    use crate::error::LandingError;
    use crate::utils::dom::{add_class, remove_class};

    const SHOW_CLASS: &str = "show";

    pub struct Notification {
        element: Element,
        state: Rc<RefCell<NotificationState>>,
        auto_hide: RefCell<Option<Timeout>>,
        duration_ms: u32,
    }

    impl Notification {
        pub const ELEMENT_ID: &'static str = "successNotification";

        pub fn bind(document: &Document, duration_ms: u32) -> Option<Self> {
            let element = document.get_element_by_id(Self::ELEMENT_ID)?;
            Some(Self {
                element,
                state: Rc::new(RefCell::new(NotificationState::default())),
                auto_hide: RefCell::new(None),
                duration_ms,
            })
        }

        /// Shows the toast and restarts the auto-hide countdown.
        pub fn show(&self) -> Result<(), LandingError> {
            let ticket = self.state.borrow_mut().show();
            add_class(&self.element, SHOW_CLASS)?;

            let state = self.state.clone();
            let element = self.element.clone();
            let timeout = Timeout::new(self.duration_ms, move || {
                if state.borrow_mut().auto_hide(ticket) {
                    if let Err(e) = remove_class(&element, SHOW_CLASS) {
                        log::warn!("Failed to hide notification: {e}");
                    }
                }
            });
            // Dropping the previous handle cancels its timer.
            *self.auto_hide.borrow_mut() = Some(timeout);
            Ok(())
        }

        pub fn dismiss(&self) -> Result<(), LandingError> {
            self.auto_hide.borrow_mut().take();
            self.state.borrow_mut().dismiss();
            remove_class(&self.element, SHOW_CLASS)
        }

        pub fn is_visible(&self) -> bool {
            self.state.borrow().is_visible()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pending auto-hide timers, fired in due order as time advances.
    struct Clock {
        now: u64,
        timers: Vec<(u64, AutoHide)>,
    }

    impl Clock {
        fn new() -> Self {
            Self {
                now: 0,
                timers: Vec::new(),
            }
        }

        fn show(&mut self, state: &mut NotificationState, duration: u64) {
            let ticket = state.show();
            self.timers.push((self.now + duration, ticket));
        }

        fn advance_to(&mut self, t: u64, state: &mut NotificationState) {
            self.timers.sort_by_key(|(due, _)| *due);
            while let Some(&(due, ticket)) = self.timers.first() {
                if due > t {
                    break;
                }
                self.timers.remove(0);
                self.now = due;
                state.auto_hide(ticket);
            }
            self.now = t;
        }
    }

    #[test]
    fn hides_after_duration() {
        let mut state = NotificationState::default();
        let mut clock = Clock::new();
        clock.show(&mut state, 6000);

        clock.advance_to(5999, &mut state);
        assert!(state.is_visible());
        clock.advance_to(6000, &mut state);
        assert!(!state.is_visible());
    }

    #[test]
    fn dismiss_wins_over_pending_auto_hide() {
        let mut state = NotificationState::default();
        let mut clock = Clock::new();
        clock.show(&mut state, 6000);

        clock.advance_to(3000, &mut state);
        assert!(state.dismiss());
        assert!(!state.is_visible());

        clock.advance_to(6000, &mut state);
        assert!(!state.is_visible());
        assert!(!state.dismiss());
    }

    #[test]
    fn show_again_restarts_the_countdown() {
        let mut state = NotificationState::default();
        let mut clock = Clock::new();
        clock.show(&mut state, 6000);
        clock.advance_to(4000, &mut state);
        clock.show(&mut state, 6000);

        clock.advance_to(6000, &mut state);
        assert!(state.is_visible(), "stale timer must not hide a newer show");
        clock.advance_to(10_000, &mut state);
        assert!(!state.is_visible());
    }

    #[test]
    fn stale_ticket_after_dismiss_and_show() {
        let mut state = NotificationState::default();
        let first = state.show();
        state.dismiss();
        let second = state.show();
        assert!(!state.auto_hide(first));
        assert!(state.is_visible());
        assert!(state.auto_hide(second));
    }
}
