//! Interactivity for the FinnVest waitlist landing page.
//!
//! The page markup is static; this crate attaches behavior to it once the
//! document is parsed. Animation math and component state machines are plain
//! Rust and build on any target; the DOM bindings only exist on `wasm32`.

pub mod animation;
pub mod components;
pub mod config;
pub mod error;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod pages;

/// Whether a `document.readyState` value means the markup can be queried.
pub fn dom_is_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

#[cfg(target_arch = "wasm32")]
pub use self::browser::{close_notification, scroll_to_hero, start};

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::RefCell;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;

    use crate::config::LandingConfig;
    use crate::error::LandingError;
    use crate::pages::landing::LandingPage;
    use crate::utils::dom::window;

    thread_local! {
        static PAGE: RefCell<Option<LandingPage>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

        let document = window()?
            .document()
            .ok_or(LandingError::MissingElement("document"))?;
        if crate::dom_is_parsed(&document.ready_state()) {
            boot_logged();
        } else {
            let on_ready = Closure::once_into_js(boot_logged);
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        }
        Ok(())
    }

    fn boot_logged() {
        if let Err(e) = boot() {
            log::error!("Landing page failed to start: {e}");
        }
    }

    fn boot() -> Result<(), LandingError> {
        let window = window()?;
        let config = match window.document() {
            Some(document) => LandingConfig::from_document(&document).unwrap_or_else(|e| {
                log::warn!("Ignoring landing config: {e}");
                LandingConfig::default()
            }),
            None => LandingConfig::default(),
        };
        let page = LandingPage::mount(window, config)?;
        PAGE.with(|slot| *slot.borrow_mut() = Some(page));
        Ok(())
    }

    /// Hides the signup toast. Bound to the toast's close icon in the markup.
    #[wasm_bindgen(js_name = closeNotification)]
    pub fn close_notification() {
        PAGE.with(|slot| {
            if let Some(page) = slot.borrow().as_ref() {
                page.close_notification();
            }
        });
    }

    /// Smooth-scrolls back to the hero. Bound to the logo in the markup.
    #[wasm_bindgen(js_name = scrollToHero)]
    pub fn scroll_to_hero() {
        PAGE.with(|slot| {
            if let Some(page) = slot.borrow().as_ref() {
                page.scroll_to_hero();
            }
        });
    }
}
