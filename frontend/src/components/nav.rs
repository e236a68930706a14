/// Open/closed state of the mobile menu.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    open: bool,
}

impl NavState {
    /// Flips the menu and returns whether it is now open.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Closes the menu. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::binding::NavController;

#[cfg(target_arch = "wasm32")]
mod binding {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, Event, HtmlElement, Node};

    use super::NavState;
    use crate::error::LandingError;
    use crate::utils::dom::{query, query_all, Listener};

    const ACTIVE_CLASS: &str = "active";

    /// Body `overflow: hidden` while the menu is open. Only the nav touches it.
    struct ScrollLock {
        body: HtmlElement,
    }

    impl ScrollLock {
        fn set(&self, locked: bool) -> Result<(), LandingError> {
            let style = self.body.style();
            if locked {
                style.set_property("overflow", "hidden")?;
            } else {
                style.remove_property("overflow")?;
            }
            Ok(())
        }
    }

    struct Menu {
        hamburger: Element,
        menu: Element,
        lock: ScrollLock,
        state: RefCell<NavState>,
    }

    impl Menu {
        fn render(&self) -> Result<(), LandingError> {
            let open = self.state.borrow().is_open();
            self.hamburger
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, open)?;
            self.menu.class_list().toggle_with_force(ACTIVE_CLASS, open)?;
            self.lock.set(open)
        }

        fn toggle(&self) {
            self.state.borrow_mut().toggle();
            self.report(self.render());
        }

        fn close(&self) {
            if self.state.borrow_mut().close() {
                self.report(self.render());
            }
        }

        fn contains(&self, event: &Event) -> bool {
            let Some(node) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                return false;
            };
            self.hamburger.contains(Some(&node)) || self.menu.contains(Some(&node))
        }

        fn report(&self, result: Result<(), LandingError>) {
            if let Err(e) = result {
                log::warn!("Failed to update mobile menu: {e}");
            }
        }
    }

    pub struct NavController {
        menu: Rc<Menu>,
        _listeners: Vec<Listener>,
    }

    impl NavController {
        pub fn bind(document: &Document) -> Result<Option<Self>, LandingError> {
            let (Some(hamburger), Some(menu), Some(body)) = (
                query(document, ".hamburger"),
                query(document, ".nav-menu"),
                document.body(),
            ) else {
                log::debug!("Mobile navigation markup missing, skipping");
                return Ok(None);
            };

            let menu = Rc::new(Menu {
                hamburger,
                menu,
                lock: ScrollLock { body },
                state: RefCell::new(NavState::default()),
            });

            let mut listeners = Vec::new();
            listeners.push(Listener::new(&menu.hamburger, "click", {
                let menu = menu.clone();
                move |_| menu.toggle()
            })?);
            listeners.push(Listener::new(document, "click", {
                let menu = menu.clone();
                move |event: Event| {
                    if !menu.contains(&event) {
                        menu.close();
                    }
                }
            })?);
            for link in query_all(document, ".nav-link") {
                listeners.push(Listener::new(&link, "click", {
                    let menu = menu.clone();
                    move |_| menu.close()
                })?);
            }

            Ok(Some(Self {
                menu,
                _listeners: listeners,
            }))
        }

        pub fn is_open(&self) -> bool {
            self.menu.state.borrow().is_open()
        }
    }
}
