//! Small touches: hover lift, click ripples, autofill highlight and the
//! staggered delays on repeated decorations.

pub const HERO_EMAIL_INPUT_ID: &str = "heroEmailInput";

/// iPhone/iPad/iPod user agents need a nudge to show email suggestions.
pub fn is_ios(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    ["iphone", "ipad", "ipod"].iter().any(|device| ua.contains(device))
}

pub fn looks_autofilled(value: &str) -> bool {
    value.contains('@')
}

#[cfg(target_arch = "wasm32")]
pub use self::binding::Interactions;

#[cfg(target_arch = "wasm32")]
mod binding {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, Event, HtmlInputElement, MouseEvent, Window};

    use super::{is_ios, looks_autofilled, HERO_EMAIL_INPUT_ID};
    use crate::animation::ripple::Ripple;
    use crate::animation::scroll::px;
    use crate::animation::stagger::{icon_gradient, icon_pulse_delay, orb_float_delay, testimonial_delay};
    use crate::config::LandingConfig;
    use crate::error::LandingError;
    use crate::utils::dom::{add_class, query_all, remove_class, set_style, Listener};

    const HOVER_TARGETS: &str = ".problem-card, .benefit-card, .feature-item, .testimonial-card";
    const RIPPLE_TARGETS: &str = ".cta-button, .final-cta-button";

    pub struct Interactions {
        _listeners: Vec<Listener>,
    }

    impl Interactions {
        pub fn bind(window: &Window, document: &Document, config: &LandingConfig) -> Result<Self, LandingError> {
            let mut listeners = Vec::new();
            hover(document, &mut listeners)?;
            ripples(document, config.ripple_ms, &mut listeners)?;
            let ios = window
                .navigator()
                .user_agent()
                .map(|ua| is_ios(&ua))
                .unwrap_or(false);
            autofill(document, ios, config.autofill_highlight_ms, &mut listeners)?;
            stagger(document)?;
            Ok(Self {
                _listeners: listeners,
            })
        }
    }

    fn hover(document: &Document, listeners: &mut Vec<Listener>) -> Result<(), LandingError> {
        for card in query_all(document, HOVER_TARGETS) {
            let enter = card.clone();
            listeners.push(Listener::new(&card, "mouseenter", move |_| {
                if let Err(e) = add_class(&enter, "is-hovered") {
                    log::warn!("Hover update failed: {e}");
                }
            })?);
            let leave = card.clone();
            listeners.push(Listener::new(&card, "mouseleave", move |_| {
                if let Err(e) = remove_class(&leave, "is-hovered") {
                    log::warn!("Hover update failed: {e}");
                }
            })?);
        }
        Ok(())
    }

    fn ripples(document: &Document, lifetime_ms: u32, listeners: &mut Vec<Listener>) -> Result<(), LandingError> {
        for button in query_all(document, RIPPLE_TARGETS) {
            let document = document.clone();
            let host = button.clone();
            listeners.push(Listener::new(&button, "click", move |event: Event| {
                let Some(click) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if let Err(e) = ripple(&document, &host, click, lifetime_ms) {
                    log::warn!("Ripple failed: {e}");
                }
            })?);
        }
        Ok(())
    }

    fn ripple(document: &Document, host: &Element, click: &MouseEvent, lifetime_ms: u32) -> Result<(), LandingError> {
        let rect = host.get_bounding_client_rect();
        let geometry = Ripple::at_click(
            rect.left(),
            rect.top(),
            rect.width(),
            rect.height(),
            f64::from(click.client_x()),
            f64::from(click.client_y()),
        );

        let span = document.create_element("span")?;
        add_class(&span, "ripple")?;
        set_style(&span, "--ripple-size", &px(geometry.size))?;
        set_style(&span, "--ripple-x", &px(geometry.x))?;
        set_style(&span, "--ripple-y", &px(geometry.y))?;
        host.append_child(&span)?;

        Timeout::new(lifetime_ms, move || span.remove()).forget();
        Ok(())
    }

    fn autofill(
        document: &Document,
        ios: bool,
        highlight_ms: u32,
        listeners: &mut Vec<Listener>,
    ) -> Result<(), LandingError> {
        let inputs = query_all(document, r#"input[type="email"]"#)
            .into_iter()
            .filter(|input| input.id() != HERO_EMAIL_INPUT_ID)
            .filter_map(|input| input.dyn_into::<HtmlInputElement>().ok());

        for input in inputs {
            if ios {
                let target = input.clone();
                listeners.push(Listener::new(&input, "focus", move |_| target.click())?);
            }

            let target = input.clone();
            listeners.push(Listener::new(&input, "touchstart", move |_| {
                if let Err(e) = target.focus() {
                    log::debug!("Focus on touch failed: {e:?}");
                }
            })?);

            let target = input.clone();
            let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
            listeners.push(Listener::new(&input, "input", move |_| {
                if !looks_autofilled(&target.value()) {
                    return;
                }
                if let Err(e) = add_class(&target, "autofilled") {
                    log::warn!("Autofill highlight failed: {e}");
                    return;
                }
                let fade = target.clone();
                // Replacing the handle cancels an earlier fade-out.
                *pending.borrow_mut() = Some(Timeout::new(highlight_ms, move || {
                    if let Err(e) = remove_class(&fade, "autofilled") {
                        log::warn!("Autofill highlight failed: {e}");
                    }
                }));
            })?);
        }
        Ok(())
    }

    fn stagger(document: &Document) -> Result<(), LandingError> {
        for (i, orb) in query_all(document, ".floating-orb").iter().enumerate() {
            set_style(orb, "--float-delay", &orb_float_delay(i))?;
        }
        for (i, card) in query_all(document, ".testimonial-card").iter().enumerate() {
            set_style(card, "--stagger-delay", &testimonial_delay(i))?;
        }
        for (i, icon) in query_all(document, ".feature-icon").iter().enumerate() {
            set_style(icon, "--icon-gradient", icon_gradient(i))?;
            set_style(icon, "--pulse-delay", &icon_pulse_delay(i))?;
        }
        for text in query_all(document, ".gradient-text") {
            add_class(&text, "gradient-animated")?;
        }
        Ok(())
    }
}
