use web_sys::{Document, Element, Window};

use crate::animation::scroll::{layer_speed, parallax_offset, percent, px, scroll_progress};
use crate::config::ScrollConfig;
use crate::error::LandingError;
use crate::utils::dom::{add_class, now_ms, query, query_all, set_style, Listener};
use crate::utils::throttle::Throttle;

const PROGRESS_CLASS: &str = "scroll-progress";

/// Parallax orbs and the reading-progress bar. Each has its own throttled
/// scroll listener; they touch disjoint elements.
pub struct ScrollEffects {
    _listeners: Vec<Listener>,
}

impl ScrollEffects {
    pub fn bind(window: &Window, document: &Document, config: &ScrollConfig) -> Result<Self, LandingError> {
        let mut listeners = Vec::new();

        let orbs = query_all(document, ".floating-orb");
        if orbs.is_empty() {
            log::debug!("No parallax layers, skipping");
        } else {
            listeners.push(parallax(window, orbs, config)?);
        }

        match progress_bar(document)? {
            Some(bar) => listeners.push(progress(window, document, bar, config.throttle_ms)?),
            None => log::debug!("No body to host the progress bar, skipping"),
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}

fn parallax(window: &Window, orbs: Vec<Element>, config: &ScrollConfig) -> Result<Listener, LandingError> {
    let mut throttle = Throttle::new(config.throttle_ms);
    let (base, step) = (config.parallax_base, config.parallax_step);
    let win = window.clone();
    Listener::new(window, "scroll", move |_| {
        if !throttle.admit(now_ms()) {
            return;
        }
        let scrolled = win.scroll_y().unwrap_or(0.0);
        for (index, orb) in orbs.iter().enumerate() {
            let offset = parallax_offset(scrolled, layer_speed(base, step, index));
            if let Err(e) = set_style(orb, "--parallax-y", &px(offset)) {
                log::warn!("Parallax update failed: {e}");
            }
        }
    })
}

/// The page's `.scroll-progress` element, created at the top of the body if
/// the markup does not have one.
fn progress_bar(document: &Document) -> Result<Option<Element>, LandingError> {
    if let Some(bar) = query(document, &format!(".{PROGRESS_CLASS}")) {
        return Ok(Some(bar));
    }
    let Some(body) = document.body() else {
        return Ok(None);
    };
    let bar = document.create_element("div")?;
    add_class(&bar, PROGRESS_CLASS)?;
    body.append_child(&bar)?;
    Ok(Some(bar))
}

fn progress(window: &Window, document: &Document, bar: Element, throttle_ms: u32) -> Result<Listener, LandingError> {
    let mut throttle = Throttle::new(throttle_ms);
    let win = window.clone();
    let document = document.clone();
    Listener::new(window, "scroll", move |_| {
        if !throttle.admit(now_ms()) {
            return;
        }
        let scrolled = win.scroll_y().unwrap_or(0.0);
        let viewport = win
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let height = document
            .document_element()
            .map(|root| f64::from(root.scroll_height()))
            .unwrap_or(0.0);
        let width = percent(scroll_progress(scrolled, height, viewport));
        if let Err(e) = set_style(&bar, "width", &width) {
            log::warn!("Progress bar update failed: {e}");
        }
    })
}
