/// Selector for the in-page target of an anchor href, if it has one.
pub fn anchor_selector(href: &str) -> Option<&str> {
    let href = href.trim();
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => Some(href),
        _ => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::binding::{scroll_to, SmoothScroll};

#[cfg(target_arch = "wasm32")]
mod binding {
    use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

    use super::anchor_selector;
    use crate::error::LandingError;
    use crate::utils::dom::{query, query_all, Listener};

    pub fn scroll_to(target: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }

    /// Turns every `a[href^="#"]` into a smooth scroll to its target.
    pub struct SmoothScroll {
        _listeners: Vec<Listener>,
    }

    impl SmoothScroll {
        pub fn bind(document: &Document) -> Result<Option<Self>, LandingError> {
            let anchors = query_all(document, r##"a[href^="#"]"##);
            if anchors.is_empty() {
                return Ok(None);
            }

            let listeners = anchors
                .into_iter()
                .map(|anchor| {
                    let document = document.clone();
                    let link = anchor.clone();
                    Listener::new(&anchor, "click", move |event| {
                        event.prevent_default();
                        let href = link.get_attribute("href").unwrap_or_default();
                        if let Some(target) = anchor_selector(&href).and_then(|sel| query(&document, sel)) {
                            scroll_to(&target);
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some(Self {
                _listeners: listeners,
            }))
        }
    }
}
