use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

use crate::error::LandingError;

pub fn window() -> Result<Window, LandingError> {
    web_sys::window().ok_or(LandingError::NoWindow)
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Anything that answers `querySelector`/`querySelectorAll`.
pub trait Queryable {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue>;
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue>;
}

impl Queryable for Document {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl Queryable for Element {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

/// First match, or `None` when nothing matches or the selector is invalid.
pub fn query<Q: Queryable>(root: &Q, selector: &str) -> Option<Element> {
    match root.select(selector) {
        Ok(found) => found,
        Err(e) => {
            log::debug!("Selector {selector:?} rejected: {e:?}");
            None
        }
    }
}

pub fn query_all<Q: Queryable>(root: &Q, selector: &str) -> Vec<Element> {
    let Ok(list) = root.select_all(selector) else {
        log::debug!("Selector {selector:?} rejected");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn add_class(element: &Element, class: &str) -> Result<(), LandingError> {
    element.class_list().add_1(class)?;
    Ok(())
}

pub fn remove_class(element: &Element, class: &str) -> Result<(), LandingError> {
    element.class_list().remove_1(class)?;
    Ok(())
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// Sets an inline style property (including `--custom` properties) on HTML elements.
pub fn set_style(element: &Element, property: &str, value: &str) -> Result<(), LandingError> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.style().set_property(property, value)?;
    }
    Ok(())
}

/// An event listener that detaches itself when dropped.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self, LandingError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("Failed to detach {} listener: {:?}", self.kind, e);
        }
    }
}
