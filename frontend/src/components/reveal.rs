//! Scroll-triggered reveals.
//!
//! Each row of [`observer_specs`] becomes one `IntersectionObserver`. The
//! bookkeeping of who is still subscribed lives in [`Subscriptions`] so the
//! fire-once rule does not depend on the browser.

use crate::config::RevealConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Fire on the first intersection, then stop observing the element.
    OneShot,
    /// Fire on every intersection. Markers are only ever added.
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FadeIn,
    CountUp,
    TypeOut,
    FillWidth,
    SectionFade,
    TextReveal,
}

impl Effect {
    /// Class added to every target before observing, if the effect needs one.
    pub fn pending_class(self) -> Option<&'static str> {
        match self {
            Effect::FadeIn => Some("reveal-pending"),
            Effect::TextReveal => Some("reveal-element"),
            _ => None,
        }
    }

    /// Class added when the target comes into view, if the effect is a marker.
    pub fn visible_class(self) -> Option<&'static str> {
        match self {
            Effect::FadeIn => Some("revealed"),
            Effect::SectionFade => Some("section-visible"),
            Effect::TextReveal => Some("reveal"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverSpec {
    pub selector: &'static str,
    pub threshold: f64,
    pub root_margin: Option<String>,
    pub trigger: Trigger,
    pub effect: Effect,
}

pub const STAT_NUMBER_SELECTOR: &str = ".stat-number[data-target]";

pub fn observer_specs(config: &RevealConfig) -> Vec<ObserverSpec> {
    vec![
        ObserverSpec {
            selector: ".problem-card, .feature-item, .benefit-card, .stat-item, .testimonial-card",
            threshold: config.card_threshold,
            root_margin: Some(config.card_root_margin.clone()),
            trigger: Trigger::Continuous,
            effect: Effect::FadeIn,
        },
        ObserverSpec {
            selector: ".stats-section",
            threshold: config.stats_threshold,
            root_margin: None,
            trigger: Trigger::OneShot,
            effect: Effect::CountUp,
        },
        ObserverSpec {
            selector: "section",
            threshold: config.section_threshold,
            root_margin: None,
            trigger: Trigger::Continuous,
            effect: Effect::SectionFade,
        },
        ObserverSpec {
            selector: ".progress-fill, .level-fill",
            threshold: config.progress_threshold,
            root_margin: None,
            trigger: Trigger::Continuous,
            effect: Effect::FillWidth,
        },
        ObserverSpec {
            selector: ".hero-title",
            threshold: config.hero_threshold,
            root_margin: None,
            trigger: Trigger::OneShot,
            effect: Effect::TypeOut,
        },
        ObserverSpec {
            selector: ".section-title, .section-description, .hero-subtitle",
            threshold: config.text_threshold,
            root_margin: None,
            trigger: Trigger::Continuous,
            effect: Effect::TextReveal,
        },
    ]
}

/// Width a progress bar fills to: its `data-width`, or the default.
pub fn fill_width(data_width: Option<&str>, default: &str) -> String {
    match data_width.map(str::trim) {
        Some(width) if !width.is_empty() => width.to_string(),
        _ => default.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Ignore,
    Fire,
    FireAndDetach,
}

/// Targets still attached to one observer.
#[derive(Debug)]
pub struct Subscriptions<K> {
    trigger: Trigger,
    targets: Vec<K>,
}

impl<K: PartialEq> Subscriptions<K> {
    pub fn new(trigger: Trigger) -> Self {
        Self {
            trigger,
            targets: Vec::new(),
        }
    }

    pub fn observe(&mut self, target: K) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    /// Decides what a visibility change for `target` means.
    pub fn notify(&mut self, target: &K, intersecting: bool) -> Notice {
        if !intersecting {
            return Notice::Ignore;
        }
        let Some(pos) = self.targets.iter().position(|t| t == target) else {
            return Notice::Ignore;
        };
        match self.trigger {
            Trigger::Continuous => Notice::Fire,
            Trigger::OneShot => {
                self.targets.swap_remove(pos);
                Notice::FireAndDetach
            }
        }
    }

    pub fn is_observing(&self, target: &K) -> bool {
        self.targets.contains(target)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::binding::RevealAnimator;

#[cfg(target_arch = "wasm32")]
mod binding {
    use std::cell::RefCell;
    use std::ops::ControlFlow;
    use std::rc::Rc;

    use js_sys::Array;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

    use super::{fill_width, observer_specs, Effect, Notice, ObserverSpec, Subscriptions, STAT_NUMBER_SELECTOR};
    use crate::animation::count_up::{format_thousands, parse_target, CountUp};
    use crate::animation::typewriter::Typewriter;
    use crate::config::LandingConfig;
    use crate::error::LandingError;
    use crate::utils::dom::{add_class, query_all, set_style};
    use crate::utils::ticker::Ticker;

    /// Timings the effects need plus the running tick chains they start.
    struct Effects {
        counter_duration_ms: u32,
        counter_tick_ms: u32,
        typing_delay_ms: u32,
        tickers: RefCell<Vec<Ticker>>,
    }

    impl Effects {
        fn apply(&self, effect: Effect, target: &Element) -> Result<(), LandingError> {
            if let Some(class) = effect.visible_class() {
                return add_class(target, class);
            }
            match effect {
                Effect::FillWidth => {
                    let width = target.get_attribute("data-width").unwrap_or_default();
                    set_style(target, "width", &width)
                }
                Effect::CountUp => {
                    for stat in query_all(target, STAT_NUMBER_SELECTOR) {
                        let Some(goal) = stat.get_attribute("data-target").as_deref().and_then(parse_target) else {
                            log::debug!("Skipping stat with unreadable data-target");
                            continue;
                        };
                        self.keep(self.count_up(stat, goal));
                    }
                    Ok(())
                }
                Effect::TypeOut => {
                    if let Some(ticker) = self.type_out(target.clone()) {
                        self.keep(ticker);
                    }
                    Ok(())
                }
                _ => Ok(()),
            }
        }

        fn count_up(&self, stat: Element, goal: u64) -> Ticker {
            let mut counter = CountUp::new(goal, self.counter_duration_ms, self.counter_tick_ms);
            Ticker::start(self.counter_tick_ms, move || {
                if !stat.is_connected() {
                    return ControlFlow::Break(());
                }
                match counter.tick() {
                    Some(value) => {
                        stat.set_text_content(Some(&format_thousands(value)));
                        if counter.is_finished() {
                            ControlFlow::Break(())
                        } else {
                            ControlFlow::Continue(())
                        }
                    }
                    None => ControlFlow::Break(()),
                }
            })
        }

        fn type_out(&self, element: Element) -> Option<Ticker> {
            let text = element.text_content().unwrap_or_default();
            let mut writer = Typewriter::new(&text);
            element.set_text_content(Some(""));
            // First character goes out right away, the rest on the timer.
            if let Some(frame) = writer.advance() {
                element.set_text_content(Some(&frame));
            }
            if writer.is_done() {
                return None;
            }
            Some(Ticker::start(self.typing_delay_ms, move || {
                if !element.is_connected() {
                    return ControlFlow::Break(());
                }
                match writer.advance() {
                    Some(frame) => {
                        element.set_text_content(Some(&frame));
                        if writer.is_done() {
                            ControlFlow::Break(())
                        } else {
                            ControlFlow::Continue(())
                        }
                    }
                    None => ControlFlow::Break(()),
                }
            }))
        }

        fn keep(&self, ticker: Ticker) {
            let mut tickers = self.tickers.borrow_mut();
            tickers.retain(Ticker::is_running);
            tickers.push(ticker);
        }
    }

    struct Observer {
        observer: IntersectionObserver,
        _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
    }

    impl Drop for Observer {
        fn drop(&mut self) {
            self.observer.disconnect();
        }
    }

    pub struct RevealAnimator {
        observers: Vec<Observer>,
        _effects: Rc<Effects>,
    }

    impl RevealAnimator {
        pub fn bind(document: &Document, config: &LandingConfig) -> Result<Self, LandingError> {
            let effects = Rc::new(Effects {
                counter_duration_ms: config.counters.duration_ms,
                counter_tick_ms: config.counters.tick_ms,
                typing_delay_ms: config.typing_delay_ms,
                tickers: RefCell::new(Vec::new()),
            });

            let mut observers = Vec::new();
            for spec in observer_specs(&config.reveal) {
                let targets = query_all(document, spec.selector);
                if targets.is_empty() {
                    log::debug!("No targets for {:?}, skipping", spec.selector);
                    continue;
                }
                match observe(&spec, targets, &config.reveal.default_fill_width, effects.clone()) {
                    Ok(observer) => observers.push(observer),
                    Err(e) => log::warn!("Could not observe {:?}: {e}", spec.selector),
                }
            }

            Ok(Self {
                observers,
                _effects: effects,
            })
        }

        pub fn observer_count(&self) -> usize {
            self.observers.len()
        }
    }

    fn prepare(effect: Effect, target: &Element, default_width: &str) -> Result<(), LandingError> {
        if let Some(class) = effect.pending_class() {
            add_class(target, class)?;
        }
        if effect == Effect::FillWidth {
            let width = fill_width(target.get_attribute("data-width").as_deref(), default_width);
            target.set_attribute("data-width", &width)?;
            set_style(target, "width", "0%")?;
        }
        Ok(())
    }

    fn observe(
        spec: &ObserverSpec,
        targets: Vec<Element>,
        default_width: &str,
        effects: Rc<Effects>,
    ) -> Result<Observer, LandingError> {
        let effect = spec.effect;
        let subscriptions = Rc::new(RefCell::new(Subscriptions::new(spec.trigger)));

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new({
            let subscriptions = subscriptions.clone();
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let notice = subscriptions
                        .borrow_mut()
                        .notify(&target, entry.is_intersecting());
                    match notice {
                        Notice::Ignore => continue,
                        Notice::FireAndDetach => observer.unobserve(&target),
                        Notice::Fire => {}
                    }
                    if let Err(e) = effects.apply(effect, &target) {
                        log::warn!("Reveal effect {effect:?} failed: {e}");
                    }
                }
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(spec.threshold));
        if let Some(margin) = &spec.root_margin {
            init.set_root_margin(margin);
        }
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        for target in targets {
            if let Err(e) = prepare(effect, &target, default_width) {
                log::warn!("Could not prepare {:?} target: {e}", spec.selector);
                continue;
            }
            observer.observe(&target);
            subscriptions.borrow_mut().observe(target);
        }

        Ok(Observer {
            observer,
            _callback: callback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn one_shot_fires_once_per_element() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut subs = Subscriptions::new(Trigger::OneShot);
        for id in 0..4 {
            subs.observe(id);
        }

        let mut fired = [0usize; 4];
        for _ in 0..500 {
            let id = rng.gen_range(0..4);
            match subs.notify(&id, rng.gen_bool(0.5)) {
                Notice::FireAndDetach => fired[id] += 1,
                Notice::Fire => panic!("one-shot subscription fired without detaching"),
                Notice::Ignore => {}
            }
        }

        assert_eq!(fired, [1, 1, 1, 1]);
        assert!(subs.is_empty());
    }

    #[test]
    fn continuous_fires_on_every_entry() {
        let mut subs = Subscriptions::new(Trigger::Continuous);
        subs.observe("section");
        let notices: Vec<Notice> = [true, false, true, true]
            .into_iter()
            .map(|hit| subs.notify(&"section", hit))
            .collect();
        assert_eq!(
            notices,
            [Notice::Fire, Notice::Ignore, Notice::Fire, Notice::Fire]
        );
        assert!(subs.is_observing(&"section"));
    }

    #[test]
    fn unknown_targets_are_ignored() {
        let mut subs = Subscriptions::new(Trigger::OneShot);
        subs.observe(1);
        subs.observe(1);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs.notify(&2, true), Notice::Ignore);
    }

    #[test]
    fn counters_and_typing_are_one_shot() {
        let specs = observer_specs(&RevealConfig::default());
        for spec in &specs {
            let expected = match spec.effect {
                Effect::CountUp | Effect::TypeOut => Trigger::OneShot,
                _ => Trigger::Continuous,
            };
            assert_eq!(spec.trigger, expected, "{}", spec.selector);
        }
        let cards = specs.iter().find(|s| s.effect == Effect::FadeIn).unwrap();
        assert_eq!(cards.threshold, 0.1);
        assert_eq!(cards.root_margin.as_deref(), Some("0px 0px -50px 0px"));
    }

    #[test]
    fn markers_are_only_added() {
        for effect in [Effect::FadeIn, Effect::SectionFade, Effect::TextReveal] {
            assert!(effect.visible_class().is_some());
        }
        assert_eq!(Effect::CountUp.visible_class(), None);
        assert_eq!(Effect::FadeIn.pending_class(), Some("reveal-pending"));
    }

    #[test]
    fn fill_width_defaults() {
        assert_eq!(fill_width(Some("40%"), "75%"), "40%");
        assert_eq!(fill_width(Some("  "), "75%"), "75%");
        assert_eq!(fill_width(None, "75%"), "75%");
    }
}
