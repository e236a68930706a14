//! The landing page controller: wires every behavior once and owns what they
//! need to keep running.

use std::rc::Rc;

use web_sys::{Document, Window};

use crate::components::interactions::Interactions;
use crate::components::nav::NavController;
use crate::components::notification::Notification;
use crate::components::particles::ParticleEmitter;
use crate::components::reveal::RevealAnimator;
use crate::components::scroll_effects::ScrollEffects;
use crate::components::smooth_scroll::{scroll_to, SmoothScroll};
use crate::components::waitlist_form::WaitlistForm;
use crate::config::LandingConfig;
use crate::error::LandingError;
use crate::utils::api::WaitlistBackend;
use crate::utils::dom::query;

pub const WAITLIST_FORM_IDS: [&str; 2] = ["heroForm", "finalForm"];

/// Page-wide handles shared by components.
pub struct PageContext {
    pub document: Document,
    pub notification: Option<Rc<Notification>>,
}

pub struct LandingPage {
    context: PageContext,
    nav: Option<NavController>,
    anchors: Option<SmoothScroll>,
    reveal: Option<RevealAnimator>,
    scroll: Option<ScrollEffects>,
    forms: Vec<WaitlistForm>,
    particles: Option<ParticleEmitter>,
    interactions: Option<Interactions>,
}

/// Which behaviors found their markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mounted {
    pub nav: bool,
    pub anchors: bool,
    pub observers: usize,
    pub scroll_effects: bool,
    pub forms: usize,
    pub particles: bool,
    pub interactions: bool,
    pub notification: bool,
}

impl LandingPage {
    pub fn mount(window: Window, config: LandingConfig) -> Result<Self, LandingError> {
        let document = window
            .document()
            .ok_or(LandingError::MissingElement("document"))?;

        let notification = Notification::bind(&document, config.notification_ms).map(Rc::new);
        if notification.is_none() {
            log::debug!("No #{} element, signups will not be announced", Notification::ELEMENT_ID);
        }

        let nav = settle("mobile navigation", NavController::bind(&document));
        let anchors = settle("smooth scrolling", SmoothScroll::bind(&document));
        let reveal = settle("reveal animations", RevealAnimator::bind(&document, &config).map(Some));
        let scroll = settle(
            "scroll effects",
            ScrollEffects::bind(&window, &document, &config.scroll).map(Some),
        );

        let client = Rc::new(WaitlistBackend::from_config(&config.waitlist));
        let forms = WAITLIST_FORM_IDS
            .iter()
            .filter_map(|id| {
                settle(
                    id,
                    WaitlistForm::bind(
                        &document,
                        id,
                        client.clone(),
                        notification.clone(),
                        &config.waitlist.busy_label,
                    ),
                )
            })
            .collect();

        let particles = ParticleEmitter::start(&document, &config.particles);
        let interactions = settle(
            "micro-interactions",
            Interactions::bind(&window, &document, &config).map(Some),
        );

        let page = Self {
            context: PageContext {
                document,
                notification,
            },
            nav,
            anchors,
            reveal,
            scroll,
            forms,
            particles,
            interactions,
        };
        log::info!("FinnVest landing page ready: {:?}", page.mounted());
        Ok(page)
    }

    pub fn mounted(&self) -> Mounted {
        Mounted {
            nav: self.nav.is_some(),
            anchors: self.anchors.is_some(),
            observers: self.reveal.as_ref().map_or(0, RevealAnimator::observer_count),
            scroll_effects: self.scroll.is_some(),
            forms: self.forms.len(),
            particles: self.particles.is_some(),
            interactions: self.interactions.is_some(),
            notification: self.context.notification.is_some(),
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    pub fn nav(&self) -> Option<&NavController> {
        self.nav.as_ref()
    }

    pub fn forms(&self) -> &[WaitlistForm] {
        &self.forms
    }

    pub fn particles(&self) -> Option<&ParticleEmitter> {
        self.particles.as_ref()
    }

    pub fn close_notification(&self) {
        if let Some(notification) = &self.context.notification {
            if let Err(e) = notification.dismiss() {
                log::warn!("Failed to close notification: {e}");
            }
        }
    }

    pub fn scroll_to_hero(&self) {
        if let Some(hero) = query(&self.context.document, ".hero-section") {
            scroll_to(&hero);
        }
    }
}

/// A behavior that fails to wire up is logged and left out; the rest of the
/// page keeps going.
fn settle<T>(feature: &str, result: Result<Option<T>, LandingError>) -> Option<T> {
    match result {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            log::debug!("Skipped {feature}: markup not present");
            None
        }
        Err(e) => {
            log::warn!("Could not set up {feature}: {e}");
            None
        }
    }
}
