use rand::Rng;

/// Randomized look of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    pub left_percent: f64,
    pub duration_secs: f64,
    pub opacity: f64,
}

impl ParticleSpec {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            left_percent: rng.gen::<f64>() * 100.0,
            duration_secs: rng.gen::<f64>() * 3.0 + 2.0,
            opacity: rng.gen::<f64>() * 0.5 + 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleId(u64);

#[derive(Debug)]
struct Live<T> {
    id: ParticleId,
    born_at: f64,
    node: T,
}

/// Particles currently on the page, each with a fixed lifetime.
#[derive(Debug)]
pub struct ParticleField<T> {
    lifetime_ms: f64,
    next_id: u64,
    live: Vec<Live<T>>,
}

impl<T> ParticleField<T> {
    pub fn new(lifetime_ms: u32) -> Self {
        Self {
            lifetime_ms: f64::from(lifetime_ms),
            next_id: 0,
            live: Vec::new(),
        }
    }

    pub fn spawn(&mut self, now_ms: f64, node: T) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        self.live.push(Live {
            id,
            born_at: now_ms,
            node,
        });
        id
    }

    /// Takes the particle out when its removal timer fires.
    pub fn expire(&mut self, id: ParticleId) -> Option<T> {
        let pos = self.live.iter().position(|p| p.id == id)?;
        Some(self.live.remove(pos).node)
    }

    /// Takes out every particle whose lifetime is over at `now_ms`.
    pub fn reap(&mut self, now_ms: f64) -> Vec<T> {
        let lifetime = self.lifetime_ms;
        let (dead, alive): (Vec<_>, Vec<_>) = self
            .live
            .drain(..)
            .partition(|p| now_ms - p.born_at >= lifetime);
        self.live = alive;
        dead.into_iter().map(|p| p.node).collect()
    }

    pub fn drain(&mut self) -> Vec<T> {
        self.live.drain(..).map(|p| p.node).collect()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.live.iter().any(|p| p.id == id)
    }
}

/// Most particles alive at once when one is spawned every `interval_ms`.
pub fn steady_state_bound(interval_ms: u32, lifetime_ms: u32) -> usize {
    lifetime_ms.div_ceil(interval_ms.max(1)) as usize
}

#[cfg(target_arch = "wasm32")]
pub use self::binding::ParticleEmitter;

#[cfg(target_arch = "wasm32")]
mod binding {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::{Interval, Timeout};
    use web_sys::{Document, Element, HtmlElement};

    use super::{ParticleField, ParticleSpec};
    use crate::config::ParticleConfig;
    use crate::error::LandingError;
    use crate::utils::dom::{add_class, now_ms, set_style};

    /// Spawns a particle on an interval and removes each after its lifetime.
    /// Dropping the emitter stops spawning and clears what is left.
    pub struct ParticleEmitter {
        field: Rc<RefCell<ParticleField<Element>>>,
        _interval: Interval,
    }

    impl ParticleEmitter {
        pub fn start(document: &Document, config: &ParticleConfig) -> Option<Self> {
            let body = document.body()?;
            let field = Rc::new(RefCell::new(ParticleField::new(config.lifetime_ms)));

            let interval = Interval::new(config.interval_ms, {
                let document = document.clone();
                let field = field.clone();
                let lifetime_ms = config.lifetime_ms;
                move || {
                    for stale in field.borrow_mut().reap(now_ms()) {
                        stale.remove();
                    }
                    if let Err(e) = emit(&document, &body, &field, lifetime_ms) {
                        log::warn!("Failed to emit particle: {e}");
                    }
                }
            });

            Some(Self {
                field,
                _interval: interval,
            })
        }

        pub fn live_count(&self) -> usize {
            self.field.borrow().len()
        }
    }

    impl Drop for ParticleEmitter {
        fn drop(&mut self) {
            for particle in self.field.borrow_mut().drain() {
                particle.remove();
            }
        }
    }

    fn emit(
        document: &Document,
        body: &HtmlElement,
        field: &Rc<RefCell<ParticleField<Element>>>,
        lifetime_ms: u32,
    ) -> Result<(), LandingError> {
        let spec = ParticleSpec::random(&mut rand::thread_rng());
        let particle = document.create_element("div")?;
        add_class(&particle, "particle")?;
        set_style(&particle, "left", &format!("{}%", spec.left_percent))?;
        set_style(&particle, "animation-duration", &format!("{}s", spec.duration_secs))?;
        set_style(&particle, "opacity", &spec.opacity.to_string())?;
        body.append_child(&particle)?;

        let id = field.borrow_mut().spawn(now_ms(), particle);
        let field = Rc::downgrade(field);
        Timeout::new(lifetime_ms, move || {
            let Some(field) = field.upgrade() else {
                return;
            };
            let expired = field.borrow_mut().expire(id);
            if let Some(particle) = expired {
                particle.remove();
            }
        })
        .forget();
        Ok(())
    }
}
