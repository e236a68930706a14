use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Repeating timer chain with a cancel switch. Each step decides whether the
/// chain continues; dropping the handle stops it before the next step.
pub struct Ticker {
    stopped: Rc<Cell<bool>>,
}

impl Ticker {
    pub fn start<F>(interval_ms: u32, step: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + 'static,
    {
        let stopped = Rc::new(Cell::new(false));
        schedule(interval_ms, Rc::new(RefCell::new(step)), stopped.clone());
        Self { stopped }
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.get()
    }

    pub fn cancel(&self) {
        self.stopped.set(true);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn schedule<F>(interval_ms: u32, step: Rc<RefCell<F>>, stopped: Rc<Cell<bool>>)
where
    F: FnMut() -> ControlFlow<()> + 'static,
{
    // Fired timeouts are forgotten; the flag is what stops the chain.
    Timeout::new(interval_ms, move || {
        if stopped.get() {
            return;
        }
        let flow = {
            let mut step = step.borrow_mut();
            (*step)()
        };
        match flow {
            ControlFlow::Continue(()) => schedule(interval_ms, step, stopped),
            ControlFlow::Break(()) => stopped.set(true),
        }
    })
    .forget();
}
