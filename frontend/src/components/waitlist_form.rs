use crate::error::SubmitError;
use crate::utils::api::EmailAddress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting { original_label: String },
}

/// What the form should look like once the client call has resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub restore_label: String,
    pub joined: bool,
}

#[derive(Debug)]
pub struct FormState {
    phase: FormPhase,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            phase: FormPhase::Idle,
        }
    }
}

impl FormState {
    /// Starts a submission, remembering the button label to restore later.
    pub fn begin(&mut self, raw_email: &str, current_label: &str) -> Result<EmailAddress, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::InFlight);
        }
        let email = EmailAddress::parse(raw_email)?;
        self.phase = FormPhase::Submitting {
            original_label: current_label.to_string(),
        };
        Ok(email)
    }

    /// Ends the submission. `None` if nothing was in flight.
    pub fn finish(&mut self, outcome: &Result<(), SubmitError>) -> Option<Completion> {
        match std::mem::replace(&mut self.phase, FormPhase::Idle) {
            FormPhase::Idle => None,
            FormPhase::Submitting { original_label } => Some(Completion {
                restore_label: original_label,
                joined: outcome.is_ok(),
            }),
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting { .. })
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::binding::WaitlistForm;

#[cfg(target_arch = "wasm32")]
mod binding {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement};

    use super::{Completion, FormState};
    use crate::components::notification::Notification;
    use crate::error::{LandingError, SubmitError};
    use crate::utils::api::WaitlistClient;
    use crate::utils::dom::{add_class, query, remove_class, Listener};

    const ERROR_CLASS: &str = "form-error";

    struct Parts {
        form: HtmlFormElement,
        input: HtmlInputElement,
        button: HtmlButtonElement,
        busy_label: String,
        state: RefCell<FormState>,
    }

    impl Parts {
        fn show_busy(&self) {
            self.button.set_disabled(true);
            self.button.set_inner_html(&self.busy_label);
        }

        fn complete(&self, completion: Completion, notification: Option<&Notification>) -> Result<(), LandingError> {
            if completion.joined {
                if let Some(notification) = notification {
                    notification.show()?;
                }
                self.form.reset();
                remove_class(&self.form, ERROR_CLASS)?;
            } else {
                add_class(&self.form, ERROR_CLASS)?;
            }
            self.button.set_inner_html(&completion.restore_label);
            self.button.set_disabled(false);
            Ok(())
        }
    }

    /// Intercepts a waitlist form and sends its email through `C`.
    pub struct WaitlistForm {
        parts: Rc<Parts>,
        _listener: Listener,
    }

    impl WaitlistForm {
        pub fn bind<C>(
            document: &Document,
            form_id: &str,
            client: Rc<C>,
            notification: Option<Rc<Notification>>,
            busy_label: &str,
        ) -> Result<Option<Self>, LandingError>
        where
            C: WaitlistClient + 'static,
        {
            let Some(form) = document
                .get_element_by_id(form_id)
                .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
            else {
                log::debug!("No #{form_id} form, skipping");
                return Ok(None);
            };
            let root: &Element = &form;
            let input = query(root, r#"input[type="email"]"#).and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
            let button = query(root, "button").and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
            let (Some(input), Some(button)) = (input, button) else {
                log::debug!("#{form_id} lacks an email input or button, skipping");
                return Ok(None);
            };

            let parts = Rc::new(Parts {
                form,
                input,
                button,
                busy_label: busy_label.to_string(),
                state: RefCell::new(FormState::default()),
            });

            let listener = Listener::new(&parts.form, "submit", {
                let parts = parts.clone();
                move |event: Event| {
                    event.prevent_default();
                    submit(parts.clone(), client.clone(), notification.clone());
                }
            })?;

            Ok(Some(Self {
                parts,
                _listener: listener,
            }))
        }

        pub fn is_submitting(&self) -> bool {
            self.parts.state.borrow().is_submitting()
        }
    }

    fn submit<C>(parts: Rc<Parts>, client: Rc<C>, notification: Option<Rc<Notification>>)
    where
        C: WaitlistClient + 'static,
    {
        let label = parts.button.inner_html();
        let begun = parts.state.borrow_mut().begin(&parts.input.value(), &label);
        let email = match begun {
            Ok(email) => email,
            Err(SubmitError::InFlight) => return,
            Err(e) => {
                log::warn!("Waitlist signup not sent: {e}");
                if let Err(e) = add_class(&parts.form, ERROR_CLASS) {
                    log::warn!("Failed to flag form error: {e}");
                }
                return;
            }
        };
        parts.show_busy();

        spawn_local(async move {
            let outcome = client.join(&email).await;
            if let Err(e) = &outcome {
                log::warn!("Waitlist signup failed: {e}");
            }
            let completion = parts.state.borrow_mut().finish(&outcome);
            if let Some(completion) = completion {
                if let Err(e) = parts.complete(completion, notification.as_deref()) {
                    log::warn!("Failed to reset waitlist form: {e}");
                }
            }
        });
    }
}
