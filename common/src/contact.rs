use std::{cell::Cell, rc::Rc};

use api::{FormPayload, FormRelay};
use tracing::{error, info, instrument};

use crate::config::ContactConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

pub trait ContactView {
    fn form_fields(&self) -> FormPayload;

    fn set_submit_state(&self, label: &str, disabled: bool);

    fn show_message(&self, kind: MessageKind, text: &str);

    fn hide_message(&self);

    fn reset_form(&self);
}

// deferred work, e.g. a browser timeout
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
}

// holds the submit control in its sending state until dropped
struct SendingGuard<'a, V: ContactView + ?Sized> {
    view: &'a V,
    idle_label: &'a str,
}

impl<'a, V: ContactView + ?Sized> SendingGuard<'a, V> {
    fn engage(view: &'a V, config: &'a ContactConfig) -> Self {
        view.set_submit_state(&config.sending_label, true);

        SendingGuard {
            view,
            idle_label: &config.idle_label,
        }
    }
}

impl<V: ContactView + ?Sized> Drop for SendingGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_submit_state(self.idle_label, false);
    }
}

// sends the contact form through a relay and drives the form's ui states
//
// each submission bumps a generation counter so that the auto-hide timer of an
// earlier success cannot hide the message of a later submission
pub struct ContactSubmitter {
    config: ContactConfig,
    generation: Rc<Cell<u64>>,
}

impl ContactSubmitter {
    pub fn new(config: ContactConfig) -> Self {
        ContactSubmitter {
            config,
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    #[instrument(skip_all)]
    pub async fn submit<V, R, S>(&self, view: &V, relay: &R, scheduler: &S) -> SubmitOutcome
    where
        V: ContactView + Clone + 'static,
        R: FormRelay + ?Sized,
        S: Scheduler + ?Sized,
    {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let _sending = SendingGuard::engage(view, &self.config);
        view.hide_message();

        let payload = view.form_fields();

        match relay.submit(&payload).await {
            Ok(()) => {
                info!(fields = payload.len(), "contact form sent");
                view.show_message(MessageKind::Success, &self.config.success_message);
                view.reset_form();

                let view = view.clone();
                let current = self.generation.clone();
                scheduler.schedule(
                    self.config.success_hide_ms,
                    Box::new(move || {
                        if current.get() == generation {
                            view.hide_message();
                        }
                    }),
                );

                SubmitOutcome::Sent
            }
            Err(err) => {
                error!("error sending form: {err}");
                view.show_message(MessageKind::Error, &self.config.error_message);

                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use api::SubmitError;
    use futures::executor::block_on;

    use super::*;
    use crate::testing::{FakePage, ManualScheduler, ScriptedRelay};

    fn filled_page() -> FakePage {
        let page = FakePage::default();
        page.state_mut().fields = [("name", "Ada"), ("email", "ada@example.com"), ("message", "hi")]
            .into_iter()
            .collect();
        page
    }

    #[test]
    fn success_clears_form_and_hides_later() {
        let page = filled_page();
        let relay = ScriptedRelay::ok();
        let scheduler = ManualScheduler::default();
        let submitter = ContactSubmitter::new(ContactConfig::default());

        let outcome = block_on(submitter.submit(&page, &relay, &scheduler));

        assert_eq!(outcome, SubmitOutcome::Sent);
        assert_eq!(relay.sent()[0].get("email"), Some("ada@example.com"));
        assert!(page.state().fields.is_empty());
        assert_eq!(
            page.state().message,
            Some((MessageKind::Success, ContactConfig::default().success_message))
        );
        assert_eq!(scheduler.delays(), vec![5000]);

        scheduler.run_all();
        assert_eq!(page.state().message, None);
    }

    #[test]
    fn rejection_keeps_fields_and_shows_error() {
        let page = filled_page();
        let relay = ScriptedRelay::failing(SubmitError::Rejected {
            status: 500,
            body: String::new(),
        });
        let scheduler = ManualScheduler::default();
        let submitter = ContactSubmitter::new(ContactConfig::default());

        let outcome = block_on(submitter.submit(&page, &relay, &scheduler));

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(page.state().fields.len(), 3);
        assert_eq!(
            page.state().message,
            Some((MessageKind::Error, ContactConfig::default().error_message))
        );
        assert!(scheduler.delays().is_empty());
    }

    #[test]
    fn transport_fault_shows_error() {
        let page = filled_page();
        let relay = ScriptedRelay::failing(SubmitError::Transport(String::from("offline")));
        let scheduler = ManualScheduler::default();
        let submitter = ContactSubmitter::new(ContactConfig::default());

        let outcome = block_on(submitter.submit(&page, &relay, &scheduler));

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(page.state().fields.len(), 3);
        assert!(matches!(page.state().message, Some((MessageKind::Error, _))));
    }

    #[test]
    fn ui_states_on_success() {
        let config = ContactConfig::default();
        let page = filled_page();
        page.state_mut().message = Some((MessageKind::Error, String::from("old")));
        let submitter = ContactSubmitter::new(config.clone());

        block_on(submitter.submit(&page, &ScriptedRelay::ok(), &ManualScheduler::default()));

        assert_eq!(
            page.state().calls,
            vec![
                "submit:busy",
                "hide-message",
                "read-fields",
                "show-message:success",
                "reset-form",
                "submit:idle",
            ]
        );
        assert_eq!(page.state().button, (config.idle_label.clone(), false));
    }

    #[test]
    fn ui_states_on_failure() {
        let config = ContactConfig::default();
        let page = filled_page();
        let relay = ScriptedRelay::failing(SubmitError::Transport(String::from("reset")));
        let submitter = ContactSubmitter::new(config.clone());

        block_on(submitter.submit(&page, &relay, &ManualScheduler::default()));

        assert_eq!(
            page.state().calls,
            vec![
                "submit:busy",
                "hide-message",
                "read-fields",
                "show-message:error",
                "submit:idle",
            ]
        );
        assert_eq!(page.state().button, (config.idle_label.clone(), false));
    }

    #[test]
    fn stale_auto_hide_leaves_newer_message() {
        let page = filled_page();
        let scheduler = ManualScheduler::default();
        let submitter = ContactSubmitter::new(ContactConfig::default());

        block_on(submitter.submit(&page, &ScriptedRelay::ok(), &scheduler));
        let failing = ScriptedRelay::failing(SubmitError::Transport(String::from("offline")));
        block_on(submitter.submit(&page, &failing, &scheduler));

        scheduler.run_all();
        assert!(matches!(page.state().message, Some((MessageKind::Error, _))));
    }
}
