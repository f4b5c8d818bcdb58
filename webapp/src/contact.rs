use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement};

use api::FormPayload;
use common::contact::{ContactView, MessageKind, Scheduler};

use crate::dom::{CONTACT_FORM_ID, FORM_MESSAGE_ID, SUBMIT_BUTTON_IDS, set_style};

#[derive(Clone, Debug)]
pub struct DomContactForm {
    pub form: HtmlFormElement,
    submit: Option<HtmlButtonElement>,
    message: Option<HtmlElement>,
}

impl DomContactForm {
    pub fn find(document: &Document) -> Option<Self> {
        let form = document
            .get_element_by_id(CONTACT_FORM_ID)?
            .dyn_into::<HtmlFormElement>()
            .ok()?;

        let submit = SUBMIT_BUTTON_IDS
            .iter()
            .find_map(|id| document.get_element_by_id(id))
            .and_then(|el| el.dyn_into().ok());

        let message = document
            .get_element_by_id(FORM_MESSAGE_ID)
            .and_then(|el| el.dyn_into().ok());

        Some(DomContactForm {
            form,
            submit,
            message,
        })
    }
}

// string entries of FormData, in form order; file entries are skipped
pub fn payload_from_form_data(data: &FormData) -> FormPayload {
    let Some(entries) = js_sys::try_iter(data).ok().flatten() else {
        return FormPayload::new();
    };

    entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let pair: js_sys::Array = entry.dyn_into().ok()?;
            Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
        })
        .collect()
}

impl ContactView for DomContactForm {
    fn form_fields(&self) -> FormPayload {
        FormData::new_with_form(&self.form)
            .map(|data| payload_from_form_data(&data))
            .unwrap_or_default()
    }

    fn set_submit_state(&self, label: &str, disabled: bool) {
        if let Some(submit) = &self.submit {
            submit.set_text_content(Some(label));
            submit.set_disabled(disabled);
        }
    }

    fn show_message(&self, kind: MessageKind, text: &str) {
        if let Some(message) = &self.message {
            message.set_text_content(Some(text));
            message.set_class_name(&format!("form-message {}", kind.css_class()));
            set_style(message, "display", "block");
        }
    }

    fn hide_message(&self) {
        if let Some(message) = &self.message {
            set_style(message, "display", "none");
        }
    }

    fn reset_form(&self) {
        self.form.reset();
    }
}

// runs deferred ui work on the browser's timer queue
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}
