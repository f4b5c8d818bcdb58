// in-memory stand-ins for the browser, shared by the unit tests
use std::{
    cell::{Ref, RefCell, RefMut},
    collections::HashMap,
    rc::Rc,
};

use api::{FormPayload, FormRelay, SubmitError};
use async_trait::async_trait;

use crate::{
    contact::{ContactView, MessageKind, Scheduler},
    effects::{NavbarView, RevealView},
    highlight::{ActiveLinkView, SectionBounds},
    menu::MenuView,
    scroll::ScrollView,
    theme::{PreferenceStore, Theme, ThemeView},
};

#[derive(Debug, Default)]
pub struct PageState {
    pub theme: Option<Theme>,
    pub theme_icon: String,

    pub menu_open: bool,
    pub menu_writes: usize,

    pub elements: HashMap<String, f64>,
    pub scrolls: Vec<f64>,

    pub scroll_y: f64,
    pub sections: Vec<SectionBounds>,
    pub links: Vec<bool>,
    pub link_writes: usize,

    pub navbar_background: String,
    // None until concealed, then Some(revealed)
    pub reveal_styles: Vec<Option<bool>>,

    pub fields: FormPayload,
    pub button: (String, bool),
    pub message: Option<(MessageKind, String)>,
    pub calls: Vec<&'static str>,
}

#[derive(Clone, Default)]
pub struct FakePage {
    state: Rc<RefCell<PageState>>,
}

impl FakePage {
    pub fn state(&self) -> Ref<'_, PageState> {
        self.state.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, PageState> {
        self.state.borrow_mut()
    }

    pub fn add_element(&self, id: &str, top: f64) {
        self.state_mut().elements.insert(id.to_owned(), top);
    }
}

impl ThemeView for FakePage {
    fn current_theme(&self) -> Option<Theme> {
        self.state().theme
    }

    fn apply_theme(&self, theme: Theme) {
        self.state_mut().theme = Some(theme);
    }

    fn set_theme_icon(&self, class: &str) {
        self.state_mut().theme_icon = class.to_owned();
    }
}

impl MenuView for FakePage {
    fn menu_open(&self) -> bool {
        self.state().menu_open
    }

    fn set_menu_open(&self, open: bool) {
        let mut state = self.state_mut();
        state.menu_open = open;
        state.menu_writes += 1;
    }
}

impl ScrollView for FakePage {
    fn element_top(&self, id: &str) -> Option<f64> {
        self.state().elements.get(id).copied()
    }

    fn scroll_smoothly_to(&self, top: f64) {
        self.state_mut().scrolls.push(top);
    }
}

impl ActiveLinkView for FakePage {
    fn scroll_y(&self) -> f64 {
        self.state().scroll_y
    }

    fn sections(&self) -> Vec<SectionBounds> {
        self.state().sections.clone()
    }

    fn mark_link(&self, index: usize, active: bool) {
        let mut state = self.state_mut();
        if let Some(link) = state.links.get_mut(index) {
            *link = active;
        }
        state.link_writes += 1;
    }
}

impl NavbarView for FakePage {
    fn set_navbar_background(&self, css: &str) {
        self.state_mut().navbar_background = css.to_owned();
    }
}

impl RevealView for FakePage {
    fn conceal(&self, index: usize) {
        if let Some(style) = self.state_mut().reveal_styles.get_mut(index) {
            *style = Some(false);
        }
    }

    fn reveal(&self, index: usize) {
        if let Some(style) = self.state_mut().reveal_styles.get_mut(index) {
            *style = Some(true);
        }
    }
}

impl ContactView for FakePage {
    fn form_fields(&self) -> FormPayload {
        let mut state = self.state_mut();
        state.calls.push("read-fields");
        state.fields.clone()
    }

    fn set_submit_state(&self, label: &str, disabled: bool) {
        let mut state = self.state_mut();
        state.calls.push(if disabled { "submit:busy" } else { "submit:idle" });
        state.button = (label.to_owned(), disabled);
    }

    fn show_message(&self, kind: MessageKind, text: &str) {
        let mut state = self.state_mut();
        state.calls.push(match kind {
            MessageKind::Success => "show-message:success",
            MessageKind::Error => "show-message:error",
        });
        state.message = Some((kind, text.to_owned()));
    }

    fn hide_message(&self) {
        let mut state = self.state_mut();
        state.calls.push("hide-message");
        state.message = None;
    }

    fn reset_form(&self) {
        let mut state = self.state_mut();
        state.calls.push("reset-form");
        state.fields = FormPayload::new();
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = MemoryStore::default();
        store.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }

    pub fn failing() -> Self {
        MemoryStore {
            values: RefCell::default(),
            fail_writes: true,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_writes {
            return Err(anyhow::Error::msg("storage quota exceeded"));
        }

        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

pub struct ScriptedRelay {
    result: Result<(), SubmitError>,
    sent: RefCell<Vec<FormPayload>>,
}

impl ScriptedRelay {
    pub fn ok() -> Self {
        ScriptedRelay {
            result: Ok(()),
            sent: RefCell::default(),
        }
    }

    pub fn failing(err: SubmitError) -> Self {
        ScriptedRelay {
            result: Err(err),
            sent: RefCell::default(),
        }
    }

    pub fn sent(&self) -> Vec<FormPayload> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl FormRelay for ScriptedRelay {
    async fn submit(&self, payload: &FormPayload) -> Result<(), SubmitError> {
        self.sent.borrow_mut().push(payload.clone());
        self.result.clone()
    }
}

#[derive(Default)]
pub struct ManualScheduler {
    tasks: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
}

impl ManualScheduler {
    pub fn delays(&self) -> Vec<u32> {
        self.tasks.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    pub fn run_all(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for (_, task) in tasks {
            task();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push((delay_ms, task));
    }
}
