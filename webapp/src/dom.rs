use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

// the markup this script attaches to
pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const HAMBURGER_SELECTOR: &str = ".hamburger";
pub const NAV_MENU_SELECTOR: &str = ".nav-menu";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const IN_PAGE_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const CONTACT_FORM_ID: &str = "contactForm";
pub const FORM_MESSAGE_ID: &str = "form-message";
// older markup used the dashed id
pub const SUBMIT_BUTTON_IDS: [&str; 2] = ["submitBtn", "submit-btn"];
pub const CONFIG_SCRIPT_ID: &str = "portfolio-config";

pub const ACTIVE_CLASS: &str = "active";

// JsValue is not an Error, so flatten it into one for anyhow
pub fn js_err(value: JsValue) -> anyhow::Error {
    anyhow::Error::msg(format!("{value:?}"))
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all_html(document: &Document, selector: &str) -> Vec<HtmlElement> {
    query_all(document, selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn set_active(el: &Element, active: bool) {
    let classes = el.class_list();
    let _ = if active {
        classes.add_1(ACTIVE_CLASS)
    } else {
        classes.remove_1(ACTIVE_CLASS)
    };
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

// feature test for css smooth scrolling ("scrollBehavior" in documentElement.style)
pub fn supports_smooth_scroll(document: &Document) -> bool {
    document
        .document_element()
        .and_then(|root| root.dyn_into::<HtmlElement>().ok())
        .map(|root| js_sys::Reflect::has(&root.style(), &JsValue::from_str("scrollBehavior")).unwrap_or(false))
        .unwrap_or(false)
}

// true while the parser is still running
pub fn still_loading(document: &Document) -> bool {
    document.ready_state() == "loading"
}
