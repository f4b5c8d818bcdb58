use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node, ScrollBehavior, ScrollToOptions, Window};

use common::{
    config::PortfolioConfig,
    effects::{
        HIDDEN_OPACITY, HIDDEN_TRANSFORM, NavbarView, REVEAL_TRANSITION, RevealView, SHOWN_OPACITY,
        SHOWN_TRANSFORM,
    },
    highlight::{ActiveLinkView, NavLinks, SectionBounds},
    menu::MenuView,
    scroll::ScrollView,
    theme::{Theme, ThemeView},
};

use crate::dom::{
    ACTIVE_CLASS, HAMBURGER_SELECTOR, NAV_LINK_SELECTOR, NAV_MENU_SELECTOR, NAVBAR_SELECTOR,
    SECTION_SELECTOR, THEME_TOGGLE_ID, query, query_all, query_all_html, set_active, set_style,
};

// element references captured once at load
//
// every lookup is optional: a page without, say, a hamburger just has nothing
// to toggle
pub struct DomPage {
    window: Window,
    document: Document,
    root: Option<Element>,
    theme_attribute: String,
    pub theme_toggle: Option<Element>,
    pub hamburger: Option<Element>,
    pub nav_menu: Option<Element>,
    pub nav_links: Vec<Element>,
    pub navbar: Option<HtmlElement>,
    pub animated: Vec<HtmlElement>,
}

impl DomPage {
    pub fn capture(window: Window, document: Document, config: &PortfolioConfig) -> Self {
        DomPage {
            root: document.document_element(),
            theme_attribute: config.theme.attribute.clone(),
            theme_toggle: document.get_element_by_id(THEME_TOGGLE_ID),
            hamburger: query(&document, HAMBURGER_SELECTOR),
            nav_menu: query(&document, NAV_MENU_SELECTOR),
            nav_links: query_all(&document, NAV_LINK_SELECTOR),
            navbar: query(&document, NAVBAR_SELECTOR).and_then(|el| el.dyn_into().ok()),
            animated: query_all_html(&document, &config.reveal.selector),
            window,
            document,
        }
    }

    pub fn nav_link_set(&self) -> NavLinks {
        NavLinks::from_hrefs(
            self.nav_links
                .iter()
                .map(|link| link.get_attribute("href").unwrap_or_default()),
        )
    }

    // true for clicks landing on the menu, the hamburger, or anything inside them
    pub fn inside_menu(&self, target: Option<&Node>) -> bool {
        [&self.nav_menu, &self.hamburger]
            .into_iter()
            .flatten()
            .any(|el| el.contains(target))
    }
}

impl ThemeView for DomPage {
    fn current_theme(&self) -> Option<Theme> {
        self.root
            .as_ref()?
            .get_attribute(&self.theme_attribute)?
            .parse()
            .ok()
    }

    fn apply_theme(&self, theme: Theme) {
        if let Some(root) = &self.root {
            let _ = root.set_attribute(&self.theme_attribute, theme.as_str());
        }
    }

    fn set_theme_icon(&self, class: &str) {
        let icon = self
            .theme_toggle
            .as_ref()
            .and_then(|toggle| toggle.query_selector("i").ok().flatten());

        if let Some(icon) = icon {
            icon.set_class_name(class);
        }
    }
}

impl MenuView for DomPage {
    fn menu_open(&self) -> bool {
        self.nav_menu
            .as_ref()
            .map_or(false, |menu| menu.class_list().contains(ACTIVE_CLASS))
    }

    fn set_menu_open(&self, open: bool) {
        for el in [&self.hamburger, &self.nav_menu].into_iter().flatten() {
            set_active(el, open);
        }
    }
}

impl ScrollView for DomPage {
    fn element_top(&self, id: &str) -> Option<f64> {
        let el: HtmlElement = self.document.get_element_by_id(id)?.dyn_into().ok()?;
        Some(f64::from(el.offset_top()))
    }

    fn scroll_smoothly_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);

        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

impl ActiveLinkView for DomPage {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn sections(&self) -> Vec<SectionBounds> {
        query_all_html(&self.document, SECTION_SELECTOR)
            .into_iter()
            .map(|section| {
                SectionBounds::new(
                    section.id(),
                    f64::from(section.offset_top()),
                    f64::from(section.offset_height()),
                )
            })
            .collect()
    }

    fn mark_link(&self, index: usize, active: bool) {
        if let Some(link) = self.nav_links.get(index) {
            set_active(link, active);
        }
    }
}

impl NavbarView for DomPage {
    fn set_navbar_background(&self, css: &str) {
        if let Some(navbar) = &self.navbar {
            set_style(navbar, "background", css);
        }
    }
}

impl RevealView for DomPage {
    fn conceal(&self, index: usize) {
        if let Some(el) = self.animated.get(index) {
            set_style(el, "opacity", HIDDEN_OPACITY);
            set_style(el, "transform", HIDDEN_TRANSFORM);
            set_style(el, "transition", REVEAL_TRANSITION);
        }
    }

    fn reveal(&self, index: usize) {
        if let Some(el) = self.animated.get(index) {
            set_style(el, "opacity", SHOWN_OPACITY);
            set_style(el, "transform", SHOWN_TRANSFORM);
        }
    }
}
