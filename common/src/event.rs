use std::cell::RefCell;

use tracing::{debug, instrument};

use crate::{
    config::PortfolioConfig,
    effects::{NavbarView, RevealSet, RevealView, navbar_background},
    highlight::{ActiveLinkView, NavLinks, update_active_nav_link},
    menu::{MenuView, close_mobile_menu, closes_on_resize, toggle_mobile_menu},
    scroll::{ScrollView, handle_nav_click},
    theme::{PreferenceStore, Theme, ThemeView, init_theme, toggle_theme},
};

// the synchronous events the page reacts to
//
// scroll events arrive here already throttled by the caller
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    ThemeToggleClicked,
    HamburgerClicked,
    LinkClicked { href: Option<String> },
    // a click anywhere; inside_menu covers both the menu and the hamburger
    DocumentClicked { inside_menu: bool },
    Resized { width: f64 },
    Scrolled,
    ElementVisible { index: usize, intersecting: bool, ratio: f64 },
}

// what the caller has to do with the browser event afterwards
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    pub prevent_default: bool,
    pub stop_observing: Option<usize>,
}

// everything the page exposes to the dispatcher
pub trait Page: ThemeView + MenuView + ScrollView + ActiveLinkView + NavbarView + RevealView {}

impl<T> Page for T where T: ThemeView + MenuView + ScrollView + ActiveLinkView + NavbarView + RevealView {}

// page state plus the config it runs under, fed by typed events
pub struct Portfolio<P: Page, S: PreferenceStore> {
    config: PortfolioConfig,
    page: P,
    store: S,
    links: RefCell<NavLinks>,
    reveals: RefCell<RevealSet>,
}

impl<P: Page, S: PreferenceStore> Portfolio<P, S> {
    pub fn new(config: PortfolioConfig, page: P, store: S, links: NavLinks, animated: usize) -> Self {
        let reveals = RevealSet::new(animated);

        Portfolio {
            config,
            page,
            store,
            links: RefCell::new(links),
            reveals: RefCell::new(reveals),
        }
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    // load-time setup: theme, hidden animation styles, and the initial scroll state
    #[instrument(skip(self))]
    pub fn start(&self) -> Theme {
        let theme = init_theme(&self.config.theme, &self.store, &self.page);
        self.reveals.borrow().conceal_all(&self.page);
        self.refresh_scroll_state();

        debug!(links = self.links.borrow().len(), "portfolio started");
        theme
    }

    #[instrument(level = "trace", skip(self))]
    pub fn dispatch(&self, event: PageEvent) -> EventResponse {
        match event {
            PageEvent::ThemeToggleClicked => {
                toggle_theme(&self.config.theme, &self.store, &self.page);
                self.refresh_navbar();
                EventResponse::default()
            }
            PageEvent::HamburgerClicked => {
                toggle_mobile_menu(&self.page);
                EventResponse::default()
            }
            PageEvent::LinkClicked { href } => {
                let click = handle_nav_click(href.as_deref(), self.config.nav.header_offset, &self.page);
                EventResponse {
                    prevent_default: click.prevent_default,
                    stop_observing: None,
                }
            }
            PageEvent::DocumentClicked { inside_menu } => {
                if !inside_menu {
                    close_mobile_menu(&self.page);
                }
                EventResponse::default()
            }
            PageEvent::Resized { width } => {
                if closes_on_resize(width, self.config.nav.mobile_breakpoint) {
                    close_mobile_menu(&self.page);
                }
                EventResponse::default()
            }
            PageEvent::Scrolled => {
                self.refresh_scroll_state();
                EventResponse::default()
            }
            PageEvent::ElementVisible {
                index,
                intersecting,
                ratio,
            } => {
                if self.reveals.borrow_mut().observe(index, intersecting, ratio) {
                    self.page.reveal(index);
                    EventResponse {
                        prevent_default: false,
                        stop_observing: Some(index),
                    }
                } else {
                    EventResponse::default()
                }
            }
        }
    }

    fn refresh_scroll_state(&self) {
        update_active_nav_link(
            &mut self.links.borrow_mut(),
            &self.page,
            self.config.nav.active_probe_offset,
        );
        self.refresh_navbar();
    }

    fn refresh_navbar(&self) {
        let theme = self.page.current_theme().unwrap_or_default();
        let css = navbar_background(&self.config.navbar, self.page.scroll_y(), theme);

        self.page.set_navbar_background(css);
    }
}
