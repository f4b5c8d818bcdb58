use std::{cell::RefCell, rc::Rc};

use gloo_timers::callback::Timeout;
use tracing::{debug, info, instrument, warn};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Node, Window,
};

use api::HttpRelay;
use common::{
    config::{ContactConfig, PortfolioConfig, RevealConfig, read_config},
    contact::ContactSubmitter,
    effects::{PumpAction, ScrollPump},
    event::{PageEvent, Portfolio},
    scroll::anchors_to_bind,
};

use crate::{
    contact::{DomContactForm, TimeoutScheduler},
    dom::{CONFIG_SCRIPT_ID, IN_PAGE_ANCHOR_SELECTOR, js_err, query_all, still_loading, supports_smooth_scroll},
    page::DomPage,
    storage::LocalPreferences,
};

type App = Portfolio<DomPage, LocalPreferences>;

const REVEAL_INDEX_ATTR: &str = "data-reveal-index";

// attach a listener for the lifetime of the page
pub fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> anyhow::Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();

    Ok(())
}

// wait for the markup if the parser is still running, otherwise attach right away
pub fn boot() -> anyhow::Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow::Error::msg("no global window exists"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::Error::msg("window has no document"))?;

    if still_loading(&document) {
        debug!("deferring until DOMContentLoaded");

        let mut pending = Some((window, document.clone()));
        listen(&document, "DOMContentLoaded", move |_| {
            if let Some((window, document)) = pending.take() {
                if let Err(err) = attach(window, document) {
                    warn!("failed to attach page behavior: {err}");
                }
            }
        })
    } else {
        attach(window, document)
    }
}

fn page_config(document: &Document) -> PortfolioConfig {
    let doc = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content());

    read_config(doc.as_deref())
}

#[instrument(skip_all)]
pub fn attach(window: Window, document: Document) -> anyhow::Result<()> {
    let config = page_config(&document);
    let page = DomPage::capture(window.clone(), document.clone(), &config);

    let links = page.nav_link_set();
    let theme_toggle = page.theme_toggle.clone();
    let hamburger = page.hamburger.clone();
    let nav_links = page.nav_links.clone();
    let animated = page.animated.clone();

    let app = Rc::new(Portfolio::new(
        config,
        page,
        LocalPreferences,
        links,
        animated.len(),
    ));
    let theme = app.start();

    if let Some(toggle) = theme_toggle {
        let app = app.clone();
        listen(&toggle, "click", move |_| {
            app.dispatch(PageEvent::ThemeToggleClicked);
        })?;
    }

    if let Some(hamburger) = hamburger {
        let app = app.clone();
        listen(&hamburger, "click", move |_| {
            app.dispatch(PageEvent::HamburgerClicked);
        })?;
    }

    bind_anchors(&app, &document, nav_links)?;

    match DomContactForm::find(&document) {
        Some(form) => bind_contact_form(form, app.config().contact.clone())?,
        None => debug!("no contact form on this page"),
    }

    bind_scroll(&app, &window)?;

    {
        let app = app.clone();
        listen(&document, "click", move |event| {
            let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
            let inside_menu = app.page().inside_menu(target.as_ref());
            app.dispatch(PageEvent::DocumentClicked { inside_menu });
        })?;
    }

    {
        let app = app.clone();
        let resized = window.clone();
        listen(&window, "resize", move |_| {
            if let Some(width) = resized.inner_width().ok().and_then(|width| width.as_f64()) {
                app.dispatch(PageEvent::Resized { width });
            }
        })?;
    }

    observe_reveals(&app, animated, &app.config().reveal)?;

    info!(%theme, "page behavior attached");
    Ok(())
}

fn bind_anchors(app: &Rc<App>, document: &Document, nav_links: Vec<Element>) -> anyhow::Result<()> {
    let native_smooth = supports_smooth_scroll(document);
    let in_page = if native_smooth {
        Vec::new()
    } else {
        query_all(document, IN_PAGE_ANCHOR_SELECTOR)
    };

    let anchors = anchors_to_bind(&nav_links, &in_page, native_smooth);
    debug!(count = anchors.len(), native_smooth, "binding anchors");

    for anchor in anchors {
        let app = app.clone();
        let link = anchor.clone();

        listen(&anchor, "click", move |event| {
            let href = link.get_attribute("href");
            if app.dispatch(PageEvent::LinkClicked { href }).prevent_default {
                event.prevent_default();
            }
        })?;
    }

    Ok(())
}

fn bind_contact_form(form: DomContactForm, config: ContactConfig) -> anyhow::Result<()> {
    let relay = Rc::new(HttpRelay::new(config.endpoint.clone()));
    let submitter = Rc::new(ContactSubmitter::new(config));
    let target = form.form.clone();

    listen(&target, "submit", move |event| {
        event.prevent_default();

        let form = form.clone();
        let relay = relay.clone();
        let submitter = submitter.clone();
        spawn_local(async move {
            submitter.submit(&form, relay.as_ref(), &TimeoutScheduler).await;
        });
    })
}

fn now(window: &Window) -> f64 {
    window
        .performance()
        .map_or_else(js_sys::Date::now, |performance| performance.now())
}

fn bind_scroll(app: &Rc<App>, window: &Window) -> anyhow::Result<()> {
    let pump = Rc::new(RefCell::new(ScrollPump::new(app.config().nav.scroll_throttle_ms)));

    let app = app.clone();
    let handler_window = window.clone();
    listen(window, "scroll", move |_| {
        let action = pump.borrow_mut().scrolled(now(&handler_window));
        pump_scroll(&app, &pump, &handler_window, action);
    })
}

fn pump_scroll(app: &Rc<App>, pump: &Rc<RefCell<ScrollPump>>, window: &Window, action: PumpAction) {
    match action {
        PumpAction::Run => {
            app.dispatch(PageEvent::Scrolled);
        }
        PumpAction::ScheduleTrailing(delay_ms) => {
            let app = app.clone();
            let pump = pump.clone();
            let window = window.clone();
            Timeout::new(delay_ms, move || {
                let action = pump.borrow_mut().trailing(now(&window));
                pump_scroll(&app, &pump, &window, action);
            })
            .forget();
        }
        PumpAction::Skip => {}
    }
}

fn observe_reveals(app: &Rc<App>, elements: Vec<HtmlElement>, config: &RevealConfig) -> anyhow::Result<()> {
    if elements.is_empty() {
        return Ok(());
    }

    for (index, el) in elements.iter().enumerate() {
        el.set_attribute(REVEAL_INDEX_ATTR, &index.to_string())
            .map_err(js_err)?;
    }

    let app = app.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(index) = target
                    .get_attribute(REVEAL_INDEX_ATTR)
                    .and_then(|index| index.parse().ok())
                else {
                    continue;
                };

                let response = app.dispatch(PageEvent::ElementVisible {
                    index,
                    intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                });

                if response.stop_observing.is_some() {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options.set_root_margin(&config.root_margin);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        .map_err(js_err)?;
    callback.forget();

    for el in &elements {
        observer.observe(el);
    }

    debug!(count = elements.len(), "observing animated elements");
    Ok(())
}
