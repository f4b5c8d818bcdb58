use tracing::{debug, instrument};

use crate::menu::{MenuView, close_mobile_menu};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    // "#about" -> "about"
    InPage(&'a str),
    // another page or another site
    Elsewhere,
}

impl<'a> LinkTarget<'a> {
    pub fn classify(href: &'a str) -> Self {
        match href.strip_prefix('#') {
            Some(id) => LinkTarget::InPage(id),
            None => LinkTarget::Elsewhere,
        }
    }
}

// the anchors that get the offset-compensating click handler
//
// nav links always do; other in-page anchors only when the browser cannot
// smooth-scroll natively. an anchor appears at most once, so no element is
// bound twice
pub fn anchors_to_bind<T: Clone + PartialEq>(nav_links: &[T], in_page: &[T], native_smooth: bool) -> Vec<T> {
    let mut anchors = nav_links.to_vec();

    if !native_smooth {
        for anchor in in_page {
            if !anchors.contains(anchor) {
                anchors.push(anchor.clone());
            }
        }
    }

    anchors
}

pub trait ScrollView {
    // document offset of the element's top edge, if the element exists
    fn element_top(&self, id: &str) -> Option<f64>;

    fn scroll_smoothly_to(&self, top: f64);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavClick {
    pub prevent_default: bool,
    pub scrolled_to: Option<f64>,
}

// where the viewport has to land so the target sits just under the fixed header
pub fn scroll_target(element_top: f64, header_offset: f64) -> f64 {
    element_top - header_offset
}

#[instrument(level = "debug", skip(view))]
pub fn handle_nav_click<V>(href: Option<&str>, header_offset: f64, view: &V) -> NavClick
where
    V: ScrollView + MenuView + ?Sized,
{
    let Some(href) = href else {
        return NavClick::default();
    };

    let click = match LinkTarget::classify(href) {
        LinkTarget::InPage(id) => {
            let scrolled_to = view.element_top(id).map(|top| {
                let target = scroll_target(top, header_offset);
                view.scroll_smoothly_to(target);
                target
            });

            if scrolled_to.is_none() {
                debug!(id, "anchor target missing");
            }

            NavClick {
                prevent_default: true,
                scrolled_to,
            }
        }
        LinkTarget::Elsewhere => NavClick::default(),
    };

    close_mobile_menu(view);
    click
}
