use tracing::trace;

// vertical extent of a <section id=...> in document coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        SectionBounds {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub active: bool,
}

// the nav links in markup order, captured once at load
//
// at most one link is active at any time
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavLinks {
    links: Vec<NavLink>,
}

impl NavLinks {
    pub fn from_hrefs<I, S>(hrefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NavLinks {
            links: hrefs
                .into_iter()
                .map(|href| NavLink {
                    href: href.into(),
                    active: false,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavLink> {
        self.links.iter()
    }

    // index of the link pointing at "#id"
    pub fn link_for_section(&self, id: &str) -> Option<usize> {
        self.links
            .iter()
            .position(|link| link.href.strip_prefix('#') == Some(id))
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<usize> {
        self.links.iter().position(|link| link.active)
    }

    // mark a single link (or none) active, returning the links whose state changed
    pub fn set_active(&mut self, index: Option<usize>) -> Vec<(usize, bool)> {
        self.links
            .iter_mut()
            .enumerate()
            .filter_map(|(i, link)| {
                let active = Some(i) == index;
                if link.active != active {
                    link.active = active;
                    Some((i, active))
                } else {
                    None
                }
            })
            .collect()
    }
}

pub trait ActiveLinkView {
    fn scroll_y(&self) -> f64;

    fn sections(&self) -> Vec<SectionBounds>;

    fn mark_link(&self, index: usize, active: bool);
}

// the nav link whose section contains the probe position
//
// sections without a matching link are skipped; if sections overlap the last one
// in document order wins
pub fn active_link(sections: &[SectionBounds], links: &NavLinks, position: f64) -> Option<usize> {
    sections
        .iter()
        .filter(|section| section.contains(position))
        .filter_map(|section| links.link_for_section(&section.id))
        .last()
}

pub fn update_active_nav_link<V: ActiveLinkView + ?Sized>(
    links: &mut NavLinks,
    view: &V,
    probe_offset: f64,
) -> Option<usize> {
    let position = view.scroll_y() + probe_offset;
    let active = active_link(&view.sections(), links, position);

    for (index, state) in links.set_active(active) {
        trace!(index, state, "nav link changed");
        view.mark_link(index, state);
    }

    active
}
