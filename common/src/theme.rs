use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ThemeConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn icon(self, config: &ThemeConfig) -> &str {
        match self {
            Theme::Light => &config.light_icon,
            Theme::Dark => &config.dark_icon,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

// origin-scoped string store holding the preference
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

// the visible side of the theme: the root attribute and the toggle's icon
pub trait ThemeView {
    fn current_theme(&self) -> Option<Theme>;

    fn apply_theme(&self, theme: Theme);

    fn set_theme_icon(&self, class: &str);
}

pub fn stored_theme<S: PreferenceStore + ?Sized>(config: &ThemeConfig, store: &S) -> Theme {
    match store.load(&config.storage_key) {
        None => Theme::default(),
        Some(value) => value.parse().unwrap_or_else(|err| {
            warn!("ignoring stored preference: {err}");
            Theme::default()
        }),
    }
}

fn show<V: ThemeView + ?Sized>(config: &ThemeConfig, view: &V, theme: Theme) {
    view.apply_theme(theme);
    view.set_theme_icon(theme.icon(config));
}

// run once at startup: persisted value, or light
pub fn init_theme<S, V>(config: &ThemeConfig, store: &S, view: &V) -> Theme
where
    S: PreferenceStore + ?Sized,
    V: ThemeView + ?Sized,
{
    let theme = stored_theme(config, store);
    debug!(%theme, "initializing theme");

    show(config, view, theme);
    theme
}

// flip the visible theme and persist it
//
// a store that refuses the write leaves the page themed correctly for this visit
pub fn toggle_theme<S, V>(config: &ThemeConfig, store: &S, view: &V) -> Theme
where
    S: PreferenceStore + ?Sized,
    V: ThemeView + ?Sized,
{
    let theme = view.current_theme().unwrap_or_default().toggled();
    info!(%theme, "switching theme");

    show(config, view, theme);

    if let Err(err) = store.save(&config.storage_key, theme.as_str()) {
        warn!("failed to persist theme: {err}");
    }

    theme
}
