use gloo_console::error as console_error;
use web_sys::Storage;

use common::theme::PreferenceStore;

// raw string preferences in window.localStorage
//
// values are stored verbatim (not json) so pages that already hold a bare
// "light"/"dark" keep working; a browser without storage (privacy modes,
// sandboxed iframes) simply remembers nothing
#[derive(Clone, Debug, Default)]
pub struct LocalPreferences;

impl LocalPreferences {
    fn storage() -> Option<Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl PreferenceStore for LocalPreferences {
    fn load(&self, key: &str) -> Option<String> {
        let storage = Self::storage()?;

        storage.get_item(key).unwrap_or_else(|err| {
            console_error!(format!("Failed to fetch local storage {key}: {err:?}"));
            None
        })
    }

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let storage = Self::storage().ok_or_else(|| anyhow::Error::msg("local storage unavailable"))?;

        storage.set_item(key, value).map_err(|err| {
            console_error!(format!("Failed to set local storage {key}: {err:?}"));
            anyhow::Error::msg("Local storage failure, see console log")
        })
    }
}
