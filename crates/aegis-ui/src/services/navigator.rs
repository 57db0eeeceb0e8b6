//! Hash-location navigator matching the app's `HashRouter`.

use crate::core::session::Navigator;
use gloo::utils::window;

/// [`Navigator`] reading and writing `window.location.hash`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashNavigator;

impl Navigator for HashNavigator {
    fn current_path(&self) -> String {
        let hash = window().location().hash().unwrap_or_default();
        let path = hash.trim_start_matches('#');
        if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        }
    }

    fn redirect_to(&self, path: &str) {
        if let Err(err) = window().location().set_hash(path) {
            gloo::console::error!("navigation failed", path, format!("{err:?}"));
        }
    }
}
