//! Toast notifier bridging the coordinator to the app's toast host.

use crate::core::session::Notifier;
use yew::Callback;

/// [`Notifier`] that forwards messages to a yew callback.
#[derive(Clone, PartialEq)]
pub struct ToastNotifier {
    sink: Callback<String>,
}

impl ToastNotifier {
    /// Notifier emitting into `sink`.
    #[must_use]
    pub const fn new(sink: Callback<String>) -> Self {
        Self { sink }
    }
}

impl Notifier for ToastNotifier {
    fn show(&self, message: &str) {
        self.sink.emit(message.to_string());
    }
}
