use log::error;

#[allow(async_fn_in_trait)]
pub trait Notifier {
    fn alert(&self, title: &str, message: &str);
    async fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Notifications shown with the browser's native dialogs.
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn alert(&self, title: &str, message: &str) {
        let Some(window) = web_sys::window() else {
            error!("failed to access window to show alert");
            return;
        };
        if let Err(err) = window.alert_with_message(&format!("{title}: {message}")) {
            error!("failed to show alert: {err:?}");
        }
    }

    async fn confirm(&self, title: &str, message: &str) -> bool {
        let Some(window) = web_sys::window() else {
            error!("failed to access window to show confirmation");
            return false;
        };
        window
            .confirm_with_message(&format!("{title}\n\n{message}"))
            .unwrap_or_else(|err| {
                error!("failed to show confirmation: {err:?}");
                false
            })
    }
}
