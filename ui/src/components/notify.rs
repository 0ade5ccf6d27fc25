use corkboard_common::account_view::Notice;

/// Show a blocking notification.
pub fn notify(notice: &Notice) {
    let message = notice.message();
    tracing::info!("notice: {message}");

    #[cfg(target_family = "wasm")]
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(&message) {
            tracing::warn!("alert failed: {:?}", e);
        }
    }
}
