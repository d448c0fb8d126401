//! Notifies the embedding host (app WebView or parent frame) that a reset
//! finished, so it can close the page.
//!
//! The payload is a JSON string posted with `postMessage(payload, "*")`:
//! `{"source":"passreset","type":"reset-completed","user_id":...}`.

use serde::Serialize;

pub const MESSAGE_SOURCE: &str = "passreset";
pub const RESET_COMPLETED: &str = "reset-completed";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostMessage<'a> {
    pub source: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub user_id: Option<&'a str>,
}

impl<'a> HostMessage<'a> {
    pub fn reset_completed(user_id: Option<&'a str>) -> Self {
        Self {
            source: MESSAGE_SOURCE,
            kind: RESET_COMPLETED,
            user_id,
        }
    }

    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Delivery problems are logged and never surface to the form.
pub fn notify_reset_completed(user_id: Option<&str>) {
    match HostMessage::reset_completed(user_id).to_payload() {
        Ok(payload) => post_to_host(&payload),
        Err(err) => log::error!("Failed to encode host message: {}", err),
    }
}

#[cfg(target_arch = "wasm32")]
fn post_to_host(payload: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let message = wasm_bindgen::JsValue::from_str(payload);

    if let Err(err) = window.post_message(&message, "*") {
        log::warn!("postMessage to window failed: {:?}", err);
    }
    match window.parent() {
        Ok(Some(parent)) if !js_sys::Object::is(&parent, &window) => {
            if let Err(err) = parent.post_message(&message, "*") {
                log::warn!("postMessage to parent failed: {:?}", err);
            }
        }
        Ok(_) => {}
        Err(err) => log::warn!("Parent window unavailable: {:?}", err),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn post_to_host(payload: &str) {
    log::debug!("No host window; dropping {}", payload);
}
