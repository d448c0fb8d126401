use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

fn global_object(name: &str) -> Option<js_sys::Object> {
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    Some(js_sys::Object::from(any))
}

fn string_field(obj: &js_sys::Object, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        js_sys::Reflect::get(obj, &(*key).into())
            .ok()
            .and_then(|v| v.as_string())
            .filter(|v| !v.trim().is_empty())
    })
}

fn get_from_env_js() -> Option<String> {
    // window.__PASSRESET_ENV = { API_BASE_URL: "..." }, injected by env.js
    let obj = global_object("__PASSRESET_ENV")?;
    string_field(&obj, &["API_BASE_URL", "api_base_url"])
}

fn get_from_window_config() -> Option<String> {
    let obj = global_object("__PASSRESET_CONFIG")?;
    string_field(&obj, &["api_base_url", "API_BASE_URL"])
}

fn snapshot_from_globals() -> Option<String> {
    get_from_env_js().or_else(get_from_window_config)
}

fn window_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

fn cache_base_url(value: &str) -> String {
    let value = normalize_base_url(value);
    let _ = API_BASE_URL.set(value.clone());
    value
}

fn write_window_config(cfg: &RuntimeConfig) {
    let (Some(url), Some(w)) = (&cfg.api_base_url, web_sys::window()) else {
        return;
    };
    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &obj,
        &"api_base_url".into(),
        &wasm_bindgen::JsValue::from_str(url),
    );
    let _ = js_sys::Reflect::set(&w, &"__PASSRESET_CONFIG".into(), &obj);
}

async fn fetch_runtime_config(origin: &str) -> Option<RuntimeConfig> {
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

pub fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

/// Same-origin deployments serve the API under `/api`.
pub fn default_base_url(origin: Option<&str>) -> String {
    match origin {
        Some(origin) => format!("{}/api", normalize_base_url(origin)),
        None => "/api".to_string(),
    }
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = snapshot_from_globals() {
        return cache_base_url(&existing);
    }
    let origin = window_origin();
    if let Some(origin) = origin.as_deref() {
        if let Some(cfg) = fetch_runtime_config(origin).await {
            write_window_config(&cfg);
            if let Some(url) = cfg.api_base_url.filter(|url| !url.trim().is_empty()) {
                return cache_base_url(&url);
            }
        }
    }
    cache_base_url(&default_base_url(origin.as_deref()))
}

pub async fn init() {
    let base_url = await_api_base_url().await;
    log::debug!("API base URL resolved to {}", base_url);
}
