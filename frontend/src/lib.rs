use leptos::*;

mod api;
pub mod bridge;
pub mod config;
mod pages;
pub mod router;
mod test_support;

/// Browser entry point: installs logging, resolves runtime config and mounts
/// the router.
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("Starting passreset frontend (wasm)");

    // window.__PASSRESET_ENV (env.js) takes precedence over ./config.json.
    spawn_local(async move {
        config::init().await;
        log::info!("Runtime config initialized");
    });

    router::mount_app();
}
