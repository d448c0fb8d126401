use crate::api::ApiClient;
use leptos::*;

// Nothing listens here; views under test must not resolve runtime config.
pub const TEST_API_BASE: &str = "http://127.0.0.1:9/api";

pub fn with_app_context<T>(f: impl FnOnce() -> T) -> T {
    let runtime = create_runtime();
    // Contexts need an owner to attach to.
    let (owner, _disposer) = as_child_of_current_owner(|()| Owner::current())(());
    let owner = owner.expect("child owner");
    let result = with_owner(owner, || {
        leptos_meta::provide_meta_context();
        provide_context(ApiClient::new_with_base_url(TEST_API_BASE));
        f()
    });
    runtime.dispose();
    result
}

pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_app_context(|| view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}
