use leptos::*;
use leptos_meta::{Style, Title};
use leptos_router::use_query_map;

mod panel;
mod repository;
mod view_model;

pub use panel::ResetPasswordPanel;

// Keeps inputs readable inside WebViews that force a dark theme.
const LIGHT_SCHEME_CSS: &str = r#"
:root { color-scheme: light; }
input, textarea, select {
  background: #ffffff !important;
  color: #111827 !important;
  -webkit-text-fill-color: #111827 !important;
  caret-color: #111827 !important;
}
::placeholder { color: #9ca3af !important; }
"#;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let query = use_query_map();
    let initial_email = query
        .with_untracked(|params| params.get("email").cloned())
        .unwrap_or_default();

    view! {
        <Title text="Réinitialiser le mot de passe" />
        <Style>{LIGHT_SCHEME_CSS}</Style>
        <ResetPasswordPanel initial_email=initial_email />
    }
}
