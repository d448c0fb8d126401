use leptos::*;
use leptos_meta::provide_meta_context;
use leptos_router::*;

use crate::pages::ResetPasswordPage;

pub const ROUTE_PATHS: &[&str] = &["/", "/reset"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(crate::api::ApiClient::new());
    view! {
        <Router>
            <Routes>
                <Route path="/" view=ResetPasswordPage/>
                <Route path="/reset" view=ResetPasswordPage/>
            </Routes>
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn reset_form_is_served_at_root_and_reset() {
        assert!(ROUTE_PATHS.contains(&"/"));
        assert!(ROUTE_PATHS.contains(&"/reset"));
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}
