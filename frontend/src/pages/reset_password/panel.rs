use super::view_model::use_reset_password_view_model;
use leptos::*;

const INPUT_CLASS: &str = "w-full rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm text-form-control-text placeholder-form-control-placeholder outline-none focus:ring-2 focus:ring-action-primary-focus";

#[component]
pub fn ResetPasswordPanel(#[prop(into, optional)] initial_email: String) -> impl IntoView {
    let vm = use_reset_password_view_model(initial_email);
    let email = vm.email;
    let password = vm.password;
    let confirm = vm.confirm;
    let pending = vm.submit_action.pending();

    view! {
        <main class="min-h-screen flex items-center justify-center bg-surface p-4 text-fg">
            <div class="w-full max-w-md rounded-2xl bg-surface-elevated shadow p-6">
                <h1 class="text-xl font-semibold mb-1">"Réinitialiser le mot de passe"</h1>
                <p class="text-sm text-fg-muted mb-4">
                    "Saisissez l’email de votre compte et un nouveau mot de passe."
                </p>

                <ResetAlerts error=vm.error success=vm.success />

                <form
                    class="space-y-3"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        vm.submit();
                    }
                >
                    <div>
                        <label for="email" class="block text-sm mb-1">"Email"</label>
                        <input
                            id="email"
                            name="email"
                            type="email"
                            class=INPUT_CLASS
                            placeholder="vous@exemple.com"
                            autocomplete="email"
                            required
                            prop:value=email
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label for="password" class="block text-sm mb-1">
                            "Nouveau mot de passe"
                        </label>
                        <input
                            id="password"
                            name="password"
                            type="password"
                            class=INPUT_CLASS
                            autocomplete="new-password"
                            minlength="6"
                            required
                            prop:value=password
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label for="confirm" class="block text-sm mb-1">"Confirmer"</label>
                        <input
                            id="confirm"
                            name="confirm"
                            type="password"
                            class=INPUT_CLASS
                            autocomplete="new-password"
                            minlength="6"
                            required
                            prop:value=confirm
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                    </div>

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full rounded-md py-2 font-medium text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover disabled:opacity-60"
                    >
                        {move || if pending.get() { "Patientez…" } else { "Valider" }}
                    </button>
                </form>

                <p class="mt-3 text-xs text-fg-muted">
                    "Conseil : ouvrez cette page dans l’app. Une fois le mot de passe changé, revenez à l’écran de connexion et authentifiez-vous."
                </p>
            </div>
        </main>
    }
}

#[component]
fn ResetAlerts(
    error: RwSignal<Option<String>>,
    success: RwSignal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some)>
            <div
                role="alert"
                class="mb-3 rounded-md border border-status-error-border bg-status-error-bg p-2 text-sm text-status-error-text"
            >
                {move || error.get().unwrap_or_default()}
            </div>
        </Show>
        <Show when=move || success.with(Option::is_some)>
            <div
                role="status"
                class="mb-3 rounded-md border border-status-success-border bg-status-success-bg p-2 text-sm text-status-success-text"
            >
                {move || success.get().unwrap_or_default()}
            </div>
        </Show>
    }
}
