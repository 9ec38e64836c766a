use shared::{LoginRequest, RegisterRequest};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_auth::UseAuthActions;
use crate::routes::Route;
use crate::store::StoreHandle;

#[derive(Properties, PartialEq)]
pub struct AuthPageProps {
    pub store: StoreHandle,
    pub auth_actions: UseAuthActions,
    pub on_navigate: Callback<Route>,
}

/// Text input bound to a `use_state` string
fn bind(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

fn switch_link(label: &str, route: Route, props: &AuthPageProps) -> Html {
    let onclick = {
        let on_navigate = props.on_navigate.clone();
        let clear_error = props.auth_actions.clear_error.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            clear_error.emit(());
            on_navigate.emit(route);
        })
    };

    html! {
        <a class="auth-switch" href={route.path()} {onclick}>{label.to_string()}</a>
    }
}

fn error_banner(error: Option<&String>) -> Html {
    match error {
        Some(error) => html! { <div class="form-message error">{error}</div> },
        None => html! {},
    }
}

#[function_component(LoginPage)]
pub fn login_page(props: &AuthPageProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let loading = props.store.auth.status.loading;

    let onsubmit = {
        let login = props.auth_actions.login.clone();
        let username = username.clone();
        let password = password.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            login.emit(LoginRequest {
                username: username.trim().to_string(),
                password: (*password).clone(),
            });
        })
    };

    html! {
        <main class="auth-page">
            <h2>{"Log in to Habit Grid"}</h2>
            {error_banner(props.store.auth.status.error.as_ref())}
            <form class="auth-form" {onsubmit}>
                <div class="form-group">
                    <label for="username">{"Username"}</label>
                    <input id="username" type="text" value={(*username).clone()} oninput={bind(&username)} disabled={loading} />
                </div>
                <div class="form-group">
                    <label for="password">{"Password"}</label>
                    <input id="password" type="password" value={(*password).clone()} oninput={bind(&password)} disabled={loading} />
                </div>
                <button type="submit" class="submit-button" disabled={loading}>
                    {if loading { "Logging in..." } else { "Log in" }}
                </button>
            </form>
            {switch_link("Need an account? Register", Route::Register, props)}
        </main>
    }
}

#[function_component(RegisterPage)]
pub fn register_page(props: &AuthPageProps) -> Html {
    let username = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let password_confirm = use_state(String::new);
    let loading = props.store.auth.status.loading;

    let onsubmit = {
        let register = props.auth_actions.register.clone();
        let username = username.clone();
        let email = email.clone();
        let password = password.clone();
        let password_confirm = password_confirm.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            register.emit(RegisterRequest {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password: (*password).clone(),
                password_confirm: (*password_confirm).clone(),
            });
        })
    };

    html! {
        <main class="auth-page">
            <h2>{"Create your account"}</h2>
            {error_banner(props.store.auth.status.error.as_ref())}
            <form class="auth-form" {onsubmit}>
                <div class="form-group">
                    <label for="username">{"Username"}</label>
                    <input id="username" type="text" value={(*username).clone()} oninput={bind(&username)} disabled={loading} />
                </div>
                <div class="form-group">
                    <label for="email">{"Email"}</label>
                    <input id="email" type="email" value={(*email).clone()} oninput={bind(&email)} disabled={loading} />
                </div>
                <div class="form-group">
                    <label for="password">{"Password"}</label>
                    <input id="password" type="password" value={(*password).clone()} oninput={bind(&password)} disabled={loading} />
                </div>
                <div class="form-group">
                    <label for="password-confirm">{"Confirm password"}</label>
                    <input
                        id="password-confirm"
                        type="password"
                        value={(*password_confirm).clone()}
                        oninput={bind(&password_confirm)}
                        disabled={loading}
                    />
                </div>
                <button type="submit" class="submit-button" disabled={loading}>
                    {if loading { "Creating account..." } else { "Register" }}
                </button>
            </form>
            {switch_link("Already registered? Log in", Route::Login, props)}
        </main>
    }
}
