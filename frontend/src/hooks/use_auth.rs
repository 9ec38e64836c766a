use shared::store::AuthAction;
use shared::{AppAction, LoginRequest, RegisterRequest, Thunk};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::store::StoreHandle;

#[derive(Clone, PartialEq)]
pub struct UseAuthActions {
    pub login: Callback<LoginRequest>,
    pub register: Callback<RegisterRequest>,
    pub logout: Callback<()>,
    pub clear_error: Callback<()>,
}

#[hook]
pub fn use_auth(api_client: &ApiClient, store: &StoreHandle) -> UseAuthActions {
    let login = {
        let api_client = api_client.clone();
        let store = store.clone();

        use_callback((), move |request: LoginRequest, _| {
            let api_client = api_client.clone();
            let store = store.clone();

            spawn_local(async move {
                store.dispatch(AppAction::Auth(AuthAction::Login(Thunk::Pending)));

                let result = api_client.login(&request).await;
                match &result {
                    Ok(response) => Logger::info_with_component("auth", &format!("Logged in as {}", response.user.username)),
                    Err(e) => Logger::warn_with_component("auth", &format!("Login failed: {}", e)),
                }

                store.dispatch(AppAction::Auth(AuthAction::Login(Thunk::from_result(result))));
            });
        })
    };

    let register = {
        let api_client = api_client.clone();
        let store = store.clone();

        use_callback((), move |request: RegisterRequest, _| {
            let api_client = api_client.clone();
            let store = store.clone();

            spawn_local(async move {
                store.dispatch(AppAction::Auth(AuthAction::Register(Thunk::Pending)));

                let result = api_client.register(&request).await;
                if let Err(e) = &result {
                    Logger::warn_with_component("auth", &format!("Registration failed: {}", e));
                }

                store.dispatch(AppAction::Auth(AuthAction::Register(Thunk::from_result(result))));
            });
        })
    };

    let logout = {
        let api_client = api_client.clone();
        let store = store.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let store = store.clone();

            spawn_local(async move {
                store.dispatch(AppAction::Auth(AuthAction::Logout(Thunk::Pending)));

                let result = api_client.logout().await;
                if let Err(e) = &result {
                    Logger::error_with_component("auth", &format!("Logout failed: {}", e));
                }

                store.dispatch(AppAction::Auth(AuthAction::Logout(Thunk::from_result(result))));
            });
        })
    };

    let clear_error = {
        let store = store.clone();
        use_callback((), move |_, _| {
            store.dispatch(AppAction::Auth(AuthAction::ClearError));
        })
    };

    // Resume a stored session on first render
    use_effect_with((), {
        let api_client = api_client.clone();
        let store = store.clone();

        move |_| {
            if api_client.has_token() {
                spawn_local(async move {
                    match api_client.profile().await {
                        Ok(user) => store.dispatch(AppAction::Auth(AuthAction::SetUser(user))),
                        Err(e) => Logger::info_with_component("auth", &format!("Stored session not restored: {}", e)),
                    }
                });
            }
            || ()
        }
    });

    UseAuthActions {
        login,
        register,
        logout,
        clear_error,
    }
}
