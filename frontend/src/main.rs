use shared::store::AuthAction;
use shared::AppAction;
use yew::prelude::*;

mod components;
mod hooks;
mod pages;
mod routes;
mod services;
mod store;

use components::navigation::Navigation;
use hooks::use_auth::use_auth;
use pages::analytics::AnalyticsPage;
use pages::auth::{LoginPage, RegisterPage};
use pages::dashboard::DashboardPage;
use pages::placeholder::PlaceholderPage;
use routes::{current_path, push_path, Route};
use services::api::ApiClient;
use services::config::AppConfig;
use services::logging::Logger;
use store::Store;

#[function_component(App)]
fn app() -> Html {
    let store = use_reducer(Store::default);
    let route = use_state(|| Route::from_path(&current_path()));

    let api_client = {
        let store = store.clone();
        use_memo((), move |_| {
            let config = AppConfig::from_env();
            Logger::init(config.log_level);
            Logger::info_with_component("app", &format!("Using API at {}", config.api_base_url));

            ApiClient::new(&config).on_unauthorized(Callback::from(move |_| {
                store.dispatch(AppAction::Auth(AuthAction::Unauthorized));
            }))
        })
    };

    let auth_actions = use_auth(&api_client, &store);

    let navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| {
            push_path(next.path());
            route.set(next);
        })
    };

    // Leave the login and register pages once a session exists
    {
        let navigate = navigate.clone();
        let current = *route;
        use_effect_with(store.auth.is_authenticated, move |authenticated| {
            if *authenticated && current.is_public() {
                navigate.emit(Route::Dashboard);
            }
            || ()
        });
    }

    if !store.auth.is_authenticated {
        return match *route {
            Route::Register => html! {
                <RegisterPage store={store.clone()} auth_actions={auth_actions.clone()} on_navigate={navigate.clone()} />
            },
            _ => html! {
                <LoginPage store={store.clone()} auth_actions={auth_actions.clone()} on_navigate={navigate.clone()} />
            },
        };
    }

    let page = match *route {
        Route::Dashboard | Route::Login | Route::Register => html! {
            <DashboardPage api_client={(*api_client).clone()} store={store.clone()} />
        },
        Route::Analytics => html! {
            <AnalyticsPage api_client={(*api_client).clone()} store={store.clone()} />
        },
        other => html! { <PlaceholderPage route={other} /> },
    };

    html! {
        <div class="app">
            <Navigation
                current={*route}
                user={store.auth.user.clone()}
                on_navigate={navigate.clone()}
                on_logout={auth_actions.logout.clone()}
            />
            {page}
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
