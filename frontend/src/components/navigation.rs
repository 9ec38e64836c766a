use shared::User;
use yew::prelude::*;

use crate::routes::Route;

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub current: Route,
    pub user: Option<User>,
    pub on_navigate: Callback<Route>,
    pub on_logout: Callback<()>,
}

#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"🟩 Habit Grid"}</h1>
                <nav class="nav-links">
                    {for Route::NAV.iter().map(|route| {
                        let route = *route;
                        let class = if route == props.current { "nav-link active" } else { "nav-link" };
                        let onclick = {
                            let on_navigate = props.on_navigate.clone();
                            Callback::from(move |e: MouseEvent| {
                                e.prevent_default();
                                on_navigate.emit(route);
                            })
                        };

                        html! {
                            <a href={route.path()} {class} {onclick}>
                                <span class="nav-icon">{route.icon()}</span>
                                {route.label()}
                            </a>
                        }
                    })}
                </nav>
                <div class="header-right">
                    {if let Some(user) = &props.user {
                        html! { <span class="user-name">{user.full_name()}</span> }
                    } else {
                        html! {}
                    }}
                    <button
                        class="logout-button"
                        onclick={{
                            let on_logout = props.on_logout.clone();
                            Callback::from(move |_: MouseEvent| on_logout.emit(()))
                        }}
                    >
                        {"Log out"}
                    </button>
                </div>
            </div>
        </header>
    }
}
