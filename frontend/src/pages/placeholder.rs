use yew::prelude::*;

use crate::routes::Route;

#[derive(Properties, PartialEq)]
pub struct PlaceholderPageProps {
    pub route: Route,
}

/// Pages that exist in the navigation but have no content yet
#[function_component(PlaceholderPage)]
pub fn placeholder_page(props: &PlaceholderPageProps) -> Html {
    html! {
        <main class="placeholder">
            <h2>{format!("{} {}", props.route.icon(), props.route.label())}</h2>
            <p>{"Coming soon."}</p>
        </main>
    }
}
