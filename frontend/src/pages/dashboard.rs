use chrono::NaiveDate;
use gloo::timers::callback::Timeout;
use shared::{Activity, GridSize, Position};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::activity_selector::ActivitySelector;
use crate::components::grid::Grid;
use crate::components::grid_size_selector::GridSizeSelector;
use crate::hooks::use_dashboard::use_dashboard;
use crate::services::api::ApiClient;
use crate::services::date_utils::{parse_iso_date, shift_days, today};
use crate::store::StoreHandle;

/// How long the "logged" confirmation stays visible, in milliseconds
const FLASH_MS: u32 = 2000;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub api_client: ApiClient,
    pub store: StoreHandle,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let default_size = props
        .store
        .auth
        .user
        .as_ref()
        .map(|user| user.grid_size())
        .unwrap_or_default();

    let dashboard = use_dashboard(&props.api_client, &props.store, today(), default_size);
    let state = dashboard.state.clone();
    let actions = dashboard.actions.clone();

    let flash = use_state(|| Option::<String>::None);

    let on_cell_click = {
        let click_cell = actions.click_cell.clone();
        let armed = state.selection.armed().cloned();
        let flash = flash.clone();

        Callback::from(move |position: Position| {
            if let Some(activity) = &armed {
                flash.set(Some(logged_message(activity, position)));
                let flash = flash.clone();
                Timeout::new(FLASH_MS, move || flash.set(None)).forget();
            }
            click_cell.emit(position);
        })
    };

    let on_previous_day = {
        let set_date = actions.set_date.clone();
        let date = state.date;
        Callback::from(move |_: MouseEvent| set_date.emit(shift_days(date, -1)))
    };
    let on_next_day = {
        let set_date = actions.set_date.clone();
        let date = state.date;
        Callback::from(move |_: MouseEvent| set_date.emit(shift_days(date, 1)))
    };
    let on_today = {
        let set_date = actions.set_date.clone();
        Callback::from(move |_: MouseEvent| set_date.emit(today()))
    };

    let on_pick_date = {
        let set_date = actions.set_date.clone();
        let current = state.date;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_date.emit(picked_date(&input.value(), current));
        })
    };

    let selected = state.selection.armed().cloned();
    let sync_error = props.store.grids.status.error.clone();

    html! {
        <main class="dashboard">
            <div class="dashboard-toolbar">
                <div class="date-navigation">
                    <button class="date-button" onclick={on_previous_day}>{"◀"}</button>
                    <button class="date-button" onclick={on_today}>{"Today"}</button>
                    <button class="date-button" onclick={on_next_day}>{"▶"}</button>
                    <input
                        type="date"
                        class="date-picker"
                        value={state.date.format("%Y-%m-%d").to_string()}
                        onchange={on_pick_date}
                    />
                </div>
                <GridSizeSelector
                    grid_size={state.grid_size}
                    on_change={actions.set_grid_size.clone()}
                />
            </div>

            <div class="dashboard-body">
                <aside class="dashboard-sidebar">
                    <ActivitySelector
                        activities={state.activities.clone()}
                        selected={selected.clone()}
                        on_select={actions.select_activity.clone()}
                    />
                    <p class="instructions">{instructions(selected.as_ref(), state.grid_size)}</p>
                </aside>

                <Grid
                    date={state.date}
                    grid_size={state.grid_size}
                    activities={state.activities.clone()}
                    logged={state.logged.clone()}
                    on_cell_click={on_cell_click}
                    selected={selected}
                />
            </div>

            {if let Some(message) = (*flash).as_ref() {
                html! { <div class="form-message success">{message}</div> }
            } else { html! {} }}

            {if let Some(error) = sync_error {
                html! { <div class="form-message error">{format!("Not saved to server: {}", error)}</div> }
            } else { html! {} }}
        </main>
    }
}

fn instructions(selected: Option<&Activity>, grid_size: GridSize) -> String {
    match selected {
        Some(activity) => format!("Click a cell to log {} {}", activity.icon, activity.name),
        None => format!("Select an activity, then click a cell in the {}", grid_size.label()),
    }
}

/// A cleared or malformed picker value keeps the current date
fn picked_date(value: &str, current: NaiveDate) -> NaiveDate {
    parse_iso_date(value).unwrap_or(current)
}

fn logged_message(activity: &Activity, position: Position) -> String {
    format!("{} {} logged in cell {}", activity.icon, activity.name, position + 1)
}
