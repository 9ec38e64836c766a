use std::ops::Deref;
use std::rc::Rc;

use chrono::NaiveDate;
use shared::store::{ActivitiesAction, GridsAction};
use shared::{Activity, AppAction, DashboardAction, DashboardState, GridSize, Position, SyncStep, Thunk};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::store::StoreHandle;

/// Dashboard state as a Yew reducer
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStore(DashboardState);

impl Reducible for DashboardStore {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.0.apply(action);
        Rc::new(next)
    }
}

impl Deref for DashboardStore {
    type Target = DashboardState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct UseDashboardResult {
    pub state: Rc<DashboardStore>,
    pub actions: UseDashboardActions,
}

#[derive(Clone, PartialEq)]
pub struct UseDashboardActions {
    pub select_activity: Callback<Activity>,
    pub click_cell: Callback<Position>,
    pub set_grid_size: Callback<GridSize>,
    pub set_date: Callback<NaiveDate>,
}

#[hook]
pub fn use_dashboard(
    api_client: &ApiClient,
    store: &StoreHandle,
    date: NaiveDate,
    grid_size: GridSize,
) -> UseDashboardResult {
    let dashboard = use_reducer(move || DashboardStore(DashboardState::new(date).with_grid_size(grid_size)));

    let select_activity = {
        let dashboard = dashboard.clone();
        Callback::from(move |activity: Activity| {
            Logger::debug_with_component("dashboard", &format!("Armed {}", activity.name));
            dashboard.dispatch(DashboardAction::SelectActivity(activity));
        })
    };

    let click_cell = {
        let dashboard = dashboard.clone();
        Callback::from(move |position: Position| dashboard.dispatch(DashboardAction::ClickCell(position)))
    };

    let set_grid_size = {
        let dashboard = dashboard.clone();
        Callback::from(move |size: GridSize| dashboard.dispatch(DashboardAction::SetGridSize(size)))
    };

    let set_date = {
        let dashboard = dashboard.clone();
        Callback::from(move |date: NaiveDate| dashboard.dispatch(DashboardAction::SetDate(date)))
    };

    // Replace the seeded activities with the user's own
    use_effect_with((), {
        let api_client = api_client.clone();
        let store = store.clone();
        let dashboard = dashboard.clone();

        move |_| {
            spawn_local(async move {
                store.dispatch(AppAction::Activities(ActivitiesAction::Fetch(Thunk::Pending)));

                match api_client.list_activities().await {
                    Ok(activities) => {
                        dashboard.dispatch(DashboardAction::ActivitiesLoaded(activities.clone()));
                        store.dispatch(AppAction::Activities(ActivitiesAction::Fetch(Thunk::Fulfilled(activities))));
                    }
                    Err(e) => {
                        Logger::warn_with_component("dashboard", &format!("Keeping default activities: {}", e));
                        store.dispatch(AppAction::Activities(ActivitiesAction::Fetch(Thunk::rejected(e.to_string()))));
                    }
                }
            });
            || ()
        }
    });

    // Look up the server's grid for the active date, again after a failed create
    use_effect_with((dashboard.date, dashboard.needs_lookup()), {
        let api_client = api_client.clone();
        let store = store.clone();
        let dashboard = dashboard.clone();

        move |(date, needs_lookup)| {
            if *needs_lookup {
                spawn_local(load_grid(api_client, store, dashboard, *date));
            }
            || ()
        }
    });

    // Send queued cell writes one at a time
    use_effect_with(dashboard.next_sync(), {
        let api_client = api_client.clone();
        let store = store.clone();
        let dashboard = dashboard.clone();

        move |step| {
            if let Some(step) = step.clone() {
                dashboard.dispatch(DashboardAction::BeginSync);
                spawn_local(run_sync_step(api_client, store, dashboard, step));
            }
            || ()
        }
    });

    use_effect_with(dashboard.stale_positions(), |stale| {
        if !stale.is_empty() {
            Logger::warn_with_component(
                "dashboard",
                &format!("Logged positions {:?} cannot be shown in the current grid", stale),
            );
        }
        || ()
    });

    let actions = UseDashboardActions {
        select_activity,
        click_cell,
        set_grid_size,
        set_date,
    };

    UseDashboardResult {
        state: (*dashboard).clone().into(),
        actions,
    }
}

async fn load_grid(api_client: ApiClient, store: StoreHandle, dashboard: UseReducerHandle<DashboardStore>, date: NaiveDate) {
    store.dispatch(AppAction::Grids(GridsAction::FetchByDate(Thunk::Pending)));

    match api_client.grid_by_date(date).await {
        Ok(Some(grid)) => {
            dashboard.dispatch(DashboardAction::GridLoaded(grid.clone()));
            store.dispatch(AppAction::Grids(GridsAction::FetchByDate(Thunk::Fulfilled(Some(grid)))));
        }
        Ok(None) => {
            dashboard.dispatch(DashboardAction::GridMissing(date));
            store.dispatch(AppAction::Grids(GridsAction::FetchByDate(Thunk::Fulfilled(None))));
        }
        Err(e) => {
            Logger::warn_with_component("dashboard", &format!("Failed to load grid for {}: {}", date, e));
            dashboard.dispatch(DashboardAction::GridMissing(date));
            store.dispatch(AppAction::Grids(GridsAction::FetchByDate(Thunk::rejected(e.to_string()))));
        }
    }
}

/// Performs one request chosen by `DashboardState::next_sync`.
/// Failures are recorded in the grids slice; the local write stands.
async fn run_sync_step(
    api_client: ApiClient,
    store: StoreHandle,
    dashboard: UseReducerHandle<DashboardStore>,
    step: SyncStep,
) {
    match step {
        SyncStep::Create(request) => {
            store.dispatch(AppAction::Grids(GridsAction::Create(Thunk::Pending)));

            match api_client.create_grid(&request).await {
                Ok(grid) => {
                    dashboard.dispatch(DashboardAction::GridCreated(grid.clone()));
                    store.dispatch(AppAction::Grids(GridsAction::Create(Thunk::Fulfilled(grid))));
                }
                Err(e) => {
                    Logger::error_with_component("dashboard", &format!("Failed to create grid for {}: {}", request.date, e));
                    dashboard.dispatch(DashboardAction::SyncFailed);
                    store.dispatch(AppAction::Grids(GridsAction::Create(Thunk::rejected(e.to_string()))));
                }
            }
        }
        SyncStep::Log(grid_id, queued) => {
            let request = queued.request;
            store.dispatch(AppAction::Grids(GridsAction::LogActivity(Thunk::Pending)));

            match api_client.log_activity(grid_id, &request).await {
                Ok(response) => {
                    Logger::debug_with_component(
                        "dashboard",
                        &format!("Saved activity {} at cell {}", request.activity_id, request.position),
                    );
                    dashboard.dispatch(DashboardAction::CellSynced(response.grid.clone()));
                    store.dispatch(AppAction::Grids(GridsAction::LogActivity(Thunk::Fulfilled(response.grid))));
                }
                Err(e) => {
                    Logger::error_with_component("dashboard", &format!("Failed to save cell {}: {}", request.position, e));
                    dashboard.dispatch(DashboardAction::SyncFailed);
                    store.dispatch(AppAction::Grids(GridsAction::LogActivity(Thunk::rejected(e.to_string()))));
                }
            }
        }
    }
}
