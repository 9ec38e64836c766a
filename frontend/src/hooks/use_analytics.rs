use shared::store::AnalyticsAction;
use shared::{AppAction, Thunk};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::store::StoreHandle;

#[derive(Clone, PartialEq)]
pub struct UseAnalyticsActions {
    pub refresh: Callback<()>,
    pub load_patterns: Callback<()>,
    pub load_weekly_report: Callback<()>,
}

#[hook]
pub fn use_analytics(api_client: &ApiClient, store: &StoreHandle) -> UseAnalyticsActions {
    let refresh = {
        let api_client = api_client.clone();
        let store = store.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let store = store.clone();

            spawn_local(async move {
                store.dispatch(AppAction::Analytics(AnalyticsAction::Overview(Thunk::Pending)));
                let overview = api_client.overview().await;
                log_failure("overview", &overview);
                store.dispatch(AppAction::Analytics(AnalyticsAction::Overview(Thunk::from_result(overview))));

                store.dispatch(AppAction::Analytics(AnalyticsAction::Streaks(Thunk::Pending)));
                let streaks = api_client.streaks().await;
                log_failure("streaks", &streaks);
                store.dispatch(AppAction::Analytics(AnalyticsAction::Streaks(Thunk::from_result(streaks))));

                store.dispatch(AppAction::Analytics(AnalyticsAction::CompletionRates(Thunk::Pending)));
                let rates = api_client.completion_rates().await;
                log_failure("completion rates", &rates);
                store.dispatch(AppAction::Analytics(AnalyticsAction::CompletionRates(Thunk::from_result(rates))));
            });
        })
    };

    let load_patterns = {
        let api_client = api_client.clone();
        let store = store.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let store = store.clone();

            spawn_local(async move {
                store.dispatch(AppAction::Analytics(AnalyticsAction::Patterns(Thunk::Pending)));
                let patterns = api_client.patterns().await;
                log_failure("patterns", &patterns);
                store.dispatch(AppAction::Analytics(AnalyticsAction::Patterns(Thunk::from_result(patterns))));
            });
        })
    };

    let load_weekly_report = {
        let api_client = api_client.clone();
        let store = store.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let store = store.clone();

            spawn_local(async move {
                store.dispatch(AppAction::Analytics(AnalyticsAction::WeeklyReport(Thunk::Pending)));
                let report = api_client.weekly_report().await;
                log_failure("weekly report", &report);
                store.dispatch(AppAction::Analytics(AnalyticsAction::WeeklyReport(Thunk::from_result(report))));
            });
        })
    };

    use_effect_with((), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    UseAnalyticsActions {
        refresh,
        load_patterns,
        load_weekly_report,
    }
}

fn log_failure<T, E: std::fmt::Display>(what: &str, result: &Result<T, E>) {
    if let Err(e) = result {
        Logger::warn_with_component("analytics", &format!("Failed to load {}: {}", what, e));
    }
}
