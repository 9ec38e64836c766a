use shared::store::AnalyticsState;
use yew::prelude::*;

use crate::hooks::use_analytics::use_analytics;
use crate::services::api::ApiClient;
use crate::store::StoreHandle;

#[derive(Properties, PartialEq)]
pub struct AnalyticsPageProps {
    pub api_client: ApiClient,
    pub store: StoreHandle,
}

#[function_component(AnalyticsPage)]
pub fn analytics_page(props: &AnalyticsPageProps) -> Html {
    let actions = use_analytics(&props.api_client, &props.store);
    let analytics = &props.store.analytics;

    let on_weekly_report = {
        let load = actions.load_weekly_report.clone();
        Callback::from(move |_: MouseEvent| load.emit(()))
    };
    let on_patterns = {
        let load = actions.load_patterns.clone();
        Callback::from(move |_: MouseEvent| load.emit(()))
    };

    html! {
        <main class="analytics">
            <h2>{"📈 Analytics"}</h2>

            {if analytics.status.loading {
                html! { <div class="loading">{"Loading..."}</div> }
            } else { html! {} }}

            {if let Some(error) = &analytics.status.error {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <section class="overview-cards">
                {for overview_figures(analytics).into_iter().map(|(label, value)| html! {
                    <div class="overview-card">
                        <span class="overview-value">{value}</span>
                        <span class="overview-label">{label}</span>
                    </div>
                })}
            </section>

            {if let Some(best) = analytics.best_streak() {
                html! {
                    <p class="best-streak">
                        {format!("🔥 Best current streak: {} ({} days)", best.activity_name, best.current_streak)}
                    </p>
                }
            } else { html! {} }}

            <section class="completion-rates">
                <h3>{"Completion rates"}</h3>
                <ul>
                    {for analytics.completion_rates.iter().map(|rate| html! {
                        <li>
                            {format!("{}: {:.0}% ({} logs)", rate.activity_name, rate.completion_rate, rate.total_logs)}
                        </li>
                    })}
                </ul>
            </section>

            <div class="analytics-actions">
                <button onclick={on_weekly_report}>{"Weekly report"}</button>
                <button onclick={on_patterns}>{"Patterns"}</button>
            </div>

            {if let Some(report) = &analytics.weekly_report {
                html! {
                    <section class="weekly-report">
                        <h3>{format!("Week of {} to {}", report.week_start, report.week_end)}</h3>
                        <p>{format!("{} activities, {:.0}% complete", report.total_activities, report.completion_rate)}</p>
                        <ol>
                            {for report.top_activities.iter().map(|(name, count)| html! {
                                <li>{format!("{} ({})", name, count)}</li>
                            })}
                        </ol>
                    </section>
                }
            } else { html! {} }}

            {if !analytics.patterns.is_empty() {
                html! {
                    <section class="patterns">
                        <h3>{"Patterns"}</h3>
                        <ul>
                            {for analytics.patterns.iter().map(|pattern| html! {
                                <li title={format!("confidence {:.2}", pattern.confidence_score)}>
                                    {if pattern.description.is_empty() { &pattern.pattern_type } else { &pattern.description }}
                                </li>
                            })}
                        </ul>
                    </section>
                }
            } else { html! {} }}
        </main>
    }
}

/// Label and display value for each overview card
fn overview_figures(analytics: &AnalyticsState) -> Vec<(&'static str, String)> {
    let Some(overview) = &analytics.overview else {
        return Vec::new();
    };

    vec![
        ("Activities logged", overview.total_activities_logged.to_string()),
        ("Days tracked", overview.total_days_tracked.to_string()),
        ("Current streak", format!("{} days", overview.current_streak)),
        ("Longest streak", format!("{} days", overview.longest_streak)),
        ("Average completion", format!("{:.1}%", overview.average_completion_rate)),
    ]
}
