use chrono::NaiveDate;
use shared::grid::cell_views;
use shared::{Activity, CellView, GridSize, LoggedActivities, Position};
use yew::prelude::*;

use crate::services::date_utils::format_grid_date;

/// Rendered cell edge and gap, in pixels
const CELL_PX: u32 = 60;
const GAP_PX: u32 = 8;

#[derive(Properties, PartialEq)]
pub struct GridProps {
    pub date: NaiveDate,
    pub grid_size: GridSize,
    pub activities: Vec<Activity>,
    pub logged: LoggedActivities,
    pub on_cell_click: Callback<Position>,
    #[prop_or_default]
    pub selected: Option<Activity>,
}

#[function_component(Grid)]
pub fn grid(props: &GridProps) -> Html {
    let hovered = use_state(|| Option::<Position>::None);

    let (rows, cols) = props.grid_size.dimensions();
    let cells = props.grid_size.cells();
    let armed = props.selected.is_some();
    let views = cell_views(props.grid_size, &props.activities, &props.logged, armed);

    let logged_count = props.logged.len();
    let percent = props.logged.completion_percent(props.grid_size);

    html! {
        <div class="grid-container">
            <div class="grid-header">
                <h2 class="grid-date">{format_grid_date(props.date)}</h2>
                <span class="grid-dimensions">{format!("Grid: {}x{} ({} cells)", rows, cols, cells)}</span>
            </div>

            <div class="habit-grid" style={grid_style(cols)}>
                {for views.into_iter().zip(0..).map(|(view, position): (CellView, Position)| {
                    let is_hovered = *hovered == Some(position);

                    let onclick = {
                        let on_cell_click = props.on_cell_click.clone();
                        Callback::from(move |_: MouseEvent| on_cell_click.emit(position))
                    };
                    let onmouseenter = {
                        let hovered = hovered.clone();
                        Callback::from(move |_: MouseEvent| hovered.set(Some(position)))
                    };
                    let onmouseleave = {
                        let hovered = hovered.clone();
                        Callback::from(move |_: MouseEvent| hovered.set(None))
                    };

                    let style = match view {
                        CellView::Logged(activity) => format!("background-color: {};", activity.color),
                        CellView::Empty { .. } => String::new(),
                    };

                    html! {
                        <div
                            key={position}
                            class={cell_class(&view, is_hovered)}
                            style={style}
                            title={view.title().to_string()}
                            {onclick}
                            {onmouseenter}
                            {onmouseleave}
                        >
                            {match view {
                                CellView::Logged(activity) => html! {
                                    <span class="cell-icon">{&activity.icon}</span>
                                },
                                CellView::Empty { .. } => html! {},
                            }}
                        </div>
                    }
                })}
            </div>

            <div class="grid-footer">
                {format!("Completion: {}/{} ({}%)", logged_count, cells, percent)}
            </div>
        </div>
    }
}

fn grid_style(cols: u32) -> String {
    let max_width = cols * CELL_PX + cols.saturating_sub(1) * GAP_PX;
    format!(
        "grid-template-columns: repeat({}, 1fr); gap: {}px; max-width: {}px;",
        cols, GAP_PX, max_width
    )
}

/// CSS classes for one cell
fn cell_class(view: &CellView, hovered: bool) -> String {
    let state = match view {
        CellView::Logged(_) => "logged",
        CellView::Empty { armed: true } => "empty armed",
        CellView::Empty { armed: false } => "empty",
    };
    if hovered {
        format!("grid-cell {} hovered", state)
    } else {
        format!("grid-cell {}", state)
    }
}
