use shared::GridSize;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GridSizeSelectorProps {
    pub grid_size: GridSize,
    pub on_change: Callback<GridSize>,
}

#[function_component(GridSizeSelector)]
pub fn grid_size_selector(props: &GridSizeSelectorProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(parse_size(&select.value()));
        })
    };

    html! {
        <div class="grid-size-selector">
            <label for="grid-size">{"Grid size"}</label>
            <select id="grid-size" {onchange}>
                {for GridSize::ALL.iter().map(|size| html! {
                    <option
                        value={size.cells().to_string()}
                        selected={*size == props.grid_size}
                    >
                        {size.label()}
                    </option>
                })}
            </select>
        </div>
    }
}

/// Option values are cell counts; anything else falls back like the server does
fn parse_size(value: &str) -> GridSize {
    GridSize::from_cells(value.trim().parse().unwrap_or_default())
}
