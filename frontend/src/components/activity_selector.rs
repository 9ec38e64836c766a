use shared::Activity;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ActivitySelectorProps {
    pub activities: Vec<Activity>,
    pub selected: Option<Activity>,
    pub on_select: Callback<Activity>,
}

#[function_component(ActivitySelector)]
pub fn activity_selector(props: &ActivitySelectorProps) -> Html {
    let selected_id = props.selected.as_ref().map(|activity| activity.id);

    html! {
        <section class="activity-selector">
            <h3>{"Select Activity"}</h3>
            <div class="activity-list">
                {for props.activities.iter().filter(|activity| activity.is_active).map(|activity| {
                    let is_selected = selected_id == Some(activity.id);
                    let class = if is_selected { "activity-button selected" } else { "activity-button" };

                    let onclick = {
                        let on_select = props.on_select.clone();
                        let activity = activity.clone();
                        Callback::from(move |_: MouseEvent| on_select.emit(activity.clone()))
                    };

                    html! {
                        <button
                            key={activity.id}
                            {class}
                            style={format!("border-color: {};", activity.color)}
                            title={activity.description.clone()}
                            {onclick}
                        >
                            <span class="activity-icon">{&activity.icon}</span>
                            <span class="activity-name">{&activity.name}</span>
                        </button>
                    }
                })}
            </div>
        </section>
    }
}
