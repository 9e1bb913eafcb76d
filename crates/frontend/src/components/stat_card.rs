//! Small value/label tile used inside dashboard cards.

use yew::prelude::*;

/// Properties for StatCard component.
#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub value: AttrValue,
    pub label: AttrValue,
}

/// Value/label tile.
#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stat-card">
            <div class="stat-value">{ props.value.clone() }</div>
            <div class="stat-label">{ props.label.clone() }</div>
        </div>
    }
}
