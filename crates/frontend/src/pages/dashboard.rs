//! Dashboard page: owns the layout and wires cards to the customizer.

use layout_types::{Card, CustomizationMode, DashboardConfig, Position, Size};
use yew::prelude::*;

use crate::components::{DashboardCard, DashboardCustomizer, StatCard};
use crate::state::{DashboardState, LayoutAction};

/// Canvas height in pixels needed to contain every card.
pub fn canvas_height(cards: &[Card], config: &DashboardConfig) -> u32 {
    cards
        .iter()
        .map(|card| {
            card.position
                .y
                .saturating_add(card.size.height.saturating_mul(config.row_height))
        })
        .max()
        .unwrap_or(0)
}

fn card_view(
    card: &Card,
    state: &UseReducerHandle<DashboardState>,
    mode: CustomizationMode,
) -> Html {
    let id = card.id.clone();

    let on_position_change = {
        let state = state.clone();
        let card_id = id.clone();
        Callback::from(move |position: Position| {
            state.dispatch(LayoutAction::Reposition {
                card_id: card_id.clone(),
                position,
            })
        })
    };
    let on_size_change = {
        let state = state.clone();
        let card_id = id.clone();
        Callback::from(move |size: Size| {
            state.dispatch(LayoutAction::Resize {
                card_id: card_id.clone(),
                size,
            })
        })
    };
    let on_visibility_toggle = {
        let state = state.clone();
        let card_id = id.clone();
        Callback::from(move |()| state.dispatch(LayoutAction::ToggleVisibility(card_id.clone())))
    };
    let on_drag_start = {
        let state = state.clone();
        let card_id = id.clone();
        Callback::from(move |()| state.dispatch(LayoutAction::StartDrag(card_id.clone())))
    };
    let on_drag_end = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(LayoutAction::StopDrag))
    };

    let dragging = state.layout().is_dragging();

    html! {
        <DashboardCard
            key={id.clone()}
            id={id.clone()}
            title={card.title.clone()}
            position={card.position}
            size={card.size}
            visible={card.visible}
            {dragging}
            {mode}
            {on_position_change}
            {on_size_change}
            {on_visibility_toggle}
            {on_drag_start}
            {on_drag_end}
        >
            <div class="card">
                <div class="card-header">
                    <h2 class="card-title">{ &card.title }</h2>
                </div>
                <div class="stats-grid">
                    <StatCard
                        value={format!("{}, {}", card.position.x, card.position.y)}
                        label={"Position (px)"}
                    />
                    <StatCard
                        value={format!("{} x {}", card.size.width, card.size.height)}
                        label={"Size (grid)"}
                    />
                </div>
            </div>
        </DashboardCard>
    }
}

/// Dashboard page component.
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let config = use_context::<DashboardConfig>().unwrap_or_default();
    let state = use_reducer(move || DashboardState::new(&config));
    let layout = state.layout();
    let mode = layout.mode();

    let on_toggle_customization = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(LayoutAction::ToggleMode))
    };
    let on_toggle_card_visibility = {
        let state = state.clone();
        Callback::from(move |card_id: String| {
            state.dispatch(LayoutAction::ToggleVisibility(card_id))
        })
    };
    let on_reset_layout = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(LayoutAction::Reset))
    };
    let on_reorder_card = {
        let state = state.clone();
        Callback::from(move |(card_id, order): (String, u32)| {
            state.dispatch(LayoutAction::Reorder { card_id, order })
        })
    };

    let mut ordered: Vec<&Card> = layout.cards().iter().collect();
    ordered.sort_by_key(|card| card.order);

    let canvas_style = if mode.is_customizing() {
        format!(
            "position: relative; min-height: {}px;",
            canvas_height(layout.cards(), &config)
        )
    } else {
        String::new()
    };

    html! {
        <div>
            <h1>{"Dashboard"}</h1>

            <DashboardCustomizer
                cards={layout.cards().to_vec()}
                {mode}
                {on_toggle_customization}
                {on_toggle_card_visibility}
                {on_reset_layout}
                {on_reorder_card}
            />

            <div
                class={classes!("dashboard-canvas", mode.is_customizing().then_some("editing"))}
                style={canvas_style}
            >
                { for ordered.into_iter().map(|card| card_view(card, &state, mode)) }
            </div>
        </div>
    }
}
