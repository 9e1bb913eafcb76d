//! Customization panel: mode switch, visibility lists and reset.

use layout_types::{Card, CustomizationMode, LayoutHost, Partition};
use yew::prelude::*;

/// Properties for DashboardCustomizer component.
#[derive(Properties, PartialEq)]
pub struct DashboardCustomizerProps {
    pub cards: Vec<Card>,
    pub mode: CustomizationMode,
    pub on_toggle_customization: Callback<()>,
    pub on_toggle_card_visibility: Callback<String>,
    pub on_reset_layout: Callback<()>,
    #[prop_or_default]
    pub on_reorder_card: Callback<(String, u32)>,
}

/// Panel commands routed to the parent's callbacks.
#[derive(Clone, PartialEq)]
pub struct PanelCallbacks {
    on_toggle_customization: Callback<()>,
    on_toggle_card_visibility: Callback<String>,
    on_reset_layout: Callback<()>,
    on_reorder_card: Callback<(String, u32)>,
}

impl PanelCallbacks {
    pub fn from_props(props: &DashboardCustomizerProps) -> Self {
        Self {
            on_toggle_customization: props.on_toggle_customization.clone(),
            on_toggle_card_visibility: props.on_toggle_card_visibility.clone(),
            on_reset_layout: props.on_reset_layout.clone(),
            on_reorder_card: props.on_reorder_card.clone(),
        }
    }
}

impl LayoutHost for PanelCallbacks {
    fn toggle_mode(&mut self) {
        self.on_toggle_customization.emit(());
    }

    fn toggle_visibility(&mut self, card_id: &str) {
        self.on_toggle_card_visibility.emit(card_id.to_string());
    }

    fn reset_layout(&mut self) {
        self.on_reset_layout.emit(());
    }

    fn reorder_card(&mut self, card_id: &str, order: u32) {
        self.on_reorder_card.emit((card_id.to_string(), order));
    }
}

fn card_row(card: &Card, panel: &PanelCallbacks) -> Html {
    let onclick = {
        let panel = panel.clone();
        let id = card.id.clone();
        Callback::from(move |_: MouseEvent| {
            let mut host = panel.clone();
            host.toggle_visibility(&id);
        })
    };

    let on_move_up = {
        let panel = panel.clone();
        let id = card.id.clone();
        let order = card.order.saturating_sub(1);
        Callback::from(move |_: MouseEvent| {
            let mut host = panel.clone();
            host.reorder_card(&id, order);
        })
    };

    let (row_class, label) = if card.visible {
        ("card-row", "Hide")
    } else {
        ("card-row muted", "Show")
    };

    html! {
        <div key={card.id.clone()} class={row_class}>
            <span class="card-row-title">{ &card.title }</span>
            if card.visible {
                <button
                    class="card-row-up"
                    title="Move up"
                    disabled={card.order == 0}
                    onclick={on_move_up}
                >
                    {"↑"}
                </button>
            }
            <button class="card-row-toggle" {onclick}>{ label }</button>
        </div>
    }
}

/// Dashboard customization panel component.
#[function_component(DashboardCustomizer)]
pub fn dashboard_customizer(props: &DashboardCustomizerProps) -> Html {
    let panel = PanelCallbacks::from_props(props);
    let partition = Partition::of(&props.cards);
    let customizing = props.mode.is_customizing();

    let on_reset = {
        let panel = panel.clone();
        Callback::from(move |_: MouseEvent| {
            let mut host = panel.clone();
            host.reset_layout();
        })
    };

    let on_toggle_mode = {
        let panel = panel.clone();
        Callback::from(move |_: MouseEvent| {
            let mut host = panel.clone();
            host.toggle_mode();
        })
    };

    let mode_class = if customizing {
        "btn btn-save"
    } else {
        "btn btn-primary"
    };

    html! {
        <div class="card customizer">
            <div class="card-header">
                <h2 class="card-title">{"Dashboard Customization"}</h2>
                <div class="customizer-actions">
                    <button class="btn btn-secondary" onclick={on_reset}>{"Reset"}</button>
                    <button class={mode_class} onclick={on_toggle_mode}>
                        { props.mode.action_label() }
                    </button>
                </div>
            </div>

            if customizing {
                <>
                <div class="customizer-banner">
                    <strong>{"Customization Mode Active"}</strong>
                    <p>
                        {"Drag cards to reposition them, toggle visibility, or reset to default layout. \
                          Click \"Save Layout\" when you're done customizing."}
                    </p>
                </div>
                <div class="customizer-columns">
                    <div>
                        <h4>{ format!("Visible Cards ({})", partition.visible.len()) }</h4>
                        { for partition.visible.iter().map(|card| card_row(card, &panel)) }
                    </div>
                    <div>
                        <h4>{ format!("Hidden Cards ({})", partition.hidden.len()) }</h4>
                        if partition.hidden.is_empty() {
                            <div class="text-secondary">{"All cards are visible"}</div>
                        } else {
                            { for partition.hidden.iter().map(|card| card_row(card, &panel)) }
                        }
                    </div>
                </div>
                </>
            } else {
                <div class="customizer-summary">
                    <p class="text-secondary">
                        {"Customize your dashboard layout by showing/hiding cards and rearranging them to your preference."}
                    </p>
                    <div class="stat-label">{ partition.summary() }</div>
                </div>
            }
        </div>
    }
}
