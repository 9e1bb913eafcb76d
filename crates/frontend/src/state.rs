//! Dashboard page state driven through `use_reducer`.

use std::rc::Rc;

use layout_types::{Card, DashboardConfig, DashboardLayout, Position, Size};
use yew::prelude::*;

/// Default card deck, laid out on column/row cells.
pub fn default_cards(config: &DashboardConfig) -> Vec<Card> {
    let deck = [
        ("trading-controls", "Trading Controls", (0, 0), Size::new(12, 1)),
        ("hot-pairs-ticker", "Hot Pairs Ticker", (0, 1), Size::new(12, 1)),
        ("pl-cards", "Performance Statistics", (0, 2), Size::new(12, 1)),
        ("recent-trades", "Recent Trading Activity", (0, 4), Size::new(8, 2)),
        ("social-signals", "Social Signal Integration", (8, 4), Size::new(4, 2)),
    ];

    deck.into_iter()
        .zip(0..)
        .map(|((id, title, (col, row), size), order)| {
            Card::new(id, title, size, order).at(config.cell_origin(col, row))
        })
        .collect()
}

/// Layout changes the page can request.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutAction {
    Reposition { card_id: String, position: Position },
    Resize { card_id: String, size: Size },
    ToggleVisibility(String),
    Reorder { card_id: String, order: u32 },
    StartDrag(String),
    StopDrag,
    ToggleMode,
    Reset,
}

/// Reducer state wrapping the layout store.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    layout: DashboardLayout,
}

impl DashboardState {
    pub fn new(config: &DashboardConfig) -> Self {
        let layout = match DashboardLayout::new(default_cards(config)) {
            Ok(layout) => layout,
            Err(err) => {
                log::error!("Default deck rejected: {}", err);
                DashboardLayout::default()
            }
        };
        Self { layout }
    }

    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }
}

impl Reducible for DashboardState {
    type Action = LayoutAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut layout = self.layout.clone();

        let outcome = match action {
            LayoutAction::Reposition { card_id, position } => layout.reposition(&card_id, position),
            LayoutAction::Resize { card_id, size } => layout.resize(&card_id, size),
            LayoutAction::ToggleVisibility(card_id) => {
                layout.toggle_visibility(&card_id).map(|_| ())
            }
            LayoutAction::Reorder { card_id, order } => layout.reorder(&card_id, order),
            LayoutAction::StartDrag(card_id) => layout.start_drag(&card_id),
            LayoutAction::StopDrag => {
                layout.stop_drag();
                Ok(())
            }
            LayoutAction::ToggleMode => {
                layout.toggle_mode();
                Ok(())
            }
            LayoutAction::Reset => {
                layout.reset();
                Ok(())
            }
        };

        if let Err(err) = outcome {
            log::warn!("Layout action ignored: {}", err);
            return self;
        }

        Rc::new(Self { layout })
    }
}
