//! Core types for the customizable dashboard.
//!
//! This crate defines the card model, grid snapping, drag sessions and the
//! layout store shared by the dashboard frontend. It has no browser
//! dependency so every rule here is testable natively.

mod drag;
mod layout;

pub use drag::{DragKind, DragSession, PointerInput, PointerPhase, PointerStep};
pub use layout::DashboardLayout;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default grid cell size in pixels.
pub const GRID_SIZE: u32 = 20;

/// Errors from layout store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Duplicate card id: {0}")]
    DuplicateCard(String),
}

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Dashboard geometry settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Snap grid cell in pixels
    pub grid_size: u32,
    /// Pixel width of one size unit
    pub column_width: u32,
    /// Pixel height of one size unit
    pub row_height: u32,
    /// Widest a card may be resized to, in columns
    pub max_columns: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            column_width: 100,
            row_height: 200,
            max_columns: 12,
        }
    }
}

impl DashboardConfig {
    /// Pixel position of a grid cell in column/row units.
    pub fn cell_origin(&self, col: u32, row: u32) -> Position {
        Position::new(
            col.saturating_mul(self.column_width),
            row.saturating_mul(self.row_height),
        )
    }
}

/// Raw pointer coordinates in client pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Card position in canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Card size in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A single dashboard card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique card identifier
    pub id: String,
    /// Display title shown in the editing header
    pub title: String,
    /// Top-left corner in pixels
    pub position: Position,
    /// Size in grid units
    pub size: Size,
    /// Whether the card is shown outside customize mode
    pub visible: bool,
    /// Display order, lowest first
    pub order: u32,
}

impl Card {
    /// Create a visible card at the canvas origin.
    pub fn new(id: impl Into<String>, title: impl Into<String>, size: Size, order: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            position: Position::default(),
            size,
            visible: true,
            order,
        }
    }

    /// Builder-style position override.
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// Whether the dashboard is being edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomizationMode {
    #[default]
    Viewing,
    Customizing,
}

impl CustomizationMode {
    pub fn is_customizing(self) -> bool {
        self == CustomizationMode::Customizing
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            CustomizationMode::Viewing => CustomizationMode::Customizing,
            CustomizationMode::Customizing => CustomizationMode::Viewing,
        }
    }

    /// Label of the button that leaves this mode.
    pub fn action_label(self) -> &'static str {
        match self {
            CustomizationMode::Viewing => "Customize",
            CustomizationMode::Customizing => "Save Layout",
        }
    }
}

/// How a card container renders for a given visibility and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPresence {
    /// No output at all.
    Omitted,
    /// Normal rendering.
    Shown,
    /// Hidden card kept editable at reduced opacity.
    Ghost,
}

impl CardPresence {
    pub fn of(visible: bool, mode: CustomizationMode) -> Self {
        match (visible, mode.is_customizing()) {
            (true, _) => CardPresence::Shown,
            (false, true) => CardPresence::Ghost,
            (false, false) => CardPresence::Omitted,
        }
    }

    pub fn is_rendered(self) -> bool {
        self != CardPresence::Omitted
    }

    pub fn opacity(self) -> f32 {
        match self {
            CardPresence::Ghost => 0.5,
            _ => 1.0,
        }
    }
}

/// Snap one raw pixel coordinate to the grid, flooring at zero.
///
/// Non-finite input snaps to zero.
pub fn snap_axis(raw: f64, grid: u32) -> u32 {
    if grid == 0 {
        return 0;
    }
    let cells = (raw / f64::from(grid)).round();
    if cells.is_nan() || cells <= 0.0 {
        return 0;
    }
    // `as` saturates for out-of-range floats
    (cells as u32).saturating_mul(grid)
}

/// Snap a raw top-left corner to the grid.
pub fn snap_to_grid(raw: Point, grid: u32) -> Position {
    Position::new(snap_axis(raw.x, grid), snap_axis(raw.y, grid))
}

/// Receiver of card container events.
///
/// Implemented by whoever owns the authoritative card list.
pub trait CardHost {
    fn reposition(&mut self, position: Position);
    fn resize(&mut self, size: Size);
    fn set_visible(&mut self, visible: bool);
    fn drag_start(&mut self);
    fn drag_end(&mut self);
}

/// Receiver of customization panel commands.
pub trait LayoutHost {
    fn toggle_mode(&mut self);
    fn toggle_visibility(&mut self, card_id: &str);
    fn reset_layout(&mut self);

    /// Move a card to a new display order. Hosts without ordering ignore it.
    fn reorder_card(&mut self, _card_id: &str, _order: u32) {}
}

/// Cards split by visibility, for display only.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a> {
    pub visible: Vec<&'a Card>,
    pub hidden: Vec<&'a Card>,
}

impl<'a> Partition<'a> {
    pub fn of(cards: &'a [Card]) -> Self {
        let (visible, hidden): (Vec<&Card>, Vec<&Card>) =
            cards.iter().partition(|card| card.visible);
        Self { visible, hidden }
    }

    pub fn total(&self) -> usize {
        self.visible.len() + self.hidden.len()
    }

    /// Compact summary shown outside customize mode.
    pub fn summary(&self) -> String {
        format!(
            "Currently showing {} of {} available cards",
            self.visible.len(),
            self.total()
        )
    }
}
