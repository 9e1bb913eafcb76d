//! The authoritative card list behind a dashboard.

use std::collections::HashSet;

use crate::{Card, CustomizationMode, LayoutError, Position, Result, Size};

/// Cards, customization mode and drag tracking for one dashboard view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardLayout {
    defaults: Vec<Card>,
    cards: Vec<Card>,
    mode: CustomizationMode,
    dragged_card: Option<String>,
}

impl DashboardLayout {
    /// Create a layout from its default cards.
    pub fn new(defaults: Vec<Card>) -> Result<Self> {
        let mut seen = HashSet::new();
        for card in &defaults {
            if !seen.insert(card.id.as_str()) {
                return Err(LayoutError::DuplicateCard(card.id.clone()));
            }
        }

        Ok(Self {
            cards: defaults.clone(),
            defaults,
            mode: CustomizationMode::Viewing,
            dragged_card: None,
        })
    }

    /// All cards in their current order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == card_id)
    }

    pub fn mode(&self) -> CustomizationMode {
        self.mode
    }

    pub fn dragged_card(&self) -> Option<&str> {
        self.dragged_card.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged_card.is_some()
    }

    /// Visible cards sorted by display order.
    pub fn visible_cards(&self) -> Vec<&Card> {
        let mut visible: Vec<&Card> = self.cards.iter().filter(|card| card.visible).collect();
        visible.sort_by_key(|card| card.order);
        visible
    }

    pub fn reposition(&mut self, card_id: &str, position: Position) -> Result<()> {
        self.card_mut(card_id)?.position = position;
        Ok(())
    }

    pub fn resize(&mut self, card_id: &str, size: Size) -> Result<()> {
        log::debug!("resize {} to {}x{}", card_id, size.width, size.height);
        self.card_mut(card_id)?.size = size;
        Ok(())
    }

    pub fn set_visible(&mut self, card_id: &str, visible: bool) -> Result<()> {
        self.card_mut(card_id)?.visible = visible;
        Ok(())
    }

    /// Flip a card's visibility, returning the new value.
    pub fn toggle_visibility(&mut self, card_id: &str) -> Result<bool> {
        let card = self.card_mut(card_id)?;
        card.visible = !card.visible;
        log::debug!("card {} visible={}", card_id, card.visible);
        Ok(card.visible)
    }

    /// Move a card to `new_order`.
    ///
    /// Every other card at or after `new_order` shifts back by one, then the
    /// list is re-sorted. Orders are not compacted and stop at `u32::MAX`.
    pub fn reorder(&mut self, card_id: &str, new_order: u32) -> Result<()> {
        let index = self.index_of(card_id)?;
        let mut moved = self.cards.remove(index);

        for card in &mut self.cards {
            if card.order >= new_order {
                card.order = card.order.saturating_add(1);
            }
        }
        moved.order = new_order;
        self.cards.push(moved);
        self.cards.sort_by_key(|card| card.order);
        Ok(())
    }

    /// Restore the default cards. Mode and drag tracking are kept.
    pub fn reset(&mut self) {
        log::debug!("layout reset to {} default cards", self.defaults.len());
        self.cards = self.defaults.clone();
    }

    pub fn start_drag(&mut self, card_id: &str) -> Result<()> {
        self.index_of(card_id)?;
        self.dragged_card = Some(card_id.to_string());
        Ok(())
    }

    pub fn stop_drag(&mut self) {
        self.dragged_card = None;
    }

    /// Enter or leave customize mode. Any active drag is stopped.
    pub fn toggle_mode(&mut self) -> CustomizationMode {
        self.mode = self.mode.toggled();
        self.stop_drag();
        log::debug!("customization mode: {:?}", self.mode);
        self.mode
    }

    fn index_of(&self, card_id: &str) -> Result<usize> {
        self.cards
            .iter()
            .position(|card| card.id == card_id)
            .ok_or_else(|| {
                log::warn!("no card with id {card_id}");
                LayoutError::UnknownCard(card_id.to_string())
            })
    }

    fn card_mut(&mut self, card_id: &str) -> Result<&mut Card> {
        let index = self.index_of(card_id)?;
        Ok(&mut self.cards[index])
    }
}
