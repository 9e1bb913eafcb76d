//! Pointer drag sessions.
//!
//! A session is acquired on pointer-down, fed every pointer-move, and
//! consumed on release. Everything it reports goes through a [`CardHost`].
//! A session started by one pointer ignores events from any other pointer.

use crate::{CardHost, DashboardConfig, Point, Position, Size, snap_to_grid};

/// What a drag session changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Grip drag, reports grid-snapped positions.
    Move,
    /// Corner drag, reports sizes in grid units.
    Resize,
}

/// Which document pointer event an input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Move,
    Up,
    Cancel,
}

/// A document pointer event, reduced to what a session needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pointer_id: i32,
    pub phase: PointerPhase,
    pub point: Point,
    /// Pressed-buttons bitmask, 0 when nothing is held
    pub buttons: u16,
}

/// What a session does with one [`PointerInput`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerStep {
    /// Another pointer's event.
    Ignore,
    /// Report a candidate for this point.
    Move(Point),
    /// The drag is over.
    Release,
}

/// State of one active pointer drag on a card.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    card_id: String,
    kind: DragKind,
    offset: Point,
    origin: Point,
    pointer_id: Option<i32>,
    config: DashboardConfig,
}

impl DragSession {
    /// Start a drag and notify the host.
    ///
    /// `card_origin` is the card's top-left corner in client pixels. When it
    /// is unavailable the pointer offset is the zero vector.
    pub fn begin<H: CardHost>(
        host: &mut H,
        card_id: impl Into<String>,
        kind: DragKind,
        pointer: Point,
        card_origin: Option<Point>,
        config: DashboardConfig,
    ) -> Self {
        let origin = card_origin.unwrap_or_default();
        let offset = card_origin
            .map(|o| Point::new(pointer.x - o.x, pointer.y - o.y))
            .unwrap_or_default();

        let session = Self {
            card_id: card_id.into(),
            kind,
            offset,
            origin,
            pointer_id: None,
            config,
        };
        log::debug!(
            "drag start: card={} kind={:?} offset=({}, {})",
            session.card_id,
            kind,
            offset.x,
            offset.y
        );
        host.drag_start();
        session
    }

    /// Bind the session to the pointer that started it.
    pub fn with_pointer_id(mut self, pointer_id: i32) -> Self {
        self.pointer_id = Some(pointer_id);
        self
    }

    /// The owning pointer, if the session is bound to one.
    pub fn pointer_id(&self) -> Option<i32> {
        self.pointer_id
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn kind(&self) -> DragKind {
        self.kind
    }

    /// Pointer offset inside the card at drag start.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Snapped position for a pointer at `pointer`.
    pub fn candidate_position(&self, pointer: Point) -> Position {
        snap_to_grid(
            Point::new(pointer.x - self.offset.x, pointer.y - self.offset.y),
            self.config.grid_size,
        )
    }

    /// Size in grid units for a resize handle at `pointer`.
    pub fn candidate_size(&self, pointer: Point) -> Size {
        let max_columns = self.config.max_columns.max(1);
        Size::new(
            grid_units(pointer.x - self.origin.x, self.config.column_width, max_columns),
            grid_units(pointer.y - self.origin.y, self.config.row_height, u32::MAX),
        )
    }

    /// Classify a document pointer event.
    ///
    /// Up and cancel end the drag, and so does a move with no button held,
    /// which is how a release outside the window shows up.
    pub fn step(&self, input: &PointerInput) -> PointerStep {
        if self.pointer_id.is_some_and(|id| id != input.pointer_id) {
            return PointerStep::Ignore;
        }
        match input.phase {
            PointerPhase::Up | PointerPhase::Cancel => PointerStep::Release,
            PointerPhase::Move if input.buttons == 0 => PointerStep::Release,
            PointerPhase::Move => PointerStep::Move(input.point),
        }
    }

    /// Report the candidate for this pointer-move. Every move is reported.
    pub fn pointer_moved<H: CardHost>(&self, host: &mut H, pointer: Point) {
        match self.kind {
            DragKind::Move => host.reposition(self.candidate_position(pointer)),
            DragKind::Resize => host.resize(self.candidate_size(pointer)),
        }
    }

    /// End the drag and notify the host.
    pub fn release<H: CardHost>(self, host: &mut H) {
        log::debug!("drag end: card={} kind={:?}", self.card_id, self.kind);
        host.drag_end();
    }
}

/// Round a pixel extent to whole units, at least one and at most `max`.
fn grid_units(extent: f64, unit: u32, max: u32) -> u32 {
    if unit == 0 {
        return 1;
    }
    let units = (extent / f64::from(unit)).round();
    if units.is_nan() || units < 1.0 {
        return 1;
    }
    (units as u32).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GRID_SIZE;

    #[derive(Debug, Clone, PartialEq)]
    enum HostEvent {
        Reposition(Position),
        Resize(Size),
        Visible(bool),
        DragStart,
        DragEnd,
    }

    #[derive(Default)]
    struct RecordingHost {
        events: Vec<HostEvent>,
    }

    impl CardHost for RecordingHost {
        fn reposition(&mut self, position: Position) {
            self.events.push(HostEvent::Reposition(position));
        }

        fn resize(&mut self, size: Size) {
            self.events.push(HostEvent::Resize(size));
        }

        fn set_visible(&mut self, visible: bool) {
            self.events.push(HostEvent::Visible(visible));
        }

        fn drag_start(&mut self) {
            self.events.push(HostEvent::DragStart);
        }

        fn drag_end(&mut self) {
            self.events.push(HostEvent::DragEnd);
        }
    }

    fn begin_move(host: &mut RecordingHost, pointer: Point, origin: Option<Point>) -> DragSession {
        DragSession::begin(
            host,
            "recent-trades",
            DragKind::Move,
            pointer,
            origin,
            DashboardConfig::default(),
        )
    }

    #[test]
    fn test_offset_and_first_move() {
        let mut host = RecordingHost::default();
        let session = begin_move(
            &mut host,
            Point::new(105.0, 205.0),
            Some(Point::new(100.0, 200.0)),
        );

        assert_eq!(session.offset(), Point::new(5.0, 5.0));

        session.pointer_moved(&mut host, Point::new(127.0, 223.0));

        assert_eq!(
            host.events,
            vec![
                HostEvent::DragStart,
                HostEvent::Reposition(Position::new(120, 220)),
            ]
        );
    }

    #[test]
    fn test_missing_rect_uses_zero_offset() {
        let mut host = RecordingHost::default();
        let session = begin_move(&mut host, Point::new(105.0, 205.0), None);

        assert_eq!(session.offset(), Point::default());
        assert_eq!(
            session.candidate_position(Point::new(105.0, 205.0)),
            Position::new(100, 200)
        );
    }

    #[test]
    fn test_every_move_is_reported_and_snapped() {
        let mut host = RecordingHost::default();
        let session = begin_move(
            &mut host,
            Point::new(50.0, 50.0),
            Some(Point::new(40.0, 40.0)),
        );

        let path = [
            (-300.0, -10.0),
            (0.0, 0.0),
            (13.0, 7.0),
            (33.3, 99.9),
            (451.0, 12.0),
            (1999.0, 4.0),
        ];
        for (x, y) in path {
            session.pointer_moved(&mut host, Point::new(x, y));
        }

        let positions: Vec<Position> = host
            .events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Reposition(p) => Some(*p),
                _ => None,
            })
            .collect();

        assert_eq!(positions.len(), path.len());
        for p in positions {
            assert_eq!(p.x % GRID_SIZE, 0);
            assert_eq!(p.y % GRID_SIZE, 0);
        }
    }

    #[test]
    fn test_pointer_left_of_canvas_clamps_to_zero() {
        let mut host = RecordingHost::default();
        let session = begin_move(
            &mut host,
            Point::new(10.0, 10.0),
            Some(Point::new(0.0, 0.0)),
        );

        assert_eq!(
            session.candidate_position(Point::new(-400.0, 3.0)),
            Position::new(0, 0)
        );
    }

    #[test]
    fn test_release_notifies_drag_end() {
        let mut host = RecordingHost::default();
        let session = begin_move(&mut host, Point::default(), None);

        session.release(&mut host);

        assert_eq!(host.events, vec![HostEvent::DragStart, HostEvent::DragEnd]);
    }

    fn input(pointer_id: i32, phase: PointerPhase, buttons: u16) -> PointerInput {
        PointerInput {
            pointer_id,
            phase,
            point: Point::new(127.0, 223.0),
            buttons,
        }
    }

    #[test]
    fn test_step_moves_while_button_held() {
        let mut host = RecordingHost::default();
        let session = begin_move(&mut host, Point::default(), None).with_pointer_id(3);

        assert_eq!(session.pointer_id(), Some(3));
        assert_eq!(
            session.step(&input(3, PointerPhase::Move, 1)),
            PointerStep::Move(Point::new(127.0, 223.0))
        );
    }

    #[test]
    fn test_step_releases_on_up_cancel_and_buttonless_move() {
        let mut host = RecordingHost::default();
        let session = begin_move(&mut host, Point::default(), None).with_pointer_id(3);

        assert_eq!(session.step(&input(3, PointerPhase::Up, 0)), PointerStep::Release);
        assert_eq!(session.step(&input(3, PointerPhase::Cancel, 1)), PointerStep::Release);
        assert_eq!(session.step(&input(3, PointerPhase::Move, 0)), PointerStep::Release);
    }

    #[test]
    fn test_step_ignores_other_pointers() {
        let mut host = RecordingHost::default();
        let session = begin_move(&mut host, Point::default(), None).with_pointer_id(3);

        assert_eq!(session.step(&input(7, PointerPhase::Move, 1)), PointerStep::Ignore);
        assert_eq!(session.step(&input(7, PointerPhase::Up, 0)), PointerStep::Ignore);
        assert_eq!(session.step(&input(7, PointerPhase::Cancel, 0)), PointerStep::Ignore);
    }

    #[test]
    fn test_unbound_session_accepts_any_pointer() {
        let mut host = RecordingHost::default();
        let session = begin_move(&mut host, Point::default(), None);

        assert_eq!(session.pointer_id(), None);
        assert_eq!(
            session.step(&input(42, PointerPhase::Move, 1)),
            PointerStep::Move(Point::new(127.0, 223.0))
        );
    }

    #[test]
    fn test_resize_reports_grid_units() {
        let mut host = RecordingHost::default();
        let session = DragSession::begin(
            &mut host,
            "pl-cards",
            DragKind::Resize,
            Point::new(500.0, 300.0),
            Some(Point::new(100.0, 100.0)),
            DashboardConfig::default(),
        );

        session.pointer_moved(&mut host, Point::new(540.0, 520.0));

        assert_eq!(host.events[1], HostEvent::Resize(Size::new(4, 2)));
        assert_eq!(session.kind(), DragKind::Resize);
        assert_eq!(session.card_id(), "pl-cards");
    }

    #[test]
    fn test_resize_is_bounded() {
        let mut host = RecordingHost::default();
        let session = DragSession::begin(
            &mut host,
            "pl-cards",
            DragKind::Resize,
            Point::default(),
            Some(Point::default()),
            DashboardConfig::default(),
        );

        assert_eq!(
            session.candidate_size(Point::new(-50.0, -50.0)),
            Size::new(1, 1)
        );
        assert_eq!(
            session.candidate_size(Point::new(10_000.0, 1_000.0)),
            Size::new(12, 5)
        );
    }
}
