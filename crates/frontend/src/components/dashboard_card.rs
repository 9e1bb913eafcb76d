//! Draggable, resizable card container.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use layout_types::{
    CardHost, CardPresence, CustomizationMode, DashboardConfig, DragKind, DragSession, Point,
    PointerInput, PointerPhase, PointerStep, Position, Size,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};
use yew::prelude::*;

/// Properties for DashboardCard component.
#[derive(Properties, PartialEq)]
pub struct DashboardCardProps {
    pub id: AttrValue,
    pub title: AttrValue,
    #[prop_or_default]
    pub children: Html,
    pub position: Position,
    pub size: Size,
    pub visible: bool,
    /// Whether the parent reports a drag in progress
    #[prop_or_default]
    pub dragging: bool,
    pub mode: CustomizationMode,
    pub on_position_change: Callback<Position>,
    pub on_size_change: Callback<Size>,
    pub on_visibility_toggle: Callback<()>,
    pub on_drag_start: Callback<()>,
    pub on_drag_end: Callback<()>,
}

/// Card events routed to the parent's callbacks.
#[derive(Clone, PartialEq)]
pub struct CardCallbacks {
    visible: bool,
    on_position_change: Callback<Position>,
    on_size_change: Callback<Size>,
    on_visibility_toggle: Callback<()>,
    on_drag_start: Callback<()>,
    on_drag_end: Callback<()>,
}

impl CardCallbacks {
    pub fn from_props(props: &DashboardCardProps) -> Self {
        Self {
            visible: props.visible,
            on_position_change: props.on_position_change.clone(),
            on_size_change: props.on_size_change.clone(),
            on_visibility_toggle: props.on_visibility_toggle.clone(),
            on_drag_start: props.on_drag_start.clone(),
            on_drag_end: props.on_drag_end.clone(),
        }
    }
}

impl CardHost for CardCallbacks {
    fn reposition(&mut self, position: Position) {
        self.on_position_change.emit(position);
    }

    fn resize(&mut self, size: Size) {
        self.on_size_change.emit(size);
    }

    // The parent only knows how to toggle.
    fn set_visible(&mut self, visible: bool) {
        if visible != self.visible {
            self.visible = visible;
            self.on_visibility_toggle.emit(());
        }
    }

    fn drag_start(&mut self) {
        self.on_drag_start.emit(());
    }

    fn drag_end(&mut self) {
        self.on_drag_end.emit(());
    }
}

/// Inline frame style. Only customize mode positions cards absolutely.
pub fn frame_style(
    position: Position,
    size: Size,
    presence: CardPresence,
    mode: CustomizationMode,
    lifted: bool,
    config: &DashboardConfig,
) -> String {
    if !mode.is_customizing() {
        return String::new();
    }

    let (z_index, scale, transition) = if lifted {
        (1000, "1.05", "none")
    } else {
        (1, "1", "all 0.2s ease")
    };

    format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
         z-index: {}; opacity: {}; transform: scale({}); transition: {};",
        position.x,
        position.y,
        size.width.saturating_mul(config.column_width),
        size.height.saturating_mul(config.row_height),
        z_index,
        presence.opacity(),
        scale,
        transition,
    )
}

fn pointer_of(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn pointer_input(event: &Event) -> Option<PointerInput> {
    let event = event.dyn_ref::<PointerEvent>()?;
    let phase = match event.type_().as_str() {
        "pointermove" => PointerPhase::Move,
        "pointerup" => PointerPhase::Up,
        "pointercancel" => PointerPhase::Cancel,
        _ => return None,
    };
    Some(PointerInput {
        pointer_id: event.pointer_id(),
        phase,
        point: pointer_of(event),
        buttons: event.buttons(),
    })
}

/// Document listeners for one active session. Dropping them detaches them.
fn session_listeners(
    document: &Document,
    session: Rc<RefCell<Option<DragSession>>>,
    lifted: UseStateHandle<bool>,
    callbacks: CardCallbacks,
) -> Vec<EventListener> {
    ["pointermove", "pointerup", "pointercancel"]
        .into_iter()
        .map(|event_type| {
            let session = session.clone();
            let lifted = lifted.clone();
            let mut host = callbacks.clone();

            EventListener::new_with_options(
                document,
                event_type,
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    let Some(input) = pointer_input(event) else {
                        return;
                    };
                    let step = match session.borrow().as_ref() {
                        Some(active) => active.step(&input),
                        None => return,
                    };

                    match step {
                        PointerStep::Ignore => {}
                        PointerStep::Move(point) => {
                            event.prevent_default();
                            if let Some(active) = session.borrow().as_ref() {
                                active.pointer_moved(&mut host, point);
                            }
                        }
                        PointerStep::Release => {
                            let released = session.borrow_mut().take();
                            if let Some(active) = released {
                                active.release(&mut host);
                                lifted.set(false);
                            }
                        }
                    }
                },
            )
        })
        .collect()
}

/// Dashboard card container component.
#[function_component(DashboardCard)]
pub fn dashboard_card(props: &DashboardCardProps) -> Html {
    let config = use_context::<DashboardConfig>().unwrap_or_default();
    let card_ref = use_node_ref();
    let session = use_mut_ref(|| None::<DragSession>);
    let lifted = use_state(|| false);
    let callbacks = CardCallbacks::from_props(props);

    // Listeners exist only while this card holds a session.
    {
        let session = session.clone();
        let lifted = lifted.clone();
        let callbacks = callbacks.clone();

        use_effect_with((*lifted, props.mode), move |&(active, mode)| {
            let mut listeners = Vec::new();
            if active && !mode.is_customizing() {
                session.borrow_mut().take();
                lifted.set(false);
            } else if active {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    listeners = session_listeners(&document, session, lifted, callbacks);
                }
            }
            move || drop(listeners)
        });
    }

    let presence = CardPresence::of(props.visible, props.mode);
    if !presence.is_rendered() {
        return html! {};
    }

    let customizing = props.mode.is_customizing();

    let begin_drag = {
        let session = session.clone();
        let lifted = lifted.clone();
        let card_ref = card_ref.clone();
        let callbacks = callbacks.clone();
        let id = props.id.clone();
        let mode = props.mode;

        move |kind: DragKind| {
            let session = session.clone();
            let lifted = lifted.clone();
            let card_ref = card_ref.clone();
            let callbacks = callbacks.clone();
            let id = id.clone();

            Callback::from(move |event: PointerEvent| {
                if !mode.is_customizing() {
                    return;
                }
                event.prevent_default();

                // Keep receiving this pointer's events outside the window.
                if let Some(target) = event.target_dyn_into::<Element>() {
                    if let Err(err) = target.set_pointer_capture(event.pointer_id()) {
                        log::debug!("pointer capture unavailable: {:?}", err);
                    }
                }

                let origin = card_ref.cast::<Element>().map(|el| {
                    let rect = el.get_bounding_client_rect();
                    Point::new(rect.left(), rect.top())
                });
                let mut host = callbacks.clone();
                let started = DragSession::begin(
                    &mut host,
                    id.to_string(),
                    kind,
                    pointer_of(&event),
                    origin,
                    config,
                )
                .with_pointer_id(event.pointer_id());
                *session.borrow_mut() = Some(started);
                lifted.set(true);
            })
        }
    };

    let on_toggle_visibility = {
        let callbacks = callbacks.clone();
        let visible = props.visible;
        Callback::from(move |_: MouseEvent| {
            let mut host = callbacks.clone();
            host.set_visible(!visible);
        })
    };

    let style = frame_style(
        props.position,
        props.size,
        presence,
        props.mode,
        *lifted,
        &config,
    );
    let class = classes!(
        "dashboard-card",
        customizing.then_some("editing"),
        (presence == CardPresence::Ghost).then_some("ghost"),
        (*lifted).then_some("lifted"),
        (props.dragging && !*lifted).then_some("drag-elsewhere"),
    );

    html! {
        <div ref={card_ref} class={class} style={style} data-card-id={props.id.clone()}>
            if customizing {
                <div class="card-edit-header">
                    <div class="card-edit-title">
                        <button
                            class="card-grip"
                            title="Drag to move"
                            onpointerdown={begin_drag(DragKind::Move)}
                        >
                            {"⠿"}
                        </button>
                        <span>{ props.title.clone() }</span>
                    </div>
                    <button class="card-visibility" onclick={on_toggle_visibility}>
                        { if props.visible { "Hide" } else { "Show" } }
                    </button>
                </div>
            }
            <div class={classes!("card-body", customizing.then_some("inert"))}>
                { props.children.clone() }
            </div>
            if customizing {
                <div
                    class="card-resize-handle"
                    title="Drag to resize"
                    onpointerdown={begin_drag(DragKind::Resize)}
                />
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, Callback<T>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, Callback::from(move |value: T| sink.borrow_mut().push(value)))
    }

    struct Recorded {
        positions: Rc<RefCell<Vec<Position>>>,
        sizes: Rc<RefCell<Vec<Size>>>,
        toggles: Rc<RefCell<Vec<()>>>,
        starts: Rc<RefCell<Vec<()>>>,
        ends: Rc<RefCell<Vec<()>>>,
    }

    fn callbacks(visible: bool) -> (CardCallbacks, Recorded) {
        let (positions, on_position_change) = recorder();
        let (sizes, on_size_change) = recorder();
        let (toggles, on_visibility_toggle) = recorder();
        let (starts, on_drag_start) = recorder();
        let (ends, on_drag_end) = recorder();
        (
            CardCallbacks {
                visible,
                on_position_change,
                on_size_change,
                on_visibility_toggle,
                on_drag_start,
                on_drag_end,
            },
            Recorded {
                positions,
                sizes,
                toggles,
                starts,
                ends,
            },
        )
    }

    #[test]
    fn test_drag_session_drives_callbacks() {
        let (mut host, seen) = callbacks(true);

        let session = DragSession::begin(
            &mut host,
            "pl-cards",
            DragKind::Move,
            Point::new(105.0, 205.0),
            Some(Point::new(100.0, 200.0)),
            DashboardConfig::default(),
        );
        session.pointer_moved(&mut host, Point::new(127.0, 223.0));
        session.pointer_moved(&mut host, Point::new(-50.0, 223.0));
        session.release(&mut host);

        assert_eq!(seen.starts.borrow().len(), 1);
        assert_eq!(
            *seen.positions.borrow(),
            vec![Position::new(120, 220), Position::new(0, 220)]
        );
        assert_eq!(seen.ends.borrow().len(), 1);
        assert!(seen.sizes.borrow().is_empty());
    }

    #[test]
    fn test_set_visible_emits_only_on_change() {
        let (mut host, seen) = callbacks(true);

        host.set_visible(true);
        assert!(seen.toggles.borrow().is_empty());

        host.set_visible(false);
        host.set_visible(false);
        assert_eq!(seen.toggles.borrow().len(), 1);
    }

    #[test]
    fn test_resize_routes_to_size_callback() {
        let (mut host, seen) = callbacks(true);

        host.resize(Size::new(4, 2));

        assert_eq!(*seen.sizes.borrow(), vec![Size::new(4, 2)]);
    }

    #[test]
    fn test_frame_style_empty_when_viewing() {
        let style = frame_style(
            Position::new(40, 60),
            Size::new(4, 2),
            CardPresence::Shown,
            CustomizationMode::Viewing,
            false,
            &DashboardConfig::default(),
        );

        assert!(style.is_empty());
    }

    #[test]
    fn test_frame_style_when_customizing() {
        let config = DashboardConfig::default();
        let style = frame_style(
            Position::new(40, 60),
            Size::new(4, 2),
            CardPresence::Ghost,
            CustomizationMode::Customizing,
            false,
            &config,
        );

        assert!(style.contains("left: 40px"));
        assert!(style.contains("top: 60px"));
        assert!(style.contains("width: 400px"));
        assert!(style.contains("height: 400px"));
        assert!(style.contains("opacity: 0.5"));
        assert!(style.contains("scale(1)"));

        let lifted = frame_style(
            Position::new(40, 60),
            Size::new(4, 2),
            CardPresence::Shown,
            CustomizationMode::Customizing,
            true,
            &config,
        );
        assert!(lifted.contains("z-index: 1000"));
        assert!(lifted.contains("scale(1.05)"));
        assert!(lifted.contains("opacity: 1"));
    }
}
