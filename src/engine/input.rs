//! Keyboard, mouse and touch input
//!
//! DOM listeners push `InputEvent`s into an unbounded channel, the game loop
//! drains it once per animation frame so the simulation only ever sees input
//! between frames.
use crate::browser;
use crate::engine::Point;
use anyhow::{anyhow, Result};
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use std::collections::HashSet;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Pointer activity in canvas pixel coordinates
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub phase: PointerPhase,
    pub position: Point,
}

pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    Pointer(PointerEvent),
}

/// Keys held down, keyed by `KeyboardEvent.code` ("KeyW", "Space", ...)
/// - `is_pressed` : held right now
/// - `was_pressed` : went down since the last simulation step
#[derive(Debug, Default)]
pub struct KeyState {
    pressed: HashSet<String>,
    just_pressed: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        KeyState::default()
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }

    pub fn was_pressed(&self, code: &str) -> bool {
        self.just_pressed.contains(code)
    }

    pub fn set_pressed(&mut self, code: &str) {
        // key repeat fires keydown again, that is not a new press
        if self.pressed.insert(code.to_string()) {
            self.just_pressed.insert(code.to_string());
        }
    }

    pub fn set_released(&mut self, code: &str) {
        self.pressed.remove(code);
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}

pub fn process_input(
    keystate: &mut KeyState,
    pointer_events: &mut Vec<PointerEvent>,
    receiver: &mut UnboundedReceiver<InputEvent>,
) {
    // try_next : Ok(Some) event, Ok(None) channel closed, Err nothing queued
    while let Ok(Some(event)) = receiver.try_next() {
        match event {
            InputEvent::KeyDown(code) => keystate.set_pressed(&code),
            InputEvent::KeyUp(code) => keystate.set_released(&code),
            InputEvent::Pointer(pointer) => pointer_events.push(pointer),
        }
    }
}

/// Map a client (viewport) position into canvas pixels
/// - the canvas is usually scaled by CSS so the two differ
pub fn normalize_coords(
    client: Point,
    bounding: (f32, f32, f32, f32),
    canvas: (f32, f32),
) -> Point {
    let (left, top, width, height) = bounding;
    let scale_x = if width > 0.0 { canvas.0 / width } else { 1.0 };
    let scale_y = if height > 0.0 { canvas.1 / height } else { 1.0 };
    Point {
        x: (client.x - left) * scale_x,
        y: (client.y - top) * scale_y,
    }
}

fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Point {
    let rect = canvas.get_bounding_client_rect();
    normalize_coords(
        Point::new(client_x as f32, client_y as f32),
        (
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ),
        (canvas.width() as f32, canvas.height() as f32),
    )
}

/// Wire every listener the game needs and hand back the receiving end
/// - keyboard and pointer-up/move go on window so releases outside the
///   canvas are not lost
/// - pointer-down goes on the canvas so clicking the page margin does
///   not attack
/// - listeners live for the life of the page, so the closures are forgotten
pub fn prepare_input() -> Result<UnboundedReceiver<InputEvent>> {
    let (sender, receiver) = unbounded();
    let window: EventTarget = browser::window()?.into();
    let canvas = browser::canvas()?;
    let canvas_target: &EventTarget = canvas.as_ref();

    let keydown_sender = sender.clone();
    let on_keydown = browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
        let code = event.code();
        if code == "Space" || code.starts_with("Arrow") {
            // page scrolling
            event.prevent_default();
        }
        send(&keydown_sender, InputEvent::KeyDown(code));
    }) as Box<dyn FnMut(KeyboardEvent)>);
    listen(&window, "keydown", on_keydown, false)?;

    let keyup_sender = sender.clone();
    let on_keyup = browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
        send(&keyup_sender, InputEvent::KeyUp(event.code()));
    }) as Box<dyn FnMut(KeyboardEvent)>);
    listen(&window, "keyup", on_keyup, false)?;

    let mousedown_sender = sender.clone();
    let mousedown_canvas = canvas.clone();
    let on_mousedown = browser::closure_wrap(Box::new(move |event: MouseEvent| {
        event.prevent_default();
        let position = canvas_point(&mousedown_canvas, event.client_x(), event.client_y());
        send(
            &mousedown_sender,
            InputEvent::Pointer(PointerEvent {
                kind: PointerKind::Mouse,
                phase: PointerPhase::Down,
                position,
            }),
        );
    }) as Box<dyn FnMut(MouseEvent)>);
    listen(canvas_target, "mousedown", on_mousedown, false)?;

    let mouseup_sender = sender.clone();
    let mouseup_canvas = canvas.clone();
    let on_mouseup = browser::closure_wrap(Box::new(move |event: MouseEvent| {
        let position = canvas_point(&mouseup_canvas, event.client_x(), event.client_y());
        send(
            &mouseup_sender,
            InputEvent::Pointer(PointerEvent {
                kind: PointerKind::Mouse,
                phase: PointerPhase::Up,
                position,
            }),
        );
    }) as Box<dyn FnMut(MouseEvent)>);
    listen(&window, "mouseup", on_mouseup, false)?;

    let touch_listeners = [
        ("touchstart", PointerPhase::Down, true),
        ("touchmove", PointerPhase::Move, false),
        ("touchend", PointerPhase::Up, false),
        ("touchcancel", PointerPhase::Up, false),
    ];
    for (name, phase, on_canvas) in touch_listeners {
        let touch_sender = sender.clone();
        let touch_canvas = canvas.clone();
        let on_touch = browser::closure_wrap(Box::new(move |event: TouchEvent| {
            event.prevent_default();
            if let Some(touch) = event.changed_touches().get(0) {
                let position = canvas_point(&touch_canvas, touch.client_x(), touch.client_y());
                send(
                    &touch_sender,
                    InputEvent::Pointer(PointerEvent {
                        kind: PointerKind::Touch,
                        phase,
                        position,
                    }),
                );
            }
        }) as Box<dyn FnMut(TouchEvent)>);
        let target = if on_canvas { canvas_target } else { &window };
        // passive:false, otherwise prevent_default is ignored and the page scrolls
        listen(target, name, on_touch, true)?;
    }

    Ok(receiver)
}

fn send(sender: &UnboundedSender<InputEvent>, event: InputEvent) {
    // receiver only drops when the page unloads
    let _ = sender.unbounded_send(event);
}

fn listen<T: ?Sized + wasm_bindgen::closure::WasmClosure>(
    target: &EventTarget,
    name: &str,
    closure: Closure<T>,
    non_passive: bool,
) -> Result<()> {
    let result = if non_passive {
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            closure.as_ref().unchecked_ref(),
            &options,
        )
    } else {
        target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
    };
    result.map_err(|err| anyhow!("Could not listen for '{}' : {:#?}", name, err))?;
    closure.forget();
    Ok(())
}
