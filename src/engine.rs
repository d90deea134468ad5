use crate::browser;
use anyhow::{anyhow, Error, Result};
// single threaded wasm environment, so Rc RefCell > Mutex
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{
    // unchecked_ref (unsafe) cast from Javascript type to Rust type
    // - we control closure creation and the expected signature
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

pub mod input;

use self::input::{KeyState, PointerEvent};

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn update(&mut self, keystate: &KeyState, pointer_events: &[PointerEvent]);
    fn draw(&mut self, renderer: &Renderer);
}

/// length of a simulation step in milliseconds
pub const FRAME_SIZE: f32 = 1.0 / 60.0 * 1000.0;
// a backgrounded tab hands back a huge delta on return, only replay this much
const MAX_ACCUMULATED_DELTA: f32 = 50.0;

pub struct GameLoop {
    last_frame: f64,
    accumulated_delta: f32,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    /// ┌──────────────── One animation frame ────────────────┐
    /// │ 1. drain input channel  -> KeyState + pointer queue │
    /// │ 2. accumulate delta (capped)                        │
    /// │ 3. game.update() once per FRAME_SIZE step           │
    /// │    - pointer events only reach the first step       │
    /// │ 4. game.draw()                                      │
    /// │ 5. request next frame                               │
    /// └─────────────────────────────────────────────────────┘
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut input_receiver = input::prepare_input()?;
        let mut game = game.initialize().await?;
        let mut game_loop = GameLoop {
            last_frame: browser::now()?,
            accumulated_delta: 0.0,
        };
        let renderer = Renderer::new(browser::context()?);
        let mut keystate = KeyState::new();
        let mut pointer_events: Vec<PointerEvent> = Vec::new();

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            input::process_input(&mut keystate, &mut pointer_events, &mut input_receiver);

            game_loop.accumulated_delta = game_loop.step_budget(perf);
            while game_loop.accumulated_delta > FRAME_SIZE {
                game.update(&keystate, &pointer_events);
                // edges and clicks are consumed by the first step
                keystate.end_frame();
                pointer_events.clear();
                game_loop.accumulated_delta -= FRAME_SIZE;
            }
            game_loop.last_frame = perf;
            game.draw(&renderer);

            if let Some(closure) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(closure) {
                    error!("GameLoop: {:#}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }

    fn step_budget(&self, perf: f64) -> f32 {
        let elapsed = (perf - self.last_frame) as f32;
        (self.accumulated_delta + elapsed).min(MAX_ACCUMULATED_DELTA)
    }
}

// ==================== Geometry ====================
#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect::new(Point { x, y }, Size { width, height })
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn left(&self) -> f32 {
        self.x()
    }

    pub fn top(&self) -> f32 {
        self.y()
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.position.x + self.size.width * 0.5,
            y: self.position.y + self.size.height * 0.5,
        }
    }

    /// edges inclusive, the way a click on a button border should still count
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x()
            && point.x <= self.right()
            && point.y >= self.y()
            && point.y <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ==================== Rendering ====================
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextStyle<'a> {
    pub font: &'a str,
    pub color: &'a str,
    pub align: TextAlign,
    /// black outline drawn under the fill, for text over busy terrain
    pub outline: bool,
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Renderer { context }
    }

    pub fn clear(&self, rect: &Rect) {
        self.context.clear_rect(
            rect.x().into(),
            rect.y().into(),
            rect.width().into(),
            rect.height().into(),
        );
    }

    pub fn fill_rect(&self, rect: &Rect, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.fill_rect(
            rect.x().into(),
            rect.y().into(),
            rect.width().into(),
            rect.height().into(),
        );
    }

    pub fn stroke_rect(&self, rect: &Rect, color: &str, line_width: f32) {
        self.context.set_stroke_style_str(color);
        self.context.set_line_width(line_width.into());
        self.context.stroke_rect(
            rect.x().into(),
            rect.y().into(),
            rect.width().into(),
            rect.height().into(),
        );
    }

    pub fn fill_rounded_rect(&self, rect: &Rect, radius: f32, color: &str) {
        let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0) as f64;
        let (x, y) = (rect.x() as f64, rect.y() as f64);
        let (right, bottom) = (rect.right() as f64, rect.bottom() as f64);
        let ctx = &self.context;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        // arc_to only fails on a negative radius, which min() above rules out
        let _ = ctx.arc_to(right, y, right, bottom, r);
        let _ = ctx.arc_to(right, bottom, x, bottom, r);
        let _ = ctx.arc_to(x, bottom, x, y, r);
        let _ = ctx.arc_to(x, y, right, y, r);
        ctx.close_path();
        ctx.set_fill_style_str(color);
        ctx.fill();
    }

    pub fn fill_circle(&self, center: Point, radius: f32, color: &str) {
        self.context.begin_path();
        if self.circle_path(center, radius) {
            self.context.set_fill_style_str(color);
            self.context.fill();
        }
    }

    pub fn stroke_circle(
        &self,
        center: Point,
        radius: f32,
        color: &str,
        line_width: f32,
        dash: &[f32],
    ) {
        let segments = dash
            .iter()
            .map(|segment| JsValue::from_f64(*segment as f64))
            .collect::<js_sys::Array>();
        let _ = self.context.set_line_dash(&segments);
        self.context.begin_path();
        if self.circle_path(center, radius) {
            self.context.set_stroke_style_str(color);
            self.context.set_line_width(line_width.into());
            self.context.stroke();
        }
        let _ = self.context.set_line_dash(&js_sys::Array::new());
    }

    fn circle_path(&self, center: Point, radius: f32) -> bool {
        self.context
            .arc(
                center.x.into(),
                center.y.into(),
                radius.max(0.0).into(),
                0.0,
                std::f64::consts::TAU,
            )
            .is_ok()
    }

    pub fn fill_text(&self, text: &str, position: Point, style: &TextStyle) {
        let ctx = &self.context;
        ctx.set_font(style.font);
        ctx.set_text_align(style.align.as_str());
        ctx.set_text_baseline("middle");
        if style.outline {
            ctx.set_stroke_style_str("#000000");
            ctx.set_line_width(2.0);
            let _ = ctx.stroke_text(text, position.x.into(), position.y.into());
        }
        ctx.set_fill_style_str(style.color);
        if let Err(err) = ctx.fill_text(text, position.x.into(), position.y.into()) {
            error!("Renderer: could not draw text {:?} : {:#?}", text, err);
        }
    }

    /// Draw an image scaled into `destination`
    pub fn draw_image(&self, image: &HtmlImageElement, destination: &Rect) {
        if let Err(err) = self
            .context
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                destination.x().into(),
                destination.y().into(),
                destination.width().into(),
                destination.height().into(),
            )
        {
            error!("Renderer: could not draw image : {:#?}", err);
        }
    }

    pub fn set_alpha(&self, alpha: f32) {
        self.context.set_global_alpha(alpha.clamp(0.0, 1.0).into());
    }

    /// save() + scale + translate, must be paired with `pop_transform`
    pub fn push_transform(&self, zoom: f32, offset: Point) {
        self.context.save();
        let _ = self.context.scale(zoom.into(), zoom.into());
        let _ = self.context.translate((-offset.x).into(), (-offset.y).into());
    }

    pub fn pop_transform(&self) {
        self.context.restore();
    }

    pub fn save(&self) {
        self.context.save();
    }

    pub fn restore(&self) {
        self.context.restore();
    }
}

#[cfg(debug_assertions)]
pub trait DebugDraw {
    fn draw_debug(&self, renderer: &Renderer);
}

#[cfg(debug_assertions)]
impl DebugDraw for Rect {
    fn draw_debug(&self, renderer: &Renderer) {
        renderer.stroke_rect(self, "#FF0000", 1.0);
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::create_html_image_element()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let source_name = source.to_string();
    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!(
                "[engine.rs::load_image] Error loading image {}: {:#?}",
                source_name,
                err
            )));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callback alive until image is loaded or errors
    success_callback.forget();
    error_callback.forget();

    // Result<Result<(), Error>, oneshot::Canceled>
    // - first ? yields channel result : Result<(), Error>
    // - second ? yields image load result : () or propagating Error
    rx.await??;

    Ok(image)
}
