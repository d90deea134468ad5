use crate::engine::{Point, Rect, Renderer, TextAlign, TextStyle};

const MOB_BAR_WIDTH: f32 = 40.0;
const PLAYER_BAR_WIDTH: f32 = 60.0;
const BAR_HEIGHT: f32 = 6.0;
const OFFSET_ABOVE: f32 = 25.0;
/// how long a mob bar lingers after healing back to full, in ms
const LINGER: f32 = 1000.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BarKind {
    /// shown only while damaged
    Mob,
    /// always shown, with the number underneath
    Player,
}

#[derive(Debug, Clone)]
pub struct HealthBar {
    kind: BarKind,
    width: f32,
    visible: bool,
    fade_timer: f32,
    position: Point,
    current: f32,
    max: f32,
}

impl HealthBar {
    pub fn new(kind: BarKind) -> Self {
        HealthBar {
            kind,
            width: match kind {
                BarKind::Mob => MOB_BAR_WIDTH,
                BarKind::Player => PLAYER_BAR_WIDTH,
            },
            visible: kind == BarKind::Player,
            fade_timer: 0.0,
            position: Point::default(),
            current: 0.0,
            max: 0.0,
        }
    }

    /// `anchor` is the horizontal center and top edge of the owner
    pub fn update(&mut self, anchor: Point, current: f32, max: f32, delta: f32) {
        self.position = Point {
            x: anchor.x - self.width / 2.0,
            y: anchor.y - OFFSET_ABOVE,
        };
        self.current = current;
        self.max = max;

        if self.kind == BarKind::Player || (current < max && current > 0.0) {
            self.visible = true;
            self.fade_timer = LINGER;
        } else if current >= max && self.fade_timer > 0.0 {
            self.fade_timer -= delta;
            if self.fade_timer <= 0.0 {
                self.visible = false;
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible && self.current > 0.0
    }

    pub fn ratio(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    pub fn draw(&self, renderer: &Renderer) {
        if !self.is_visible() {
            return;
        }
        let frame = Rect::from_xywh(self.position.x, self.position.y, self.width, BAR_HEIGHT);
        draw_bar(renderer, &frame, self.ratio());

        if self.kind == BarKind::Player {
            renderer.fill_text(
                &format!("{}", self.current.round()),
                Point::new(frame.center().x, frame.bottom() + 12.0),
                &TextStyle {
                    font: "bold 10px Arial",
                    color: "#FFFFFF",
                    align: TextAlign::Center,
                    outline: true,
                },
            );
        }
    }
}

/// green above 60%, yellow above 30%, red below
pub fn fill_color(ratio: f32) -> &'static str {
    if ratio > 0.6 {
        "#22C55E"
    } else if ratio > 0.3 {
        "#EAB308"
    } else {
        "#EF4444"
    }
}

/// Shadow, dark background, coloured fill, border
/// - shared by the floating bars and the HUD bar
pub fn draw_bar(renderer: &Renderer, frame: &Rect, ratio: f32) {
    let shadow = Rect::new(frame.position.offset(1.0, 1.0), frame.size);
    renderer.fill_rect(&shadow, "rgba(0, 0, 0, 0.3)");
    renderer.fill_rect(frame, "#4A0000");
    let fill = Rect::from_xywh(frame.x(), frame.y(), frame.width() * ratio, frame.height());
    renderer.fill_rect(&fill, fill_color(ratio));
    let gloss = Rect::from_xywh(fill.x(), fill.y(), fill.width(), fill.height() / 2.0);
    renderer.fill_rect(&gloss, "rgba(255, 255, 255, 0.2)");
    renderer.stroke_rect(frame, "#000000", 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mob_bar_hidden_until_damaged() {
        let mut bar = HealthBar::new(BarKind::Mob);
        bar.update(Point::new(100.0, 100.0), 50.0, 50.0, 16.0);
        assert!(!bar.is_visible());
        bar.update(Point::new(100.0, 100.0), 25.0, 50.0, 16.0);
        assert!(bar.is_visible());
        assert_eq!(bar.position, Point::new(80.0, 75.0));
    }

    #[test]
    fn mob_bar_lingers_after_full_heal() {
        let mut bar = HealthBar::new(BarKind::Mob);
        bar.update(Point::default(), 10.0, 50.0, 16.0);
        bar.update(Point::default(), 50.0, 50.0, 600.0);
        assert!(bar.is_visible());
        bar.update(Point::default(), 50.0, 50.0, 600.0);
        assert!(!bar.is_visible());
    }

    #[test]
    fn player_bar_always_visible() {
        let mut bar = HealthBar::new(BarKind::Player);
        bar.update(Point::default(), 100.0, 100.0, 5000.0);
        assert!(bar.is_visible());
        bar.update(Point::default(), 0.0, 100.0, 16.0);
        assert!(!bar.is_visible());
    }

    #[test]
    fn colour_thresholds() {
        assert_eq!(fill_color(1.0), "#22C55E");
        assert_eq!(fill_color(0.6), "#EAB308");
        assert_eq!(fill_color(0.31), "#EAB308");
        assert_eq!(fill_color(0.3), "#EF4444");
    }
}
