use crate::controls::{Joystick, JOYSTICK_DEAD_ZONE, JOYSTICK_RADIUS};
use crate::engine::{Point, Rect, Renderer, Size, TextAlign, TextStyle};
use crate::ui::health_bar::draw_bar;

const DAMAGE_FLASH: f32 = 200.0;
const LOW_HEALTH: f32 = 0.3;
/// full pulse cycle in ms
const PULSE_PERIOD: f32 = 800.0;
const BAR: Rect = Rect {
    position: Point { x: 20.0, y: 20.0 },
    size: Size {
        width: 200.0,
        height: 16.0,
    },
};

/// What the HUD shows this frame
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct HudStats {
    pub score: u32,
    pub kills: u32,
    pub shards: usize,
    pub total_shards: usize,
    pub health: f32,
    pub max_health: f32,
}

impl HudStats {
    fn ratio(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            (self.health / self.max_health).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Hud {
    canvas: Size,
    last_health: Option<f32>,
    flash: f32,
    pulse: f32,
}

impl Hud {
    pub fn new(canvas: Size) -> Self {
        Hud {
            canvas,
            ..Hud::default()
        }
    }

    /// Starts the red flash whenever health went down since the last call
    pub fn update(&mut self, delta: f32, health: f32) {
        self.flash = (self.flash - delta).max(0.0);
        self.pulse = (self.pulse + delta) % PULSE_PERIOD;
        if let Some(last) = self.last_health {
            if health < last {
                self.flash = DAMAGE_FLASH;
            }
        }
        self.last_health = Some(health);
    }

    /// Forget the last health reading, a restored or restarted player is not a hit
    pub fn reset(&mut self) {
        self.last_health = None;
        self.flash = 0.0;
    }

    pub fn flash_alpha(&self) -> f32 {
        (self.flash / DAMAGE_FLASH).min(0.5)
    }

    pub fn is_low_health(&self, stats: &HudStats) -> bool {
        stats.health > 0.0 && stats.ratio() < LOW_HEALTH
    }

    pub fn draw(&self, renderer: &Renderer, stats: &HudStats, joystick: Option<&Joystick>) {
        let screen = Rect::new(Point::default(), self.canvas);

        if self.is_low_health(stats) {
            let wave = (self.pulse / PULSE_PERIOD * std::f32::consts::TAU).sin() * 0.5 + 0.5;
            renderer.set_alpha(0.15 + 0.2 * wave);
            renderer.stroke_rect(&screen, "#FF0000", 24.0);
            renderer.set_alpha(1.0);
        }

        draw_bar(renderer, &BAR, stats.ratio());
        let label = TextStyle {
            font: "bold 12px Arial",
            color: "#FFFFFF",
            align: TextAlign::Center,
            outline: true,
        };
        renderer.fill_text(
            &format!("{} / {}", stats.health.round(), stats.max_health.round()),
            BAR.center().offset(0.0, 4.0),
            &label,
        );

        let counters = TextStyle {
            font: "bold 18px Arial",
            color: "#FFFFFF",
            align: TextAlign::Left,
            outline: true,
        };
        let left = BAR.x();
        let mut line = BAR.bottom() + 26.0;
        for text in [
            format!("Score: {}", stats.score),
            format!("Kills: {}", stats.kills),
            format!("Shards: {}/{}", stats.shards, stats.total_shards),
        ] {
            renderer.fill_text(&text, Point::new(left, line), &counters);
            line += 24.0;
        }

        if let Some(stick) = joystick {
            renderer.fill_circle(stick.base(), JOYSTICK_RADIUS, "rgba(255, 255, 255, 0.3)");
            renderer.fill_circle(stick.knob(), JOYSTICK_DEAD_ZONE, "rgba(255, 255, 255, 0.3)");
        }

        if self.flash > 0.0 {
            renderer.fill_rect(&screen, &format!("rgba(255, 0, 0, {})", self.flash_alpha()));
        }
    }
}
