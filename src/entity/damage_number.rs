use crate::engine::{Point, Renderer, TextAlign, TextStyle};

const LIFETIME: f32 = 1000.0;
/// how far the text drifts up over its life, in px
const RISE: f32 = 30.0;

pub const DAMAGE_COLOR: &str = "#FF0000";
pub const POINTS_COLOR: &str = "#00FF00";
pub const BANNER_COLOR: &str = "#FF00FF";
pub const VICTORY_COLOR: &str = "#FFD700";

/// Floating text that rises and fades over one second
#[derive(Debug, Clone, PartialEq)]
pub struct DamageNumber {
    position: Point,
    start_y: f32,
    text: String,
    color: String,
    life: f32,
    font_size: u32,
}

impl DamageNumber {
    pub fn new(position: Point, text: impl Into<String>, color: &str) -> Self {
        DamageNumber {
            position,
            start_y: position.y,
            text: text.into(),
            color: color.to_string(),
            life: LIFETIME,
            font_size: 16,
        }
    }

    pub fn damage(position: Point, amount: f32) -> Self {
        DamageNumber::new(position, format!("-{}", amount.round()), DAMAGE_COLOR)
    }

    pub fn points(position: Point, points: u32) -> Self {
        DamageNumber::new(position, format!("+{}", points), POINTS_COLOR)
    }

    /// Story text ("BOSS SPAWNED!"), larger than a hit number
    pub fn banner(position: Point, text: &str, color: &str) -> Self {
        let mut banner = DamageNumber::new(position, text, color);
        banner.font_size = 22;
        banner
    }

    /// Returns false once the number has expired
    pub fn update(&mut self, delta: f32) -> bool {
        self.life -= delta;
        self.position.y = self.start_y - (1.0 - self.life.max(0.0) / LIFETIME) * RISE;
        self.life > 0.0
    }

    pub fn alpha(&self) -> f32 {
        (self.life / LIFETIME).clamp(0.0, 1.0)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn draw(&self, renderer: &Renderer) {
        if self.life <= 0.0 {
            return;
        }
        let font = format!("bold {}px Arial", self.font_size);
        renderer.save();
        renderer.set_alpha(self.alpha());
        renderer.fill_text(
            &self.text,
            self.position,
            &TextStyle {
                font: &font,
                color: &self.color,
                align: TextAlign::Center,
                outline: true,
            },
        );
        renderer.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rises_and_fades() {
        let mut number = DamageNumber::damage(Point::new(10.0, 100.0), 25.0);
        assert_eq!(number.text(), "-25");
        assert!(number.update(500.0));
        assert_relative_eq!(number.position().y, 85.0);
        assert_relative_eq!(number.alpha(), 0.5);
        assert!(!number.update(500.0));
        assert_relative_eq!(number.position().y, 70.0);
        assert_eq!(number.alpha(), 0.0);
    }

    #[test]
    fn points_text() {
        assert_eq!(DamageNumber::points(Point::default(), 100).text(), "+100");
    }
}
