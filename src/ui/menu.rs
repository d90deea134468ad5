use crate::engine::{Point, Rect, Renderer, Size, TextAlign, TextStyle};

const BUTTON_WIDTH: f32 = 160.0;
const BUTTON_HEIGHT: f32 = 40.0;
const BUTTON_GAP: f32 = 12.0;
const BUTTON_RADIUS: f32 = 6.0;
const TITLE_GAP: f32 = 48.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Resume,
    Save,
    MainMenu,
    Restart,
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Resume => "Resume",
            MenuAction::Save => "Save Game",
            MenuAction::MainMenu => "Main Menu",
            MenuAction::Restart => "Restart",
        }
    }
}

/// Vertical stack of buttons centred on the canvas
///
/// ```text
///            TITLE
///        ┌────────────┐
///        │   Resume   │  160 x 40
///        └────────────┘
///              12
///        ┌────────────┐
///        │ Save Game  │
///        └────────────┘
/// ```
#[derive(Debug, Clone)]
pub struct Menu {
    title: &'static str,
    actions: Vec<MenuAction>,
    canvas: Size,
}

impl Menu {
    pub fn pause(canvas: Size) -> Self {
        Menu {
            title: "PAUSED",
            actions: vec![MenuAction::Resume, MenuAction::Save, MenuAction::MainMenu],
            canvas,
        }
    }

    pub fn game_over(canvas: Size) -> Self {
        Menu {
            title: "GAME OVER",
            actions: vec![MenuAction::Restart, MenuAction::MainMenu],
            canvas,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn actions(&self) -> &[MenuAction] {
        &self.actions
    }

    pub fn layout(&self) -> Vec<(MenuAction, Rect)> {
        let count = self.actions.len() as f32;
        let total = count * BUTTON_HEIGHT + (count - 1.0).max(0.0) * BUTTON_GAP;
        let x = (self.canvas.width - BUTTON_WIDTH) / 2.0;
        let top = (self.canvas.height - total) / 2.0;
        self.actions
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let y = top + i as f32 * (BUTTON_HEIGHT + BUTTON_GAP);
                (*action, Rect::from_xywh(x, y, BUTTON_WIDTH, BUTTON_HEIGHT))
            })
            .collect()
    }

    /// Button under a canvas-space point
    pub fn hit(&self, point: Point) -> Option<MenuAction> {
        self.layout()
            .into_iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(action, _)| action)
    }

    pub fn draw(&self, renderer: &Renderer, subtitle: Option<&str>) {
        renderer.fill_rect(
            &Rect::from_xywh(0.0, 0.0, self.canvas.width, self.canvas.height),
            "rgba(54, 127, 146, 0.85)",
        );

        let buttons = self.layout();
        let top = buttons.first().map(|(_, rect)| rect.y()).unwrap_or(self.canvas.height / 2.0);
        let center_x = self.canvas.width / 2.0;
        renderer.fill_text(
            self.title,
            Point::new(center_x, top - TITLE_GAP),
            &TextStyle {
                font: "bold 36px sans-serif",
                color: "#FFFFFF",
                align: TextAlign::Center,
                outline: true,
            },
        );
        if let Some(subtitle) = subtitle {
            renderer.fill_text(
                subtitle,
                Point::new(center_x, top - TITLE_GAP / 2.0),
                &TextStyle {
                    font: "16px sans-serif",
                    color: "#FFFFFF",
                    align: TextAlign::Center,
                    outline: false,
                },
            );
        }

        let label_style = TextStyle {
            font: "18px sans-serif",
            color: "#333333",
            align: TextAlign::Center,
            outline: false,
        };
        for (action, rect) in buttons {
            renderer.fill_rounded_rect(&rect, BUTTON_RADIUS, "#FFFFFF");
            renderer.fill_text(action.label(), rect.center().offset(0.0, 6.0), &label_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Size {
        Size {
            width: 1000.0,
            height: 800.0,
        }
    }

    #[test]
    fn pause_menu_is_centred() {
        let layout = Menu::pause(canvas()).layout();
        assert_eq!(layout.len(), 3);
        // 3 * 40 + 2 * 12 = 144 tall
        let (_, first) = layout[0];
        assert_eq!(first, Rect::from_xywh(420.0, 328.0, 160.0, 40.0));
        let (_, last) = layout[2];
        assert_eq!(last.bottom(), 472.0);
    }

    #[test]
    fn hit_finds_button() {
        let menu = Menu::pause(canvas());
        assert_eq!(menu.hit(Point::new(500.0, 340.0)), Some(MenuAction::Resume));
        assert_eq!(menu.hit(Point::new(500.0, 390.0)), Some(MenuAction::Save));
        assert_eq!(menu.hit(Point::new(500.0, 450.0)), Some(MenuAction::MainMenu));
    }

    #[test]
    fn gap_is_not_a_button() {
        let menu = Menu::pause(canvas());
        assert_eq!(menu.hit(Point::new(500.0, 374.0)), None);
        assert_eq!(menu.hit(Point::new(100.0, 340.0)), None);
    }

    #[test]
    fn game_over_offers_restart() {
        let menu = Menu::game_over(canvas());
        assert_eq!(menu.actions(), &[MenuAction::Restart, MenuAction::MainMenu]);
        assert_eq!(menu.title(), "GAME OVER");
    }
}
