//! Turns raw key and pointer state into what the player wants this step.
//! No DOM access, so everything here runs under plain `cargo test`.
use crate::camera::Camera;
use crate::config::CombatConfig;
use crate::engine::input::{KeyState, PointerEvent, PointerKind, PointerPhase};
use crate::engine::Point;

pub const JOYSTICK_RADIUS: f32 = 50.0;
pub const JOYSTICK_DEAD_ZONE: f32 = 10.0;
/// touches that travel less than this are taps
pub const TAP_DISTANCE: f32 = 20.0;
/// how long the attack range ring stays on screen
pub const ATTACK_FLASH: f32 = 300.0;

const UP: [&str; 2] = ["KeyW", "ArrowUp"];
const DOWN: [&str; 2] = ["KeyS", "ArrowDown"];
const LEFT: [&str; 2] = ["KeyA", "ArrowLeft"];
const RIGHT: [&str; 2] = ["KeyD", "ArrowRight"];

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Intent {
    /// unit length or zero
    pub direction: (f32, f32),
    /// world position of an attack that cleared the cooldown
    pub attack: Option<Point>,
}

/// Virtual stick opened by a touch, in canvas pixels
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Joystick {
    base: Point,
    knob: Point,
    travel: f32,
}

impl Joystick {
    fn open(at: Point) -> Self {
        Joystick {
            base: at,
            knob: at,
            travel: 0.0,
        }
    }

    fn drag(&mut self, to: Point) {
        let (dx, dy) = (to.x - self.base.x, to.y - self.base.y);
        let distance = dx.hypot(dy);
        self.travel = self.travel.max(distance);
        self.knob = if distance > JOYSTICK_RADIUS {
            self.base
                .offset(dx / distance * JOYSTICK_RADIUS, dy / distance * JOYSTICK_RADIUS)
        } else {
            to
        };
    }

    pub fn base(&self) -> Point {
        self.base
    }

    pub fn knob(&self) -> Point {
        self.knob
    }

    fn is_tap(&self) -> bool {
        self.travel < TAP_DISTANCE
    }

    pub fn direction(&self) -> (f32, f32) {
        let (dx, dy) = (self.knob.x - self.base.x, self.knob.y - self.base.y);
        let distance = dx.hypot(dy);
        if distance < JOYSTICK_DEAD_ZONE {
            (0.0, 0.0)
        } else {
            (dx / distance, dy / distance)
        }
    }
}

pub struct Controls {
    cooldown: f32,
    since_attack: f32,
    flash: f32,
    joystick: Option<Joystick>,
}

impl Controls {
    pub fn new(config: &CombatConfig) -> Self {
        Controls {
            cooldown: config.cooldown,
            since_attack: config.cooldown,
            flash: 0.0,
            joystick: None,
        }
    }

    pub fn update(
        &mut self,
        delta: f32,
        keys: &KeyState,
        pointer_events: &[PointerEvent],
        player_center: Point,
        camera: &Camera,
    ) -> Intent {
        self.since_attack += delta;
        self.flash = (self.flash - delta).max(0.0);

        let mut requested = None;
        if keys.was_pressed("Space") {
            requested = Some(player_center);
        }

        for event in pointer_events {
            match (event.kind, event.phase) {
                (PointerKind::Mouse, PointerPhase::Down) => {
                    requested = Some(camera.screen_to_world(event.position));
                }
                (PointerKind::Touch, PointerPhase::Down) => {
                    self.joystick = Some(Joystick::open(event.position));
                }
                (PointerKind::Touch, PointerPhase::Move) => {
                    if let Some(stick) = self.joystick.as_mut() {
                        stick.drag(event.position);
                    }
                }
                (PointerKind::Touch, PointerPhase::Up) => {
                    if let Some(stick) = self.joystick.take() {
                        if stick.is_tap() {
                            requested = Some(camera.screen_to_world(stick.base));
                        }
                    }
                }
                _ => {}
            }
        }

        let direction = match &self.joystick {
            Some(stick) => stick.direction(),
            None => keyboard_direction(keys),
        };

        Intent {
            direction,
            attack: requested.and_then(|target| self.try_attack(target)),
        }
    }

    fn try_attack(&mut self, target: Point) -> Option<Point> {
        if self.since_attack < self.cooldown {
            return None;
        }
        self.since_attack = 0.0;
        self.flash = ATTACK_FLASH;
        Some(target)
    }

    /// range ring visible
    pub fn attack_flash(&self) -> bool {
        self.flash > 0.0
    }

    pub fn joystick(&self) -> Option<&Joystick> {
        self.joystick.as_ref()
    }

    pub fn reset(&mut self) {
        self.since_attack = self.cooldown;
        self.flash = 0.0;
        self.joystick = None;
    }
}

fn any_pressed(keys: &KeyState, codes: &[&str]) -> bool {
    codes.iter().any(|code| keys.is_pressed(code))
}

fn keyboard_direction(keys: &KeyState) -> (f32, f32) {
    let mut dx = 0.0;
    let mut dy = 0.0;
    if any_pressed(keys, &LEFT) {
        dx -= 1.0;
    }
    if any_pressed(keys, &RIGHT) {
        dx += 1.0;
    }
    if any_pressed(keys, &UP) {
        dy -= 1.0;
    }
    if any_pressed(keys, &DOWN) {
        dy += 1.0;
    }
    let length: f32 = f32::hypot(dx, dy);
    if length > 0.0 {
        (dx / length, dy / length)
    } else {
        (0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::engine::Size;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new(
            Size {
                width: 1000.0,
                height: 800.0,
            },
            &CameraConfig::default(),
        )
    }

    fn touch(phase: PointerPhase, x: f32, y: f32) -> PointerEvent {
        PointerEvent {
            kind: PointerKind::Touch,
            phase,
            position: Point::new(x, y),
        }
    }

    #[test]
    fn diagonal_is_normalized() {
        let mut keys = KeyState::new();
        keys.set_pressed("KeyW");
        keys.set_pressed("ArrowRight");
        let mut controls = Controls::new(&CombatConfig::default());
        let intent = controls.update(16.0, &keys, &[], Point::default(), &camera());
        assert_relative_eq!(intent.direction.0, std::f32::consts::FRAC_1_SQRT_2);
        assert_relative_eq!(intent.direction.1, -std::f32::consts::FRAC_1_SQRT_2);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keys = KeyState::new();
        keys.set_pressed("KeyA");
        keys.set_pressed("KeyD");
        let mut controls = Controls::new(&CombatConfig::default());
        let intent = controls.update(16.0, &keys, &[], Point::default(), &camera());
        assert_eq!(intent.direction, (0.0, 0.0));
    }

    #[test]
    fn space_attacks_once_per_press() {
        let mut keys = KeyState::new();
        keys.set_pressed("Space");
        let mut controls = Controls::new(&CombatConfig::default());
        let center = Point::new(40.0, 60.0);
        let intent = controls.update(16.0, &keys, &[], center, &camera());
        assert_eq!(intent.attack, Some(center));
        assert!(controls.attack_flash());

        keys.end_frame();
        let intent = controls.update(500.0, &keys, &[], center, &camera());
        assert_eq!(intent.attack, None);
    }

    #[test]
    fn cooldown_blocks_rapid_attacks() {
        let mut controls = Controls::new(&CombatConfig::default());
        let click = [PointerEvent {
            kind: PointerKind::Mouse,
            phase: PointerPhase::Down,
            position: Point::new(10.0, 10.0),
        }];
        let keys = KeyState::new();
        let mut attack = |delta| {
            controls
                .update(delta, &keys, &click, Point::default(), &camera())
                .attack
        };
        assert!(attack(16.0).is_some());
        assert!(attack(100.0).is_none());
        assert!(attack(100.0).is_some());
    }

    #[test]
    fn flash_expires() {
        let mut keys = KeyState::new();
        keys.set_pressed("Space");
        let mut controls = Controls::new(&CombatConfig::default());
        controls.update(16.0, &keys, &[], Point::default(), &camera());
        keys.end_frame();
        controls.update(ATTACK_FLASH, &keys, &[], Point::default(), &camera());
        assert!(!controls.attack_flash());
    }

    #[test]
    fn joystick_overrides_keyboard_and_clamps_knob() {
        let mut keys = KeyState::new();
        keys.set_pressed("KeyA");
        let mut controls = Controls::new(&CombatConfig::default());
        let events = [
            touch(PointerPhase::Down, 100.0, 100.0),
            touch(PointerPhase::Move, 300.0, 100.0),
        ];
        let intent = controls.update(16.0, &keys, &events, Point::default(), &camera());
        assert_eq!(intent.direction, (1.0, 0.0));
        let stick = controls.joystick().copied();
        assert_eq!(stick.map(|s| s.knob()), Some(Point::new(150.0, 100.0)));
    }

    #[test]
    fn joystick_dead_zone() {
        let mut controls = Controls::new(&CombatConfig::default());
        let events = [
            touch(PointerPhase::Down, 100.0, 100.0),
            touch(PointerPhase::Move, 105.0, 100.0),
        ];
        let intent = controls.update(16.0, &KeyState::new(), &events, Point::default(), &camera());
        assert_eq!(intent.direction, (0.0, 0.0));
    }

    #[test]
    fn short_touch_is_a_tap_attack() {
        let mut controls = Controls::new(&CombatConfig::default());
        let events = [
            touch(PointerPhase::Down, 100.0, 100.0),
            touch(PointerPhase::Move, 105.0, 100.0),
            touch(PointerPhase::Up, 105.0, 100.0),
        ];
        let cam = camera();
        let intent = controls.update(16.0, &KeyState::new(), &events, Point::default(), &cam);
        assert_eq!(intent.attack, Some(cam.screen_to_world(Point::new(100.0, 100.0))));
        assert!(controls.joystick().is_none());
    }

    #[test]
    fn long_drag_is_not_a_tap() {
        let mut controls = Controls::new(&CombatConfig::default());
        let events = [
            touch(PointerPhase::Down, 100.0, 100.0),
            touch(PointerPhase::Move, 160.0, 100.0),
            touch(PointerPhase::Up, 100.0, 100.0),
        ];
        let intent = controls.update(16.0, &KeyState::new(), &events, Point::default(), &camera());
        assert_eq!(intent.attack, None);
    }
}
