// Session flow, written as a typestate machine
// ┌───────────────┬─────────────────────────────────────────────────┐
// │ File          │ Role                                            │
// ├───────────────┼─────────────────────────────────────────────────┤
// │ mod.rs        │ phase marker types + SessionPhase trait         │
// │ state.rs      │ SessionState<S>, only legal transitions exist   │
// │ machine.rs    │ SessionStateMachine enum, event dispatch        │
// └───────────────┴─────────────────────────────────────────────────┘
pub mod machine;
pub mod state;

pub use machine::{Event, Phase, SessionStateMachine};

/// how long the "something awakens" sequence runs before the boss appears
pub const CUTSCENE_LENGTH: f32 = 2500.0;
/// second cutscene line appears this far in
pub const CUTSCENE_SECOND_LINE: f32 = 1000.0;
/// victory banner time before the next round starts
pub const VICTORY_LENGTH: f32 = 2000.0;

pub trait SessionPhase {
    /// whether player, mobs and camera advance in this phase
    fn simulates() -> bool;
    /// whether the phase clock runs, a timed phase may tick with the world frozen
    fn ticks() -> bool {
        Self::simulates()
    }
    /// whether player input drives the simulation
    fn accepts_input() -> bool {
        Self::simulates()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Playing;

#[derive(Debug, Copy, Clone)]
pub struct Paused;

#[derive(Debug, Copy, Clone)]
pub struct Cutscene;

#[derive(Debug, Copy, Clone)]
pub struct Victory;

#[derive(Debug, Copy, Clone)]
pub struct GameOver;

impl SessionPhase for Playing {
    fn simulates() -> bool {
        true
    }
}

impl SessionPhase for Paused {
    fn simulates() -> bool {
        false
    }
}

impl SessionPhase for Cutscene {
    fn simulates() -> bool {
        true
    }

    fn accepts_input() -> bool {
        false
    }
}

impl SessionPhase for Victory {
    fn simulates() -> bool {
        false
    }

    fn ticks() -> bool {
        true
    }
}

impl SessionPhase for GameOver {
    fn simulates() -> bool {
        false
    }
}
