//! Each phase is its own type, so a transition that makes no sense (resume a
//! game that is over, pause a cutscene) has no method to call
use crate::session::{self, Cutscene, GameOver, Paused, Playing, Victory};

pub enum IsCutscene {
    Done(SessionState<Playing>),
    InProgress(SessionState<Cutscene>),
}

pub enum IsCelebrating {
    Done(SessionState<Playing>),
    InProgress(SessionState<Victory>),
}

/// Data every phase carries
#[derive(Debug, Copy, Clone, Default)]
pub struct SessionContext {
    /// ms spent in the current phase, simulated time only
    pub elapsed: f32,
}

impl SessionContext {
    fn update(mut self, delta: f32) -> Self {
        self.elapsed += delta;
        self
    }

    /// every phase starts its clock from zero
    fn on_state_transition(mut self) -> Self {
        self.elapsed = 0.0;
        self
    }
}

#[derive(Debug, Copy, Clone)]
pub struct SessionState<S> {
    context: SessionContext,
    // phantom marker, only read by the type checker
    _state: S,
}

impl<S> SessionState<S> {
    pub fn context(&self) -> &SessionContext {
        &self.context
    }
}

impl SessionState<Playing> {
    pub fn new() -> Self {
        SessionState {
            context: SessionContext::default(),
            _state: Playing,
        }
    }

    pub fn update(mut self, delta: f32) -> Self {
        self.context = self.context.update(delta);
        self
    }

    pub fn pause(self) -> SessionState<Paused> {
        SessionState {
            context: self.context.on_state_transition(),
            _state: Paused,
        }
    }

    pub fn die(self) -> SessionState<GameOver> {
        SessionState {
            context: self.context.on_state_transition(),
            _state: GameOver,
        }
    }

    pub fn awaken(self) -> SessionState<Cutscene> {
        SessionState {
            context: self.context.on_state_transition(),
            _state: Cutscene,
        }
    }

    pub fn win(self) -> SessionState<Victory> {
        SessionState {
            context: self.context.on_state_transition(),
            _state: Victory,
        }
    }
}

impl Default for SessionState<Playing> {
    fn default() -> Self {
        SessionState::new()
    }
}

impl SessionState<Paused> {
    pub fn resume(self) -> SessionState<Playing> {
        SessionState {
            context: self.context.on_state_transition(),
            _state: Playing,
        }
    }
}

impl SessionState<Cutscene> {
    /// Returns an enum because the cutscene can:
    /// - End      (Done, the boss is due)
    /// - Continue (InProgress)
    pub fn update(mut self, delta: f32) -> IsCutscene {
        self.context = self.context.update(delta);
        if self.context.elapsed >= session::CUTSCENE_LENGTH {
            IsCutscene::Done(self.finish())
        } else {
            IsCutscene::InProgress(self)
        }
    }

    fn finish(self) -> SessionState<Playing> {
        SessionState {
            context: self.context.on_state_transition(),
            _state: Playing,
        }
    }
}

impl SessionState<Victory> {
    pub fn update(mut self, delta: f32) -> IsCelebrating {
        self.context = self.context.update(delta);
        if self.context.elapsed >= session::VICTORY_LENGTH {
            IsCelebrating::Done(self.next_round())
        } else {
            IsCelebrating::InProgress(self)
        }
    }

    fn next_round(self) -> SessionState<Playing> {
        SessionState {
            context: self.context.on_state_transition(),
            _state: Playing,
        }
    }
}

impl SessionState<GameOver> {
    pub fn restart(self) -> SessionState<Playing> {
        SessionState {
            context: self.context.on_state_transition(),
            _state: Playing,
        }
    }
}
