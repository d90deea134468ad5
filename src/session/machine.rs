use crate::session::state::{IsCelebrating, IsCutscene, SessionState};
use crate::session::{Cutscene, GameOver, Paused, Playing, SessionPhase, Victory};

/// ┌──────────────── Session Transition Flow ────────────────┐
/// │  From State  →  Event    →  To State                    │
/// ├─────────────────────────────────────────────────────────┤
/// │  Playing     →  Pause    →  Paused                      │
/// │  Paused      →  Resume   →  Playing                     │
/// │  Playing     →  Die      →  GameOver                    │
/// │  Playing     →  Awaken   →  Cutscene                    │
/// │  Playing     →  Win      →  Victory                     │
/// │  GameOver    →  Restart  →  Playing                     │
/// │  ---------      -------                                 │
/// │  Cutscene    →  Update   →  Playing (after 2500ms)      │
/// │  Victory     →  Update   →  Playing (after 2000ms)      │
/// └─────────────────────────────────────────────────────────┘
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    Pause,
    Resume,
    Die,
    Awaken,
    Win,
    Restart,
    Update(f32),
}

/// Plain tag of the current phase, for callers that only need to compare
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Paused,
    Cutscene,
    Victory,
    GameOver,
}

#[derive(Debug, Copy, Clone)]
pub enum SessionStateMachine {
    Playing(SessionState<Playing>),
    Paused(SessionState<Paused>),
    Cutscene(SessionState<Cutscene>),
    Victory(SessionState<Victory>),
    GameOver(SessionState<GameOver>),
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        SessionStateMachine::Playing(SessionState::new())
    }
}

impl From<SessionState<Playing>> for SessionStateMachine {
    fn from(state: SessionState<Playing>) -> Self {
        SessionStateMachine::Playing(state)
    }
}

impl From<SessionState<Paused>> for SessionStateMachine {
    fn from(state: SessionState<Paused>) -> Self {
        SessionStateMachine::Paused(state)
    }
}

impl From<SessionState<Cutscene>> for SessionStateMachine {
    fn from(state: SessionState<Cutscene>) -> Self {
        SessionStateMachine::Cutscene(state)
    }
}

impl From<SessionState<Victory>> for SessionStateMachine {
    fn from(state: SessionState<Victory>) -> Self {
        SessionStateMachine::Victory(state)
    }
}

impl From<SessionState<GameOver>> for SessionStateMachine {
    fn from(state: SessionState<GameOver>) -> Self {
        SessionStateMachine::GameOver(state)
    }
}

impl From<IsCutscene> for SessionStateMachine {
    fn from(is_cutscene: IsCutscene) -> Self {
        match is_cutscene {
            IsCutscene::Done(playing) => playing.into(),
            IsCutscene::InProgress(cutscene) => cutscene.into(),
        }
    }
}

impl From<IsCelebrating> for SessionStateMachine {
    fn from(is_celebrating: IsCelebrating) -> Self {
        match is_celebrating {
            IsCelebrating::Done(playing) => playing.into(),
            IsCelebrating::InProgress(victory) => victory.into(),
        }
    }
}

impl SessionStateMachine {
    // consumes self, the old phase can not be observed after a transition
    pub fn transition(self, event: Event) -> Self {
        match (self, event) {
            (SessionStateMachine::Playing(state), Event::Pause) => state.pause().into(),
            (SessionStateMachine::Paused(state), Event::Resume) => state.resume().into(),
            (SessionStateMachine::Playing(state), Event::Die) => state.die().into(),
            (SessionStateMachine::Playing(state), Event::Awaken) => state.awaken().into(),
            (SessionStateMachine::Playing(state), Event::Win) => state.win().into(),
            (SessionStateMachine::GameOver(state), Event::Restart) => state.restart().into(),
            (SessionStateMachine::Playing(state), Event::Update(delta)) => {
                state.update(delta).into()
            }
            (SessionStateMachine::Cutscene(state), Event::Update(delta)) => {
                state.update(delta).into()
            }
            (SessionStateMachine::Victory(state), Event::Update(delta)) => {
                state.update(delta).into()
            }
            // anything else (pause during a cutscene, die while paused, ...)
            // keeps the current phase
            _ => self,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            SessionStateMachine::Playing(_) => Phase::Playing,
            SessionStateMachine::Paused(_) => Phase::Paused,
            SessionStateMachine::Cutscene(_) => Phase::Cutscene,
            SessionStateMachine::Victory(_) => Phase::Victory,
            SessionStateMachine::GameOver(_) => Phase::GameOver,
        }
    }

    pub fn ticks(&self) -> bool {
        match self {
            SessionStateMachine::Playing(_) => Playing::ticks(),
            SessionStateMachine::Paused(_) => Paused::ticks(),
            SessionStateMachine::Cutscene(_) => Cutscene::ticks(),
            SessionStateMachine::Victory(_) => Victory::ticks(),
            SessionStateMachine::GameOver(_) => GameOver::ticks(),
        }
    }

    pub fn simulates(&self) -> bool {
        match self {
            SessionStateMachine::Playing(_) => Playing::simulates(),
            SessionStateMachine::Paused(_) => Paused::simulates(),
            SessionStateMachine::Cutscene(_) => Cutscene::simulates(),
            SessionStateMachine::Victory(_) => Victory::simulates(),
            SessionStateMachine::GameOver(_) => GameOver::simulates(),
        }
    }

    pub fn accepts_input(&self) -> bool {
        match self {
            SessionStateMachine::Playing(_) => Playing::accepts_input(),
            SessionStateMachine::Paused(_) => Paused::accepts_input(),
            SessionStateMachine::Cutscene(_) => Cutscene::accepts_input(),
            SessionStateMachine::Victory(_) => Victory::accepts_input(),
            SessionStateMachine::GameOver(_) => GameOver::accepts_input(),
        }
    }

    /// ms spent in the current phase
    pub fn elapsed(&self) -> f32 {
        match self {
            SessionStateMachine::Playing(state) => state.context().elapsed,
            SessionStateMachine::Paused(state) => state.context().elapsed,
            SessionStateMachine::Cutscene(state) => state.context().elapsed,
            SessionStateMachine::Victory(state) => state.context().elapsed,
            SessionStateMachine::GameOver(state) => state.context().elapsed,
        }
    }
}
