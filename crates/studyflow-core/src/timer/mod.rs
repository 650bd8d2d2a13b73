mod pomodoro;
mod stopwatch;

pub use pomodoro::{
    Phase, PomodoroEngine, PomodoroState, DEFAULT_FOCUS_MIN, DEFAULT_LONG_BREAK_MIN,
    DEFAULT_SHORT_BREAK_MIN,
};
pub use stopwatch::{Lap, SessionDraft, StopwatchEngine, StopwatchState};
