
use serde::Serialize;
use thiserror::Error;

/// Error returned when an exercise pattern fails validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("{phase:?} duration must be at least 1 second")]
    ZeroDuration { phase: Phase },
    #[error("total cycles must be at least 1")]
    NoCycles,
}

/// One phase of a breathing cycle
///
/// Phases advance in the fixed order Inhale -> Hold -> Exhale -> Inhale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    /// The phase that follows this one in the cycle
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Inhale => Self::Hold,
            Self::Hold => Self::Exhale,
            Self::Exhale => Self::Inhale,
        }
    }

    /// User-facing instruction for this phase
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Inhale => "Breathe In",
            Self::Hold => "Hold",
            Self::Exhale => "Breathe Out",
        }
    }
}

/// A breathing exercise definition - phase durations in seconds plus a cycle count
///
/// Durations are validated at construction so the engine never has to deal
/// with a zero-length phase stalling the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExercisePattern {
    pub name: String,
    pub description: String,
    inhale_seconds: u32,
    hold_seconds: u32,
    exhale_seconds: u32,
    total_cycles: u32,
}

impl ExercisePattern {
    /// Create a validated exercise pattern
    ///
    /// # Errors
    ///
    /// Returns an error if any phase duration is below 1 second or
    /// `total_cycles` is below 1.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        inhale_seconds: u32,
        hold_seconds: u32,
        exhale_seconds: u32,
        total_cycles: u32,
    ) -> Result<Self, PatternError> {
        if inhale_seconds < 1 {
            return Err(PatternError::ZeroDuration {
                phase: Phase::Inhale,
            });
        }
        if hold_seconds < 1 {
            return Err(PatternError::ZeroDuration { phase: Phase::Hold });
        }
        if exhale_seconds < 1 {
            return Err(PatternError::ZeroDuration {
                phase: Phase::Exhale,
            });
        }
        if total_cycles < 1 {
            return Err(PatternError::NoCycles);
        }
        Ok(Self {
            name: name.into(),
            description: description.into(),
            inhale_seconds,
            hold_seconds,
            exhale_seconds,
            total_cycles,
        })
    }

    /// 4-7-8 Technique: calming pattern for anxiety relief and falling asleep
    #[must_use]
    pub fn four_seven_eight() -> Self {
        Self {
            name: String::from("4-7-8 Technique"),
            description: String::from("Perfect for anxiety relief and falling asleep"),
            inhale_seconds: 4,
            hold_seconds: 7,
            exhale_seconds: 8,
            total_cycles: 4,
        }
    }

    /// Box Breathing: equal phases, used for focus and calm
    #[must_use]
    pub fn box_breathing() -> Self {
        Self {
            name: String::from("Box Breathing"),
            description: String::from("Used by Navy SEALs for focus and calm"),
            inhale_seconds: 4,
            hold_seconds: 4,
            exhale_seconds: 4,
            total_cycles: 6,
        }
    }

    /// Energizing Breath: quick pattern to boost energy and focus
    #[must_use]
    pub fn energizing() -> Self {
        Self {
            name: String::from("Energizing Breath"),
            description: String::from("Quick technique to boost energy and focus"),
            inhale_seconds: 3,
            hold_seconds: 2,
            exhale_seconds: 3,
            total_cycles: 8,
        }
    }

    /// All built-in exercise patterns
    #[must_use]
    pub fn presets() -> Vec<Self> {
        vec![
            Self::four_seven_eight(),
            Self::box_breathing(),
            Self::energizing(),
        ]
    }

    /// Duration of the given phase, in seconds
    #[must_use]
    pub const fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Inhale => self.inhale_seconds,
            Phase::Hold => self.hold_seconds,
            Phase::Exhale => self.exhale_seconds,
        }
    }

    /// Seconds in one full Inhale -> Hold -> Exhale cycle
    #[must_use]
    pub const fn cycle_seconds(&self) -> u32 {
        self.inhale_seconds + self.hold_seconds + self.exhale_seconds
    }

    /// Number of cycles in a full session
    #[must_use]
    pub const fn total_cycles(&self) -> u32 {
        self.total_cycles
    }
}

/// Run state of one breathing session
///
/// Owned by a single caller and threaded through `tick`; the engine never
/// keeps hidden session state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleState {
    pub phase: Phase,
    pub seconds_remaining: u32,
    pub completed_cycles: u32,
    pub running: bool,
}

/// Event emitted at a phase boundary
///
/// The presentation layer reacts to these (countdown refresh, haptic pulse
/// on phase change, completion chime).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CycleEvent {
    PhaseEntered { phase: Phase, seconds: u32 },
    SessionCompleted,
}

/// Drives a breathing session one second at a time
///
/// The engine does not own a timer; the caller invokes `tick` at a 1 Hz
/// cadence and renders the returned state. Stop pauses a session in place,
/// reset clears it back to the start.
pub struct BreathingEngine {
    pattern: ExercisePattern,
}

impl BreathingEngine {
    #[must_use]
    pub const fn new(pattern: ExercisePattern) -> Self {
        Self { pattern }
    }

    #[must_use]
    pub const fn pattern(&self) -> &ExercisePattern {
        &self.pattern
    }

    /// Begin a fresh session
    ///
    /// Starting while a previous session's state is still around simply
    /// produces a new initial state; only one session is active per engine.
    #[must_use]
    pub fn start(&self) -> (CycleState, CycleEvent) {
        let state = CycleState {
            phase: Phase::Inhale,
            seconds_remaining: self.pattern.inhale_seconds,
            completed_cycles: 0,
            running: true,
        };
        log::debug!(
            "started '{}' session: {} cycles of {}s",
            self.pattern.name,
            self.pattern.total_cycles,
            self.pattern.cycle_seconds()
        );
        (
            state,
            CycleEvent::PhaseEntered {
                phase: Phase::Inhale,
                seconds: self.pattern.inhale_seconds,
            },
        )
    }

    /// Advance the session by one second
    ///
    /// On a non-running state this is a no-op, not an error: the state comes
    /// back unchanged with no event. Crossing a phase boundary emits
    /// `PhaseEntered`; finishing the last exhale of the last cycle emits
    /// `SessionCompleted` and halts the session.
    #[must_use]
    pub fn tick(&self, state: CycleState) -> (CycleState, Option<CycleEvent>) {
        if !state.running {
            return (state, None);
        }

        let mut next = state;
        next.seconds_remaining = next.seconds_remaining.saturating_sub(1);
        if next.seconds_remaining > 0 {
            return (next, None);
        }

        // Phase boundary. Leaving Exhale closes out a cycle.
        if next.phase == Phase::Exhale {
            next.completed_cycles += 1;
            if next.completed_cycles == self.pattern.total_cycles {
                next.phase = Phase::Inhale;
                next.running = false;
                log::debug!(
                    "'{}' session completed after {} cycles",
                    self.pattern.name,
                    next.completed_cycles
                );
                return (next, Some(CycleEvent::SessionCompleted));
            }
        }

        next.phase = next.phase.next();
        next.seconds_remaining = self.pattern.duration_of(next.phase);
        (
            next,
            Some(CycleEvent::PhaseEntered {
                phase: next.phase,
                seconds: next.seconds_remaining,
            }),
        )
    }

    /// Pause the session in place, keeping phase and cycle counters
    #[must_use]
    pub fn stop(&self, state: CycleState) -> CycleState {
        CycleState {
            running: false,
            ..state
        }
    }

    /// Resume a paused session; a completed session stays halted
    #[must_use]
    pub fn resume(&self, state: CycleState) -> CycleState {
        if state.completed_cycles >= self.pattern.total_cycles {
            return state;
        }
        CycleState {
            running: true,
            ..state
        }
    }

    /// Clear back to the initial state, not running
    #[must_use]
    pub fn reset(&self) -> CycleState {
        CycleState {
            phase: Phase::Inhale,
            seconds_remaining: self.pattern.inhale_seconds,
            completed_cycles: 0,
            running: false,
        }
    }
}
