pub mod breathing;
pub mod responder;

pub use breathing::{BreathingEngine, CycleEvent, CycleState, ExercisePattern, PatternError, Phase};
pub use responder::{Reply, Responder, ResponseCategory, ResponseRule};
