//! UI-free quiz core: session state, scoring, attempt gating, fullscreen
//! lifecycle and keyboard mapping.

pub mod fullscreen;
pub mod gate;
pub mod keys;
pub mod model;
pub mod review;
pub mod scorer;
pub mod session;

pub use gate::{AttemptGate, GateDecision};
pub use model::{AttemptRecord, Question, QuizDay};
pub use session::{QuestionStatus, QuizSession, Submission};
