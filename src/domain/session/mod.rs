pub mod cache;
pub mod reconcile;

pub use cache::{SessionCache, SessionPhase};
pub use reconcile::{reconcile, Reconciled, RenderOutcome, SpeechForm};
