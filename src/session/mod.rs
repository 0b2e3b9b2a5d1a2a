pub mod dialog;
pub mod form;
pub mod tally;
pub mod types;

pub use dialog::{Applied, Dialog, PendingInput, SubmitOutcome};
pub use form::LineForm;
pub use tally::{tally, ScoreEntry};
pub use types::{Player, Session, SessionError};
