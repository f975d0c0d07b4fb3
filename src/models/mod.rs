pub mod action;
pub mod paper;
pub mod state;

pub use action::{Action, ActionKind};
pub use paper::{ErrorDocument, PaperRecord, PapersDocument};
pub use state::{ExtractedFields, RunState};
