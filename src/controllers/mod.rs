pub mod history;
pub mod submission;

pub use history::{HistoryController, LoadOutcome};
pub use submission::{SubmissionController, SubmitOutcome};
