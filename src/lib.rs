pub mod api;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod render;
pub mod sequence;
pub mod session;
pub mod store;

pub use api::{ReviewApi, ReviewApiClient};
pub use config::Config;
pub use controllers::{HistoryController, LoadOutcome, SubmissionController, SubmitOutcome};
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use render::{render_analysis, render_history};
pub use session::ReviewSession;
pub use store::ReviewStore;
