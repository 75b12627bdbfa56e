// Presentation layer: turns a ranking outcome into something a person reads.
// Nothing here talks to the network directly; it goes through RankingService.

pub mod render;
pub mod submission;

pub use render::{render_raw, render_response};
pub use submission::{Submission, SubmissionState};
