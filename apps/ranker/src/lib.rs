//! Client for the resume ranking service.
//!
//! `RankingClient::submit` uploads a zip of resumes with a job description and
//! returns the service's ranked candidates.

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod presentation;

pub use client::{RankingClient, RankingService};
pub use config::Config;
pub use errors::RankError;
pub use models::{CandidateResult, Evidence, RankRequest, RankResponse, ZipUpload};
