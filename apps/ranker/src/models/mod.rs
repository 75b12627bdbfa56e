pub mod ranking;

pub use ranking::{CandidateResult, Evidence, RankRequest, RankResponse, ZipUpload};
