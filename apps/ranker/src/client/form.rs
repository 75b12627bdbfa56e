//! Field layout of the `/rank` multipart body.

use crate::models::RankRequest;

pub const ZIP_FIELD: &str = "resumes_zip";
pub const ZIP_MIME: &str = "application/zip";

/// The text fields that follow the zip part, in wire order.
/// Numbers go over the wire as their plain text representation.
pub fn text_fields(request: &RankRequest) -> Vec<(&'static str, String)> {
    vec![
        ("job_description", request.job_description.clone()),
        ("top_k", request.top_k.to_string()),
        ("skill_vs_exp_weight", request.skill_vs_exp_weight.to_string()),
    ]
}
