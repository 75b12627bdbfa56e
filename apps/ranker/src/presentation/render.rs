//! Plain-text result view: one header line of detected job skills, then a card
//! per ranked candidate.

use crate::models::{CandidateResult, RankResponse};

pub const EMPTY_RESULTS: &str = "No candidates found.";

pub fn render_response(response: &RankResponse) -> String {
    let mut out = format!(
        "Job skills detected: {}\n",
        response.job_skills.join(", ")
    );

    if response.results.is_empty() {
        out.push_str(EMPTY_RESULTS);
        out.push('\n');
        return out;
    }

    for (rank, candidate) in response.results.iter().enumerate() {
        out.push('\n');
        out.push_str(&render_card(rank + 1, candidate));
    }
    out
}

fn render_card(rank: usize, candidate: &CandidateResult) -> String {
    let mut card = format!(
        "#{rank} {}  Overall: {}\n",
        candidate.display_name(),
        format_score(candidate.overall_score)
    );
    card.push_str(&format!(
        "  Skill match: {}\n",
        format_score(candidate.skill_match_score)
    ));
    card.push_str(&format!(
        "  Experience: {}\n",
        format_score(candidate.experience_score)
    ));
    card.push_str(&format!(
        "  Matched skills: {}\n",
        candidate.matched_skills.join(", ")
    ));
    card.push_str("  Top experiences:\n");
    for evidence in &candidate.demonstrated_experiences {
        card.push_str(&format!("    - {}\n", evidence.text));
    }
    card.push_str(&format!("  Explain: {}\n", candidate.explainability));
    card
}

/// Scores arrive as raw floats; three decimals is enough to compare candidates.
fn format_score(score: f64) -> String {
    format!("{score:.3}")
}

/// Pretty-printed JSON of the whole response, for debugging the service.
pub fn render_raw(response: &RankResponse) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(response)
}
