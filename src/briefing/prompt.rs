// src/briefing/prompt.rs
// Prompt construction for one briefing update

/// System instruction sent with every request
pub const SYSTEM_PROMPT: &str = "You are a technical documentation specialist. Extract and accumulate project knowledge from chronological events into a comprehensive briefing document. Be precise and factual.";

/// Rendered in place of the current briefing when there is none yet
pub const EMPTY_BRIEFING_MARKER: &str = "(Empty - this is the first batch)";

/// Sections the briefing is organized into
pub const BRIEFING_CATEGORIES: [&str; 7] = [
    "Project Identity & Purpose",
    "Tech Stack & Architecture",
    "Design Philosophy & Preferences",
    "Explicit Rejections (what NOT to do)",
    "Positive Feedback (what to preserve)",
    "Workflow & Process Rules",
    "Features & End Goals (what each feature should do)",
];

/// Build the user prompt for one batch.
///
/// `events_text` is the batch's rendered lines. A blank `current_briefing`
/// is replaced with [`EMPTY_BRIEFING_MARKER`] so the service can tell a
/// first batch from a lost briefing.
pub fn build_update_prompt(
    current_briefing: &str,
    events_text: &str,
    batch_number: usize,
    total_batches: usize,
) -> String {
    let briefing = if current_briefing.trim().is_empty() {
        EMPTY_BRIEFING_MARKER
    } else {
        current_briefing
    };

    let categories = BRIEFING_CATEGORIES
        .iter()
        .map(|c| format!("- {}", c))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are building a project briefing by processing chronological events.

## Current Briefing (what we know so far):
{briefing}

---

## New Events to Process (batch {batch_number}/{total_batches}):
{events_text}

---

## Your Task:
Analyze these new events and produce an UPDATED BRIEFING that:
1. Preserves all existing knowledge from the current briefing
2. Integrates new facts, preferences, and instructions from these events
3. Notes any CORRECTIONS or REJECTIONS where the user changed their mind
4. Captures design preferences, tech stack decisions, workflow rules

IMPORTANT: Do NOT track implementation status (broken, not working, WIP, etc).
If something is mentioned as broken or not yet implemented, just capture the END GOAL -
what the feature SHOULD do when complete. The briefing is about WHAT to build, not current state.

## Output Format:
Return ONLY the updated briefing as markdown. No explanations, no \"here's the updated briefing\" preamble.
The briefing should be a clean, organized document that could be given to a new developer.

Categories to track:
{categories}
"
    )
}
