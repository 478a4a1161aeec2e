//! Icon prompts for section slides.
//!
//! Maps a section title to a descriptive prompt handed to an external
//! image generator. First matching keyword group wins.

/// Keyword groups and their prompts, in priority order.
const ICON_PROMPTS: &[(&[&str], &str)] = &[
    (
        &["financ", "treasur", "receipt", "disburse", "budget", "offering"],
        "A clean flat icon of a ledger book with coins and a rising bar graph, representing church finances and treasury",
    ),
    (
        &["member", "attendance"],
        "A clean flat icon of a group of people gathered together, representing church membership and attendance",
    ),
    (
        &["program", "activit", "ministr"],
        "A clean flat icon of a calendar with a star and a speech bubble, representing church programs and activities",
    ),
    (
        &["youth", "child"],
        "A clean flat icon of young people and children with a bright sun, representing youth and children's ministry",
    ),
    (
        &["outreach", "mission"],
        "A clean flat icon of a globe with an open hand reaching out, representing community outreach and missions",
    ),
];

/// Prompt used when no keyword group matches.
const FALLBACK_PROMPT: &str =
    "A clean flat icon of a church building with a document, representing ministry and administration";

/// Descriptive icon prompt for a section title.
pub fn prompt_for(section_title: &str) -> &'static str {
    let title = section_title.to_lowercase();

    ICON_PROMPTS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| title.contains(k)))
        .map(|(_, prompt)| *prompt)
        .unwrap_or(FALLBACK_PROMPT)
}

/// Icon prompt for a chart slide of the given chart type.
pub fn chart_prompt(chart_type: &str, subject: &str) -> String {
    format!(
        "A {} chart icon in a clean flat style, summarizing {}",
        chart_type,
        subject.to_lowercase()
    )
}
