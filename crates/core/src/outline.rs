//! Plain-text outline of a slide plan.
//!
//! One block per slide, blocks separated by a blank line:
//!
//! ```text
//! 1. [title] Quarterly Report
//!    Q1 2025
//!    Jane Doe
//!
//! 2. [two-column-table] Treasury
//!    Item | Amount
//!    Offerings | $1,200
//! ```

use crate::types::{ResolvedSlide, SlideData, SlidePlan};

/// Formatter for plain-text slide outlines.
#[derive(Debug, Clone, Default)]
pub struct OutlineFormatter {
    /// Whether to list icon prompts under each slide.
    include_prompts: bool,
}

impl OutlineFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether icon prompts are listed under each slide.
    pub fn with_prompts(mut self, include: bool) -> Self {
        self.include_prompts = include;
        self
    }

    /// Format a plan as an outline.
    pub fn format(&self, plan: &SlidePlan) -> String {
        plan.iter()
            .enumerate()
            .map(|(idx, slide)| self.format_slide(idx + 1, slide))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format with a trailing newline when the outline is non-empty.
    pub fn format_with_newline(&self, plan: &SlidePlan) -> String {
        let formatted = self.format(plan);
        if formatted.is_empty() {
            formatted
        } else {
            format!("{}\n", formatted)
        }
    }

    fn format_slide(&self, number: usize, slide: &ResolvedSlide) -> String {
        let mut lines = vec![format!(
            "{}. [{}] {}",
            number,
            slide.layout.as_str(),
            slide.title
        )];

        match &slide.data {
            SlideData::Title { subtitle, author } => {
                lines.extend(subtitle.iter().cloned());
                lines.extend(author.iter().cloned());
            }
            SlideData::Table { table } => {
                lines.push(table.headers.join(" | "));
                lines.extend(table.rows.iter().map(|row| row.join(" | ")));
            }
            SlideData::List { list, .. } => {
                lines.extend(list.iter().map(|item| format!("- {}", item)));
            }
            SlideData::Summary { kpis } => {
                lines.extend(kpis.iter().map(|k| format!("{}: {}", k.label, k.value)));
            }
            SlideData::Photos { images } => lines.extend(images.iter().cloned()),
            SlideData::Chart { chart } => {
                lines.push(format!(
                    "{} chart of {} by {}",
                    chart.chart_type.as_str(),
                    chart.value_column,
                    chart.label_column
                ));
                lines.extend(
                    chart
                        .points
                        .iter()
                        .map(|p| format!("{}: {}", p.label, p.value)),
                );
            }
        }

        if self.include_prompts {
            if let Some(prompt) = &slide.original_layout.generative_icon_prompt {
                lines.push(format!("icon: {}", prompt));
            }
        }

        let (head, body) = lines.split_at(1);
        let mut block = head[0].clone();
        for line in body {
            block.push_str("\n   ");
            block.push_str(line);
        }
        block
    }
}
