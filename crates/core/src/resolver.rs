//! Slide-plan resolution.
//!
//! Walks a template's sections in declared order and turns the matching form
//! data into presentation-ready slides. Resolution never fails: anything that
//! yields no meaningful content simply produces no slide.

use crate::chart::ChartDeriver;
use crate::form::{FieldValue, FormData, TableRow};
use crate::icon;
use crate::paginate::PhotoPaginator;
use crate::summary::KpiCollector;
use crate::template::{Field, FieldKind, Section, Template, HEADER_SECTION};
use crate::types::{
    ChartSuggestion, ResolvedSlide, SlideData, SlideLayout, SlidePlan, TableData,
};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Regex matching `{{token}}` placeholders.
static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap());

/// Header field ids recognized as the reporting period.
const QUARTER_ALIASES: &[&str] = &["quarter", "reportingPeriod", "period"];

/// Header field ids recognized as the report's author.
const PREPARED_BY_ALIASES: &[&str] = &["preparedBy", "prepared_by", "author", "submittedBy"];

/// Tunable resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverOptions {
    /// Images per photo-grid slide.
    pub photos_per_page: usize,

    /// Largest chart still drawn as a pie.
    pub pie_max_points: usize,

    /// Fewest KPIs that still earn an executive-summary slide.
    pub min_kpis: usize,

    /// Most KPIs shown on the executive-summary slide.
    pub max_kpis: usize,

    /// Title slide pattern; supports `{{title}}`, `{{quarter}}` and `{{preparedBy}}`.
    pub title_pattern: String,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            photos_per_page: 4,
            pie_max_points: 5,
            min_kpis: 2,
            max_kpis: 4,
            title_pattern: "{{title}}".to_string(),
        }
    }
}

/// Resolves templates and form data into slide plans.
#[derive(Debug, Clone)]
pub struct SlidePlanResolver {
    title_pattern: String,
    paginator: PhotoPaginator,
    charts: ChartDeriver,
    kpis: KpiCollector,
}

impl Default for SlidePlanResolver {
    fn default() -> Self {
        Self::with_options(&ResolverOptions::default())
    }
}

impl SlidePlanResolver {
    /// Create a resolver with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver from explicit settings.
    pub fn with_options(options: &ResolverOptions) -> Self {
        Self {
            title_pattern: options.title_pattern.clone(),
            paginator: PhotoPaginator::new().with_photos_per_page(options.photos_per_page),
            charts: ChartDeriver::new().with_pie_max_points(options.pie_max_points),
            kpis: KpiCollector::new()
                .with_min_kpis(options.min_kpis)
                .with_max_kpis(options.max_kpis),
        }
    }

    /// Resolve a template and its form data into an ordered slide plan.
    pub fn resolve(&self, template: &Template, data: &FormData) -> SlidePlan {
        for issue in template.issues() {
            log::warn!("Template '{}': {}", template.id, issue);
        }

        let mut plan = PlanBuilder::default();
        plan.push(self.title_slide(template, data));

        for section in template.content_sections() {
            self.section_slides(section, data, &mut plan);
        }

        if let Some(kpis) = self.kpis.collect(template, data) {
            log::debug!("Executive summary with {} KPI(s)", kpis.len());
            plan.push(ResolvedSlide::new(
                "executive-summary",
                "Executive Summary",
                SlideLayout::SummaryKpi,
                SlideData::Summary { kpis },
            ));
        }

        log::debug!("Resolved {} slide(s)", plan.len());
        plan.finish()
    }

    fn title_slide(&self, template: &Template, data: &FormData) -> ResolvedSlide {
        let subtitle = header_value(data, QUARTER_ALIASES);
        let author = header_value(data, PREPARED_BY_ALIASES);

        let title = {
            let mut tokens = HashMap::new();
            tokens.insert("title", template.title.as_str());
            if let Some(quarter) = &subtitle {
                tokens.insert("quarter", quarter.as_str());
            }
            if let Some(prepared_by) = &author {
                tokens.insert("preparedBy", prepared_by.as_str());
            }
            substitute_tokens(&self.title_pattern, &tokens)
        };

        ResolvedSlide::new(
            "title",
            title,
            SlideLayout::Title,
            SlideData::Title { subtitle, author },
        )
    }

    fn section_slides(&self, section: &Section, data: &FormData, plan: &mut PlanBuilder) {
        let mut tables = Vec::new();
        let mut bullets = Vec::new();
        let mut photos = Vec::new();
        let mut scalars = Vec::new();

        for field in &section.fields {
            match &field.kind {
                FieldKind::Table { columns, .. } => tables.push((field, columns.as_slice())),
                FieldKind::BulletList => bullets.push(field),
                FieldKind::PhotoCollection => photos.push(field),
                FieldKind::Text | FieldKind::Textarea | FieldKind::Number | FieldKind::Date => {
                    scalars.push(field)
                }
                FieldKind::Signature => {}
            }
        }

        let icon_prompt = icon::prompt_for(&section.title);
        let before = plan.len();

        for (field, columns) in tables {
            let FieldValue::Table(rows) = data.value(&section.id, field) else {
                continue;
            };
            self.table_slides(section, field, columns, &rows, icon_prompt, plan);
        }

        for field in bullets {
            let FieldValue::List(list) = data.value(&section.id, field) else {
                continue;
            };
            if list.is_empty() {
                continue;
            }
            plan.push(
                ResolvedSlide::new(
                    format!("{}-{}-list", section.id, field.id),
                    field.label_or(&section.title),
                    SlideLayout::ImageLeftTextRight,
                    SlideData::List { list, image: None },
                )
                .with_icon_prompt(icon_prompt),
            );
        }

        for field in photos {
            let FieldValue::Photos(images) = data.value(&section.id, field) else {
                continue;
            };
            let base = field.label_or(&section.title);
            for page in self.paginator.paginate(&images) {
                plan.push(ResolvedSlide::new(
                    format!("{}-{}-photos-{}", section.id, field.id, page.number),
                    page.title(base),
                    SlideLayout::PhotoGrid,
                    SlideData::Photos { images: page.images },
                ));
            }
        }

        let details: Vec<String> = scalars
            .into_iter()
            .filter_map(|field| match data.value(&section.id, field) {
                FieldValue::Text(value) => {
                    Some(format!("{}: {}", field.label_or(&field.id), value))
                }
                _ => None,
            })
            .collect();
        if !details.is_empty() {
            plan.push(
                ResolvedSlide::new(
                    format!("{}-details", section.id),
                    section.title.as_str(),
                    SlideLayout::ImageLeftTextRight,
                    SlideData::List {
                        list: details,
                        image: None,
                    },
                )
                .with_icon_prompt(icon_prompt),
            );
        }

        log::debug!(
            "Section '{}' produced {} slide(s)",
            section.id,
            plan.len() - before
        );
    }

    fn table_slides(
        &self,
        section: &Section,
        field: &Field,
        columns: &[String],
        rows: &[TableRow],
        icon_prompt: &str,
        plan: &mut PlanBuilder,
    ) {
        let base = field.label_or(&section.title);

        if columns.is_empty() {
            log::debug!(
                "Skipping table slide for '{}.{}': no columns declared",
                section.id,
                field.id
            );
        } else {
            let resolved: Vec<Vec<String>> = rows
                .iter()
                .map(|row| row.resolve(columns))
                .filter(|cells| cells.iter().any(|c| !c.is_empty()))
                .collect();

            if !resolved.is_empty() {
                plan.push(
                    ResolvedSlide::new(
                        format!("{}-{}-table", section.id, field.id),
                        base,
                        SlideLayout::TwoColumnTable,
                        SlideData::Table {
                            table: TableData {
                                headers: columns.to_vec(),
                                rows: resolved,
                            },
                        },
                    )
                    .with_icon_prompt(icon_prompt),
                );

                if let Some(chart) = self.charts.derive(columns, rows) {
                    let chart_type = chart.chart_type;
                    plan.push(
                        ResolvedSlide::new(
                            format!("{}-{}-chart", section.id, field.id),
                            format!("{} - Chart", base),
                            SlideLayout::FullChart,
                            SlideData::Chart { chart },
                        )
                        .with_icon_prompt(icon::chart_prompt(chart_type.as_str(), base))
                        .with_chart_suggestion(ChartSuggestion {
                            chart_type,
                            data_path: format!("{}.{}", section.id, field.id),
                        }),
                    );
                }
            }
        }

        let row_photos: Vec<String> = rows.iter().flat_map(|r| r.photos.iter().cloned()).collect();
        let photo_title = format!("{} - Photos", base);
        for page in self.paginator.paginate(&row_photos) {
            plan.push(ResolvedSlide::new(
                format!("{}-{}-row-photos-{}", section.id, field.id, page.number),
                page.title(&photo_title),
                SlideLayout::PhotoGrid,
                SlideData::Photos { images: page.images },
            ));
        }
    }
}

/// Accumulates slides in order, keeping ids unique across the plan.
///
/// Section and field ids may themselves contain `-`, so two distinct fields
/// can compose the same id; later slides get a `-2`, `-3`, ... suffix.
#[derive(Debug, Default)]
struct PlanBuilder {
    slides: Vec<ResolvedSlide>,
    used_ids: HashSet<String>,
}

impl PlanBuilder {
    fn push(&mut self, mut slide: ResolvedSlide) {
        if !self.used_ids.insert(slide.id.clone()) {
            let mut n = 2;
            let id = loop {
                let candidate = format!("{}-{}", slide.id, n);
                if self.used_ids.insert(candidate.clone()) {
                    break candidate;
                }
                n += 1;
            };
            log::debug!("Slide id '{}' already taken, using '{}'", slide.id, id);
            slide.id = id;
        }
        self.slides.push(slide);
    }

    fn len(&self) -> usize {
        self.slides.len()
    }

    fn finish(self) -> SlidePlan {
        SlidePlan {
            slides: self.slides,
        }
    }
}

/// First non-empty header value among the given field-id aliases.
fn header_value(data: &FormData, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find_map(|alias| data.text(HEADER_SECTION, alias))
}

/// Replace `{{token}}` placeholders; unknown tokens are left untouched.
pub fn substitute_tokens(pattern: &str, tokens: &HashMap<&str, &str>) -> String {
    TOKEN_REGEX
        .replace_all(pattern, |caps: &Captures| match tokens.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
