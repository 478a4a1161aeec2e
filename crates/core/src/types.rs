//! Domain types for representing a resolved slide plan.

use serde::Serialize;

/// An ordered, resolved slide plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SlidePlan {
    /// Slides in presentation order.
    pub slides: Vec<ResolvedSlide>,
}

impl SlidePlan {
    /// Number of slides in the plan.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the plan has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Iterate slides in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedSlide> {
        self.slides.iter()
    }

    /// Find a slide by id.
    pub fn get(&self, id: &str) -> Option<&ResolvedSlide> {
        self.slides.iter().find(|s| s.id == id)
    }

    /// Slides with the given layout, in order.
    pub fn with_layout(&self, layout: SlideLayout) -> Vec<&ResolvedSlide> {
        self.slides.iter().filter(|s| s.layout == layout).collect()
    }
}

impl IntoIterator for SlidePlan {
    type Item = ResolvedSlide;
    type IntoIter = std::vec::IntoIter<ResolvedSlide>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.into_iter()
    }
}

/// A single presentation-ready slide descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSlide {
    /// Identifier, unique within the plan.
    pub id: String,

    /// Display title with template tokens already substituted.
    pub title: String,

    /// Visual layout the renderer should use.
    pub layout: SlideLayout,

    /// Layout-specific payload.
    pub data: SlideData,

    /// Hints for external collaborators (icon art, chart rendering).
    pub original_layout: OriginalLayout,
}

impl ResolvedSlide {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        layout: SlideLayout,
        data: SlideData,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            layout,
            data,
            original_layout: OriginalLayout::default(),
        }
    }

    /// Attach an icon-generation prompt.
    pub fn with_icon_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.original_layout.generative_icon_prompt = Some(prompt.into());
        self
    }

    /// Attach a chart suggestion.
    pub fn with_chart_suggestion(mut self, suggestion: ChartSuggestion) -> Self {
        self.original_layout.chart_suggestion = Some(suggestion);
        self
    }

    /// Content lines carried by list-style slides.
    pub fn list(&self) -> &[String] {
        match &self.data {
            SlideData::List { list, .. } => list,
            _ => &[],
        }
    }

    /// Images carried by photo-grid slides.
    pub fn images(&self) -> &[String] {
        match &self.data {
            SlideData::Photos { images } => images,
            _ => &[],
        }
    }
}

/// The visual layout of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideLayout {
    Title,
    TwoColumnTable,
    ImageLeftTextRight,
    SummaryKpi,
    PhotoGrid,
    FullChart,
}

impl SlideLayout {
    /// The layout tag as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlideLayout::Title => "title",
            SlideLayout::TwoColumnTable => "two-column-table",
            SlideLayout::ImageLeftTextRight => "image-left-text-right",
            SlideLayout::SummaryKpi => "summary-kpi",
            SlideLayout::PhotoGrid => "photo-grid",
            SlideLayout::FullChart => "full-chart",
        }
    }
}

/// Layout-specific slide payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SlideData {
    Title {
        #[serde(skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        author: Option<String>,
    },
    Table {
        table: TableData,
    },
    List {
        list: Vec<String>,
        image: Option<String>,
    },
    Summary {
        kpis: Vec<Kpi>,
    },
    Photos {
        images: Vec<String>,
    },
    Chart {
        chart: ChartData,
    },
}

/// A resolved table: every cell already looked up against the headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A labeled numeric highlight for the executive summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    /// Field label, or the value column's header when the field has none.
    pub label: String,

    /// Normalized numeric value.
    pub value: f64,

    /// Text of the aggregate row the value came from (e.g. "Total").
    pub row_label: String,
}

/// Chart type chosen for a derived series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Pie,
    Bar,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Pie => "pie",
            ChartType::Bar => "bar",
        }
    }
}

/// One labeled data point of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// A chart series derived from a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub chart_type: ChartType,
    pub label_column: String,
    pub value_column: String,
    pub points: Vec<ChartPoint>,
}

/// Suggests how a chart renderer should draw a slide's source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSuggestion {
    pub chart_type: ChartType,

    /// `"{sectionId}.{fieldId}"` of the table the chart was derived from.
    pub data_path: String,
}

/// Metadata carried alongside a slide for external collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalLayout {
    /// Prompt for icon art; `None` means no icon is requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generative_icon_prompt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_suggestion: Option<ChartSuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slide_serialization_shape() {
        let slide = ResolvedSlide::new(
            "financial-treasury-table",
            "Treasury",
            SlideLayout::TwoColumnTable,
            SlideData::Table {
                table: TableData {
                    headers: vec!["Item".to_string(), "Amount".to_string()],
                    rows: vec![vec!["Offerings".to_string(), "$1,200".to_string()]],
                },
            },
        )
        .with_icon_prompt("An icon");

        let value = serde_json::to_value(&slide).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "financial-treasury-table",
                "title": "Treasury",
                "layout": "two-column-table",
                "data": {"table": {"headers": ["Item", "Amount"], "rows": [["Offerings", "$1,200"]]}},
                "originalLayout": {"generativeIconPrompt": "An icon"}
            })
        );
    }

    #[test]
    fn test_chart_suggestion_serialization() {
        let slide = ResolvedSlide::new(
            "c",
            "C",
            SlideLayout::FullChart,
            SlideData::Photos { images: Vec::new() },
        )
        .with_chart_suggestion(ChartSuggestion {
            chart_type: ChartType::Pie,
            data_path: "financial.treasury".to_string(),
        });

        let value = serde_json::to_value(&slide.original_layout).unwrap();
        assert_eq!(
            value,
            json!({"chartSuggestion": {"chartType": "pie", "dataPath": "financial.treasury"}})
        );
    }

    #[test]
    fn test_layout_tags_match_serialization() {
        for layout in [
            SlideLayout::Title,
            SlideLayout::TwoColumnTable,
            SlideLayout::ImageLeftTextRight,
            SlideLayout::SummaryKpi,
            SlideLayout::PhotoGrid,
            SlideLayout::FullChart,
        ] {
            assert_eq!(serde_json::to_value(layout).unwrap(), json!(layout.as_str()));
        }
    }

    #[test]
    fn test_list_slide_keeps_null_image() {
        let data = SlideData::List {
            list: vec!["One".to_string()],
            image: None,
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"list": ["One"], "image": null})
        );
    }
}
