//! Core domain types, numeric normalization, and slide-plan resolution
//! for quarterly-report slide decks.

pub mod chart;
pub mod columns;
pub mod error;
pub mod form;
pub mod icon;
pub mod normalize;
pub mod outline;
pub mod paginate;
pub mod resolver;
pub mod summary;
pub mod template;
pub mod types;

pub use error::{Error, Result};
pub use form::{CellValue, FieldValue, FormData, Signature, TableRow};
pub use normalize::parse_amount;
pub use outline::OutlineFormatter;
pub use resolver::{ResolverOptions, SlidePlanResolver};
pub use template::{Field, FieldKind, Section, Template};
pub use types::{
    ChartData, ChartPoint, ChartSuggestion, ChartType, Kpi, OriginalLayout, ResolvedSlide,
    SlideData, SlideLayout, SlidePlan, TableData,
};
