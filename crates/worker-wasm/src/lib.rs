//! WASM-compatible wrapper around the slide-plan resolver.
//!
//! The report form calls into this on every edit to refresh the slide
//! preview, so everything here is synchronous and never panics on
//! partially filled data.

use serde::Serialize;
use slideplan_core::{
    icon, parse_amount, FormData, ResolvedSlide, ResolverOptions, SlidePlanResolver, Template,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of resolving a slide plan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResult {
    /// Slides in presentation order.
    pub slides: Vec<ResolvedSlide>,
    /// Number of slides.
    pub slide_count: usize,
    /// Structural template problems that were skipped over.
    pub warnings: Vec<String>,
}

/// Resolve a template and its form data into slides.
///
/// # Arguments
/// * `template` - The report template object
/// * `form_data` - Form values keyed by section id, then field id
/// * `options` - Optional resolver settings (`photosPerPage`, `pieMaxPoints`, ...)
///
/// # Returns
/// A JavaScript object `{ slides, slideCount, warnings }`, or throws when the
/// inputs do not have the expected shape.
#[wasm_bindgen]
pub fn resolve_slides(
    template: JsValue,
    form_data: JsValue,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let template: Template = serde_wasm_bindgen::from_value(template)
        .map_err(|e| JsValue::from_str(&format!("Invalid template: {}", e)))?;
    let form_data: FormData = serde_wasm_bindgen::from_value(form_data)
        .map_err(|e| JsValue::from_str(&format!("Invalid form data: {}", e)))?;
    let options = if options.is_undefined() || options.is_null() {
        ResolverOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))?
    };

    let result = resolve_impl(&template, &form_data, &options);

    to_js(&result)
}

/// Resolve from JSON strings, for hosts that keep the form state serialized.
#[wasm_bindgen]
pub fn resolve_slides_json(template_json: &str, form_data_json: &str) -> Result<String, JsValue> {
    resolve_json_impl(template_json, form_data_json).map_err(|e| JsValue::from_str(&e))
}

/// Icon prompt for a section title.
#[wasm_bindgen]
pub fn icon_prompt(section_title: &str) -> String {
    icon::prompt_for(section_title).to_string()
}

/// Parse a currency or accounting amount; `undefined` when it is not a number.
#[wasm_bindgen]
pub fn normalize_amount(raw: Option<String>) -> Option<f64> {
    parse_amount(raw.as_deref())
}

fn resolve_impl(template: &Template, form_data: &FormData, options: &ResolverOptions) -> ResolveResult {
    let warnings = template.issues();
    if !warnings.is_empty() {
        log::warn!(
            "Template '{}' has {} structural issue(s); affected fields are skipped",
            template.id,
            warnings.len()
        );
    }

    let slides = SlidePlanResolver::with_options(options)
        .resolve(template, form_data)
        .slides;

    ResolveResult {
        slide_count: slides.len(),
        slides,
        warnings,
    }
}

fn resolve_json_impl(template_json: &str, form_data_json: &str) -> Result<String, String> {
    let template = Template::from_json_str(template_json)
        .map_err(|e| format!("Invalid template: {}", e))?;
    let form_data = FormData::from_json_str(form_data_json)
        .map_err(|e| format!("Invalid form data: {}", e))?;

    let result = resolve_impl(&template, &form_data, &ResolverOptions::default());

    serde_json::to_string(&result).map_err(|e| format!("Serialization error: {}", e))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
