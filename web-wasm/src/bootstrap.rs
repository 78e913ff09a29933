//! Page bootstrap: JSON islands, navigation, server-rendered widgets

use careersync_common::config::{CONFIG_ELEMENT_ID, PAGE_ELEMENT_ID};
use careersync_common::dashboard::{conic_gradient, progress_from_attr};
use careersync_common::format::local_from_millis;
use careersync_common::{ClientConfig, Error, PageData};
use chrono::NaiveDateTime;
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Text of `<script id=... type="application/json">`, if present.
pub fn read_island(id: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    document.get_element_by_id(id)?.text_content()
}

/// Parsed config plus the error that forced defaults, if any. The error is
/// returned rather than logged because logging is not up yet.
pub fn parse_config(raw: Option<&str>) -> (ClientConfig, Option<Error>) {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => (ClientConfig::default(), None),
        Some(raw) => match ClientConfig::from_json(raw) {
            Ok(config) => (config, None),
            Err(e) => (ClientConfig::default(), Some(e)),
        },
    }
}

pub fn load_config() -> (ClientConfig, Option<Error>) {
    parse_config(read_island(CONFIG_ELEMENT_ID).as_deref())
}

pub fn parse_page(raw: Option<&str>) -> PageData {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return PageData::default();
    };
    PageData::from_json(raw).unwrap_or_else(|e| {
        warn!(error = %e, "invalid page data, using defaults");
        PageData::default()
    })
}

pub fn load_page() -> PageData {
    parse_page(read_island(PAGE_ELEMENT_ID).as_deref())
}

pub fn navigate(url: &str) {
    let Some(window) = web_sys::window() else { return };
    if let Err(e) = window.location().set_href(url) {
        warn!(url, error = ?e, "navigation failed");
    }
}

/// Browser-local wall-clock time.
pub fn now() -> Option<NaiveDateTime> {
    let date = js_sys::Date::new_0();
    local_from_millis(date.get_time(), date.get_timezone_offset())
}

/// Paint every server-rendered `.circle-progress` from its `data-progress`.
pub fn paint_progress_circles() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
    let Ok(circles) = document.query_selector_all(".circle-progress") else { return };

    for i in 0..circles.length() {
        let Some(el) = circles.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let progress = progress_from_attr(el.get_attribute("data-progress").as_deref());
        if let Err(e) = el.style().set_property("background", &conic_gradient(progress)) {
            warn!(error = ?e, "failed to paint progress circle");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careersync_common::Page;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_missing_island_gives_defaults() {
        let (config, error) = parse_config(None);
        assert_eq!(config, ClientConfig::default());
        assert!(error.is_none());
    }

    #[wasm_bindgen_test]
    fn test_bad_island_reports_error() {
        let (config, error) = parse_config(Some("{oops"));
        assert_eq!(config.toast_timeout_ms, 4000);
        assert!(error.is_some());
    }

    #[wasm_bindgen_test]
    fn test_page_island() {
        let page = parse_page(Some(r#"{"page": "dashboard", "jobs": [{"id": 1}]}"#));
        assert_eq!(page.page, Page::Dashboard);
        assert_eq!(page.jobs.len(), 1);
        assert_eq!(parse_page(Some("   ")).page, Page::Other);
    }
}
