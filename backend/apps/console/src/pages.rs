//! Page shells
//!
//! The server only serves the shells; the screens themselves talk to the
//! hospital API from the browser.

use axum::extract::{Path, State};
use axum::response::Html;

use crate::app::ConsoleState;

/// Dashboard sections and their titles
pub const SECTIONS: &[(&str, &str)] = &[
    ("blogs", "Blogs"),
    ("news", "News"),
    ("patient", "Patients"),
    ("patients", "Patients"),
    ("doctors", "Doctors"),
    ("international-patients", "International Patients"),
    ("settings", "Settings"),
];

pub fn section_title(section: &str) -> &'static str {
    let head = section.split('/').next().unwrap_or_default();
    SECTIONS
        .iter()
        .find(|(slug, _)| *slug == head)
        .map(|(_, title)| *title)
        .unwrap_or("Dashboard")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn shell(title: &str, api_base: &str, body: &str) -> Html<String> {
    let api_base = html_escape(api_base);
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Hospital Console</title>\n\
         <link rel=\"icon\" href=\"/favicon.ico\">\n\
         <link rel=\"stylesheet\" href=\"/static/main.css\">\n</head>\n\
         <body data-api-base=\"{api_base}\">\n{body}\n\
         <script type=\"module\" src=\"/static/console.js\"></script>\n</body>\n</html>\n"
    ))
}

/// GET /
pub async fn login(State(state): State<ConsoleState>) -> Html<String> {
    shell(
        "Sign in",
        &state.settings.api_base,
        "<main id=\"login\" data-guard=\"public-root\"></main>",
    )
}

/// GET /dashboard
pub async fn dashboard(State(state): State<ConsoleState>) -> Html<String> {
    shell(
        "Dashboard",
        &state.settings.api_base,
        "<main id=\"dashboard\" data-guard=\"protected\" data-section=\"overview\"></main>",
    )
}

/// GET /dashboard/{*section}
pub async fn dashboard_section(
    State(state): State<ConsoleState>,
    Path(section): Path<String>,
) -> Html<String> {
    let title = section_title(&section);
    let slug: String = section
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '/'))
        .collect();
    shell(
        title,
        &state.settings.api_base,
        &format!("<main id=\"dashboard\" data-guard=\"protected\" data-section=\"{slug}\"></main>"),
    )
}

/// GET /api/health
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
