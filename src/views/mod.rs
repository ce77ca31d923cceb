/// Server-rendered HTML pages
mod auth;
mod dashboard;
mod forms;

pub use auth::{login_page, register_page};
pub use dashboard::{dashboard_page, DashboardView};
pub use forms::{driver_form_page, load_form_page};

use actix_web::http::StatusCode;

use crate::utils::Flash;

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Page chrome shared by every view. `username` is set for logged-in pages.
pub(crate) fn layout(title: &str, username: Option<&str>, flash: Option<Flash>, body: &str) -> String {
    let nav = match username {
        Some(name) => format!(
            "<nav><a href=\"/dashboard\">Dashboard</a> | <a href=\"/add_load\">New load</a> | \
<a href=\"/add_driver\">New driver</a> | <a href=\"/export_loads\">Export CSV</a> | \
<span>{}</span> <a href=\"/logout\">Log out</a></nav>",
            escape_html(name)
        ),
        None => "<nav><a href=\"/login\">Log in</a> | <a href=\"/register\">Register</a></nav>".to_string(),
    };
    let flash = flash
        .map(|f| format!("<p class=\"flash\">{}</p>", escape_html(f.message())))
        .unwrap_or_default();

    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{} | LoadPilot</title></head><body>\
<header><h1>LoadPilot</h1>{}</header>{}<main>{}</main></body></html>",
        escape_html(title),
        nav,
        flash,
        body
    )
}

pub(crate) fn error_message(message: Option<&str>) -> String {
    message
        .map(|m| format!("<p class=\"error\">{}</p>", escape_html(m)))
        .unwrap_or_default()
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h2>{} {}</h2><p>{}</p><p><a href=\"/dashboard\">Back to dashboard</a></p>",
        status.as_u16(),
        escape_html(status.canonical_reason().unwrap_or("Error")),
        escape_html(message)
    );
    layout("Error", None, None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom & Jerry's\"</b>"),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_error_page_mentions_status() {
        let html = error_page(StatusCode::FORBIDDEN, "nope");
        assert!(html.contains("403 Forbidden"));
        assert!(html.contains("nope"));
    }
}
