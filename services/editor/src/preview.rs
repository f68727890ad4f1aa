//! Preview composition
//!
//! Turns the three editor fragments into one renderable document. The
//! composition is a pure function: no escaping, no sanitization, no
//! transformation of any fragment. The author of the fragments is also the
//! sole consumer of the rendered output, so transparency is the contract;
//! isolation is enforced at delivery time instead, by serving the document
//! under a sandboxing Content-Security-Policy.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

/// Sandbox policy for served previews: scripts may run, but the document
/// gets a unique opaque origin (no access to the host app's storage or
/// credentials) and may not navigate the top-level context. The server-side
/// twin of `<iframe sandbox="allow-scripts">`.
const PREVIEW_CSP: &str = "sandbox allow-scripts";

/// Fragments submitted for preview, using the editor's wire names.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewRequest {
    #[serde(rename = "htmlCode", default)]
    pub html_code: String,
    #[serde(rename = "cssCode", default)]
    pub css_code: String,
    #[serde(rename = "jsCode", default)]
    pub js_code: String,
}

/// Compose one document from the three fragments, verbatim.
///
/// Deterministic and side-effect-free: identical inputs produce
/// byte-identical output. Structure: a style block carrying the style
/// fragment, a body carrying the markup fragment, then a script block
/// carrying the script fragment.
pub fn compose(html: &str, css: &str, js: &str) -> String {
    format!(
        "<html>\n<head>\n<style>{css}</style>\n</head>\n<body>\n{html}\n<script>{js}</script>\n</body>\n</html>\n"
    )
}

/// Serve a composed preview document inside the sandboxed rendering context.
///
/// Composition happens only on this explicit request; the editor does not
/// re-render on every keystroke.
pub async fn preview(Json(request): Json<PreviewRequest>) -> Response {
    let document = compose(&request.html_code, &request.css_code, &request.js_code);

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CONTENT_SECURITY_POLICY, PREVIEW_CSP),
        ],
        document,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_is_deterministic() {
        let first = compose("<b>x</b>", "b{color:red}", "console.log(1)");
        let second = compose("<b>x</b>", "b{color:red}", "console.log(1)");
        assert_eq!(first, second);
    }

    #[test]
    fn fragments_appear_verbatim_and_unescaped() {
        let doc = compose("<b>x</b>", "b{color:red}", "console.log(1)");
        assert!(doc.contains("<style>b{color:red}</style>"));
        assert!(doc.contains("<b>x</b>"));
        assert!(doc.contains("<script>console.log(1)</script>"));
    }

    #[test]
    fn style_precedes_markup_precedes_script() {
        let doc = compose("MARKUP", "STYLE", "SCRIPT");
        let style = doc.find("STYLE").unwrap();
        let markup = doc.find("MARKUP").unwrap();
        let script = doc.find("SCRIPT").unwrap();
        assert!(style < markup);
        assert!(markup < script);
    }

    #[test]
    fn hostile_fragments_are_not_transformed() {
        let js = r#"document.cookie; window.top.location = "https://evil.example";"#;
        let doc = compose("", "", js);
        // Verbatim by design; isolation comes from the delivery headers,
        // not from rewriting the fragment
        assert!(doc.contains(js));
    }

    #[test]
    fn empty_fragments_still_yield_a_complete_document() {
        let doc = compose("", "", "");
        assert!(doc.starts_with("<html>"));
        assert!(doc.contains("<style></style>"));
        assert!(doc.contains("<script></script>"));
        assert!(doc.trim_end().ends_with("</html>"));
    }

    #[tokio::test]
    async fn preview_response_is_sandboxed_html() {
        let request = PreviewRequest {
            html_code: "<p>hi</p>".to_string(),
            css_code: "p{margin:0}".to_string(),
            js_code: "console.log(1)".to_string(),
        };

        let response = preview(Json(request)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            headers.get(header::CONTENT_SECURITY_POLICY).unwrap(),
            "sandbox allow-scripts"
        );
    }
}
