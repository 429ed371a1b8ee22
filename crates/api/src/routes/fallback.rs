use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

const NOT_FOUND_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Veriprint | Page not found</title></head>
<body><main><h1>Page not found</h1><p><a href="/">Back to the home page</a></p></main></body>
</html>
"#;

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_HTML))
}
