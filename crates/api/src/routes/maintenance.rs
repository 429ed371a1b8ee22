//! The page served while maintenance mode is on

use axum::http::{header, HeaderValue};
use axum::response::{Html, IntoResponse};

const MAINTENANCE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="robots" content="noindex">
<title>Veriprint | Down for maintenance</title>
<style>
body{margin:0;min-height:100vh;display:flex;align-items:center;justify-content:center;
font-family:'Inter','Helvetica Neue',Arial,sans-serif;background:#0b1526;color:#f4f6fa;text-align:center}
main{max-width:32rem;padding:2rem}
h1{font-size:1.75rem;margin-bottom:.75rem}
p{line-height:1.6;color:#c3cad8}
</style>
</head>
<body>
<main>
<h1>We&rsquo;ll be right back</h1>
<p>The Veriprint website is undergoing scheduled maintenance. Please check back shortly.</p>
</main>
</body>
</html>
"#;

/// `200` with `cache-control: no-store`, so no cache keeps serving it after
/// maintenance ends.
pub async fn maintenance_page() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        Html(MAINTENANCE_HTML),
    )
}
