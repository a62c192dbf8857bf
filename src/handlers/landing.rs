use axum::{http::Uri, response::Html};
use tracing::{debug, instrument};

use crate::error::AppError;

const LANDING_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>DovvyBuddy | AI Diving Assistant</title>
    <meta name="description" content="Get expert scuba diving advice powered by AI. Explore dive sites, plan trips, and learn diving safety with DovvyBuddy.">
    <link rel="stylesheet" href="/static/styles.css">
</head>
<body>
    <main class="hero">
        <section class="hero-content">
            <h1>DovvyBuddy</h1>
            <p class="tagline">AI Diving Assistant — Starter app (V1)</p>
            <div class="actions">
                <a href="#" class="button primary">Get Started</a>
                <a href="/api/health" class="button secondary">Health</a>
            </div>
        </section>
    </main>
</body>
</html>"##;

/// Serves the landing page.
///
/// GET /
#[instrument]
pub async fn landing_page() -> Html<&'static str> {
    debug!("Landing page accessed");
    Html(LANDING_PAGE)
}

/// Fallback for every route the router does not know.
#[instrument]
pub async fn not_found(uri: Uri) -> AppError {
    debug!(%uri, "No route matched");
    AppError::NotFound("Resource not found")
}
