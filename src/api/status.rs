use axum::{extract::State, response::Html};
use std::sync::Arc;

use super::AppState;

/// GET /
/// Plain status page; confirms the process is up and which store it talks to.
pub async fn status_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let database_url = &state.config().general.database_url;
    let uptime_seconds = state.start_time.elapsed().as_secs();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Server Status</title>
</head>
<body>
  <h1>The server is running!</h1>
  <p>The database connection is {database_url}</p>
  <p>Uptime: {uptime_seconds}s</p>
</body>
</html>
"#
    ))
}
