//! HTML status panel.

use askama::Template;
use axum::extract::State;
use axum::response::Html;

use crate::WebState;

#[derive(Template)]
#[template(path = "status.html")]
struct StatusTemplate {
    name: String,
    status: String,
    last_check: String,
    stock: u32,
    events: Vec<String>,
}

fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(
        tmpl.render()
            .unwrap_or_else(|e| format!("<pre>Template error: {e}</pre>")),
    )
}

/// GET /
pub async fn status_page(State(state): State<WebState>) -> Html<String> {
    let snap = state.watch.snapshot().await;
    render(StatusTemplate {
        name: state.product_name.clone(),
        status: snap.status.to_string(),
        last_check: snap
            .last_check
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "waiting for first run".to_string()),
        stock: snap.last_stock_count,
        events: snap.events.iter().map(str::to_string).collect(),
    })
}
