use axum::response::Html;

use crate::render;

pub async fn home() -> Html<String> {
    Html(render::render_landing())
}
