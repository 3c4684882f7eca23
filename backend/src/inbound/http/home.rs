//! Landing page.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get};

const WELCOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>AdoptMe</title>
  </head>
  <body>
    <h1>Welcome to AdoptMe</h1>
    <p>Browse the API reference at <a href="/api-docs/">/api-docs/</a>.</p>
  </body>
</html>
"#;

/// Serve the welcome page.
#[utoipa::path(
    get,
    path = "/",
    tags = ["home"],
    security([]),
    responses((status = 200, description = "Welcome page", content_type = "text/html"))
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(WELCOME_PAGE)
}
