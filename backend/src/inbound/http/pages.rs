//! Server-rendered pages.
//!
//! Both pages are static Hebrew RTL documents compiled into the binary. The
//! dashboard talks to the JSON API from the browser.

use actix_web::{HttpResponse, get, http::header::ContentType};

const HOME_PAGE: &str = include_str!("../../../assets/home.html");
const DASHBOARD_PAGE: &str = include_str!("../../../assets/dashboard.html");

fn html(page: &'static str) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(page)
}

/// Landing page.
#[get("/")]
pub async fn home() -> HttpResponse {
    html(HOME_PAGE)
}

/// Resident dashboard.
#[get("/dashboard")]
pub async fn dashboard() -> HttpResponse {
    html(DASHBOARD_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use rstest::rstest;

    #[rstest]
    #[case::home("/", "dir=\"rtl\"")]
    #[case::dashboard("/dashboard", "/api/medical-research")]
    #[actix_web::test]
    async fn serves_html(#[case] uri: &str, #[case] marker: &str) {
        let app = actix_test::init_service(App::new().service(home).service(dashboard)).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        assert!(content_type.starts_with("text/html"));
        let body = actix_test::read_body(response).await;
        let body = String::from_utf8(body.to_vec()).expect("utf-8 page");
        assert!(body.contains(marker), "{uri} should contain {marker}");
    }
}
