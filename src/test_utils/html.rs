use axum::{body::Body, response::Response};
use scraper::{ElementRef, Html, Selector};

/// The response body as text.
async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    String::from_utf8(bytes.to_vec()).expect("Response body is not UTF-8")
}

/// Parse a full page and check that it is well formed.
pub(crate) async fn parse_page(response: Response<Body>) -> Html {
    let html = Html::parse_document(&body_text(response).await);
    assert_valid_html(&html);
    html
}

/// Parse an htmx fragment and check that it is well formed.
pub(crate) async fn parse_fragment(response: Response<Body>) -> Html {
    let html = Html::parse_fragment(&body_text(response).await);
    assert_valid_html(&html);
    html
}

#[track_caller]
fn assert_valid_html(html: &Html) {
    assert!(html.errors.is_empty(), "Malformed HTML: {:?}", html.errors);
}

/// The first element matching `selector`.
#[track_caller]
pub(crate) fn select_one<'a>(html: &'a Html, selector: &str) -> ElementRef<'a> {
    let parsed = Selector::parse(selector).expect("Invalid selector");

    html.select(&parsed)
        .next()
        .unwrap_or_else(|| panic!("Nothing matches {selector:?}"))
}

/// The trimmed text of every element matching `selector`.
pub(crate) fn texts(html: &Html, selector: &str) -> Vec<String> {
    let parsed = Selector::parse(selector).expect("Invalid selector");

    html.select(&parsed).map(text_of).collect()
}

/// The trimmed text content of `element`.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}
