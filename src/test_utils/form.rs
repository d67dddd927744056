use scraper::{ElementRef, Html, Selector};

use super::html::{select_one, text_of};

/// The first form in `html`.
#[track_caller]
pub(crate) fn find_form(html: &Html) -> ElementRef<'_> {
    select_one(html, "form")
}

/// Assert that `form` is sent to `endpoint` with the htmx attribute `verb`,
/// e.g. `hx-post`.
#[track_caller]
pub(crate) fn assert_form_target(form: ElementRef<'_>, verb: &str, endpoint: &str) {
    assert_eq!(
        form.value().attr(verb),
        Some(endpoint),
        "form should be sent with {verb}"
    );
}

/// The required text input called `name`.
#[track_caller]
pub(crate) fn required_input<'a>(form: ElementRef<'a>, name: &str) -> ElementRef<'a> {
    let selector = Selector::parse(&format!("input[name=\"{name}\"]")).expect("Invalid selector");
    let input = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input called {name:?}"));

    assert_eq!(input.value().attr("type"), Some("text"), "{name} type");
    assert!(
        input.value().attr("required").is_some(),
        "{name} should be required"
    );

    input
}

/// The value of the required text input called `name`.
#[track_caller]
pub(crate) fn input_value(form: ElementRef<'_>, name: &str) -> String {
    required_input(form, name)
        .value()
        .attr("value")
        .unwrap_or_default()
        .to_owned()
}

/// The label of the form's submit button.
#[track_caller]
pub(crate) fn submit_label(form: ElementRef<'_>) -> String {
    let button = form
        .select(&Selector::parse("button[type=submit]").expect("Invalid selector"))
        .next()
        .expect("No submit button");

    text_of(button)
}

/// The error message shown inside the form.
#[track_caller]
pub(crate) fn form_error(form: ElementRef<'_>) -> String {
    let message = form
        .select(&Selector::parse("p").expect("Invalid selector"))
        .next()
        .expect("No error message");

    text_of(message)
}
