//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered into the page's `#alert-container`, either as the
//! target of an error response or as an out-of-band swap alongside a
//! successful response.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// A message for the user with its styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// Something worked, with extra details.
    Success { message: String, details: String },
    /// Something worked.
    SuccessSimple { message: String },
    /// Something went wrong, with details on what to do about it.
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, String::new()),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html! {
            div class=(container_style) role="alert"
            {
                div class="flex items-start justify-between gap-4"
                {
                    div
                    {
                        p class="font-medium" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Fermer"
                        onclick="this.closest('[role=alert]').remove()"
                        class="font-bold"
                    {
                        "×"
                    }
                }
            }
        }
    }

    /// Render the alert so that htmx swaps it into `#alert-container`
    /// whatever the target of the request was.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div id="alert-container" hx-swap-oob="innerHTML"
            {
                (self.into_html())
            }
        }
    }

    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Html(self.into_html().into_string())).into_response()
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_response_with_status(StatusCode::OK)
    }
}

const SUCCESS_STYLE: &str = "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
    dark:bg-gray-800 dark:text-green-400 shadow";

const ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 shadow";
