//! Alert fragments for displaying success and error messages to users.
//!
//! Alerts render as htmx out-of-band swaps into the `#alert-container`
//! element that [base](crate::html::base) puts on every page, so any endpoint
//! can report an outcome without re-rendering the page around it.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

const ALERT_CONTAINER_STYLE: &str = "w-full max-w-md px-4";
const SUCCESS_ALERT_STYLE: &str = "flex items-start gap-3 p-4 mb-4 rounded-lg shadow \
    text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400";
const ERROR_ALERT_STYLE: &str = "flex items-start gap-3 p-4 mb-4 rounded-lg shadow \
    text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400";

/// Alert message types for styling.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertType {
    /// An operation succeeded.
    Success,
    /// An operation failed.
    Error,
}

/// A user-facing outcome message.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// Whether the alert reports a success or a failure.
    pub alert_type: AlertType,
    /// The headline of the alert.
    pub message: String,
    /// Supporting detail text; omitted from the markup when empty.
    pub details: String,
}

impl Alert {
    /// Create a new success alert.
    pub fn success(message: &str, details: &str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert without details.
    pub fn error_simple(message: &str) -> Self {
        Self::error(message, "")
    }

    /// Render the alert as an out-of-band fragment targeting the page's alert
    /// container.
    pub fn into_html(self) -> Markup {
        let style = match self.alert_type {
            AlertType::Success => SUCCESS_ALERT_STYLE,
            AlertType::Error => ERROR_ALERT_STYLE,
        };

        html! {
            div id="alert-container" hx-swap-oob="true" class=(ALERT_CONTAINER_STYLE)
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(style) role="alert"
                {
                    div
                    {
                        p class="font-medium" { (self.message) }

                        @if !self.details.is_empty() {
                            p class="text-sm" { (self.details) }
                        }
                    }

                    button
                        type="button"
                        class="ms-auto bg-transparent border-none cursor-pointer"
                        aria-label="Close"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "\u{2715}"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
