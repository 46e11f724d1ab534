//! Error page

use maud::{html, Markup};

use super::page;
use crate::error::ErrorPage;

/// Error page; the error detail is only included when `show_detail` is set
pub fn render(error: &ErrorPage, show_detail: bool) -> Markup {
    page(
        "Error",
        html! {
            h2 { (error.status.as_u16()) " " (error.message) }
            @if show_detail {
                pre { (error.detail) }
            }
        },
    )
}
