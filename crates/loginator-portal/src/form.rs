//! Login form extraction.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, info};

use loginator_core::error::ParseError;
use loginator_core::{LoginForm, Result};

static FORM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form").expect("form selector is valid"));

static INPUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input").expect("input selector is valid"));

/// Extract the action and hidden fields of the first form in `html`.
///
/// Only `type="hidden"` inputs with a non-empty name are kept; visible
/// inputs are the user's to fill in and are ignored.
pub fn extract_form(html: &str) -> Result<LoginForm> {
    let doc = Html::parse_document(html);

    let form = doc.select(&FORM).next().ok_or(ParseError::NoForm)?;
    let action = form
        .value()
        .attr("action")
        .ok_or(ParseError::NoFormAction)?;

    let fields = form
        .select(&INPUT)
        .map(|input| input.value())
        .filter(|input| input.attr("type") == Some("hidden"))
        .filter_map(|input| {
            let name = input.attr("name").filter(|n| !n.is_empty())?;
            Some((name, input.attr("value").unwrap_or("")))
        });

    let form = LoginForm::new(action, fields);

    info!(action = form.action(), "Parsed form action");
    debug!(fields = form.fields().len(), "Parsed hidden fields");

    Ok(form)
}
