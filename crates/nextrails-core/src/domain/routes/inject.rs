//! Forward direction: add a route, creating only the missing wrappers.

use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::routes::resolve::{AnchorPolicy, resolve};
use crate::domain::routes::scan::{Document, Outline};
use crate::domain::routes::wrap::{INDENT_UNIT, wrap};
use crate::domain::wrapper::{RouteEntry, WrapperPath};

pub(crate) fn inject(
    entry: &RouteEntry,
    wrappers: &WrapperPath,
    text: &str,
    policy: AnchorPolicy,
) -> Result<String, DomainError> {
    let mut doc = Document::parse(text);
    let outline = Outline::scan(&doc)?;
    let matched = resolve(wrappers, &outline, policy)?;
    let remainder = &wrappers.as_slice()[matched.matched()..];

    let (at, indent) = match matched.anchor() {
        // Every wrapper exists: append at the end of the innermost body.
        Some(anchor) if remainder.is_empty() => (anchor.close, anchor.indent + INDENT_UNIT),
        // Build the missing suffix right after the innermost opener.
        Some(anchor) => (anchor.open + 1, anchor.indent + INDENT_UNIT),
        // Nothing encloses the routes at all.
        None => (doc.len(), 0),
    };

    debug!(
        line = at + 1,
        indent,
        new_wrappers = remainder.len(),
        "Injecting route"
    );

    let code = wrap(entry, remainder, indent, doc.eol());
    doc.insert(at, &code);
    Ok(doc.render())
}
