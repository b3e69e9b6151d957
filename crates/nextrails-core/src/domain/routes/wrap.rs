//! Text synthesis for new wrapper blocks.

use crate::domain::routes::scan::indent_of;
use crate::domain::wrapper::{RouteEntry, Wrapper};

/// Indentation step used for every line the engine generates.
pub const INDENT_UNIT: usize = 2;

/// Strip the common leading whitespace of `code` and indent every non-blank
/// line by `indent` spaces. Each line is terminated with `eol`, blank lines
/// become empty.
pub fn rebase_indentation(code: &str, indent: usize, eol: &str) -> String {
    let margin = code
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(indent_of)
        .min()
        .unwrap_or(0);
    let pad = " ".repeat(indent);

    let mut out = String::with_capacity(code.len() + indent * 4);
    for line in code.lines() {
        if !line.trim().is_empty() {
            out.push_str(&pad);
            out.push_str(line[margin..].trim_end());
        }
        out.push_str(eol);
    }
    out
}

/// Fold `wrappers` around `entry`, innermost first, and re-base the result at
/// `base_indent`.
///
/// ```
/// use nextrails_core::domain::{RouteEntry, Wrapper, routes::wrap};
///
/// let entry = RouteEntry::new("resources :products").unwrap();
/// let wrappers = [Wrapper::scope("/api").unwrap(), Wrapper::namespace("admin").unwrap()];
/// assert_eq!(
///     wrap(&entry, &wrappers, 2, "\n"),
///     "  scope '/api' do\n    namespace :admin do\n      resources :products\n    end\n  end\n"
/// );
/// ```
pub fn wrap(entry: &RouteEntry, wrappers: &[Wrapper], base_indent: usize, eol: &str) -> String {
    let nested = wrappers
        .iter()
        .rev()
        .fold(entry.as_str().to_owned(), |code, wrapper| {
            format!(
                "{}\n{}end",
                wrapper.opener(),
                rebase_indentation(&code, INDENT_UNIT, "\n")
            )
        });
    rebase_indentation(&nested, base_indent, eol)
}
