//! Block-path resolution: find the longest existing wrapper chain.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::domain::error::DomainError;
use crate::domain::routes::scan::{Block, BlockSpan, Outline};
use crate::domain::wrapper::{Wrapper, WrapperPath};

/// What to do when two sibling blocks carry the same wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorPolicy {
    /// The first block in file order is used.
    #[default]
    First,
    /// Duplicate siblings fail with [`DomainError::AmbiguousAnchor`].
    Reject,
}

/// Result of matching a [`WrapperPath`] against a routes file.
///
/// `chain` holds one span per matched wrapper, outermost first; its length is
/// the matched prefix length. `container` is the outermost enclosing block
/// (`routes.draw do`), when the file has one. `nested` lists the blocks
/// opened directly inside the innermost match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub container: Option<BlockSpan>,
    pub chain: Vec<BlockSpan>,
    pub nested: Vec<BlockSpan>,
}

impl MatchResult {
    /// Number of wrappers, from the outermost, that already exist.
    pub fn matched(&self) -> usize {
        self.chain.len()
    }

    pub fn is_full(&self, wrappers: &WrapperPath) -> bool {
        self.chain.len() == wrappers.len()
    }

    /// Indentation of the outermost matched wrapper.
    pub fn base_indent(&self) -> Option<usize> {
        self.chain.first().map(|s| s.indent)
    }

    /// Indentation of the innermost matched wrapper.
    pub fn inner_indent(&self) -> Option<usize> {
        self.innermost().map(|s| s.indent)
    }

    pub fn innermost(&self) -> Option<&BlockSpan> {
        self.chain.last()
    }

    /// The block new text is placed in: the innermost match, else the container.
    pub fn anchor(&self) -> Option<&BlockSpan> {
        self.innermost().or(self.container.as_ref())
    }

    /// Body lines of the innermost matched wrapper.
    pub fn body(&self) -> Option<Range<usize>> {
        self.innermost().map(BlockSpan::body)
    }

    /// Whether `line` sits in the innermost body itself rather than inside
    /// one of its nested blocks. Opener lines of nested blocks count as direct.
    pub fn is_direct(&self, line: usize) -> bool {
        self.body().is_some_and(|body| body.contains(&line))
            && !self.nested.iter().any(|b| b.open < line && line <= b.close)
    }
}

/// Walk the outline, matching one wrapper per nesting level.
pub(crate) fn resolve(
    wrappers: &WrapperPath,
    outline: &Outline,
    policy: AnchorPolicy,
) -> Result<MatchResult, DomainError> {
    let container = outline.container().map(|b| b.span);
    let mut candidates = outline.roots();
    let mut chain = Vec::with_capacity(wrappers.len());
    let mut nested = Vec::new();

    for wrapper in wrappers {
        let Some(block) = find_child(candidates, wrapper, policy)? else {
            trace!(%wrapper, "wrapper not present, stopping");
            break;
        };
        chain.push(block.span);
        nested = block.children.iter().map(|c| c.span).collect();
        candidates = &block.children;
    }

    debug!(
        matched = chain.len(),
        requested = wrappers.len(),
        has_container = container.is_some(),
        "Resolved wrapper path"
    );

    Ok(MatchResult {
        container,
        chain,
        nested,
    })
}

fn find_child<'a>(
    blocks: &'a [Block],
    wrapper: &Wrapper,
    policy: AnchorPolicy,
) -> Result<Option<&'a Block>, DomainError> {
    let mut candidates = Vec::new();
    collect_matches(blocks, wrapper, &mut candidates);
    let mut found = candidates.into_iter();
    let first = found.next();

    if policy == AnchorPolicy::Reject {
        if let (Some(first), Some(second)) = (first, found.next()) {
            return Err(DomainError::AmbiguousAnchor {
                wrapper: wrapper.to_string(),
                first_line: first.span.open + 1,
                second_line: second.span.open + 1,
            });
        }
    }

    Ok(first)
}

/// Matching siblings at this level; failing those, matches reached through
/// generic blocks such as `constraints(..) do`. Other wrappers are never
/// entered, since that would change the path.
fn collect_matches<'a>(blocks: &'a [Block], wrapper: &Wrapper, out: &mut Vec<&'a Block>) {
    let direct: Vec<&Block> = blocks.iter().filter(|b| b.matches(wrapper)).collect();
    if !direct.is_empty() {
        out.extend(direct);
        return;
    }
    for generic in blocks.iter().filter(|b| b.wrapper.is_none()) {
        collect_matches(&generic.children, wrapper, out);
    }
}
