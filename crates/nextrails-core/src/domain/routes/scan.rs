//! One-pass line scanner for `config/routes.rb`.
//!
//! Every line is classified as a wrapper opener, a generic block opener, a
//! closer, or opaque body text. A depth stack then folds the openers and
//! closers into a [`Block`] tree. No Ruby grammar beyond that is understood.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::DomainError;
use crate::domain::wrapper::{Wrapper, WrapperKind};

// Patterns run on the code part of a line, after `strip_comment`.

/// `namespace :admin do` / `scope '/api' do` (either quoting style on read).
static WRAPPER_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(namespace|scope)\s+(?::([A-Za-z_][A-Za-z0-9_]*)|'([^']*)'|"([^"]*)")\s+do\s*$"#)
        .expect("Invalid wrapper opener regex")
});

/// Any other line that opens a block closed by `end`. A trailing `do` must
/// be a keyword, so `get :do` stays body text.
static BLOCK_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(?:def|class|module|if|unless|case|begin|while|until|for)\b.*|(?:.*[^:\w])?do(?:\s*\|[^|]*\|)?\s*)$",
    )
    .expect("Invalid block opener regex")
});

/// A keyword opener that closes on the same line (`def ping; end`).
static INLINE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bend\s*$").expect("Invalid inline end regex"));

static CLOSER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*end\s*$").expect("Invalid closer regex"));

// ── Document ─────────────────────────────────────────────────────────────────

/// The target file as editable lines.
///
/// Each stored line keeps its own terminator so untouched lines render back
/// byte-for-byte. Inserted lines use the dominant terminator of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Document {
    lines: Vec<String>,
    eol: &'static str,
}

impl Document {
    pub(crate) fn parse(text: &str) -> Self {
        let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let lines = text.split_inclusive('\n').map(str::to_owned).collect();
        Self { lines, eol }
    }

    pub(crate) fn eol(&self) -> &'static str {
        self.eol
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    /// Line content without its terminator.
    pub(crate) fn content(&self, index: usize) -> &str {
        self.lines[index].trim_end_matches(['\n', '\r'])
    }

    pub(crate) fn is_blank(&self, range: Range<usize>) -> bool {
        range.into_iter().all(|i| self.content(i).trim().is_empty())
    }

    /// Insert already-terminated `code` so its first line becomes line `at`.
    pub(crate) fn insert(&mut self, at: usize, code: &str) {
        if at == self.lines.len() {
            if let Some(last) = self.lines.last_mut() {
                if !last.ends_with('\n') {
                    last.push_str(self.eol);
                }
            }
        }
        let new_lines: Vec<String> = code.split_inclusive('\n').map(str::to_owned).collect();
        self.lines.splice(at..at, new_lines);
    }

    pub(crate) fn remove(&mut self, range: Range<usize>) {
        let unterminated_tail = range.end == self.lines.len()
            && self.lines.last().is_some_and(|l| !l.ends_with('\n'));
        self.lines.drain(range);
        // The file did not end with a terminator; the new last line must not either.
        if unterminated_tail {
            if let Some(last) = self.lines.last_mut() {
                let trimmed = last.trim_end_matches(['\n', '\r']).len();
                last.truncate(trimmed);
            }
        }
    }

    pub(crate) fn render(&self) -> String {
        self.lines.concat()
    }
}

// ── Classification ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind {
    Wrapper(WrapperKind, String),
    Opener,
    Closer,
    Body,
}

pub(crate) fn classify(line: &str) -> LineKind {
    let code = strip_comment(line);
    let trimmed = code.trim_start();
    if trimmed.is_empty() {
        return LineKind::Body;
    }
    if CLOSER.is_match(code) {
        return LineKind::Closer;
    }
    if let Some(caps) = WRAPPER_OPENER.captures(code) {
        let kind = match &caps[1] {
            "namespace" => WrapperKind::Namespace,
            _ => WrapperKind::Scope,
        };
        let name = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        return LineKind::Wrapper(kind, name.to_string());
    }
    if BLOCK_OPENER.is_match(code) {
        let keyword_opener = !trimmed.contains(" do") && !trimmed.trim_end().ends_with("do");
        if keyword_opener && INLINE_END.is_match(code) {
            return LineKind::Body;
        }
        return LineKind::Opener;
    }
    LineKind::Body
}

/// The line up to a `#` comment that sits outside any string literal.
///
/// Escapes inside quotes are honoured; `#{}` interpolation stays inside its
/// string and is never taken for a comment.
pub(crate) fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (at, c) in line.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == '#' => return &line[..at],
            None => {}
        }
    }
    line
}

pub(crate) fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

// ── Outline ──────────────────────────────────────────────────────────────────

/// Location of one block in the document, as 0-based line indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub open: usize,
    pub close: usize,
    pub indent: usize,
}

impl BlockSpan {
    /// Lines strictly between opener and closer.
    pub fn body(&self) -> Range<usize> {
        self.open + 1..self.close
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block {
    pub(crate) wrapper: Option<(WrapperKind, String)>,
    pub(crate) span: BlockSpan,
    pub(crate) children: Vec<Block>,
}

impl Block {
    pub(crate) fn matches(&self, wrapper: &Wrapper) -> bool {
        self.wrapper
            .as_ref()
            .is_some_and(|(kind, name)| *kind == wrapper.kind() && name == wrapper.name())
    }
}

/// The block tree of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Outline {
    pub(crate) blocks: Vec<Block>,
}

impl Outline {
    /// Fold classified lines into a tree, failing on unbalanced input.
    pub(crate) fn scan(doc: &Document) -> Result<Self, DomainError> {
        let mut stack: Vec<Block> = Vec::new();
        let mut top = Vec::new();

        for index in 0..doc.len() {
            let line = doc.content(index);
            let wrapper = match classify(line) {
                LineKind::Body => continue,
                LineKind::Wrapper(kind, name) => Some((kind, name)),
                LineKind::Opener => None,
                LineKind::Closer => {
                    let mut block = stack.pop().ok_or(DomainError::MalformedInput {
                        line: index + 1,
                        reason: "'end' without a matching opener",
                    })?;
                    block.span.close = index;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(block),
                        None => top.push(block),
                    }
                    continue;
                }
            };
            stack.push(Block {
                wrapper,
                span: BlockSpan {
                    open: index,
                    close: index,
                    indent: indent_of(line),
                },
                children: Vec::new(),
            });
        }

        if let Some(unclosed) = stack.pop() {
            return Err(DomainError::MalformedInput {
                line: unclosed.span.open + 1,
                reason: "block is never closed",
            });
        }

        Ok(Self { blocks: top })
    }

    /// The outermost enclosing block, e.g. `Rails.application.routes.draw do`.
    ///
    /// This is the first top-level block that is not itself a wrapper. A file
    /// made only of wrappers (a routes fragment) has no container.
    pub(crate) fn container(&self) -> Option<&Block> {
        self.blocks.iter().find(|b| b.wrapper.is_none())
    }

    /// Blocks searched for the outermost wrapper.
    pub(crate) fn roots(&self) -> &[Block] {
        self.container()
            .map_or(self.blocks.as_slice(), |c| c.children.as_slice())
    }
}
