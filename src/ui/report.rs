//! ui::report
//!
//! Structured diagnostic lines and the renderer seam.
//!
//! # Design
//!
//! The checking core never formats text. It assembles sequences of
//! [`Line`]s, each a list of [`Span`]s tagged with a semantic [`Tone`], and
//! hands them to a [`Render`] implementation. Colored or boxed output is the
//! renderer's business; [`PlainRenderer`] is the dependency-free default used
//! by `Display` on errors.
//!
//! # Example
//!
//! ```
//! use typeshape::ui::report::{indent, Line, PlainRenderer, Render};
//!
//! let mut lines = vec![Line::text("Instead, it got:"), Line::blank()];
//! lines.extend(indent(vec![Line::text("42")]));
//!
//! let rendered = PlainRenderer::default().render(&lines);
//! assert_eq!(rendered, "Instead, it got:\n\n  42");
//! ```

use std::fmt;

/// Semantic tag for a piece of diagnostic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Ordinary text
    Plain,
    /// Report headline (rendered red by color-capable renderers)
    Alert,
    /// A type name (rendered blue by color-capable renderers)
    TypeName,
    /// Separator rules and other chrome
    Muted,
}

/// A run of text sharing one tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Semantic tone of the text
    pub tone: Tone,
    /// The text itself
    pub text: String,
}

impl Span {
    /// Create a span with the given tone.
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    /// Create a plain span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Tone::Plain, text)
    }
}

/// One diagnostic line: an indentation depth and its spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// Nesting depth (each level is one indentation step)
    pub depth: usize,
    /// Content of the line
    pub spans: Vec<Span>,
}

impl Line {
    /// A line made of a single plain span.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            depth: 0,
            spans: vec![Span::plain(text)],
        }
    }

    /// A line made of several spans.
    pub fn spans(spans: Vec<Span>) -> Self {
        Self { depth: 0, spans }
    }

    /// An empty separator line.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Concatenated text of all spans, ignoring tones and depth.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_text())
    }
}

/// Increase the depth of every line by one.
pub fn indent(lines: Vec<Line>) -> Vec<Line> {
    lines
        .into_iter()
        .map(|mut line| {
            line.depth += 1;
            line
        })
        .collect()
}

/// Turns a sequence of diagnostic lines into a single formatted string.
///
/// This is the collaborator contract for diagnostic presentation. The core
/// depends only on this trait.
pub trait Render {
    /// Render `lines` into one string.
    fn render(&self, lines: &[Line]) -> String;
}

/// Renderer that ignores tones and indents with spaces.
#[derive(Debug, Clone, Copy)]
pub struct PlainRenderer {
    /// Spaces per depth level
    pub indent_width: usize,
}

impl Default for PlainRenderer {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

impl Render for PlainRenderer {
    fn render(&self, lines: &[Line]) -> String {
        lines
            .iter()
            .map(|line| {
                let text = line.plain_text();
                if text.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", " ".repeat(line.depth * self.indent_width), text)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
