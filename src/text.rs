//! Text measurement for wrapped panels.
//!
//! The layout engine asks text panels for their natural height once their
//! width is known. This module answers that question without a font
//! rasterizer: glyphs are measured in terminal cells via `unicode-width`
//! and scaled by a per-style advance, lines are broken on whitespace, and
//! words wider than a line are split by character.
//!
//! Body text (`.txt` panels) is wrapped as plain text. Heading panels are
//! markdown, flattened into blocks with `pulldown-cmark` so heading lines
//! use the larger heading metrics.

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use unicode_width::UnicodeWidthStr;

/// Font metrics for one text style, in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Advance of a single-cell glyph.
    pub glyph_width: f64,
    pub line_height: f64,
    /// Padding on every side of the text block.
    pub inset: f64,
}

impl TextStyle {
    #[must_use]
    pub const fn body() -> Self {
        Self { glyph_width: 7.0, line_height: 19.0, inset: 4.0 }
    }

    #[must_use]
    pub const fn heading() -> Self {
        Self { glyph_width: 10.0, line_height: 27.0, inset: 4.0 }
    }

    /// Width available to glyphs inside a box of `outer_width`.
    #[must_use]
    pub fn inner_width(&self, outer_width: f64) -> f64 {
        (outer_width - 2.0 * self.inset).max(0.0)
    }
}

/// Rendered width of `text` in `style`.
#[must_use]
pub fn measured_width(text: &str, style: TextStyle) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let cells = UnicodeWidthStr::width(text) as f64;
    cells * style.glyph_width
}

/// Word-wrap `text` to `max_width`. Explicit newlines always break. Always
/// returns at least one (possibly empty) line.
#[must_use]
pub fn wrap_lines(text: &str, max_width: f64, style: TextStyle) -> Vec<String> {
    let fits = |s: &str| measured_width(s, style) <= max_width;

    let mut out = Vec::new();
    for raw_line in text.lines() {
        let words: Vec<&str> = raw_line.split_whitespace().collect();
        if words.is_empty() {
            out.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in words {
            if !current.is_empty() {
                let candidate = format!("{current} {word}");
                if fits(candidate.as_str()) {
                    current = candidate;
                    continue;
                }
                out.push(std::mem::take(&mut current));
            }

            if fits(word) {
                current = word.to_owned();
            } else {
                let mut chunks = break_long_word(word, max_width, style);
                current = chunks.pop().unwrap_or_default();
                out.extend(chunks);
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn break_long_word(word: &str, max_width: f64, style: TextStyle) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if !current.is_empty() && measured_width(&candidate, style) > max_width {
            lines.push(current);
            current = ch.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Height of plain text wrapped inside a box of `outer_width`.
#[must_use]
pub fn plain_height(text: &str, outer_width: f64, style: TextStyle) -> f64 {
    let lines = wrap_lines(text, style.inner_width(outer_width), style);
    #[allow(clippy::cast_precision_loss)]
    let body = lines.len() as f64 * style.line_height;
    body + 2.0 * style.inset
}

// =============================================================================
// MARKDOWN
// =============================================================================

/// A paragraph-level run of text with the style it renders in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub text: String,
    pub heading: bool,
}

/// Flatten markdown into paragraph-level blocks. Inline formatting is
/// dropped; soft breaks become spaces and hard breaks newlines.
#[must_use]
pub fn markdown_blocks(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut heading = false;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { .. }) => heading = true,
            Event::Text(text) | Event::Code(text) => current.push_str(&text),
            Event::SoftBreak => current.push(' '),
            Event::HardBreak => current.push('\n'),
            Event::End(TagEnd::Heading(_) | TagEnd::Paragraph | TagEnd::CodeBlock | TagEnd::Item) => {
                let text = std::mem::take(&mut current);
                if !text.trim().is_empty() {
                    blocks.push(Block { text: text.trim_end().to_string(), heading });
                }
                heading = false;
            }
            _ => {}
        }
    }
    if !current.trim().is_empty() {
        blocks.push(Block { text: current.trim_end().to_string(), heading });
    }
    blocks
}

/// Height of rendered markdown inside a box of `outer_width`. Blocks are
/// separated by one body inset.
#[must_use]
pub fn markdown_height(markdown: &str, outer_width: f64) -> f64 {
    let body = TextStyle::body();
    let blocks = markdown_blocks(markdown);
    if blocks.is_empty() {
        return plain_height("", outer_width, body);
    }

    let mut height = 0.0;
    for (i, block) in blocks.iter().enumerate() {
        let style = if block.heading { TextStyle::heading() } else { body };
        let lines = wrap_lines(&block.text, style.inner_width(outer_width), style);
        #[allow(clippy::cast_precision_loss)]
        let block_height = lines.len() as f64 * style.line_height;
        height += block_height;
        if i > 0 {
            height += body.inset;
        }
    }
    height + 2.0 * body.inset
}

/// Markdown a heading panel renders: the raw text as a level-two heading.
#[must_use]
pub fn heading_markdown(text: &str) -> String {
    format!("## {text}")
}
