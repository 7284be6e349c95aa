// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Human-readable warnings for skipped comment tokens.

use std::ops::Range;

use annotate_snippets::{Level, Message, Renderer, Snippet};
use tugspan_core::error::SpanError;

use crate::comments::SkippedComment;
use crate::driver::Analysis;

/// Render one annotated warning per skipped comment in `analysis`.
///
/// Returns an empty string when nothing was skipped. `path` is only used as
/// the snippet origin.
pub fn render_skipped(path: &str, buffer: &[u8], analysis: &Analysis) -> String {
    let source = String::from_utf8_lossy(buffer);
    let renderer = Renderer::plain();

    let mut warnings = Vec::with_capacity(analysis.skipped.len());
    for skip in &analysis.skipped {
        let title = format!("skipped comment token at offset {}", skip.offset);
        let label = skip.error.to_string();
        let range = annotation_range(buffer, &source, skip);
        let message = warning(&title, &label, path, &source, range);
        warnings.push(renderer.render(message).to_string());
    }
    warnings.join("\n")
}

fn warning<'a>(
    title: &'a str,
    label: &'a str,
    path: &'a str,
    source: &'a str,
    range: Option<Range<usize>>,
) -> Message<'a> {
    let message = Level::Warning.title(title);
    match range {
        Some(range) => message.snippet(
            Snippet::source(source)
                .origin(path)
                .fold(true)
                .annotation(Level::Warning.span(range).label(label)),
        ),
        None => message.footer(Level::Note.title(label)),
    }
}

/// The range of `source` to underline: the raw token span mapped from
/// `buffer` offsets into the decoded text, clamped to `source` and to char
/// boundaries, widened to one character when empty.
fn annotation_range(buffer: &[u8], source: &str, skip: &SkippedComment) -> Option<Range<usize>> {
    if source.is_empty() {
        return None;
    }

    let (start, end) = match &skip.error {
        SpanError::MalformedSpan { start, end, .. } | SpanError::DelimiterNotFound { start, end } => {
            (*start, *end)
        }
        _ => (skip.offset, skip.offset),
    };
    let start = decoded_offset(buffer, start);
    let end = decoded_offset(buffer, end);

    let mut start = floor_char_boundary(source, start.min(source.len()));
    let mut end = floor_char_boundary(source, end.min(source.len())).max(start);

    if start == end {
        if start == source.len() {
            start = floor_char_boundary(source, start - 1);
        }
        end = source[start..]
            .chars()
            .next()
            .map_or(source.len(), |c| start + c.len_utf8());
    }

    Some(start..end)
}

/// Map a byte offset in `buffer` to the matching offset in its lossy
/// decoding. Each invalid sequence decodes to one U+FFFD; an offset inside
/// one maps to the start of its replacement.
fn decoded_offset(buffer: &[u8], offset: usize) -> usize {
    let mut raw = 0;
    let mut decoded = 0;
    for chunk in buffer.utf8_chunks() {
        let valid = chunk.valid().len();
        if offset <= raw + valid {
            return decoded + (offset - raw);
        }
        raw += valid;
        decoded += valid;

        let invalid = chunk.invalid().len();
        if offset < raw + invalid {
            return decoded;
        }
        raw += invalid;
        if invalid > 0 {
            decoded += char::REPLACEMENT_CHARACTER.len_utf8();
        }
    }
    decoded + offset.saturating_sub(raw)
}

fn floor_char_boundary(source: &str, mut index: usize) -> usize {
    while !source.is_char_boundary(index) {
        index -= 1;
    }
    index
}
