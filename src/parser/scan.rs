//! Template extraction: one left-to-right scan over the raw text
//!
//! Recognition precedence at any position is ignore block, quote
//! fence, escaped character, select region, input field. Markup that
//! does not close properly is never an error; its marker characters
//! stay behind as ordinary text.

use super::model::{
    Extraction, InputField, InputId, Literal, LiteralId, Segment, SelectId, SelectRegion,
};
use super::select_body;

/// Extract markup from a raw template.
///
/// Always succeeds: unmatched or malformed markup degrades to plain
/// text. An empty input yields an empty [`Extraction`].
pub fn parse(raw: &str) -> Extraction {
    let mut extractor = Extractor::default();
    let (segments, _) = extractor.scan(raw, false);
    Extraction {
        segments,
        literals: extractor.literals,
        selects: extractor.selects,
        inputs: extractor.inputs,
    }
}

#[derive(Default)]
struct Extractor {
    literals: Vec<Literal>,
    selects: Vec<SelectRegion>,
    inputs: Vec<InputField>,
}

impl Extractor {
    /// Scan one stretch of text into segments.
    ///
    /// In context mode (scanning the `(…)` of an input field) two
    /// things change: input fields are not recognized, and the first
    /// `)` left in plain text terminates the scan. The returned
    /// offset is that of the terminator, `None` when the scan ran to
    /// the end of `text`.
    fn scan(&mut self, text: &str, in_context: bool) -> (Vec<Segment>, Option<usize>) {
        let bytes = text.as_bytes();
        let mut segments = Vec::new();
        let mut plain_start = 0;
        let mut i = 0;
        let mut terminator = None;

        while i < bytes.len() {
            match bytes[i] {
                b')' if in_context => {
                    terminator = Some(i);
                    break;
                }
                b'\\' if matches!(bytes.get(i + 1), Some(b'#' | b'[' | b']')) => {
                    flush_text(text, plain_start, i, &mut segments);
                    let id = self.push_literal(Literal::Escaped(bytes[i + 1] as char));
                    segments.push(Segment::Literal(id));
                    i += 2;
                    plain_start = i;
                }
                b'#' => {
                    let hashes = run_len(bytes, i, b'#');
                    let after = i + hashes;
                    let matched = if text[after..].starts_with("ignore") {
                        ignore_block(text, after + "ignore".len(), hashes).map(
                            |(content, end)| {
                                let id = self
                                    .push_literal(Literal::Block(trim_block(content).to_string()));
                                (Segment::Literal(id), end)
                            },
                        )
                    } else if text[after..].starts_with("start") {
                        select_block(text, after + "start".len(), hashes).map(
                            |(title, body, end)| {
                                let region = select_body::parse_region(title, body);
                                self.selects.push(region);
                                (Segment::Select(SelectId(self.selects.len() - 1)), end)
                            },
                        )
                    } else {
                        None
                    };

                    match matched {
                        Some((segment, end)) => {
                            flush_text(text, plain_start, i, &mut segments);
                            segments.push(segment);
                            i = end;
                            plain_start = i;
                        }
                        None => i = after,
                    }
                }
                b'\'' => {
                    let quotes = run_len(bytes, i, b'\'');
                    match quote_fence(text, i) {
                        Some((content, end)) => {
                            flush_text(text, plain_start, i, &mut segments);
                            let id = self.push_literal(Literal::Quote(content.to_string()));
                            segments.push(Segment::Literal(id));
                            i = end;
                            plain_start = i;
                        }
                        None => i += quotes,
                    }
                }
                b'[' if !in_context => match self.input_field(text, i) {
                    Some((field, end)) => {
                        flush_text(text, plain_start, i, &mut segments);
                        self.inputs.push(field);
                        segments.push(Segment::Input(InputId(self.inputs.len() - 1)));
                        i = end;
                        plain_start = i;
                    }
                    None => i += 1,
                },
                _ => i += 1,
            }
        }

        flush_text(text, plain_start, terminator.unwrap_or(bytes.len()), &mut segments);
        (segments, terminator)
    }

    fn push_literal(&mut self, literal: Literal) -> LiteralId {
        self.literals.push(literal);
        LiteralId(self.literals.len() - 1)
    }

    /// Match `[label]` or `[label = $var]`, each optionally followed
    /// by `(context)`. Returns the field and the byte offset after
    /// the whole match.
    fn input_field(&mut self, text: &str, start: usize) -> Option<(InputField, usize)> {
        let bytes = text.as_bytes();
        let mut close = start + 1;
        loop {
            match bytes.get(close) {
                Some(b'\\') if matches!(bytes.get(close + 1), Some(b'#' | b'[' | b']')) => {
                    close += 2
                }
                Some(b']') => break,
                Some(b'[') | Some(b'\n') | None => return None,
                Some(_) => close += 1,
            }
        }

        let inner = &text[start + 1..close];
        let (label, var_name) = match inner.split_once('=') {
            Some((lhs, rhs)) => match parse_var_ref(rhs) {
                Some(var) => (lhs.trim(), Some(var.to_string())),
                // Not a variable binding; the whole bracket body is
                // the label, as it would be without the `=` form.
                None => (inner.trim(), None),
            },
            None => (inner.trim(), None),
        };
        if label.is_empty() {
            return None;
        }

        let mut end = close + 1;
        let mut context = None;
        if bytes.get(end) == Some(&b'(') {
            // Entries recognized inside the context consume their
            // spans first, so a `)` inside a quote or ignore body
            // cannot end the context early. Roll the arenas back if
            // the context never closes.
            let literal_mark = self.literals.len();
            let select_mark = self.selects.len();
            let (segments, terminator) = self.scan(&text[end + 1..], true);
            match terminator {
                Some(rel) => {
                    context = Some(segments);
                    end += rel + 2;
                }
                None => {
                    self.literals.truncate(literal_mark);
                    self.selects.truncate(select_mark);
                }
            }
        }

        Some((
            InputField {
                label: unescape_markup(label),
                var_name,
                context,
            },
            end,
        ))
    }
}

fn flush_text(text: &str, start: usize, end: usize, segments: &mut Vec<Segment>) {
    if start < end {
        segments.push(Segment::Text(text[start..end].to_string()));
    }
}

/// Length of the run of `ch` starting at `i`.
fn run_len(bytes: &[u8], i: usize, ch: u8) -> usize {
    bytes[i..].iter().take_while(|&&b| b == ch).count()
}

/// `$name` where name is a nonempty identifier run, whitespace aside.
fn parse_var_ref(s: &str) -> Option<&str> {
    let name = s.trim().strip_prefix('$')?;
    if !name.is_empty() && name.bytes().all(is_ident_byte) {
        Some(name)
    } else {
        None
    }
}

pub(crate) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Strip the backslash from `\#`, `\[`, `\]` sequences; labels carry
/// the bare character.
pub(crate) fn unescape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && matches!(chars.peek(), Some('#' | '[' | ']')) {
            continue;
        }
        out.push(c);
    }
    out
}

/// Find the `#{n}end` closer for an ignore block whose body starts at
/// `from`. Returns the raw body and the offset after the closer.
fn ignore_block(text: &str, from: usize, n: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let mut j = from;
    while j < bytes.len() {
        if bytes[j] == b'#' {
            let run = run_len(bytes, j, b'#');
            if run == n && text[j + run..].starts_with("end") {
                return Some((&text[from..j], j + run + "end".len()));
            }
            j += run;
        } else {
            j += 1;
        }
    }
    None
}

/// Find the `#{n}end` closer for a select region. Complete ignore
/// blocks and quote fences inside the body are skipped so their own
/// `#end` markers cannot close the region early.
fn select_block(text: &str, from: usize, n: usize) -> Option<(&str, &str, usize)> {
    let bytes = text.as_bytes();
    let mut j = from;
    let close = loop {
        if j >= bytes.len() {
            return None;
        }
        match bytes[j] {
            // escaped metacharacters claim their text before region
            // markers do, so `\#end` cannot close the region
            b'\\' if matches!(bytes.get(j + 1), Some(b'#' | b'[' | b']')) => j += 2,
            b'#' => {
                let run = run_len(bytes, j, b'#');
                if run == n && text[j + run..].starts_with("end") {
                    break j;
                }
                if text[j + run..].starts_with("ignore") {
                    if let Some((_, end)) = ignore_block(text, j + run + "ignore".len(), run) {
                        j = end;
                        continue;
                    }
                }
                j += run;
            }
            b'\'' => match quote_fence(text, j) {
                Some((_, end)) => j = end,
                None => j += run_len(bytes, j, b'\''),
            },
            _ => j += 1,
        }
    };

    let (title, body) = match text[from..close].split_once('\n') {
        Some((title, body)) => (title, body),
        None => (&text[from..close], ""),
    };
    Some((title.trim(), body, close + n + "end".len()))
}

/// Match a quote fence opening at `i`: a run of N >= 2 quotes closed
/// by the next run of N quotes. Shorter opening runs are tried when
/// the maximal run never closes. Returns the body and the offset
/// after the closer.
pub(crate) fn quote_fence(text: &str, i: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let max = run_len(bytes, i, b'\'');
    for n in (2..=max).rev() {
        let mut j = i + n;
        while j + n <= bytes.len() {
            if bytes[j..j + n].iter().all(|&b| b == b'\'') {
                return Some((&text[i + n..j], j + n));
            }
            j += 1;
        }
    }
    None
}

/// Drop a single leading and trailing newline from an ignore-block
/// body; the rest is stored verbatim.
fn trim_block(s: &str) -> &str {
    let s = s
        .strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s);
    match s.strip_suffix('\n') {
        Some(t) => t.strip_suffix('\r').unwrap_or(t),
        None => s,
    }
}
