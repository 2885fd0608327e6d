//! Line-oriented sub-parser for select region bodies
//!
//! Headers open option groups, prefixed lines add options, and a
//! quote literal immediately after an option line overrides that
//! option's value. Every other line is skipped, never rejected.

use super::model::{OptionGroup, OptionKind, SelectOption, SelectRegion};
use super::scan::{quote_fence, unescape_markup};

pub(crate) fn parse_region(title: &str, body: &str) -> SelectRegion {
    let mut groups: Vec<OptionGroup> = Vec::new();
    let mut pos = 0;

    while pos < body.len() {
        let line_end = body[pos..]
            .find('\n')
            .map(|k| pos + k)
            .unwrap_or(body.len());
        let line = &body[pos..line_end];
        let mut next = line_end + 1;

        if let Some(header) = parse_header(line) {
            groups.push(OptionGroup {
                header: Some(header.to_string()),
                options: Vec::new(),
            });
        } else if let Some((kind, label, after)) = parse_option(line) {
            if groups.is_empty() {
                // options before the first header form an untitled group
                groups.push(OptionGroup {
                    header: None,
                    options: Vec::new(),
                });
            }

            let mut value = label.clone();
            let rest = line[after..].trim_start();
            if rest.starts_with('\'') {
                let at = pos + line.len() - rest.len();
                match fence_override(body, at) {
                    Some((content, end)) => {
                        value = content;
                        next = next_line(body, end);
                    }
                    None => {
                        if let Some(v) = parse_inline_quote(rest) {
                            value = v;
                        }
                    }
                }
            } else if rest.is_empty() && line_end < body.len() {
                // a fence opening the following line also counts
                let follow_start = line_end + 1;
                let follow_end = body[follow_start..]
                    .find('\n')
                    .map(|k| follow_start + k)
                    .unwrap_or(body.len());
                let follow = body[follow_start..follow_end].trim_start();
                if follow.starts_with("''") {
                    let at = follow_start + (follow_end - follow_start) - follow.len();
                    if let Some((content, end)) = fence_override(body, at) {
                        value = content;
                        next = next_line(body, end);
                    }
                }
            }

            if let Some(group) = groups.last_mut() {
                group.options.push(SelectOption { label, value, kind });
            }
        }

        pos = next;
    }

    SelectRegion {
        title: title.to_string(),
        groups,
    }
}

/// `#{1,} <label>` where the label is not a region marker.
fn parse_header(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let rest = trimmed.trim_start_matches('#');
    if rest.len() == trimmed.len() {
        return None;
    }
    if rest.starts_with("start") || rest.starts_with("end") {
        return None;
    }
    let label = rest.trim();
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}

/// Option line: `+`, `-`, or a digit run, then `[label]`. Returns the
/// kind, the label, and the offset in `line` just past the `]`.
fn parse_option(line: &str) -> Option<(OptionKind, String, usize)> {
    let indent = line.len() - line.trim_start().len();
    let s = &line[indent..];
    let bytes = s.as_bytes();

    let (kind, mut idx) = match bytes.first()? {
        b'+' => (OptionKind::Multi, 1),
        b'-' => (OptionKind::Sovereign, 1),
        b'0'..=b'9' => {
            let len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            (OptionKind::Id(s[..len].to_string()), len)
        }
        _ => return None,
    };

    while matches!(bytes.get(idx), Some(b' ') | Some(b'\t')) {
        idx += 1;
    }
    if bytes.get(idx) != Some(&b'[') {
        return None;
    }
    let mut close = 0;
    let inner = &bytes[idx + 1..];
    loop {
        match inner.get(close) {
            Some(b'\\') if matches!(inner.get(close + 1), Some(b'#' | b'[' | b']')) => close += 2,
            Some(b']') => break,
            Some(b'[') | None => return None,
            Some(_) => close += 1,
        }
    }

    let label = s[idx + 1..idx + 1 + close].trim();
    if label.is_empty() {
        return None;
    }
    Some((kind, unescape_markup(label), indent + idx + close + 2))
}

/// A `''…''` fence starting at `at`, possibly spanning lines.
fn fence_override(body: &str, at: usize) -> Option<(String, usize)> {
    let run = body.as_bytes()[at..]
        .iter()
        .take_while(|&&b| b == b'\'')
        .count();
    if run < 2 {
        return None;
    }
    quote_fence(body, at).map(|(content, end)| (content.to_string(), end))
}

/// Inline `'…'` with `\'` and `\\` escapes, confined to one line.
fn parse_inline_quote(s: &str) -> Option<String> {
    let mut out = String::new();
    let mut chars = s.strip_prefix('\'')?.chars();
    loop {
        match chars.next()? {
            '\'' => return Some(out),
            '\\' => match chars.next()? {
                c @ ('\'' | '\\') => out.push(c),
                c => {
                    out.push('\\');
                    out.push(c);
                }
            },
            c => out.push(c),
        }
    }
}

/// Offset of the first position after the line containing `at`.
fn next_line(body: &str, at: usize) -> usize {
    body[at..]
        .find('\n')
        .map(|k| at + k + 1)
        .unwrap_or(body.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_open_groups() {
        let region = parse_region("Tone", "# Formality\n-[formal]\n# Extras\n+[emoji]\n");
        assert_eq!(region.title, "Tone");
        assert_eq!(region.groups.len(), 2);
        assert_eq!(region.groups[0].header.as_deref(), Some("Formality"));
        assert_eq!(region.groups[0].options[0].label, "formal");
        assert_eq!(region.groups[1].header.as_deref(), Some("Extras"));
        assert_eq!(region.groups[1].options[0].kind, OptionKind::Multi);
    }

    #[test]
    fn test_leading_options_form_untitled_group() {
        let region = parse_region("", "-[a]\n# Later\n+[b]\n");
        assert_eq!(region.groups.len(), 2);
        assert_eq!(region.groups[0].header, None);
        assert_eq!(region.groups[0].options[0].label, "a");
    }

    #[test]
    fn test_option_kinds() {
        let region = parse_region("", "+[m]\n-[s]\n12[i]\n");
        let options = &region.groups[0].options;
        assert_eq!(options[0].kind, OptionKind::Multi);
        assert_eq!(options[1].kind, OptionKind::Sovereign);
        assert_eq!(options[2].kind, OptionKind::Id("12".to_string()));
    }

    #[test]
    fn test_value_defaults_to_label() {
        let region = parse_region("", "+[keep it short]\n");
        let option = &region.groups[0].options[0];
        assert_eq!(option.value, "keep it short");
    }

    #[test]
    fn test_inline_quote_overrides_value() {
        let region = parse_region("", r"+[short] 'Keep the answer brief, please.'");
        let option = &region.groups[0].options[0];
        assert_eq!(option.label, "short");
        assert_eq!(option.value, "Keep the answer brief, please.");
    }

    #[test]
    fn test_inline_quote_escapes() {
        let region = parse_region("", r"+[q] 'it\'s a \\ test'");
        assert_eq!(region.groups[0].options[0].value, r"it's a \ test");
    }

    #[test]
    fn test_fence_override_same_line() {
        let region = parse_region("", "+[multi] ''line one\nline two''\n+[after]\n");
        let options = &region.groups[0].options;
        assert_eq!(options[0].value, "line one\nline two");
        assert_eq!(options[1].label, "after");
    }

    #[test]
    fn test_fence_override_next_line() {
        let region = parse_region("", "+[block]\n''expanded value''\n+[after]\n");
        let options = &region.groups[0].options;
        assert_eq!(options[0].value, "expanded value");
        assert_eq!(options[1].label, "after");
    }

    #[test]
    fn test_escaped_bracket_inside_option_label() {
        let region = parse_region("", r"+[pick \[x\]]");
        let option = &region.groups[0].options[0];
        assert_eq!(option.label, "pick [x]");
        assert_eq!(option.value, "pick [x]");
    }

    #[test]
    fn test_unrecognized_lines_are_skipped() {
        let region = parse_region("", "just a note\n\n+[a]\n*[b]\n");
        assert_eq!(region.groups.len(), 1);
        assert_eq!(region.groups[0].options.len(), 1);
    }

    #[test]
    fn test_unclosed_inline_quote_keeps_default() {
        let region = parse_region("", "+[a] 'never closed\n");
        assert_eq!(region.groups[0].options[0].value, "a");
    }
}
