//! Variable propagation over rendered text

use std::collections::HashMap;

use crate::parser::scan::is_ident_byte;

/// Replace every `$name` reference whose name is bound in `table`.
///
/// A reference is `$` followed by a maximal identifier run, so a
/// binding for `v` never fires inside `$var`, and because lookup runs
/// in a single pass, substituted values are not themselves rescanned.
pub(crate) fn substitute(text: &str, table: &HashMap<String, String>) -> String {
    if table.is_empty() || !text.contains('$') {
        return text.to_string();
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut plain_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let name_len = bytes[i + 1..]
                .iter()
                .take_while(|&&b| is_ident_byte(b))
                .count();
            if name_len > 0 {
                if let Some(value) = table.get(&text[i + 1..i + 1 + name_len]) {
                    out.push_str(&text[plain_start..i]);
                    out.push_str(value);
                    i += 1 + name_len;
                    plain_start = i;
                    continue;
                }
            }
        }
        i += 1;
    }
    out.push_str(&text[plain_start..]);
    out
}
