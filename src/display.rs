//! Display-only rewriting of field contexts
//!
//! A context may reference other extracted entries; form UIs show
//! those as human-readable brackets. Purely cosmetic: `render` never
//! consults these strings.

use crate::parser::{Extraction, InputId, Segment};

impl Extraction {
    /// The context of a field rewritten for display, or `None` when
    /// the field has no context.
    ///
    /// Embedded entries become `[Label]` for input fields,
    /// `[List: Title]` for select regions, and `[...Code/Block...]`
    /// for literals.
    pub fn display_context(&self, id: InputId) -> Option<String> {
        let segments = self.input(id).context.as_ref()?;
        let mut out = String::new();
        for segment in segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Input(id) => {
                    out.push('[');
                    out.push_str(&self.input(*id).label);
                    out.push(']');
                }
                Segment::Select(id) => {
                    out.push_str("[List: ");
                    out.push_str(&self.select(*id).title);
                    out.push(']');
                }
                Segment::Literal(_) => out.push_str("[...Code/Block...]"),
            }
        }
        Some(out)
    }
}
