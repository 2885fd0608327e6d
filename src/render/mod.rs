//! Template resolution: substitute user values back into the text
//!
//! Runs once per confirm action. The order of operations is
//! observable and fixed: field and select substitution, then variable
//! propagation, then literal reinsertion (quotes variable-aware,
//! ignore blocks and escapes verbatim).

mod vars;

use std::collections::{HashMap, HashSet};

use crate::parser::{Extraction, InputId, Literal, Segment, SelectId, SelectRegion};

/// Value typed into each input field. Missing entries render as the
/// empty string.
pub type FieldValues = HashMap<InputId, String>;

/// Chosen option values per select region. Callers must apply the
/// exclusivity rules before rendering; [`Choices`](crate::Choices)
/// does so outside an interactive UI. Missing entries render as the
/// empty string.
pub type Selections = HashMap<SelectId, HashSet<String>>;

/// Piece of output whose variable references are still unresolved, or
/// a literal deferred until after propagation.
enum Piece<'a> {
    Open(String),
    Literal(&'a Literal),
}

/// Resolve an extraction into final text.
///
/// When several fields bind the same variable, the field latest in
/// document order supplies the propagated value.
pub fn render(extraction: &Extraction, values: &FieldValues, selections: &Selections) -> String {
    // Bindings are collected up front so a later field can propagate
    // into references earlier in the text.
    let mut bindings: HashMap<String, String> = HashMap::new();
    for (id, field) in extraction.inputs() {
        if let Some(var) = &field.var_name {
            let value = values.get(&id).cloned().unwrap_or_default();
            bindings.insert(var.clone(), value);
        }
    }

    let mut pieces = Vec::new();
    for segment in &extraction.segments {
        match segment {
            Segment::Text(text) => pieces.push(Piece::Open(text.clone())),
            Segment::Input(id) => {
                pieces.push(Piece::Open(values.get(id).cloned().unwrap_or_default()))
            }
            Segment::Select(id) => {
                let chosen = selections.get(id);
                let joined = join_selected(extraction.select(*id), chosen);
                pieces.push(Piece::Open(joined));
            }
            Segment::Literal(id) => pieces.push(Piece::Literal(extraction.literal(*id))),
        }
    }

    let mut out = String::new();
    for piece in pieces {
        match piece {
            Piece::Open(text) => out.push_str(&vars::substitute(&text, &bindings)),
            // Quote literals skipped structural parsing but still see
            // variables; ignore blocks and escapes see nothing.
            Piece::Literal(Literal::Quote(content)) => {
                out.push_str(&vars::substitute(content, &bindings))
            }
            Piece::Literal(Literal::Block(content)) => out.push_str(content),
            Piece::Literal(Literal::Escaped(ch)) => out.push(*ch),
        }
    }
    out
}

/// Join the chosen option values with newlines, in option document
/// order so output does not depend on toggle order.
fn join_selected(region: &SelectRegion, chosen: Option<&HashSet<String>>) -> String {
    let chosen = match chosen {
        Some(set) if !set.is_empty() => set,
        _ => return String::new(),
    };
    let mut seen = HashSet::new();
    let mut parts = Vec::new();
    for (_, _, option) in region.iter_options() {
        if chosen.contains(&option.value) && seen.insert(option.value.as_str()) {
            parts.push(option.value.as_str());
        }
    }
    parts.join("\n")
}
