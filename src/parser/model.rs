//! Data model produced by template extraction

/// Handle to a literal entry (ignore block, quote literal, or escaped
/// character) inside an [`Extraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LiteralId(pub(crate) usize);

/// Handle to an input field inside an [`Extraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputId(pub(crate) usize);

/// Handle to a select region inside an [`Extraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectId(pub(crate) usize);

/// One span of the processed template text.
///
/// The extractor replaces every recognized markup span with a handle
/// into one of the typed arenas; everything else stays as plain text.
/// Handles are plain indices, so they can never collide with author
/// text the way string sentinels could.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Verbatim template text.
    Text(String),
    /// A literal entry, reinserted during the final render step.
    Literal(LiteralId),
    /// A select region, replaced by the chosen option values.
    Select(SelectId),
    /// An input field, replaced by the caller-supplied value.
    Input(InputId),
}

/// Content hidden from structural parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `#ignore … #end` body: reinserted verbatim, opaque even to
    /// variable substitution.
    Block(String),
    /// `''…''` fence body: opaque to markup, but variable references
    /// inside it are still resolved at render time.
    Quote(String),
    /// A backslash-escaped metacharacter, reinserted bare.
    Escaped(char),
}

/// A fill-in-the-blank field sourced from `[label]` or
/// `[label = $var]`, optionally followed by a `(context)` help text.
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub label: String,
    /// When present, the resolved value is also broadcast to every
    /// `$var` occurrence in the rendered text.
    pub var_name: Option<String>,
    /// Author-supplied help text. Scanned like template text (minus
    /// nested input fields), so it may reference literals and select
    /// regions; see [`Extraction::display_context`].
    pub context: Option<Vec<Segment>>,
}

/// How an option interacts with its siblings when toggled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// `+` prefix: independent toggle.
    Multi,
    /// `-` prefix: selecting it clears the rest of the group, and any
    /// other selection in the group clears it.
    Sovereign,
    /// Digit prefix: selecting it clears same-id peers in the group.
    /// Ids are compared textually.
    Id(String),
}

/// One choosable option inside a select region.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub label: String,
    /// Rendered when chosen. Defaults to the label; a quote literal
    /// immediately after the option line overrides it.
    pub value: String,
    pub kind: OptionKind,
}

/// A contiguous run of options sharing exclusivity scope: everything
/// between two header lines, or before the first header.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionGroup {
    /// Header label, or `None` for the implicit leading group.
    pub header: Option<String>,
    pub options: Vec<SelectOption>,
}

/// A `#start … #end` block offering the user a set of options.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectRegion {
    /// Remainder of the opening line, trimmed.
    pub title: String,
    pub groups: Vec<OptionGroup>,
}

impl SelectRegion {
    /// Look up an option by group/option index.
    pub fn option(&self, group: usize, option: usize) -> Option<&SelectOption> {
        self.groups.get(group)?.options.get(option)
    }

    /// All options in document order, with their group/option indices.
    pub fn iter_options(&self) -> impl Iterator<Item = (usize, usize, &SelectOption)> {
        self.groups.iter().enumerate().flat_map(|(g, group)| {
            group
                .options
                .iter()
                .enumerate()
                .map(move |(o, opt)| (g, o, opt))
        })
    }
}

/// Result of extracting markup from one template.
///
/// Holds the processed text as a segment stream plus the typed arenas
/// the segments point into. Read-only after creation; build the form
/// from [`inputs`](Extraction::inputs) / [`selects`](Extraction::selects)
/// and feed the collected values to [`render`](crate::render::render).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extraction {
    pub(crate) segments: Vec<Segment>,
    pub(crate) literals: Vec<Literal>,
    pub(crate) selects: Vec<SelectRegion>,
    pub(crate) inputs: Vec<InputField>,
}

impl Extraction {
    /// Input fields with their handles, in document order.
    pub fn inputs(&self) -> impl Iterator<Item = (InputId, &InputField)> {
        self.inputs.iter().enumerate().map(|(i, f)| (InputId(i), f))
    }

    /// Select regions with their handles, in document order.
    pub fn selects(&self) -> impl Iterator<Item = (SelectId, &SelectRegion)> {
        self.selects
            .iter()
            .enumerate()
            .map(|(i, s)| (SelectId(i), s))
    }

    pub fn input(&self, id: InputId) -> &InputField {
        &self.inputs[id.0]
    }

    pub fn select(&self, id: SelectId) -> &SelectRegion {
        &self.selects[id.0]
    }

    pub(crate) fn literal(&self, id: LiteralId) -> &Literal {
        &self.literals[id.0]
    }

    /// True when the template contained no recognizable markup at all.
    pub fn is_plain(&self) -> bool {
        self.literals.is_empty() && self.selects.is_empty() && self.inputs.is_empty()
    }
}
