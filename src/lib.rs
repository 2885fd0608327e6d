//! Prompt Stencil - a templating engine for reusable prompt snippets
//!
//! Templates are plain text with four kinds of markup: ignore blocks
//! (`#ignore … #end`, hidden from all further interpretation), quote
//! fences (`''…''`, immune to markup but variable-aware), select
//! regions (`#start … #end` with `+`/`-`/digit-prefixed options), and
//! input fields (`[label]`, `[label = $var]`, optionally followed by
//! a `(context)` help text).
//!
//! Filling a template is two pure transforms: [`parse`] extracts the
//! markup into an [`Extraction`] a form UI can iterate, and
//! [`render`] substitutes the collected values back into final text.
//! Malformed markup never fails either step; it passes through as
//! ordinary text.
//!
//! # Example
//!
//! ```rust
//! use prompt_stencil::{parse, render, Choices, FieldValues, Selections};
//!
//! let template = "Write about [topic] in the style of #start Tone\n-[formal]\n-[casual]\n#end.";
//! let extraction = parse(template);
//!
//! let mut values = FieldValues::new();
//! let (topic_id, _) = extraction.inputs().next().unwrap();
//! values.insert(topic_id, "dogs".to_string());
//!
//! let (tone_id, region) = extraction.selects().next().unwrap();
//! let mut choices = Choices::new();
//! choices.toggle_value(region, "formal");
//! let mut selections = Selections::new();
//! selections.insert(tone_id, choices.values(region));
//!
//! let text = render(&extraction, &values, &selections);
//! assert_eq!(text, "Write about dogs in the style of formal.");
//! ```

pub mod choices;
mod display;
pub mod error;
pub mod parser;
pub mod render;
pub mod values;

pub use choices::Choices;
pub use error::FillError;
pub use parser::{
    parse, Extraction, InputField, InputId, Literal, LiteralId, OptionGroup, OptionKind,
    SelectId, SelectOption, SelectRegion,
};
pub use render::{render, FieldValues, Selections};
pub use values::FillFile;

/// Fill a template in one step using a [`FillFile`].
///
/// Extracts the template, matches the fill file's labels and titles
/// against it, and renders the final text.
///
/// # Example
///
/// ```rust
/// use prompt_stencil::{fill, FillFile};
///
/// let fill_file = FillFile::from_str(
///     "[fields]\ntopic = \"dogs\"\n\n[selections]\nTone = [\"formal\"]\n",
/// ).unwrap();
///
/// let text = fill(
///     "Write about [topic] in the style of #start Tone\n-[formal]\n-[casual]\n#end.",
///     &fill_file,
/// );
/// assert_eq!(text, "Write about dogs in the style of formal.");
/// ```
pub fn fill(template: &str, fill_file: &FillFile) -> String {
    let extraction = parse(template);
    let (values, selections) = fill_file.resolve(&extraction);
    render(&extraction, &values, &selections)
}
