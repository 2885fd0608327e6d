//! Full parse-then-render scenarios, driven through fill files where
//! it makes sense and through explicit value maps elsewhere.

use std::collections::{HashMap, HashSet};

use pretty_assertions::assert_eq;
use prompt_stencil::{fill, parse, render, Choices, FillFile};

fn render_empty(template: &str) -> String {
    let extraction = parse(template);
    render(&extraction, &HashMap::new(), &HashMap::new())
}

#[test]
fn test_end_to_end_scenario() {
    let template = "Write about [topic] in the style of #start Tone\n-[formal]\n-[casual]\n#end.";
    let fill_file = FillFile::from_str(
        r#"
[fields]
topic = "dogs"

[selections]
Tone = ["formal"]
"#,
    )
    .unwrap();

    assert_eq!(
        fill(template, &fill_file),
        "Write about dogs in the style of formal."
    );
}

#[test]
fn test_plain_text_round_trips() {
    let template = "No markup here, not even a little.";
    assert_eq!(render_empty(template), template);
}

#[test]
fn test_variable_propagation() {
    let template = "The hero is [name = $hero]. Later, $hero returns. $heroine does not.";
    let extraction = parse(template);
    let (id, _) = extraction.inputs().next().unwrap();
    let mut values = HashMap::new();
    values.insert(id, "Ada".to_string());

    assert_eq!(
        render(&extraction, &values, &HashMap::new()),
        "The hero is Ada. Later, Ada returns. $heroine does not."
    );
}

#[test]
fn test_variable_inside_quote_is_resolved() {
    let template = "[name = $n] says ''hello from $n, [not a field]''";
    let extraction = parse(template);
    let (id, _) = extraction.inputs().next().unwrap();
    let mut values = HashMap::new();
    values.insert(id, "Bo".to_string());

    assert_eq!(
        render(&extraction, &values, &HashMap::new()),
        "Bo says hello from Bo, [not a field]"
    );
}

#[test]
fn test_variable_inside_ignore_block_is_untouched() {
    let template = "[name = $n] wrote #ignore\n$n stays as-is\n#end";
    let extraction = parse(template);
    let (id, _) = extraction.inputs().next().unwrap();
    let mut values = HashMap::new();
    values.insert(id, "Cy".to_string());

    assert_eq!(
        render(&extraction, &values, &HashMap::new()),
        "Cy wrote $n stays as-is"
    );
}

#[test]
fn test_last_binding_wins_for_duplicate_variable() {
    let template = "[first = $v] [second = $v] -> $v";
    let extraction = parse(template);
    let ids: Vec<_> = extraction.inputs().map(|(id, _)| id).collect();
    let mut values = HashMap::new();
    values.insert(ids[0], "one".to_string());
    values.insert(ids[1], "two".to_string());

    assert_eq!(
        render(&extraction, &values, &HashMap::new()),
        "one two -> two"
    );
}

#[test]
fn test_selected_options_join_in_document_order() {
    let template = "Traits: #start\n+[brave]\n+[kind]\n+[curious]\n#end";
    let extraction = parse(template);
    let (id, _) = extraction.selects().next().unwrap();
    let mut selections = HashMap::new();
    // insertion order deliberately reversed; document order must win
    selections.insert(
        id,
        HashSet::from(["curious".to_string(), "brave".to_string()]),
    );

    assert_eq!(
        render(&extraction, &HashMap::new(), &selections),
        "Traits: brave\ncurious"
    );
}

#[test]
fn test_option_value_override_is_rendered() {
    let template = "#start Mode\n+[brief] 'Answer in one sentence.'\n#end";
    let extraction = parse(template);
    let (id, _) = extraction.selects().next().unwrap();
    let mut selections = HashMap::new();
    selections.insert(id, HashSet::from(["Answer in one sentence.".to_string()]));

    assert_eq!(
        render(&extraction, &HashMap::new(), &selections),
        "Answer in one sentence."
    );
}

#[test]
fn test_missing_values_render_empty() {
    let template = "a [x] b #start\n+[o]\n#end c";
    assert_eq!(render_empty(template), "a  b  c");
}

#[test]
fn test_fill_file_selections_respect_exclusivity() {
    let template = "#start Tone\n-[formal]\n-[casual]\n#end";
    // both named; the toggles run in order, so the second replaces
    // the first within the sovereign group
    let fill_file = FillFile::from_str(
        r#"
[selections]
Tone = ["formal", "casual"]
"#,
    )
    .unwrap();

    assert_eq!(fill(template, &fill_file), "casual");
}

#[test]
fn test_fill_file_label_fills_every_matching_field() {
    let template = "[name] and again [name]";
    let fill_file = FillFile::from_str(
        r#"
[fields]
name = "Em"
"#,
    )
    .unwrap();

    assert_eq!(fill(template, &fill_file), "Em and again Em");
}

#[test]
fn test_choices_drive_render() {
    let template = "#start\n-[red]\n-[blue]\n#end sky";
    let extraction = parse(template);
    let (id, region) = extraction.selects().next().unwrap();

    let mut choices = Choices::new();
    choices.toggle(region, 0, 0);
    choices.toggle(region, 0, 1); // sovereign: replaces red

    let mut selections = HashMap::new();
    selections.insert(id, choices.values(region));

    assert_eq!(
        render(&extraction, &HashMap::new(), &selections),
        "blue sky"
    );
}

#[test]
fn test_escapes_and_quotes_survive_a_busy_template() {
    let template = "Use \\[x\\] for [arg], wrap code like ''fn main()'' does.";
    let extraction = parse(template);
    let (id, _) = extraction.inputs().next().unwrap();
    let mut values = HashMap::new();
    values.insert(id, "count".to_string());

    assert_eq!(
        render(&extraction, &values, &HashMap::new()),
        "Use [x] for count, wrap code like fn main() does."
    );
}
