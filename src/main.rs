//! Prompt Stencil CLI
//!
//! Usage:
//!   prompt-stencil [OPTIONS] [FILE]
//!
//! Options:
//!   -v, --values <FILE>  Fill file (TOML) with field values and selections
//!   -j, --json           Print the extracted form schema as JSON
//!   -g, --grammar        Show template syntax reference
//!   -h, --help           Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use prompt_stencil::{parse, Extraction, FillFile, OptionKind};

#[derive(Parser)]
#[command(name = "prompt-stencil")]
#[command(about = "Templating engine for reusable prompt snippets")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Fill file (TOML) with field values and selections; renders the
    /// final text instead of listing the form
    #[arg(short, long)]
    values: Option<PathBuf>,

    /// Print the extracted form schema as JSON
    #[arg(short, long)]
    json: bool,

    /// Show template syntax reference
    #[arg(short, long)]
    grammar: bool,
}

#[derive(Serialize)]
struct FormSchema {
    fields: Vec<FieldSchema>,
    selects: Vec<RegionSchema>,
}

#[derive(Serialize)]
struct FieldSchema {
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    variable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<String>,
}

#[derive(Serialize)]
struct RegionSchema {
    title: String,
    groups: Vec<GroupSchema>,
}

#[derive(Serialize)]
struct GroupSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<String>,
    options: Vec<OptionSchema>,
}

#[derive(Serialize)]
struct OptionSchema {
    label: String,
    value: String,
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if cli.grammar {
        print_grammar();
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let template = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let extraction = parse(&template);

    match &cli.values {
        Some(path) => {
            let fill_file = match FillFile::from_file(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Error loading fill file '{}': {}", path.display(), e);
                    std::process::exit(1);
                }
            };
            let (values, selections) = fill_file.resolve(&extraction);
            println!("{}", prompt_stencil::render(&extraction, &values, &selections));
        }
        None => {
            let schema = build_schema(&extraction);
            if cli.json {
                match serde_json::to_string_pretty(&schema) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing schema: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print_schema(&schema);
            }
        }
    }
}

fn build_schema(extraction: &Extraction) -> FormSchema {
    let fields = extraction
        .inputs()
        .map(|(id, field)| FieldSchema {
            label: field.label.clone(),
            variable: field.var_name.clone(),
            context: extraction.display_context(id),
        })
        .collect();

    let selects = extraction
        .selects()
        .map(|(_, region)| RegionSchema {
            title: region.title.clone(),
            groups: region
                .groups
                .iter()
                .map(|group| GroupSchema {
                    header: group.header.clone(),
                    options: group
                        .options
                        .iter()
                        .map(|option| OptionSchema {
                            label: option.label.clone(),
                            value: option.value.clone(),
                            kind: match &option.kind {
                                OptionKind::Multi => "multi".to_string(),
                                OptionKind::Sovereign => "sovereign".to_string(),
                                OptionKind::Id(_) => "id".to_string(),
                            },
                            id: match &option.kind {
                                OptionKind::Id(id) => Some(id.clone()),
                                _ => None,
                            },
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    FormSchema { fields, selects }
}

fn print_schema(schema: &FormSchema) {
    if schema.fields.is_empty() && schema.selects.is_empty() {
        println!("No fields or selections in this template.");
        return;
    }

    if !schema.fields.is_empty() {
        println!("FIELDS");
        for field in &schema.fields {
            let mut line = format!("  [{}]", field.label);
            if let Some(var) = &field.variable {
                line.push_str(&format!(" -> ${}", var));
            }
            println!("{}", line);
            if let Some(context) = &field.context {
                println!("      {}", context);
            }
        }
    }

    for region in &schema.selects {
        if region.title.is_empty() {
            println!("SELECT");
        } else {
            println!("SELECT: {}", region.title);
        }
        for group in &region.groups {
            if let Some(header) = &group.header {
                println!("  # {}", header);
            }
            for option in &group.options {
                let marker = match option.id.as_deref() {
                    Some(id) => id.to_string(),
                    None if option.kind == "sovereign" => "-".to_string(),
                    None => "+".to_string(),
                };
                println!("  {} [{}]", marker, option.label);
            }
        }
    }
}

fn print_intro() {
    println!(
        r#"Prompt Stencil - templating engine for reusable prompt snippets

USAGE:
    prompt-stencil [OPTIONS] [FILE]
    echo '<template>' | prompt-stencil

OPTIONS:
    -v, --values <FILE>  Fill file (TOML); renders the final text
    -j, --json           Print the form schema as JSON
    -g, --grammar        Show template syntax reference
    -h, --help           Print help

QUICK START:
    printf 'Write about [topic].' | prompt-stencil

This lists the fields a template declares. Add --values to render:

    printf '[fields]\ntopic = "dogs"\n' > fill.toml
    printf 'Write about [topic].' | prompt-stencil --values fill.toml

Run --grammar for the full syntax reference."#
    );
}

fn print_grammar() {
    println!(
        r#"PROMPT STENCIL TEMPLATE SYNTAX
==============================

INPUT FIELDS
------------
[label]                   Fill-in-the-blank field
[label = $var]            Field whose value also replaces every $var
[label](context)          Optional help text after either form

IGNORE BLOCKS
-------------
#ignore                   Hide content from all interpretation;
...                       reinserted verbatim, variables untouched.
#end                      Hash counts must match (##ignore needs ##end).

QUOTE LITERALS
--------------
''text''                  Immune to markup, but $var references inside
                          are still resolved. Use a longer fence
                          ('''...''') to contain '' itself.

ESCAPES
-------
\#  \[  \]                The bare character, never markup.

SELECT REGIONS
--------------
#start Title              Opens a region (hash counts match like ignore)
# Group header            Opens an option group
+[option]                 Independent toggle (multi)
-[option]                 Exclusive within its group (sovereign)
1[option]                 Exclusive among options sharing the id
+[option] 'value'         Inline value override (\' escapes a quote)
+[option] ''value''       Quote-fence override, may span lines
#end

Unrecognized lines inside a region are ignored. Markup that never
closes is not an error; it stays in the text as-is."#
    );
}
