// Command-line interface for lesson markdown
//
// This binary reads, converts and checks lesson documents: markdown extended with equations,
// embeds, vocabulary, chemical structures, questions and tables.
//
// The core capabilities live in the lesson-babel crate; this is a shell around it. Configuration
// comes from lesson-config: the embedded defaults, then lesson.toml in the working directory,
// then the file given with --config, then --extra-* overrides.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  lesson <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  lesson convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  lesson inspect <path> [<transform>]      - Print an internal view (defaults to "tree-json")
//  lesson check <path> [--strict]           - Check that the markdown round trip is stable
//  lesson template <question|table|code>    - Print a ready-to-insert snippet
//  lesson --list-transforms                 - List available transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format/transform.
// Example:
//  lesson inspect lesson.md tree-json --extra-pretty false

mod transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use lesson_babel::templates::{
    build_code_snippet, build_question_snippet, build_table_snippet, CodeSnippetRequest,
};
use lesson_babel::transforms::check_fixed_point;
use lesson_babel::{FormatError, FormatRegistry};
use lesson_config::{LessonConfig, Loader};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const SUBCOMMANDS: &[&str] = &["inspect", "convert", "check", "template", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("lesson")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and checking lesson markdown")
        .long_about(
            "lesson is a command-line tool for working with lesson documents.\n\n\
            Commands:\n  \
            - convert:  Transform between document formats (markdown, tag, json)\n  \
            - inspect:  View internal representations (tokens, tree, tags)\n  \
            - check:    Verify that markdown survives a read/write round trip\n  \
            - template: Print a question, table or code block snippet\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            lesson inspect lesson.md                   # View the document tree as JSON\n  \
            lesson inspect lesson.md kinds             # Count lesson constructs\n  \
            lesson lesson.md --to tag                  # Convert to tag markup (stdout)\n  \
            lesson lesson.md --to json -o lesson.json  # Convert to a JSON file"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a lesson.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect internal representations of lesson files")
                .long_about(
                    "View a markdown file at different processing stages.\n\n\
                    Transforms:\n  \
                    - tokens-json:  Token stream emitted by the grammar\n  \
                    - tree-json:    Document tree as JSON (default)\n  \
                    - tags:         Document tree as editor tag markup\n  \
                    - kinds:        Count of each lesson construct\n\n\
                    Extra Parameters:\n  \
                    --extra-pretty false   Compact JSON\n\n\
                    Examples:\n  \
                    lesson inspect lesson.md                 # Tree as JSON (default)\n  \
                    lesson inspect lesson.md tokens-json     # View token stream"
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'tree-json'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Lesson markdown (.md, .markdown)\n  \
                    - tag:      Editor tag markup (.html, .tag)\n  \
                    - json:     Document tree (.json)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    lesson convert input.md --to tag               # Tag markup (stdout)\n  \
                    lesson convert saved.html --to markdown -o a.md\n  \
                    lesson input.md --to json                      # 'convert' is optional"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Check that a markdown file round-trips")
                .long_about(
                    "Reads the file, writes it back, and does that again.\n\n\
                    The second pass must reproduce the first exactly; any drift is\n\
                    reported with its line and the command exits with status 1.\n\
                    With --strict the file must also already be in normal form.\n\n\
                    Examples:\n  \
                    lesson check lesson.md\n  \
                    lesson check lesson.md --strict"
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Also fail when the file is not in normal form")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("template")
                .about("Print a ready-to-insert snippet")
                .arg(
                    Arg::new("kind")
                        .help("Snippet to print")
                        .required(true)
                        .index(1)
                        .value_parser(["question", "table", "code"]),
                )
                .arg(
                    Arg::new("file")
                        .help("Source file to wrap (code only)")
                        .index(2)
                        .required_if_eq("kind", "code")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("language")
                        .long("language")
                        .help("Language for the code fence (defaults to the file extension)")
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    env_logger::init();

    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // The first arg looks like a file: treat it as `convert <file> ...`
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                debug!("no subcommand given, running convert");
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = required(sub_matches, "path");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("tree-json");
            handle_inspect_command(path, transform, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let to = required(sub_matches, "to");
            let registry = FormatRegistry::with_schema(config.schema());

            // Auto-detect --from if not provided
            let explicit_from = sub_matches.get_one::<String>("from").map(|s| s.as_str());
            let from = registry
                .resolve_format(input, explicit_from)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    if matches!(e, FormatError::UndetectedFormat(_)) {
                        eprintln!("Please specify --from explicitly");
                    }
                    std::process::exit(1);
                });
            debug!("reading {input} as {from}");

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output, &extra_params, &config);
        }
        Some(("check", sub_matches)) => {
            let path = required(sub_matches, "path");
            handle_check_command(path, sub_matches.get_flag("strict"), &config);
        }
        Some(("template", sub_matches)) => {
            let kind = required(sub_matches, "kind");
            let file = sub_matches.get_one::<String>("file").map(|s| s.as_str());
            let language = sub_matches.get_one::<String>("language").map(|s| s.as_str());
            handle_template_command(kind, file, language, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Clap enforces required arguments before we get here.
fn required<'a>(matches: &'a clap::ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing argument '{name}'");
            std::process::exit(1);
        }
    }
}

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &LessonConfig,
) {
    let source = read_source(path);
    let params = build_inspect_params(config, extra_params);
    debug!("running transform {transform} on {path}");

    let output = transforms::execute_transform(&source, transform, &config.schema(), &params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
}

fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &LessonConfig,
) {
    // Validate the target before reading the input
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_source(input);

    let mut format_options = HashMap::new();
    if to == "json" && !config.inspect.pretty {
        format_options.insert("pretty".to_string(), "false".to_string());
    }
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    debug!("converting {input} from {from} to {to} with {} option(s)", format_options.len());
    let result = registry
        .convert(&source, from, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Conversion error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result.into_bytes()).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{}", result.as_str()),
    }
}

fn handle_check_command(path: &str, strict: bool, config: &LessonConfig) {
    let source = read_source(path);
    debug!("checking {path} (strict: {strict})");
    let fixed = check_fixed_point(&source, &config.schema()).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    if let Some((line, first, second)) = fixed.first_drift() {
        eprintln!("{path}: round trip drifts at line {line}");
        eprintln!("  first pass:  {first}");
        eprintln!("  second pass: {second}");
        std::process::exit(1);
    }
    if strict && fixed.normalized != source.trim_end_matches('\n') {
        eprintln!("{path}: not in normal form (run `lesson {path} --to markdown`)");
        std::process::exit(1);
    }
    println!("{path}: ok");
}

fn handle_template_command(
    kind: &str,
    file: Option<&str>,
    language: Option<&str>,
    config: &LessonConfig,
) {
    let options = config.schema_options();
    debug!("building {kind} template");
    let snippet = match (kind, file) {
        ("question", _) => build_question_snippet(&options).map_err(|e| e.to_string()),
        ("table", _) => build_table_snippet(&config.table_template()).map_err(|e| e.to_string()),
        ("code", Some(file)) => {
            let request = CodeSnippetRequest {
                language,
                ..CodeSnippetRequest::new(Path::new(file), &options)
            };
            build_code_snippet(&request).map_err(|e| format!("Error reading file '{file}': {e}"))
        }
        _ => Err(format!("Unknown template '{kind}'")),
    };

    match snippet {
        Ok(snippet) => println!("{}", snippet.text),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("  tokens-json  - Token stream emitted by the grammar");
    println!("  tree-json    - Document tree as JSON");
    println!("  tags         - Document tree as editor tag markup");
    println!("  kinds        - Count of each lesson construct\n");

    println!("Conversion formats:\n");
    let registry = FormatRegistry::default();
    for (name, description) in registry.describe() {
        println!("  {name:<12} - {description}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> LessonConfig {
    if Path::new("lesson.toml").is_file() {
        debug!("layering ./lesson.toml over the defaults");
    }
    if let Some(path) = explicit_path {
        debug!("layering {path} from --config");
    }
    let loader = Loader::new().with_optional_file("lesson.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut LessonConfig, extra_params: &mut HashMap<String, String>) {
    let before = extra_params.len();
    if let Some(raw) = take_override(extra_params, &["code-language", "language"]) {
        config.markdown.default_code_language = raw;
    }
    if let Some(raw) = extra_params.remove("pretty") {
        config.inspect.pretty = parse_bool_arg("pretty", &raw);
    }
    if let Some(raw) = extra_params.remove("rows") {
        config.tables.rows = parse_count_arg("rows", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["cols", "columns"]) {
        config.tables.cols = parse_count_arg("cols", &raw);
    }
    if let Some(raw) = extra_params.remove("header-row") {
        config.tables.header_row = parse_bool_arg("header-row", &raw);
    }
    let applied = before - extra_params.len();
    if applied > 0 {
        debug!("applied {applied} --extra override(s) to the configuration");
    }
}

fn build_inspect_params(
    config: &LessonConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();

    params.insert("pretty".to_string(), config.inspect.pretty.to_string());

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

fn parse_count_arg(flag: &str, raw: &str) -> usize {
    match raw.parse::<usize>() {
        Ok(count) if count > 0 => count,
        _ => {
            eprintln!("Invalid count '{raw}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
