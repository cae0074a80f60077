use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["tokens-json", "tree-json", "tags", "kinds"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("lesson")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and checking lesson markdown")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a lesson.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect internal representations of lesson files")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("from").long("from"))
                .arg(Arg::new("to").long("to").required(true))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Check that a markdown file round-trips")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("template")
                .about("Print a ready-to-insert snippet")
                .arg(
                    Arg::new("kind")
                        .required(true)
                        .index(1)
                        .value_parser(["question", "table", "code"]),
                )
                .arg(Arg::new("file").index(2).value_hint(ValueHint::FilePath))
                .arg(Arg::new("language").long("language")),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "lesson", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "lesson", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "lesson", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
