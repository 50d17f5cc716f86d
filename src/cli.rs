// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::{env, path::PathBuf};

use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|arg| arg == "--lang")
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}

/// Builds the command tree with help texts in the given locale.
pub fn build_cli(locale: &str) -> Command {
    Command::new("suite-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(t!("arg_config", locale = locale).to_string())
                        .value_name("CONFIG")
                        .default_value("testcases.json")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("suite")
                        .short('s')
                        .long("suite")
                        .help(t!("arg_suite", locale = locale).to_string())
                        .value_name("SUITE")
                        .default_value("complete")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output-name")
                        .long("output-name")
                        .help(t!("arg_output_name", locale = locale).to_string())
                        .value_name("FILE")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .help(t!("arg_output_dir", locale = locale).to_string())
                        .value_name("DIR")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help(t!("arg_html", locale = locale).to_string())
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about(t!("cmd_compare_about", locale = locale).to_string())
                .arg(
                    Arg::new("target")
                        .help(t!("arg_target_run", locale = locale).to_string())
                        .value_name("TARGET_RUN")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("comparison")
                        .help(t!("arg_comparison_run", locale = locale).to_string())
                        .value_name("COMPARISON_RUN")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let language = match pre_parse_language() {
        Some(requested) => {
            let lang = crate::resolve_locale(&requested);
            rust_i18n::set_locale(&lang);
            lang
        }
        None => {
            let lang = crate::init();
            println!(
                "{}",
                t!("system_language_detected", locale = &lang, lang = &lang)
            );
            lang
        }
    };

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let config = run_matches
                .get_one::<PathBuf>("config")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("testcases.json"));
            let suite = run_matches
                .get_one::<String>("suite")
                .cloned()
                .unwrap_or_else(|| "complete".to_string());
            let output_name = run_matches.get_one::<String>("output-name").cloned();
            let output_dir = run_matches.get_one::<PathBuf>("output-dir").cloned();
            let html = run_matches.get_one::<PathBuf>("html").cloned();

            commands::run::execute(commands::run::RunOptions {
                config,
                suite,
                output_name,
                output_dir,
                html,
                locale: language,
            })
            .await?;
        }
        Some(("compare", compare_matches)) => {
            let (Some(target), Some(comparison)) = (
                compare_matches.get_one::<PathBuf>("target"),
                compare_matches.get_one::<PathBuf>("comparison"),
            ) else {
                anyhow::bail!("Both a target run and a comparison run are required.");
            };
            commands::compare::execute(target, comparison, &language)?;
        }
        _ => {
            // This case handles when no subcommand is given.
            // Clap will have already printed help info.
        }
    }
    Ok(())
}
