use std::{
    fs,
    io::{self, Read},
    process,
};

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, Command};
use kitty_cli::{
    command::COMMANDS,
    perform,
    selection::{parse_line_range, TextRange},
    DefaultNotifier, ExtensionManifest, HostConfig, Invocation, Notifier, SWIFT_SOURCE,
};
use kitty_core::init_tracing_with_level;
use tracing::debug;

fn main() -> Result<()> {
    let command_names: Vec<&str> = COMMANDS.iter().map(|(name, _)| *name).collect();

    let matches = Command::new("kitty")
        .version(kitty_core::VERSION)
        .about("Rewrites access-control modifiers in Swift source")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Swift source file; reads stdin when omitted")
                .index(1),
        )
        .arg(
            Arg::new("command")
                .long("command")
                .short('c')
                .value_name("NAME")
                .help(format!(
                    "Command name or fully qualified identifier ({})",
                    command_names.join(", ")
                ))
                .required(true),
        )
        .arg(
            Arg::new("lines")
                .long("lines")
                .short('l')
                .value_name("FIRST-LAST")
                .help("Zero-based line range to rewrite; may be repeated")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("selection")
                .long("selection")
                .short('s')
                .value_name("L:C-L:C")
                .help("Editor selection range; may be repeated")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("manifest")
                .long("manifest")
                .value_name("PATH")
                .help("JSON extension manifest carrying CFBundleIdentifier"),
        )
        .arg(
            Arg::new("content-type")
                .long("content-type")
                .value_name("UTI")
                .help("Content type of the buffer")
                .default_value(SWIFT_SOURCE),
        )
        .arg(
            Arg::new("in-place")
                .long("in-place")
                .short('i')
                .help("Write the result back to FILE")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the replacement lines as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let file = matches.get_one::<String>("file").cloned();
    let in_place = matches.get_flag("in-place");
    let json = matches.get_flag("json");
    if in_place && file.is_none() {
        bail!("--in-place needs a FILE");
    }

    let mut config = match matches.get_one::<String>("manifest") {
        Some(path) => HostConfig::from_manifest(
            &ExtensionManifest::load(path).with_context(|| format!("reading manifest {path}"))?,
        ),
        None => HostConfig::default(),
    };
    config.debug |= matches.get_flag("debug");
    init_tracing_with_level(config.log_level());

    let source = match &file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            source
        }
    };

    let mut selections = Vec::new();
    for range in matches.get_many::<String>("lines").into_iter().flatten() {
        selections.push(parse_line_range(range)?);
    }
    for range in matches.get_many::<String>("selection").into_iter().flatten() {
        selections.push(range.parse::<TextRange>()?);
    }

    let command = matches
        .get_one::<String>("command")
        .context("--command is required")?;
    let content_type = matches
        .get_one::<String>("content-type")
        .map_or(SWIFT_SOURCE, String::as_str);

    let mut invocation = Invocation::new(command.as_str(), content_type, &source, selections);
    if invocation.selections.is_empty() {
        invocation.selections = invocation.whole_buffer();
    }
    debug!(?config, selections = invocation.selections.len(), "invocation ready");

    let notifier = DefaultNotifier::new();
    let outcome = match perform(&config, invocation) {
        Ok(outcome) => outcome,
        Err(err) if err.is_user_facing() => {
            notifier.on_error(&err.to_string());
            process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    if outcome.change.is_none() {
        notifier.on_error(&format!("Unknown command: {command}"));
    }

    let trailing_newline = source.ends_with('\n');
    if json {
        notifier.on_output(&serde_json::to_string_pretty(&outcome.new_lines)?);
    }
    if in_place {
        if let Some(path) = &file {
            if !outcome.is_noop() {
                fs::write(path, outcome.text(trailing_newline))
                    .with_context(|| format!("writing {path}"))?;
            }
        }
    } else if !json {
        notifier.on_output(&outcome.text(false));
    }

    Ok(())
}
