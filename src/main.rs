use std::path::PathBuf;

use anyhow::{bail, Context};
use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::prelude::*;
use clap::Parser as ClapParser;
use tracing::*;

use laxjson::{Json, Spanned};

mod config;
mod lints;
mod logging;

/// Audit a JSON document for the sloppy encodings a lenient decoder would
/// silently repair.
#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to a JSON document to audit.
    input: PathBuf,

    /// The path to a lint configuration file (defaults to `laxjson.toml` in
    /// the working directory, if present).
    #[arg(long)]
    config: Option<PathBuf>,
}

type DiagnosticReport<'a> = Report<'a, (&'a String, std::ops::Range<usize>)>;
type Diagnostics<'a> = Vec<DiagnosticReport<'a>>;

fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let cli = Args::parse();

    debug!(input = ?cli.input);

    let config = config::load(cli.config.as_deref())?;

    let json_string = match std::fs::read_to_string(&cli.input) {
        Ok(file) => file,
        Err(e) => {
            error!(path = ?cli.input, "failed to read input");
            return Err(e)
                .with_context(|| format!("failed to read file `{}`", cli.input.display()));
        }
    };

    let path = cli.input.display().to_string();

    let (document, errors) = laxjson::parser().parse(&json_string).into_output_errors();

    errors.into_iter().for_each(|e| {
        Report::build(ReportKind::Error, &path, e.span().start)
            .with_message(e.to_string())
            .with_label(
                Label::new((&path, e.span().into_range()))
                    .with_message(e.reason().to_string())
                    .with_color(Color::Red),
            )
            .finish()
            .print((&path, Source::from(&json_string)))
            .unwrap()
    });

    let Some(document) = document else {
        bail!("failed to parse JSON document");
    };

    debug!(?document);

    let Spanned {
        val: Json::Object(_),
        ..
    } = &document
    else {
        bail!("unexpected top level JSON kind");
    };

    let mut diagnostics = Vec::new();

    lints::lint_stringly_scalars(&config, &document, &path, &mut diagnostics);
    lints::lint_mixed_arrays(&config, &document, &path, &mut diagnostics);
    lints::lint_null_members(&config, &document, &path, &mut diagnostics);

    let findings = diagnostics.len();
    for diagnostic in diagnostics {
        diagnostic.print((&path, Source::from(&json_string)))?;
    }

    if findings > 0 {
        info!(findings, "sloppy encodings found");
    } else {
        info!("no sloppy encodings found");
    }

    Ok(())
}
