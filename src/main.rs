use anyhow::{Context, Result};
use clap::Parser;
use modtrace::{cli::Cli, filter, tables::LookupTables, tracer::Tracer};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(io::stderr)
            .init();
    }
}

/// Open the event stream: a file when given, stdin otherwise
fn open_events(args: &Cli) -> Result<Box<dyn BufRead>> {
    match &args.events {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open event stream {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Open the output sink: a file when given, stderr otherwise
fn open_output(args: &Cli) -> Result<Box<dyn Write>> {
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stderr().lock())),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    // Invalid regexes are fatal before any event is read
    let config = filter::FilterConfig::from_options(&args.filter_options())
        .context("Invalid filter configuration")?;

    let tables = match &args.tables {
        Some(path) => LookupTables::from_file(path)?,
        None => LookupTables::default(),
    };
    let (classifier, presets) = tables.into_parts();

    let module_filter = filter::ModuleFilter::new(config, classifier, presets);
    let mut tracer = Tracer::new(module_filter, open_output(&args)?);

    tracer.run(open_events(&args)?)?;

    let (summary, _) = tracer.finish()?;
    if args.summary {
        eprintln!("{}", summary);
    }

    Ok(())
}
