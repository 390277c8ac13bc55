/// Reads numbers from stdin, one per line, and reports how they fall into evenly spaced buckets.
use std::io;
use std::io::{BufRead, Write};

use clap::{App, Arg, ArgMatches, SubCommand};

use bucket_histogram::{range, CreationError, Histogram};

fn bucket_args<'a, 'b>(cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.arg(
        Arg::with_name("start")
            .long("start")
            .help("First bucket boundary")
            .takes_value(true)
            .default_value("0"),
    )
    .arg(
        Arg::with_name("stop")
            .long("stop")
            .help("Last bucket boundary (if reachable in whole steps)")
            .takes_value(true)
            .default_value("1000"),
    )
    .arg(
        Arg::with_name("step")
            .long("step")
            .help("Distance between boundaries")
            .takes_value(true)
            .default_value("100"),
    )
}

fn main() {
    let matches = App::new("bucket-histogram cli")
        .subcommand(bucket_args(
            SubCommand::with_name("table")
                .about("Print count, total and mean per bucket for number-per-line input on stdin"),
        ))
        .subcommand(bucket_args(
            SubCommand::with_name("snapshot")
                .about("Print a JSON snapshot of the histogram built from stdin"),
        ))
        .get_matches();

    let stdin = std::io::stdin();
    let stdin = stdin.lock();

    let stdout = std::io::stdout();
    let stdout = stdout.lock();

    match matches.subcommand() {
        ("table", Some(sub_matches)) => build(sub_matches, stdin).and_then(|h| table(stdout, &h)),
        ("snapshot", Some(sub_matches)) => {
            build(sub_matches, stdin).and_then(|h| snapshot(stdout, &h))
        }
        _ => {
            eprintln!("{}", matches.usage());
            std::process::exit(2);
        }
    }
    .expect("Subcommand failed")
}

/// Read numbers, one from each line, into a histogram with the requested boundaries.
fn build<R: BufRead>(matches: &ArgMatches, reader: R) -> Result<Histogram, CliError> {
    let arg = |name: &'static str| -> Result<i64, CliError> {
        matches
            .value_of(name)
            .unwrap_or_default()
            .parse()
            .map_err(|_| CliError::BadArgument(name))
    };

    let mut h = Histogram::new(range(arg("start")?, arg("stop")?, arg("step")?))?;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        h += line.parse::<i64>().map_err(|_| CliError::BadSample(line.to_owned()))?;
    }

    Ok(h)
}

fn table<W: Write>(mut writer: W, h: &Histogram) -> Result<(), CliError> {
    writeln!(
        writer,
        "{:>21} {:>21} {:>10} {:>14} {:>14}\n",
        "Lower", "Upper", "Count", "Total", "Mean"
    )?;
    for b in h.iter_buckets() {
        writeln!(
            writer,
            "{:>21} {:>21} {:>10} {:>14} {:>14.2}",
            b.lower,
            b.upper,
            b.count,
            b.total,
            b.mean()
        )?;
    }
    writeln!(
        writer,
        "#[Count = {}, Total = {}, Mean = {:.2}]",
        h.count(),
        h.total(),
        h.mean()
    )?;
    Ok(())
}

fn snapshot<W: Write>(mut writer: W, h: &Histogram) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut writer, &h.snapshot())?;
    writeln!(writer)?;
    Ok(())
}

// A handy way to enable ? use in subcommands by mapping common errors.
#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Json(serde_json::Error),
    HistogramCreation(CreationError),
    BadArgument(&'static str),
    BadSample(String),
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<CreationError> for CliError {
    fn from(e: CreationError) -> Self {
        CliError::HistogramCreation(e)
    }
}
