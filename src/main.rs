//! linesplit: split a byte stream into lines and route them to stdout or a logger
//!
//! Usage: linesplit [OPTIONS]

use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use linesink::config::line_capacity;
use linesink::handlers::trace_lines;
use linesink::{HandlerError, LineHandler, LineSplitter, SplitterConfig};

#[derive(Parser)]
#[command(name = "linesplit")]
#[command(version)]
#[command(about = "Split a byte stream on \\n, \\r and \\r\\n and re-emit each line", long_about = None)]
struct Cli {
    /// Input file (use - for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Prefix each output line with its line number and a tab
    #[arg(short, long)]
    number: bool,

    /// Send lines to the logger at this level instead of stdout
    #[arg(long, value_name = "LEVEL")]
    log: Option<Level>,

    /// Reserve a smaller line buffer
    #[arg(long)]
    low_memory: bool,

    /// Print line statistics to stderr
    #[arg(long)]
    stats: bool,
}

/// Initialize tracing on stderr, filtered by `RUST_LOG`.
///
/// Without `RUST_LOG` only warnings are shown, plus routed lines when
/// `--log` is given.
fn init_tracing(routed: Option<Level>) {
    let default_directives = match routed {
        Some(level) => format!("warn,linesink::lines={}", level.as_str().to_lowercase()),
        None => "warn".to_string(),
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> io::Result<()> {
    let mut input = open_input(cli.input)?;
    let config = SplitterConfig::new().with_line_capacity(line_capacity(cli.low_memory));

    let lines = match cli.log {
        Some(level) => pump(&mut input, trace_lines(level), config)?,
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            let lines = {
                let handler = stdout_handler(&mut writer, cli.number);
                pump(&mut input, handler, config)?
            };
            writer.flush()?;
            lines
        }
    };

    if cli.stats {
        eprintln!("Line stats: {} lines", lines);
    }

    Ok(())
}

fn open_input(path: Option<PathBuf>) -> io::Result<Box<dyn Read>> {
    match path {
        Some(p) if p.to_string_lossy() != "-" => Ok(Box::new(File::open(p)?)),
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Copy `input` through a splitter and return the number of lines dispatched.
fn pump<H: LineHandler>(
    input: &mut dyn Read,
    handler: H,
    config: SplitterConfig,
) -> io::Result<u64> {
    let mut sink = LineSplitter::from_handler(handler, config);
    io::copy(input, &mut sink)?;
    Ok(sink.lines_dispatched())
}

fn stdout_handler<W: Write>(
    writer: &mut W,
    number: bool,
) -> impl FnMut(String) -> Result<(), HandlerError> + '_ {
    let mut itoa_buf = itoa::Buffer::new();
    let mut line_no: u64 = 0;
    move |line: String| -> Result<(), HandlerError> {
        line_no += 1;
        if number {
            writer.write_all(itoa_buf.format(line_no).as_bytes())?;
            writer.write_all(b"\t")?;
        }
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
