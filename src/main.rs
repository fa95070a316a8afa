use anyhow::{bail, Context};
use clap::{ArgAction, Parser};
use is_terminal::IsTerminal;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use fancylog::{
    init_subscriber, normalize_record_timestamp, ColorFormatter, ConsoleConfig, ConsoleWriter,
    JsonlParser, LineParser, TimeZone,
};

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
enum ColorChoice {
    #[value(help = "Color when the output is a terminal")]
    Auto,
    #[value(help = "Always emit ANSI colors")]
    Always,
    #[value(help = "Never emit ANSI colors")]
    Never,
}

#[derive(Parser)]
#[command(name = "fancylog")]
#[command(about = "Render JSON log lines as colorized console output")]
#[command(version)]
struct Args {
    /// Input file (default: stdin)
    #[arg(value_name = "FILE")]
    input_file: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output")]
    output_file: Option<PathBuf>,

    /// When to colorize output
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorChoice,

    /// Render timestamps in UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Field to leave out of the output (repeatable)
    #[arg(long = "exclude", value_name = "KEY", action = ArgAction::Append)]
    exclude: Vec<String>,

    /// Fail on the first line that is not a JSON object instead of passing it through
    #[arg(long)]
    fail_fast: bool,

    /// Debug mode - show processing details on stderr
    #[arg(long)]
    debug: bool,

    /// Buffer size for I/O
    #[arg(long, default_value = "65536")] // 64KB
    buffer_size: usize,
}

impl Args {
    fn use_colors(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.output_file.is_none() && io::stdout().is_terminal(),
        }
    }

    fn console_config(&self) -> ConsoleConfig {
        let mut config = ConsoleConfig::default();
        if self.utc {
            config.time_zone = TimeZone::Utc;
        }
        config.fields_exclude.extend(self.exclude.iter().cloned());
        config
    }
}

fn main() {
    let args = Args::parse();

    let filter = if args.debug { "debug" } else { "warn" };
    if let Err(e) = init_subscriber(io::stderr().is_terminal(), filter) {
        eprintln!("fancylog: {}", e);
    }

    if let Err(e) = run(args) {
        let reason = format!("{:#}", e);
        tracing::error!(error = %reason, "fancylog failed");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let input: Box<dyn BufRead> = if let Some(input_path) = &args.input_file {
        let file = File::open(input_path)
            .with_context(|| format!("Failed to open input file '{}'", input_path.display()))?;
        Box::new(BufReader::with_capacity(args.buffer_size, file))
    } else {
        Box::new(BufReader::with_capacity(args.buffer_size, io::stdin()))
    };

    let output: Box<dyn Write> = if let Some(output_path) = &args.output_file {
        let file = File::create(output_path).with_context(|| {
            format!("Failed to create output file '{}'", output_path.display())
        })?;
        Box::new(io::BufWriter::with_capacity(args.buffer_size, file))
    } else {
        Box::new(io::BufWriter::with_capacity(args.buffer_size, io::stdout()))
    };

    let use_colors = args.use_colors();
    let config = args.console_config();
    let hooks = ColorFormatter::with_colors(use_colors, config.level_colors.clone());
    let mut writer = ConsoleWriter::new(output, hooks, config)?;
    let parser = JsonlParser::new();

    tracing::debug!(color = use_colors, utc = args.utc, "rendering log stream");

    let mut records = 0usize;
    let mut passed_through = 0usize;

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_number))?;
        if line.trim().is_empty() {
            continue;
        }

        match parser.parse_line(&line) {
            Ok(mut record) => {
                normalize_record_timestamp(&mut record, writer.config());
                writer.write_record(&record)?;
                records += 1;
            }
            Err(e) if args.fail_fast => {
                bail!("line {}: {}", line_number, e);
            }
            Err(e) => {
                tracing::debug!(line = line_number, error = %e, "passing line through");
                writer.write_raw(&line)?;
                passed_through += 1;
            }
        }
    }

    writer.flush()?;

    tracing::debug!(records, passed_through, "done");
    Ok(())
}
