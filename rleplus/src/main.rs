use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::ValueEnum;
use rleplus::codec::DecodeLimits;
use rleplus::config::Settings;
use rleplus::error::Error;
use rleplus::DecodeError;
use rleplus::RunLengthProgram;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogOutputFormat {
    Json,
    Pretty,
}

/// What to print for each decoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Show {
    /// The ascending set of values
    Values,
    /// The header and run lengths, without expansion
    Runs,
    /// Maximal consecutive ranges as `[start, end]` pairs
    Ranges,
    /// The number of values in the set
    Count,
}

/// Command line arguments for the decoder.
#[derive(Debug, Parser)]
#[clap(name = "rleplus", about = "Decode RLE+ encoded integer sets")]
struct DecoderArgs {
    /// Hex-encoded buffers to decode. When none are given, buffers are read
    /// from stdin, one per line.
    buffers: Vec<String>,

    /// Optional path to the configuration file. If not provided, defaults
    /// and `RLEPLUS_` environment variables are used.
    #[clap(short = 'c', long, required = false)]
    config: Option<PathBuf>,

    /// What to print for each buffer, as one JSON document per line.
    #[clap(short = 's', long, default_value = "values")]
    show: Show,

    /// Format of the log output written to stderr.
    #[clap(short = 'o', long = "output-format", default_value = "pretty")]
    output_format: LogOutputFormat,
}

fn main() -> ExitCode {
    let args = DecoderArgs::parse();

    let pretty = matches!(args.output_format, LogOutputFormat::Pretty);
    rleplus::logging::setup_logging(rleplus::logging::DEFAULT_DIRECTIVES, pretty);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "decoding failed");
            ExitCode::FAILURE
        }
    }
}

#[tracing::instrument(name = "rleplus", skip_all)]
fn run(args: DecoderArgs) -> Result<(), Error> {
    let settings = Settings::new(args.config.as_deref())?;
    let limits = settings.decoder.limits();
    tracing::debug!(?limits, "loaded configuration");

    let buffers = if args.buffers.is_empty() {
        read_stdin()?
    } else {
        args.buffers
    };

    let mut stdout = std::io::stdout().lock();
    let mut rejected = 0;

    for (index, buffer) in buffers.iter().enumerate() {
        match render(index, buffer, args.show, &limits) {
            Ok(output) => writeln!(stdout, "{output}")?,
            Err(error) => {
                tracing::warn!(%error, index, "skipping buffer");
                rejected += 1;
            }
        }
    }

    tracing::info!(total = buffers.len(), rejected, "finished decoding");

    if rejected > 0 {
        return Err(Error::BuffersRejected(rejected, buffers.len()));
    }

    Ok(())
}

/// Reads one buffer per non-empty line from stdin.
fn read_stdin() -> Result<Vec<String>, Error> {
    let mut buffers = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            buffers.push(line);
        }
    }

    Ok(buffers)
}

/// Decodes one hex buffer and renders it as JSON.
fn render(
    index: usize,
    buffer: &str,
    show: Show,
    limits: &DecodeLimits,
) -> Result<serde_json::Value, Error> {
    let hex = buffer.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let bytes = hex::decode(hex).map_err(|err| Error::InvalidHex(err, index))?;

    let decode_err = |source: DecodeError| Error::Decode { source, index };
    let program = RunLengthProgram::parse(&bytes).map_err(decode_err)?;

    let output = match show {
        Show::Values => serde_json::to_value(program.expand(limits).map_err(decode_err)?)?,
        Show::Runs => serde_json::to_value(&program)?,
        Show::Ranges => {
            let set = program.expand(limits).map_err(decode_err)?;
            set.ranges()
                .map(|range| serde_json::json!([range.start(), range.end()]))
                .collect()
        }
        Show::Count => program.count().map_err(decode_err)?.into(),
    };

    Ok(output)
}
