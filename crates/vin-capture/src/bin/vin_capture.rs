use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use vin_capture::preprocess::Preprocessor;
use vin_capture::scan::ScanConfig;
use vin_capture::vin::{
    aggressive_correct, check_digit, correct_vin, matches_general_pattern,
    matches_north_american_pattern,
};

/// Offline tools for the VIN capture pipeline.
#[derive(Debug, Parser)]
#[command(author, version, about = "VIN capture pipeline utilities")]
struct Args {
    /// Log at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize an image the way the OCR loop does before recognition.
    Preprocess {
        input: PathBuf,
        output: PathBuf,
        /// JSON scan config; its `preprocess` section is used.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show both corrections of a raw OCR string.
    Correct { text: String },
    /// Write the scan-band crop of an image.
    Band {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    match args.command {
        Command::Preprocess {
            input,
            output,
            config,
        } => run_preprocess(&input, &output, config.as_deref()),
        Command::Correct { text } => {
            print!("{}", correction_report(&text)?);
            Ok(())
        }
        Command::Band {
            input,
            output,
            config,
        } => run_band(&input, &output, config.as_deref()),
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: bool) -> Result<(), Box<dyn Error>> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    vin_capture::core::init_with_level(level)?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(verbose: bool) -> Result<(), Box<dyn Error>> {
    use tracing_log::LogTracer;
    use tracing_subscriber::EnvFilter;

    let _ = LogTracer::init();
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    log::set_max_level(if verbose { LevelFilter::Debug } else { LevelFilter::Warn });
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ScanConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(ScanConfig::load_json(path)?),
        None => Ok(ScanConfig::default()),
    }
}

fn run_preprocess(input: &Path, output: &Path, config: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let cfg = load_config(config)?;
    log::debug!("preprocess config: {}", serde_json::to_string(&cfg.preprocess)?);
    let frame = vin_capture::image::load_frame(input)?;
    let normalized = Preprocessor::new(cfg.preprocess).run(frame);
    vin_capture::image::to_rgba_image(&normalized)?.save(output)?;
    log::info!("wrote {}", output.display());
    Ok(())
}

fn run_band(input: &Path, output: &Path, config: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let cfg = load_config(config)?;
    let frame = vin_capture::image::load_frame(input)?;
    let band = cfg.band.crop(&frame).ok_or("image has no pixels")?;
    log::debug!(
        "band {}x{} from {}x{}",
        band.width(),
        band.height(),
        frame.width(),
        frame.height()
    );
    vin_capture::image::to_rgba_image(&band)?.save(output)?;
    Ok(())
}

fn correction_report(text: &str) -> Result<String, Box<dyn Error>> {
    use std::fmt::Write;

    let aggressive = aggressive_correct(text);
    let candidate = correct_vin(text);
    let mut out = String::new();
    writeln!(out, "aggressive: {aggressive}")?;
    writeln!(
        out,
        "aggressive_general_pattern: {}",
        matches_general_pattern(&aggressive)
    )?;
    writeln!(out, "corrected: {}", candidate.text)?;
    writeln!(out, "selection: {:?}", candidate.selection)?;
    writeln!(out, "general_pattern: {}", candidate.matches_general_pattern)?;
    writeln!(
        out,
        "north_american_pattern: {}",
        matches_north_american_pattern(&candidate.text)
    )?;
    match check_digit(&candidate.text) {
        Some(expected) => writeln!(
            out,
            "check_digit: {} (expected {expected})",
            if candidate.check_digit_valid { "valid" } else { "invalid" }
        )?,
        None => writeln!(out, "check_digit: n/a")?,
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_both_corrections() {
        let report = correction_report("1G1JC5444R7252367").expect("report");
        assert!(report.contains("aggressive: 161JC5444R7252367"));
        assert!(report.contains("corrected: 1G1JC5444R7252367"));
        assert!(report.contains("north_american_pattern: true"));
    }

    #[test]
    fn report_flags_check_digit() {
        let report = correction_report("1HGCM82633A004352").expect("report");
        assert!(report.contains("check_digit: valid (expected 3)"));
    }
}
