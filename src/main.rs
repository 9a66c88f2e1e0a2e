use anyhow::Result;
use clap::{Parser, Subcommand};
use speech_assessor::analysis::{EnergyExtractor, SidecarExtractor, DEFAULT_SILENCE_THRESHOLD};
use speech_assessor::config::{load_config, save_config};
use speech_assessor::export::{collect_audio_files, render_json, render_text, FileOutcome, ReportFormat};
use speech_assessor::model::Dimension;
use speech_assessor::{AssessmentEngine, AssessmentPipeline, EngineConfig, ExportConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "speech-assessor")]
#[command(about = "Score the speech quality of short practice recordings", long_about = None)]
struct Args {
    /// Configuration file (TOML); built-in defaults when omitted
    #[arg(short = 'c', long, global = true)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze recordings (files or directories)
    Analyze {
        /// Audio files or directories to analyze
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Feature file to use instead of each recording's <stem>.features.json
        #[arg(short = 'f', long)]
        features: Option<String>,

        /// Only use feature files, skip waveform-derived features
        #[arg(long)]
        sidecar_only: bool,

        /// Print and write reports as JSON
        #[arg(long)]
        json: bool,

        /// Write one report file per recording into this directory
        #[arg(short = 'o', long)]
        output_dir: Option<String>,

        /// RMS level below which a recording counts as silent
        #[arg(long, default_value_t = DEFAULT_SILENCE_THRESHOLD)]
        silence_threshold: f32,
    },

    /// Write the built-in configuration to a TOML file
    InitConfig {
        #[arg(short = 'o', long, default_value = "speech-assessor.toml")]
        output: String,
    },

    /// Validate a configuration file
    CheckConfig {
        path: String,
    },
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::InitConfig { output } => {
            let path = expand(&output);
            save_config(&EngineConfig::default(), &path)?;
            log::info!("Default configuration written to {:?}", path);
            Ok(())
        }
        Command::CheckConfig { path } => check_config(expand(&path)),
        Command::Analyze {
            inputs,
            features,
            sidecar_only,
            json,
            output_dir,
            silence_threshold,
        } => {
            let engine_config = match &args.config {
                Some(path) => load_config(&expand(path))?,
                None => EngineConfig::default(),
            };

            let inputs: Vec<PathBuf> = inputs.iter().map(|i| expand(i)).collect();
            let files = collect_audio_files(&inputs)?;
            if files.is_empty() {
                anyhow::bail!("No audio files found in {:?}", inputs);
            }
            if features.is_some() && files.len() > 1 {
                anyhow::bail!("--features can only be used with a single recording");
            }

            let format = if json {
                ReportFormat::Json
            } else {
                ReportFormat::Text
            };
            let mut export_config = ExportConfig::new()
                .with_format(format)
                .with_silence_threshold(silence_threshold);
            if let Some(dir) = &output_dir {
                export_config = export_config.with_output_dir(expand(dir));
            }

            let engine = AssessmentEngine::new(engine_config);
            let sidecar = match &features {
                Some(path) => SidecarExtractor::with_path(expand(path)),
                None => SidecarExtractor::new(),
            };

            let outcomes = if sidecar_only {
                log::info!("Using feature files only");
                AssessmentPipeline::new(export_config, engine, sidecar)?.run(&files)
            } else {
                let extractor = EnergyExtractor::new()
                    .with_silence_threshold(silence_threshold)
                    .with_sidecar(Some(sidecar));
                AssessmentPipeline::new(export_config, engine, extractor)?.run(&files)
            };

            print_outcomes(&outcomes, format)
        }
    }
}

fn check_config(path: PathBuf) -> Result<()> {
    let config = load_config(&path)?;

    println!("Configuration OK: {:?}", path);
    for dimension in Dimension::ALL {
        let features: Vec<&str> = config
            .features(dimension)
            .iter()
            .map(|f| f.feature.key())
            .collect();
        println!(
            "  {:<22} weight {:.2}  features: {}",
            dimension.key(),
            config.weights().get(dimension),
            features.join(", ")
        );
    }
    let thresholds = config.thresholds();
    let duration = config.duration();
    println!(
        "  thresholds: flag {} / strength {}; duration {}-{}s",
        thresholds.flag, thresholds.strength, duration.min_secs, duration.max_secs
    );
    Ok(())
}

fn print_outcomes(outcomes: &[FileOutcome], format: ReportFormat) -> Result<()> {
    let mut failed = 0;

    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                match format {
                    ReportFormat::Json => println!("{}", render_json(report)?),
                    ReportFormat::Text => {
                        let name = outcome.path.display().to_string();
                        println!("{}", render_text(report, &name, chrono::Local::now()));
                    }
                }
                if report.is_partial() {
                    eprintln!(
                        "⚠️  Partial analysis for {:?}: some measurements were unavailable",
                        outcome.path
                    );
                }
                if let Some(written) = &outcome.report_path {
                    log::info!("Report saved to {:?}", written);
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("❌ Could not analyze {:?}: {:#}", outcome.path, e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} recording(s) could not be analyzed", failed, outcomes.len());
    }
    Ok(())
}
