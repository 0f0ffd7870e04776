//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads points and runs fitting or model comparison
//! - prints reports/plots
//! - writes generated samples

use std::fs;

use clap::Parser;
use log::info;

use crate::cli::{Command, CompareArgs, FitArgs, InputArgs, SampleArgs};
use crate::data::{SampleConfig, format_points, generate_sample};
use crate::domain::{FitConfig, OutputFormat, PointLimits};
use crate::error::AppError;
use crate::report::{ComparisonReport, FitReport, to_json};

pub mod pipeline;

const SUBCOMMANDS: [&str; 4] = ["fit", "compare", "sample", "help"];

/// Entry point for the `trendfit` binary.
pub fn run() -> Result<(), AppError> {
    // `trendfit points.txt` and `trendfit -f points.txt` behave like
    // `trendfit fit ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    crate::logging::init(cli.log_level);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Compare(args) => handle_compare(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    match config.format {
        OutputFormat::Json => {
            let residuals = config.show_residuals.then_some(run.residuals.as_slice());
            let report = FitReport::new(&run.ingest, config.family, &run.fit, residuals);
            println!("{}", to_json(&report)?);
        }
        OutputFormat::Text => {
            println!(
                "{}",
                crate::report::format_fit_summary(&run.ingest, config.family, &run.fit)
            );

            if let Some(selection) = &run.selection {
                println!("{}", crate::report::format_comparison(selection));
            }

            if config.show_residuals {
                println!("{}", crate::report::format_residual_table(&run.residuals));
            }

            if config.plot {
                let plot = crate::plot::render_ascii_plot(
                    &run.ingest.points,
                    &run.fit,
                    config.plot_width,
                    config.plot_height,
                );
                println!("{plot}");
            }
        }
    }

    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let limits = point_limits(&args.input)?;
    let (ingest, selection) = pipeline::run_compare(&args.input.file, limits)?;

    match args.input.format {
        OutputFormat::Json => {
            println!("{}", to_json(&ComparisonReport::new(&ingest, &selection))?);
        }
        OutputFormat::Text => {
            println!("{}", crate::report::format_comparison(&selection));
        }
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        family: args.model,
        coefficients: args.coefficients,
        count: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        seed: args.seed,
    };
    let points = generate_sample(&config)?;
    let text = format_points(&config, &points);

    match &args.output {
        Some(path) => {
            fs::write(path, text).map_err(|e| {
                AppError::new(2, format!("Failed to write '{}': {e}", path.display()))
            })?;
            info!("Wrote {} point(s) to '{}'.", points.len(), path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    Ok(FitConfig {
        input: args.input.file.clone(),
        family: args.model,
        limits: point_limits(&args.input)?,
        format: args.input.format,
        show_residuals: args.residuals,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    })
}

fn point_limits(args: &InputArgs) -> Result<PointLimits, AppError> {
    if args.min_points == 0 {
        return Err(AppError::new(2, "--min-points must be at least 1."));
    }
    if args.min_points > args.max_points {
        return Err(AppError::new(
            2,
            format!(
                "--min-points ({}) must not exceed --max-points ({}).",
                args.min_points, args.max_points
            ),
        ));
    }
    Ok(PointLimits {
        min: args.min_points,
        max: args.max_points,
    })
}

/// Rewrite argv so `fit` is the default subcommand.
///
/// Rules:
/// - `trendfit <file> ...`              -> `trendfit fit --file <file> ...`
/// - `trendfit -f <file> ...`           -> `trendfit fit -f <file> ...`
/// - `trendfit --help/--version/-h`     -> unchanged
/// - any argv naming a subcommand       -> unchanged
///
/// Leading global flags (`--log-level <LEVEL>`) stay in front; `fit` is
/// inserted after them.
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let at = first_non_global_arg(&argv);
    let Some(first) = argv.get(at).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(first.as_str(), "-h" | "--help" | "-V" | "--version");
    if is_top_level_help_or_version {
        return argv;
    }

    if argv.iter().skip(1).any(|a| SUBCOMMANDS.contains(&a.as_str())) {
        return argv;
    }

    if first.starts_with('-') {
        argv.insert(at, "fit".to_string());
    } else {
        argv.splice(at..at, ["fit".to_string(), "--file".to_string()]);
    }
    argv
}

/// Index of the first argument after any leading global flags.
fn first_non_global_arg(argv: &[String]) -> usize {
    let mut i = 1;
    while let Some(arg) = argv.get(i) {
        if arg == "--log-level" {
            i += 2;
        } else if arg.starts_with("--log-level=") {
            i += 1;
        } else {
            break;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelFamily;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_file_becomes_fit() {
        assert_eq!(
            rewrite_args(argv(&["trendfit", "points.txt", "--model", "linear"])),
            argv(&["trendfit", "fit", "--file", "points.txt", "--model", "linear"])
        );
    }

    #[test]
    fn leading_flags_become_fit() {
        assert_eq!(
            rewrite_args(argv(&["trendfit", "-f", "p.csv"])),
            argv(&["trendfit", "fit", "-f", "p.csv"])
        );
    }

    #[test]
    fn global_flags_stay_in_front_of_the_default_subcommand() {
        assert_eq!(
            rewrite_args(argv(&["trendfit", "--log-level", "debug", "points.txt"])),
            argv(&["trendfit", "--log-level", "debug", "fit", "--file", "points.txt"])
        );
        assert_eq!(
            rewrite_args(argv(&["trendfit", "--log-level=info", "-f", "p.csv"])),
            argv(&["trendfit", "--log-level=info", "fit", "-f", "p.csv"])
        );
        assert_eq!(
            rewrite_args(argv(&["trendfit", "--log-level", "debug"])),
            argv(&["trendfit", "--log-level", "debug"])
        );

        let cli = crate::cli::Cli::parse_from(rewrite_args(argv(&[
            "trendfit", "--log-level", "debug", "points.txt",
        ])));
        assert_eq!(cli.log_level, Some(crate::logging::LogLevel::Debug));
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.input.file.to_str(), Some("points.txt"));
    }

    #[test]
    fn explicit_subcommands_and_help_are_untouched() {
        for args in [
            &["trendfit"][..],
            &["trendfit", "--help"][..],
            &["trendfit", "-V"][..],
            &["trendfit", "compare", "-f", "p.csv"][..],
            &["trendfit", "--log-level", "debug", "sample", "-m", "linear", "-c", "1,0"][..],
        ] {
            assert_eq!(rewrite_args(argv(args)), argv(args));
        }
    }

    #[test]
    fn rewritten_args_parse() {
        let cli = crate::cli::Cli::parse_from(rewrite_args(argv(&["trendfit", "p.txt", "--no-plot"])));
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        let config = fit_config_from_args(&args).unwrap();
        assert_eq!(config.input.to_str(), Some("p.txt"));
        assert_eq!(config.family, ModelFamily::Best);
        assert!(!config.plot);
    }

    #[test]
    fn point_limits_are_validated() {
        let cli = crate::cli::Cli::parse_from(argv(&[
            "trendfit", "fit", "-f", "p.txt", "--min-points", "13",
        ]));
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(fit_config_from_args(&args).unwrap_err().exit_code(), 2);

        let cli = crate::cli::Cli::parse_from(argv(&[
            "trendfit", "compare", "-f", "p.txt", "--min-points", "2", "--max-points", "50",
        ]));
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(point_limits(&args.input).unwrap(), PointLimits { min: 2, max: 50 });
    }
}
