//! Formatted terminal output.

use crate::domain::{FitResult, ModelFamily};
use crate::fit::selection::FitSelection;
use crate::io::ingest::IngestedData;
use crate::report::{Residual, coefficient_names, formula};

/// Format the full run summary (dataset stats + chosen model + diagnostics).
pub fn format_fit_summary(ingest: &IngestedData, requested: ModelFamily, fit: &FitResult) -> String {
    let mut out = String::new();

    out.push_str("=== trendfit - least-squares trend fit ===\n");
    out.push_str(&format!(
        "Points: n={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
        ingest.stats.n_points,
        ingest.stats.x_min,
        ingest.stats.x_max,
        ingest.stats.y_min,
        ingest.stats.y_max
    ));
    if ingest.points_ignored > 0 {
        out.push_str(&format!(
            "Ignored: {} point(s) past the limit ({} read)\n",
            ingest.points_ignored, ingest.points_read
        ));
    }
    if !ingest.row_errors.is_empty() {
        out.push_str(&format!("Skipped rows: {}\n", ingest.row_errors.len()));
    }

    out.push_str("\nModel:\n");
    if requested == ModelFamily::Best {
        out.push_str(&format!("- {} (selected by best fit)\n", fit.family));
    } else {
        out.push_str(&format!("- {}\n", fit.family));
    }
    out.push_str(&format!("- {}\n", formula(fit)));
    for (name, value) in coefficient_names(fit).iter().zip(&fit.coefficients) {
        out.push_str(&format!("  {name:<3}= {}\n", fmt_num(*value)));
    }

    out.push_str("\nDiagnostics:\n");
    if let Some(r) = fit.quality.pearson {
        out.push_str(&format!("- Pearson r : {}\n", fmt_num(r)));
    }
    out.push_str(&format!("- R²        : {}\n", fmt_num(fit.quality.r_squared)));
    out.push_str(&format!("- RSS       : {}\n", fmt_num(fit.quality.rss)));
    out.push_str(&format!("- RMSE      : {}\n", fmt_num(fit.quality.rmse)));

    out
}

/// Format every attempted family, best first marked with `*`.
pub fn format_comparison(selection: &FitSelection) -> String {
    let mut out = String::new();

    out.push_str("Model comparison:\n");
    out.push_str(
        format!(
            "  {:<12} {:>14} {:>14} {:>10}\n",
            "model", "rss", "rmse", "r2"
        )
        .trim_end(),
    );
    out.push('\n');

    for fit in &selection.fits {
        let chosen = if fit.family == selection.best.family { "*" } else { " " };
        out.push_str(
            format!(
                "{chosen} {:<12} {:>14} {:>14} {:>10}\n",
                fit.family.display_name(),
                fmt_num(fit.quality.rss),
                fmt_num(fit.quality.rmse),
                fmt_short(fit.quality.r_squared),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    for (family, err) in &selection.skipped {
        out.push_str(&format!("  (skipped {}) {err}\n", family.display_name()));
    }

    out
}

/// Per-point residual table.
pub fn format_residual_table(rows: &[Residual]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4} {:>12} {:>12} {:>12} {:>12}\n",
            "#", "x", "y", "y_fit", "residual"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(
        format!(
            "{:-<4} {:-<12} {:-<12} {:-<12} {:-<12}\n",
            "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (i, r) in rows.iter().enumerate() {
        out.push_str(
            format!(
                "{:>4} {:>12} {:>12} {:>12} {:>12}\n",
                i + 1,
                fmt_short(r.point.x),
                fmt_short(r.point.y),
                fmt_short(r.y_fit),
                fmt_short(r.residual),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "n/a".to_string();
    }
    if v != 0.0 && (v.abs() >= 1e6 || v.abs() < 1e-4) {
        format!("{v:.6e}")
    } else {
        format!("{v:.6}")
    }
}

fn fmt_short(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.4}")
    } else {
        "n/a".to_string()
    }
}
