//! Point ingest and validation.
//!
//! Two input shapes are accepted, chosen by file extension:
//!
//! - `*.csv`: a header row with `x` and `y` columns (any order, case-insensitive,
//!   other columns ignored). Malformed rows are skipped and reported as
//!   [`RowError`]s.
//! - anything else: a whitespace-separated token stream `x1 y1 x2 y2 ...`,
//!   possibly spread over several lines. `#` starts a comment. A decimal comma
//!   is accepted (`1,5` reads as `1.5`). Any unreadable token fails the load.
//!
//! Points are returned in file order. Only the first `limits.max` points are
//! kept; fewer than `limits.min` is an error.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{info, warn};

use crate::domain::{DatasetStats, Point, PointLimits};
use crate::error::AppError;

/// A row-level error encountered during CSV ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: points in file order + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub points: Vec<Point>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    /// Points read before applying the maximum.
    pub points_read: usize,
    /// Points dropped because they were past `limits.max`.
    pub points_ignored: usize,
}

/// Load points from `path` and apply the point-count limits.
pub fn load_points(path: &Path, limits: PointLimits) -> Result<IngestedData, AppError> {
    let mut file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open input '{}': {e}", path.display()),
        )
    })?;

    let (points, row_errors) = if is_csv(path) {
        read_csv_points(file)?
    } else {
        let mut text = String::new();
        file.read_to_string(&mut text).map_err(|e| {
            AppError::new(
                2,
                format!("Failed to read input '{}': {e}", path.display()),
            )
        })?;
        (parse_text(&text)?, Vec::new())
    };

    for err in &row_errors {
        warn!("Skipping line {}: {}", err.line, err.message);
    }

    let ingested = finish(points, row_errors, limits)?;
    info!(
        "Loaded {} point(s) from '{}'.",
        ingested.points.len(),
        path.display()
    );
    Ok(ingested)
}

/// Apply limits and compute stats.
pub fn finish(
    mut points: Vec<Point>,
    row_errors: Vec<RowError>,
    limits: PointLimits,
) -> Result<IngestedData, AppError> {
    let points_read = points.len();
    let points_ignored = points_read.saturating_sub(limits.max);
    if points_ignored > 0 {
        warn!(
            "Input has {points_read} points; only the first {} are used, {points_ignored} ignored.",
            limits.max
        );
        points.truncate(limits.max);
    }

    if points.len() < limits.min {
        return Err(AppError::new(
            3,
            format!(
                "Need at least {} valid point(s), found {}.",
                limits.min,
                points.len()
            ),
        ));
    }

    let stats = compute_stats(&points)
        .ok_or_else(|| AppError::new(3, "No valid points remain after ingest."))?;

    Ok(IngestedData {
        points,
        stats,
        row_errors,
        points_read,
        points_ignored,
    })
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Parse the whitespace-separated `x y` token format.
pub fn parse_text(text: &str) -> Result<Vec<Point>, AppError> {
    let mut points = Vec::new();
    let mut pending_x: Option<(f64, usize)> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let content = raw_line.split('#').next().unwrap_or("");

        for token in content.split_whitespace() {
            let value = parse_value(token).map_err(|msg| {
                AppError::new(2, format!("Line {line_no}: {msg}"))
            })?;

            match pending_x.take() {
                None => pending_x = Some((value, line_no)),
                Some((x, _)) => points.push(Point::new(x, value)),
            }
        }
    }

    if let Some((x, line_no)) = pending_x {
        return Err(AppError::new(
            2,
            format!("Line {line_no}: x value {x} has no matching y value."),
        ));
    }

    Ok(points)
}

/// Read CSV points with `x`/`y` header columns.
pub fn read_csv_points<R: Read>(reader: R) -> Result<(Vec<Point>, Vec<RowError>), AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let x_idx = column(&header_map, "x")?;
    let y_idx = column(&header_map, "y")?;

    let mut points = Vec::new();
    let mut row_errors = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header, and lines are 1-based.
        let line = result
            .as_ref()
            .ok()
            .and_then(|r| r.position())
            .map_or(idx + 2, |pos| pos.line() as usize);

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, x_idx, y_idx) {
            Ok(point) => points.push(point),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    Ok((points, row_errors))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn column(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(name)
        .copied()
        .ok_or_else(|| AppError::new(2, format!("Missing required column: `{name}`")))
}

fn parse_row(record: &StringRecord, x_idx: usize, y_idx: usize) -> Result<Point, String> {
    let get = |idx: usize, name: &str| {
        record
            .get(idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("Missing required value: `{name}`"))
    };

    let x = parse_value(get(x_idx, "x")?)?;
    let y = parse_value(get(y_idx, "y")?)?;
    Ok(Point::new(x, y))
}

/// Parse one number; a single decimal comma is accepted.
fn parse_value(token: &str) -> Result<f64, String> {
    let normalized = if token.matches(',').count() == 1 && !token.contains('.') {
        token.replacen(',', ".", 1)
    } else {
        token.to_string()
    };

    let v = normalized
        .parse::<f64>()
        .map_err(|_| format!("'{token}' is not a number."))?;
    if !v.is_finite() {
        return Err(format!("'{token}' is not a finite number."));
    }
    Ok(v)
}

fn compute_stats(points: &[Point]) -> Option<DatasetStats> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for p in points {
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }

    if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }

    Some(DatasetStats {
        n_points: points.len(),
        x_min,
        x_max,
        y_min,
        y_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn limits(min: usize, max: usize) -> PointLimits {
        PointLimits { min, max }
    }

    #[test]
    fn text_tokens_pair_across_lines() {
        let text = "1 2\n3\n4   5 6\n";
        let points = parse_text(text).unwrap();
        assert_eq!(
            points,
            vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0), Point::new(5.0, 6.0)]
        );
    }

    #[test]
    fn text_comments_and_decimal_commas() {
        let text = "# x y\n1,5 -2.25  # first\n\n3e1\t0,125\n";
        let points = parse_text(text).unwrap();
        assert_eq!(points, vec![Point::new(1.5, -2.25), Point::new(30.0, 0.125)]);
    }

    #[test]
    fn text_rejects_garbage_and_dangling_x() {
        let err = parse_text("1 2\n3 abc\n").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Line 2"));

        let err = parse_text("1 2 3").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("no matching y"));

        assert!(parse_text("1 NaN").is_err());
        assert!(parse_text("1 inf").is_err());
    }

    #[test]
    fn csv_reads_columns_by_name() {
        let data = "\u{feff}Label,Y,X\na,2,1\nb,4.5,2\n";
        let (points, errors) = read_csv_points(Cursor::new(data)).unwrap();
        assert!(errors.is_empty());
        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(2.0, 4.5)]);
    }

    #[test]
    fn csv_skips_bad_rows_with_line_numbers() {
        let data = "x,y\n1,2\n2,oops\n3,\n4,8\n";
        let (points, errors) = read_csv_points(Cursor::new(data)).unwrap();
        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(4.0, 8.0)]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line, 3);
        assert_eq!(errors[1].line, 4);
    }

    #[test]
    fn csv_requires_x_and_y_headers() {
        let err = read_csv_points(Cursor::new("a,b\n1,2\n")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("`x`"));
    }

    #[test]
    fn extra_points_are_ignored() {
        let points: Vec<Point> = (0..15).map(|i| Point::new(i as f64, 1.0)).collect();
        let data = finish(points, Vec::new(), limits(8, 12)).unwrap();
        assert_eq!(data.points.len(), 12);
        assert_eq!(data.points_read, 15);
        assert_eq!(data.points_ignored, 3);
        assert_eq!(data.stats.x_max, 11.0);
    }

    #[test]
    fn too_few_points_is_insufficient_data() {
        let points: Vec<Point> = (0..5).map(|i| Point::new(i as f64, 1.0)).collect();
        let err = finish(points, Vec::new(), limits(8, 12)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn stats_cover_the_kept_points() {
        let points = vec![Point::new(-1.0, 4.0), Point::new(3.0, -2.0), Point::new(0.5, 0.0)];
        let data = finish(points, Vec::new(), limits(1, 12)).unwrap();
        assert_eq!(
            data.stats,
            DatasetStats {
                n_points: 3,
                x_min: -1.0,
                x_max: 3.0,
                y_min: -2.0,
                y_max: 4.0,
            }
        );
    }

    #[test]
    fn extension_selects_the_parser() {
        assert!(is_csv(Path::new("points.CSV")));
        assert!(!is_csv(Path::new("points.txt")));
        assert!(!is_csv(Path::new("points")));
    }
}
