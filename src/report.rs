//! Result reporting.
//! Prints what a generation run created or updated: a bulleted list by
//! default, or a table with line and size counts in verbose mode.

use crate::asset::{Directory, File, Symlink};
use crate::collection::AssetCollection;

const TITLE: &str = "The following directories and files have been created or updated:";

const HEADERS: [&str; 4] = ["Type", "Path", "Lines", "Size"];

/// Prints the produced asset paths as a bulleted list, grouped by variant
/// and sorted by path within each group. Prints nothing for an empty run.
pub fn print_summary(assets: &AssetCollection) {
    for line in summary_lines(assets) {
        println!("{}", line);
    }
}

/// Prints a table of produced assets with per-file line and size counts and
/// a totals row. Files left untouched by their write policy show `-` in the
/// numeric columns. Prints nothing for an empty run.
pub fn print_verbose_summary(assets: &AssetCollection) {
    for line in verbose_summary_lines(assets) {
        println!("{}", line);
    }
}

/// Builds the bulleted listing, one output line per element. An empty
/// collection yields no lines.
pub fn summary_lines(assets: &AssetCollection) -> Vec<String> {
    if assets.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![TITLE.to_string(), String::new()];

    let mut directories: Vec<&Directory> = assets.directories().collect();
    directories.sort_by(|a, b| a.path().cmp(b.path()));
    for directory in directories {
        lines.push(format!(" * {}", directory.path()));
    }

    let mut files: Vec<&File> = assets.files().collect();
    files.sort_by(|a, b| a.path().cmp(b.path()));
    for file in files {
        lines.push(format!(" * {}", file.path()));
    }

    let mut symlinks: Vec<&Symlink> = assets.symlinks().collect();
    symlinks.sort_by(|a, b| a.path().cmp(b.path()));
    for symlink in symlinks {
        lines.push(format!(" * {}", symlink.path()));
    }

    lines.push(String::new());
    lines
}

/// Builds the verbose table, one output line per element. An empty
/// collection yields no lines.
pub fn verbose_summary_lines(assets: &AssetCollection) -> Vec<String> {
    if assets.is_empty() {
        return Vec::new();
    }

    let mut rows: Vec<[String; 4]> = Vec::new();

    let mut directories: Vec<&Directory> = assets.directories().collect();
    directories.sort_by(|a, b| a.path().cmp(b.path()));
    for directory in directories {
        rows.push([
            "directory".to_string(),
            directory.path().to_string(),
            "-".to_string(),
            "-".to_string(),
        ]);
    }

    let mut total_lines = 0;
    let mut total_size = 0;

    let mut files: Vec<&File> = assets.files().collect();
    files.sort_by(|a, b| a.path().cmp(b.path()));
    for file in files {
        let (lines, size) = match (file.content(), file.content_bytes()) {
            (Some(content), _) => {
                let size = content.len();
                let lines = if size == 0 {
                    0
                } else {
                    content.matches('\n').count() + 1
                };
                total_size += size;
                total_lines += lines;
                (lines.to_string(), size.to_string())
            }
            // Byte copies have a size but no meaningful line count.
            (None, Some(bytes)) => {
                total_size += bytes.len();
                ("-".to_string(), bytes.len().to_string())
            }
            (None, None) => ("-".to_string(), "-".to_string()),
        };
        rows.push(["file".to_string(), file.path().to_string(), lines, size]);
    }

    let mut symlinks: Vec<&Symlink> = assets.symlinks().collect();
    symlinks.sort_by(|a, b| a.path().cmp(b.path()));
    for symlink in symlinks {
        rows.push([
            "symlink".to_string(),
            symlink.path().to_string(),
            "-".to_string(),
            "-".to_string(),
        ]);
    }

    let total = assets.len();
    let noun = if total == 1 { "asset" } else { "assets" };
    let summary = [
        String::new(),
        format!("Total: {} {}", total, noun),
        total_lines.to_string(),
        format_size(total_size),
    ];

    let mut widths = [
        HEADERS[0].len(),
        HEADERS[1].len(),
        HEADERS[2].len(),
        HEADERS[3].len(),
    ];
    for row in rows.iter().chain(std::iter::once(&summary)) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut lines = vec![TITLE.to_string(), String::new()];
    lines.push(divider_line(&widths));
    lines.push(row_line(HEADERS, &widths));
    lines.push(divider_line(&widths));
    for row in &rows {
        lines.push(row_line(row_cells(row), &widths));
    }
    lines.push(divider_line(&widths));
    lines.push(row_line(row_cells(&summary), &widths));
    lines.push(divider_line(&widths));
    lines.push(String::new());
    lines
}

fn row_cells(row: &[String; 4]) -> [&str; 4] {
    [
        row[0].as_str(),
        row[1].as_str(),
        row[2].as_str(),
        row[3].as_str(),
    ]
}

fn divider_line(widths: &[usize; 4]) -> String {
    let mut line = String::new();
    for width in widths {
        line.push('+');
        line.push_str(&"-".repeat(width + 2));
    }
    line.push('+');
    line
}

// Numeric columns are right-aligned.
fn row_line(cells: [&str; 4], widths: &[usize; 4]) -> String {
    format!(
        "| {:<type_width$} | {:<path_width$} | {:>lines_width$} | {:>size_width$} |",
        cells[0],
        cells[1],
        cells[2],
        cells[3],
        type_width = widths[0],
        path_width = widths[1],
        lines_width = widths[2],
        size_width = widths[3],
    )
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.1} GiB", bytes as f64 / 1024.0 / 1024.0 / 1024.0)
    } else if bytes >= 1024 * 1024 {
        format!("{:.1} MiB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
