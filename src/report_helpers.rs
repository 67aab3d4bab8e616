use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// Compute the max display width of `labels`, with a minimum of `min`.
/// Display names carry accents and CJK, so width is measured in terminal
/// columns rather than bytes.
pub fn max_label_width<'a>(labels: impl Iterator<Item = &'a str>, min: usize) -> usize {
    labels.map(UnicodeWidthStr::width).max().unwrap_or(min).max(min)
}

/// Left-align `label` in a field of `width` terminal columns.
pub fn pad(label: &str, width: usize) -> String {
    let fill = width.saturating_sub(label.width());
    format!("{label}{}", " ".repeat(fill))
}

/// Print a horizontal separator of box-drawing chars.
pub fn separator(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Serialize to pretty JSON and print to stdout.
pub fn print_json_stdout(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "report_helpers_test.rs"]
mod tests;
