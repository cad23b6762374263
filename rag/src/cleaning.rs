//! Text normalization executed before chunking.

/// Normalizes extracted text so chunk boundaries are not wasted on layout noise.
///
/// - normalizes line endings (`\r\n`, `\r` -> `\n`)
/// - drops control characters other than newline and tab
/// - trims trailing whitespace on each line
/// - collapses runs of blank lines into one
/// - trims outer whitespace
#[must_use]
pub fn clean_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(normalized.len());
    let mut saw_blank = false;

    for line in normalized.lines() {
        let line: String = line
            .chars()
            .filter(|c| !c.is_control() || *c == '\t')
            .collect();
        let line = line.trim_end();
        if line.is_empty() {
            saw_blank = true;
            continue;
        }
        if !out.is_empty() {
            out.push_str(if saw_blank { "\n\n" } else { "\n" });
        }
        saw_blank = false;
        out.push_str(line);
    }

    out.trim().to_string()
}
