use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Before/after comparison between the backup page and the freshly merged one.
///
/// `new_size` counts characters of the merged text, while `original_bytes`
/// is the backup's on-disk size. The two only agree for ASCII content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReport {
    pub original_bytes: u64,
    pub new_size: u64,
    pub original_lines: usize,
    pub new_lines: usize,
}

impl SizeReport {
    pub fn compare(backup_path: &Path, merged: &str) -> Result<Self> {
        let original_bytes = fs::metadata(backup_path)
            .with_context(|| format!("failed to stat backup {}", backup_path.display()))?
            .len();
        let backup = fs::read_to_string(backup_path)
            .with_context(|| format!("failed to read backup {}", backup_path.display()))?;
        Ok(Self {
            original_bytes,
            new_size: merged.chars().count() as u64,
            original_lines: line_count(&backup),
            new_lines: line_count(merged),
        })
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Size comparison:")?;
        writeln!(
            f,
            "   Original: {} bytes ({} KB)",
            group_thousands(self.original_bytes),
            self.original_bytes / 1024
        )?;
        writeln!(
            f,
            "   New: {} bytes ({} KB)",
            group_thousands(self.new_size),
            self.new_size / 1024
        )?;
        writeln!(f, "📝 Line count:")?;
        writeln!(
            f,
            "   Original: {} lines",
            group_thousands(self.original_lines as u64)
        )?;
        write!(f, "   New: {} lines", group_thousands(self.new_lines as u64))
    }
}

/// Pieces between `\n` separators, so a trailing newline adds an empty line.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
