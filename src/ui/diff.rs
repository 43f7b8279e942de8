//! Differences between a published release and the expected one.

use std::io::{self, Write};

use console::{style, Style};
use similar::{ChangeTag, TextDiff};

/// Character-level diff on a single line, for release names.
pub fn write_inline_diff(out: &mut dyn Write, old: &str, new: &str) -> io::Result<()> {
    let diff = TextDiff::from_chars(old, new);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => write!(
                out,
                "{}",
                style(change.value()).red().strikethrough().for_stderr()
            )?,
            ChangeTag::Insert => write!(
                out,
                "{}",
                style(change.value()).green().underlined().for_stderr()
            )?,
            ChangeTag::Equal => write!(out, "{}", change.value())?,
        }
    }
    writeln!(out)
}

/// Unified line diff with three lines of context, for release bodies.
pub fn write_unified_diff(out: &mut dyn Write, old: &str, new: &str) -> io::Result<()> {
    let diff = TextDiff::from_lines(old, new);
    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        writeln!(out, "{}", style(hunk.header()).cyan().for_stderr())?;
        for change in hunk.iter_changes() {
            let (sign, line_style) = match change.tag() {
                ChangeTag::Delete => ("-", Style::new().red()),
                ChangeTag::Insert => ("+", Style::new().green()),
                ChangeTag::Equal => (" ", Style::new()),
            };
            write!(
                out,
                "{}",
                line_style
                    .for_stderr()
                    .apply_to(format!("{}{}", sign, change.value()))
            )?;
            if change.missing_newline() {
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
