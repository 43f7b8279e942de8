//! Formatting functions for UI output.
//!
//! Everything interactive goes to the prompter's writer (stderr when run from
//! the terminal), so these take the writer explicitly and can be tested
//! against an in-memory buffer.

use std::io::{self, Write};

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::ReleaseDraft;

/// URL where a GitHub personal access token can be created
pub const TOKEN_URL: &str = "https://github.com/settings/tokens";

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    let _ = write_error(&mut io::stderr(), message);
}

/// Write an error message with a red prefix.
pub fn write_error(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("ERROR:").red().for_stderr(), message)
}

/// Write a success message with green checkmark.
pub fn write_success(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("✓").green().for_stderr(), message)
}

/// Write a status message with yellow arrow.
pub fn write_status(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("→").yellow().for_stderr(), message)
}

/// Write a boundary warning with a yellow warning icon.
pub fn write_boundary_warning(out: &mut dyn Write, warning: &BoundaryWarning) -> io::Result<()> {
    writeln!(out, "{} {}", style("⚠ WARNING:").yellow().for_stderr(), warning)
}

/// Separator line framing a release preview or diff
pub fn banner(tag: &str) -> String {
    format!(
        "============================== {} ==============================",
        tag
    )
}

/// Show a release that is about to be created: name, blank line, body.
pub fn write_release_preview(out: &mut dyn Write, draft: &ReleaseDraft) -> io::Result<()> {
    writeln!(out, "{}", banner(&draft.tag))?;
    writeln!(out, "{}", style(&draft.name).bold().for_stderr())?;
    writeln!(out)?;
    write!(out, "{}", draft.body)?;
    writeln!(out, "{}", banner(&draft.tag))
}

/// Explain how to obtain a personal access token.
pub fn write_token_instructions(out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "To access GitHub this program needs a \"Personal access token\", please create one at the below URL and paste it below"
    )?;
    writeln!(out)?;
    writeln!(out, "{}", style(TOKEN_URL).cyan().for_stderr())?;
    writeln!(out)
}
