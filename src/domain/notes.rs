//! Markdown release notes for a version's change-set.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::changeset::VersionChangeSet;
use crate::domain::commit::Commit;

/// Subject of the commit that makes up a project's very first release
pub const INITIAL_IMPLEMENTATION: &str = "🎉 Add initial implementation";
/// Body used when a release consists of only the initial implementation
pub const INITIAL_RELEASE_BODY: &str = "## 🎉 Initial release\n";

const MIGRATION_GUIDE: &str = "Migration Guide:";

fn migration_guide_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)migration guide:").expect("static regex is valid"))
}

/// Render the release body for a change-set.
///
/// Output always uses `\n` line endings and ends with exactly one newline.
pub fn render(changes: &VersionChangeSet) -> String {
    if is_initial_release(changes) {
        return INITIAL_RELEASE_BODY.to_string();
    }

    let mut result = String::new();

    if !changes.breaking.is_empty() {
        result.push_str("## 💥 Breaking Changes\n\n");

        for commit in &changes.breaking {
            push_bullet(&mut result, commit);

            if let Some(guide) = migration_guide(&commit.body) {
                result.push_str("\n  ");
                result.push_str(&guide);
                result.push_str("\n\n");
            }
        }

        result.push('\n');
    }

    push_section(&mut result, "## 🎉 Enhancements", &changes.features);
    push_section(&mut result, "## 🐛 Fixes", &changes.fixes);
    push_section(&mut result, "## 🌹 Internal Changes", &changes.internal);

    let mut body = result.trim_end().to_string();
    body.push('\n');
    body
}

fn is_initial_release(changes: &VersionChangeSet) -> bool {
    changes.breaking.is_empty()
        && changes.fixes.is_empty()
        && changes.internal.is_empty()
        && matches!(changes.features.as_slice(), [only] if only.subject == INITIAL_IMPLEMENTATION)
}

fn push_bullet(out: &mut String, commit: &Commit) {
    out.push_str("- ");
    out.push_str(commit.title());
    out.push('\n');
}

fn push_section(out: &mut String, heading: &str, commits: &[Commit]) {
    if commits.is_empty() {
        return;
    }

    out.push_str(heading);
    out.push_str("\n\n");
    for commit in commits {
        push_bullet(out, commit);
    }
    out.push('\n');
}

/// The migration guide of a breaking change body, indented two spaces.
///
/// Starts at the first case-insensitive `Migration Guide:` and runs to the
/// end of the body. Blank lines are left unindented and the block is trimmed,
/// so the caller supplies the indentation of the first line.
pub fn migration_guide(body: &str) -> Option<String> {
    let found = migration_guide_regex().find(body)?;
    let guide = format!("{}{}", MIGRATION_GUIDE, &body[found.end()..]);

    let indented = guide
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("  {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    Some(indented.trim().to_string())
}
