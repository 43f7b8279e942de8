//! Main workflow orchestration logic
//!
//! Wires the commit source, the release renderer, the hosting API and the
//! operator together. [sync_releases] is generic over every collaborator so
//! the whole loop can run against mocks; [run] plugs in the real ones.

use tracing::{debug, info};

use crate::config::{Config, ConfigStore, TokenSource, TOKEN_ENV_VAR};
use crate::domain::{expected_releases, normalize_line_endings};
use crate::error::{ReleaseSyncError, Result};
use crate::git::{resolve_upstream, Git2Repository, Repository, Upstream};
use crate::github::{GitHubClient, ReleaseApi};
use crate::reconcile::{reconcile, ReleaseState};
use crate::ui::{self, Prompter, Terminal};

/// Outcome of a sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Missing releases that were published
    pub created: usize,
    /// Out-of-date releases that were refreshed
    pub updated: usize,
    /// Missing or out-of-date releases the operator chose to leave alone
    pub declined: usize,
    /// Releases that already matched
    pub in_sync: usize,
}

/// Reconcile the local history against the hosted releases of `upstream`.
///
/// Every missing or out-of-date release is shown to the operator and only
/// written after a yes. Calls happen one at a time, and the first failure
/// aborts the run.
pub fn sync_releases<R, A, P>(
    repo: &R,
    api: &A,
    upstream: &Upstream,
    prompter: &mut P,
) -> Result<SyncSummary>
where
    R: Repository + ?Sized,
    A: ReleaseApi + ?Sized,
    P: Prompter,
{
    let commits = repo.list_commits()?;
    let (expected, warnings) = expected_releases(commits);
    for warning in &warnings {
        debug!(%warning, "history");
        ui::write_boundary_warning(prompter.output(), warning)?;
    }
    info!(count = expected.len(), "expected releases");

    let remote = api.list_releases(upstream)?;
    let mut summary = SyncSummary::default();

    for planned in reconcile(&expected, &remote) {
        let tag = planned.draft.tag.as_str();

        match planned.state {
            ReleaseState::InSync => summary.in_sync += 1,
            ReleaseState::Missing(release) => {
                ui::write_release_preview(prompter.output(), &planned.draft)?;

                if prompter.ask_yes_no("Create this release [y,n]? ")? {
                    api.create_release(upstream, &release)?;
                    ui::write_success(prompter.output(), &format!("Created release {}", tag))?;
                    summary.created += 1;
                } else {
                    summary.declined += 1;
                }
            }
            ReleaseState::OutOfDate { current, update } => {
                let out = prompter.output();
                writeln!(out, "{}", ui::banner(tag))?;
                if current.name != update.name {
                    ui::write_inline_diff(out, &current.name, &update.name)?;
                }
                let current_body = normalize_line_endings(&current.body);
                if current_body != update.body {
                    ui::write_unified_diff(out, &current_body, &update.body)?;
                }
                writeln!(out, "{}", ui::banner(tag))?;

                if prompter.ask_yes_no("Update this release [y,n]? ")? {
                    api.update_release(upstream, &update)?;
                    ui::write_success(prompter.output(), &format!("Updated release {}", tag))?;
                    summary.updated += 1;
                } else {
                    summary.declined += 1;
                }
            }
        }
    }

    writeln!(prompter.output(), "All done")?;
    Ok(summary)
}

/// Token from the environment or config, asking the operator (and storing
/// the answer) when neither has one.
pub fn obtain_token<P: Prompter>(
    store: &ConfigStore,
    config: &mut Config,
    prompter: &mut P,
) -> Result<String> {
    if let Some((token, source)) = store.resolve_token(config) {
        let message = match source {
            TokenSource::Environment => format!("Using GitHub token from ${}", TOKEN_ENV_VAR),
            TokenSource::ConfigFile(path) => {
                format!("Using GitHub token from config at {}", path.display())
            }
        };
        ui::write_status(prompter.output(), &message)?;
        return Ok(token);
    }

    ui::write_token_instructions(prompter.output())?;
    let token = prompter.ask_line("> ")?;
    if token.is_empty() {
        return Err(ReleaseSyncError::config("no GitHub token provided"));
    }

    config.github_token = Some(token.clone());
    store.write(config)?;
    info!(path = %store.path().display(), "stored GitHub token");
    Ok(token)
}

/// Run a full sync for the repository in the current directory.
pub fn run() -> Result<SyncSummary> {
    let store = ConfigStore::default_location()?;
    let mut config = store.read()?;
    let mut terminal = Terminal::stdio();

    let token = obtain_token(&store, &mut config, &mut terminal)?;

    let repo = Git2Repository::discover()?;
    let upstream = resolve_upstream(&repo, &config.remote)?;
    info!(%upstream, remote = %config.remote, "resolved upstream");

    let api = GitHubClient::new(config.api_url.clone(), token)?;
    sync_releases(&repo, &api, &upstream, &mut terminal)
}
