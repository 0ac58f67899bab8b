use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::cmd::{CommandRunner, CommandSpec};
use crate::template::TemplateContext;

/// Longest message the default synthesis will produce.
const MAX_DEFAULT_MESSAGE: usize = 100;

/// Facts about the run, gathered once from the CI environment
/// and the last commit. Every field is independently optional;
/// a missing source never fails collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Metadata {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub git_ref: Option<String>,
    pub branch: Option<String>,
    pub sha: Option<String>,
    pub short_sha: Option<String>,
    pub actor: Option<String>,
    pub run_id: Option<String>,
    pub run_number: Option<String>,
    pub commit_message: Option<String>,
    pub short_commit_message: Option<String>,
}

impl Metadata {
    /// Gather run facts from the GitHub environment variables
    /// and the checkout's last commit message. Reads each
    /// variable exactly once; git failures leave the commit
    /// fields absent.
    #[must_use]
    pub fn collect(runner: &dyn CommandRunner, cwd: Option<&Path>) -> Self {
        let metadata = Self::from_parts(
            std::env::var("GITHUB_REPOSITORY").ok(),
            std::env::var("GITHUB_REF").ok(),
            std::env::var("GITHUB_SHA").ok(),
            std::env::var("GITHUB_ACTOR").ok(),
            std::env::var("GITHUB_RUN_ID").ok(),
            std::env::var("GITHUB_RUN_NUMBER").ok(),
            last_commit_message(runner, cwd),
        );

        match serde_json::to_string(&metadata) {
            Ok(json) => debug!("collected metadata: {json}"),
            Err(e) => debug!("collected metadata (unserializable: {e})"),
        }

        metadata
    }

    /// Derive the full field set from raw source values.
    #[must_use]
    pub fn from_parts(
        repository: Option<String>,
        git_ref: Option<String>,
        sha: Option<String>,
        actor: Option<String>,
        run_id: Option<String>,
        run_number: Option<String>,
        commit_message: Option<String>,
    ) -> Self {
        let (owner, repo) = match repository {
            Some(full) => match full.split_once('/') {
                Some((owner, repo)) => (Some(owner.to_string()), Some(repo.to_string())),
                None => (Some(full), None),
            },
            None => (None, None),
        };

        // Tag refs and other non-branch refs have no branch.
        let branch = git_ref
            .as_deref()
            .and_then(|r| r.strip_prefix("refs/heads/"))
            .map(ToString::to_string);

        let short_sha = sha
            .as_deref()
            .map(|s| s.get(..7).unwrap_or(s).to_string());

        let short_commit_message = commit_message
            .as_deref()
            .and_then(|m| m.lines().next())
            .map(|l| l.trim().to_string());

        Self {
            owner,
            repo,
            git_ref,
            branch,
            sha,
            short_sha,
            actor,
            run_id,
            run_number,
            commit_message,
            short_commit_message,
        }
    }

    /// Template context with the fixed placeholder set. The
    /// `deployment_url` and `version_id` names stay undefined
    /// before upload, so they render empty if referenced.
    #[must_use]
    pub fn context(&self) -> TemplateContext {
        let mut ctx = TemplateContext::new();
        ctx.set("owner", self.owner.as_deref());
        ctx.set("repo", self.repo.as_deref());
        ctx.set("ref", self.git_ref.as_deref());
        ctx.set("branch", self.branch.as_deref());
        ctx.set("sha", self.sha.as_deref());
        ctx.set("short_sha", self.short_sha.as_deref());
        ctx.set("actor", self.actor.as_deref());
        ctx.set("run_id", self.run_id.as_deref());
        ctx.set("run_number", self.run_number.as_deref());
        ctx.set("commit_message", self.commit_message.as_deref());
        ctx.set("short_commit_message", self.short_commit_message.as_deref());
        ctx
    }

    /// Message used when no template is supplied:
    /// `branch@short_sha: first commit line`, built from
    /// whichever parts exist and capped at 100 characters.
    #[must_use]
    pub fn default_message(&self) -> String {
        let prefix = match (self.branch.as_deref(), self.short_sha.as_deref()) {
            (Some(branch), Some(sha)) => format!("{branch}@{sha}"),
            (Some(one), None) | (None, Some(one)) => one.to_string(),
            (None, None) => String::new(),
        };

        let message = match (prefix.as_str(), self.short_commit_message.as_deref()) {
            ("", Some(msg)) => msg.to_string(),
            (_, Some(msg)) => format!("{prefix}: {msg}"),
            (_, None) => prefix,
        };

        message.chars().take(MAX_DEFAULT_MESSAGE).collect()
    }
}

/// Full message of the last commit on the current checkout,
/// or `None` if git is unavailable, the directory is not a
/// repository, or the lookup fails for any other reason.
fn last_commit_message(runner: &dyn CommandRunner, cwd: Option<&Path>) -> Option<String> {
    let spec = CommandSpec::new("git")
        .args(["log", "-1", "--pretty=%B"])
        .current_dir(cwd.map(Path::to_path_buf));

    match runner.run_captured(&spec) {
        Ok(message) if message.is_empty() => None,
        Ok(message) => Some(message),
        Err(e) => {
            debug!("could not read last commit message: {e}");
            None
        }
    }
}
