use std::path::PathBuf;

use crate::args;
use crate::cmd::CommandSpec;

/// Environment variable wrangler reads its credential from.
pub const TOKEN_VAR: &str = "CLOUDFLARE_API_TOKEN";

/// Builds the two wrangler invocations. Holds everything both
/// phases share: the base command (e.g. `npx wrangler`), the
/// API token, the optional `--config` path, and the optional
/// working directory override.
pub struct Wrangler {
    base: Vec<String>,
    api_token: String,
    config: Option<String>,
    working_directory: Option<PathBuf>,
}

impl Wrangler {
    /// `command` is the raw invocation string; it is tokenized
    /// with the same quote-aware split as the extra-args
    /// inputs. Falls back to `wrangler` when empty.
    #[must_use]
    pub fn new(command: &str, api_token: &str) -> Self {
        let mut base = args::tokenize(command);
        if base.is_empty() {
            base.push("wrangler".to_string());
        }
        Self {
            base,
            api_token: api_token.to_string(),
            config: None,
            working_directory: None,
        }
    }

    #[must_use]
    pub fn config(mut self, path: Option<String>) -> Self {
        self.config = path;
        self
    }

    #[must_use]
    pub fn working_directory(mut self, dir: Option<PathBuf>) -> Self {
        self.working_directory = dir;
        self
    }

    /// `versions upload` invocation with caller-supplied extra
    /// tokens and the rendered message.
    #[must_use]
    pub fn upload(&self, extra: &[String], message: &str) -> CommandSpec {
        let mut spec = self.spec().args(["versions", "upload"]);
        if let Some(config) = &self.config {
            spec = spec.args(["--config", config]);
        }
        spec.args(extra.iter().cloned())
            .arg(&format!("--message={message}"))
    }

    /// `versions deploy` invocation for an uploaded version id,
    /// auto-confirmed, with the same rendered message.
    #[must_use]
    pub fn deploy(&self, version_id: &str, extra: &[String], message: &str) -> CommandSpec {
        let mut spec = self
            .spec()
            .args(["versions", "deploy"])
            .arg(version_id)
            .arg("--yes");
        if let Some(config) = &self.config {
            spec = spec.args(["--config", config]);
        }
        spec.args(extra.iter().cloned())
            .arg(&format!("--message={message}"))
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new(&self.base[0])
            .args(self.base[1..].iter().cloned())
            .env(TOKEN_VAR, &self.api_token)
            .current_dir(self.working_directory.clone())
    }
}
