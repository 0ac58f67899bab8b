use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::args;
use crate::cmd::{CommandRunner, SystemRunner};
use crate::error::{ActionError, ActionResult};
use crate::extract;
use crate::gha;
use crate::metadata::Metadata;
use crate::template;
use crate::wrangler::Wrangler;

/// Action inputs. Each one is also readable from its
/// `INPUT_*` environment variable, which is how the Actions
/// runner hands inputs to the step.
#[derive(Debug, Parser)]
#[command(name = "arbalest")]
#[command(about = "Upload and deploy a Cloudflare Workers version via wrangler")]
pub struct Inputs {
    /// Cloudflare API token, injected into the wrangler
    /// environment. Never passed on the command line.
    #[arg(long, env = "INPUT_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Base wrangler invocation, e.g. `npx wrangler`.
    #[arg(long, env = "INPUT_COMMAND")]
    pub command: String,

    /// Working directory for both wrangler invocations.
    #[arg(long, env = "INPUT_WORKING_DIRECTORY")]
    pub working_directory: Option<PathBuf>,

    /// Wrangler config file, passed as `--config <path>`.
    #[arg(long, env = "INPUT_CONFIG")]
    pub config: Option<String>,

    /// Extra arguments appended to `versions upload`,
    /// quote-aware tokenized.
    #[arg(long, env = "INPUT_UPLOAD_ARGS", allow_hyphen_values = true)]
    pub upload_args: Option<String>,

    /// Extra arguments appended to `versions deploy`,
    /// quote-aware tokenized.
    #[arg(long, env = "INPUT_DEPLOY_ARGS", allow_hyphen_values = true)]
    pub deploy_args: Option<String>,

    /// Message template ({{branch}}, {{short_sha}}, ...).
    /// When absent a `branch@sha: commit` message is
    /// synthesized.
    #[arg(long, env = "INPUT_MESSAGE")]
    pub message: Option<String>,

    /// Tag template. When absent the tag is empty.
    #[arg(long, env = "INPUT_TAG")]
    pub tag: Option<String>,

    /// Upload the version but skip the deploy phase.
    #[arg(
        long,
        env = "INPUT_UPLOAD_ONLY",
        default_value = "false",
        action = clap::ArgAction::Set,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub upload_only: bool,
}

/// What a run produced. Published as step outputs by the
/// binary; returned as a value so tests can assert on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub version_id: Option<String>,
    pub deployment_url: Option<String>,
    pub message: String,
    pub tag: String,
}

impl DeployOutcome {
    /// Publish the non-empty outputs.
    pub fn publish(&self) -> ActionResult<()> {
        if let Some(id) = &self.version_id {
            gha::set_output("version-id", id)?;
        }
        if let Some(url) = &self.deployment_url {
            gha::set_output("deployment-url", url)?;
        }
        if !self.message.is_empty() {
            gha::set_output("message", &self.message)?;
        }
        if !self.tag.is_empty() {
            gha::set_output("tag", &self.tag)?;
        }
        Ok(())
    }
}

/// Two-phase deployment flow: collect metadata, render the
/// message and tag, `versions upload`, then (unless running
/// upload-only) `versions deploy` the uploaded version id.
pub struct Pipeline {
    inputs: Inputs,
    runner: Box<dyn CommandRunner>,
}

impl Pipeline {
    #[must_use]
    pub fn new(inputs: Inputs) -> Self {
        Self {
            inputs,
            runner: Box::new(SystemRunner),
        }
    }

    /// Substitute the command runner. Tests use this to script
    /// wrangler and git replies.
    #[must_use]
    pub fn runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Run the flow to completion.
    ///
    /// Fatal conditions: empty credential, a non-zero exit
    /// from either wrangler invocation, and (in full mode
    /// only) upload output without a version id. A missing
    /// deployment URL is never fatal.
    pub fn run(&self) -> ActionResult<DeployOutcome> {
        let inputs = &self.inputs;

        if inputs.api_token.trim().is_empty() {
            return Err(ActionError::MissingCredential);
        }

        let metadata = Metadata::collect(&*self.runner, inputs.working_directory.as_deref());
        let ctx = metadata.context();

        // Rendered once; upload and deploy share the result.
        let message = inputs
            .message
            .as_deref()
            .map_or_else(|| metadata.default_message(), |t| template::render(t, &ctx));
        let tag = inputs
            .tag
            .as_deref()
            .map(|t| template::render(t, &ctx))
            .unwrap_or_default();

        let wrangler = Wrangler::new(&inputs.command, &inputs.api_token)
            .config(inputs.config.clone())
            .working_directory(inputs.working_directory.clone());

        let upload_extra = inputs.upload_args.as_deref().map(args::tokenize).unwrap_or_default();
        let upload = wrangler.upload(&upload_extra, &message);
        info!("uploading version: {}", upload.display_line());

        let captured = self.runner.run_streamed(&upload)?;
        if !captured.success() {
            return Err(ActionError::CommandFailed {
                command: upload.display_line(),
                code: captured.code,
            });
        }

        let version_id = extract::version_id(&captured.stdout);

        if inputs.upload_only {
            match &version_id {
                Some(id) => info!("uploaded version {id}"),
                None => info!("upload succeeded but no version id was found in the output"),
            }
            return Ok(DeployOutcome {
                version_id,
                deployment_url: None,
                message,
                tag,
            });
        }

        let version_id = version_id.ok_or(ActionError::VersionIdNotFound)?;

        let deploy_extra = inputs.deploy_args.as_deref().map(args::tokenize).unwrap_or_default();
        let deploy = wrangler.deploy(&version_id, &deploy_extra, &message);
        info!("deploying version {version_id}: {}", deploy.display_line());

        let captured = self.runner.run_streamed(&deploy)?;
        if !captured.success() {
            return Err(ActionError::CommandFailed {
                command: deploy.display_line(),
                code: captured.code,
            });
        }

        let deployment_url = extract::deployment_url(&captured.stdout);
        match &deployment_url {
            Some(url) => info!("deployed version {version_id} at {url}"),
            None => info!("deploy succeeded but no deployment URL was found in the output"),
        }

        Ok(DeployOutcome {
            version_id: Some(version_id),
            deployment_url,
            message,
            tag,
        })
    }
}
