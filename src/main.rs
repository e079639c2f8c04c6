use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use tag_gate::cli::{run_gate_workflow, GateCommand, Outcome};
use tag_gate::config::{self, Overrides};
use tag_gate::domain::classify;
use tag_gate::source::GitLabClient;
use tag_gate::{logging, ui, GateError};

/// Exit code for failures that did not originate in the gate itself
const EXIT_INTERNAL: i32 = 70;

#[derive(Parser)]
#[command(
    name = "tag-gate",
    about = "Decide whether a release tag may be promoted to its target environment",
    version
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, env = "GITLAB_URL", global = true, help = "GitLab instance URL")]
    gitlab_url: Option<String>,

    #[arg(
        long,
        env = "GITLAB_TOKEN",
        hide_env_values = true,
        global = true,
        help = "Private token for the GitLab API"
    )]
    private_token: Option<String>,

    #[arg(long, env = "GITLAB_PROJECT_ID", global = true, help = "GitLab project id or path")]
    project_id: Option<String>,

    #[arg(
        long,
        env = "GITLAB_VERIFY_TLS",
        global = true,
        help = "Verify the server TLS certificate (true/false)"
    )]
    verify_tls: Option<bool>,

    #[arg(long, global = true, help = "Skip TLS certificate verification")]
    insecure: bool,

    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply the promotion policy to a tag
    Decide {
        #[arg(short, long, env = "TAG_NAME", help = "Tag about to be deployed")]
        tag: String,

        #[arg(
            long,
            env = "HOMOLOGATION_BRANCH",
            help = "Branch (or `prefix/*` family) the release candidate must have passed"
        )]
        homologation_branch: Option<String>,
    },
    /// Check that a tag's commit passed a pipeline on a branch
    Verify {
        #[arg(short, long, env = "TAG_NAME", help = "Tag to verify")]
        tag: String,

        #[arg(short, long, help = "Branch, or `prefix/*` for a branch family")]
        branch: String,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    logging::init_tracing(args.log_json, logging::level_for(args.verbose));

    let code = match run(args) {
        Ok(outcome) => {
            ui::display_outcome(&outcome);
            outcome.exit_code()
        }
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            e.downcast_ref::<GateError>()
                .map_or(EXIT_INTERNAL, GateError::exit_code)
        }
    };

    std::process::exit(code);
}

fn run(args: Args) -> Result<Outcome> {
    let (command, homologation_branch) = match args.command {
        Command::Decide {
            tag,
            homologation_branch,
        } => (GateCommand::Decide { tag }, homologation_branch),
        Command::Verify { tag, branch } => (GateCommand::Verify { tag, branch }, None),
    };

    classify(command.tag())?;

    let config = config::load_config(args.config.as_deref())
        .context("Error loading config")?
        .apply(Overrides {
            gitlab_url: args.gitlab_url,
            project_id: args.project_id,
            homologation_branch,
            verify_tls: if args.insecure {
                Some(false)
            } else {
                args.verify_tls
            },
        });

    let settings = config.gitlab_settings(args.private_token.as_deref())?;
    if !settings.verify_tls {
        ui::display_status("TLS certificate verification is disabled");
    }
    let client = GitLabClient::new(settings)?;

    Ok(run_gate_workflow(&command, &config, &client)?)
}
