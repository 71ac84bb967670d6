use anyhow::Result;
use clap::Parser;
use prfiles::commands::{Command, CommandContext, PrCommand, validators};
use prfiles::config::{EnvSettings, SettingKey, Settings, SettingsBuilder};
use prfiles::prompts::{DialoguerPrompter, Prompter};
use prfiles::{constants, logging};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prfiles")]
#[command(about = "Add files to a repo on a unique branch and create a Pull Request")]
#[command(version)]
struct Cli {
    /// One or more files to add to the pull request (UTF-8)
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Name of the target repo (github.com/[owner name]/[repo name])
    #[arg(long)]
    repo_name: Option<String>,

    /// Owner of the target repo (github.com/[owner name]/[repo name])
    #[arg(long)]
    owner_name: Option<String>,

    /// Your GitHub user name, also the commit author
    #[arg(long, visible_alias = "name")]
    user_name: Option<String>,

    /// Your GitHub email, used as the commit author email
    #[arg(long, visible_alias = "email")]
    user_email: Option<String>,

    /// Personal access token (needs 'public_repo' or 'repo' scope)
    #[arg(long, visible_alias = "token")]
    auth_token: Option<String>,

    /// Branch the pull request merges into
    #[arg(long)]
    base_branch: Option<String>,

    /// Name of the branch to create (generated when omitted)
    #[arg(long)]
    branch: Option<String>,

    /// Title for the pull request
    #[arg(long)]
    title: Option<String>,

    /// Body text for the pull request
    #[arg(long)]
    body: Option<String>,

    /// Commit message
    #[arg(long)]
    message: Option<String>,

    /// Label to apply to the pull request (can be specified multiple times)
    #[arg(short, long)]
    label: Vec<String>,

    /// Directory in the repo to place the files under
    #[arg(long)]
    path_prefix: Option<String>,

    /// Create PR as draft
    #[arg(long)]
    draft: bool,

    /// Continue from the branch if it already exists
    #[arg(long)]
    reuse_branch: bool,

    /// Configuration file path
    #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
    config: String,

    /// Fail instead of prompting for missing values
    #[arg(long)]
    no_prompt: bool,

    /// Don't save the resolved configuration
    #[arg(long)]
    no_save: bool,

    /// Empty the config file before resolving, forgetting saved values
    #[arg(long)]
    reset_config: bool,

    /// GitHub API root (GitHub Enterprise)
    #[arg(long, default_value = prfiles_github::consts::API_BASE)]
    api_url: String,

    /// Log every API call
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn flag_settings(&self) -> Settings {
        let mut settings = Settings::default();
        for (key, value) in [
            (SettingKey::OwnerName, &self.owner_name),
            (SettingKey::RepoName, &self.repo_name),
            (SettingKey::UserName, &self.user_name),
            (SettingKey::UserEmail, &self.user_email),
            (SettingKey::UserToken, &self.auth_token),
            (SettingKey::BaseBranch, &self.base_branch),
        ] {
            if let Some(value) = value {
                settings.set(key, value.as_str());
            }
        }
        settings
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.debug);

    validators::validate_files(&cli.files)?;
    validators::validate_labels(&cli.label)?;
    validators::validate_branch_name(&cli.branch)?;
    validators::validate_text("title", &cli.title)?;
    validators::validate_text("body", &cli.body)?;
    validators::validate_text("commit message", &cli.message)?;

    if cli.reset_config {
        Settings::create_empty(&cli.config)?;
        tracing::debug!("Emptied configuration at {}", cli.config);
    }

    let builder = SettingsBuilder::new()
        .with_cli(cli.flag_settings())
        .with_env(EnvSettings::from_env())
        .with_file(Settings::load(&cli.config)?);

    let prompter = DialoguerPrompter::new();
    let prompter: Option<&dyn Prompter> = if cli.no_prompt || !DialoguerPrompter::is_available() {
        None
    } else {
        Some(&prompter)
    };
    let resolved = builder.resolve(prompter)?;

    if !cli.no_save {
        builder.settings_to_save(&resolved).save(&cli.config)?;
        tracing::debug!("Saved configuration to {}", cli.config);
    }

    let context = CommandContext::new(resolved).with_api_url(cli.api_url);

    PrCommand {
        files: cli.files,
        path_prefix: cli.path_prefix,
        title: cli.title,
        body: cli.body,
        commit_msg: cli.message,
        branch_name: cli.branch,
        labels: cli.label,
        draft: cli.draft,
        reuse_branch: cli.reuse_branch,
    }
    .execute(&context)
    .await
}
