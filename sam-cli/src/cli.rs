use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sam", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn on debug logging
    #[arg(long, global = true)]
    pub(crate) debug: bool,
    #[command(subcommand)]
    pub(crate) command: SamSubcommand,
}

#[derive(Subcommand)]
pub(crate) enum SamSubcommand {
    /// Publishes a SAM application to the AWS Serverless Application Repository
    Publish(PublishCommand),
}

// `sam publish app [ARGS]` and the shorter `sam publish [ARGS]` are equivalent.
#[derive(Args)]
#[command(args_conflicts_with_subcommands = true)]
pub(crate) struct PublishCommand {
    #[command(subcommand)]
    command: Option<PublishSubcommand>,
    #[command(flatten)]
    args: PublishArgs,
}

impl PublishCommand {
    pub(crate) fn into_args(self) -> PublishArgs {
        match self.command {
            Some(PublishSubcommand::App(args)) => args,
            None => self.args,
        }
    }
}

#[derive(Subcommand)]
enum PublishSubcommand {
    /// Publishes a SAM application to the AWS Serverless Application Repository
    App(PublishArgs),
}

#[derive(Parser)]
pub(crate) struct PublishArgs {
    /// AWS SAM template file, defaults to 'template.yaml' or 'template.yml'
    #[arg(short, long, visible_alias = "template-file")]
    pub(crate) template: Option<PathBuf>,
    /// Optional semantic version of the application, overrides the 'SemanticVersion' of the
    /// template and is written back to the template file
    #[arg(long)]
    pub(crate) semantic_version: Option<String>,
    #[command(flatten)]
    pub(crate) aws: AwsArgs,
    #[command(flatten)]
    pub(crate) config: ConfigArgs,
}

#[derive(Args)]
pub(crate) struct AwsArgs {
    /// Set the AWS Region of the service (e.g. us-east-1)
    #[arg(long)]
    pub(crate) region: Option<String>,
    /// Select a specific profile from your credential file to get AWS credentials
    #[arg(long)]
    pub(crate) profile: Option<String>,
}

#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// The path and file name of the configuration file containing default parameter values,
    /// defaults to 'samconfig.toml' in the current directory
    #[arg(long)]
    pub(crate) config_file: Option<PathBuf>,
    /// The environment name specifying the default parameter values in the configuration file
    #[arg(long, default_value = "default")]
    pub(crate) config_env: String,
}
