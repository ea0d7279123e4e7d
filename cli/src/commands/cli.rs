use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stoplist", version, about = "Forbidden-tag moderation gate")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Read configuration from this file instead of the default locations.
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or change the forbidden-tag list and action.
    Settings(SettingsArgs),
    /// Evaluate one save event against a seeded content set.
    Check(CheckArgs),
    /// Serve the admin page and the save-event API.
    HttpServer(HttpServerArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    Show,
    Set(SetArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SetArgs {
    /// One of: nothing, draft, private, trash.
    #[arg(long)]
    pub action: Option<String>,

    /// Forbidden tag. Can be specified multiple times; replaces the stored list.
    #[arg(long = "tag", action = clap::ArgAction::Append)]
    pub tags: Vec<String>,

    /// File with one forbidden tag per line; combined with `--tag`.
    #[arg(long)]
    pub tags_file: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CheckArgs {
    /// JSON array of content items.
    #[arg(long)]
    pub content: String,

    /// JSON save event: `{"content_id": .., "payload": {..}}`.
    #[arg(long)]
    pub event: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct HttpServerArgs {
    /// Overrides `http_server.host`.
    #[arg(long)]
    pub host: Option<String>,

    /// Overrides `http_server.port`.
    #[arg(long)]
    pub port: Option<u16>,
}
