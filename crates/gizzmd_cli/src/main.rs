//! Command-line entry point.
//!
//! # Responsibility
//! - Load configuration (`.env` + environment) and start logging.
//! - Open the configured database and seed the development user.
//! - Print a document listing as JSON, or core version info for `ping`.

use clap::{Args, Parser, Subcommand};
use gizzmd_api::{list_docs, ApiConfig, ListDocsParams};
use gizzmd_core::db::open_db;
use gizzmd_core::{init_logging, Id, SqliteUserRepository, UserService};
use log::{error, info};
use std::process::ExitCode;

const DEV_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
const DEV_USER_EMAIL: &str = "user@example.com";
const DEV_USER_NAME: &str = "John Doe";

#[derive(Parser, Debug)]
#[command(name = "gizzmd", version, about = "Markdown document store")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List documents as JSON
    List(ListArgs),
    /// Print core linkage and version
    Ping,
}

/// Raw listing options. Values are passed through unvalidated; invalid
/// ones fall back to their defaults the same way the listing API does.
#[derive(Args, Debug, Default, PartialEq, Eq)]
struct ListArgs {
    #[arg(long)]
    page: Option<String>,
    #[arg(long)]
    limit: Option<String>,
    #[arg(long)]
    sort_by: Option<String>,
    #[arg(long)]
    sort_order: Option<String>,
    /// Comma-separated tags; every tag must match
    #[arg(long)]
    tags: Option<String>,
    #[arg(long)]
    created_from: Option<String>,
    #[arg(long)]
    created_to: Option<String>,
    #[arg(long)]
    updated_from: Option<String>,
    #[arg(long)]
    updated_to: Option<String>,
}

impl From<ListArgs> for ListDocsParams {
    fn from(args: ListArgs) -> Self {
        Self {
            page: args.page,
            limit: args.limit,
            sort_by: args.sort_by,
            sort_order: args.sort_order,
            tags: args.tags,
            created_from: args.created_from,
            created_to: args.created_to,
            updated_from: args.updated_from,
            updated_to: args.updated_to,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command.unwrap_or_else(|| Command::List(ListArgs::default())) {
        Command::Ping => {
            println!("gizzmd_core ping={}", gizzmd_core::ping());
            println!("gizzmd_core version={}", gizzmd_core::core_version());
            ExitCode::SUCCESS
        }
        Command::List(args) => match run_list(args.into()) {
            Ok(output) => {
                println!("{output}");
                ExitCode::SUCCESS
            }
            Err(message) => {
                eprintln!("gizzmd: {message}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run_list(params: ListDocsParams) -> Result<String, String> {
    let config = ApiConfig::from_env().map_err(|err| err.to_string())?;
    init_logging(&config.log_level, &config.log_dir)?;

    let conn = open_db(&config.db_path).map_err(|err| {
        error!("event=cli_open module=cli status=error error={err}");
        err.to_string()
    })?;

    if config.env.is_development() {
        let dev_id = Id::parse(DEV_USER_ID).map_err(|err| err.to_string())?;
        let users = SqliteUserRepository::try_new(&conn).map_err(|err| err.to_string())?;
        UserService::new(users)
            .ensure_user(dev_id, DEV_USER_EMAIL, DEV_USER_NAME)
            .map_err(|err| err.to_string())?;
    }

    let response = list_docs(&conn, &params).map_err(|err| err.message)?;
    info!(
        "event=cli_list module=cli status=ok env={} count={}",
        config.env.as_str(),
        response.documents.len()
    );
    serde_json::to_string_pretty(&response).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, ListArgs};
    use clap::{CommandFactory, Parser};
    use gizzmd_api::ListDocsParams;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_flags_map_onto_listing_params() {
        let cli = Cli::try_parse_from([
            "gizzmd",
            "list",
            "--page",
            "2",
            "--tags",
            "a,b",
            "--sort-by",
            "title",
        ])
        .unwrap();
        let Some(Command::List(args)) = cli.command else {
            panic!("expected list command");
        };

        let params = ListDocsParams::from(args);
        assert_eq!(params.page.as_deref(), Some("2"));
        assert_eq!(params.tags.as_deref(), Some("a,b"));
        assert_eq!(params.sort_by.as_deref(), Some("title"));
        assert!(params.limit.is_none());
    }

    #[test]
    fn invalid_values_are_left_for_lenient_fallback() {
        let cli = Cli::try_parse_from(["gizzmd", "list", "--limit", "abc"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::List(ListArgs {
                limit: Some("abc".to_string()),
                ..ListArgs::default()
            }))
        );
    }

    #[test]
    fn bare_invocation_and_ping_parse() {
        assert_eq!(Cli::try_parse_from(["gizzmd"]).unwrap().command, None);
        assert_eq!(
            Cli::try_parse_from(["gizzmd", "ping"]).unwrap().command,
            Some(Command::Ping)
        );
    }

    #[test]
    fn unknown_flags_and_commands_are_rejected() {
        assert!(Cli::try_parse_from(["gizzmd", "list", "--colour", "red"]).is_err());
        assert!(Cli::try_parse_from(["gizzmd", "export"]).is_err());
        assert!(Cli::try_parse_from(["gizzmd", "list", "page=2"]).is_err());
    }
}
