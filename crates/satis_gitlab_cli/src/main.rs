//! satis-gitlab CLI - generate a SATIS configuration from GitLab projects.

mod commands;
mod config;
mod progress;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "satis-gitlab")]
#[command(version)]
#[command(about = "Generate SATIS configuration from GitLab projects")]
#[command(
    long_about = "satis-gitlab lists the projects of a GitLab instance, keeps those that \
declare a package in the composer.json of their default branch, and writes a SATIS \
satis.json with one VCS repository per package."
)]
#[command(after_long_help = r#"EXAMPLES
    Generate satis.json for every project visible to a token:
        $ satis-gitlab gitlab-to-config https://gitlab.example.com glpat-xxxx

    Only projects of two namespaces, skipping sandboxes:
        $ satis-gitlab gitlab-to-config https://gitlab.example.com glpat-xxxx \
            --gitlab-namespace 2,Diaspora --ignore '^sandbox/'

    Only Composer libraries, without writing the token:
        $ satis-gitlab gitlab-to-config https://gitlab.example.com glpat-xxxx \
            --project-type library --no-token -O public/satis.json

CONFIGURATION
    satis-gitlab reads configuration from:
      1. ~/.config/satis-gitlab/config.toml (or $XDG_CONFIG_HOME/satis-gitlab/config.toml)
      2. ./satis-gitlab.toml
      3. Environment variables (SATIS_GITLAB__<SECTION>__<KEY>)
      4. .env file in current directory
    Command-line arguments override all of them.

ENVIRONMENT VARIABLES
    SATIS_GITLAB__GITLAB__URL          GitLab URL (default: https://gitlab.com)
    SATIS_GITLAB__GITLAB__TOKEN        GitLab personal access token
    SATIS_GITLAB__GITLAB__UNSAFE_SSL   Disable TLS certificate verification
    SATIS_GITLAB__OUTPUT__PATH         Output file (default: satis.json)
    RUST_LOG                           Log filter when not attached to a terminal
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a SATIS configuration from GitLab projects
    GitlabToConfig(GitlabToConfigArgs),
}

/// Options for `gitlab-to-config`. Unset values fall back to the configuration.
#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct GitlabToConfigArgs {
    /// GitLab URL (e.g. https://gitlab.example.com)
    gitlab_url: Option<String>,

    /// GitLab personal access token
    gitlab_token: Option<String>,

    /// Search query passed to the GitLab project listing
    #[arg(short = 'p', long, value_name = "SEARCH")]
    project_filter: Option<String>,

    /// Ignore projects whose path matches this regular expression
    #[arg(short = 'i', long, value_name = "REGEX")]
    ignore: Option<String>,

    /// Only keep projects with this file on their default branch
    #[arg(long, value_name = "FILE")]
    include_if_has_file: Option<String>,

    /// Only keep projects whose composer.json type is TYPE (e.g. library)
    #[arg(long, value_name = "TYPE")]
    project_type: Option<String>,

    /// Only keep projects of these namespaces, by id or name (e.g. "2,Diaspora")
    #[arg(long, value_name = "LIST")]
    gitlab_namespace: Option<String>,

    /// Base satis.json to extend (default: embedded template)
    #[arg(long, value_name = "PATH")]
    template: Option<PathBuf>,

    /// Homepage of the SATIS repository
    #[arg(long, value_name = "URL")]
    homepage: Option<String>,

    /// Enable archive mirroring into dist/
    #[arg(long)]
    archive: bool,

    /// Do not write the access token into the generated file
    #[arg(long)]
    no_token: bool,

    /// Disable TLS certificate verification (GitLab and generated config)
    #[arg(long)]
    unsafe_ssl: bool,

    /// Stop after this many listing pages
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Output file (default: satis.json)
    #[arg(short = 'O', long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Structured logging only when not attached to a terminal
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("satis_gitlab=info,satis_gitlab_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::GitlabToConfig(args) => {
            let config = config::Config::load();
            commands::gitlab_to_config::handle_gitlab_to_config(args, &config).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_gitlab_to_config_flags() {
        let cli = Cli::try_parse_from([
            "satis-gitlab",
            "gitlab-to-config",
            "https://gitlab.example.com",
            "glpat-secret",
            "-p",
            "php",
            "-i",
            "^sandbox/",
            "--gitlab-namespace",
            "2,Diaspora",
            "--archive",
            "--unsafe-ssl",
            "--max-pages",
            "3",
            "-O",
            "out.json",
        ])
        .expect("arguments should parse");

        let Commands::GitlabToConfig(args) = cli.command;
        assert_eq!(args.gitlab_url.as_deref(), Some("https://gitlab.example.com"));
        assert_eq!(args.gitlab_token.as_deref(), Some("glpat-secret"));
        assert_eq!(args.project_filter.as_deref(), Some("php"));
        assert_eq!(args.ignore.as_deref(), Some("^sandbox/"));
        assert_eq!(args.gitlab_namespace.as_deref(), Some("2,Diaspora"));
        assert!(args.archive);
        assert!(args.unsafe_ssl);
        assert!(!args.no_token);
        assert_eq!(args.max_pages, Some(3));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn rejects_zero_max_pages() {
        let result = Cli::try_parse_from([
            "satis-gitlab",
            "gitlab-to-config",
            "https://gitlab.example.com",
            "--max-pages",
            "0",
        ]);
        assert!(result.is_err());
    }
}
