use std::path::PathBuf;
use std::sync::Arc;

use satis_gitlab::filter::{
    FilterChain, FilterError, GitlabNamespaceFilter, IgnoreRegexpFilter, IncludeIfHasFileFilter,
    ProjectTypeFilter,
};
use satis_gitlab::gitlab::GitLabClient;
use satis_gitlab::{
    ClientOptions, RepositoryClient, SatisConfigBuilder, SatisConfigError, ScanOptions,
    scan_projects,
};

use crate::GitlabToConfigArgs;
use crate::config::Config;
use crate::progress::ProgressReporter;

/// Command-line arguments merged over the layered configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    gitlab_url: String,
    gitlab_token: Option<String>,
    unsafe_ssl: bool,
    project_filter: Option<String>,
    max_pages: u32,
    ignore: Option<String>,
    include_if_has_file: Option<String>,
    project_type: Option<String>,
    gitlab_namespace: Option<String>,
    template: Option<PathBuf>,
    homepage: Option<String>,
    archive: bool,
    no_token: bool,
    output: PathBuf,
}

impl Settings {
    /// Arguments win over configuration; blank strings count as unset.
    /// The page cap is at least 1 wherever it comes from.
    fn resolve(args: GitlabToConfigArgs, config: &Config) -> Self {
        Self {
            gitlab_url: non_blank(args.gitlab_url).unwrap_or_else(|| config.gitlab.url.clone()),
            gitlab_token: non_blank(args.gitlab_token)
                .or_else(|| non_blank(config.gitlab.token.clone())),
            unsafe_ssl: args.unsafe_ssl || config.gitlab.unsafe_ssl,
            project_filter: non_blank(args.project_filter)
                .or_else(|| non_blank(config.scan.project_filter.clone())),
            max_pages: args.max_pages.unwrap_or(config.scan.max_pages).max(1),
            ignore: non_blank(args.ignore),
            include_if_has_file: non_blank(args.include_if_has_file),
            project_type: non_blank(args.project_type),
            gitlab_namespace: non_blank(args.gitlab_namespace),
            template: args.template.or_else(|| config.output.template.clone()),
            homepage: non_blank(args.homepage).or_else(|| non_blank(config.output.homepage.clone())),
            archive: args.archive || config.output.archive,
            no_token: args.no_token || config.output.no_token,
            output: args.output.unwrap_or_else(|| config.output.path.clone()),
        }
    }

    fn client_options(&self) -> ClientOptions {
        ClientOptions::new(self.gitlab_url.clone())
            .with_token(self.gitlab_token.clone())
            .with_unsafe_ssl(self.unsafe_ssl)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Filters run in a fixed order: ignore, include-if-has-file, project type,
/// namespace.
fn build_filters(
    settings: &Settings,
    client: Arc<dyn RepositoryClient>,
) -> Result<FilterChain, FilterError> {
    let mut filters = FilterChain::new();
    if let Some(pattern) = &settings.ignore {
        filters.add_filter(IgnoreRegexpFilter::new(pattern)?);
    }
    if let Some(file) = &settings.include_if_has_file {
        filters.add_filter(IncludeIfHasFileFilter::new(Arc::clone(&client), file.clone()));
    }
    if let Some(project_type) = &settings.project_type {
        filters.add_filter(ProjectTypeFilter::new(project_type.clone(), Arc::clone(&client)));
    }
    if let Some(namespaces) = &settings.gitlab_namespace {
        filters.add_filter(GitlabNamespaceFilter::new(namespaces)?);
    }
    Ok(filters)
}

/// `domain` is the host name written into `gitlab-domains` and
/// `gitlab-token`.
fn build_config(
    settings: &Settings,
    domain: Option<&str>,
    reporter: &ProgressReporter,
) -> Result<SatisConfigBuilder, SatisConfigError> {
    let mut builder = match &settings.template {
        Some(path) => {
            reporter.println(&format!("Loading template {}...", path.display()));
            SatisConfigBuilder::from_template_path(path)?
        }
        None => SatisConfigBuilder::new()?,
    };

    if let Some(homepage) = &settings.homepage {
        builder.set_homepage(homepage);
    }
    if settings.archive {
        builder.enable_archive();
    }

    match domain {
        Some(domain) => {
            builder.add_gitlab_domain(domain);
            if let Some(token) = &settings.gitlab_token
                && !settings.no_token
            {
                builder.add_gitlab_token(domain, token, settings.unsafe_ssl);
            }
        }
        None => reporter.warn(&format!(
            "Could not determine the GitLab domain of {}, gitlab-domains not written",
            settings.gitlab_url
        )),
    }

    Ok(builder)
}

pub(crate) async fn handle_gitlab_to_config(
    args: GitlabToConfigArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::resolve(args, config);
    let client_options = settings.client_options();
    let client = Arc::new(GitLabClient::new(&client_options)?);

    let filters = build_filters(&settings, client.clone())?;
    for description in filters.descriptions() {
        tracing::debug!(filter = %description, "Filter enabled");
    }

    let reporter = Arc::new(ProgressReporter::new());
    let domain = client_options.host();
    let mut builder = build_config(&settings, domain.as_deref(), &reporter)?;

    let options = ScanOptions::for_client(&client_options)
        .with_search(settings.project_filter.clone())
        .with_max_pages(settings.max_pages);

    let callback = reporter.as_callback();
    let result = scan_projects(
        client.as_ref(),
        &filters,
        &mut builder,
        &options,
        Some(&callback),
    )
    .await;
    reporter.finish();
    let result = result?;

    // An empty result still produces a (repository-less) file.
    reporter.println(&format!(
        "Generate satis configuration file : {}",
        settings.output.display()
    ));
    builder.write_to(&settings.output)?;
    tracing::debug!(
        accepted = result.accepted,
        pages = result.pages,
        page_limit_reached = result.page_limit_reached,
        "Scan finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::progress::LoggingReporter;

    fn reporter() -> ProgressReporter {
        ProgressReporter::Logging(LoggingReporter::new())
    }

    fn args(url: &str) -> GitlabToConfigArgs {
        GitlabToConfigArgs {
            gitlab_url: Some(url.to_string()),
            ..Default::default()
        }
    }

    fn client() -> Arc<dyn RepositoryClient> {
        let options = ClientOptions::new("https://gitlab.test");
        Arc::new(GitLabClient::new(&options).expect("client should build"))
    }

    #[test]
    fn test_resolve_uses_config_defaults() {
        let settings = Settings::resolve(GitlabToConfigArgs::default(), &Config::default());
        assert_eq!(settings.gitlab_url, "https://gitlab.com");
        assert_eq!(settings.max_pages, satis_gitlab::MAX_PAGES);
        assert_eq!(settings.output, PathBuf::from("satis.json"));
        assert!(settings.gitlab_token.is_none());
        assert!(!settings.unsafe_ssl);
    }

    #[test]
    fn test_resolve_arguments_override_config() {
        let mut config = Config::default();
        config.gitlab.token = Some("from-config".to_string());
        config.scan.max_pages = 50;
        config.output.archive = true;

        let mut cli = args("https://gitlab.example.com");
        cli.gitlab_token = Some("from-cli".to_string());
        cli.max_pages = Some(2);
        cli.output = Some(PathBuf::from("out.json"));

        let settings = Settings::resolve(cli, &config);
        assert_eq!(settings.gitlab_url, "https://gitlab.example.com");
        assert_eq!(settings.gitlab_token.as_deref(), Some("from-cli"));
        assert_eq!(settings.max_pages, 2);
        assert!(settings.archive);
        assert_eq!(settings.output, PathBuf::from("out.json"));
    }

    #[test]
    fn test_resolve_ignores_blank_values() {
        let mut cli = args("https://gitlab.example.com");
        cli.gitlab_token = Some(" ".to_string());
        cli.ignore = Some(String::new());
        cli.project_filter = Some(String::new());

        let settings = Settings::resolve(cli, &Config::default());
        assert!(settings.gitlab_token.is_none());
        assert!(settings.ignore.is_none());
        assert!(settings.project_filter.is_none());
        assert!(!settings.client_options().has_token());
    }

    #[test]
    fn test_build_filters_in_order() {
        let mut cli = args("https://gitlab.test");
        cli.ignore = Some("^sandbox/".to_string());
        cli.include_if_has_file = Some(".satisinclude".to_string());
        cli.project_type = Some("library".to_string());
        cli.gitlab_namespace = Some("2,Diaspora".to_string());
        let settings = Settings::resolve(cli, &Config::default());

        let filters = build_filters(&settings, client()).expect("valid filters");
        assert_eq!(filters.len(), 4);
        assert!(filters.descriptions()[0].contains("^sandbox/"));
        assert!(filters.descriptions()[3].contains("Diaspora"));
    }

    #[test]
    fn test_build_filters_rejects_invalid_regex() {
        let mut cli = args("https://gitlab.test");
        cli.ignore = Some("(unclosed".to_string());
        let settings = Settings::resolve(cli, &Config::default());

        let result = build_filters(&settings, client());
        assert!(matches!(result, Err(FilterError::InvalidPattern { .. })));
    }

    #[test]
    fn test_build_filters_rejects_empty_namespace_list() {
        let mut cli = args("https://gitlab.test");
        cli.gitlab_namespace = Some(" , ".to_string());
        let settings = Settings::resolve(cli, &Config::default());

        let result = build_filters(&settings, client());
        assert!(matches!(result, Err(FilterError::EmptyNamespaceList(_))));
    }

    #[test]
    fn test_resolve_raises_zero_page_cap_from_config() {
        let mut config = Config::default();
        config.scan.max_pages = 0;

        let settings = Settings::resolve(args("https://gitlab.test"), &config);
        assert_eq!(settings.max_pages, 1);
    }

    #[test]
    fn test_domain_comes_from_client_options() {
        let settings = Settings::resolve(args("gitlab.example.com:8443/"), &Config::default());
        let domain = settings.client_options().host();
        assert_eq!(domain.as_deref(), Some("gitlab.example.com"));

        let value = build_config(&settings, domain.as_deref(), &reporter())
            .expect("config should build")
            .into_value();
        assert_eq!(value["config"]["gitlab-domains"], json!(["gitlab.example.com"]));
    }

    #[test]
    fn test_build_config_without_domain() {
        let settings = Settings::resolve(args("not a url"), &Config::default());
        assert_eq!(settings.client_options().host(), None);

        let value = build_config(&settings, None, &reporter())
            .expect("config should build")
            .into_value();
        assert!(value["config"].get("gitlab-domains").is_none());
    }

    #[test]
    fn test_build_config_writes_token_unless_disabled() {
        let mut cli = args("https://gitlab.test");
        cli.gitlab_token = Some("glpat-secret".to_string());
        cli.archive = true;
        cli.homepage = Some("https://packages.test".to_string());
        let settings = Settings::resolve(cli.clone(), &Config::default());

        let value = build_config(&settings, Some("gitlab.test"), &reporter())
            .expect("config should build")
            .into_value();
        assert_eq!(value["homepage"], "https://packages.test");
        assert_eq!(value["archive"]["format"], "tar");
        assert_eq!(value["config"]["gitlab-domains"], json!(["gitlab.test"]));
        assert_eq!(value["config"]["gitlab-token"]["gitlab.test"], "glpat-secret");

        cli.no_token = true;
        let settings = Settings::resolve(cli, &Config::default());
        let value = build_config(&settings, Some("gitlab.test"), &reporter())
            .expect("config should build")
            .into_value();
        assert_eq!(value["config"]["gitlab-domains"], json!(["gitlab.test"]));
        assert!(value["config"].get("gitlab-token").is_none());
    }

    #[test]
    fn test_build_config_missing_template() {
        let mut cli = args("https://gitlab.test");
        cli.template = Some(PathBuf::from("/nonexistent/template.json"));
        let settings = Settings::resolve(cli, &Config::default());

        let result = build_config(&settings, Some("gitlab.test"), &reporter());
        assert!(matches!(result, Err(SatisConfigError::Io { .. })));
    }
}
