pub(crate) mod gitlab_to_config;
