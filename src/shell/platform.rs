//! Platform detection.

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`,
/// `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS", "JENKINS_URL"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}
