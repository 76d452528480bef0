//! Editor environment detection

/// Variables set by editors that run the linter on the fly
const EDITOR_VARS: &[&str] = &["VSCODE_PID", "VSCODE_CWD", "JETBRAINS_IDE", "VIM", "NVIM"];

/// Whether a variable is set to a non-empty value
fn is_set<F>(lookup: &F, key: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).is_some_and(|value| !value.is_empty())
}

/// Whether we run inside a git hook or lint-staged
pub fn is_in_git_hooks_or_lint_staged<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    is_set(&lookup, "GIT_PARAMS")
        || is_set(&lookup, "VSCODE_GIT_COMMAND")
        || lookup("npm_lifecycle_script").is_some_and(|s| s.starts_with("lint-staged"))
}

/// Whether the linter is driven by an editor integration
///
/// CI runs and git hooks are never treated as editor runs, even if an editor
/// variable leaked into the environment.
pub fn is_in_editor_env<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if is_set(&lookup, "CI") {
        return false;
    }
    if is_in_git_hooks_or_lint_staged(&lookup) {
        return false;
    }
    EDITOR_VARS.iter().any(|var| is_set(&lookup, var))
}

/// [`is_in_editor_env`] against the process environment
pub fn detect_editor() -> bool {
    is_in_editor_env(|key| std::env::var(key).ok())
}
