//! Script selection by response status

use courier_domain::ScriptItem;

/// Returns true if a post-script with `pattern` should run for `status`.
///
/// An empty or missing pattern always runs. Otherwise the pattern is a
/// comma-separated list of clauses, each an exact status (`404`) or a class
/// ending in `xx` (`4xx` matches any status starting with `4`).
///
/// # Examples
///
/// ```
/// use courier_application::materialize::should_run;
///
/// assert!(should_run(Some("2xx, 404"), 201));
/// assert!(!should_run(Some("2xx"), 404));
/// assert!(should_run(None, 500));
/// ```
#[must_use]
pub fn should_run(pattern: Option<&str>, status: u16) -> bool {
    let Some(pattern) = pattern.map(str::trim).filter(|p| !p.is_empty()) else {
        return true;
    };
    let status = status.to_string();

    pattern.split(',').map(str::trim).any(|clause| {
        if clause == status {
            return true;
        }
        let lower = clause.to_ascii_lowercase();
        lower
            .strip_suffix("xx")
            .is_some_and(|prefix| status.starts_with(prefix))
    })
}

/// Returns the enabled pre-scripts, in order.
pub fn select_pre_scripts(scripts: &[ScriptItem]) -> impl Iterator<Item = &ScriptItem> {
    scripts.iter().filter(|s| s.enabled)
}

/// Returns the enabled post-scripts whose status pattern matches, in order.
pub fn select_post_scripts(scripts: &[ScriptItem], status: u16) -> impl Iterator<Item = &ScriptItem> {
    scripts
        .iter()
        .filter(move |s| s.enabled && should_run(s.execute_on_status_codes.as_deref(), status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_should_run_patterns() {
        assert!(should_run(Some("2xx, 404"), 201));
        assert!(should_run(Some("2xx, 404"), 404));
        assert!(!should_run(Some("2xx"), 404));
        assert!(should_run(None, 500));
        assert!(should_run(Some("   "), 500));
        assert!(should_run(Some("5XX"), 503));
        assert!(!should_run(Some("200"), 201));
    }

    #[test]
    fn test_status_zero_only_matches_catch_all() {
        assert!(!should_run(Some("2xx,4xx,5xx"), 0));
        assert!(should_run(Some("xx"), 0));
    }

    #[test]
    fn test_select_post_scripts() {
        let mut disabled = ScriptItem::new("off", "x");
        disabled.enabled = false;
        let scripts = vec![
            ScriptItem::new("always", "a"),
            ScriptItem::new("ok", "b").on_status("2xx"),
            ScriptItem::new("missing", "c").on_status("404"),
            disabled,
        ];

        let names: Vec<&str> = select_post_scripts(&scripts, 200)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["always", "ok"]);

        let names: Vec<&str> = select_pre_scripts(&scripts).map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["always", "ok", "missing"]);
    }
}
