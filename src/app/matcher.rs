use crate::app::mapper::relative_to_root;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Decides whether a path under the source root falls under an ignore rule.
///
/// Rules are root-relative paths. A rule matches the path it names and
/// everything nested below it, compared segment by segment, so `build`
/// covers `build/output` but not `build2`.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    root: PathBuf,
    rules: Vec<PathBuf>,
}

impl IgnoreMatcher {
    pub fn new(root: &Path, rules: &BTreeSet<String>) -> Self {
        Self {
            root: root.to_path_buf(),
            rules: rules.iter().map(PathBuf::from).collect(),
        }
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let Ok(relative) = relative_to_root(&self.root, path) else {
            return false;
        };
        if relative.as_os_str().is_empty() {
            return false;
        }
        // Path::starts_with compares whole components, never partial names.
        self.rules.iter().any(|rule| relative.starts_with(rule))
    }
}

/// Cleans a user-supplied rule into the root-relative form the matcher expects.
pub fn normalize_rule(raw: &str) -> Option<String> {
    let mut rule = raw.trim();
    while let Some(rest) = rule.strip_prefix("./") {
        rule = rest;
    }
    let rule = rule.trim_end_matches(std::path::MAIN_SEPARATOR).trim_end_matches('/');
    if rule.is_empty() || rule == "." {
        return None;
    }
    Some(rule.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(rules: &[&str]) -> IgnoreMatcher {
        let rules = rules.iter().map(|r| r.to_string()).collect();
        IgnoreMatcher::new(Path::new("/src"), &rules)
    }

    #[test]
    fn exact_rule_matches() {
        assert!(matcher(&["notes.md"]).is_ignored(Path::new("/src/notes.md")));
    }

    #[test]
    fn directory_rule_covers_nested_entries_only_on_segment_boundary() {
        let m = matcher(&["logs"]);
        assert!(m.is_ignored(Path::new("/src/logs")));
        assert!(m.is_ignored(Path::new("/src/logs/a.txt")));
        assert!(!m.is_ignored(Path::new("/src/logs2/a.txt")));
        assert!(!m.is_ignored(Path::new("/src/other/logs")));
    }

    #[test]
    fn multi_segment_rule() {
        let m = matcher(&["config/secret"]);
        assert!(m.is_ignored(Path::new("/src/config/secret/key")));
        assert!(!m.is_ignored(Path::new("/src/config/public")));
    }

    #[test]
    fn root_and_outside_paths_are_never_ignored() {
        let m = matcher(&["a"]);
        assert!(!m.is_ignored(Path::new("/src")));
        assert!(!m.is_ignored(Path::new("/elsewhere/a")));
    }

    #[test]
    fn rules_are_normalized() {
        assert_eq!(normalize_rule("  build/ "), Some("build".to_string()));
        assert_eq!(normalize_rule("./docs/api"), Some("docs/api".to_string()));
        assert_eq!(normalize_rule(" "), None);
        assert_eq!(normalize_rule("./"), None);
    }
}
