use regex::Regex;

use crate::error::OptionsError;

/// Keeps only secret names under a namespace/environment prefix.
///
/// The pattern is `^(<d>)?<namespace><d><environment><d>`, with each scope part
/// included only when configured. With neither configured, every name matches.
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    pattern: Option<Regex>,
}

impl ScopeFilter {
    pub fn new(delimiter: &str, namespace: Option<&str>, env: Option<&str>) -> Result<Self, OptionsError> {
        let delim = regex::escape(delimiter);
        let mut scope = String::new();
        for part in [namespace, env].into_iter().flatten().filter(|p| !p.is_empty()) {
            scope.push_str(&regex::escape(part));
            scope.push_str(&delim);
        }
        if scope.is_empty() {
            return Ok(Self::unfiltered());
        }
        let pattern = Regex::new(&format!("^(?:{delim})?{scope}"))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn unfiltered() -> Self {
        Self { pattern: None }
    }

    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(name),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_scope_matches_everything() {
        let f = ScopeFilter::new("/", None, Some("")).unwrap();
        assert!(!f.is_active());
        assert!(f.matches("anything/at/all"));
    }

    #[test]
    fn namespace_and_env_are_anchored() {
        let f = ScopeFilter::new("/", Some("ns"), Some("dev")).unwrap();
        assert!(f.matches("ns/dev/a"));
        assert!(f.matches("/ns/dev/a"));
        assert!(!f.matches("ns/prod/a"));
        assert!(!f.matches("other/ns/dev/a"));
        assert!(!f.matches("dev/a"));
    }

    #[test]
    fn env_only_scope() {
        let f = ScopeFilter::new("/", None, Some("production")).unwrap();
        assert!(f.matches("production/db"));
        assert!(!f.matches("staging/db"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let f = ScopeFilter::new(".", Some("a+b"), None).unwrap();
        assert!(f.matches("a+b.key"));
        assert!(!f.matches("aab.key"));
        assert!(!f.matches("a+bxkey"));
    }
}
