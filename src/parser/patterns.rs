//! # Substitution Patterns
//!
//! Regex patterns used by the value resolver.
//!
//! ## Reference vs. environment
//!
//! Both substitutions share the `${...}` syntax. They are told apart by the
//! first character of the name:
//!
//! - `${top.sub.key}` - lower-case start: reference to an earlier key
//! - `${HOME}` - upper-case or `_` start: environment variable

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches a whole value that is a key reference: `${path}` or `${path | default}`
    ///
    /// Captures:
    /// - Group 1: key path (dotted, may carry `[N]` indices)
    /// - Group 2: default value (optional, may be empty)
    pub static ref VAR_REF_RE: Regex = Regex::new(
        r"^\$\{\s*([a-z][a-z0-9._\-\[\]]*)\s*(?:\|\s*(.*?))?\s*\}$"
    ).unwrap();

    /// Matches environment tokens anywhere in a value: `${NAME}` or `${NAME | default}`
    ///
    /// Captures:
    /// - Group 1: variable name
    /// - Group 2: default value (optional, may be empty)
    pub static ref ENV_VAR_RE: Regex = Regex::new(
        r"\$\{\s*([A-Z_][A-Z0-9_]*)\s*(?:\|\s*([^}]*?))?\s*\}"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_ref_plain() {
        let caps = VAR_REF_RE.captures("${top.sub.key0}").unwrap();
        assert_eq!(&caps[1], "top.sub.key0");
        assert!(caps.get(2).is_none());
    }

    #[test]
    fn test_var_ref_with_default() {
        let caps = VAR_REF_RE.captures("${app.name | my app}").unwrap();
        assert_eq!(&caps[1], "app.name");
        assert_eq!(&caps[2], "my app");
    }

    #[test]
    fn test_var_ref_empty_default() {
        let caps = VAR_REF_RE.captures("${a.b|}").unwrap();
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some(""));
    }

    #[test]
    fn test_var_ref_whole_value_only() {
        assert!(VAR_REF_RE.captures("prefix ${a.b}").is_none());
        assert!(VAR_REF_RE.captures("${HOME}").is_none());
        assert!(VAR_REF_RE.captures("${1abc}").is_none());
    }

    #[test]
    fn test_env_var_tokens() {
        let names: Vec<_> = ENV_VAR_RE
            .captures_iter("${HOME}/bin:${EXTRA_PATH | /opt/bin}")
            .map(|c| c[1].to_string())
            .collect();
        assert_eq!(names, vec!["HOME", "EXTRA_PATH"]);
    }

    #[test]
    fn test_env_var_default() {
        let caps = ENV_VAR_RE.captures("${SHELL|/bin/sh}").unwrap();
        assert_eq!(&caps[1], "SHELL");
        assert_eq!(&caps[2], "/bin/sh");
    }

    #[test]
    fn test_env_var_ignores_key_refs() {
        assert!(ENV_VAR_RE.captures("${top.sub}").is_none());
    }
}
