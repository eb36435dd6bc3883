//! Query-string assembly.
//!
//! Absent optional parameters are never written, not even as `name=`.
//! Free-text comments are fully percent-encoded at insertion; every other
//! value is assumed URL-safe and only has query-structural characters
//! escaped when the query string is rendered.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::types::{VersionControlRecursionType, VersionDescriptor};

/// Comment encoding: everything except `A-Z a-z 0-9 - . _ *`, space as `%20`.
const COMMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'*');

/// Characters that would split or terminate a query value.
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>');

/// Percent-encode a free-text comment.
pub(crate) fn encode_comment(comment: &str) -> String {
    utf8_percent_encode(comment, COMMENT_ENCODE_SET).to_string()
}

/// Query parameters of one request, keyed by wire name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QueryParams {
    entries: BTreeMap<&'static str, String>,
}

impl QueryParams {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub(crate) fn insert(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.entries.insert(name, value.into());
        self
    }

    /// Set a parameter when `value` is present.
    pub(crate) fn insert_opt<V: Into<String>>(
        &mut self,
        name: &'static str,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.insert(name, value);
        }
        self
    }

    /// Set `comment`, percent-encoded.
    pub(crate) fn comment(&mut self, comment: Option<&str>) -> &mut Self {
        self.insert_opt("comment", comment.map(encode_comment))
    }

    /// Set `version`, `versionType` and `versionOptions` from a descriptor.
    pub(crate) fn version(&mut self, version: Option<&VersionDescriptor>) -> &mut Self {
        if let Some(descriptor) = version {
            self.insert("version", descriptor.version.as_str());
            self.insert("versionType", descriptor.version_type.query_name());
            self.insert("versionOptions", descriptor.version_options.query_name());
        }
        self
    }

    /// Set `recursionLevel`.
    pub(crate) fn recursion_level(&mut self, level: Option<VersionControlRecursionType>) -> &mut Self {
        self.insert_opt("recursionLevel", level.map(VersionControlRecursionType::query_name))
    }

    /// Render as `name=value&...` in name order.
    pub(crate) fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| format!("{name}={}", utf8_percent_encode(value, QUERY_VALUE_ENCODE_SET)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::GitVersionOptions;

    #[test]
    fn test_encode_comment_space_as_percent_20() {
        assert_eq!(encode_comment("fix typo"), "fix%20typo");
    }

    #[test]
    fn test_encode_comment_special_characters() {
        assert_eq!(encode_comment("a&b=c?d/e+f"), "a%26b%3Dc%3Fd%2Fe%2Bf");
        assert_eq!(encode_comment("keep-this_one.*"), "keep-this_one.*");
        assert_eq!(encode_comment("~"), "%7E");
    }

    #[test]
    fn test_encode_comment_utf8() {
        assert_eq!(encode_comment("é"), "%C3%A9");
    }

    #[test]
    fn test_absent_parameters_are_omitted() {
        let mut query = QueryParams::new();
        query
            .insert("api-version", "7.1-preview.1")
            .insert_opt::<String>("path", None)
            .comment(None)
            .version(None)
            .recursion_level(None);

        assert_eq!(query.to_query_string(), "api-version=7.1-preview.1");
    }

    #[test]
    fn test_version_descriptor_parameters() {
        let mut query = QueryParams::new();
        query.version(Some(
            &VersionDescriptor::branch("main").with_options(GitVersionOptions::PreviousChange),
        ));

        assert_eq!(
            query.to_query_string(),
            "version=main&versionOptions=PREVIOUSCHANGE&versionType=BRANCH"
        );
    }

    #[test]
    fn test_recursion_level_parameter() {
        let mut query = QueryParams::new();
        query.recursion_level(Some(VersionControlRecursionType::OneLevel));
        assert_eq!(query.to_query_string(), "recursionLevel=ONELEVEL");
    }

    #[test]
    fn test_comment_is_not_double_encoded() {
        let mut query = QueryParams::new();
        query.comment(Some("a b&c"));
        assert_eq!(query.to_query_string(), "comment=a%20b%26c");
    }

    #[test]
    fn test_path_value_passes_through() {
        let mut query = QueryParams::new();
        query.insert("path", "/Home/Getting-Started");
        assert_eq!(query.to_query_string(), "path=/Home/Getting-Started");
    }

    #[test]
    fn test_path_value_structural_characters_escaped() {
        let mut query = QueryParams::new();
        query.insert("path", "/Q&A #1");
        assert_eq!(query.to_query_string(), "path=/Q%26A%20%231");
    }
}
