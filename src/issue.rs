use regex::Regex;

/// The issue tracker link style used when none is configured
pub const DEFAULT_ISSUE_BASE_URL: &str = "https://buycoteam.atlassian.net/browse/";

/// Finds issue tracker links in commit bodies.
///
/// A link is the configured base URL followed by a non-empty run of
/// non-whitespace characters, e.g. `https://buycoteam.atlassian.net/browse/MIS-42`.
///
/// The link ends at the first whitespace. Trailing words on the same line,
/// like the ` (hotfix)` in `.../browse/MIS-42 (hotfix)`, are left out, where
/// a `browse/.*` pattern would have swallowed them into the link.
///
/// # Example
///
/// ```
/// # use release_notify::IssueMatcher;
/// let issues = IssueMatcher::new("https://example.atlassian.net/browse/").unwrap();
/// let link = issues.find("Jira Link: https://example.atlassian.net/browse/MIS-42");
///
/// assert_eq!(link, Some("https://example.atlassian.net/browse/MIS-42"));
/// ```
#[derive(Debug, Clone)]
pub struct IssueMatcher {
    base_url: String,
    regex: Regex,
}

impl IssueMatcher {
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self, regex::Error> {
        let base_url = base_url.into();
        let regex = Regex::new(&format!(r"{}\S+", regex::escape(&base_url)))?;
        Ok(IssueMatcher { base_url, regex })
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    /// Retrieves the first issue link in `body`
    pub fn find<'a>(&self, body: &'a str) -> Option<&'a str> {
        self.regex.find(body).map(|m| m.as_str())
    }
}

impl Default for IssueMatcher {
    fn default() -> Self {
        IssueMatcher {
            base_url: DEFAULT_ISSUE_BASE_URL.to_owned(),
            regex: regex!(r"https://buycoteam\.atlassian\.net/browse/\S+"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_jira_link() {
        let issues = IssueMatcher::default();
        assert_eq!(
            issues.find("Jira Link: https://buycoteam.atlassian.net/browse/MIS-42"),
            Some("https://buycoteam.atlassian.net/browse/MIS-42")
        );
    }

    #[test]
    fn first_link_wins() {
        let issues = IssueMatcher::default();
        let body = "https://buycoteam.atlassian.net/browse/MIS-1 and https://buycoteam.atlassian.net/browse/MIS-2";
        assert_eq!(
            issues.find(body),
            Some("https://buycoteam.atlassian.net/browse/MIS-1")
        );
    }

    #[test]
    fn link_stops_at_whitespace() {
        let issues = IssueMatcher::default();
        assert_eq!(
            issues.find("Jira Link: https://buycoteam.atlassian.net/browse/MIS-42 (hotfix)"),
            Some("https://buycoteam.atlassian.net/browse/MIS-42")
        );
        assert_eq!(
            issues.find("https://buycoteam.atlassian.net/browse/MIS-42\tand more"),
            Some("https://buycoteam.atlassian.net/browse/MIS-42")
        );
    }

    #[test]
    fn needs_a_path_after_base_url() {
        let issues = IssueMatcher::default();
        assert_eq!(issues.find("see https://buycoteam.atlassian.net/browse/"), None);
        assert_eq!(issues.find("see https://github.com/foo/bar/issues/1"), None);
        assert_eq!(issues.find(""), None);
    }

    #[test]
    fn base_url_is_literal() {
        let issues = IssueMatcher::new("https://tracker.example.com/issue?id=").unwrap();
        assert_eq!(
            issues.find("fixes https://tracker.example.com/issue?id=7"),
            Some("https://tracker.example.com/issue?id=7")
        );
        assert_eq!(issues.find("fixes https://trackerXexample.com/issueXid=7"), None);
    }
}
