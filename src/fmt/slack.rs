use std::fmt;

use crate::{authors::Authors, fmt::LineBreak, git::Commit};

/// The release announcement for a list of commits, rendered through
/// `Display`.
///
/// Each commit becomes `-  <message>`, followed by
/// `   <issue> by <author>` when the commit links an issue. Authors with a
/// chat id are mentioned, everyone else is named as git knows them. Commits
/// keep the order they are given in.
///
/// # Example
///
/// ```
/// # use release_notify::{Authors, Commit, fmt::{LineBreak, SlackMessage}};
/// let authors: Authors = [("octocat", "U123")].into_iter().collect();
/// let commits = vec![Commit {
///     author: "octocat".into(),
///     message: "fix: things".into(),
///     issue: Some("https://jira.example.com/browse/X-1".into()),
/// }];
///
/// let msg = SlackMessage::new("New release:", &authors, LineBreak::Newline, &commits);
/// assert_eq!(
///     msg.to_string(),
///     "New release:\n\n-  fix: things\n   https://jira.example.com/browse/X-1 by <@U123>"
/// );
/// ```
pub struct SlackMessage<'a> {
    intro: &'a str,
    authors: &'a Authors,
    line_break: LineBreak,
    commits: &'a [Commit],
}

impl<'a> SlackMessage<'a> {
    pub fn new(
        intro: &'a str,
        authors: &'a Authors,
        line_break: LineBreak,
        commits: &'a [Commit],
    ) -> SlackMessage<'a> {
        SlackMessage {
            intro,
            authors,
            line_break,
            commits,
        }
    }

    fn write_commit(&self, f: &mut fmt::Formatter, commit: &Commit) -> fmt::Result {
        write!(f, "-  {}", commit.message)?;
        if let Some(ref issue) = commit.issue {
            write!(
                f,
                "{}   {issue} by {}",
                self.line_break.as_str(),
                self.authors.mention(&commit.author)
            )?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for SlackMessage<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let br = self.line_break.as_str();
        write!(f, "{}{br}{br}", self.intro)?;

        for (i, commit) in self.commits.iter().enumerate() {
            if i > 0 {
                f.write_str(br)?;
            }
            self.write_commit(f, commit)?;
        }

        Ok(())
    }
}
