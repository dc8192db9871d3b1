/// The struct representation of a `Commit`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    /// The author name as recorded by git, before any identity mapping
    pub author: String,
    /// The commit subject
    pub message: String,
    /// The issue tracker link found in the commit body (if any)
    pub issue: Option<String>,
}

impl Commit {
    /// A commit is only meaningful when both its author and subject survived
    /// parsing; anything else came from a malformed log line.
    pub fn is_complete(&self) -> bool { !self.author.is_empty() && !self.message.is_empty() }
}

/// A convienience type for multiple commits
pub type Commits = Vec<Commit>;
