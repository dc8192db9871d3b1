use std::{borrow::Cow, fs, path::Path};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Maps git author names to chat user ids so commits can mention their
/// authors.
///
/// Lookups are exact and case sensitive. A missing entry is not an error, the
/// raw author name is used instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Authors(IndexMap<String, String>);

impl Authors {
    pub fn new() -> Self { Authors::default() }

    /// Parses a JSON object of `"author": "chat id"` pairs.
    ///
    /// # Example
    ///
    /// ```
    /// # use release_notify::Authors;
    /// let authors = Authors::from_json_str(r#"{"octocat": "U123"}"#).unwrap();
    /// assert_eq!(authors.lookup("octocat"), Some("U123"));
    /// ```
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Loads the mapping from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        debug!("Loading authors from file: {:?}", file.as_ref());
        let json = fs::read_to_string(file.as_ref())?;
        let authors = Authors::from_json_str(&json)
            .map_err(|_| Error::AuthorsParse(file.as_ref().to_path_buf()))?;
        debug!("Loaded {} authors", authors.len());
        Ok(authors)
    }

    /// Adds every pair of `other`, replacing the chat ids of authors already
    /// present.
    pub fn extend(&mut self, other: Authors) { self.0.extend(other.0); }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, author: K, chat_id: V) {
        self.0.insert(author.into(), chat_id.into());
    }

    /// Retrieves the chat id for a given author (if one is defined)
    pub fn lookup(&self, author: &str) -> Option<&str> { self.0.get(author).map(String::as_str) }

    /// Resolves an author to a `<@id>` mention, or the author unchanged when
    /// nobody is mapped.
    ///
    /// # Example
    ///
    /// ```
    /// # use release_notify::Authors;
    /// let mut authors = Authors::new();
    /// authors.insert("octocat", "U123");
    ///
    /// assert_eq!(authors.mention("octocat"), "<@U123>");
    /// assert_eq!(authors.mention("hubot"), "hubot");
    /// ```
    pub fn mention<'a>(&self, author: &'a str) -> Cow<'a, str> {
        match self.lookup(author) {
            Some(id) => Cow::Owned(format!("<@{id}>")),
            None => Cow::Borrowed(author),
        }
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Authors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Authors(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
