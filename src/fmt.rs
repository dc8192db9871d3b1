mod slack;

use std::{result::Result as StdResult, str::FromStr};

use strum::{Display, EnumString};

pub use self::slack::SlackMessage;

/// How line breaks are spelled inside the rendered message.
///
/// The chat step downstream unescapes `\n` itself, so by default the message
/// carries the two characters `\` `n` rather than real newlines.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, EnumString, Display)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum LineBreak {
    #[default]
    Escaped,
    Newline,
}

impl LineBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineBreak::Escaped => "\\n",
            LineBreak::Newline => "\n",
        }
    }
}

impl<'de> serde::de::Deserialize<'de> for LineBreak {
    fn deserialize<D>(deserializer: D) -> StdResult<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}
