use std::path::PathBuf;

use serde::Deserialize;

use crate::{authors::Authors, fmt::LineBreak};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCfg {
    #[serde(default, rename = "release-notify")]
    pub notify: RawNotifyCfg,
    #[serde(default)]
    pub authors: Authors,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawNotifyCfg {
    pub separator: Option<String>,
    pub issue_base_url: Option<String>,
    pub intro: Option<String>,
    pub output_name: Option<String>,
    pub line_break: LineBreak,
    pub authors_file: Option<PathBuf>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub git_dir: Option<PathBuf>,
    pub git_work_tree: Option<PathBuf>,
    pub fail_on_exit_status: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config() {
        let cfg = include_str!("../demos/release-notify.toml");
        let res = toml::from_str(cfg);
        assert!(res.is_ok(), "{res:?}");
        let cfg: RawCfg = res.unwrap();

        assert_eq!(cfg.notify.separator, Some(" ## ".into()));
        assert_eq!(
            cfg.notify.issue_base_url,
            Some("https://example.atlassian.net/browse/".into())
        );
        assert_eq!(cfg.notify.intro, Some("A new Backend release is out:".into()));
        assert_eq!(cfg.notify.output_name, Some("slack-message".into()));
        assert_eq!(cfg.notify.line_break, LineBreak::Newline);
        assert_eq!(cfg.notify.authors_file, Some("authors.json".into()));
        assert_eq!(cfg.notify.from, Some("v1.2.0".into()));
        assert_eq!(cfg.notify.to, Some("main".into()));
        assert_eq!(cfg.notify.git_work_tree, Some("/myproject".into()));
        assert_eq!(cfg.notify.git_dir, Some("/myproject/.git".into()));
        assert!(cfg.notify.fail_on_exit_status);
        assert_eq!(cfg.authors.lookup("johannchopin-buyco"), Some("U123"));
        assert_eq!(cfg.authors.lookup("octocat"), Some("U0CTOCAT"));
    }

    #[test]
    fn dogfood_config() {
        let cfg = include_str!("../.release-notify.toml");
        let res = toml::from_str(cfg);
        assert!(res.is_ok(), "{res:?}");
        let cfg: RawCfg = res.unwrap();

        assert_eq!(cfg.notify.separator, Some(" || ".into()));
        assert_eq!(cfg.notify.line_break, LineBreak::Escaped);
        assert!(!cfg.notify.fail_on_exit_status);
        assert_eq!(cfg.notify.from, None);
    }

    #[test]
    fn everything_is_optional() {
        let cfg: RawCfg = toml::from_str("").unwrap();
        assert_eq!(cfg.notify.separator, None);
        assert_eq!(cfg.notify.line_break, LineBreak::Escaped);
        assert!(cfg.authors.is_empty());
    }

    #[test]
    fn rejects_unknown_line_break() {
        let res: Result<RawCfg, _> = toml::from_str("[release-notify]\nline-break = \"crlf\"\n");
        assert!(res.is_err());
    }
}
