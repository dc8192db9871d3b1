use std::{
    env, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use crate::{
    authors::Authors,
    config::RawCfg,
    error::{Error, Result},
    exec::{Executor, Invocation},
    fmt::{LineBreak, SlackMessage},
    git::{Commit, Commits},
    host::{Host, Outcome},
    issue::IssueMatcher,
    DEFAULT_CONFIG_FILE,
};

/// The base struct used to set options and produce release notifications.
#[derive(Debug, Clone)]
pub struct Notifier {
    /// Joins author, subject and body in each `git log` line (Defaults to
    /// `" || "`)
    pub separator: String,
    /// Finds issue tracker links in commit bodies
    pub issues: IssueMatcher,
    /// The sentence opening every message
    pub intro: String,
    /// The name of the host output receiving the message (Defaults to
    /// `message`)
    pub output_name: String,
    /// How line breaks are written into the message
    pub line_break: LineBreak,
    /// Git author names to chat ids
    pub authors: Authors,
    /// The previous release tag. When unset it's resolved with `git describe`
    pub from: Option<String>,
    /// Where to stop looking for commits (Defaults to `HEAD`)
    pub to: String,
    /// The git dir with all the meta-data (Typically the `.git` sub-directory
    /// of the project)
    pub git_dir: Option<PathBuf>,
    /// The working directory of the git project
    pub git_work_tree: Option<PathBuf>,
    /// Treat a non-zero exit status as a failure too. Off by default, only
    /// error stream output fails a command
    pub fail_on_exit_status: bool,
}

impl Default for Notifier {
    fn default() -> Self {
        debug!("Creating default notifier with Notifier::default()");
        Notifier {
            separator: " || ".to_owned(),
            issues: IssueMatcher::default(),
            intro: "Huraa! A new Frontend release has been deployed:".to_owned(),
            output_name: "message".to_owned(),
            line_break: LineBreak::Escaped,
            authors: Authors::new(),
            from: None,
            to: "HEAD".to_owned(),
            git_dir: None,
            git_work_tree: None,
            fail_on_exit_status: false,
        }
    }
}

impl Notifier {
    /// Creates a `Notifier` from the `.release-notify.toml` file of the
    /// current working directory.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use release_notify::Notifier;
    /// let notifier = Notifier::new().unwrap();
    /// ```
    pub fn new() -> Result<Self> {
        debug!("Trying default config file");
        Notifier::from_file(DEFAULT_CONFIG_FILE)
    }

    /// Creates a `Notifier` from a TOML configuration file. A relative
    /// `authors-file` inside it is resolved against the file's directory.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use release_notify::Notifier;
    /// let notifier = Notifier::from_file("/myproject/notify.toml").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        debug!("Creating notifier with \n\tfile: {:?}", file.as_ref());
        let cfg_file = if file.as_ref().is_relative() {
            let cwd = env::current_dir().map_err(|_| Error::CurrentDir)?;
            cwd.join(file.as_ref())
        } else {
            file.as_ref().to_path_buf()
        };

        Notifier::default().try_config_file(&cfg_file)
    }

    /// Loads the named config file, or `.release-notify.toml` when `None` is
    /// given. Only the default file may be absent, in which case the
    /// defaults are used. A named file that doesn't exist is an error.
    pub fn discover<P: AsRef<Path>>(file: Option<P>) -> Result<Self> {
        if let Some(file) = file {
            return Notifier::from_file(file);
        }

        let file = Path::new(DEFAULT_CONFIG_FILE);
        if file.exists() {
            Notifier::from_file(file)
        } else {
            info!("No config file at {:?}, using defaults", file);
            Ok(Notifier::default())
        }
    }

    fn try_config_file(mut self, cfg_file: &Path) -> Result<Self> {
        debug!("Trying to use config file: {:?}", cfg_file);
        let toml_s = fs::read_to_string(cfg_file)?;
        let cfg: RawCfg =
            toml::from_str(&toml_s).map_err(|_| Error::ConfigParse(cfg_file.to_path_buf()))?;
        let raw = cfg.notify;

        if let Some(sep) = raw.separator {
            self.separator = sep;
        }
        if let Some(url) = raw.issue_base_url {
            self.issues = IssueMatcher::new(url)?;
        }
        if let Some(intro) = raw.intro {
            self.intro = intro;
        }
        if let Some(name) = raw.output_name {
            self.output_name = name;
        }
        if let Some(to) = raw.to {
            self.to = to;
        }
        self.line_break = raw.line_break;
        self.from = raw.from;
        self.git_dir = raw.git_dir;
        self.git_work_tree = raw.git_work_tree;
        self.fail_on_exit_status = raw.fail_on_exit_status;

        if let Some(authors_file) = raw.authors_file {
            let path = match cfg_file.parent() {
                Some(dir) if authors_file.is_relative() => dir.join(authors_file),
                _ => authors_file,
            };
            self.authors = Authors::from_json_file(path)?;
        }
        // Inline entries win over the authors file
        self.authors.extend(cfg.authors);

        debug!("Returning notifier:\n{:?}", self);
        Ok(self)
    }

    /// Sets the separator between the fields of a `git log` line
    pub fn separator<S: Into<String>>(mut self, s: S) -> Notifier {
        self.separator = s.into();
        self
    }

    /// Sets the issue tracker URL prefix that commit bodies are searched for
    ///
    /// # Example
    ///
    /// ```
    /// # use release_notify::Notifier;
    /// let notifier = Notifier::default()
    ///     .issue_base_url("https://example.atlassian.net/browse/")
    ///     .unwrap();
    /// ```
    pub fn issue_base_url<S: Into<String>>(mut self, url: S) -> Result<Notifier> {
        self.issues = IssueMatcher::new(url)?;
        Ok(self)
    }

    /// Sets the sentence the message opens with
    pub fn intro<S: Into<String>>(mut self, i: S) -> Notifier {
        self.intro = i.into();
        self
    }

    /// Sets the name of the output value the message is published as
    pub fn output_name<S: Into<String>>(mut self, n: S) -> Notifier {
        self.output_name = n.into();
        self
    }

    pub fn line_break(mut self, l: LineBreak) -> Notifier {
        self.line_break = l;
        self
    }

    /// Replaces the author to chat id mapping
    pub fn authors(mut self, a: Authors) -> Notifier {
        self.authors = a;
        self
    }

    /// Pins the previous release tag instead of asking `git describe`
    ///
    /// # Example
    ///
    /// ```
    /// # use release_notify::Notifier;
    /// let notifier = Notifier::default().from("v1.4.0");
    /// ```
    pub fn from<S: Into<String>>(mut self, f: S) -> Notifier {
        self.from = Some(f.into());
        self
    }

    /// Sets what point to stop searching for commits (Defaults to `HEAD`)
    pub fn to<S: Into<String>>(mut self, t: S) -> Notifier {
        self.to = t.into();
        self
    }

    pub fn git_dir<P: AsRef<Path>>(mut self, d: P) -> Notifier {
        self.git_dir = Some(d.as_ref().to_path_buf());
        self
    }

    pub fn git_work_tree<P: AsRef<Path>>(mut self, d: P) -> Notifier {
        self.git_work_tree = Some(d.as_ref().to_path_buf());
        self
    }

    pub fn fail_on_exit_status(mut self, strict: bool) -> Notifier {
        self.fail_on_exit_status = strict;
        self
    }

    fn git(&self) -> Invocation {
        let mut git = Invocation::new("git");
        if let Some(ref dir) = self.git_dir {
            git = git.arg(format!("--git-dir={}", dir.display()));
        }
        if let Some(ref tree) = self.git_work_tree {
            git = git.arg(format!("--work-tree={}", tree.display()));
        }
        git
    }

    /// The command resolving the most recent tag reachable from the parent
    /// of the current commit
    pub fn previous_tag_invocation(&self) -> Invocation {
        self.git()
            .arg("describe")
            .arg("--tags")
            .arg("--abbrev=0")
            .arg(format!("{}^", self.to))
    }

    /// The command listing every commit after `tag`, one
    /// `author<sep>subject<sep>body` line each
    pub fn log_invocation(&self, tag: &str) -> Invocation {
        let sep = &self.separator;
        self.git()
            .arg("log")
            .arg(format!("{tag}..{}", self.to))
            .arg(format!("--pretty=format:%an{sep}%s{sep}%b"))
            .arg("--")
    }

    /// Retrieves the previous release tag
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use release_notify::{Notifier, exec::ProcessExecutor};
    /// let notifier = Notifier::new().unwrap();
    /// let tag = notifier.get_previous_tag(&ProcessExecutor::new()).unwrap();
    /// ```
    pub fn get_previous_tag<E: Executor + ?Sized>(&self, exec: &E) -> Result<String> {
        let tag = exec.run(&self.previous_tag_invocation())?;
        info!("Previous release tag: {}", tag);
        Ok(tag)
    }

    /// Retrieves the commits made since the previous release, newest first.
    pub fn get_commits<E: Executor + ?Sized>(&self, exec: &E) -> Result<Commits> {
        let tag = match self.from {
            Some(ref from) => from.clone(),
            None => self.get_previous_tag(exec)?,
        };

        let output = exec.run(&self.log_invocation(&tag))?;
        let commits = self.parse_output(&output);
        info!("Found {} commits since {}", commits.len(), tag);
        Ok(commits)
    }

    /// Splits `git log` output into lines and parses each non-empty one.
    pub fn parse_output(&self, output: &str) -> Commits {
        output
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| self.parse_raw_commit(line))
            .collect()
    }

    /// Parses one `author<sep>subject<sep>body` line. Missing trailing fields
    /// come back empty instead of failing.
    ///
    /// # Example
    ///
    /// ```
    /// # use release_notify::Notifier;
    /// let notifier = Notifier::default();
    /// let commit = notifier.parse_raw_commit(
    ///     "octocat || fix: a bug || Jira Link: https://buycoteam.atlassian.net/browse/MIS-42",
    /// );
    ///
    /// assert_eq!(commit.author, "octocat");
    /// assert_eq!(commit.message, "fix: a bug");
    /// assert_eq!(
    ///     commit.issue.as_deref(),
    ///     Some("https://buycoteam.atlassian.net/browse/MIS-42")
    /// );
    /// ```
    pub fn parse_raw_commit(&self, line: &str) -> Commit {
        let mut fields = line.splitn(3, &self.separator[..]);

        let author = fields.next().unwrap_or("").to_owned();
        let message = fields.next().unwrap_or("").to_owned();
        let issue = fields
            .next()
            .and_then(|body| self.issues.find(body))
            .map(str::to_owned);

        let commit = Commit {
            author,
            message,
            issue,
        };
        if !commit.is_complete() {
            warn!("Malformed commit line: {:?}", line);
        }
        commit
    }

    /// Renders the release announcement for `commits`
    pub fn render(&self, commits: &[Commit]) -> String {
        SlackMessage::new(&self.intro, &self.authors, self.line_break, commits).to_string()
    }

    /// Fetches, parses and renders the commits of the current release.
    pub fn run<E: Executor + ?Sized>(&self, exec: &E) -> Result<String> {
        let commits = self.get_commits(exec)?;
        Ok(self.render(&commits))
    }

    /// Writes the message between two `===` marker lines
    pub fn write_echo<W: Write>(&self, w: &mut W, message: &str) -> io::Result<()> {
        writeln!(w, "===")?;
        writeln!(w, "{message}")?;
        writeln!(w, "===")
    }

    /// Runs the notifier and reports the result to `host`.
    ///
    /// On success the message is echoed to `echo` and published as the
    /// `output_name` output. On failure the host is marked failed with the
    /// error's message and no output is set.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use release_notify::{Notifier, exec::ProcessExecutor, host::GithubActions};
    /// let notifier = Notifier::new().unwrap();
    /// let mut host = GithubActions::new();
    ///
    /// let outcome = notifier.report(&ProcessExecutor::new(), &mut host, &mut std::io::stdout());
    /// ```
    pub fn report<E, H, W>(&self, exec: &E, host: &mut H, echo: &mut W) -> Outcome
    where
        E: Executor + ?Sized,
        H: Host + ?Sized,
        W: Write,
    {
        let published = self.run(exec).and_then(|message| {
            self.write_echo(echo, &message)?;
            host.set_output(&self.output_name, &message)?;
            Ok(message)
        });

        match published {
            Ok(message) => Outcome::Success(message),
            Err(e) => {
                let reason = e.to_string();
                host.set_failed(&reason);
                Outcome::Failure(reason)
            }
        }
    }
}
