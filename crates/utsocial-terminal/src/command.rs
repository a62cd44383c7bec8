//! Slash commands understood by the REPL.

/// Every command, for completion and hints.
pub const COMMANDS: &[&str] = &[
    "/feed", "/filter", "/post", "/react", "/comments", "/comment", "/profile", "/edit",
    "/save", "/cancel", "/mode", "/logout", "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the feed (and switch to it from the profile).
    Feed,
    /// Set the career filter; no argument lists the options.
    Filter(Option<String>),
    Post(String),
    /// Post reference: a listing number or a post id.
    React(String),
    Comments(String),
    Comment(String),
    Profile,
    Edit,
    Save,
    Cancel,
    /// Toggle login / registration.
    Mode,
    Logout,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parses a slash command. Returns `None` for plain text.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let arg = || rest.to_string();

        Some(match name {
            "/feed" => Self::Feed,
            "/filter" if rest.is_empty() => Self::Filter(None),
            "/filter" => Self::Filter(Some(arg())),
            "/post" => Self::Post(arg()),
            "/react" => Self::React(arg()),
            "/comments" => Self::Comments(arg()),
            "/comment" => Self::Comment(arg()),
            "/profile" => Self::Profile,
            "/edit" => Self::Edit,
            "/save" => Self::Save,
            "/cancel" => Self::Cancel,
            "/mode" => Self::Mode,
            "/logout" => Self::Logout,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        })
    }
}
