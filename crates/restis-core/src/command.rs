//! Canonical commands and the pre-dispatch classification.

/// Error returned when `ACL RESTTOKEN` is called with the wrong arity.
pub const REST_TOKEN_USAGE: &str = "ERR invalid syntax. Usage: ACL RESTTOKEN username password";

/// A command in canonical form: a name plus ordered string arguments.
///
/// Every request encoding (JSON array, pipeline item, path and query)
/// produces one of these before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

/// How the dispatcher must handle a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind<'a> {
    /// `ACL RESTTOKEN username password`: mint a gateway token.
    RestToken { username: &'a str, password: &'a str },

    /// `ACL RESTTOKEN` with any other number of arguments.
    RestTokenUsage,

    /// Anything else, forwarded to the store as is.
    Forward,
}

impl Command {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Classify this command.
    ///
    /// `ACL RESTTOKEN` is matched case-insensitively on both words and is
    /// never forwarded to the store.
    pub fn kind(&self) -> CommandKind<'_> {
        let is_rest_token = self.name.eq_ignore_ascii_case("acl")
            && self
                .args
                .first()
                .is_some_and(|sub| sub.eq_ignore_ascii_case("resttoken"));

        if !is_rest_token {
            return CommandKind::Forward;
        }

        match self.args.as_slice() {
            [_, username, password] => CommandKind::RestToken {
                username: username.as_str(),
                password: password.as_str(),
            },
            _ => CommandKind::RestTokenUsage,
        }
    }
}
