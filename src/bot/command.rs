//! Chat command parsing.

/// A recognised bot command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Check,
    /// Raw first argument, validated by the handler
    SetInterval(Option<String>),
}

impl Command {
    /// Parses `/name[@bot] args...`. Returns `None` for plain text and for
    /// commands the bot does not know.
    pub fn parse(text: &str) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let head = tokens.next()?.strip_prefix('/')?;
        let name = head.split('@').next().unwrap_or(head).to_lowercase();

        match name.as_str() {
            "start" | "help" => Some(Command::Start),
            "check" => Some(Command::Check),
            "setinterval" => Some(Command::SetInterval(tokens.next().map(str::to_string))),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Check => "check",
            Command::SetInterval(_) => "setinterval",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/check"), Some(Command::Check));
        assert_eq!(
            Command::parse("/setinterval 30"),
            Some(Command::SetInterval(Some("30".to_string())))
        );
    }

    #[test]
    fn test_parse_strips_bot_suffix_and_case() {
        assert_eq!(Command::parse("/Check@page_watch_bot"), Some(Command::Check));
        assert_eq!(
            Command::parse("  /setinterval@bot   abc extra"),
            Some(Command::SetInterval(Some("abc".to_string())))
        );
    }

    #[test]
    fn test_parse_missing_argument() {
        assert_eq!(Command::parse("/setinterval"), Some(Command::SetInterval(None)));
    }

    #[test]
    fn test_parse_ignores_other_text() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("/unknown 1"), None);
        assert_eq!(Command::parse("check /check"), None);
    }
}
