//! Bot command parsing and canned replies.

use reelpost_core::telegram::{InlineKeyboardButton, InlineKeyboardMarkup};

/// What an incoming text message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Setup,
    /// `/search <text>` or any text that is not a command.
    Search(String),
    Unknown(String),
}

impl Command {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let Some(rest) = text.strip_prefix('/') else {
            return Command::Search(text.to_string());
        };

        let (head, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        // Group chats address commands as /cmd@botname.
        let name = head.split('@').next().unwrap_or(head).to_ascii_lowercase();

        match name.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "setup" => Command::Setup,
            "search" => Command::Search(args.trim().to_string()),
            _ => Command::Unknown(name),
        }
    }
}

/// Text and buttons of a fixed reply.
#[derive(Debug, Clone, PartialEq)]
pub struct CannedReply {
    pub text: &'static str,
    pub keyboard: InlineKeyboardMarkup,
}

pub const SEARCH_PROMPT: &str = "🔍 Send a movie or series title to search, e.g. <code>Fight Club (1999)</code>";
pub const NO_RESULTS: &str = "😕 No results found";
pub const SEARCH_FAILED: &str = "❌ Search is unavailable right now, try again later";
pub const EXPIRED_BUTTON: &str = "⌛ This button has expired, search again";
pub const NO_CHANNEL: &str = "❌ No channel configured for posting";
pub const POSTING: &str = "⏳ Posting...";

const TMDB_URL: &str = "https://www.themoviedb.org";
const BOTFATHER_URL: &str = "https://t.me/BotFather";

pub fn welcome() -> CannedReply {
    CannedReply {
        text: "🎬 <b>Welcome to Reelpost!</b>\n\nSend a movie or series title and pick a result to post it to your channel.",
        keyboard: InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
            "🌐 Browse TMDB",
            TMDB_URL,
        )]]),
    }
}

pub fn help() -> CannedReply {
    CannedReply {
        text: "ℹ️ <b>Commands</b>\n\n/search &lt;title&gt; - find a title\n/setup - channel setup steps\n/help - this message\n\nAdd a year to narrow results: <code>Dune 2021</code>",
        keyboard: InlineKeyboardMarkup::default(),
    }
}

pub fn setup() -> CannedReply {
    CannedReply {
        text: "⚙️ <b>Channel setup</b>\n\n1. Add this bot to your channel\n2. Promote it to admin\n3. Enable \"Post Messages\"\n4. Search a title and pick a result",
        keyboard: InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
            "🤖 BotFather",
            BOTFATHER_URL,
        )]]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("/help@reel_bot"), Command::Help);
        assert_eq!(Command::parse("/SETUP"), Command::Setup);
        assert_eq!(
            Command::parse("/search  Fight Club (1999) "),
            Command::Search("Fight Club (1999)".to_string())
        );
        assert_eq!(Command::parse("/search"), Command::Search(String::new()));
        assert_eq!(Command::parse("Dune"), Command::Search("Dune".to_string()));
        assert_eq!(Command::parse("/stop"), Command::Unknown("stop".to_string()));
    }
}
