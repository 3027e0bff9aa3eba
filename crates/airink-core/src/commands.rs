//! Discrete commands from voice phrases and keyboard shortcuts.

use crate::style::{PALETTE, SerializableColor, Theme, named_color};
use crate::tools::ToolKind;
use std::fmt;
use std::sync::LazyLock;

/// Step applied by the grow/shrink brush commands.
pub const BRUSH_STEP: f64 = 2.0;

/// A discrete board command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Undo,
    Redo,
    Clear,
    /// Save the board as an image.
    Export,
    SetColor(SerializableColor),
    SetTool(ToolKind),
    SetEraser(bool),
    ToggleEraser,
    SetFill(bool),
    ToggleFill,
    SetSize(f64),
    GrowBrush,
    ShrinkBrush,
    SetTheme(Theme),
    ToggleTheme,
}

/// Result of executing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The board or style changed.
    Done,
    /// Nothing to undo or redo.
    NothingToDo,
    /// The caller should write out an image.
    ExportRequested,
    ThemeChanged(Theme),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Undo => write!(f, "Undo"),
            Command::Redo => write!(f, "Redo"),
            Command::Clear => write!(f, "Clear board"),
            Command::Export => write!(f, "Save image"),
            Command::SetColor(color) => write!(f, "Color {}", color.to_hex()),
            Command::SetTool(tool) => write!(f, "Tool: {}", tool.name()),
            Command::SetEraser(true) => write!(f, "Eraser on"),
            Command::SetEraser(false) => write!(f, "Eraser off"),
            Command::ToggleEraser => write!(f, "Toggle eraser"),
            Command::SetFill(true) => write!(f, "Fill shapes"),
            Command::SetFill(false) => write!(f, "Outline shapes"),
            Command::ToggleFill => write!(f, "Toggle fill"),
            Command::SetSize(size) => write!(f, "Brush size {size}"),
            Command::GrowBrush => write!(f, "Bigger brush"),
            Command::ShrinkBrush => write!(f, "Smaller brush"),
            Command::SetTheme(theme) => write!(f, "{} mode", theme.name()),
            Command::ToggleTheme => write!(f, "Toggle theme"),
        }
    }
}

/// Phrases that start a command addressed to the board.
const WAKE_WORDS: [&str; 2] = ["hey", "hello"];

const FIXED_PHRASES: &[(&str, Command)] = &[
    ("clear board", Command::Clear),
    ("clear canvas", Command::Clear),
    ("clear", Command::Clear),
    ("undo", Command::Undo),
    ("redo", Command::Redo),
    ("save image", Command::Export),
    ("save", Command::Export),
];

const TRAILING_PHRASES: &[(&str, Command)] = &[
    ("use pen", Command::SetTool(ToolKind::Pen)),
    ("pen", Command::SetTool(ToolKind::Pen)),
    ("use eraser", Command::SetEraser(true)),
    ("eraser", Command::SetEraser(true)),
    ("light mode", Command::SetTheme(Theme::Light)),
    ("dark mode", Command::SetTheme(Theme::Dark)),
    ("white background", Command::SetTheme(Theme::Light)),
    ("black background", Command::SetTheme(Theme::Dark)),
    ("draw circle", Command::SetTool(ToolKind::Circle)),
    ("circle", Command::SetTool(ToolKind::Circle)),
    ("draw rectangle", Command::SetTool(ToolKind::Rectangle)),
    ("rectangle", Command::SetTool(ToolKind::Rectangle)),
    ("draw square", Command::SetTool(ToolKind::Square)),
    ("square", Command::SetTool(ToolKind::Square)),
    ("draw oval", Command::SetTool(ToolKind::Oval)),
    ("oval", Command::SetTool(ToolKind::Oval)),
    ("draw star", Command::SetTool(ToolKind::Star)),
    ("star", Command::SetTool(ToolKind::Star)),
    ("draw triangle", Command::SetTool(ToolKind::Triangle)),
    ("triangle", Command::SetTool(ToolKind::Triangle)),
    ("fill shapes", Command::SetFill(true)),
    ("fill on", Command::SetFill(true)),
    ("no fill", Command::SetFill(false)),
    ("fill off", Command::SetFill(false)),
    ("bigger brush", Command::GrowBrush),
    ("smaller brush", Command::ShrinkBrush),
];

/// Every phrase in match order. Colors sit between the editing commands and
/// the tool commands.
static PHRASES: LazyLock<Vec<(Vec<String>, Command)>> = LazyLock::new(|| {
    let words = |phrase: &str| phrase.split_whitespace().map(str::to_string).collect::<Vec<_>>();
    let mut table: Vec<(Vec<String>, Command)> = FIXED_PHRASES
        .iter()
        .map(|(phrase, command)| (words(phrase), *command))
        .collect();
    for (name, color) in PALETTE {
        for phrase in [name.to_string(), format!("color {name}"), format!("change to {name}")] {
            table.push((words(&phrase), Command::SetColor(color)));
        }
    }
    table.extend(
        TRAILING_PHRASES
            .iter()
            .map(|(phrase, command)| (words(phrase), *command)),
    );
    table
});

fn normalize(transcript: &str) -> Vec<String> {
    transcript
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '#' || c == '.' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(|w| w.trim_matches('.').to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Drop a leading "hey board" / "hello board".
fn strip_wake_word(words: &[String]) -> &[String] {
    match words {
        [greeting, board, rest @ ..] if WAKE_WORDS.contains(&greeting.as_str()) && board == "board" => {
            rest
        }
        _ => words,
    }
}

fn contains_words(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

/// Parse "size 12" / "brush size 12" / "color #ff8800".
fn parse_parameterized(words: &[String]) -> Option<Command> {
    let position = |word: &str| words.iter().position(|w| w == word);
    if let Some(i) = position("size") {
        if let Some(size) = words.get(i + 1).and_then(|w| w.parse::<f64>().ok()) {
            return Some(Command::SetSize(size));
        }
    }
    let value = words.get(position("color")? + 1)?;
    SerializableColor::from_hex(value)
        .or_else(|| named_color(value))
        .map(Command::SetColor)
}

impl Command {
    /// Parse a spoken or typed phrase.
    ///
    /// Exact phrases win, then parameterized forms, then the first table
    /// phrase found anywhere in the transcript.
    pub fn from_phrase(transcript: &str) -> Option<Command> {
        let words = normalize(transcript);
        let words = strip_wake_word(&words);
        if words.is_empty() {
            return None;
        }

        if let Some((_, command)) = PHRASES.iter().find(|(phrase, _)| phrase.as_slice() == words) {
            return Some(*command);
        }
        if let Some(command) = parse_parameterized(words) {
            return Some(command);
        }
        PHRASES
            .iter()
            .find(|(phrase, _)| contains_words(words, phrase))
            .map(|(_, command)| *command)
    }

    /// Whether a transcript starts with the wake phrase.
    pub fn has_wake_word(transcript: &str) -> bool {
        let words = normalize(transcript);
        strip_wake_word(&words).len() != words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_phrases() {
        assert_eq!(Command::from_phrase("undo"), Some(Command::Undo));
        assert_eq!(Command::from_phrase("Clear Board"), Some(Command::Clear));
        assert_eq!(Command::from_phrase("save image"), Some(Command::Export));
        assert_eq!(
            Command::from_phrase("draw star"),
            Some(Command::SetTool(ToolKind::Star))
        );
        assert_eq!(
            Command::from_phrase("dark mode"),
            Some(Command::SetTheme(Theme::Dark))
        );
        assert_eq!(Command::from_phrase("use eraser"), Some(Command::SetEraser(true)));
    }

    #[test]
    fn test_colors() {
        let red = named_color("red").unwrap();
        assert_eq!(Command::from_phrase("red"), Some(Command::SetColor(red)));
        assert_eq!(Command::from_phrase("change to red"), Some(Command::SetColor(red)));
        assert_eq!(
            Command::from_phrase("color #ff8800"),
            Some(Command::SetColor(SerializableColor::new(0xff, 0x88, 0x00, 255)))
        );
        assert_eq!(
            Command::from_phrase("change the color to blue"),
            Some(Command::SetColor(named_color("blue").unwrap()))
        );
    }

    #[test]
    fn test_wake_word_is_stripped() {
        assert!(Command::has_wake_word("Hey Board, undo"));
        assert!(!Command::has_wake_word("undo"));
        assert_eq!(Command::from_phrase("Hey Board, undo"), Some(Command::Undo));
        assert_eq!(Command::from_phrase("hello board redo"), Some(Command::Redo));
        assert_eq!(Command::from_phrase("hey board"), None);
    }

    #[test]
    fn test_partial_match_uses_whole_words() {
        assert_eq!(
            Command::from_phrase("please switch to dark mode now"),
            Some(Command::SetTheme(Theme::Dark))
        );
        assert_eq!(Command::from_phrase("redo that"), Some(Command::Redo));
        // "open" must not match "pen".
        assert_eq!(Command::from_phrase("open the window"), None);
    }

    #[test]
    fn test_size_phrase() {
        assert_eq!(Command::from_phrase("brush size 12"), Some(Command::SetSize(12.0)));
        assert_eq!(Command::from_phrase("bigger brush"), Some(Command::GrowBrush));
    }

    #[test]
    fn test_unknown_phrase() {
        assert_eq!(Command::from_phrase(""), None);
        assert_eq!(Command::from_phrase("make me a sandwich"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::Undo.to_string(), "Undo");
        assert_eq!(Command::SetTool(ToolKind::Oval).to_string(), "Tool: oval");
        assert_eq!(Command::SetTheme(Theme::Dark).to_string(), "Dark mode");
    }
}
