//! Keyboard shortcut registry and documentation.

use airink_core::commands::Command;
use airink_core::style::Theme;
use airink_core::tools::ToolKind;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub command: Command,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        command: Command,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            command,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == ctrl && self.shift == shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, "Undo", Command::Undo),
            Shortcut::new("Z", true, true, "Redo", Command::Redo),
            Shortcut::new("Y", true, false, "Redo", Command::Redo),
            Shortcut::new("S", true, false, "Export to PNG", Command::Export),
            Shortcut::new("Delete", false, false, "Clear board", Command::Clear),
            Shortcut::new("P", false, false, "Pen", Command::SetTool(ToolKind::Pen)),
            Shortcut::new("E", false, false, "Toggle eraser", Command::ToggleEraser),
            Shortcut::new("F", false, false, "Toggle shape fill", Command::ToggleFill),
            Shortcut::new("1", false, false, "Circle", Command::SetTool(ToolKind::Circle)),
            Shortcut::new("2", false, false, "Rectangle", Command::SetTool(ToolKind::Rectangle)),
            Shortcut::new("3", false, false, "Square", Command::SetTool(ToolKind::Square)),
            Shortcut::new("4", false, false, "Oval", Command::SetTool(ToolKind::Oval)),
            Shortcut::new("5", false, false, "Triangle", Command::SetTool(ToolKind::Triangle)),
            Shortcut::new("6", false, false, "Star", Command::SetTool(ToolKind::Star)),
            Shortcut::new("[", false, false, "Smaller brush", Command::ShrinkBrush),
            Shortcut::new("]", false, false, "Bigger brush", Command::GrowBrush),
            Shortcut::new("L", false, false, "Light mode", Command::SetTheme(Theme::Light)),
            Shortcut::new("D", false, false, "Dark mode", Command::SetTheme(Theme::Dark)),
            Shortcut::new("T", false, false, "Toggle theme", Command::ToggleTheme),
        ]
    }

    /// Look up the command bound to a key.
    pub fn find(key: &str, ctrl: bool, shift: bool) -> Option<Command> {
        Self::all()
            .into_iter()
            .find(|s| s.matches(key, ctrl, shift))
            .map(|s| s.command)
    }

    /// Look up a chord written like "Ctrl+Shift+Z".
    pub fn find_chord(chord: &str) -> Option<Command> {
        let mut ctrl = false;
        let mut shift = false;
        let mut key = None;
        for part in chord.split('+').map(str::trim) {
            if part.eq_ignore_ascii_case("ctrl") || part.eq_ignore_ascii_case("cmd") {
                ctrl = true;
            } else if part.eq_ignore_ascii_case("shift") {
                shift = true;
            } else if key.replace(part).is_some() {
                return None;
            }
        }
        Self::find(key?, ctrl, shift)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
