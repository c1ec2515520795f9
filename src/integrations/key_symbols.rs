/// Maps a key identifier from a shortcut definition to the glyph shown in a
/// key badge.
pub trait KeySymbols {
    fn symbol(&self, key: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardKeySymbols;

impl KeySymbols for StandardKeySymbols {
    fn symbol(&self, key: &str) -> String {
        let glyph = match key.trim().to_ascii_lowercase().as_str() {
            "cmd" | "command" | "meta" => "⌘",
            "shift" => "⇧",
            "alt" | "option" => "⌥",
            "ctrl" | "control" => "⌃",
            "enter" | "return" => "↵",
            "esc" | "escape" => "⎋",
            "tab" => "⇥",
            "backspace" => "⌫",
            "up" => "↑",
            "down" => "↓",
            "left" => "←",
            "right" => "→",
            "space" => "␣",
            _ => {
                let mut chars = key.chars();
                return match (chars.next(), chars.next()) {
                    (Some(c), None) => c.to_uppercase().collect(),
                    _ => key.to_string(),
                };
            }
        };
        glyph.to_string()
    }
}

impl<F> KeySymbols for F
where
    F: Fn(&str) -> String,
{
    fn symbol(&self, key: &str) -> String {
        self(key)
    }
}
