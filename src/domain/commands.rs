use serde::{Deserialize, Serialize};

/// Category of a command, decided once from its label when the command is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Contact,
    Close,
    GoTo,
    Other,
}

impl CommandKind {
    const KEYWORDS: [(&'static str, CommandKind); 3] = [
        ("Contact", CommandKind::Contact),
        ("Close", CommandKind::Close),
        ("Go to", CommandKind::GoTo),
    ];

    pub fn from_label(label: &str) -> Self {
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| label.contains(keyword))
            .map(|(_, kind)| *kind)
            .unwrap_or(Self::Other)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Contact => "Contact",
            Self::Close => "Close",
            Self::GoTo => "Go to",
            Self::Other => "",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Contact => "✎",
            Self::Close | Self::GoTo | Self::Other => "→",
        }
    }
}

/// Wire shape of a shortcut as supplied by a registry or a shortcuts file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortcutRecord {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub keys: Vec<String>,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    label: Option<String>,
    keys: Vec<String>,
    action: String,
    kind: CommandKind,
}

impl Command {
    pub fn new(label: impl Into<String>, keys: &[&str], action: impl Into<String>) -> Self {
        Self::from_parts(
            Some(label.into()),
            keys.iter().map(|key| key.to_string()).collect(),
            action.into(),
        )
    }

    /// Builds a command that has no label. Such commands are never offered by the palette.
    pub fn unlabeled(keys: &[&str], action: impl Into<String>) -> Self {
        Self::from_parts(
            None,
            keys.iter().map(|key| key.to_string()).collect(),
            action.into(),
        )
    }

    fn from_parts(label: Option<String>, keys: Vec<String>, action: String) -> Self {
        let label = label.filter(|label| !label.is_empty());
        let kind = label
            .as_deref()
            .map(CommandKind::from_label)
            .unwrap_or(CommandKind::Other);
        Self {
            label,
            keys,
            action,
            kind,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Splits the label into the kind keyword and the text following it.
    ///
    /// `"Go to Articles"` yields `("Go to", " Articles")`. Commands without a
    /// known keyword yield an empty keyword and the whole label.
    pub fn label_parts(&self) -> (&str, &str) {
        let Some(label) = self.label.as_deref() else {
            return ("", "");
        };
        let keyword = self.kind.keyword();
        if keyword.is_empty() {
            return ("", label);
        }
        match label.split_once(keyword) {
            Some((_, rest)) => (keyword, rest),
            None => ("", label),
        }
    }
}

impl From<ShortcutRecord> for Command {
    fn from(record: ShortcutRecord) -> Self {
        Self::from_parts(record.label, record.keys, record.action)
    }
}

impl From<&Command> for ShortcutRecord {
    fn from(command: &Command) -> Self {
        Self {
            label: command.label.clone(),
            keys: command.keys.clone(),
            action: command.action.clone(),
        }
    }
}
