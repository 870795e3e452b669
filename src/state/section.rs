//! Panel sections.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The mutually exclusive sections of the panel.
///
/// Exactly one section is active at a time. The active value is owned by the
/// application controller; the section bar only reflects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Activity list with paid toggles.
    #[default]
    Activity,
    /// Ticket info with editable fields.
    Info,
}

impl Section {
    /// All sections in display order.
    pub const ALL: [Section; 2] = [Section::Activity, Section::Info];

    /// The display label for the section.
    pub fn label(&self) -> &'static str {
        match self {
            Section::Activity => "Activity",
            Section::Info => "Info",
        }
    }

    /// The section following this one, wrapping around.
    pub fn next(&self) -> Section {
        match self {
            Section::Activity => Section::Info,
            Section::Info => Section::Activity,
        }
    }

    /// The 1-based shortcut digit for the section.
    pub fn shortcut(&self) -> char {
        match self {
            Section::Activity => '1',
            Section::Info => '2',
        }
    }

    /// Look up a section by its shortcut digit.
    pub fn from_shortcut(c: char) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.shortcut() == c)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Activity => write!(f, "activity"),
            Section::Info => write!(f, "info"),
        }
    }
}
