//! Alert kinds recognized in `> [!KIND]` tags.

use crate::icons::icon_svg;

/// GitHub alert kind.
///
/// The set is closed: only the five GitHub spellings are recognized and the
/// tag must be written in upper case (`[!NOTE]`, not `[!note]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Important,
    Note,
    Tip,
    Warning,
    Caution,
}

impl AlertKind {
    /// All kinds in tag-table order.
    pub const ALL: [Self; 5] = [
        Self::Important,
        Self::Note,
        Self::Tip,
        Self::Warning,
        Self::Caution,
    ];

    /// Parse the word inside `[!...]`.
    ///
    /// Matching is case-sensitive on the upper-case spellings.
    ///
    /// ```
    /// use alertmark_renderer::AlertKind;
    ///
    /// assert_eq!(AlertKind::from_tag("TIP"), Some(AlertKind::Tip));
    /// assert_eq!(AlertKind::from_tag("tip"), None);
    /// assert_eq!(AlertKind::from_tag("DANGER"), None);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "IMPORTANT" => Some(Self::Important),
            "NOTE" => Some(Self::Note),
            "TIP" => Some(Self::Tip),
            "WARNING" => Some(Self::Warning),
            "CAUTION" => Some(Self::Caution),
            _ => None,
        }
    }

    /// Lower-case name, used in the `markdown-alert-{class}` CSS class.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Important => "important",
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Warning => "warning",
            Self::Caution => "caution",
        }
    }

    /// Display title (class name with the first letter capitalized).
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Important => "Important",
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Warning => "Warning",
            Self::Caution => "Caution",
        }
    }

    /// Octicon name shown next to the title.
    #[must_use]
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Important => "report",
            Self::Note => "info",
            Self::Tip => "light-bulb",
            Self::Warning => "alert",
            Self::Caution => "stop",
        }
    }

    /// Inline SVG markup for this kind's icon.
    #[must_use]
    pub fn icon(self) -> &'static str {
        // icon_name() only yields names present in the icon table.
        icon_svg(self.icon_name()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_all_kinds() {
        for kind in AlertKind::ALL {
            let tag = kind.class().to_uppercase();
            assert_eq!(AlertKind::from_tag(&tag), Some(kind));
        }
    }

    #[test]
    fn test_from_tag_is_case_sensitive() {
        assert_eq!(AlertKind::from_tag("Note"), None);
        assert_eq!(AlertKind::from_tag("note"), None);
        assert_eq!(AlertKind::from_tag(" NOTE"), None);
    }

    #[test]
    fn test_from_tag_unknown() {
        assert_eq!(AlertKind::from_tag("DANGER"), None);
        assert_eq!(AlertKind::from_tag(""), None);
    }

    #[test]
    fn test_title_capitalizes_class() {
        for kind in AlertKind::ALL {
            let class = kind.class();
            let expected = format!("{}{}", class[..1].to_uppercase(), &class[1..]);
            assert_eq!(kind.title(), expected);
        }
    }

    #[test]
    fn test_icon_table() {
        assert_eq!(AlertKind::Important.icon_name(), "report");
        assert_eq!(AlertKind::Note.icon_name(), "info");
        assert_eq!(AlertKind::Tip.icon_name(), "light-bulb");
        assert_eq!(AlertKind::Warning.icon_name(), "alert");
        assert_eq!(AlertKind::Caution.icon_name(), "stop");
    }

    #[test]
    fn test_every_kind_has_icon() {
        for kind in AlertKind::ALL {
            assert!(kind.icon().starts_with("<svg"), "{kind:?} has no icon");
        }
    }
}
