//! Structured list items recognised in model output.

use serde::{Deserialize, Serialize};

/// Shape of a recognised list item, which also selects its render template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// `1. **Title**: details`
    NumberedTitle,
    /// `1. Title: details`
    NumberedSimple,
    /// `**Title**: details`
    TitleOnly,
    /// `- **Title**: details` (also `*` and `•` bullets)
    BulletTitle,
    /// `1. details` or `- details`, no title
    Plain,
}

impl ItemKind {
    /// Returns true for kinds that carry a bold title.
    pub fn is_titled(&self) -> bool {
        matches!(self, Self::NumberedTitle | Self::BulletTitle | Self::TitleOnly)
    }
}

/// One enumerated entry of structured content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub details: String,
    pub kind: ItemKind,
}

impl StructuredItem {
    /// Creates an item of the given kind.
    pub fn new(
        kind: ItemKind,
        ordinal: Option<&str>,
        title: Option<&str>,
        details: &str,
    ) -> Self {
        Self {
            ordinal: ordinal.map(|o| o.trim().to_string()),
            title: title.map(|t| t.trim().to_string()),
            details: details.trim().to_string(),
            kind,
        }
    }

    /// Appends a continuation line to the details, space separated.
    pub fn append_details(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if !self.details.is_empty() {
            self.details.push(' ');
        }
        self.details.push_str(line);
    }

    /// Renders the item as one outbound message using its kind's template.
    pub fn render(&self) -> String {
        let ordinal = self.ordinal.as_deref().unwrap_or_default();
        let title = self.title.as_deref().unwrap_or_default();
        let details = &self.details;

        let rendered = match self.kind {
            ItemKind::NumberedTitle => format!("{}. **{}**: {}", ordinal, title, details),
            ItemKind::NumberedSimple => format!("{}. {}: {}", ordinal, title, details),
            ItemKind::TitleOnly => format!("**{}**: {}", title, details),
            ItemKind::BulletTitle => format!("• **{}**: {}", title, details),
            ItemKind::Plain => match &self.ordinal {
                Some(n) => format!("{}. {}", n, details),
                None => format!("• {}", details),
            },
        };
        rendered.trim_end().to_string()
    }
}

/// Text split into the part before the list, the items, and the part after.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredContent {
    pub intro: String,
    pub items: Vec<StructuredItem>,
    pub outro: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod render {
        use super::*;

        #[test]
        fn numbered_title_template() {
            let item = StructuredItem::new(ItemKind::NumberedTitle, Some("1"), Some("Essencial"), "R$ 99/mês");
            assert_eq!(item.render(), "1. **Essencial**: R$ 99/mês");
        }

        #[test]
        fn numbered_simple_template() {
            let item = StructuredItem::new(ItemKind::NumberedSimple, Some("2"), Some("Pro"), "tudo do básico");
            assert_eq!(item.render(), "2. Pro: tudo do básico");
        }

        #[test]
        fn title_only_template() {
            let item = StructuredItem::new(ItemKind::TitleOnly, None, Some("Nota"), "sem fidelidade");
            assert_eq!(item.render(), "**Nota**: sem fidelidade");
        }

        #[test]
        fn bullet_title_template() {
            let item = StructuredItem::new(ItemKind::BulletTitle, None, Some("Suporte"), "24h");
            assert_eq!(item.render(), "• **Suporte**: 24h");
        }

        #[test]
        fn plain_templates() {
            let numbered = StructuredItem::new(ItemKind::Plain, Some("3"), None, "Agende uma demo");
            let bulleted = StructuredItem::new(ItemKind::Plain, None, None, "Sem taxa de adesão");
            assert_eq!(numbered.render(), "3. Agende uma demo");
            assert_eq!(bulleted.render(), "• Sem taxa de adesão");
        }

        #[test]
        fn empty_details_leave_no_trailing_space() {
            let item = StructuredItem::new(ItemKind::NumberedTitle, Some("1"), Some("Plano"), "");
            assert_eq!(item.render(), "1. **Plano**:");
        }
    }

    #[test]
    fn append_details_joins_with_single_space() {
        let mut item = StructuredItem::new(ItemKind::TitleOnly, None, Some("A"), "first");
        item.append_details("  second  ");
        item.append_details("");
        assert_eq!(item.details, "first second");
    }

    #[test]
    fn titled_kinds() {
        assert!(ItemKind::NumberedTitle.is_titled());
        assert!(ItemKind::BulletTitle.is_titled());
        assert!(ItemKind::TitleOnly.is_titled());
        assert!(!ItemKind::NumberedSimple.is_titled());
        assert!(!ItemKind::Plain.is_titled());
    }

    #[test]
    fn kind_serializes_to_snake_case() {
        let json = serde_json::to_string(&ItemKind::NumberedTitle).unwrap();
        assert_eq!(json, "\"numbered_title\"");
    }
}
