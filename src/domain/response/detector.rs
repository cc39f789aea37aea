//! Structured-vs-prose classification of model output.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::item::{ItemKind, StructuredContent, StructuredItem};

static NUMBERED_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\.\s*\*\*([^*]+)\*\*:\s*(.*)$").expect("numbered title regex is valid")
});
static NUMBERED_SIMPLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\.\s*([^:]+):\s*(.*)$").expect("numbered simple regex is valid")
});
static BULLET_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-*•]\s*\*\*([^*]+)\*\*:\s*(.*)$").expect("bullet title regex is valid")
});
static TITLE_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\*\*([^*]+)\*\*:\s*(.*)$").expect("title only regex is valid")
});
static PLAIN_ENUMERATED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+)\.|[-*•])\s+(.+)$").expect("plain enumerated regex is valid")
});

/// Minimum number of items that makes content structured on its own.
const STRUCTURED_ITEM_COUNT: usize = 3;

/// Complexity threshold, in tenths, above which content is structured.
const STRUCTURED_COMPLEXITY_TENTHS: u32 = 7;

/// Result of classifying a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentClass {
    Prose,
    Structured(StructuredContent),
}

impl ContentClass {
    /// Returns true for structured content.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }
}

/// Signals used for classification.
///
/// The complexity score is kept in integer tenths so that thresholds
/// compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentAnalysis {
    pub item_count: usize,
    pub has_titled_items: bool,
    pub line_count: usize,
    complexity_tenths: u32,
}

impl ContentAnalysis {
    fn new(item_count: usize, has_titled_items: bool, line_count: usize) -> Self {
        let mut tenths = 3 * u32::try_from(item_count).unwrap_or(u32::MAX / 3);
        if has_titled_items {
            tenths += 4;
        }
        if line_count > 3 {
            tenths += 3;
        }
        Self {
            item_count,
            has_titled_items,
            line_count,
            complexity_tenths: tenths,
        }
    }

    /// `0.3 * items + 0.4 (titled) + 0.3 (more than three lines)`.
    pub fn complexity_score(&self) -> f64 {
        f64::from(self.complexity_tenths) / 10.0
    }

    /// Returns true if the content should be delivered item by item.
    pub fn is_structured(&self) -> bool {
        self.item_count >= STRUCTURED_ITEM_COUNT
            || self.complexity_tenths > STRUCTURED_COMPLEXITY_TENTHS
    }
}

/// Detects enumerated/titled lists in model output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredContentDetector;

impl StructuredContentDetector {
    pub fn new() -> Self {
        Self
    }

    /// Classifies text as prose or structured content.
    pub fn classify(&self, text: &str) -> ContentClass {
        let content = self.parse(text);
        if self.analyze(text, &content).is_structured() {
            ContentClass::Structured(content)
        } else {
            ContentClass::Prose
        }
    }

    /// Computes the classification signals for already parsed content.
    pub fn analyze(&self, text: &str, content: &StructuredContent) -> ContentAnalysis {
        ContentAnalysis::new(
            content.items.len(),
            content.items.iter().any(|item| item.kind.is_titled()),
            text.lines().count(),
        )
    }

    /// Splits text into intro, items and outro.
    ///
    /// A non-item line continues the open item; a blank line closes it.
    /// Lines after a closed item become outro, unless another item follows,
    /// in which case they are folded into the previous item's details so
    /// that order is preserved.
    pub fn parse(&self, text: &str) -> StructuredContent {
        let mut intro: Vec<&str> = Vec::new();
        let mut pending: Vec<&str> = Vec::new();
        let mut items: Vec<StructuredItem> = Vec::new();
        let mut item_open = false;

        for line in text.lines().map(str::trim) {
            if line.is_empty() {
                item_open = false;
                continue;
            }

            if let Some(item) = match_item(line) {
                if let Some(last) = items.last_mut() {
                    for interstitial in pending.drain(..) {
                        last.append_details(interstitial);
                    }
                }
                items.push(item);
                item_open = true;
                continue;
            }

            match items.last_mut() {
                Some(last) if item_open => last.append_details(line),
                Some(_) => pending.push(line),
                None => intro.push(line),
            }
        }

        StructuredContent {
            intro: intro.join(" "),
            items,
            outro: pending.join(" "),
        }
    }
}

/// Tests the item patterns in priority order.
fn match_item(line: &str) -> Option<StructuredItem> {
    if let Some(caps) = NUMBERED_TITLE.captures(line) {
        return Some(StructuredItem::new(
            ItemKind::NumberedTitle,
            group(&caps, 1),
            group(&caps, 2),
            group(&caps, 3).unwrap_or_default(),
        ));
    }
    if let Some(caps) = NUMBERED_SIMPLE.captures(line) {
        return Some(StructuredItem::new(
            ItemKind::NumberedSimple,
            group(&caps, 1),
            group(&caps, 2),
            group(&caps, 3).unwrap_or_default(),
        ));
    }
    if let Some(caps) = BULLET_TITLE.captures(line) {
        return Some(StructuredItem::new(
            ItemKind::BulletTitle,
            None,
            group(&caps, 1),
            group(&caps, 2).unwrap_or_default(),
        ));
    }
    if let Some(caps) = TITLE_ONLY.captures(line) {
        return Some(StructuredItem::new(
            ItemKind::TitleOnly,
            None,
            group(&caps, 1),
            group(&caps, 2).unwrap_or_default(),
        ));
    }
    if let Some(caps) = PLAIN_ENUMERATED.captures(line) {
        return Some(StructuredItem::new(
            ItemKind::Plain,
            group(&caps, 1),
            None,
            group(&caps, 2).unwrap_or_default(),
        ));
    }
    None
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> Option<&'t str> {
    caps.get(index).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLANS: &str = "Temos três planos para você:\n\
        1. **Essencial**: atendimento automático no WhatsApp\n\
        2. **Profissional**: inclui agendamento\n\
        3. **Premium**: integrações sob medida\n\
        \n\
        Qual faz mais sentido para sua loja?";

    mod patterns {
        use super::*;

        #[test]
        fn numbered_title_takes_priority_over_numbered_simple() {
            let item = match_item("1. **Plano**: detalhes").unwrap();
            assert_eq!(item.kind, ItemKind::NumberedTitle);
            assert_eq!(item.ordinal.as_deref(), Some("1"));
            assert_eq!(item.title.as_deref(), Some("Plano"));
            assert_eq!(item.details, "detalhes");
        }

        #[test]
        fn numbered_simple() {
            let item = match_item("2. Prazo: 30 dias").unwrap();
            assert_eq!(item.kind, ItemKind::NumberedSimple);
            assert_eq!(item.title.as_deref(), Some("Prazo"));
            assert_eq!(item.details, "30 dias");
        }

        #[test]
        fn bullet_title_with_each_marker() {
            for line in ["- **A**: x", "* **A**: x", "• **A**: x"] {
                let item = match_item(line).unwrap();
                assert_eq!(item.kind, ItemKind::BulletTitle, "line {:?}", line);
                assert_eq!(item.title.as_deref(), Some("A"));
            }
        }

        #[test]
        fn title_only() {
            let item = match_item("**Importante**: sem fidelidade").unwrap();
            assert_eq!(item.kind, ItemKind::TitleOnly);
            assert_eq!(item.details, "sem fidelidade");
        }

        #[test]
        fn plain_enumerated_lines() {
            let numbered = match_item("4. Fale com um especialista").unwrap();
            assert_eq!(numbered.kind, ItemKind::Plain);
            assert_eq!(numbered.ordinal.as_deref(), Some("4"));

            let bullet = match_item("- Sem taxa de adesão").unwrap();
            assert_eq!(bullet.kind, ItemKind::Plain);
            assert_eq!(bullet.ordinal, None);
        }

        #[test]
        fn prose_lines_do_not_match() {
            assert!(match_item("Olá! Como posso ajudar?").is_none());
            assert!(match_item("**Negrito** no meio da frase").is_none());
        }
    }

    mod parse {
        use super::*;

        #[test]
        fn separates_intro_items_and_outro() {
            let content = StructuredContentDetector::new().parse(PLANS);
            assert_eq!(content.intro, "Temos três planos para você:");
            assert_eq!(content.items.len(), 3);
            assert_eq!(content.items[1].title.as_deref(), Some("Profissional"));
            assert_eq!(content.outro, "Qual faz mais sentido para sua loja?");
        }

        #[test]
        fn continuation_lines_extend_open_item() {
            let text = "1. **A**: primeira linha\ncontinua aqui\n2. **B**: outra";
            let content = StructuredContentDetector::new().parse(text);
            assert_eq!(content.items[0].details, "primeira linha continua aqui");
            assert!(content.outro.is_empty());
        }

        #[test]
        fn interstitial_text_is_folded_into_previous_item() {
            let text = "1. **A**: a\n\nobservação solta\n\n2. **B**: b";
            let content = StructuredContentDetector::new().parse(text);
            assert_eq!(content.items.len(), 2);
            assert_eq!(content.items[0].details, "a observação solta");
            assert!(content.outro.is_empty());
        }

        #[test]
        fn multi_line_intro_is_joined() {
            let text = "Olá!\nSeguem as opções:\n1. **A**: a";
            let content = StructuredContentDetector::new().parse(text);
            assert_eq!(content.intro, "Olá! Seguem as opções:");
        }
    }

    mod classify {
        use super::*;

        #[test]
        fn three_titled_items_are_structured_in_order() {
            let text = "1. **Um**: a\n2. **Dois**: b\n3. **Três**: c";
            match StructuredContentDetector::new().classify(text) {
                ContentClass::Structured(content) => {
                    let titles: Vec<_> = content
                        .items
                        .iter()
                        .map(|i| i.title.clone().unwrap())
                        .collect();
                    assert_eq!(titles, vec!["Um", "Dois", "Três"]);
                }
                ContentClass::Prose => panic!("expected structured content"),
            }
        }

        #[test]
        fn plain_prose_is_prose() {
            let text = "Claro! Posso te ajudar com isso. Me conta mais sobre o seu negócio?";
            assert_eq!(StructuredContentDetector::new().classify(text), ContentClass::Prose);
        }

        #[test]
        fn two_untitled_items_in_short_text_are_prose() {
            // 0.6, no titles, two lines.
            let text = "1. Prazo: 30 dias\n2. Custo: zero";
            assert!(!StructuredContentDetector::new().classify(text).is_structured());
        }

        #[test]
        fn two_titled_items_exceed_complexity_threshold() {
            // 0.6 + 0.4 = 1.0
            let text = "**A**: a\n**B**: b";
            assert!(StructuredContentDetector::new().classify(text).is_structured());
        }

        #[test]
        fn single_titled_item_in_short_text_is_exactly_at_threshold() {
            // 0.3 + 0.4 = 0.7, which is not above the threshold.
            let text = "**Nota**: sem fidelidade";
            assert!(!StructuredContentDetector::new().classify(text).is_structured());
        }

        #[test]
        fn single_titled_item_in_long_text_is_structured() {
            // 0.3 + 0.4 + 0.3 = 1.0
            let text = "Oi!\nTudo bem?\nSegue:\n**Nota**: sem fidelidade";
            assert!(StructuredContentDetector::new().classify(text).is_structured());
        }

        #[test]
        fn complexity_score_reports_tenths() {
            let detector = StructuredContentDetector::new();
            let content = detector.parse(PLANS);
            let analysis = detector.analyze(PLANS, &content);
            assert_eq!(analysis.item_count, 3);
            assert!(analysis.has_titled_items);
            assert!((analysis.complexity_score() - 1.6).abs() < 1e-9);
        }
    }
}
