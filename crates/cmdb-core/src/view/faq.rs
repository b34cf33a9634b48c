//! FAQ accordion model.

use crate::faq::FaqMapping;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqItem {
    /// Stable item identifier, `faq-<index>`.
    pub value: String,
    pub question: String,
    pub answer: String,
}

/// Single-expansion collapsible list of FAQ items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FaqList {
    items: Vec<FaqItem>,
    expanded: Option<usize>,
}

impl FaqList {
    pub fn from_mapping(mapping: &FaqMapping) -> Self {
        let items = mapping
            .iter()
            .enumerate()
            .map(|(index, (question, answer))| FaqItem {
                value: format!("faq-{index}"),
                question: question.clone(),
                answer: answer.clone(),
            })
            .collect();
        Self {
            items,
            expanded: None,
        }
    }

    pub fn items(&self) -> &[FaqItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Opens the item at `index`, closing any other; toggling the open item
    /// collapses it. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn expanded(&self) -> Option<&FaqItem> {
        self.expanded.and_then(|index| self.items.get(index))
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded == Some(index)
    }
}
