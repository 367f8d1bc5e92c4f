use crate::Sender;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetViewModel {
    pub open: bool,
    pub toggle_active: bool,
    pub pending: bool,
    pub input: String,
    /// Transcript top to bottom; ends with `EntryView::Typing` iff `pending`.
    pub entries: Vec<EntryView>,
    pub dirty: bool,
}

impl WidgetViewModel {
    pub fn typing_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, EntryView::Typing))
            .count()
    }

    pub fn messages(&self) -> impl Iterator<Item = (&str, Sender)> {
        self.entries.iter().filter_map(|entry| match entry {
            EntryView::Message { text, sender } => Some((text.as_str(), *sender)),
            EntryView::Typing => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryView {
    Message { text: String, sender: Sender },
    Typing,
}
