// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Single-choice dropdown state.
//!
//! The widget never stores the selected value. Its owner passes the current
//! value and the item list into every call and applies whatever
//! [`SelectEvent::Chosen`] comes back.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub value: String,
    pub label: String,
}

impl SelectItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectPhase {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEvent {
    Opened,
    Closed,
    Chosen(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlledSelect {
    phase: SelectPhase,
    highlighted: usize,
}

impl ControlledSelect {
    pub const fn new() -> Self {
        Self {
            phase: SelectPhase::Closed,
            highlighted: 0,
        }
    }

    pub const fn phase(&self) -> SelectPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == SelectPhase::Open
    }

    pub fn toggle(&mut self, current: Option<&str>, items: &[SelectItem]) -> SelectEvent {
        match self.phase {
            SelectPhase::Closed => {
                self.phase = SelectPhase::Open;
                self.highlighted = current
                    .and_then(|value| items.iter().position(|item| item.value == value))
                    .unwrap_or(0);
                SelectEvent::Opened
            }
            SelectPhase::Open => {
                self.phase = SelectPhase::Closed;
                SelectEvent::Closed
            }
        }
    }

    /// Closes without choosing. `None` when already closed.
    pub fn dismiss(&mut self) -> Option<SelectEvent> {
        if !self.is_open() {
            return None;
        }
        self.phase = SelectPhase::Closed;
        Some(SelectEvent::Closed)
    }

    /// Picks `item` while open. Re-picking the current value still emits.
    pub fn choose(&mut self, item: &SelectItem) -> Option<SelectEvent> {
        if !self.is_open() {
            return None;
        }
        self.phase = SelectPhase::Closed;
        Some(SelectEvent::Chosen(item.value.clone()))
    }

    pub fn choose_highlighted(&mut self, items: &[SelectItem]) -> Option<SelectEvent> {
        let index = self.highlighted(items)?;
        self.choose(&items[index])
    }

    pub fn move_highlight(&mut self, delta: isize, items: &[SelectItem]) {
        if items.is_empty() {
            self.highlighted = 0;
            return;
        }
        let last = items.len() as isize - 1;
        let current = self.highlighted.min(items.len() - 1) as isize;
        self.highlighted = (current + delta).clamp(0, last) as usize;
    }

    /// Highlight position clamped to the list the owner supplies now.
    pub fn highlighted(&self, items: &[SelectItem]) -> Option<usize> {
        if items.is_empty() {
            return None;
        }
        Some(self.highlighted.min(items.len() - 1))
    }

    /// Label for the closed control. Falls back to `placeholder` when there is
    /// no value or the value is not in the current list.
    pub fn display_label<'a>(
        current: Option<&str>,
        items: &'a [SelectItem],
        placeholder: &'a str,
    ) -> &'a str {
        current
            .and_then(|value| items.iter().find(|item| item.value == value))
            .map_or(placeholder, |item| item.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{ControlledSelect, SelectEvent, SelectItem, SelectPhase};

    fn teams() -> Vec<SelectItem> {
        vec![
            SelectItem::new("1", "Flamengo"),
            SelectItem::new("2", "Palmeiras"),
            SelectItem::new("3", "Santos"),
        ]
    }

    #[test]
    fn toggle_opens_and_closes() {
        let mut select = ControlledSelect::new();
        assert_eq!(select.phase(), SelectPhase::Closed);
        assert_eq!(select.toggle(None, &teams()), SelectEvent::Opened);
        assert!(select.is_open());
        assert_eq!(select.toggle(None, &teams()), SelectEvent::Closed);
        assert!(!select.is_open());
    }

    #[test]
    fn choosing_closes_and_emits_exactly_once_even_for_same_value() {
        let items = teams();
        let mut select = ControlledSelect::new();
        let current = Some("2");

        select.toggle(current, &items);
        let events = [select.choose(&items[1])]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        assert_eq!(events, vec![SelectEvent::Chosen("2".to_owned())]);
        assert_eq!(select.phase(), SelectPhase::Closed);
    }

    #[test]
    fn choose_while_closed_emits_nothing() {
        let items = teams();
        let mut select = ControlledSelect::new();
        assert_eq!(select.choose(&items[0]), None);
        assert_eq!(select.phase(), SelectPhase::Closed);
    }

    #[test]
    fn opening_highlights_current_value() {
        let items = teams();
        let mut select = ControlledSelect::new();
        select.toggle(Some("3"), &items);
        assert_eq!(select.highlighted(&items), Some(2));
        select.move_highlight(-1, &items);
        assert_eq!(
            select.choose_highlighted(&items),
            Some(SelectEvent::Chosen("2".to_owned()))
        );
    }

    #[test]
    fn highlight_clamps_when_item_list_shrinks() {
        let items = teams();
        let mut select = ControlledSelect::new();
        select.toggle(Some("3"), &items);
        select.move_highlight(5, &items);
        assert_eq!(select.highlighted(&items), Some(2));

        let shorter = &items[..1];
        assert_eq!(select.highlighted(shorter), Some(0));
        assert_eq!(select.highlighted(&[]), None);
        assert_eq!(select.choose_highlighted(&[]), None);
        assert!(select.is_open());
    }

    #[test]
    fn missing_value_falls_back_to_placeholder() {
        let items = teams();
        assert_eq!(
            ControlledSelect::display_label(Some("2"), &items, "Selecione..."),
            "Palmeiras"
        );
        assert_eq!(
            ControlledSelect::display_label(Some("99"), &items, "Selecione..."),
            "Selecione..."
        );
        assert_eq!(
            ControlledSelect::display_label(Some("1"), &[], "Selecione..."),
            "Selecione..."
        );
        assert_eq!(
            ControlledSelect::display_label(None, &items, "Selecione..."),
            "Selecione..."
        );
    }

    #[test]
    fn dismiss_closes_without_choosing() {
        let mut select = ControlledSelect::new();
        assert_eq!(select.dismiss(), None);
        select.toggle(None, &teams());
        assert_eq!(select.dismiss(), Some(SelectEvent::Closed));
    }
}
