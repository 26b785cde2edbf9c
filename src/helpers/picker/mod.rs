use std::fmt::Display;

use anyhow::{Context, Result};
use termenu::{Item, Menu};

/// fzf-like single choice over a list of displayable values.
pub struct Picker<T> {
    title: String,
    items: Vec<T>,
}

impl<T> Picker<T>
where
    T: Display + Clone,
{
    pub fn new(title: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    /// Show the menu; `Ok(None)` when the user cancels.
    pub fn pick(&self) -> Result<Option<T>> {
        let mut menu = Menu::new().context("init menu")?;

        let list: Vec<Item<usize>> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| Item::new(&item.to_string(), idx))
            .collect();

        let selected = menu
            .set_title(self.title.as_str())
            .add_list(list)
            .select()
            .context("read menu selection")?;

        Ok(selected.and_then(|idx| self.items.get(*idx).cloned()))
    }
}
