use crate::shared::*;

pub const MENU_PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption<C> {
    pub label: String,
    pub command: C,
}

impl<C> MenuOption<C> {
    pub fn new(label: impl Into<String>, command: C) -> Self {
        Self {
            label: label.into(),
            command,
        }
    }
}

/// A titled, scrollable list of commands. The visible window always
/// contains the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMenu<C> {
    title: String,
    options: Vec<MenuOption<C>>,
    cursor: usize,
    scroll: usize,
    page_size: usize,
}

impl<C: Clone> ListMenu<C> {
    pub fn new(title: impl Into<String>, options: Vec<MenuOption<C>>) -> Self {
        Self {
            title: title.into(),
            options,
            cursor: 0,
            scroll: 0,
            page_size: MENU_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> &[MenuOption<C>] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.options.len() {
            self.cursor += 1;
        }
        if self.cursor >= self.scroll + self.page_size {
            self.scroll = self.cursor + 1 - self.page_size;
        }
    }

    /// Options currently on screen, with their absolute index.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &MenuOption<C>)> {
        self.options
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(self.page_size)
    }

    pub fn selected(&self) -> Option<&MenuOption<C>> {
        self.options.get(self.cursor)
    }

    pub fn confirm(&self) -> Option<C> {
        self.selected().map(|o| o.command.clone())
    }

    /// Pointer click on an on-screen row.
    pub fn click_row(&mut self, row: usize) -> Option<C> {
        if row >= self.page_size {
            return None;
        }
        let index = self.scroll + row;
        let command = self.options.get(index)?.command.clone();
        self.cursor = index;
        Some(command)
    }

    /// Applies this frame's navigation. Returns the chosen command, if any.
    pub fn drive(&mut self, input: &PlayerInput, pointer: &mut MenuPointer) -> Option<C> {
        if let Some(row) = pointer.take() {
            return self.click_row(row);
        }
        if input.ui_up {
            self.move_up();
        }
        if input.ui_down {
            self.move_down();
        }
        if input.ui_confirm || input.submit {
            return self.confirm();
        }
        None
    }

    pub fn snapshot(&self, footer: impl Into<String>) -> MenuSnapshot {
        MenuSnapshot {
            title: self.title.clone(),
            rows: self.visible().map(|(_, o)| o.label.clone()).collect(),
            cursor_row: self.cursor.checked_sub(self.scroll),
            footer: footer.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> ListMenu<usize> {
        ListMenu::new(
            "Pick",
            (0..n).map(|i| MenuOption::new(format!("Option {i}"), i)).collect(),
        )
    }

    #[test]
    fn test_window_follows_cursor() {
        let mut menu = numbered(10);
        for _ in 0..7 {
            menu.move_down();
        }
        assert_eq!(menu.cursor(), 7);
        assert_eq!(menu.scroll(), 2);
        let visible: Vec<usize> = menu.visible().map(|(i, _)| i).collect();
        assert_eq!(visible, vec![2, 3, 4, 5, 6, 7]);
        for _ in 0..6 {
            menu.move_up();
        }
        assert_eq!(menu.cursor(), 1);
        assert_eq!(menu.scroll(), 1);
    }

    #[test]
    fn test_cursor_clamps_at_ends() {
        let mut menu = numbered(3);
        menu.move_up();
        assert_eq!(menu.cursor(), 0);
        for _ in 0..5 {
            menu.move_down();
        }
        assert_eq!(menu.cursor(), 2);
        assert_eq!(menu.confirm(), Some(2));
    }

    #[test]
    fn test_click_row_maps_through_scroll() {
        let mut menu = numbered(10);
        for _ in 0..8 {
            menu.move_down();
        }
        assert_eq!(menu.click_row(0), Some(3));
        assert_eq!(menu.cursor(), 3);
        assert_eq!(menu.click_row(MENU_PAGE_SIZE), None);
    }

    #[test]
    fn test_drive_prefers_pointer() {
        let mut menu = numbered(4);
        let mut pointer = MenuPointer {
            clicked_row: Some(2),
        };
        let input = PlayerInput {
            ui_down: true,
            ..Default::default()
        };
        assert_eq!(menu.drive(&input, &mut pointer), Some(2));
        assert!(pointer.clicked_row.is_none());
    }

    #[test]
    fn test_empty_menu_confirms_nothing() {
        let menu: ListMenu<u8> = ListMenu::new("Nothing", Vec::new());
        assert_eq!(menu.confirm(), None);
        assert_eq!(menu.snapshot("").rows.len(), 0);
    }
}
