//! Inline edit session for a task's name or due date.

/// Which task field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    /// The task name.
    Name,
    /// The due date, as `YYYY-MM-DD` text (empty clears it).
    DueDate,
}

/// Signals that end an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSignal {
    /// The confirm key (Enter) was pressed.
    Confirm,
    /// The input reported a changed value.
    Changed,
    /// The input lost focus.
    Blur,
}

/// Single-line text input with a cursor.
///
/// The cursor is a character index, so multi-byte input is safe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    /// Creates an input holding `text` with the cursor at the end.
    #[must_use]
    pub fn new(text: String) -> Self {
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Takes the text, leaving the input empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Inserts a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_offset(self.cursor);
            self.text.remove(at);
        }
    }

    /// Moves the cursor one character left.
    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor one character right.
    pub fn move_right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the start.
    pub const fn home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end.
    pub fn end(&mut self) {
        self.cursor = self.text.chars().count();
    }
}

/// An in-progress inline edit of one task field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    index: usize,
    field: EditField,
    input: TextInput,
}

impl EditSession {
    /// Starts editing `field` of the task at `index`, pre-filled with `initial`.
    #[must_use]
    pub fn new(index: usize, field: EditField, initial: String) -> Self {
        Self {
            index,
            field,
            input: TextInput::new(initial),
        }
    }

    /// Index of the task being edited.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Field being edited.
    #[must_use]
    pub const fn field(&self) -> EditField {
        self.field
    }

    /// The draft input.
    #[must_use]
    pub const fn input(&self) -> &TextInput {
        &self.input
    }

    /// Mutable access to the draft input.
    pub const fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    /// Consumes the session, returning the draft text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.input.text
    }
}
