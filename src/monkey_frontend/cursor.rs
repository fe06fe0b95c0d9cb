use super::span::CodePosition;
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    char_iterator: Peekable<CharIndices<'src>>,
    position: CodePosition,
}

impl<'src> Cursor<'src> {
    /// Creates a character stream for the source string.
    pub fn new(source: &'src str) -> Self {
        Cursor {
            source,
            char_iterator: source.char_indices().peekable(),
            position: CodePosition::new(0, 1, 1),
        }
    }

    /// Position of the cursor.
    pub fn get_position(&self) -> CodePosition {
        self.position
    }

    /// Byte offset of the next character, or the source length at the end.
    pub fn byte_pos(&mut self) -> usize {
        self.peek()
            .map(|(idx, _)| idx)
            .unwrap_or(self.source.len())
    }

    /// Peeks the next character without consuming it.
    pub fn peek(&mut self) -> Option<(usize, char)> {
        self.char_iterator.peek().copied()
    }

    /// Consumes the next character.
    pub fn take(&mut self) -> Option<(usize, char)> {
        let (byte_idx, ch) = self.char_iterator.next()?;

        self.position.byte_pos = self.byte_pos();
        if ch == '\n' {
            self.position.line_no += 1;
            self.position.column_no = 1;
        } else {
            self.position.column_no += 1;
        }

        Some((byte_idx, ch))
    }

    /// Consumes the next character if it equals target char.
    pub fn take_if(&mut self, target: char) -> bool {
        match self.peek() {
            Some((_, ch)) if ch == target => {
                self.take();
                true
            }
            _ => false,
        }
    }

    /// Consumes next characters as long as they meet condition.
    /// At the end, the next character fails condition.
    pub fn take_while<F>(&mut self, condition: F)
    where
        F: Fn(char) -> bool,
    {
        while let Some((_, ch)) = self.peek() {
            if !condition(ch) {
                break;
            }
            self.take();
        }
    }

    /// Consumes next characters as long as they do not meet condition.
    /// At the end, the next character meets condition.
    pub fn take_until<F>(&mut self, condition: F)
    where
        F: Fn(char) -> bool,
    {
        self.take_while(|ch| !condition(ch));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_tracking() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.take_until(|ch| ch == '\n');
        assert_eq!(cursor.get_position(), CodePosition::new(2, 1, 3));

        assert!(cursor.take_if('\n'));
        assert_eq!(cursor.get_position(), CodePosition::new(3, 2, 1));

        cursor.take_while(|ch| ch.is_ascii_alphabetic());
        assert_eq!(cursor.byte_pos(), 5);
        assert_eq!(cursor.take(), None);
    }
}
