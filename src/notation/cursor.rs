use std::collections::VecDeque;

/// A rewindable source of whitespace-delimited tokens.
pub trait Cursor {
    fn next_word(&mut self) -> Option<String>;
    /// Returns a token to the front of the stream.
    fn push_back(&mut self, word: String);
    fn peek_word(&mut self) -> Option<String> {
        let word = self.next_word()?;
        self.push_back(word.clone());
        Some(word)
    }
}

/// Tokens of a text held in memory.
#[derive(Debug, Default, Clone)]
pub struct Words {
    queue: VecDeque<String>,
}

impl Words {
    pub fn len(&self) -> usize {
        self.queue.len()
    }
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl From<&str> for Words {
    fn from(text: &str) -> Self {
        Self {
            queue: text.split_whitespace().map(String::from).collect(),
        }
    }
}

impl FromIterator<String> for Words {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            queue: iter.into_iter().collect(),
        }
    }
}

impl Cursor for Words {
    fn next_word(&mut self) -> Option<String> {
        self.queue.pop_front()
    }
    fn push_back(&mut self, word: String) {
        self.queue.push_front(word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewinds() {
        let mut words = Words::from("  Ee2n\tEe3n\n");
        assert_eq!(words.peek_word().as_deref(), Some("Ee2n"));
        assert_eq!(words.next_word().as_deref(), Some("Ee2n"));
        words.push_back("Ee2n".into());
        assert_eq!(words.next_word().as_deref(), Some("Ee2n"));
        assert_eq!(words.next_word().as_deref(), Some("Ee3n"));
        assert_eq!(words.next_word(), None);
        assert!(words.is_empty());
    }
}
