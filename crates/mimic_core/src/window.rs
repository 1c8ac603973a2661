//! Bounded FIFO of recent interlocutor messages.

use std::collections::VecDeque;

use mimic_constant::markers;

/// Holds at most `capacity` messages, oldest first. Appending past capacity evicts the
/// oldest; [`ContextWindow::flush`] hands out everything and leaves the window empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    messages: VecDeque<String>,
    capacity: usize,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self::new(markers::WINDOW_CAPACITY)
    }
}

impl ContextWindow {
    /// A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// APPEND: insert at the back, evicting from the front when over capacity.
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push_back(message.into());
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    /// FLUSH: snapshot the window in chronological order and clear it.
    pub fn flush(&mut self) -> Vec<String> {
        self.messages.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(ContextWindow::default().capacity(), 3);
        assert_eq!(ContextWindow::new(0).capacity(), 1);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut window = ContextWindow::default();
        for i in 0..10 {
            window.push(format!("m{i}"));
            assert!(window.len() <= 3);
        }
        assert_eq!(window.iter().collect::<Vec<_>>(), vec!["m7", "m8", "m9"]);
    }

    #[test]
    fn test_keeps_order_below_capacity() {
        let mut window = ContextWindow::default();
        window.push("a");
        window.push("b");
        assert_eq!(window.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_flush_clears_entirely() {
        let mut window = ContextWindow::default();
        window.push("a");
        window.push("b");
        window.push("c");
        window.push("d");

        let snapshot = window.flush();
        assert_eq!(snapshot, vec!["b", "c", "d"]);
        assert!(window.is_empty());
        assert!(window.flush().is_empty());
    }
}
