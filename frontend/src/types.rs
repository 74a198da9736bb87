//! Types used by the frontend only.
//!
//! Flow types live in `pipescan-core`; this module holds the toast stack
//! that displays the flow's notices.

use pipescan_core::{Notice, NoticeSeverity};

// =============================================================================
// Toast Types
// =============================================================================

/// A notice on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    /// Stable key for rendering and dismissal
    pub id: u64,
    pub notice: Notice,
    /// Local time the toast appeared (HH:MM:SS)
    pub timestamp: String,
}

impl Toast {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self.notice.severity {
            NoticeSeverity::Normal => "toast",
            NoticeSeverity::Destructive => "toast toast-destructive",
        }
    }
}

/// Bounded stack of visible toasts, oldest first.
#[derive(Clone, Debug)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
    capacity: usize,
}

impl ToastQueue {
    pub fn new(capacity: usize) -> Self {
        Self { toasts: Vec::new(), next_id: 0, capacity }
    }

    /// Show a notice, evicting the oldest toast when full. Returns its id.
    pub fn push(&mut self, notice: Notice, timestamp: String) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, notice, timestamp });
        if self.toasts.len() > self.capacity {
            let excess = self.toasts.len() - self.capacity;
            self.toasts.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = ToastQueue::new(3);
        let first = queue.push(Notice::normal("Analysis complete", "Confidence: 87.0%"), "10:00:00".into());
        let second = queue.push(Notice::destructive("Error", "Failed"), "10:00:01".into());

        assert_ne!(first, second);
        assert_eq!(queue.toasts().len(), 2);
        assert_eq!(queue.toasts()[1].css_class(), "toast toast-destructive");

        queue.dismiss(first);
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].id, second);

        queue.dismiss(first);
        assert_eq!(queue.toasts().len(), 1);
    }

    #[test]
    fn test_oldest_toast_is_evicted() {
        let mut queue = ToastQueue::new(2);
        for i in 0..4 {
            queue.push(Notice::normal(format!("n{}", i), ""), String::new());
        }

        let titles: Vec<_> = queue.toasts().iter().map(|t| t.notice.title.as_str()).collect();
        assert_eq!(titles, vec!["n2", "n3"]);
    }
}
