use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Proof that a fetch was issued, checked again when its response arrives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: String,
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Per-key request generations
///
/// Each fetch takes a ticket before it starts. When the response arrives only
/// the most recently issued ticket for that key may publish its result, so a
/// slow response can never overwrite data from a newer one.
#[derive(Debug, Default)]
pub struct RequestGenerations {
    counter: AtomicU64,
    latest: Mutex<HashMap<String, u64>>,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier ticket for `key`
    pub fn begin(&self, key: &str) -> FetchTicket {
        let generation = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        latest.insert(key.to_string(), generation);

        FetchTicket { key: key.to_string(), generation }
    }

    /// Whether no newer ticket has been issued for the same key
    pub fn is_latest(&self, ticket: &FetchTicket) -> bool {
        let latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        latest.get(&ticket.key) == Some(&ticket.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let generations = RequestGenerations::new();
        let first = generations.begin("packages:dubai");
        let second = generations.begin("packages:dubai");

        assert!(second.generation() > first.generation());
        assert!(!generations.is_latest(&first));
        assert!(generations.is_latest(&second));
    }

    #[test]
    fn test_keys_are_independent() {
        let generations = RequestGenerations::new();
        let dubai = generations.begin("packages:dubai");
        let bali = generations.begin("packages:bali");

        assert!(generations.is_latest(&dubai));
        assert!(generations.is_latest(&bali));
    }
}
