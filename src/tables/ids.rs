// src/tables/ids.rs
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of opaque identifiers for tables, columns, rows and select options.
/// Ids must be unique for the life of the process; callers never derive
/// ordering from them.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}

/// Random v4 UUIDs. Used by the application.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Predictable `prefix-N` ids for tests and fixtures.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIdGenerator {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn new_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_ids_are_unique() {
        let generator = UuidGenerator;
        let ids: HashSet<String> = (0..1000).map(|_| generator.new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn sequential_ids_count_up() {
        let generator = SequentialIdGenerator::new("t");
        assert_eq!(generator.new_id(), "t-1");
        assert_eq!(generator.new_id(), "t-2");
    }
}
