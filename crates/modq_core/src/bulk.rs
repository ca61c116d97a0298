use crate::EntityId;

/// Outcome of a bulk batch after every action has settled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkReport {
    pub succeeded: Vec<EntityId>,
    pub failed: Vec<(EntityId, String)>,
}

impl BulkReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<EntityId> {
        self.failed.iter().map(|(id, _)| *id).collect()
    }
}
