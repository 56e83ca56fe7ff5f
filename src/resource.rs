use serde::{Deserialize, Serialize};

/// One entry of the shared resource pool.
///
/// `total_quantity` is the integer capacity available per day, shared across
/// every task and project assigned to this resource. The pool is a read-only
/// input to the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePoolItem {
    /// Identifier for the resource. Can be a person id, crew name, or
    /// equipment tag.
    pub id: String,
    pub name: String,
    pub total_quantity: i64,
}

impl ResourcePoolItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, total_quantity: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_quantity,
        }
    }
}
