use serde::Serialize;

/// A roster worker. Owned by the roster; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worker {
    pub id: String,    // ⇔ workers.id
    pub name: String,  // ⇔ workers.name
    pub shift: String, // ⇔ workers.shift (free label, e.g. "A", "night")
    pub active: bool,  // ⇔ workers.active (INT 0/1)
}

impl Worker {
    pub fn new(id: &str, name: &str, shift: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            shift: shift.to_string(),
            active: true,
        }
    }
}
