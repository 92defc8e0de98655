use crate::types::{DivisionId, RoomFeatureId, RoomId};
use serde::{Deserialize, Serialize};

/// A named room feature, e.g. "projector" or "wet-lab-bench". Rooms and
/// course room requirements both reference these by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomFeature {
    pub id: RoomFeatureId,
}

impl RoomFeature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RoomFeatureId(name.into()),
        }
    }
}

/// A physical room. Rooms are inherited by class sessions and never
/// reassigned by the search; room selection happens once, during
/// preprocessing, and is out of scope for the evolutionary search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub capacity: u32,
    pub division: DivisionId,
    pub features: Vec<RoomFeatureId>,
}

impl Room {
    pub fn has_feature(&self, feature: &RoomFeatureId) -> bool {
        self.features.contains(feature)
    }
}
