use crate::modules::membership::core::span::SpanCategory;
use crate::shared::core::primitives::Millis;
use serde::{Deserialize, Serialize};

/// Contiguous date range assembled from one or more connected spans of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: Millis,
    pub end: Millis,
    pub category: SpanCategory,
}

impl Period {
    pub fn is_historic(&self, now: Millis) -> bool {
        self.end < now
    }

    pub fn contains(&self, instant: Millis) -> bool {
        self.start <= instant && instant <= self.end
    }
}
