use crate::shared::core::primitives::Millis;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanCategory {
    Labaccess,
    Membership,
    SpecialLabaccess,
}

impl SpanCategory {
    pub const ALL: [SpanCategory; 3] = [
        SpanCategory::Labaccess,
        SpanCategory::Membership,
        SpanCategory::SpecialLabaccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpanCategory::Labaccess => "labaccess",
            SpanCategory::Membership => "membership",
            SpanCategory::SpecialLabaccess => "special_labaccess",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        SpanCategory::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for SpanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dated interval of a member's access. `deleted_at` marks a soft-deleted span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: Millis,
    pub end: Millis,
    pub category: SpanCategory,
    pub deleted_at: Option<Millis>,
}
