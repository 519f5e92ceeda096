// Membership span as stored by the API, plus its conversion into a TimeSpan.

use crate::modules::entities::core::collection::Collection;
use crate::modules::entities::core::entity::Entity;
use crate::modules::entities::core::model::{Attributes, Model, text};
use crate::modules::membership::core::span::{SpanCategory, TimeSpan};
use crate::shared::core::primitives::{date_to_millis, timestamp_to_millis};
use crate::shared::infrastructure::gateway::Gateway;
use serde_json::{Value, json};
use std::sync::Arc;

pub struct SpanModel;

pub type Span = Entity<SpanModel>;

impl Model for SpanModel {
    const NAME: &'static str = "Span";
    const ROOT: &'static str = "/membership/span";
    const ID_KEY: &'static str = "span_id";

    fn defaults() -> Attributes {
        json!({
            "member_id": null,
            "startdate": null,
            "enddate": null,
            "type": "",
            "creation_reason": null,
            "deleted_at": null,
            "created_at": null,
        })
        .as_object()
        .cloned()
        .unwrap_or_default()
    }

    fn delete_confirm_message(span: &Span) -> String {
        format!(
            "Are you sure you want to delete span {}?",
            span.id().map(text).unwrap_or_default()
        )
    }
}

impl Entity<SpanModel> {
    pub fn category(&self) -> Option<SpanCategory> {
        SpanCategory::parse(self.get("type").as_str()?)
    }

    pub fn is_deleted(&self) -> bool {
        !self.get("deleted_at").is_null()
    }

    /// The span as an interval, `None` when dates or type do not parse.
    pub fn time_span(&self) -> Option<TimeSpan> {
        let deleted_at = match self.get("deleted_at") {
            Value::Null => None,
            Value::String(at) => Some(timestamp_to_millis(&at)?),
            _ => return None,
        };
        Some(TimeSpan {
            start: date_to_millis(self.get("startdate").as_str()?)?,
            end: date_to_millis(self.get("enddate").as_str()?)?,
            category: self.category()?,
            deleted_at,
        })
    }
}

/// All spans of one member.
pub fn member_spans(gateway: Arc<dyn Gateway>, member_id: i64) -> Collection<SpanModel> {
    Collection::new(gateway).with_param("member_id", member_id)
}

impl Collection<SpanModel> {
    /// Intervals of every item that converts; unparseable rows are skipped.
    pub fn time_spans(&self) -> Vec<TimeSpan> {
        let spans: Vec<TimeSpan> = self.items().iter().filter_map(Span::time_span).collect();
        if spans.len() < self.items().len() {
            tracing::warn!(
                skipped = self.items().len() - spans.len(),
                "spans with unparseable dates or type"
            );
        }
        spans
    }
}
