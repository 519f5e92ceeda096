// Minimal entity declaration for exercising the generic entity model in tests.

use crate::modules::entities::core::entity::Entity;
use crate::modules::entities::core::model::{Attributes, Model};
use serde_json::json;

pub const THING_ROOT: &str = "/things";

pub struct ThingModel;

pub type Thing = Entity<ThingModel>;

impl Model for ThingModel {
    const NAME: &'static str = "Thing";
    const ROOT: &'static str = THING_ROOT;
    const ID_KEY: &'static str = "thing_id";

    fn defaults() -> Attributes {
        json!({"name": "", "size": 0})
            .as_object()
            .cloned()
            .unwrap_or_default()
    }

    fn delete_confirm_message(entity: &Thing) -> String {
        format!("Delete thing {}?", entity.get_text("name"))
    }
}
