// RFID key handed out to a member.

use crate::modules::entities::core::entity::Entity;
use crate::modules::entities::core::model::{Attributes, Model};
use serde_json::{Value, json};

pub struct KeyModel;

pub type Key = Entity<KeyModel>;

impl Model for KeyModel {
    const NAME: &'static str = "Key";
    const ROOT: &'static str = "/membership/key";
    const ID_KEY: &'static str = "key_id";

    fn defaults() -> Attributes {
        json!({
            "member_id": null,
            "tagid": "",
            "description": "",
            "created_at": null,
            "updated_at": null,
        })
        .as_object()
        .cloned()
        .unwrap_or_default()
    }

    fn delete_confirm_message(key: &Key) -> String {
        format!("Are you sure you want to delete key {}?", key.tagid())
    }
}

impl Entity<KeyModel> {
    pub fn tagid(&self) -> String {
        self.get_text("tagid")
    }

    pub fn set_tagid(&mut self, tagid: impl Into<String>) {
        self.write("tagid", Value::String(tagid.into()));
    }

    pub fn description(&self) -> String {
        self.get_text("description")
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.write("description", Value::String(description.into()));
    }

    pub fn member_id(&self) -> Option<i64> {
        self.get("member_id").as_i64()
    }

    pub fn set_member_id(&mut self, member_id: Option<i64>) {
        self.write("member_id", member_id.map_or(Value::Null, Value::from));
    }

    pub fn created_at(&self) -> Option<String> {
        self.get("created_at").as_str().map(str::to_string)
    }

    pub fn updated_at(&self) -> Option<String> {
        self.get("updated_at").as_str().map(str::to_string)
    }

    /// A key can be saved once something changed and it has a tag id.
    pub fn can_save(&self) -> bool {
        self.is_dirty() && !self.tagid().trim().is_empty()
    }
}
