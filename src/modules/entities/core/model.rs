// Model declarations tie a concrete entity type to its remote resource.
//
// Responsibilities
// - Name the resource root, the id attribute and the declared attributes with their defaults.
// - Supply the delete confirmation text. It is a required method so every entity type has one.

use crate::modules::entities::core::entity::Entity;
use serde_json::{Map, Value};

pub type Attributes = Map<String, Value>;

pub trait Model: Sized + Send + Sync + 'static {
    /// Type name used in diagnostics.
    const NAME: &'static str;
    /// Resource root on the gateway, for example `/membership/key`.
    const ROOT: &'static str;
    const ID_KEY: &'static str;

    /// Declared attributes and their default values.
    fn defaults() -> Attributes;

    fn delete_confirm_message(entity: &Entity<Self>) -> String;
}

/// Attribute value as display text; `null` renders empty.
pub fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
