// Member of the makerspace.

use crate::modules::entities::core::entity::Entity;
use crate::modules::entities::core::model::{Attributes, Model};
use serde_json::{Value, json};

pub struct MemberModel;

pub type Member = Entity<MemberModel>;

impl Model for MemberModel {
    const NAME: &'static str = "Member";
    const ROOT: &'static str = "/membership/member";
    const ID_KEY: &'static str = "member_id";

    fn defaults() -> Attributes {
        json!({
            "member_number": null,
            "firstname": "",
            "lastname": "",
            "email": "",
            "phone": "",
            "address_street": "",
            "address_extra": "",
            "address_zipcode": null,
            "address_city": "",
            "address_country": "se",
            "civicregno": "",
            "created_at": null,
            "updated_at": null,
        })
        .as_object()
        .cloned()
        .unwrap_or_default()
    }

    fn delete_confirm_message(member: &Member) -> String {
        format!(
            "Are you sure you want to delete member #{} {}?",
            member.get_text("member_number"),
            member.full_name()
        )
    }
}

impl Entity<MemberModel> {
    pub fn member_number(&self) -> Option<i64> {
        self.get("member_number").as_i64()
    }

    pub fn firstname(&self) -> String {
        self.get_text("firstname")
    }

    pub fn set_firstname(&mut self, firstname: impl Into<String>) {
        self.write("firstname", Value::String(firstname.into()));
    }

    pub fn lastname(&self) -> String {
        self.get_text("lastname")
    }

    pub fn set_lastname(&mut self, lastname: impl Into<String>) {
        self.write("lastname", Value::String(lastname.into()));
    }

    pub fn email(&self) -> String {
        self.get_text("email")
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.write("email", Value::String(email.into()));
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname(), self.lastname())
            .trim()
            .to_string()
    }
}
