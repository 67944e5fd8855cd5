use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a stored address. Opaque to clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(pub String);

impl AddressId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AddressId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AddressId>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub spouse: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub street_1: String,
    #[serde(default)]
    pub street_2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub home_phone: String,
    #[serde(default)]
    pub mobile_phone: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub children: String,
    #[serde(default)]
    pub label_name: String,
    #[serde(default)]
    pub send_christmas_card: bool,
}

impl Address {
    /// "first last", the string name searches and duplicate checks run against.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn same_name_as(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }

    pub fn text_field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            "spouse" => &self.spouse,
            "email_address" => &self.email_address,
            "street_1" => &self.street_1,
            "street_2" => &self.street_2,
            "city" => &self.city,
            "state" => &self.state,
            "zip" => &self.zip,
            "country" => &self.country,
            "home_phone" => &self.home_phone,
            "mobile_phone" => &self.mobile_phone,
            "relationship" => &self.relationship,
            "title" => &self.title,
            "children" => &self.children,
            "label_name" => &self.label_name,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn text_field_mut(&mut self, name: &str) -> Option<&mut String> {
        let value = match name {
            "first_name" => &mut self.first_name,
            "last_name" => &mut self.last_name,
            "spouse" => &mut self.spouse,
            "email_address" => &mut self.email_address,
            "street_1" => &mut self.street_1,
            "street_2" => &mut self.street_2,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "zip" => &mut self.zip,
            "country" => &mut self.country,
            "home_phone" => &mut self.home_phone,
            "mobile_phone" => &mut self.mobile_phone,
            "relationship" => &mut self.relationship,
            "title" => &mut self.title,
            "children" => &mut self.children,
            "label_name" => &mut self.label_name,
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    CheckBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
        }
    }

    pub fn label(&self) -> String {
        field_label(self.name)
    }
}

const CREATION_FIELDS: [FieldSpec; 17] = [
    FieldSpec::text("first_name"),
    FieldSpec::text("last_name"),
    FieldSpec::text("spouse"),
    FieldSpec::text("email_address"),
    FieldSpec::text("street_1"),
    FieldSpec::text("street_2"),
    FieldSpec::text("city"),
    FieldSpec::text("state"),
    FieldSpec::text("zip"),
    FieldSpec::text("country"),
    FieldSpec::text("home_phone"),
    FieldSpec::text("mobile_phone"),
    FieldSpec::text("relationship"),
    FieldSpec::text("title"),
    FieldSpec::text("children"),
    FieldSpec::text("label_name"),
    FieldSpec {
        name: "send_christmas_card",
        kind: FieldKind::CheckBox,
    },
];

const CHRISTMAS_FIELDS: [FieldSpec; 7] = [
    FieldSpec::text("label_name"),
    FieldSpec::text("street_1"),
    FieldSpec::text("street_2"),
    FieldSpec::text("city"),
    FieldSpec::text("state"),
    FieldSpec::text("zip"),
    FieldSpec::text("country"),
];

/// Every editable field of an address, in form and export order.
pub fn creation_fields() -> &'static [FieldSpec] {
    &CREATION_FIELDS
}

/// Columns of the Christmas-card mailing export.
pub fn christmas_fields() -> &'static [FieldSpec] {
    &CHRISTMAS_FIELDS
}

/// Human label for a snake_case field name: `street_1` -> `Street 1`.
pub fn field_label(name: &str) -> String {
    name.split('_')
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let mut chars = piece.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
