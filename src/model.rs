//! Fruit records and the payloads that create and replace them.

use document_store::{Document, DocumentId};
use serde::{Deserialize, Serialize};

/// A stored fruit.
///
/// # Store
/// This struct implements [`Document`], so it can live in a
/// [`Collection`](document_store::Collection). The id is assigned on insert and
/// never changes; every other field is replaced wholesale by an update.
///
/// Serialized field names match the JSON clients see: `_id`, `name`, `color`, `readyToEat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
    pub color: String,
    #[serde(rename = "readyToEat")]
    pub ready_to_eat: bool,
}

/// Everything about a fruit except its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FruitFields {
    pub name: String,
    pub color: String,
    pub ready_to_eat: bool,
}

impl FruitFields {
    pub fn new(name: impl Into<String>, color: impl Into<String>, ready_to_eat: bool) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            ready_to_eat,
        }
    }
}

impl Document for Fruit {
    type Fields = FruitFields;

    fn from_fields(id: DocumentId, fields: FruitFields) -> Self {
        Self {
            id,
            name: fields.name,
            color: fields.color,
            ready_to_eat: fields.ready_to_eat,
        }
    }

    fn id(&self) -> DocumentId {
        self.id
    }

    fn replace(&mut self, fields: FruitFields) {
        self.name = fields.name;
        self.color = fields.color;
        self.ready_to_eat = fields.ready_to_eat;
    }
}

/// The URL-encoded body posted by the new and edit forms.
///
/// `readyToEat` comes from a checkbox: browsers send `on` when it is ticked and
/// omit the field otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FruitForm {
    pub name: String,
    pub color: String,
    pub ready_to_eat: Option<String>,
}

/// A form body that cannot be read as a fruit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("field {0:?} was given more than once")]
    RepeatedField(String),
}

impl FruitForm {
    /// Parses `application/x-www-form-urlencoded` bytes.
    ///
    /// Missing fields are empty and unknown fields are ignored. A repeated
    /// `readyToEat` is kept as one comma-joined value, which never reads as
    /// ticked. A repeated `name` or `color` is an error.
    pub fn from_urlencoded(body: &[u8]) -> Result<Self, FormError> {
        let mut name = None;
        let mut color = None;
        let mut ready: Vec<String> = Vec::new();

        for (key, value) in url::form_urlencoded::parse(body) {
            let slot = match key.as_ref() {
                "name" => &mut name,
                "color" => &mut color,
                "readyToEat" => {
                    ready.push(value.into_owned());
                    continue;
                }
                _ => continue,
            };
            if slot.replace(value.into_owned()).is_some() {
                return Err(FormError::RepeatedField(key.into_owned()));
            }
        }

        Ok(Self {
            name: name.unwrap_or_default(),
            color: color.unwrap_or_default(),
            ready_to_eat: (!ready.is_empty()).then(|| ready.join(",")),
        })
    }

    /// Applies the checkbox rule: exactly `on` is true, anything else is false.
    pub fn into_fields(self) -> FruitFields {
        let ready_to_eat = self.ready_to_eat.as_deref() == Some("on");
        FruitFields::new(self.name, self.color, ready_to_eat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(ready_to_eat: Option<&str>) -> FruitForm {
        FruitForm {
            name: "Kiwi".into(),
            color: "green".into(),
            ready_to_eat: ready_to_eat.map(str::to_string),
        }
    }

    #[test]
    fn test_checkbox_on_means_ready() {
        assert!(form(Some("on")).into_fields().ready_to_eat);
    }

    #[test]
    fn test_anything_but_on_means_not_ready() {
        for value in [None, Some(""), Some("true"), Some("ON"), Some("off")] {
            assert!(!form(value).into_fields().ready_to_eat, "{value:?}");
        }
    }

    #[test]
    fn test_parse_ticked_form() {
        let form = FruitForm::from_urlencoded(b"name=Blood+Orange&color=red&readyToEat=on").unwrap();
        assert_eq!(form.name, "Blood Orange");
        assert_eq!(form.color, "red");
        assert!(form.into_fields().ready_to_eat);
    }

    #[test]
    fn test_parse_missing_fields_as_empty() {
        let form = FruitForm::from_urlencoded(b"_method=PUT&extra=1").unwrap();
        assert_eq!(form, FruitForm::default());
        assert_eq!(FruitForm::from_urlencoded(b"").unwrap(), FruitForm::default());
    }

    #[test]
    fn test_repeated_checkbox_is_not_ready() {
        let form = FruitForm::from_urlencoded(b"name=Kiwi&readyToEat=on&readyToEat=on").unwrap();
        assert_eq!(form.ready_to_eat.as_deref(), Some("on,on"));
        assert!(!form.into_fields().ready_to_eat);
    }

    #[test]
    fn test_repeated_name_is_rejected() {
        assert_eq!(
            FruitForm::from_urlencoded(b"name=Kiwi&color=green&name=Lime"),
            Err(FormError::RepeatedField("name".into()))
        );
    }

    #[test]
    fn test_fruit_json_uses_client_field_names() {
        let id: DocumentId = "67e5504410b1426f9247bb680e5fe0c8".parse().unwrap();
        let fruit = Fruit::from_fields(id, FruitFields::new("Kiwi", "green", true));
        let json = serde_json::to_value(&fruit).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "_id": "67e5504410b1426f9247bb680e5fe0c8",
                "name": "Kiwi",
                "color": "green",
                "readyToEat": true,
            })
        );
    }

    #[test]
    fn test_replace_keeps_id() {
        let mut fruit = Fruit::from_fields(
            DocumentId::generate(),
            FruitFields::new("Kiwi", "green", false),
        );
        let id = fruit.id;
        fruit.replace(FruitFields::new("Gold Kiwi", "yellow", true));
        assert_eq!(fruit.id, id);
        assert_eq!(fruit.name, "Gold Kiwi");
        assert!(fruit.ready_to_eat);
    }
}
