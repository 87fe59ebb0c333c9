use serde_derive::{Deserialize, Serialize};

use crate::{
    entities::{Entity, EntityId, EntityType},
    errors::GestorError,
};

/// Persisted shape of an entity record. Field names stay camelCase so the
/// stored JSON remains compatible with the original collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EntityModel {
    pub id: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub(crate) const TYPE_CLIENT: &str = "CLIENT";
pub(crate) const TYPE_SUPPLIER: &str = "SUPPLIER";

pub(crate) fn entity_type_tag(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Client => TYPE_CLIENT,
        EntityType::Supplier => TYPE_SUPPLIER,
    }
}

pub(crate) fn parse_entity_type(value: &str) -> Result<EntityType, GestorError> {
    match value {
        TYPE_CLIENT => Ok(EntityType::Client),
        TYPE_SUPPLIER => Ok(EntityType::Supplier),
        other => Err(GestorError::UnknownEntityType {
            value: other.to_string(),
        }),
    }
}

impl From<&Entity> for EntityModel {
    fn from(e: &Entity) -> Self {
        Self {
            id: e.id.0.clone(),
            entity_type: entity_type_tag(e.entity_type).to_string(),
            name: e.name.clone(),
            tax_id: e.tax_id.clone(),
            address: e.address.clone(),
            city: e.city.clone(),
            postal_code: e.postal_code.clone(),
            email: e.email.clone(),
            phone: e.phone.clone(),
            contact_person: e.contact_person.clone(),
            notes: e.notes.clone(),
        }
    }
}

impl TryFrom<EntityModel> for Entity {
    type Error = GestorError;

    fn try_from(m: EntityModel) -> Result<Self, Self::Error> {
        Ok(Entity {
            id: EntityId(m.id),
            entity_type: parse_entity_type(&m.entity_type)?,
            name: m.name,
            tax_id: m.tax_id,
            address: m.address,
            city: m.city,
            postal_code: m.postal_code,
            email: m.email,
            phone: m.phone,
            contact_person: m.contact_person,
            notes: m.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_camel_case_json() {
        let json = r#"{
            "id": "1",
            "type": "CLIENT",
            "name": "Empresa Cliente A, S.L.",
            "taxId": "B12345678",
            "postalCode": "28013",
            "contactPerson": "Juan"
        }"#;
        let model: EntityModel = serde_json::from_str(json).unwrap();
        let entity = Entity::try_from(model).unwrap();
        assert_eq!(entity.entity_type, EntityType::Client);
        assert_eq!(entity.postal_code.as_deref(), Some("28013"));
        assert!(entity.address.is_none());

        let out = serde_json::to_value(EntityModel::from(&entity)).unwrap();
        assert_eq!(out["taxId"], "B12345678");
        assert_eq!(out["type"], "CLIENT");
        assert!(out.get("city").is_none());
    }

    #[test]
    fn unknown_type_tag_is_an_error() {
        let json = r#"{ "id": "1", "type": "VENDOR", "name": "x" }"#;
        let model: EntityModel = serde_json::from_str(json).unwrap();
        assert!(Entity::try_from(model).is_err());
    }
}
