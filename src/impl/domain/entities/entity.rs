use super::ids::EntityId;

/// Counterparty kind. Immutable once the entity has been created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Client,
    Supplier,
}

/// A client or supplier counterparty. Invoices reference entities by id; the
/// entity itself holds no back-collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub entity_type: EntityType,
    pub name: String,
    /// Spanish NIF/CIF. Format-checked at the save boundary.
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
}

impl Entity {
    pub fn new(entity_type: EntityType, name: impl Into<String>) -> Self {
        Self {
            id: EntityId::random(),
            entity_type,
            name: name.into(),
            tax_id: None,
            address: None,
            city: None,
            postal_code: None,
            email: None,
            phone: None,
            contact_person: None,
            notes: None,
        }
    }
}
