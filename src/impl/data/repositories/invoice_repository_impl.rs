use crate::{
    data::{
        datasources::key_value_datasource::{KeyValueDatasource, SharedDatasource},
        models::invoice_model::InvoiceModel,
    },
    domain::repositories::invoice_repository::InvoiceRepository,
    entities::{EntityId, Invoice, InvoiceId},
    errors::GestorError,
};

pub(crate) const INVOICES_KEY: &str = "gestor_invoices";

pub(crate) struct InvoiceRepositoryImpl<DS: KeyValueDatasource> {
    datasource: SharedDatasource<DS>,
}

impl<DS: KeyValueDatasource> InvoiceRepositoryImpl<DS> {
    pub(crate) fn new(datasource: SharedDatasource<DS>) -> Self {
        Self { datasource }
    }

    fn load_all(&self) -> Result<Vec<Invoice>, GestorError> {
        let raw = match self.datasource.lock().get_item(INVOICES_KEY) {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        let models: Vec<InvoiceModel> =
            serde_json::from_str(&raw).map_err(|source| GestorError::InvalidJson {
                collection: INVOICES_KEY,
                source,
            })?;
        models.into_iter().map(Invoice::try_from).collect()
    }

    fn store_all(&self, invoices: &[Invoice]) -> Result<(), GestorError> {
        let models: Vec<InvoiceModel> = invoices.iter().map(InvoiceModel::from).collect();
        let raw = serde_json::to_string(&models).map_err(|source| GestorError::InvalidJson {
            collection: INVOICES_KEY,
            source,
        })?;
        self.datasource.lock().set_item(INVOICES_KEY, raw);
        Ok(())
    }
}

impl<DS: KeyValueDatasource> InvoiceRepository for InvoiceRepositoryImpl<DS> {
    fn list(&self) -> Result<Vec<Invoice>, GestorError> {
        self.load_all()
    }

    fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, GestorError> {
        Ok(self.load_all()?.into_iter().find(|i| &i.id == id))
    }

    fn find_by_entity(&self, entity_id: &EntityId) -> Result<Vec<Invoice>, GestorError> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|i| &i.entity_id == entity_id)
            .collect())
    }

    fn save(&self, invoice: &Invoice) -> Result<(), GestorError> {
        let mut all = self.load_all()?;
        match all.iter_mut().find(|i| i.id == invoice.id) {
            Some(existing) => *existing = invoice.clone(),
            None => all.push(invoice.clone()),
        }
        self.store_all(&all)
    }

    fn delete(&self, id: &InvoiceId) -> Result<(), GestorError> {
        let mut all = self.load_all()?;
        all.retain(|i| &i.id != id);
        self.store_all(&all)
    }

    fn delete_by_entity(&self, entity_id: &EntityId) -> Result<usize, GestorError> {
        let mut all = self.load_all()?;
        let before = all.len();
        all.retain(|i| &i.entity_id != entity_id);
        let removed = before - all.len();
        self.store_all(&all)?;
        Ok(removed)
    }
}
