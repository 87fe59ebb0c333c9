use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    data::{
        datasources::{
            key_value_datasource::{KeyValueDatasource, SharedDatasource},
            snapshot_file_datasource::{SnapshotFileDatasource, SnapshotFileDatasourceImpl},
        },
        models::{entity_model::EntityModel, invoice_model::InvoiceModel},
        repositories::{
            entity_repository_impl::ENTITIES_KEY, invoice_repository_impl::INVOICES_KEY,
        },
    },
    entities::{Entity, Invoice},
    errors::GestorError,
};

/// Import/export of the two persisted collections as JSON. Both payloads are
/// validated through the data models before anything is stored, so a
/// malformed snapshot never partially replaces existing data.
#[async_trait]
pub(crate) trait SnapshotUsecase: Send + Sync {
    fn import_string(&self, entities_json: &str, invoices_json: &str) -> Result<(), GestorError>;

    async fn import_file<P>(&self, entities_path: P, invoices_path: P) -> Result<(), GestorError>
    where
        P: AsRef<Path> + Send;

    /// Normalized `(entities_json, invoices_json)` pair.
    fn export_string(&self) -> Result<(String, String), GestorError>;

    async fn export_file<P>(&self, entities_path: P, invoices_path: P) -> Result<(), GestorError>
    where
        P: AsRef<Path> + Send;
}

pub(crate) struct SnapshotUsecaseImpl<
    DS: KeyValueDatasource,
    FDS = SnapshotFileDatasourceImpl, // Default.
> where
    FDS: SnapshotFileDatasource,
{
    datasource: SharedDatasource<DS>,
    file_datasource: FDS,
}

impl<DS: KeyValueDatasource> SnapshotUsecaseImpl<DS> {
    pub(crate) fn new(datasource: SharedDatasource<DS>) -> Self {
        Self {
            datasource,
            file_datasource: SnapshotFileDatasourceImpl::new(),
        }
    }
}

fn parse_collection<M, E>(raw: &str, collection: &'static str) -> Result<Vec<M>, GestorError>
where
    M: serde::de::DeserializeOwned,
    E: TryFrom<M, Error = GestorError>,
    M: Clone,
{
    let models: Vec<M> =
        serde_json::from_str(raw).map_err(|source| GestorError::InvalidJson {
            collection,
            source,
        })?;
    // Full validation pass; the models themselves are what get stored.
    models
        .iter()
        .cloned()
        .map(E::try_from)
        .collect::<Result<Vec<E>, _>>()?;
    Ok(models)
}

fn to_json<M: serde::Serialize>(
    models: &[M],
    collection: &'static str,
) -> Result<String, GestorError> {
    serde_json::to_string(models).map_err(|source| GestorError::InvalidJson { collection, source })
}

#[async_trait]
impl<DS, FDS> SnapshotUsecase for SnapshotUsecaseImpl<DS, FDS>
where
    DS: KeyValueDatasource + Send,
    FDS: SnapshotFileDatasource + Send + Sync,
{
    fn import_string(&self, entities_json: &str, invoices_json: &str) -> Result<(), GestorError> {
        let entities =
            parse_collection::<EntityModel, Entity>(entities_json, ENTITIES_KEY)?;
        let invoices =
            parse_collection::<InvoiceModel, Invoice>(invoices_json, INVOICES_KEY)?;
        let entities_raw = to_json(&entities, ENTITIES_KEY)?;
        let invoices_raw = to_json(&invoices, INVOICES_KEY)?;

        let mut store = self.datasource.lock();
        store.set_item(ENTITIES_KEY, entities_raw);
        store.set_item(INVOICES_KEY, invoices_raw);
        debug!(
            entities = entities.len(),
            invoices = invoices.len(),
            "snapshot imported"
        );
        Ok(())
    }

    async fn import_file<P>(&self, entities_path: P, invoices_path: P) -> Result<(), GestorError>
    where
        P: AsRef<Path> + Send,
    {
        let entities_json = self.file_datasource.read(entities_path).await?;
        let invoices_json = self.file_datasource.read(invoices_path).await?;
        self.import_string(&entities_json, &invoices_json)
    }

    fn export_string(&self) -> Result<(String, String), GestorError> {
        let (entities_raw, invoices_raw) = {
            let store = self.datasource.lock();
            (
                store.get_item(ENTITIES_KEY).unwrap_or_else(|| "[]".into()),
                store.get_item(INVOICES_KEY).unwrap_or_else(|| "[]".into()),
            )
        };
        // Round-trip through the models so the export is always normalized,
        // whatever shape the store was seeded with.
        let entities = parse_collection::<EntityModel, Entity>(&entities_raw, ENTITIES_KEY)?;
        let invoices = parse_collection::<InvoiceModel, Invoice>(&invoices_raw, INVOICES_KEY)?;
        Ok((
            to_json(&entities, ENTITIES_KEY)?,
            to_json(&invoices, INVOICES_KEY)?,
        ))
    }

    async fn export_file<P>(&self, entities_path: P, invoices_path: P) -> Result<(), GestorError>
    where
        P: AsRef<Path> + Send,
    {
        let (entities_json, invoices_json) = self.export_string()?;
        self.file_datasource
            .write(entities_path, &entities_json)
            .await?;
        self.file_datasource
            .write(invoices_path, &invoices_json)
            .await?;
        Ok(())
    }
}
