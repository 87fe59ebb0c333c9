// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod key_value_datasource;
        pub(crate) mod snapshot_file_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod entity_model;
        pub(crate) mod invoice_model;
        pub(crate) mod iso_date_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod entity_repository_impl;
        pub(crate) mod invoice_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod entity;
        pub(crate) mod ids;
        pub(crate) mod invoice;
        pub(crate) mod invoice_draft;
        pub(crate) mod report;
    }
    pub(crate) mod logic {
        pub(crate) mod reconciliation;
        pub(crate) mod status_derivation;
        pub(crate) mod tax_id;
        mod utils;
        pub(crate) use utils::round2;
    }
    pub(crate) mod repositories {
        pub(crate) mod entity_repository;
        pub(crate) mod invoice_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod entities_usecase;
        pub(crate) mod invoices_usecase;
        pub(crate) mod payments_usecase;
        pub(crate) mod reports_usecase;
        pub(crate) mod snapshot_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod amount_fmt;
    pub(crate) mod date_fmt;
    pub(crate) mod schedule_printer;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::entity::*;
        pub use crate::domain::entities::ids::*;
        pub use crate::domain::entities::invoice::*;
        pub use crate::domain::entities::invoice_draft::*;
        pub use crate::domain::entities::report::*;
    }

    pub mod datasources {
        pub use crate::data::datasources::key_value_datasource::{
            InMemoryKeyValueDatasource, KeyValueDatasource,
        };
    }
}
