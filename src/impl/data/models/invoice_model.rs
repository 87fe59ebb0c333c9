use serde_derive::{Deserialize, Serialize};

use crate::{
    entities::{EntityId, Invoice, InvoiceId, InvoiceStatus, Maturity, MaturityId, PdfAttachment},
    errors::GestorError,
};

use super::iso_date_model::IsoDateModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MaturityModel {
    pub id: String,
    pub date: IsoDateModel,
    pub amount: f64,
    pub paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<IsoDateModel>,
}

/// Persisted shape of an invoice record, maturities embedded inline.
/// CamelCase field names keep the stored JSON compatible with the original
/// collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvoiceModel {
    pub id: String,
    pub entity_id: String,
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_address: Option<String>,
    pub date: IsoDateModel,
    pub total_amount: f64,
    pub maturities: Vec<MaturityModel>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_data: Option<String>,
}

pub(crate) fn status_tag(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Pending => "PENDING",
        InvoiceStatus::Partial => "PARTIAL",
        InvoiceStatus::Paid => "PAID",
    }
}

pub(crate) fn parse_status(value: &str) -> Result<InvoiceStatus, GestorError> {
    match value {
        "PENDING" => Ok(InvoiceStatus::Pending),
        "PARTIAL" => Ok(InvoiceStatus::Partial),
        "PAID" => Ok(InvoiceStatus::Paid),
        other => Err(GestorError::UnknownInvoiceStatus {
            value: other.to_string(),
        }),
    }
}

impl From<&Maturity> for MaturityModel {
    fn from(m: &Maturity) -> Self {
        Self {
            id: m.id.0.clone(),
            date: m.due_date.into(),
            amount: m.amount,
            paid: m.paid,
            payment_date: m.payment_date.map(Into::into),
        }
    }
}

impl From<MaturityModel> for Maturity {
    fn from(m: MaturityModel) -> Self {
        Self {
            id: MaturityId(m.id),
            due_date: m.date.0,
            amount: m.amount,
            paid: m.paid,
            payment_date: m.payment_date.map(|d| d.0),
        }
    }
}

impl From<&Invoice> for InvoiceModel {
    fn from(i: &Invoice) -> Self {
        Self {
            id: i.id.0.clone(),
            entity_id: i.entity_id.0.clone(),
            number: i.number.clone(),
            project_address: i.project_address.clone(),
            date: i.issue_date.into(),
            total_amount: i.total_amount,
            maturities: i.maturities.iter().map(Into::into).collect(),
            status: status_tag(i.status).to_string(),
            notes: i.notes.clone(),
            pdf_data: i.pdf.as_ref().map(|p| p.as_str().to_string()),
        }
    }
}

impl TryFrom<InvoiceModel> for Invoice {
    type Error = GestorError;

    fn try_from(m: InvoiceModel) -> Result<Self, Self::Error> {
        Ok(Invoice {
            id: InvoiceId(m.id),
            entity_id: EntityId(m.entity_id),
            number: m.number,
            project_address: m.project_address,
            issue_date: m.date.0,
            total_amount: m.total_amount,
            maturities: m.maturities.into_iter().map(Into::into).collect(),
            status: parse_status(&m.status)?,
            notes: m.notes,
            pdf: m.pdf_data.map(PdfAttachment::from_raw),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_original_collection_layout() {
        let json = r#"{
            "id": "101",
            "entityId": "1",
            "number": "F-2023-001",
            "projectAddress": "C/ Gran Via 12",
            "date": "2023-06-01",
            "totalAmount": 1210.0,
            "status": "PARTIAL",
            "maturities": [
                { "id": "m1", "date": "2023-07-01", "amount": 605, "paid": true, "paymentDate": "2023-06-28" },
                { "id": "m2", "date": "2023-08-01", "amount": 605, "paid": false }
            ]
        }"#;
        let model: InvoiceModel = serde_json::from_str(json).unwrap();
        let invoice = Invoice::try_from(model).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Partial);
        assert_eq!(invoice.maturities.len(), 2);
        assert!(invoice.maturities[0].paid);
        assert!(invoice.maturities[0].payment_date.is_some());
        assert!(invoice.maturities[1].payment_date.is_none());
        assert!(invoice.pdf.is_none());

        let out = serde_json::to_value(InvoiceModel::from(&invoice)).unwrap();
        assert_eq!(out["entityId"], "1");
        assert_eq!(out["totalAmount"], 1210.0);
        assert_eq!(out["maturities"][0]["paymentDate"], "2023-06-28");
        assert!(out["maturities"][1].get("paymentDate").is_none());
    }

    #[test]
    fn unknown_status_is_an_error() {
        let json = r#"{
            "id": "1", "entityId": "1", "number": "F-1", "date": "2023-06-01",
            "totalAmount": 10.0, "status": "OVERDUE", "maturities": []
        }"#;
        let model: InvoiceModel = serde_json::from_str(json).unwrap();
        assert!(Invoice::try_from(model).is_err());
    }
}
