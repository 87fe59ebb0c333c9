use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::GestorError;

/// ISO `YYYY-MM-DD` date string at the persistence boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct IsoDateModel(pub NaiveDate);

impl FromStr for IsoDateModel {
    type Err = GestorError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            GestorError::InvalidIsoDate {
                date: s.to_string(),
            }
        })?;
        Ok(IsoDateModel(d))
    }
}

impl From<NaiveDate> for IsoDateModel {
    fn from(d: NaiveDate) -> Self {
        IsoDateModel(d)
    }
}

impl<'de> Deserialize<'de> for IsoDateModel {
    fn deserialize<D>(deserializer: D) -> Result<IsoDateModel, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IsoDateModel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for IsoDateModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.format("%Y-%m-%d").to_string())
    }
}
