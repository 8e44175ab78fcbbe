// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Searchable;
use crate::config::CatalogConfig;
use crate::mapper::{FromRecord, MalformedRecord, RawRecord};
use crate::search::{SearchIndex, SearchProfile};

/// An active login session of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: String,
    pub uid: u64,
    pub device: String,
    /// Web-push subscription token
    pub wp_token: String,
    pub updated_at: DateTime<Utc>,
}

impl FromRecord for Session {
    const KIND: &'static str = "session";

    fn from_record(record: &RawRecord) -> Result<Self, MalformedRecord> {
        Ok(Self {
            id: record.required("id")?.to_string(),
            uid: record.uint("uid")?,
            device: record.text("device"),
            wp_token: record.raw("wptoken"),
            updated_at: record.timestamp_or_epoch("updated_at"),
        })
    }
}

impl Searchable for Session {
    fn profile(config: &CatalogConfig) -> SearchProfile {
        SearchProfile::new(Self::KIND, &config.indexes.session)
            .with_type("type", Some("session"))
            .with_owner("uid")
    }

    fn index(config: &CatalogConfig) -> SearchIndex {
        SearchIndex::new(&config.indexes.session, "session:")
            .tag("type")
            .tag("uid")
            .text("device")
            .numeric_sortable("updated_at")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record() {
        let record: RawRecord = [
            ("id", "abc"),
            ("uid", "42"),
            ("device", "Firefox"),
            ("wptoken", "tok"),
        ]
        .into_iter()
        .collect();

        let session = Session::from_record(&record).unwrap();
        assert_eq!(session.uid, 42);
        assert_eq!(session.wp_token, "tok");
        assert_eq!(session.updated_at.timestamp(), 0);
    }

    #[test]
    fn test_missing_uid() {
        let record: RawRecord = [("id", "abc")].into_iter().collect();
        assert_eq!(Session::from_record(&record).unwrap_err().field(), "uid");
    }
}
