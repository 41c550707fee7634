use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_secretsmanager::primitives::DateTime as SmithyDateTime;
use aws_sdk_secretsmanager::types::{SecretListEntry, Tag as SdkTag};
use chrono::{DateTime, Utc};

use crate::store::{SecretListItem, StoreError, Tag};

pub(super) fn timestamp(dt: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())
}

pub(super) fn list_item(entry: &SecretListEntry) -> SecretListItem {
    SecretListItem {
        name: entry.name().unwrap_or_default().to_string(),
        arn: entry.arn().unwrap_or_default().to_string(),
        description: entry.description().map(str::to_string),
        created_date: entry.created_date().and_then(timestamp),
        last_changed_date: entry.last_changed_date().and_then(timestamp),
    }
}

pub(super) fn tag(tag: Tag) -> SdkTag {
    SdkTag::builder().key(tag.key).value(tag.value).build()
}

/// Classify an SDK failure by its service error code.
pub(super) fn sdk_error<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
    match err.code() {
        Some(code) => StoreError::from_code(code, message),
        None => StoreError::Other(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_keeps_subsecond_precision() {
        let dt = SmithyDateTime::from_secs_and_nanos(1_700_000_000, 250_000_000);
        let converted = timestamp(&dt).unwrap();
        assert_eq!(converted.timestamp(), 1_700_000_000);
        assert_eq!(converted.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn list_entry_without_optional_fields() {
        let entry = SecretListEntry::builder().name("ns/dev/db").arn("arn:x").build();
        let item = list_item(&entry);
        assert_eq!(item.name, "ns/dev/db");
        assert_eq!(item.arn, "arn:x");
        assert!(item.created_date.is_none());
    }
}
