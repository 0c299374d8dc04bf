//! Illustrative workloads used when no input files are given.

use chrono::Utc;
use gostcalc_core::{fields, Document, Payload, Result, Value};
use serde_json::json;
use uuid::Uuid;

/// A QR scan record stored under its merchant, with the indexes the
/// scan history queries need.
///
/// # Errors
///
/// Never fails for the fixed collection path; the `Result` comes from
/// [`Document::new`].
pub fn qr_record() -> Result<Document> {
    let merchant_id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let doc = Document::new(
        Uuid::new_v4().to_string(),
        format!("prod-qr/{}/qr-records", Uuid::new_v4()),
    )?
    .with_field("merchant_id", merchant_id.clone())
    .with_field("merchant_qr_id", Uuid::new_v4().to_string())
    .with_field("profile_qr_id", Uuid::new_v4().to_string())
    .with_field("date_created", now)
    .with_field("type", 1)
    .with_field(
        "is_auto_scanout",
        fields([("Bool", false), ("Valid", false)]),
    )
    .with_single_field_index(fields([("date_created", now)]))
    .with_composite_index(fields([
        ("merchant_id", Value::from(merchant_id.clone())),
        ("date_created", Value::from(now)),
    ]))
    .with_composite_index(fields([
        ("merchant_id", Value::from(merchant_id)),
        ("type", Value::from(1)),
        ("date_created", Value::from(now)),
    ]))
    .with_composite_index(fields([
        ("type", Value::from(1)),
        ("date_created", Value::from(now)),
    ]));

    Ok(doc)
}

/// A scan event sent from a device: three UUIDs as JSON.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized.
pub fn scan_payload() -> Result<Payload> {
    Payload::json(&json!({
        "id": Uuid::new_v4(),
        "profile_id": Uuid::new_v4(),
        "merchant_id": Uuid::new_v4(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_record_shape() {
        let doc = qr_record().unwrap();
        assert_eq!(doc.data().len(), 6);
        assert_eq!(doc.single_field_indexes().len(), 1);
        assert_eq!(doc.composite_indexes().len(), 3);
        assert_eq!(doc.segments().count(), 3);
    }

    #[test]
    fn qr_record_size_is_stable() {
        // Every ID is a 36-character UUID, so the size does not depend on
        // the generated values.
        assert_eq!(qr_record().unwrap().size(), qr_record().unwrap().size());
    }

    #[test]
    fn scan_payload_size() {
        assert_eq!(scan_payload().unwrap().len(), 150);
    }
}
