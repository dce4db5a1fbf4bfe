// crates/infra/src/persistence/records.rs
//! JSON shapes of the two record files.
//!
//! ```json
//! {"currentCount":"42"}
//! {"ipList":["203.0.113.7","198.51.100.2"]}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use visit_counter_domain::AddressList;
use visit_counter_shared_kernel::{InfraResult, InfrastructureError, VisitCount};

pub const COUNT_RECORD: &str = "counter";
pub const ADDRESS_RECORD: &str = "address list";

#[derive(Debug, Serialize, Deserialize)]
struct CountRecord {
    #[serde(rename = "currentCount", with = "count_repr")]
    current_count: VisitCount,
}

#[derive(Debug, Serialize, Deserialize)]
struct AddressRecord {
    #[serde(rename = "ipList")]
    ip_list: Vec<String>,
}

/// Existing files store the count as a string; bare numbers are accepted too.
mod count_repr {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use visit_counter_shared_kernel::VisitCount;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(count: &VisitCount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&count.value().to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<VisitCount, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(VisitCount::new(n)),
            Repr::Text(text) => text
                .trim()
                .parse::<u64>()
                .map(VisitCount::new)
                .map_err(|e| D::Error::custom(format!("currentCount '{text}' is not a non-negative integer: {e}"))),
        }
    }
}

pub fn decode_count(path: &Path, raw: &str) -> InfraResult<VisitCount> {
    if raw.trim().is_empty() {
        return Err(parse_error(path, COUNT_RECORD, "file is empty"));
    }
    serde_json::from_str::<CountRecord>(raw)
        .map(|record| record.current_count)
        .map_err(|e| parse_error(path, COUNT_RECORD, e.to_string()))
}

/// A zero-length or whitespace-only file is an empty list.
pub fn decode_addresses(path: &Path, raw: &str) -> InfraResult<AddressList> {
    if raw.trim().is_empty() {
        return Ok(AddressList::new());
    }
    serde_json::from_str::<AddressRecord>(raw)
        .map(|record| AddressList::from_entries(record.ip_list))
        .map_err(|e| parse_error(path, ADDRESS_RECORD, e.to_string()))
}

pub fn encode_count(count: VisitCount) -> InfraResult<Vec<u8>> {
    Ok(serde_json::to_vec(&CountRecord { current_count: count })?)
}

pub fn encode_addresses(addresses: &AddressList) -> InfraResult<Vec<u8>> {
    Ok(serde_json::to_vec(&AddressRecord { ip_list: addresses.to_strings() })?)
}

fn parse_error(path: &Path, record: &'static str, details: impl Into<String>) -> InfrastructureError {
    InfrastructureError::Parse { path: path.to_path_buf(), record, details: details.into() }
}
