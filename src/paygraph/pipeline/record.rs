//! Decoding of wire-format payment records.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::paygraph::error::PipelineError;

/// Wire format of `created_time`, e.g. `2016-03-28T23:23:12Z`.
pub const CREATED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One line of the payment stream as it arrives on the wire.
///
/// Lines missing any of the three fields fail to decode; the core never sees
/// them. The core still re-validates emptiness and self-pairing itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentRecord {
    pub created_time: String,
    pub actor: String,
    pub target: String,
}

impl PaymentRecord {
    /// Decodes a single input line.
    pub fn from_json_line(line: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(line)?)
    }

    /// `created_time` as epoch seconds.
    pub fn epoch_seconds(&self) -> Result<i64, PipelineError> {
        let parsed = NaiveDateTime::parse_from_str(&self.created_time, CREATED_TIME_FORMAT)
            .map_err(|e| PipelineError::Timestamp {
                value: self.created_time.clone(),
                reason: e.to_string(),
            })?;
        Ok(parsed.and_utc().timestamp())
    }
}
