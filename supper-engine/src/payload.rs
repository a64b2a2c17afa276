//! Transfer Payload Schema
//!
//! Recognises SupperCoin transfers embedded in transaction data
//! (`OP_RETURN|TRANSFER|SUPPERCOIN|<amount>|<fromAddress>|...`).
//!
//! The marker gates everything: data without it is not ours and is ignored.
//! Once the marker is present, the fields that follow it are read in
//! schema order and each one is validated; a marked payload that does not
//! fit the schema is an error, never a trade with blank fields.

use std::fmt;
use supper_domain::{Address, TokenAmount};
use thiserror::Error;

/// Literal text identifying a SupperCoin transfer
pub const TRANSFER_MARKER: &str = "TRANSFER|SUPPERCOIN";

/// Field separator inside transaction data
pub const FIELD_DELIMITER: char = '|';

/// Named fields following the marker, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadField {
    /// Number of tokens traded
    Amount,
    /// Address the tokens come from
    FromAddress,
}

impl PayloadField {
    /// Schema: fields after the marker, in order
    pub const SCHEMA: [PayloadField; 2] = [PayloadField::Amount, PayloadField::FromAddress];

    /// Field name used in errors
    pub fn name(&self) -> &'static str {
        match self {
            PayloadField::Amount => "amount",
            PayloadField::FromAddress => "from_address",
        }
    }
}

impl fmt::Display for PayloadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Schema violations in a marked payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// Marker is glued to other text instead of ending a field
    #[error("Malformed marker in payload: {0:?}")]
    MalformedMarker(String),

    /// Field absent or empty
    #[error("Missing field: {0}")]
    MissingField(PayloadField),

    /// Amount is not a non-negative decimal
    #[error("Invalid amount {value:?}: {reason}")]
    InvalidAmount {
        /// Text found in the amount position
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// From-address is not a valid holder key
    #[error("Invalid from address {value:?}: {reason}")]
    InvalidAddress {
        /// Text found in the address position
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// A validated SupperCoin transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPayload {
    pub amount: TokenAmount,
    pub from: Address,
}

impl TransferPayload {
    /// Check `raw` for the marker and parse the transfer that follows it
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - No marker, not a SupperCoin transfer
    /// * `Ok(Some(payload))` - Marker and valid fields
    /// * `Err(PayloadError)` - Marker present but fields do not fit the schema
    ///
    /// # Example
    ///
    /// ```
    /// # use supper_engine::payload::TransferPayload;
    /// let payload = TransferPayload::detect("OP_RETURN|TRANSFER|SUPPERCOIN|500|bc1qxyz")
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(payload.amount.to_string(), "500");
    /// assert_eq!(payload.from.as_str(), "bc1qxyz");
    ///
    /// assert!(TransferPayload::detect("OP_RETURN|HELLO").unwrap().is_none());
    /// ```
    pub fn detect(raw: &str) -> Result<Option<Self>, PayloadError> {
        let Some(start) = raw.find(TRANSFER_MARKER) else {
            return Ok(None);
        };

        let after_marker = &raw[start + TRANSFER_MARKER.len()..];
        let body = match after_marker.strip_prefix(FIELD_DELIMITER) {
            Some(body) => body,
            None if after_marker.is_empty() => {
                return Err(PayloadError::MissingField(PayloadField::Amount))
            },
            None => return Err(PayloadError::MalformedMarker(raw.to_string())),
        };

        // Trailing fields beyond the schema are ignored
        let mut fields = body.split(FIELD_DELIMITER).map(str::trim);
        let mut next = |field: PayloadField| match fields.next() {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(PayloadError::MissingField(field)),
        };

        let [amount_field, from_field] = PayloadField::SCHEMA;
        let amount_text = next(amount_field)?;
        let from_text = next(from_field)?;

        let amount = amount_text
            .parse::<TokenAmount>()
            .map_err(|e| PayloadError::InvalidAmount {
                value: amount_text.to_string(),
                reason: e.to_string(),
            })?;

        let from = Address::new(from_text).map_err(|e| PayloadError::InvalidAddress {
            value: from_text.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Some(Self { amount, from }))
    }
}

// =============================================================================
// Tests
// =============================================================================
