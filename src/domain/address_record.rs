use std::collections::BTreeMap;

use thiserror::Error;

use super::protocol::Protocol;

/// One tracked address, as read from a row of the data sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub raw_identifier: String,
    pub protocol: Protocol,
    pub address: String,
    /// Zero-based index of the row in the sheet, header included.
    pub row_index: usize,
}

/// Addresses grouped by network, in sheet order within each group.
pub type ProtocolGroup = BTreeMap<Protocol, Vec<AddressRecord>>;

/// Cosmos delegation, written in the sheet as `validator_delegator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationPair<'a> {
    pub validator: &'a str,
    pub delegator: &'a str,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid address format for Cosmos protocol: '{0}' (expected validator_delegator)")]
pub struct InvalidDelegationPair(pub String);

impl<'a> DelegationPair<'a> {
    pub fn parse(address: &'a str) -> Result<Self, InvalidDelegationPair> {
        let mut parts = address.split('_');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(validator), Some(delegator), None)
                if !validator.is_empty() && !delegator.is_empty() =>
            {
                Ok(DelegationPair {
                    validator,
                    delegator,
                })
            }
            _ => Err(InvalidDelegationPair(address.to_owned())),
        }
    }
}
