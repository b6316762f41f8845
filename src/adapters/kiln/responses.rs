use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::protocol::AddressField;

/// Envelope shared by every Kiln endpoint.
#[derive(Deserialize, Debug)]
pub struct KilnResponse<T> {
    pub data: Option<Vec<T>>,
}

impl<T> KilnResponse<T> {
    /// `None` when `data` is missing or empty.
    pub fn into_entries(self) -> Option<Vec<T>> {
        self.data.filter(|entries| !entries.is_empty())
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct StakeEntry {
    pub validator_address: Option<String>,
    pub delegator_address: Option<String>,
    pub stake_account: Option<String>,
    pub stake_address: Option<String>,
    pub stash_account: Option<String>,
    pub is_kiln: Option<bool>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub balance: Option<String>,
}

impl StakeEntry {
    pub fn address(&self, field: AddressField) -> Option<&str> {
        match field {
            AddressField::ValidatorAddress => self.validator_address.as_deref(),
            AddressField::DelegatorAddress => self.delegator_address.as_deref(),
            AddressField::StakeAccount => self.stake_account.as_deref(),
            AddressField::StakeAddress => self.stake_address.as_deref(),
            AddressField::StashAccount => self.stash_account.as_deref(),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct RewardEntry {
    #[serde(default, deserialize_with = "string_or_number")]
    pub rewards: Option<String>,
}

// Amounts are strings on most endpoints, plain numbers on a few
fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(amount)) => Ok(Some(amount)),
        Some(Value::Number(amount)) => Ok(Some(amount.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or a number, got {}",
            other
        ))),
    }
}
