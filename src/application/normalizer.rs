use thiserror::Error;
use tracing::warn;

use crate::adapters::kiln::responses::{KilnResponse, RewardEntry, StakeEntry};
use crate::domain::{
    protocol::AddressField,
    update::{CustodyFlag, StakeSnapshot},
};

use super::routes::Route;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Response is not valid JSON for this endpoint: {0}")]
    Undecodable(#[from] serde_json::Error),
    #[error("No valid data found in the response or 'data' key is missing or empty")]
    NoData,
}

/// How stake entries of a route are attributed to sheet addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StakeDecoder<'r> {
    /// Entries carry their address in a protocol-specific field.
    Field(AddressField),
    /// Entries all belong to the single address the route was built for.
    Requested(&'r str),
}

impl<'r> StakeDecoder<'r> {
    fn for_route(route: &'r Route) -> Option<Self> {
        match route.protocol.address_field() {
            Some(field) => Some(StakeDecoder::Field(field)),
            None => route
                .addresses
                .first()
                .map(|address| StakeDecoder::Requested(address.as_str())),
        }
    }

    fn address_of(&self, entry: &StakeEntry) -> Option<String> {
        match self {
            StakeDecoder::Field(field) => {
                let address = entry.address(*field).map(str::to_owned);
                if address.is_none() {
                    warn!(
                        expected_field = field.as_ref(),
                        "Unknown address field in the response"
                    );
                }
                address
            }
            StakeDecoder::Requested(address) => Some(address.to_string()),
        }
    }
}

fn snapshot(entry: &StakeEntry) -> StakeSnapshot {
    StakeSnapshot {
        custody: entry
            .is_kiln
            .map(CustodyFlag::Reported)
            .unwrap_or(CustodyFlag::Unreported),
        balance: Some(entry.balance.clone().unwrap_or_else(|| "0".to_owned())),
    }
}

/// Maps each stake entry of a successful response to the sheet address it reports on.
pub fn normalize_stakes(
    route: &Route,
    body: &str,
) -> Result<Vec<(String, StakeSnapshot)>, NormalizeError> {
    let entries = serde_json::from_str::<KilnResponse<StakeEntry>>(body)?
        .into_entries()
        .ok_or(NormalizeError::NoData)?;

    let Some(decoder) = StakeDecoder::for_route(route) else {
        return Ok(Vec::new());
    };

    Ok(entries
        .iter()
        .filter_map(|entry| {
            decoder
                .address_of(entry)
                .map(|address| (address, snapshot(entry)))
        })
        .collect())
}

/// Sums the integer `rewards` of every entry of a successful response.
pub fn normalize_rewards(body: &str) -> Result<i128, NormalizeError> {
    let entries = serde_json::from_str::<KilnResponse<RewardEntry>>(body)?
        .into_entries()
        .ok_or(NormalizeError::NoData)?;

    Ok(entries
        .iter()
        .filter_map(|entry| match entry.rewards.as_deref().map(str::parse::<i128>) {
            Some(Ok(rewards)) => Some(rewards),
            Some(Err(_)) | None => {
                warn!(rewards = ?entry.rewards, "Skipping entry without integer rewards");
                None
            }
        })
        .fold(0i128, i128::saturating_add))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::protocol::Protocol;

    fn route(protocol: Protocol, addresses: &[&str]) -> Route {
        Route {
            protocol,
            url: String::new(),
            addresses: addresses.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_stakes_use_the_protocol_address_field() {
        let body = r#"{"data":[
            {"validator_address":"0xa","is_kiln":true,"balance":"32"},
            {"validator_address":"0xb","is_kiln":false}
        ]}"#;

        let snapshots = normalize_stakes(&route(Protocol::Ethereum, &["0xa", "0xb"]), body).unwrap();

        assert_eq!(
            snapshots,
            vec![
                (
                    "0xa".to_owned(),
                    StakeSnapshot {
                        custody: CustodyFlag::Reported(true),
                        balance: Some("32".to_owned())
                    }
                ),
                (
                    "0xb".to_owned(),
                    StakeSnapshot {
                        custody: CustodyFlag::Reported(false),
                        balance: Some("0".to_owned())
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_entries_without_the_protocol_field_are_skipped() {
        // Solana entries are keyed by stake_account, a validator_address is not enough
        let body = r#"{"data":[
            {"validator_address":"vote1","balance":"1"},
            {"stake_account":"stake1","balance":"2"}
        ]}"#;

        let snapshots = normalize_stakes(&route(Protocol::Solana, &["stake1"]), body).unwrap();

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].0, "stake1");
        assert_eq!(snapshots[0].1.custody, CustodyFlag::Unreported);
    }

    #[test]
    fn test_cosmos_entries_belong_to_the_requested_pair() {
        let body = r#"{"data":[{"validator_address":"val1","delegator_address":"del1","is_kiln":true,"balance":"5"}]}"#;

        let snapshots = normalize_stakes(&route(Protocol::Cosmos, &["val1_del1"]), body).unwrap();

        assert_eq!(snapshots[0].0, "val1_del1");
        assert_eq!(snapshots[0].1.balance.as_deref(), Some("5"));
    }

    #[test]
    fn test_polygon_uses_delegator_address() {
        let body = r#"{"data":[{"delegator_address":"0xdel","validator_address":"0xval","balance":"7"}]}"#;
        let snapshots = normalize_stakes(&route(Protocol::Polygon, &["0xdel"]), body).unwrap();
        assert_eq!(snapshots[0].0, "0xdel");
    }

    #[test]
    fn test_empty_data_is_reported() {
        assert!(matches!(
            normalize_stakes(&route(Protocol::Near, &["a"]), r#"{"data":[]}"#),
            Err(NormalizeError::NoData)
        ));
        assert!(matches!(
            normalize_rewards(r#"{"error":"nope"}"#),
            Err(NormalizeError::NoData)
        ));
        assert!(matches!(
            normalize_rewards("<html>"),
            Err(NormalizeError::Undecodable(_))
        ));
    }

    #[test]
    fn test_rewards_are_summed() {
        let body = r#"{"data":[
            {"date":"2023-01-01","rewards":"1000000000000000000"},
            {"date":"2023-01-02","rewards":"2500000000000000000"},
            {"date":"2023-01-03","rewards":"12345678901234567890123"}
        ]}"#;

        assert_eq!(
            normalize_rewards(body).unwrap(),
            3_500_000_000_000_000_000 + 12_345_678_901_234_567_890_123
        );
    }

    #[test]
    fn test_non_integer_rewards_are_skipped() {
        let body = r#"{"data":[{"rewards":"10"},{"rewards":"1.5"},{}]}"#;
        assert_eq!(normalize_rewards(body).unwrap(), 10);
    }
}
