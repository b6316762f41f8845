use std::collections::HashSet;

use tracing::warn;

use crate::domain::{
    address_record::{AddressRecord, DelegationPair},
    call_type::CallType,
    date_range::DateRange,
    protocol::Protocol,
};

/// One request to the staking API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub protocol: Protocol,
    pub url: String,
    /// Sheet addresses this request reports on.
    pub addresses: Vec<String>,
}

fn endpoint(base_url: &str, protocol: Protocol, call_type: CallType) -> String {
    format!("{}/{}/{}", base_url, protocol.api_path(), call_type)
}

fn date_params(date_range: &DateRange) -> String {
    format!(
        "&start_date={}&end_date={}",
        date_range.start_date, date_range.end_date
    )
}

// Duplicated rows share one request; every matching row is written afterwards
fn unique_addresses(records: &[AddressRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|record| record.address.as_str())
        .filter(|address| seen.insert(*address))
        .collect()
}

fn delegation_route(
    base_url: &str,
    call_type: CallType,
    address: &str,
    date_range: Option<&DateRange>,
) -> Option<Route> {
    let pair = match DelegationPair::parse(address) {
        Ok(pair) => pair,
        Err(error) => {
            warn!("{}", error);
            return None;
        }
    };

    let protocol = Protocol::Cosmos;
    Some(Route {
        protocol,
        url: format!(
            "{}?{}={}&delegators={}{}",
            endpoint(base_url, protocol, call_type),
            protocol.address_param(),
            pair.validator,
            pair.delegator,
            date_range.map(date_params).unwrap_or_default()
        ),
        addresses: vec![address.to_owned()],
    })
}

/// Stakes routes: addresses joined by commas in batches of `batch_size`, or one route per
/// delegation pair for Cosmos.
pub fn stake_routes(
    base_url: &str,
    protocol: Protocol,
    records: &[AddressRecord],
    batch_size: usize,
) -> Vec<Route> {
    let addresses = unique_addresses(records);

    if protocol.uses_delegation_pairs() {
        return addresses
            .into_iter()
            .filter_map(|address| delegation_route(base_url, CallType::Stakes, address, None))
            .collect();
    }

    addresses
        .chunks(batch_size.max(1))
        .map(|batch| Route {
            protocol,
            url: format!(
                "{}?{}={}",
                endpoint(base_url, protocol, CallType::Stakes),
                protocol.address_param(),
                batch.join(",")
            ),
            addresses: batch.iter().map(|address| address.to_string()).collect(),
        })
        .collect()
}

/// Rewards routes: one per address, bounded by the date range.
pub fn reward_routes(
    base_url: &str,
    protocol: Protocol,
    records: &[AddressRecord],
    date_range: &DateRange,
) -> Vec<Route> {
    unique_addresses(records)
        .into_iter()
        .filter_map(|address| {
            if protocol.uses_delegation_pairs() {
                return delegation_route(base_url, CallType::Rewards, address, Some(date_range));
            }

            Some(Route {
                protocol,
                url: format!(
                    "{}?{}={}{}",
                    endpoint(base_url, protocol, CallType::Rewards),
                    protocol.address_param(),
                    address,
                    date_params(date_range)
                ),
                addresses: vec![address.to_owned()],
            })
        })
        .collect()
}
