use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

use crate::config::kiln_config::KilnConfig;
use crate::domain::{
    address_record::{AddressRecord, ProtocolGroup},
    date_range::DateRange,
    protocol::Protocol,
    update::{Rewards, StakeSnapshot, UpdateMap},
};
use crate::ports::staking_api::StakingApi;

use super::{
    normalizer::{normalize_rewards, normalize_stakes},
    routes::{reward_routes, stake_routes, Route},
};

/// Calls the staking API for every grouped address and collects the sheet updates.
///
/// Requests are issued one after the other. Failures are logged and turned into sentinels,
/// never returned.
pub struct StakingFetcher<'a> {
    api: &'a dyn StakingApi,
    config: &'a KilnConfig,
}

impl<'a> StakingFetcher<'a> {
    pub fn new(api: &'a dyn StakingApi, config: &'a KilnConfig) -> Self {
        Self { api, config }
    }

    /// Body of a 200 response, `None` on any other outcome.
    async fn call(&self, route: &Route) -> Option<String> {
        match self.api.get(&route.url).await {
            Ok(response) if response.is_success() => Some(response.body),
            Ok(response) => {
                warn!(
                    status = response.status,
                    url = %route.url,
                    "Failed to fetch data for {}",
                    route.protocol
                );
                None
            }
            Err(report) => {
                warn!(url = %route.url, "Failed to fetch data for {}: {:?}", route.protocol, report);
                None
            }
        }
    }

    fn protocols_with_addresses<'g>(
        groups: &'g ProtocolGroup,
    ) -> impl Iterator<Item = (Protocol, &'g [AddressRecord])> + 'g {
        Protocol::iter().filter_map(move |protocol| match groups.get(&protocol) {
            Some(records) if !records.is_empty() => Some((protocol, records.as_slice())),
            _ => {
                debug!("No addresses for this protocol: {}", protocol);
                None
            }
        })
    }

    #[instrument(skip_all, name = "StakingFetcher::fetch_stakes")]
    pub async fn fetch_stakes(&self, groups: &ProtocolGroup) -> UpdateMap {
        let mut updates = UpdateMap::new();
        let batch_size = self.config.effective_batch_size();

        for (protocol, records) in Self::protocols_with_addresses(groups) {
            for route in stake_routes(self.config.base_url(), protocol, records, batch_size) {
                let Some(body) = self.call(&route).await else {
                    for address in &route.addresses {
                        updates.record_stake(address, StakeSnapshot::no_response());
                    }
                    continue;
                };

                match normalize_stakes(&route, &body) {
                    Ok(snapshots) => {
                        for (address, snapshot) in snapshots {
                            updates.record_stake(&address, snapshot);
                        }
                    }
                    Err(error) => warn!(url = %route.url, "{} for {}", error, protocol),
                }
            }
        }

        info!(addresses = updates.len(), "Collected stakes");
        updates
    }

    #[instrument(skip_all, name = "StakingFetcher::fetch_rewards")]
    pub async fn fetch_rewards(&self, groups: &ProtocolGroup, date_range: &DateRange) -> UpdateMap {
        let mut updates = UpdateMap::new();

        for (protocol, records) in Self::protocols_with_addresses(groups) {
            for route in reward_routes(self.config.base_url(), protocol, records, date_range) {
                let rewards = match self.call(&route).await {
                    None => Rewards::NoResponse,
                    Some(body) => match normalize_rewards(&body) {
                        Ok(amount) => Rewards::Amount(amount),
                        Err(error) => {
                            warn!(url = %route.url, "{} for {}", error, protocol);
                            continue;
                        }
                    },
                };

                for address in &route.addresses {
                    updates.record_rewards(address, rewards);
                }
            }
        }

        info!(addresses = updates.len(), "Collected rewards");
        updates
    }
}
