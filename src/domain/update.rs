use std::collections::HashMap;

/// Written in the custody column when the API did not say whether the stake is Kiln's.
pub const DEFAULT_CUSTODY_SENTINEL: &str = "defaultTrue";
/// Written in the custody and balance columns when the stakes request failed.
pub const NO_RESPONSE_SENTINEL: &str = "noresponseTrue";
/// Written in the rewards column when the rewards request failed.
pub const REWARDS_FAILURE_SENTINEL: i128 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustodyFlag {
    Reported(bool),
    Unreported,
    NoResponse,
}

impl CustodyFlag {
    pub fn cell_value(&self) -> &'static str {
        match self {
            CustodyFlag::Reported(true) => "True",
            CustodyFlag::Reported(false) => "False",
            CustodyFlag::Unreported => DEFAULT_CUSTODY_SENTINEL,
            CustodyFlag::NoResponse => NO_RESPONSE_SENTINEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeSnapshot {
    pub custody: CustodyFlag,
    /// Raw amount as returned by the API, `None` when the request failed.
    pub balance: Option<String>,
}

impl StakeSnapshot {
    pub fn no_response() -> Self {
        StakeSnapshot {
            custody: CustodyFlag::NoResponse,
            balance: None,
        }
    }

    pub fn balance_cell_value(&self) -> &str {
        self.balance.as_deref().unwrap_or(NO_RESPONSE_SENTINEL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewards {
    Amount(i128),
    NoResponse,
}

impl Rewards {
    pub fn cell_value(&self) -> i128 {
        match self {
            Rewards::Amount(amount) => *amount,
            Rewards::NoResponse => REWARDS_FAILURE_SENTINEL,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRecord {
    pub stake: Option<StakeSnapshot>,
    pub rewards: Option<Rewards>,
}

/// Pending sheet changes, keyed by the address found in the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateMap(HashMap<String, UpdateRecord>);

impl UpdateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_stake(&mut self, address: &str, snapshot: StakeSnapshot) {
        self.0.entry(address.to_owned()).or_default().stake = Some(snapshot);
    }

    pub fn record_rewards(&mut self, address: &str, rewards: Rewards) {
        self.0.entry(address.to_owned()).or_default().rewards = Some(rewards);
    }

    pub fn get(&self, address: &str) -> Option<&UpdateRecord> {
        self.0.get(address)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
