use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::decimal_scale::DecimalScale;

/// Blockchain networks the staking API reports on.
///
/// Parsing accepts the full network name and the ticker used by the API, case-insensitively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Protocol {
    #[strum(to_string = "ethereum", serialize = "eth")]
    Ethereum,
    #[strum(to_string = "solana", serialize = "sol")]
    Solana,
    #[strum(to_string = "cosmos", serialize = "atom")]
    Cosmos,
    #[strum(to_string = "near")]
    Near,
    #[strum(to_string = "cardano", serialize = "ada")]
    Cardano,
    #[strum(to_string = "polygon", serialize = "matic")]
    Polygon,
    #[strum(to_string = "kusama", serialize = "ksm")]
    Kusama,
}

/// Field of a stake entry holding the address the entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AddressField {
    ValidatorAddress,
    DelegatorAddress,
    StakeAccount,
    StakeAddress,
    StashAccount,
}

impl Protocol {
    /// Detects the protocol from a row identifier such as `eth_main` or `cosmos_val_3`:
    /// everything before the first underscore names the network.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        identifier
            .split('_')
            .next()
            .and_then(|prefix| prefix.trim().parse().ok())
    }

    pub fn api_path(&self) -> &'static str {
        match self {
            Protocol::Ethereum => "eth",
            Protocol::Solana => "sol",
            Protocol::Cosmos => "atom",
            Protocol::Near => "near",
            Protocol::Cardano => "ada",
            Protocol::Polygon => "matic",
            Protocol::Kusama => "ksm",
        }
    }

    pub fn address_param(&self) -> &'static str {
        match self {
            Protocol::Ethereum | Protocol::Cosmos => "validators",
            Protocol::Solana | Protocol::Near => "stake_accounts",
            Protocol::Cardano => "stake_addresses",
            Protocol::Polygon => "wallets",
            Protocol::Kusama => "stash_accounts",
        }
    }

    /// Cosmos stakes are addressed by a `validator_delegator` pair instead of a single address.
    pub fn uses_delegation_pairs(&self) -> bool {
        matches!(self, Protocol::Cosmos)
    }

    /// `None` when entries are attributed to the requested delegation pair instead.
    pub fn address_field(&self) -> Option<AddressField> {
        match self {
            Protocol::Ethereum => Some(AddressField::ValidatorAddress),
            Protocol::Solana | Protocol::Near => Some(AddressField::StakeAccount),
            Protocol::Cosmos => None,
            Protocol::Cardano => Some(AddressField::StakeAddress),
            Protocol::Polygon => Some(AddressField::DelegatorAddress),
            Protocol::Kusama => Some(AddressField::StashAccount),
        }
    }

    pub fn decimal_scale(&self) -> Option<DecimalScale> {
        match self {
            Protocol::Cosmos | Protocol::Cardano => Some(DecimalScale::E6),
            Protocol::Solana => Some(DecimalScale::E9),
            Protocol::Ethereum | Protocol::Polygon => Some(DecimalScale::E18),
            Protocol::Near => Some(DecimalScale::E23),
            Protocol::Kusama => None,
        }
    }
}
