use strum::{Display, EnumString};

/// Kind of query sent to the staking API, also the path segment of the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CallType {
    /// Balance and custody snapshot.
    Stakes,
    /// Rewards accrued over a date range.
    Rewards,
}
