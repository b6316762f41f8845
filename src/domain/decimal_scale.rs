use super::protocol::Protocol;

/// Power of ten dividing raw on-chain amounts into whole tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalScale {
    E6,
    E9,
    E18,
    E23,
}

// First keyword found in the identifier wins
const KEYWORDS: [Protocol; 6] = [
    Protocol::Cosmos,
    Protocol::Ethereum,
    Protocol::Polygon,
    Protocol::Solana,
    Protocol::Near,
    Protocol::Cardano,
];

impl DecimalScale {
    pub fn factor(&self) -> f64 {
        match self {
            DecimalScale::E6 => 1e6,
            DecimalScale::E9 => 1e9,
            DecimalScale::E18 => 1e18,
            DecimalScale::E23 => 1e23,
        }
    }

    /// Looks for a network name anywhere in the identifier, falling back to its ticker prefix.
    pub fn for_identifier(identifier: &str) -> Option<DecimalScale> {
        let lowered = identifier.to_lowercase();

        KEYWORDS
            .iter()
            .find(|protocol| lowered.contains(protocol.to_string().as_str()))
            .copied()
            .or_else(|| Protocol::from_identifier(identifier))
            .and_then(|protocol| protocol.decimal_scale())
    }
}
