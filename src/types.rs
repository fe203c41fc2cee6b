use ethers_core::types::{Address, U256};
use ethers_core::utils::format_ether;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::util::{addr_to_0x, format_timestamp, format_usd};

/// Categories offered by the tokenize form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    RealEstate,
    Vehicle,
    Art,
    Jewelry,
    Equipment,
    IntellectualProperty,
    Other,
}

impl AssetType {
    pub const ALL: [AssetType; 7] = [
        AssetType::RealEstate,
        AssetType::Vehicle,
        AssetType::Art,
        AssetType::Jewelry,
        AssetType::Equipment,
        AssetType::IntellectualProperty,
        AssetType::Other,
    ];

    /// Label stored on-chain.
    pub fn label(&self) -> &'static str {
        match self {
            AssetType::RealEstate => "Real Estate",
            AssetType::Vehicle => "Vehicle",
            AssetType::Art => "Art",
            AssetType::Jewelry => "Jewelry",
            AssetType::Equipment => "Equipment",
            AssetType::IntellectualProperty => "Intellectual Property",
            AssetType::Other => "Other",
        }
    }

    /// Next category in display order (wraps).
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AssetType::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown asset type: {wanted}"))
    }
}

/// A record as returned by `getAsset`. Display copy only; the contract owns the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: U256,
    pub name: String,
    pub asset_type: String,
    pub value: U256,
    pub owner: Address,
    pub timestamp: u64,
}

/// String form of an [`Asset`] for display and `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetView {
    pub id: String,
    pub name: String,
    pub asset_type: String,
    /// Decimal, 18 places.
    pub value: String,
    pub value_usd: String,
    pub owner: String,
    pub timestamp: String,
    pub created: String,
}

impl From<&Asset> for AssetView {
    fn from(a: &Asset) -> Self {
        Self {
            id: a.id.to_string(),
            name: a.name.clone(),
            asset_type: a.asset_type.clone(),
            value: format_ether(a.value),
            value_usd: format_usd(a.value),
            owner: addr_to_0x(&a.owner),
            timestamp: a.timestamp.to_string(),
            created: format_timestamp(a.timestamp),
        }
    }
}

impl AssetView {
    /// Label/value rows for the detail card.
    pub fn rows(&self) -> [(&'static str, &str); 5] {
        [
            ("Type", self.asset_type.as_str()),
            ("Value", self.value_usd.as_str()),
            ("Owner", self.owner.as_str()),
            ("Created", self.created.as_str()),
            ("Asset ID", self.id.as_str()),
        ]
    }
}

/// What the bootstrap learned about the node we are talking to.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub rpc_url: String,
    pub chain_id: U256,
    pub account: Address,
    pub block_number: u64,
    pub contract: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_type_parses_case_insensitively() {
        assert_eq!("real estate".parse::<AssetType>(), Ok(AssetType::RealEstate));
        assert_eq!(" Art ".parse::<AssetType>(), Ok(AssetType::Art));
        assert!("Spaceship".parse::<AssetType>().is_err());
    }

    #[test]
    fn asset_view_formats_for_humans() {
        let asset = Asset {
            id: U256::from(1),
            name: "Luxury Villa".into(),
            asset_type: "Real Estate".into(),
            value: U256::exp10(18) * 5_000_000u64,
            owner: Address::repeat_byte(0xab),
            timestamp: 0,
        };
        let view = AssetView::from(&asset);
        assert_eq!(view.value_usd, "$5,000,000");
        assert_eq!(view.owner, format!("0x{}", "ab".repeat(20)));
        assert_eq!(view.created, "1970-01-01T00:00:00Z");
        assert!(view.value.starts_with("5000000."));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["assetType"], "Real Estate");
        assert_eq!(json["id"], "1");
    }

    #[test]
    fn asset_type_cycles_both_ways() {
        assert_eq!(AssetType::Other.next(), AssetType::RealEstate);
        assert_eq!(AssetType::RealEstate.prev(), AssetType::Other);
        assert_eq!(AssetType::Art.next().prev(), AssetType::Art);
    }
}
