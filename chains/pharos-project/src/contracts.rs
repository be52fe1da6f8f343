//! Contract bindings and call-data builders for the Pharos lending market.

use ethers::abi::AbiEncode;
use ethers::prelude::*;
use serde::Serialize;
use std::fmt;

ethers::contract::abigen!(
    IAssetFaucet,
    r#"[
        function mint(address asset, address to, uint256 amount)
    ]"#
);

ethers::contract::abigen!(
    IERC20Allowance,
    r#"[
        function allowance(address owner, address spender) view returns (uint256)
        function approve(address spender, uint256 amount) returns (bool)
    ]"#
);

ethers::contract::abigen!(
    ILendingPool,
    r#"[
        function supply(address asset, uint256 amount, address onBehalfOf, uint16 referralCode)
    ]"#
);

/// Token decimals shared by every asset of the market.
pub const TOKEN_DECIMALS: u32 = 18;
/// Whole tokens minted per faucet claim.
pub const FAUCET_CLAIM_TOKENS: u64 = 100;

/// The fixed set of tokens the runner works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Asset {
    Gold,
    Nvidia,
    Tesla,
}

impl Asset {
    pub fn symbol(self) -> &'static str {
        match self {
            Asset::Gold => "GOLD",
            Asset::Nvidia => "NVDA",
            Asset::Tesla => "TSLA",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Resolved contract addresses, shared read-only by every wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub faucet: Address,
    pub lending_pool: Address,
    pub gold: Address,
    pub nvidia: Address,
    pub tesla: Address,
}

impl ContractAddresses {
    pub fn asset(&self, asset: Asset) -> Address {
        match asset {
            Asset::Gold => self.gold,
            Asset::Nvidia => self.nvidia,
            Asset::Tesla => self.tesla,
        }
    }
}

/// `10^TOKEN_DECIMALS * tokens`
pub fn token_units(tokens: u64) -> U256 {
    U256::from(tokens) * U256::exp10(TOKEN_DECIMALS as usize)
}

pub fn faucet_mint_calldata(asset: Address, recipient: Address) -> Bytes {
    MintCall {
        asset,
        to: recipient,
        amount: token_units(FAUCET_CLAIM_TOKENS),
    }
    .encode()
    .into()
}

pub fn allowance_calldata(owner: Address, spender: Address) -> Bytes {
    AllowanceCall { owner, spender }.encode().into()
}

pub fn approve_calldata(spender: Address, amount: U256) -> Bytes {
    ApproveCall { spender, amount }.encode().into()
}

pub fn supply_calldata(asset: Address, amount: U256, on_behalf_of: Address) -> Bytes {
    SupplyCall {
        asset,
        amount,
        on_behalf_of,
        referral_code: 0,
    }
    .encode()
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[test]
    fn test_selectors() {
        assert_eq!(&faucet_mint_calldata(addr(1), addr(2))[..4], &[0xc6, 0xc3, 0xbb, 0xe6]);
        assert_eq!(&allowance_calldata(addr(1), addr(2))[..4], &[0xdd, 0x62, 0xed, 0x3e]);
        assert_eq!(&approve_calldata(addr(1), U256::one())[..4], &[0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(
            &supply_calldata(addr(1), U256::one(), addr(2))[..4],
            &[0x61, 0x7b, 0xa0, 0x37]
        );
    }

    #[test]
    fn test_faucet_payload_layout() {
        let asset: Address = "0xaaf03cbb486201099edd0a52e03def18cd0c7354".parse().unwrap();
        let wallet: Address = "0x00000000000000000000000000000000000000ff".parse().unwrap();

        let data = faucet_mint_calldata(asset, wallet);

        let expected = concat!(
            "c6c3bbe6",
            "000000000000000000000000aaf03cbb486201099edd0a52e03def18cd0c7354",
            "00000000000000000000000000000000000000000000000000000000000000ff",
            "0000000000000000000000000000000000000000000000056bc75e2d63100000",
        );
        assert_eq!(hex::encode(&data), expected);
    }

    #[test]
    fn test_supply_uses_zero_referral() {
        let data = supply_calldata(addr(1), U256::from(7), addr(2));
        assert_eq!(data.len(), 4 + 32 * 4);
        assert!(data[4 + 96..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_asset_lookup() {
        let contracts = ContractAddresses {
            faucet: addr(0xf0),
            lending_pool: addr(0xf1),
            gold: addr(1),
            nvidia: addr(2),
            tesla: addr(3),
        };
        assert_eq!(contracts.asset(Asset::Gold), addr(1));
        assert_eq!(contracts.asset(Asset::Nvidia), addr(2));
        assert_eq!(contracts.asset(Asset::Tesla), addr(3));
        assert_eq!(Asset::Nvidia.to_string(), "NVDA");
    }
}
