//! Types for private REST API endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{TimestampMilliSeconds, serde_as};
use time::OffsetDateTime;

/// Account information.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Maker commission in basis points.
    pub maker_commission: u32,
    /// Taker commission in basis points.
    pub taker_commission: u32,
    /// Buyer commission in basis points.
    pub buyer_commission: u32,
    /// Seller commission in basis points.
    pub seller_commission: u32,
    /// Whether the account can trade.
    pub can_trade: bool,
    /// Whether the account can withdraw.
    pub can_withdraw: bool,
    /// Whether the account can deposit.
    pub can_deposit: bool,
    /// Last account update.
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub update_time: OffsetDateTime,
    /// Account type (e.g. `"SPOT"`).
    #[serde(default)]
    pub account_type: Option<String>,
    /// Asset balances.
    #[serde(default)]
    pub balances: Vec<Balance>,
    /// Account permissions.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl AccountInfo {
    /// Look up the balance of one asset.
    pub fn balance(&self, asset: &str) -> Option<&Balance> {
        self.balances
            .iter()
            .find(|balance| balance.asset.eq_ignore_ascii_case(asset))
    }

    /// Balances with a non-zero free or locked amount.
    pub fn non_zero_balances(&self) -> impl Iterator<Item = &Balance> {
        self.balances.iter().filter(|balance| !balance.total().is_zero())
    }
}

/// Balance of a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Balance {
    /// Asset name.
    pub asset: String,
    /// Amount available for trading.
    pub free: Decimal,
    /// Amount locked in open orders.
    pub locked: Decimal,
}

impl Balance {
    /// Free plus locked amount.
    pub fn total(&self) -> Decimal {
        self.free + self.locked
    }
}

/// A user data stream listen key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenKey {
    /// Opaque token identifying the stream.
    pub listen_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListenKeyParams<'a> {
    pub listen_key: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_balances() {
        let json = r#"{
            "makerCommission": 15,
            "takerCommission": 15,
            "buyerCommission": 0,
            "sellerCommission": 0,
            "canTrade": true,
            "canWithdraw": true,
            "canDeposit": true,
            "updateTime": 123456789,
            "accountType": "SPOT",
            "balances": [
                {"asset": "BTC", "free": "4723846.89208129", "locked": "0.00000000"},
                {"asset": "LTC", "free": "0.00000000", "locked": "0.00000000"}
            ],
            "permissions": ["SPOT"]
        }"#;
        let account: AccountInfo = serde_json::from_str(json).unwrap();

        assert_eq!(account.maker_commission, 15);
        assert_eq!(account.update_time.unix_timestamp(), 123_456);
        assert_eq!(account.non_zero_balances().count(), 1);
        assert!(account.balance("btc").is_some());
        assert!(account.balance("ETH").is_none());
    }

    #[test]
    fn test_listen_key_params_encoding() {
        let params = ListenKeyParams { listen_key: "pqia91ma19a5s61cv6a81va65sdf19v8a65a1a5s61cv6a81va65sdf19v8a65a1" };
        let query = serde_urlencoded::to_string(&params).unwrap();
        assert!(query.starts_with("listenKey=pqia91ma"));
    }
}
