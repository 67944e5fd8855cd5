use serde::{Deserialize, Serialize};

use crate::domain::{Address, AddressId};

pub const ADDRESSES_ROUTE: &str = "/addresses";
pub const CSV_EXPORT_ROUTE: &str = "/csv";
pub const CHRISTMAS_CARD_EXPORT_ROUTE: &str = "/christmas_card";

/// Body returned by a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAddressResponse {
    #[serde(rename = "_id")]
    pub id: AddressId,
}

/// PUT bodies may carry one address or a batch of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpdatePayload {
    Many(Vec<Address>),
    One(Box<Address>),
}

impl UpdatePayload {
    pub fn into_vec(self) -> Vec<Address> {
        match self {
            UpdatePayload::Many(addresses) => addresses,
            UpdatePayload::One(address) => vec![*address],
        }
    }
}
