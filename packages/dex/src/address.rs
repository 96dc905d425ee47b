//! Bech32 account addresses.

use std::{fmt, str::FromStr};

use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Serialize};

use crate::error::AddressError;

/// Address bytes without a chain prefix: 20 bytes for key accounts, 32 for
/// module and contract accounts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RawAddress {
    Short([u8; 20]),
    Long([u8; 32]),
}

impl RawAddress {
    fn from_slice(bytes: &[u8]) -> Option<Self> {
        match bytes.len() {
            20 => bytes.try_into().ok().map(RawAddress::Short),
            32 => bytes.try_into().ok().map(RawAddress::Long),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RawAddress::Short(bytes) => bytes,
            RawAddress::Long(bytes) => bytes,
        }
    }

    /// Attach a human readable part, failing if bech32 would reject it.
    pub fn with_hrp(self, hrp: impl Into<String>) -> Result<Address, AddressError> {
        let hrp = hrp.into();
        match bech32::encode(&hrp, self.as_bytes().to_base32(), Variant::Bech32) {
            Ok(_) => Ok(Address { hrp, raw: self }),
            Err(source) => Err(AddressError::Hrp { hrp, source }),
        }
    }
}

/// A bech32 address, such as the creator of a dex message.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    hrp: String,
    raw: RawAddress,
}

impl Address {
    /// Human readable part, e.g. `cosmos`
    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    pub fn raw(&self) -> RawAddress {
        self.raw
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bech32_err = |source| AddressError::Bech32 {
            address: s.to_owned(),
            source,
        };
        let (hrp, data, variant) = bech32::decode(s).map_err(bech32_err)?;
        if variant != Variant::Bech32 {
            return Err(AddressError::Bech32m {
                address: s.to_owned(),
            });
        }
        let bytes = Vec::<u8>::from_base32(&data).map_err(bech32_err)?;
        let raw = RawAddress::from_slice(&bytes).ok_or_else(|| AddressError::Length {
            address: s.to_owned(),
            len: bytes.len(),
        })?;
        Ok(Address { hrp, raw })
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match bech32::encode_to_fmt(f, &self.hrp, self.raw.as_bytes().to_base32(), Variant::Bech32)
        {
            Ok(res) => res,
            // The HRP was checked when the address was built.
            Err(_) => Err(fmt::Error),
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Anything acting on behalf of a single account.
pub trait HasAddress {
    fn get_address(&self) -> Address;

    fn get_address_string(&self) -> String {
        self.get_address().to_string()
    }
}

impl HasAddress for Address {
    fn get_address(&self) -> Address {
        self.clone()
    }
}
