//! Caller identity at the contract boundary.
//!
//! Certificate verification belongs to the host. The contract only sees the
//! outcome through [`CertificateVerifier`]: either the account the
//! certificate proves, or nothing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ACCOUNT_ID_LEN: usize = 32;

/// A 32-byte account identifier, shown and serialized as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId([u8; ACCOUNT_ID_LEN]);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid account id: {0}")]
pub struct InvalidAccountId(String);

impl AccountId {
    #[inline]
    pub const fn new(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({self})")
    }
}

impl FromStr for AccountId {
    type Err = InvalidAccountId;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidAccountId(text.to_owned());
        if text.len() != ACCOUNT_ID_LEN * 2 || !text.is_ascii() {
            return Err(invalid());
        }

        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&text[2 * i..2 * i + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for AccountId {
    type Error = InvalidAccountId;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.to_string()
    }
}

/// Opaque proof of identity presented with a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate(pub Vec<u8>);

/// Resolves a certificate to the account it proves, if any.
pub trait CertificateVerifier {
    fn verify(&self, certificate: &Certificate) -> Option<AccountId>;
}

impl<F> CertificateVerifier for F
where
    F: Fn(&Certificate) -> Option<AccountId>,
{
    fn verify(&self, certificate: &Certificate) -> Option<AccountId> {
        self(certificate)
    }
}

/// The signed transaction a command arrives in. The host has already
/// authenticated `caller`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionContext {
    pub caller: AccountId,
}

impl TransactionContext {
    #[inline]
    pub const fn new(caller: AccountId) -> Self {
        Self { caller }
    }
}

#[cfg(test)]
mod tests {
    use super::{AccountId, Certificate, CertificateVerifier};

    #[test]
    fn account_id_hex_round_trip() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[31] = 0x01;
        let id = AccountId::new(bytes);
        let text = id.to_string();
        assert_eq!(text.len(), 64);
        assert!(text.starts_with("ab00"));
        assert!(text.ends_with("01"));
        assert_eq!(text.parse::<AccountId>().expect("hex should parse"), id);

        let json = serde_json::to_string(&id).expect("id should serialize");
        assert_eq!(json, format!("\"{text}\""));
    }

    #[test]
    fn account_id_rejects_bad_hex() {
        assert!("abc".parse::<AccountId>().is_err());
        assert!("zz".repeat(32).parse::<AccountId>().is_err());
    }

    #[test]
    fn closures_act_as_verifiers() {
        let alice = AccountId::new([7; 32]);
        let verifier = move |cert: &Certificate| (cert.0 == b"alice").then_some(alice);
        assert_eq!(verifier.verify(&Certificate(b"alice".to_vec())), Some(alice));
        assert_eq!(verifier.verify(&Certificate(b"mallory".to_vec())), None);
    }
}
