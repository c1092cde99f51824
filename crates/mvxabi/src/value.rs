use std::fmt;
use std::str::FromStr;
use bech32::{FromBase32, ToBase32, Variant};
use num_bigint::{BigInt, BigUint};
use crate::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Boolean(bool),
    Int(BigInt),
    UInt(BigUint),
    Address(Address),
    Bytes(Vec<u8>),
    String(String),
    H256([u8; 32]),
    TokenIdentifier(String),
    CodeMetadata(CodeMetadata),
    Unit,
    Struct(Vec<Field>),
    Enum(EnumValue),
    List(Vec<Value>),
    Array(Vec<Value>),
    Tuple(Vec<Value>),
    Option(Option<Box<Value>>),
    Multi(Vec<Value>),
    Variadic(Vec<Value>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new(name: &str, value: Value) -> Self {
        Self { name: name.to_string(), value }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub discriminant: u8,
    pub fields: Vec<Field>,
}

impl EnumValue {
    pub fn new(name: &str, discriminant: u8, fields: Vec<Field>) -> Self {
        Self { name: name.to_string(), discriminant, fields }
    }
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "bool",
            Value::Int(_) => "signed integer",
            Value::UInt(_) => "unsigned integer",
            Value::Address(_) => "Address",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "utf-8 string",
            Value::H256(_) => "H256",
            Value::TokenIdentifier(_) => "TokenIdentifier",
            Value::CodeMetadata(_) => "CodeMetadata",
            Value::Unit => "Nothing",
            Value::Struct(_) => "struct",
            Value::Enum(_) => "enum",
            Value::List(_) => "List",
            Value::Array(_) => "array",
            Value::Tuple(_) => "tuple",
            Value::Option(_) => "Option",
            Value::Multi(_) => "multi",
            Value::Variadic(_) => "variadic",
        }
    }

    pub fn as_boolean(&self) -> Result<bool, Error> {
        match self {
            Value::Boolean(boolean) => Ok(*boolean),
            _ => Err(Error::mismatch("bool", self.kind_name())),
        }
    }

    pub fn as_int(&self) -> Result<&BigInt, Error> {
        match self {
            Value::Int(int) => Ok(int),
            _ => Err(Error::mismatch("signed integer", self.kind_name())),
        }
    }

    pub fn as_uint(&self) -> Result<&BigUint, Error> {
        match self {
            Value::UInt(uint) => Ok(uint),
            _ => Err(Error::mismatch("unsigned integer", self.kind_name())),
        }
    }

    pub fn as_address(&self) -> Result<&Address, Error> {
        match self {
            Value::Address(address) => Ok(address),
            _ => Err(Error::mismatch("Address", self.kind_name())),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], Error> {
        match self {
            Value::Bytes(bytes) => Ok(bytes),
            _ => Err(Error::mismatch("bytes", self.kind_name())),
        }
    }

    pub fn as_string(&self) -> Result<&str, Error> {
        match self {
            Value::String(string) => Ok(string),
            _ => Err(Error::mismatch("utf-8 string", self.kind_name())),
        }
    }

    pub fn as_h256(&self) -> Result<&[u8; 32], Error> {
        match self {
            Value::H256(hash) => Ok(hash),
            _ => Err(Error::mismatch("H256", self.kind_name())),
        }
    }

    pub fn as_token_identifier(&self) -> Result<&str, Error> {
        match self {
            Value::TokenIdentifier(identifier) => Ok(identifier),
            _ => Err(Error::mismatch("TokenIdentifier", self.kind_name())),
        }
    }

    pub fn as_code_metadata(&self) -> Result<&CodeMetadata, Error> {
        match self {
            Value::CodeMetadata(metadata) => Ok(metadata),
            _ => Err(Error::mismatch("CodeMetadata", self.kind_name())),
        }
    }

    pub fn as_unit(&self) -> Result<(), Error> {
        match self {
            Value::Unit => Ok(()),
            _ => Err(Error::mismatch("Nothing", self.kind_name())),
        }
    }

    pub fn as_struct(&self) -> Result<&[Field], Error> {
        match self {
            Value::Struct(fields) => Ok(fields),
            _ => Err(Error::mismatch("struct", self.kind_name())),
        }
    }

    pub fn as_enum(&self) -> Result<&EnumValue, Error> {
        match self {
            Value::Enum(value) => Ok(value),
            _ => Err(Error::mismatch("enum", self.kind_name())),
        }
    }

    pub fn as_list(&self) -> Result<&[Value], Error> {
        match self {
            Value::List(list) => Ok(list),
            _ => Err(Error::mismatch("List", self.kind_name())),
        }
    }

    pub fn as_array(&self) -> Result<&[Value], Error> {
        match self {
            Value::Array(array) => Ok(array),
            _ => Err(Error::mismatch("array", self.kind_name())),
        }
    }

    pub fn as_tuple(&self) -> Result<&[Value], Error> {
        match self {
            Value::Tuple(tuple) => Ok(tuple),
            _ => Err(Error::mismatch("tuple", self.kind_name())),
        }
    }

    pub fn as_option(&self) -> Result<Option<&Value>, Error> {
        match self {
            Value::Option(option) => Ok(option.as_deref()),
            _ => Err(Error::mismatch("Option", self.kind_name())),
        }
    }

    pub fn as_multi(&self) -> Result<&[Value], Error> {
        match self {
            Value::Multi(items) => Ok(items),
            _ => Err(Error::mismatch("multi", self.kind_name())),
        }
    }

    pub fn as_variadic(&self) -> Result<&[Value], Error> {
        match self {
            Value::Variadic(items) => Ok(items),
            _ => Err(Error::mismatch("variadic", self.kind_name())),
        }
    }

    /// Looks up a struct field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(fields) => fields.iter().find(|field| field.name == name).map(|field| &field.value),
            Value::Enum(value) => value.fields.iter().find(|field| field.name == name).map(|field| &field.value),
            _ => None,
        }
    }
}

/// A 32-byte account address.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 32]);

impl Address {
    pub const LENGTH: usize = 32;
    pub const HRP: &'static str = "erd";

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn zero() -> Self {
        Self([0; 32])
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != Self::LENGTH {
            return Err(Error::InvalidLength { expected: Self::LENGTH, actual: bytes.len() });
        }
        let mut address = [0u8; 32];
        address.copy_from_slice(bytes);
        Ok(Self(address))
    }

    pub fn from_hex(address: &str) -> Result<Self, Error> {
        let address = address.strip_prefix("0x").unwrap_or(address);
        Self::from_slice(&hex::decode(address)?)
    }

    /// Parses an `erd1…` address.
    pub fn from_bech32(address: &str) -> Result<Self, Error> {
        let (hrp, data, variant) = bech32::decode(address)?;
        if hrp != Self::HRP || variant != Variant::Bech32 {
            return Err(Error::InvalidData(format!("{} is not an {} address", address, Self::HRP)));
        }
        Self::from_slice(&Vec::<u8>::from_base32(&data)?)
    }

    pub fn to_bech32(&self) -> Result<String, Error> {
        Ok(bech32::encode(Self::HRP, self.0.to_base32(), Variant::Bech32)?)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Contract accounts are allocated with eight leading zero bytes.
    pub fn is_smart_contract(&self) -> bool {
        self.0[..8].iter().all(|&byte| byte == 0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bech32().map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Accepts `erd1…` as well as (optionally `0x`-prefixed) hex.
    fn from_str(address: &str) -> Result<Self, Self::Err> {
        if address.starts_with(Self::HRP) {
            Self::from_bech32(address)
        } else {
            Self::from_hex(address)
        }
    }
}

/// Deployment flags of a contract, serialised as two bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CodeMetadata {
    pub upgradeable: bool,
    pub readable: bool,
    pub payable: bool,
    pub payable_by_contract: bool,
}

const UPGRADEABLE: u8 = 0x01;
const READABLE: u8 = 0x04;
const PAYABLE: u8 = 0x02;
const PAYABLE_BY_CONTRACT: u8 = 0x04;

impl CodeMetadata {
    pub const LENGTH: usize = 2;

    pub fn to_bytes(&self) -> [u8; 2] {
        let mut bytes = [0u8; 2];
        if self.upgradeable {
            bytes[0] |= UPGRADEABLE;
        }
        if self.readable {
            bytes[0] |= READABLE;
        }
        if self.payable {
            bytes[1] |= PAYABLE;
        }
        if self.payable_by_contract {
            bytes[1] |= PAYABLE_BY_CONTRACT;
        }
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != Self::LENGTH {
            return Err(Error::InvalidLength { expected: Self::LENGTH, actual: bytes.len() });
        }
        Ok(Self {
            upgradeable: bytes[0] & UPGRADEABLE != 0,
            readable: bytes[0] & READABLE != 0,
            payable: bytes[1] & PAYABLE != 0,
            payable_by_contract: bytes[1] & PAYABLE_BY_CONTRACT != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Boolean(true).as_boolean(), Ok(true));
        assert_eq!(Value::UInt(7_u8.into()).as_uint(), Ok(&BigUint::from(7_u8)));
        assert_eq!(
            Value::Bytes(vec![1]).as_string(),
            Err(Error::mismatch("utf-8 string", "bytes")),
        );
        assert_eq!(
            Value::Option(Some(Box::new(Value::Unit))).as_option(),
            Ok(Some(&Value::Unit)),
        );
    }

    #[test]
    fn test_struct_field_lookup() {
        let value = Value::Struct(vec![
            Field::new("nonce", Value::UInt(5_u8.into())),
            Field::new("ticker", Value::TokenIdentifier("WEGLD-bd4d79".to_string())),
        ]);
        assert_eq!(value.field("nonce"), Some(&Value::UInt(5_u8.into())));
        assert_eq!(value.field("missing"), None);
    }

    #[test]
    fn test_address_hex() {
        let hex = "000000000000000005001111111111111111111111111111111111111111ffff";
        let address = Address::from_hex(hex).unwrap();
        assert_eq!(address.to_hex(), hex);
        assert!(address.is_smart_contract());
        assert_eq!(Address::from_hex(&format!("0x{}", hex)), Ok(address));

        assert_eq!(
            Address::from_hex("feedface"),
            Err(Error::InvalidLength { expected: 32, actual: 4 }),
        );
        assert!(matches!(Address::from_hex("zz"), Err(Error::Hex(_))));
    }

    #[test]
    fn test_address_bech32() {
        let alice = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";
        let address = Address::from_bech32(alice).unwrap();
        assert_eq!(address.to_hex(), "0139472eff6886771a982f3083da5d421f24c29181e63888228dc81ca60d69e1");
        assert_eq!(address.to_bech32(), Ok(alice.to_string()));
        assert_eq!(address.to_string(), alice);
        assert!(!address.is_smart_contract());

        let contract: Address = "erd1qqqqqqqqqqqqqpgqak8zt22wl2ph4tswtyc39namqx6ysa2sd8ss4xmlj3".parse().unwrap();
        assert_eq!(contract.to_hex(), "00000000000000000500ed8e25a94efa837aae0e593112cfbb01b448755069e1");
        assert!(contract.is_smart_contract());
        assert_eq!(contract.to_hex().parse::<Address>(), Ok(contract));
    }

    #[test]
    fn test_invalid_bech32() {
        assert!(matches!(
            Address::from_bech32("erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6tt"),
            Err(Error::Bech32(_)),
        ));
        // Same payload under another prefix.
        let other = bech32::encode("moa", [1u8; 32].to_base32(), Variant::Bech32).unwrap();
        assert!(matches!(Address::from_bech32(&other), Err(Error::InvalidData(_))));
        let short = bech32::encode("erd", [1u8; 20].to_base32(), Variant::Bech32).unwrap();
        assert_eq!(
            Address::from_bech32(&short),
            Err(Error::InvalidLength { expected: 32, actual: 20 }),
        );
    }

    #[test]
    fn test_code_metadata_flags() {
        let metadata = CodeMetadata {
            upgradeable: true,
            readable: true,
            payable: false,
            payable_by_contract: true,
        };
        assert_eq!(metadata.to_bytes(), [0x05, 0x04]);
        assert_eq!(CodeMetadata::from_bytes(&[0x05, 0x04]), Ok(metadata));
        assert_eq!(
            CodeMetadata::from_bytes(&[0x01]),
            Err(Error::InvalidLength { expected: 2, actual: 1 }),
        );
    }
}
