//! Event schemas emitted by the DEX contracts: pair, pair proxy and farm
//! proxy. Topic zero is the event name; the epoch topic is an unsigned
//! integer of whatever width the contract wrote.

use mvxabi::{FieldDefinition, StructType, TypeDescriptor};
use crate::{Error, EventDefinition};

pub const SWAP: &str = "swap";
pub const ADD_LIQUIDITY: &str = "add_liquidity";
pub const REMOVE_LIQUIDITY: &str = "remove_liquidity";
pub const SWAP_NO_FEE: &str = "swap_no_fee_and_forward";
pub const ADD_LIQUIDITY_PROXY: &str = "add_liquidity_proxy";
pub const REMOVE_LIQUIDITY_PROXY: &str = "remove_liquidity_proxy";
pub const ENTER_FARM_PROXY: &str = "enter_farm_proxy";
pub const EXIT_FARM_PROXY: &str = "exit_farm_proxy";
pub const CLAIM_REWARDS_PROXY: &str = "claim_rewards_farm_proxy";

fn field(name: &str, ty: TypeDescriptor) -> FieldDefinition {
    FieldDefinition::new(name, ty)
}

/// `[event, first_token, second_token, caller, epoch]`
pub fn pair_topics() -> Vec<FieldDefinition> {
    vec![
        field("first_token", TypeDescriptor::TokenIdentifier),
        field("second_token", TypeDescriptor::TokenIdentifier),
        field("caller", TypeDescriptor::Address),
        field("epoch", TypeDescriptor::BigUnsignedInt),
    ]
}

/// `[event, token_out, caller, epoch]`
pub fn swap_no_fee_topics() -> Vec<FieldDefinition> {
    vec![
        field("token_out", TypeDescriptor::TokenIdentifier),
        field("caller", TypeDescriptor::Address),
        field("epoch", TypeDescriptor::BigUnsignedInt),
    ]
}

/// `[event, first_token, second_token, caller, pair_address, epoch]`
pub fn pair_proxy_topics() -> Vec<FieldDefinition> {
    vec![
        field("first_token", TypeDescriptor::TokenIdentifier),
        field("second_token", TypeDescriptor::TokenIdentifier),
        field("caller", TypeDescriptor::Address),
        field("pair_address", TypeDescriptor::Address),
        field("epoch", TypeDescriptor::BigUnsignedInt),
    ]
}

/// `[event, token, caller, farm_address, epoch]`
pub fn farm_proxy_topics() -> Vec<FieldDefinition> {
    vec![
        field("token", TypeDescriptor::TokenIdentifier),
        field("caller", TypeDescriptor::Address),
        field("farm_address", TypeDescriptor::Address),
        field("epoch", TypeDescriptor::BigUnsignedInt),
    ]
}

pub fn wrapped_farm_token_attributes() -> StructType {
    StructType::new("WrappedFarmTokenAttributes", vec![
        field("farm_token_id", TypeDescriptor::TokenIdentifier),
        field("farm_token_nonce", TypeDescriptor::UnsignedInt(64)),
        field("farm_token_amount", TypeDescriptor::BigUnsignedInt),
        field("farming_token_id", TypeDescriptor::TokenIdentifier),
        field("farming_token_nonce", TypeDescriptor::UnsignedInt(64)),
        field("farming_token_amount", TypeDescriptor::BigUnsignedInt),
    ])
}

pub fn enter_farm_proxy_data() -> StructType {
    StructType::new("EnterFarmProxyEvent", vec![
        field("caller", TypeDescriptor::Address),
        field("farm_address", TypeDescriptor::Address),
        field("farming_token_id", TypeDescriptor::TokenIdentifier),
        field("farming_token_nonce", TypeDescriptor::UnsignedInt(64)),
        field("farming_token_amount", TypeDescriptor::BigUnsignedInt),
        field("wrapped_farm_token_id", TypeDescriptor::TokenIdentifier),
        field("wrapped_farm_token_nonce", TypeDescriptor::UnsignedInt(64)),
        field("wrapped_farm_token_amount", TypeDescriptor::BigUnsignedInt),
        field("wrapped_farm_attributes", TypeDescriptor::Struct(wrapped_farm_token_attributes())),
        field("created_with_merge", TypeDescriptor::Boolean),
        field("block", TypeDescriptor::UnsignedInt(64)),
        field("epoch", TypeDescriptor::UnsignedInt(64)),
        field("timestamp", TypeDescriptor::UnsignedInt(64)),
    ])
}

/// Topic-only schema of a pair event such as [`SWAP`].
pub fn pair_event(identifier: &str) -> Result<EventDefinition, Error> {
    EventDefinition::new(identifier, pair_topics(), None)
}

pub fn swap_no_fee_event() -> Result<EventDefinition, Error> {
    EventDefinition::new(SWAP_NO_FEE, swap_no_fee_topics(), None)
}

pub fn pair_proxy_event(identifier: &str) -> Result<EventDefinition, Error> {
    EventDefinition::new(identifier, pair_proxy_topics(), None)
}

/// Topic-only schema of a farm proxy event such as [`EXIT_FARM_PROXY`].
pub fn farm_proxy_event(identifier: &str) -> Result<EventDefinition, Error> {
    EventDefinition::new(identifier, farm_proxy_topics(), None)
}

pub fn enter_farm_proxy_event() -> Result<EventDefinition, Error> {
    EventDefinition::new(
        ENTER_FARM_PROXY,
        farm_proxy_topics(),
        Some(TypeDescriptor::Struct(enter_farm_proxy_data())),
    )
}
