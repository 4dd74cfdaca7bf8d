#![no_std]

use soroban_sdk::{contractclient, contracterror, contracttype, Address, Env};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LedgerError {
    InvalidReceiver = 1,
    InvalidAmount = 2,
    AlreadyActive = 3,
    NoActivePosition = 4,
    PrincipalLoss = 5,
    NotAuthorizedReceiver = 6,
    NoYieldAvailable = 7,
    InsufficientYieldAfterRounding = 8,
    ClaimExceedsYield = 9,
    MathOverflow = 10,
    InvalidExchangeRate = 11,
    InvalidDustThreshold = 12,
}

/// A donator's active position. Absent from storage while the donator is inactive.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    /// Asset amount deposited, in underlying base units
    pub principal: i128,
    /// Pool shares currently backing the position
    pub shares: i128,
    /// The only address allowed to claim this position's yield
    pub receiver: Address,
}

/// Trait defining the interface for the Yield Share ledger contract.
/// This trait is used to generate the YieldShareLedgerClient for type-safe cross-contract calls.
#[contractclient(name = "YieldShareLedgerClient")]
pub trait YieldShareTrait {
    fn __constructor(
        env: Env,
        admin: Address,
        asset: Address,
        pool: Address,
        dust_threshold: i128,
    );

    fn start(
        env: Env,
        donator: Address,
        receiver: Address,
        amount: i128,
    ) -> Result<i128, LedgerError>;
    fn stop(env: Env, donator: Address) -> Result<i128, LedgerError>;
    fn claim(env: Env, receiver: Address, donator: Address) -> Result<i128, LedgerError>;
    fn claimable(env: Env, donator: Address, receiver: Address) -> i128;

    fn set_dust_threshold(env: Env, dust_threshold: i128) -> Result<(), LedgerError>;

    fn get_position(env: Env, donator: Address) -> Option<Position>;
    fn get_receiver(env: Env, donator: Address) -> Option<Address>;
    fn is_receiver_of(env: Env, receiver: Address, donator: Address) -> bool;
    fn get_dust_threshold(env: Env) -> i128;
    fn get_admin(env: Env) -> Address;
    fn get_asset(env: Env) -> Address;
    fn get_pool(env: Env) -> Address;
}
