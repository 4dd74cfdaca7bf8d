#![no_std]

use soroban_sdk::{contractclient, Address, Env};

/// Trait defining the interface of a yield-generating pool.
/// This trait is used to generate the PoolClient for type-safe cross-contract calls.
///
/// The exchange rate is the asset value of one share, scaled by
/// `10^asset_decimals`.
#[contractclient(name = "PoolClient")]
pub trait PoolTrait {
    /// Pulls `assets` from `from` (via allowance) and credits the minted shares to `from`.
    fn deposit(e: Env, from: Address, assets: i128) -> i128;
    /// Burns `shares` owned by `from` and sends the redeemed assets to `to`.
    fn withdraw(e: Env, from: Address, shares: i128, to: Address) -> i128;
    fn exchange_rate(e: Env) -> i128;
    fn asset_decimals(e: Env) -> u32;
}
