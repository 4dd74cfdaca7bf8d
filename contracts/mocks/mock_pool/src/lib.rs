#![no_std]
use pool_interface::PoolTrait;
use soroban_sdk::{contract, contractimpl, token, Address, Env};


/// Mock Pool Contract
///
/// Simplified yield pool whose exchange rate grows linearly with ledger time at a
/// configurable rate, and can also be set directly to script gains or losses.
/// Shares are plain balances and are not transferable.
#[contract]
pub struct MockPool;

/// Storage keys
const ASSET: &str = "asset";
const DECIMALS: &str = "decimals";
const TOTAL_SHARES: &str = "total_shares";
const CHECKPOINT_RATE: &str = "checkpoint_rate"; // Rate at LAST_UPDATE_TIME
const LAST_UPDATE_TIME: &str = "last_update_time";
const YIELD_RATE: &str = "yield_rate"; // Basis points per second (10000 = 100% per second)

const BASIS_POINTS_SCALE: i128 = 10_000; // 1 basis point = 0.01%

#[contractimpl]
impl MockPool {
    /// Initialize the mock pool at a 1:1 rate
    /// yield_rate_bps: yield rate in basis points per second (e.g., 1 = 0.01% per second)
    pub fn __constructor(e: Env, asset: Address, yield_rate_bps: i128) {
        let decimals = token::Client::new(&e, &asset).decimals();

        e.storage().instance().set(&ASSET, &asset);
        e.storage().instance().set(&DECIMALS, &decimals);
        e.storage().instance().set(&YIELD_RATE, &yield_rate_bps);
        e.storage().instance().set(&TOTAL_SHARES, &0i128);

        let one = Self::scale(&e);
        e.storage().instance().set(&CHECKPOINT_RATE, &one);
        Self::update_timestamp(&e);
    }

    /// Pin the exchange rate; lower values simulate a loss in the pool
    pub fn set_exchange_rate(e: Env, rate: i128) {
        if rate <= 0 {
            panic!("exchange rate must be positive");
        }
        e.storage().instance().set(&CHECKPOINT_RATE, &rate);
        Self::update_timestamp(&e);
    }

    /// Set the yield rate (in basis points per second)
    pub fn set_yield_rate(e: Env, yield_rate_bps: i128) {
        // Lock in what has accrued at the old rate
        Self::checkpoint(&e);
        e.storage().instance().set(&YIELD_RATE, &yield_rate_bps);
    }

    /// Get the yield rate
    pub fn get_yield_rate(e: Env) -> i128 {
        Self::get_yield_rate_internal(&e)
    }

    pub fn get_asset(e: Env) -> Address {
        Self::asset(&e)
    }

    /// Get share balance for an address
    pub fn balance(e: Env, account: Address) -> i128 {
        Self::get_balance(&e, &account)
    }

    /// Get total shares outstanding
    pub fn total_shares(e: Env) -> i128 {
        Self::get_total_shares(&e)
    }

    // ========== Internal Helper Functions ==========

    /// 10^decimals, the rate that means one asset per share
    fn scale(e: &Env) -> i128 {
        let decimals: u32 = e
            .storage()
            .instance()
            .get(&DECIMALS)
            .expect("decimals not initialized");
        10i128.checked_pow(decimals).expect("decimals too large")
    }

    fn current_rate(e: &Env) -> i128 {
        let checkpoint: i128 = e
            .storage()
            .instance()
            .get(&CHECKPOINT_RATE)
            .expect("rate not initialized");

        let current_time = e.ledger().timestamp();
        let last_update = Self::get_last_update_time(e);
        let time_elapsed = current_time.saturating_sub(last_update) as i128;
        let yield_rate = Self::get_yield_rate_internal(e);

        // rate = checkpoint + checkpoint * yield_rate * time_elapsed / BASIS_POINTS_SCALE
        let accrued = checkpoint
            .checked_mul(yield_rate)
            .and_then(|v| v.checked_mul(time_elapsed))
            .and_then(|v| v.checked_div(BASIS_POINTS_SCALE))
            .unwrap_or(0);

        checkpoint.checked_add(accrued).unwrap_or(checkpoint)
    }

    /// Fold accrued yield into the stored rate
    fn checkpoint(e: &Env) {
        let rate = Self::current_rate(e);
        e.storage().instance().set(&CHECKPOINT_RATE, &rate);
        Self::update_timestamp(e);
    }

    fn update_timestamp(e: &Env) {
        let current_time = e.ledger().timestamp();
        e.storage().instance().set(&LAST_UPDATE_TIME, &current_time);
    }

    fn asset(e: &Env) -> Address {
        e.storage()
            .instance()
            .get(&ASSET)
            .expect("asset not initialized")
    }

    fn get_total_shares(e: &Env) -> i128 {
        e.storage().instance().get(&TOTAL_SHARES).unwrap_or(0)
    }

    fn get_yield_rate_internal(e: &Env) -> i128 {
        e.storage().instance().get(&YIELD_RATE).unwrap_or(0)
    }

    fn get_last_update_time(e: &Env) -> u64 {
        e.storage().instance().get(&LAST_UPDATE_TIME).unwrap_or(0)
    }

    fn get_balance(e: &Env, account: &Address) -> i128 {
        let key = ("balance", account);
        e.storage().persistent().get(&key).unwrap_or(0)
    }

    fn set_balance(e: &Env, account: &Address, amount: i128) {
        let key = ("balance", account);
        e.storage().persistent().set(&key, &amount);
    }

    fn mint_shares(e: &Env, to: &Address, amount: i128) {
        let new_balance = Self::get_balance(e, to)
            .checked_add(amount)
            .expect("balance overflow");
        Self::set_balance(e, to, new_balance);

        let new_total = Self::get_total_shares(e)
            .checked_add(amount)
            .expect("total overflow");
        e.storage().instance().set(&TOTAL_SHARES, &new_total);
    }

    fn burn_shares(e: &Env, from: &Address, amount: i128) {
        let current_balance = Self::get_balance(e, from);
        if current_balance < amount {
            panic!("insufficient shares");
        }
        Self::set_balance(e, from, current_balance - amount);

        let total_shares = Self::get_total_shares(e);
        e.storage()
            .instance()
            .set(&TOTAL_SHARES, &(total_shares - amount));
    }
}

#[contractimpl]
impl PoolTrait for MockPool {
    fn deposit(e: Env, from: Address, assets: i128) -> i128 {
        from.require_auth();

        if assets <= 0 {
            panic!("deposit amount must be positive");
        }

        Self::checkpoint(&e);

        // shares = assets * scale / rate, rounded down
        let shares = assets
            .checked_mul(Self::scale(&e))
            .and_then(|v| v.checked_div(Self::current_rate(&e)))
            .expect("share conversion overflow");

        // Pull assets using the allowance granted by `from`
        let this = e.current_contract_address();
        let asset_client = token::Client::new(&e, &Self::asset(&e));
        asset_client.transfer_from(&this, &from, &this, &assets);

        Self::mint_shares(&e, &from, shares);

        shares
    }

    fn withdraw(e: Env, from: Address, shares: i128, to: Address) -> i128 {
        from.require_auth();

        if shares <= 0 {
            panic!("withdraw amount must be positive");
        }

        Self::checkpoint(&e);

        // assets = shares * rate / scale, rounded down
        let assets = shares
            .checked_mul(Self::current_rate(&e))
            .and_then(|v| v.checked_div(Self::scale(&e)))
            .expect("asset conversion overflow");

        Self::burn_shares(&e, &from, shares);

        let this = e.current_contract_address();
        let asset_client = token::Client::new(&e, &Self::asset(&e));
        if asset_client.balance(&this) < assets {
            panic!("insufficient pool balance");
        }
        asset_client.transfer(&this, &to, &assets);

        assets
    }

    fn exchange_rate(e: Env) -> i128 {
        Self::current_rate(&e)
    }

    fn asset_decimals(e: Env) -> u32 {
        e.storage()
            .instance()
            .get(&DECIMALS)
            .expect("decimals not initialized")
    }
}
