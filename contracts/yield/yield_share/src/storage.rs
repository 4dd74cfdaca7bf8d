use soroban_sdk::{contracttype, Address, Env};
use yield_share_interface::Position;

// Storage TTL constants
pub const DAY_IN_LEDGERS: u32 = 17280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

// Positions hold principal, so they live as long as token balances do
pub const POSITION_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const POSITION_LIFETIME_THRESHOLD: u32 = POSITION_BUMP_AMOUNT - DAY_IN_LEDGERS;

// Instance storage keys
const ADMIN_KEY: &str = "admin";
const ASSET_KEY: &str = "asset";
const POOL_KEY: &str = "pool";
const DUST_THRESHOLD_KEY: &str = "dust_threshold";

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// donator -> position (principal, shares, receiver)
    Position(Address),
    /// (receiver, donator) -> true while the binding is live
    ReceiverOf(Address, Address),
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

// Admin functions
pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN_KEY, admin);
}

pub fn get_admin(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&ADMIN_KEY)
        .expect("Admin not set")
}

// Underlying asset (immutable after construction)
pub fn set_asset(env: &Env, asset: &Address) {
    env.storage().instance().set(&ASSET_KEY, asset);
}

pub fn get_asset(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&ASSET_KEY)
        .expect("Asset not set")
}

// Pool address (immutable after construction)
pub fn set_pool(env: &Env, pool: &Address) {
    env.storage().instance().set(&POOL_KEY, pool);
}

pub fn get_pool(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&POOL_KEY)
        .expect("Pool not set")
}

// Dust buffer in underlying base units
pub fn set_dust_threshold(env: &Env, dust_threshold: i128) {
    env.storage()
        .instance()
        .set(&DUST_THRESHOLD_KEY, &dust_threshold);
}

pub fn get_dust_threshold(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DUST_THRESHOLD_KEY)
        .unwrap_or(0)
}

// Positions and the receiver index. Writers below keep both in step.
pub fn get_position(env: &Env, donator: &Address) -> Option<Position> {
    let key = DataKey::Position(donator.clone());
    env.storage().persistent().get(&key)
}

/// Keeps a live position and its index flag from expiring.
pub fn bump_position(env: &Env, donator: &Address, receiver: &Address) {
    let storage = env.storage().persistent();
    storage.extend_ttl(
        &DataKey::Position(donator.clone()),
        POSITION_LIFETIME_THRESHOLD,
        POSITION_BUMP_AMOUNT,
    );
    storage.extend_ttl(
        &DataKey::ReceiverOf(receiver.clone(), donator.clone()),
        POSITION_LIFETIME_THRESHOLD,
        POSITION_BUMP_AMOUNT,
    );
}

pub fn has_position(env: &Env, donator: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Position(donator.clone()))
}

pub fn is_receiver_of(env: &Env, receiver: &Address, donator: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::ReceiverOf(receiver.clone(), donator.clone()))
        .unwrap_or(false)
}

/// Writes a fresh position together with its reverse-index flag.
pub fn open_position(env: &Env, donator: &Address, position: &Position) {
    let storage = env.storage().persistent();
    storage.set(&DataKey::Position(donator.clone()), position);
    storage.set(
        &DataKey::ReceiverOf(position.receiver.clone(), donator.clone()),
        &true,
    );
    bump_position(env, donator, &position.receiver);
}

/// Share balance update for an existing position; the binding is untouched.
pub fn set_position_shares(env: &Env, donator: &Address, position: &Position, shares: i128) {
    let updated = Position {
        shares,
        ..position.clone()
    };
    env.storage()
        .persistent()
        .set(&DataKey::Position(donator.clone()), &updated);
    bump_position(env, donator, &position.receiver);
}

/// Removes the position and its reverse-index flag.
pub fn close_position(env: &Env, donator: &Address, position: &Position) {
    let storage = env.storage().persistent();
    storage.remove(&DataKey::Position(donator.clone()));
    storage.remove(&DataKey::ReceiverOf(
        position.receiver.clone(),
        donator.clone(),
    ));
}
