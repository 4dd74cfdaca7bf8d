use soroban_sdk::{log, panic_with_error, token, Address, Env};
use crate::events::{Claimed, DustThresholdSet, StartShare, StopShare};
use crate::math::{self, Rate};
use crate::storage;
use pool_interface::PoolClient;
use yield_share_interface::{LedgerError, Position, YieldShareTrait};

#[cfg(feature = "contract")]
use soroban_sdk::{contract, contractimpl};

#[cfg(feature = "contract")]
#[contract]
pub struct YieldShare;

#[cfg(feature = "contract")]
impl YieldShare {
    fn pool_client(env: &Env) -> PoolClient<'_> {
        PoolClient::new(env, &storage::get_pool(env))
    }

    // Snapshot of the pool rate; not cached across operations since the rate moves
    fn current_rate(pool: &PoolClient) -> Result<Rate, LedgerError> {
        Rate::new(pool.exchange_rate(), pool.asset_decimals())
    }

    // The receiver must be the one currently bound to the donator
    fn bound_position(
        env: &Env,
        donator: &Address,
        receiver: &Address,
    ) -> Option<Position> {
        storage::get_position(env, donator).filter(|p| &p.receiver == receiver)
    }
}

#[cfg(feature = "contract")]
#[contractimpl]
impl YieldShareTrait for YieldShare {
    fn __constructor(
        env: Env,
        admin: Address,
        asset: Address,
        pool: Address,
        dust_threshold: i128,
    ) {
        if dust_threshold < 0 {
            panic_with_error!(&env, LedgerError::InvalidDustThreshold);
        }

        storage::set_admin(&env, &admin);
        storage::set_asset(&env, &asset);
        storage::set_pool(&env, &pool);
        storage::set_dust_threshold(&env, dust_threshold);
    }

    fn start(
        env: Env,
        donator: Address,
        receiver: Address,
        amount: i128,
    ) -> Result<i128, LedgerError> {
        donator.require_auth();
        storage::extend_instance(&env);

        if receiver == donator {
            return Err(LedgerError::InvalidReceiver);
        }
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        // No top-up: an active donator has to stop first
        if storage::has_position(&env, &donator) {
            return Err(LedgerError::AlreadyActive);
        }

        let this = env.current_contract_address();
        let pool = Self::pool_client(&env);

        // Pull the asset into custody, then let the pool take exactly this amount
        let asset_client = token::Client::new(&env, &storage::get_asset(&env));
        asset_client.transfer(&donator, &this, &amount);
        asset_client.approve(&this, &pool.address, &amount, &env.ledger().sequence());

        let shares = pool.deposit(&this, &amount);
        if shares <= 0 {
            return Err(LedgerError::InvalidAmount);
        }

        storage::open_position(
            &env,
            &donator,
            &Position {
                principal: amount,
                shares,
                receiver: receiver.clone(),
            },
        );

        StartShare {
            donator: donator.clone(),
            receiver,
            amount,
            shares,
        }
        .publish(&env);
        Ok(shares)
    }

    fn stop(env: Env, donator: Address) -> Result<i128, LedgerError> {
        donator.require_auth();
        storage::extend_instance(&env);

        let position = storage::get_position(&env, &donator)
            .ok_or(LedgerError::NoActivePosition)?;

        // Clear the entry before the pool call so a re-entrant stop finds nothing
        storage::close_position(&env, &donator, &position);

        let returned = Self::pool_client(&env).withdraw(
            &env.current_contract_address(),
            &position.shares,
            &donator,
        );
        log!(
            &env,
            "stop: shares {}, principal {}, returned {}",
            position.shares,
            position.principal,
            returned
        );

        // Reverting here also restores the cleared entry
        if returned < position.principal {
            return Err(LedgerError::PrincipalLoss);
        }

        StopShare {
            donator,
            amount_returned: returned,
        }
        .publish(&env);
        Ok(returned)
    }

    fn claim(env: Env, receiver: Address, donator: Address) -> Result<i128, LedgerError> {
        receiver.require_auth();
        storage::extend_instance(&env);

        let position = Self::bound_position(&env, &donator, &receiver)
            .ok_or(LedgerError::NotAuthorizedReceiver)?;

        let pool = Self::pool_client(&env);
        let rate = Self::current_rate(&pool)?;
        let plan = math::plan_claim(
            &rate,
            position.principal,
            position.shares,
            storage::get_dust_threshold(&env),
        )?;
        log!(
            &env,
            "claim: rate {}, shares_to_claim {}, remaining_shares {}",
            rate.rate,
            plan.shares_to_claim,
            plan.remaining_shares
        );

        // Effects before the withdrawal, same as stop
        storage::set_position_shares(&env, &donator, &position, plan.remaining_shares);

        let claimed = pool.withdraw(
            &env.current_contract_address(),
            &plan.shares_to_claim,
            &receiver,
        );

        Claimed {
            donator,
            receiver,
            claimed,
            new_share_balance: plan.remaining_shares,
        }
        .publish(&env);
        Ok(claimed)
    }

    fn claimable(env: Env, donator: Address, receiver: Address) -> i128 {
        let Some(position) = Self::bound_position(&env, &donator, &receiver) else {
            return 0;
        };

        let pool = Self::pool_client(&env);
        Self::current_rate(&pool)
            .and_then(|rate| {
                math::plan_claim(
                    &rate,
                    position.principal,
                    position.shares,
                    storage::get_dust_threshold(&env),
                )
            })
            .map(|plan| plan.claim_value)
            .unwrap_or(0)
    }

    fn set_dust_threshold(env: Env, dust_threshold: i128) -> Result<(), LedgerError> {
        let admin = storage::get_admin(&env);
        admin.require_auth();
        storage::extend_instance(&env);

        if dust_threshold < 0 {
            return Err(LedgerError::InvalidDustThreshold);
        }

        let old = storage::get_dust_threshold(&env);
        storage::set_dust_threshold(&env, dust_threshold);
        DustThresholdSet {
            old_threshold: old,
            new_threshold: dust_threshold,
        }
        .publish(&env);
        Ok(())
    }

    fn get_position(env: Env, donator: Address) -> Option<Position> {
        storage::get_position(&env, &donator)
    }

    fn get_receiver(env: Env, donator: Address) -> Option<Address> {
        storage::get_position(&env, &donator).map(|p| p.receiver)
    }

    fn is_receiver_of(env: Env, receiver: Address, donator: Address) -> bool {
        storage::is_receiver_of(&env, &receiver, &donator)
    }

    fn get_dust_threshold(env: Env) -> i128 {
        storage::get_dust_threshold(&env)
    }

    fn get_admin(env: Env) -> Address {
        storage::get_admin(&env)
    }

    fn get_asset(env: Env) -> Address {
        storage::get_asset(&env)
    }

    fn get_pool(env: Env) -> Address {
        storage::get_pool(&env)
    }
}
