use soroban_sdk::{contractevent, Address};

/// A donator opened a position bound to `receiver`.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StartShare {
    #[topic]
    pub donator: Address,
    pub receiver: Address,
    pub amount: i128,
    pub shares: i128,
}

/// A donator closed their position and got `amount_returned` back.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StopShare {
    #[topic]
    pub donator: Address,
    pub amount_returned: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claimed {
    #[topic]
    pub donator: Address,
    pub receiver: Address,
    pub claimed: i128,
    pub new_share_balance: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DustThresholdSet {
    pub old_threshold: i128,
    pub new_threshold: i128,
}
