#![no_std]

mod contract;
mod events;
mod math;
mod storage;


pub use yield_share_interface::{LedgerError, Position, YieldShareTrait};

#[cfg(feature = "contract")]
pub use contract::{YieldShare, YieldShareClient};
