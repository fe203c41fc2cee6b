//! Central place for all default values.
//! Update these and the whole app picks them up.

use std::time::Duration;

pub struct Defaults;

impl Defaults {
    /* Connection */
    pub const RPC_URL: &'static str = "http://127.0.0.1:8545";
    pub const BLOCK_POLL_INTERVAL: Duration = Duration::from_secs(2);

    /* Deployment artifacts */
    pub const CONTRACTS_DIR: &'static str = "./contracts";
    pub const CONTRACT_NAME: &'static str = "RWA";
    pub const ADDRESS_FILE: &'static str = "contract-address.json";
    pub const ARTIFACT_PATH: &'static str = "./artifacts/contracts/RWA.sol/RWA.json";

    /* Logging */
    pub const LOG_FILE: &'static str = "./rwa.log";
    pub const LOG_FILTER: &'static str = "info";

    /* UI */
    pub const TOAST_TTL: Duration = Duration::from_secs(5);
    pub const MAX_TOASTS: usize = 4;
    pub const TICK: Duration = Duration::from_millis(250);
}
