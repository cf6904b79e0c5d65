use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::impl_config_object;
use crate::host::HostBundle;

/// Declares that the owning host must barrier-synchronize with `hostname`
/// between benchmark phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncHost {
    pub hostname: String,
}

impl SyncHost {
    #[inline]
    pub fn new(hostname: &str) -> Self {
        SyncHost {
            hostname: hostname.to_owned(),
        }
    }
}

impl fmt::Display for SyncHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sync {}", self.hostname)
    }
}

impl_config_object!(SyncHost => Sync);

/// Adds all-pairs [`SyncHost`] declarations: every host learns every other
/// host's name.
pub fn sync_all_pairs(hosts: &[HostBundle]) {
    for a in hosts {
        for b in hosts {
            if a.hostname() != b.hostname() {
                a.add_component(SyncHost::new(b.hostname()));
            }
        }
    }
}
