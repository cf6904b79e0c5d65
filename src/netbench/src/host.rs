use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;

use indexmap::IndexMap;
use thiserror::Error;

use crate::bundle::Bundle;

#[derive(Debug, Error)]
pub enum Error {
    /// At most one configuration may be registered per (hostname,
    /// configuration name) pair at a time.
    #[error("duplicate configuration {conf_name} for host {hostname}")]
    DuplicateConfig { hostname: String, conf_name: String },
}

thread_local! {
    // hostname -> conf_name -> bundle. The core is single-threaded by
    // design; per-thread storage also isolates tests from each other.
    static REGISTRY: RefCell<IndexMap<String, IndexMap<String, HostBundle>>> =
        RefCell::new(IndexMap::new());
}

/// A bundle with identity: the configuration of host `hostname` under
/// scenario configuration `conf_name`. Construction registers the bundle
/// process-wide so any later phase can look it up with [`HostBundle::find`].
#[derive(Clone)]
pub struct HostBundle {
    bundle: Bundle,
    hostname: String,
    conf_name: String,
}

impl HostBundle {
    pub fn new(hostname: &str, conf_name: &str) -> Result<Self, Error> {
        REGISTRY.with(|r| {
            let mut registry = r.borrow_mut();
            let confs = registry
                .entry(hostname.to_owned())
                .or_insert_with(IndexMap::new);
            if confs.contains_key(conf_name) {
                return Err(Error::DuplicateConfig {
                    hostname: hostname.to_owned(),
                    conf_name: conf_name.to_owned(),
                });
            }
            let bundle = HostBundle {
                bundle: Bundle::new(),
                hostname: hostname.to_owned(),
                conf_name: conf_name.to_owned(),
            };
            confs.insert(conf_name.to_owned(), bundle.clone());
            log::debug!("registered configuration {}/{}", hostname, conf_name);
            Ok(bundle)
        })
    }

    #[inline]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    #[inline]
    pub fn conf_name(&self) -> &str {
        &self.conf_name
    }

    #[inline]
    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    /// O(1) registry lookup; `None` when the pair was never registered.
    pub fn find(hostname: &str, conf_name: &str) -> Option<HostBundle> {
        REGISTRY.with(|r| {
            r.borrow()
                .get(hostname)
                .and_then(|confs| confs.get(conf_name))
                .cloned()
        })
    }

    /// All registered bundles matching the given filters; both `None`
    /// returns every registered bundle across all hosts.
    pub fn filter_conf(hostname: Option<&str>, conf_name: Option<&str>) -> Vec<HostBundle> {
        REGISTRY.with(|r| {
            r.borrow()
                .iter()
                .filter(|(host, _)| hostname.map_or(true, |h| h == host.as_str()))
                .flat_map(|(_, confs)| confs.values().cloned().collect::<Vec<_>>())
                .filter(|b| conf_name.map_or(true, |c| c == b.conf_name))
                .collect()
        })
    }

    pub fn str_tree(&self) -> String {
        self.bundle
            .str_tree_named(&format!("{}/{}", self.hostname, self.conf_name))
    }
}

/// Clears the process-wide registry. Meant for test isolation; the registry
/// otherwise lives until process exit.
pub fn clear_registry() {
    REGISTRY.with(|r| r.borrow_mut().clear());
}

impl Deref for HostBundle {
    type Target = Bundle;

    fn deref(&self) -> &Bundle {
        &self.bundle
    }
}

impl fmt::Debug for HostBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostBundle")
            .field("hostname", &self.hostname)
            .field("conf_name", &self.conf_name)
            .field("bundle", &self.bundle)
            .finish()
    }
}

impl fmt::Display for HostBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.hostname, self.conf_name)
    }
}
