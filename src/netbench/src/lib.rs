//! Configuration bundles for distributed network benchmarks.
//!
//! A [`Bundle`] is a node in a possibly-cyclic named tree of configuration
//! objects. Hosts participating in a benchmark each own a [`HostBundle`],
//! registered under their (hostname, configuration name) pair, and the
//! orchestration phases query the tree with [`SubsetQuery`] to pick out the
//! objects they care about.

pub mod bundle;
pub mod component;
mod display;
pub mod host;
pub mod sync;

pub use bundle::{Bundle, Child, SubsetQuery};
pub use component::{
    Benchmark, Component, ConfigObject, Interface, ObjectKind, Package, Role, Service,
    ServiceState, Tag, TeamInterface, Tool,
};
pub use host::HostBundle;
pub use sync::{sync_all_pairs, SyncHost};
