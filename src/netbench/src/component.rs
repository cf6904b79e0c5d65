use std::any::Any;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Coarse type tag of a configuration object, the unit of class-based
/// filtering. Several concrete types may share one kind (e.g. [`Interface`]
/// and [`TeamInterface`] are both `ObjectKind::Interface`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Interface,
    Package,
    Service,
    Tag,
    Sync,
    Benchmark,
}

/// A leaf configuration object stored in a bundle.
pub trait ConfigObject: fmt::Debug + fmt::Display + Any {
    fn kind(&self) -> ObjectKind;
    fn as_any(&self) -> &dyn Any;
    /// Value copy into a fresh allocation, for [`Bundle::deep_clone`].
    ///
    /// [`Bundle::deep_clone`]: crate::Bundle::deep_clone
    fn deep_clone(&self) -> Component;
}

/// Leaves are shared by reference so that shallow copies of a bundle keep
/// leaf identity.
pub type Component = Rc<dyn ConfigObject>;

macro_rules! impl_config_object {
    ($($ty:ty => $kind:ident),+ $(,)?) => (
        $(impl $crate::component::ConfigObject for $ty {
            fn kind(&self) -> $crate::component::ObjectKind {
                $crate::component::ObjectKind::$kind
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn deep_clone(&self) -> $crate::component::Component {
                std::rc::Rc::new(self.clone())
            }
        })+
    )
}
pub(crate) use impl_config_object;

/// A plain network device with optional addressing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub mtu: Option<u32>,
}

impl Interface {
    #[inline]
    pub fn new(name: &str) -> Self {
        Interface {
            name: name.to_owned(),
            addresses: Vec::new(),
            mtu: None,
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iface {}", self.name)?;
        if !self.addresses.is_empty() {
            write!(f, " [{}]", self.addresses.join(", "))?;
        }
        Ok(())
    }
}

/// A link-aggregation device over a set of slave interfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInterface {
    pub name: String,
    pub slaves: Vec<String>,
}

impl TeamInterface {
    #[inline]
    pub fn new(name: &str, slaves: Vec<String>) -> Self {
        TeamInterface {
            name: name.to_owned(),
            slaves,
        }
    }
}

impl fmt::Display for TeamInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team {} [{}]", self.name, self.slaves.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
}

impl Package {
    #[inline]
    pub fn new(name: &str) -> Self {
        Package {
            name: name.to_owned(),
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pkg {}", self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Running,
    Stopped,
}

impl Default for ServiceState {
    fn default() -> Self {
        ServiceState::Running
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceState::Running => write!(f, "running"),
            ServiceState::Stopped => write!(f, "stopped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub state: ServiceState,
}

impl Service {
    #[inline]
    pub fn new(name: &str, state: ServiceState) -> Self {
        Service {
            name: name.to_owned(),
            state,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "service {} ({})", self.name, self.state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    #[inline]
    pub fn new(key: &str, value: &str) -> Self {
        Tag {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag {}={}", self.key, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Iperf3,
    Netperf,
    Sockperf,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Iperf3 => write!(f, "iperf3"),
            Tool::Netperf => write!(f, "netperf"),
            Tool::Sockperf => write!(f, "sockperf"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Server,
    Client,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Server => write!(f, "server"),
            Role::Client => write!(f, "client"),
        }
    }
}

/// One benchmark endpoint to run on a host. Clients name the peer they
/// connect to; servers only need a port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub tool: Tool,
    pub role: Role,
    #[serde(default)]
    pub peer: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_duration")]
    pub duration_secs: u64,
    #[serde(default = "default_parallel")]
    pub parallel: u32,
}

fn default_port() -> u16 {
    5201
}

fn default_duration() -> u64 {
    10
}

fn default_parallel() -> u32 {
    1
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            Role::Server => write!(f, "{} server :{}", self.tool, self.port),
            Role::Client => write!(
                f,
                "{} client -> {}:{}",
                self.tool,
                self.peer.as_deref().unwrap_or("?"),
                self.port
            ),
        }
    }
}

impl_config_object! {
    Interface => Interface,
    TeamInterface => Interface,
    Package => Package,
    Service => Service,
    Tag => Tag,
    Benchmark => Benchmark,
}
