use serde::{Deserialize, Serialize};

use netbench::{Benchmark, Interface, Service, Tag, TeamInterface};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    pub hostname: String,

    #[serde(default)]
    pub packages: Vec<String>,

    #[serde(default)]
    pub services: Vec<Service>,

    #[serde(default)]
    pub interfaces: Vec<Interface>,

    #[serde(default)]
    pub team_interfaces: Vec<TeamInterface>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub benchmarks: Vec<Benchmark>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Scenario name, used as the configuration name in the host registry
    pub name: String,

    /// Output directory of collected results
    #[serde(default)]
    pub directory: Option<std::path::PathBuf>,

    #[serde(rename = "host")]
    pub hosts: Vec<HostConfig>,

    /// Environment variables
    #[serde(default)]
    pub envs: toml::value::Table,
}

pub fn read_config<P: AsRef<std::path::Path>>(path: P) -> ScenarioConfig {
    use std::io::Read;
    let mut file = std::fs::File::open(path).expect("fail to open file");
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    toml::from_str(&content).expect("parse failed")
}
