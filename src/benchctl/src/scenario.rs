use netbench::{sync_all_pairs, HostBundle, Package};

use crate::config::ScenarioConfig;

/// Builds and registers one `HostBundle` per scenario host, seeded from the
/// configuration file, and declares all-pairs synchronization.
pub fn build_host_bundles(config: &ScenarioConfig) -> anyhow::Result<Vec<HostBundle>> {
    let mut hosts = Vec::new();
    for hc in &config.hosts {
        let hb = HostBundle::new(&hc.hostname, &config.name)?;
        for name in &hc.packages {
            hb.child("packages").add_component(Package::new(name));
        }
        for svc in &hc.services {
            hb.child("services").add_component(svc.clone());
        }
        for intf in &hc.interfaces {
            hb.child("interfaces").add_component(intf.clone());
        }
        for team in &hc.team_interfaces {
            hb.child("interfaces").add_component(team.clone());
        }
        for tag in &hc.tags {
            hb.child("tags").add_component(tag.clone());
        }
        for bench in &hc.benchmarks {
            hb.child("benchmarks").add_component(bench.clone());
        }
        hosts.push(hb);
    }
    sync_all_pairs(&hosts);
    Ok(hosts)
}
