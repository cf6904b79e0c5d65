mod argument;
mod config;
mod scenario;
mod tools;

use std::path::Path;

use anyhow::Result;
use structopt::StructOpt;

use netbench::{Benchmark, ConfigObject, HostBundle, ObjectKind, Role, SubsetQuery, SyncHost};

use crate::config::ScenarioConfig;

fn set_env_vars(config: &ScenarioConfig) {
    for (k, v) in config.envs.iter() {
        let v = v.as_str().expect("expect String type");
        log::debug!("setting environment {}={}", k, v);
        std::env::set_var(k, v);
    }
}

/// Logs the configuration each host would receive. Actually applying
/// packages, services and interfaces on the remote hosts is the job of the
/// deployment tooling around this binary.
fn setup_phase(hosts: &[HostBundle]) {
    for h in hosts {
        for kind in &[
            ObjectKind::Package,
            ObjectKind::Service,
            ObjectKind::Interface,
        ] {
            for c in &h.get_subset(SubsetQuery::new().kind(*kind)) {
                log::info!("[setup] {}: {}", h, c);
            }
        }
    }
}

fn sync_phase(hosts: &[HostBundle]) {
    for h in hosts {
        for c in &h.get_subset(SubsetQuery::new().kind(ObjectKind::Sync)) {
            let peer = c.as_any().downcast_ref::<SyncHost>().unwrap();
            log::info!("[sync] {} barriers with {}", h, peer.hostname);
        }
    }
}

fn benchmarks_of(host: &HostBundle, role: Role) -> Vec<Benchmark> {
    host.get_subset(SubsetQuery::new().kind(ObjectKind::Benchmark))
        .get_all_components()
        .iter()
        .filter_map(|c| c.as_any().downcast_ref::<Benchmark>().cloned())
        .filter(|b| b.role == role)
        .collect()
}

fn run_phase(hosts: &[HostBundle], dry_run: bool, directory: Option<&Path>) -> Result<()> {
    let mut servers = Vec::new();
    for h in hosts {
        for bench in benchmarks_of(h, Role::Server) {
            let mut cmd = tools::benchmark_command(&bench)?;
            if dry_run {
                log::info!("[run] {}: {}", h, utils::cmd::command_str(&cmd));
            } else {
                log::info!("[run] {}: starting {}", h, bench);
                servers.push(cmd.spawn()?);
            }
        }
    }

    for h in hosts {
        for bench in benchmarks_of(h, Role::Client) {
            let cmd = tools::benchmark_command(&bench)?;
            let cmd_str = utils::cmd::command_str(&cmd);
            if dry_run {
                log::info!("[run] {}: {}", h, cmd_str);
                continue;
            }
            let output = utils::cmd::run_command(cmd)?;
            log::info!("[run] {}: {} finished", h, bench);
            if let Some(dir) = directory {
                let file = dir.join("result.txt");
                utils::fs::append_to_file(&file, &format!("# {}: {}", h, cmd_str));
                utils::fs::append_to_file(&file, &output);
            }
        }
    }

    for mut server in servers {
        server.kill().ok();
        server.wait().ok();
    }
    Ok(())
}

fn main() -> Result<()> {
    logging::init_log();

    let opt = argument::Opts::from_args();
    log::info!("Opts: {:#?}", opt);

    let config = config::read_config(&opt.config);
    log::info!("scenario: {}", config.name);

    set_env_vars(&config);

    // create the output directory if it does not exist
    if let Some(path) = &config.directory {
        std::fs::create_dir_all(path).expect("fail to create directory");
        let file = path.join("result.txt");
        if file.exists() {
            std::fs::remove_file(&file)?;
        }
    }

    let hosts = scenario::build_host_bundles(&config)?;
    for h in &hosts {
        log::info!("\n{}", h.str_tree());
    }

    setup_phase(&hosts);
    sync_phase(&hosts);
    run_phase(&hosts, opt.dry_run, config.directory.as_deref())?;

    Ok(())
}
