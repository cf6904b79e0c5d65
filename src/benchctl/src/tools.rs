use std::process::Command;

use anyhow::bail;

use netbench::{Benchmark, Role, Tool};

/// Maps one benchmark endpoint to the command line of the underlying tool.
pub fn benchmark_command(bench: &Benchmark) -> anyhow::Result<Command> {
    let peer = || -> anyhow::Result<&str> {
        match bench.peer.as_deref() {
            Some(p) => Ok(p),
            None => bail!("{} client requires a peer", bench.tool),
        }
    };

    let cmd = match (bench.tool, bench.role) {
        (Tool::Iperf3, Role::Server) => {
            let mut c = Command::new("iperf3");
            c.arg("-s").arg("-p").arg(bench.port.to_string());
            c
        }
        (Tool::Iperf3, Role::Client) => {
            let mut c = Command::new("iperf3");
            c.arg("-c")
                .arg(peer()?)
                .arg("-p")
                .arg(bench.port.to_string())
                .arg("-t")
                .arg(bench.duration_secs.to_string())
                .arg("-P")
                .arg(bench.parallel.to_string());
            c
        }
        (Tool::Netperf, Role::Server) => {
            let mut c = Command::new("netserver");
            // -D keeps netserver in the foreground so we can manage it
            c.arg("-D").arg("-p").arg(bench.port.to_string());
            c
        }
        (Tool::Netperf, Role::Client) => {
            let mut c = Command::new("netperf");
            c.arg("-H")
                .arg(peer()?)
                .arg("-p")
                .arg(bench.port.to_string())
                .arg("-l")
                .arg(bench.duration_secs.to_string());
            c
        }
        (Tool::Sockperf, Role::Server) => {
            let mut c = Command::new("sockperf");
            c.arg("server").arg("-p").arg(bench.port.to_string());
            c
        }
        (Tool::Sockperf, Role::Client) => {
            let mut c = Command::new("sockperf");
            c.arg("ping-pong")
                .arg("-i")
                .arg(peer()?)
                .arg("-p")
                .arg(bench.port.to_string())
                .arg("-t")
                .arg(bench.duration_secs.to_string());
            c
        }
    };
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use utils::cmd::command_str;

    fn bench(tool: Tool, role: Role, peer: Option<&str>) -> Benchmark {
        Benchmark {
            tool,
            role,
            peer: peer.map(|p| p.to_owned()),
            port: 5201,
            duration_secs: 10,
            parallel: 2,
        }
    }

    #[test]
    fn test_iperf3_args() {
        let server = benchmark_command(&bench(Tool::Iperf3, Role::Server, None)).unwrap();
        assert_eq!(command_str(&server), "iperf3 -s -p 5201");

        let client =
            benchmark_command(&bench(Tool::Iperf3, Role::Client, Some("host1"))).unwrap();
        assert_eq!(command_str(&client), "iperf3 -c host1 -p 5201 -t 10 -P 2");
    }

    #[test]
    fn test_netperf_args() {
        let client =
            benchmark_command(&bench(Tool::Netperf, Role::Client, Some("host1"))).unwrap();
        assert_eq!(command_str(&client), "netperf -H host1 -p 5201 -l 10");
    }

    #[test]
    fn test_sockperf_args() {
        let client =
            benchmark_command(&bench(Tool::Sockperf, Role::Client, Some("host1"))).unwrap();
        assert_eq!(command_str(&client), "sockperf ping-pong -i host1 -p 5201 -t 10");
    }

    #[test]
    fn test_client_without_peer() {
        assert!(benchmark_command(&bench(Tool::Iperf3, Role::Client, None)).is_err());
    }
}
