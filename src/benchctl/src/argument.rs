use structopt::StructOpt;

#[derive(Debug, Clone, StructOpt)]
#[structopt(name = "benchctl", about = "Network benchmark orchestrator")]
pub struct Opts {
    /// The scenario configuration file
    #[structopt(short = "c", long = "config")]
    pub config: std::path::PathBuf,

    /// Print benchmark commands instead of executing them
    #[structopt(long)]
    pub dry_run: bool,
}
