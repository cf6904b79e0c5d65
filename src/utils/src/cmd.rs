use std::process::Command;

pub fn command_str(cmd: &Command) -> String {
    let prog = cmd.get_program().to_string_lossy();
    let args = cmd.get_args().map(|x| x.to_string_lossy());
    std::iter::once(prog)
        .chain(args)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs the command to completion and returns its stdout.
pub fn run_command(mut cmd: Command) -> anyhow::Result<String> {
    let cmd_str = command_str(&cmd);
    log::debug!("executing command: {}", cmd_str);

    use std::os::unix::process::ExitStatusExt; // for status.signal()
    let result = cmd.output()?;

    if !result.status.success() {
        return match result.status.code() {
            Some(code) => Err(anyhow::anyhow!(
                "Exited with code: {}, cmd: {}",
                code,
                cmd_str
            )),
            None => Err(anyhow::anyhow!(
                "Process terminated by signal: {}, cmd: {}",
                result.status.signal().unwrap_or(-1),
                cmd_str,
            )),
        };
    }

    Ok(std::str::from_utf8(&result.stdout)?.to_owned())
}
