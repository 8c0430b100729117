use clap::Parser;

/// Command-line surface on top of the environment variables below.
/// Every option here mirrors an env var so the server stays scriptable from
/// either a shell or an MCP client's process-launch config.
#[derive(Debug, Parser)]
#[command(name = "broker", version, about = "MCP server brokering chat/review/debug tools to remote model providers")]
pub struct Args {
    /// Log filter string, e.g. "info" or "kernel=debug,providers=debug".
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}
