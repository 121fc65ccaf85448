//! Application-level commands.
//!
//! These plug into the shell through the same `Command` trait as any
//! external feature; the core never sees them specially.

use std::io::Write;

use keysh_core::{Command, CommandRegistry, Environment, Status};
use keysh_types::Result;

/// Register the application's commands into the shared registry.
pub fn register_app_commands(reg: &mut CommandRegistry) -> Result<()> {
    reg.register(Box::new(VersionCmd))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

struct VersionCmd;
impl Command for VersionCmd {
    fn name(&self) -> &str {
        "Version"
    }
    fn min_match(&self) -> usize {
        1
    }
    fn description(&self) -> &str {
        "Show the keysh version."
    }
    fn usage(&self) -> &str {
        "Version"
    }
    fn execute(&self, _args: &[String], env: &mut Environment<'_>) -> Result<Status> {
        writeln!(env.out, "keysh {}", env!("CARGO_PKG_VERSION"))?;
        Ok(Status::Done)
    }
}
