//! Built-in commands: Quit, Exit, Help, Usage.
//!
//! These are the reference implementations of the `Command` contract;
//! everything else plugs in from outside through the same trait.

use std::io::Write;

use keysh_types::Result;

use crate::command::{Command, Environment, Status};

/// Register the built-in commands into a registry.
pub fn register_builtins(reg: &mut crate::CommandRegistry) -> Result<()> {
    reg.register(Box::new(QuitCmd))?;
    reg.register(Box::new(ExitCmd))?;
    reg.register(Box::new(HelpCmd))?;
    reg.register(Box::new(UsageCmd))?;
    Ok(())
}

/// One `Help` listing line for a command.
fn help_line(cmd: &dyn Command) -> String {
    format!("    {:12} {}", cmd.name(), cmd.description())
}

// ---------------------------------------------------------------------------
// Quit / Exit
// ---------------------------------------------------------------------------

struct QuitCmd;
impl Command for QuitCmd {
    fn name(&self) -> &str {
        "Quit"
    }
    fn min_match(&self) -> usize {
        1
    }
    fn description(&self) -> &str {
        "Quit the process."
    }
    fn usage(&self) -> &str {
        "Quit"
    }
    fn execute(&self, _args: &[String], _env: &mut Environment<'_>) -> Result<Status> {
        Ok(Status::Quit)
    }
}

struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "Exit"
    }
    fn min_match(&self) -> usize {
        1
    }
    fn description(&self) -> &str {
        "Exit the process."
    }
    fn usage(&self) -> &str {
        "Exit"
    }
    fn execute(&self, _args: &[String], _env: &mut Environment<'_>) -> Result<Status> {
        Ok(Status::Quit)
    }
}

// ---------------------------------------------------------------------------
// Help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "Help"
    }
    fn min_match(&self) -> usize {
        1
    }
    fn description(&self) -> &str {
        "Show the function of the command."
    }
    fn usage(&self) -> &str {
        "Help [Command command]"
    }
    fn execute(&self, args: &[String], env: &mut Environment<'_>) -> Result<Status> {
        match args.first() {
            None => {
                for cmd in env.registry.commands() {
                    writeln!(env.out, "{}", help_line(cmd))?;
                }
            },
            Some(keyword) => match env.registry.resolve(keyword) {
                Some(cmd) => writeln!(env.out, "{}", help_line(cmd))?,
                None => writeln!(env.out, "Command '{keyword}' is not supported.")?,
            },
        }
        Ok(Status::Done)
    }
}

// ---------------------------------------------------------------------------
// Usage
// ---------------------------------------------------------------------------

struct UsageCmd;
impl Command for UsageCmd {
    fn name(&self) -> &str {
        "Usage"
    }
    fn min_match(&self) -> usize {
        3
    }
    fn description(&self) -> &str {
        "Show the usage of the command."
    }
    fn usage(&self) -> &str {
        "Usage <Command command>"
    }
    fn execute(&self, args: &[String], env: &mut Environment<'_>) -> Result<Status> {
        let Some(keyword) = args.first() else {
            writeln!(env.out, "usage: {}", self.usage())?;
            return Ok(Status::Error);
        };
        match env.registry.resolve(keyword) {
            Some(cmd) => {
                writeln!(env.out, "{}", cmd.usage())?;
                Ok(Status::Done)
            },
            None => {
                writeln!(env.out, "Command '{keyword}' is not supported.")?;
                Ok(Status::Error)
            },
        }
    }
}
