//! keysh entry point.
//!
//! Interactive shell over the controlling terminal: raw mode is held only
//! while a line is being read, so command output runs in cooked mode.

mod commands;
mod config;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;

use keysh_core::{LineEvent, Shell, Status, register_builtins};
use keysh_term::{RawModeGuard, TermKeyReader};

use config::ShellConfig;

fn config_path() -> PathBuf {
    std::env::var_os("KEYSH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("keysh.toml"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ShellConfig::load(&config_path())?;
    log::info!("starting keysh (prompt {:?})", config.prompt);

    let mut shell = Shell::new(config.prompt.as_str()).with_page_step(config.page_step);
    register_builtins(shell.registry_mut())?;
    commands::register_app_commands(shell.registry_mut())?;

    let mut keys = TermKeyReader::new();
    let mut out = io::stdout();

    loop {
        let event = {
            let _raw = RawModeGuard::new()?;
            shell.read_line(&mut keys, &mut out)?
        };
        match event {
            LineEvent::Interrupted => {
                log::debug!("interrupted, shutting down");
                break;
            },
            LineEvent::Submitted(line) => {
                let status = shell.execute_line(&line, &mut out);
                writeln!(out)?;
                out.flush()?;
                if status == Status::Quit {
                    break;
                }
            },
        }
    }

    Ok(())
}
