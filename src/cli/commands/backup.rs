use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    else {
        return Ok(());
    };

    if let Some(path) = BackupLogic::backup(cfg, file, *compress, *force)? {
        let bytes = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        info(format!(
            "{:.1} KB written (drafts, treatment logs and audit log included)",
            bytes as f64 / 1024.0
        ));
    }

    Ok(())
}
