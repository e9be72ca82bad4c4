use std::env;
use std::path::PathBuf;

use folio::config::{read_config, Config};
use folio::logger::default_log_location;

use crate::CFG_FILE_NAME;

/// Executable dir, then current dir, then the user config dir.
fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()));
    let candidates = [exe_dir, env::current_dir().ok(), dirs::config_dir()];

    candidates.into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err(format!("Could not find {}", CFG_FILE_NAME)),
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path).map_err(|e| e.to_string())?;

    if let Some(mut log) = config.log {
        let location = log.location.unwrap_or_else(default_log_location);
        println!("Log enabled. Files will be written in {}", location.display());
        log.location = Some(location);
        config.log = Some(log);
    } else {
        println!("Log disabled. Using stdout");
    }

    Ok(config)
}
