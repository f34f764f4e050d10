/* This file is part of the VidGrab project
*
*  Copyright (C) 2025 The VidGrab Contributors
*  
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::{fs::File, io::{self, Read, Write}, path::Path};

use anyhow::Context;
use log::info;
use vidgrab_client::ClientConfig;

pub const CONFIG_PATH: &str = "vidgrab.toml";

/// Reads the config file, writing out the defaults if it doesn't exist yet
pub fn load_or_create(path: &Path) -> anyhow::Result<ClientConfig> {
    let display = path.display();
    match File::open(path) {
        Ok(mut file) => {
            let mut contents = String::new();
            file.read_to_string(&mut contents).with_context(|| format!("Failed to read {display}"))?;
            let cfg: ClientConfig = toml::from_str(&contents).with_context(|| format!("Failed to deserialize contents of {display}"))?;
            cfg.base_url().with_context(|| format!("Invalid configuration in {display}"))?;
            Ok(cfg)
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let cfg = ClientConfig::default();
            let serialized = toml::to_string(&cfg).context("Failed to serialize default ClientConfig as TOML")?;
            let mut file = File::options().write(true).create_new(true).open(path).with_context(|| format!("Failed to create {display}"))?;
            write!(file, "{serialized}").with_context(|| format!("Failed to write serialized default ClientConfig to {display}"))?;
            info!("Wrote default configuration to {display}");
            Ok(cfg)
        },
        Err(e) => Err(e).with_context(|| format!("Failed to open {display}")),
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, time::Duration};

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_gets_defaults_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_PATH);
        let cfg = load_or_create(&path).unwrap();
        assert_eq!(cfg, ClientConfig::default());

        let written: ClientConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, cfg);
        // second load reads the file instead of recreating it
        assert_eq!(load_or_create(&path).unwrap(), cfg);
    }

    #[test]
    fn existing_file_is_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_PATH);
        fs::write(&path, "api_base_url = \"https://grab.example.com/api/\"\npoll_interval_ms = 1000\n").unwrap();
        let cfg = load_or_create(&path).unwrap();
        assert_eq!(&*cfg.api_base_url, "https://grab.example.com/api/");
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_PATH);
        fs::write(&path, "api_base_url = \"nonsense\"\n").unwrap();
        assert!(load_or_create(&path).is_err());
        // a broken file is reported, never overwritten
        assert_eq!(fs::read_to_string(&path).unwrap(), "api_base_url = \"nonsense\"\n");
    }
}
