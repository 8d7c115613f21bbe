//! User configuration options.

use crate::{BASE_DIR, CLIOptions};
use dirs::config_dir;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions, create_dir};
use std::io::{Read, Write};
use std::path::PathBuf;

const LOG_TAG: &str = "UserConfig";

fn get_cfg_file() -> PathBuf {
    let mut dir =
        config_dir().unwrap_or_else(|| panic!("{}: Couldn't open user config dir", LOG_TAG));
    dir.push(BASE_DIR);
    if !dir.exists() {
        create_dir(&dir)
            .unwrap_or_else(|e| panic!("{}: Couldn't create {:?}: {}", LOG_TAG, dir, e));
    }
    dir.push("user.toml");
    dir
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub flags: u32,
    pub duration: i32,
    pub slide_speed: i32,
    pub slide_distance: i32,
    pub realtime: bool,
    pub seed: u16,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            flags: 0b100100,
            duration: 120,
            slide_speed: 4,
            slide_distance: 44,
            realtime: false,
            seed: 0x1234,
        }
    }
}

impl UserConfig {
    /// `load` will attempt to read the config, and panic if errored
    pub fn load() -> Self {
        let path = get_cfg_file();

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.clone())
            .unwrap_or_else(|e| panic!("Couldn't open {:?}, {}", path, e));
        let mut buf = String::new();
        if let Ok(read_len) = file.read_to_string(&mut buf) {
            if read_len == 0 {
                return UserConfig::create_default(&mut file);
            } else {
                if let Ok(data) = toml::from_str(&buf) {
                    info!(target: LOG_TAG, "Loaded user config file");
                    return data;
                }
                warn!("Could not deserialise {:?} recreating config", path);
            }
        }
        UserConfig::create_default(&mut file)
    }

    fn create_default(file: &mut File) -> Self {
        let config = UserConfig::default();
        // Should be okay to unwrap this as is since it is a Default
        let data = toml::to_string(&config).unwrap();
        file.write_all(data.as_bytes())
            .unwrap_or_else(|_| panic!("Could not write {:?}", get_cfg_file()));
        info!("Created default user config file");
        config
    }

    pub fn write(&self) {
        let mut file = File::create(get_cfg_file()).expect("Couldn't overwrite config");
        let data = toml::to_string_pretty(self).expect("Serialise config failed");
        file.write_all(data.as_bytes())
            .unwrap_or_else(|err| error!("Could not write config: {}", err));
    }

    /// Sync the CLI options and UserOptions with each other
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!("Checking CLI options");

        if let Some(flags) = cli.flags {
            if flags != self.flags {
                self.flags = flags;
            }
        } else {
            cli.flags = Some(self.flags);
        }

        if let Some(duration) = cli.duration {
            if duration != self.duration {
                self.duration = duration;
            }
        } else {
            cli.duration = Some(self.duration);
        }

        if let Some(speed) = cli.slide_speed {
            if speed != self.slide_speed {
                self.slide_speed = speed;
            }
        } else {
            cli.slide_speed = Some(self.slide_speed);
        }

        if let Some(distance) = cli.slide_distance {
            if distance != self.slide_distance {
                self.slide_distance = distance;
            }
        } else {
            cli.slide_distance = Some(self.slide_distance);
        }

        if let Some(f) = cli.realtime {
            if f != self.realtime {
                self.realtime = f;
            }
        } else {
            cli.realtime = Some(self.realtime);
        }

        if let Some(seed) = cli.seed {
            if seed != self.seed {
                self.seed = seed;
            }
        } else {
            cli.seed = Some(self.seed);
        }
    }
}
