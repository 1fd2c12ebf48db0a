use directories_next::ProjectDirs;
use std::fs;
use std::io::{self, BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use bevy::log::{debug, error, info};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "TableDesk";
const APPLICATION: &str = "TableDesk";
const CONFIG_FILE: &str = "app_settings.json";

pub fn get_config_path() -> io::Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION) {
        let config_dir = proj_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(config_dir.join(CONFIG_FILE))
    } else {
        Err(io::Error::new(ErrorKind::NotFound, "Could not determine project directories for app settings."))
    }
}

pub fn load_settings_from_file<T: for<'de> serde::de::Deserialize<'de> + Default>() -> io::Result<T> {
    load_settings_from(&get_config_path()?)
}

/// A missing file yields `T::default()`; a malformed one is an error.
pub fn load_settings_from<T: for<'de> serde::de::Deserialize<'de> + Default>(config_file: &Path) -> io::Result<T> {
    debug!("AppSettings: Attempting to load settings from {:?}", config_file);
    match fs::File::open(config_file) {
        Ok(file) => {
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).map_err(|e| {
                error!("AppSettings: Failed to parse settings file {:?}: {}", config_file, e);
                io::Error::new(ErrorKind::InvalidData, format!("Failed to parse settings file: {}", e))
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("AppSettings: Settings file not found at {:?}. Returning default.", config_file);
            Ok(Default::default())
        }
        Err(e) => {
            error!("AppSettings: Failed to open settings file {:?}: {}", config_file, e);
            Err(e)
        }
    }
}

pub fn save_settings_to_file<T: serde::Serialize>(settings: &T) -> io::Result<PathBuf> {
    let config_file = get_config_path()?;
    save_settings_to(settings, &config_file)?;
    Ok(config_file)
}

pub fn save_settings_to<T: serde::Serialize>(settings: &T, config_file: &Path) -> io::Result<()> {
    info!("AppSettings: Saving settings to {:?}", config_file);
    let file = fs::File::create(config_file)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, settings).map_err(|e| {
        error!("AppSettings: Failed to serialize settings to {:?}: {}", config_file, e);
        io::Error::other(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppSettings;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tabledesk-settings-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn save_then_load_from_explicit_path() {
        let path = temp_file("roundtrip");
        let settings = AppSettings {
            database_path: Some(PathBuf::from("/srv/tables.db")),
            log_level: "info".into(),
            ..Default::default()
        };
        save_settings_to(&settings, &path).unwrap();
        let loaded: AppSettings = load_settings_from(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_gives_defaults_and_garbage_is_an_error() {
        let path = temp_file("missing");
        let _ = fs::remove_file(&path);
        let loaded: AppSettings = load_settings_from(&path).unwrap();
        assert_eq!(loaded, AppSettings::default());

        let path = temp_file("garbage");
        fs::write(&path, "{ not json").unwrap();
        let err = load_settings_from::<AppSettings>(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        let _ = fs::remove_file(&path);
    }
}
