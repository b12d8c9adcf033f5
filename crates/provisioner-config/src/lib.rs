pub mod error;
pub mod settings;

pub use error::*;
pub use settings::{
    BackoffKind, EndpointSettings, InstanceSettings, NotificationSettings, RetrySettings, Settings,
};

use std::path::{Path, PathBuf};

/// 設定ファイルのパスを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "PROVISION_CONFIG_PATH";

const CANDIDATES: [&str; 4] = [
    "provision.local.yaml",
    "provision.local.yml",
    "provision.yaml",
    "provision.yml",
];

/// Provisionerのグローバル設定ディレクトリを取得
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("provisioner");
    Ok(config_dir)
}

/// 設定ファイルを探す
///
/// 以下の優先順位で設定ファイルを検索:
/// 1. 環境変数 PROVISION_CONFIG_PATH (直接パス指定、存在しなければエラー)
/// 2. カレントディレクトリ: provision.local.yaml, provision.local.yml, provision.yaml, provision.yml
/// 3. ./.provisioner/ ディレクトリ内: 同様の順序
/// 4. ~/.config/provisioner/provision.yaml (グローバル設定)
///
/// どれも見つからない場合は `Ok(None)`（すべてデフォルト値で動作）
pub fn find_settings_file() -> Result<Option<PathBuf>> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if !path.exists() {
            return Err(ConfigError::ExplicitFileNotFound(path));
        }
        return Ok(Some(path));
    }

    let current_dir = std::env::current_dir()?;

    // 2. カレントディレクトリで検索
    if let Some(path) = first_existing(&current_dir) {
        return Ok(Some(path));
    }

    // 3. ./.provisioner/ ディレクトリで検索
    let local_dir = current_dir.join(".provisioner");
    if local_dir.is_dir() {
        if let Some(path) = first_existing(&local_dir) {
            return Ok(Some(path));
        }
    }

    // 4. グローバル設定ファイル
    if let Ok(config_dir) = get_config_dir() {
        let global = config_dir.join("provision.yaml");
        if global.exists() {
            return Ok(Some(global));
        }
    }

    Ok(None)
}

fn first_existing(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// 設定ファイルを読み込む
pub fn load_file(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    Settings::from_yaml_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// 設定をロード
///
/// `explicit` が指定されていればそのファイルのみを読む。なければ
/// [`find_settings_file`] の結果を使い、見つからなければデフォルト値。
/// 戻り値の2つ目は実際に読み込んだファイル。
pub fn load(explicit: Option<&Path>) -> Result<(Settings, Option<PathBuf>)> {
    let path = match explicit {
        Some(path) if !path.exists() => {
            return Err(ConfigError::ExplicitFileNotFound(path.to_path_buf()));
        }
        Some(path) => Some(path.to_path_buf()),
        None => find_settings_file()?,
    };

    match path {
        Some(path) => {
            tracing::debug!("Loading settings from {}", path.display());
            let settings = load_file(&path)?;
            Ok((settings, Some(path)))
        }
        None => {
            tracing::debug!("No settings file found, using defaults");
            Ok((Settings::default(), None))
        }
    }
}
