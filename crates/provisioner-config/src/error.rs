use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error("指定された設定ファイルが存在しません: {0}")]
    ExplicitFileNotFound(PathBuf),

    #[error("設定ファイルの解析に失敗しました ({path}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(
        "instance.image_id が設定されていません。設定ファイルに記述するか --image-id で指定してください"
    )]
    MissingImageId,

    #[error("不正な設定値 {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("YAML 出力に失敗しました: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
