use colored::Colorize;
use provisioner_config::Settings;
use provisioner_core::{ConfigLocation, EndpointOutcome};

pub async fn handle(settings: &Settings, model_name: &str, instance_type: &str) -> anyhow::Result<()> {
    println!("{}", "エンドポイントを作成中...".yellow());

    let request = settings.endpoint_request(model_name, instance_type)?;
    println!("モデル: {}", model_name.cyan());
    println!("インスタンスタイプ: {}", instance_type.cyan());
    println!("エンドポイント設定: {}", request.config_name().cyan());
    println!("エンドポイント: {}", request.endpoint_name().cyan());

    let provisioner = super::connect(settings).await?;

    match provisioner.create_endpoint(&request).await? {
        EndpointOutcome::Created { endpoint, .. } => {
            println!();
            println!(
                "{}",
                format!("✓ エンドポイント {} を作成しました！", endpoint.id)
                    .green()
                    .bold()
            );
            Ok(())
        }
        EndpointOutcome::AlreadyExists {
            config_name,
            location,
        } => {
            // 既存の設定は上書きしない。正常終了として扱う
            match location {
                ConfigLocation::Local(path) => println!(
                    "{}",
                    format!("{} を削除してから再実行してください", path.display()).dimmed()
                ),
                ConfigLocation::Remote => println!(
                    "{}",
                    format!("{} を削除してから再実行してください", config_name).dimmed()
                ),
            }
            Ok(())
        }
        EndpointOutcome::Exhausted {
            phase,
            attempts,
            last_error,
            config_deleted,
        } => {
            if config_deleted {
                println!("{}", "作成済みのエンドポイント設定は削除しました".dimmed());
            }
            let cause = last_error
                .map(|e| format!(" (最後のエラー: {})", e))
                .unwrap_or_default();
            Err(anyhow::anyhow!(
                "{} の作成に {} 回失敗し、再試行回数の上限に達しました{}",
                phase,
                attempts,
                cause
            ))
        }
    }
}
