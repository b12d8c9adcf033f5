use colored::Colorize;
use provisioner_config::Settings;
use provisioner_core::{InstanceOutcome, ProvisionRequest, ResourceParameters};

pub async fn handle(settings: &Settings, instance_type: &str, count: u32) -> anyhow::Result<()> {
    println!("{}", "インスタンスを作成中...".yellow());

    // AWS に接続する前に入力を検証
    let params = settings.instance.parameters(instance_type)?;
    let policy = settings.retry.policy()?;

    println!("インスタンスタイプ: {}", instance_type.cyan());
    println!("AMI: {}", params.image_id.cyan());
    println!("作成数: {}", count);
    println!(
        "再試行: 最大 {} 回 / {}秒間隔",
        policy.max_retries,
        policy.interval.as_secs()
    );

    let request = ProvisionRequest::new(ResourceParameters::Instance(params), count, policy)?;
    let provisioner = super::connect(settings).await?;

    match provisioner.launch_instances(&request).await? {
        InstanceOutcome::Completed { resources } => {
            println!();
            println!(
                "{}",
                format!("✓ {} 台のインスタンスを起動しました！", resources.len())
                    .green()
                    .bold()
            );
            for resource in &resources {
                println!("  • {}", resource.id.cyan());
            }
            Ok(())
        }
        InstanceOutcome::Exhausted {
            resources,
            unmet,
            attempts,
            last_error,
        } => {
            println!();
            if !resources.is_empty() {
                println!("{}", "起動できたインスタンス:".bold());
                for resource in &resources {
                    println!("  • {}", resource.id.cyan());
                }
            }
            let cause = last_error
                .map(|e| format!(" (最後のエラー: {})", e))
                .unwrap_or_default();
            Err(anyhow::anyhow!(
                "{} 台中 {} 台を起動できませんでした。{} 回連続で失敗しました{}",
                count,
                unmet,
                attempts,
                cause
            ))
        }
    }
}
