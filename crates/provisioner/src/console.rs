use colored::Colorize;
use provisioner_core::{ProvisionEvent, Reporter, ResourceKind};
use std::time::Duration;

/// 進捗イベントを1行ずつコンソールに出力する
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, event: &ProvisionEvent) {
        for line in render(event) {
            println!("{}", line);
        }
    }
}

fn kind_label(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Instance => "インスタンス",
        ResourceKind::EndpointConfig => "エンドポイント設定",
        ResourceKind::Endpoint => "エンドポイント",
    }
}

fn format_delay(delay: Duration) -> String {
    if delay.subsec_millis() == 0 {
        format!("{}", delay.as_secs())
    } else {
        format!("{:.1}", delay.as_secs_f64())
    }
}

fn render(event: &ProvisionEvent) -> Vec<String> {
    match event {
        ProvisionEvent::Created {
            kind: ResourceKind::Instance,
            id,
            remaining,
            total,
        } => vec![
            format!("✓ インスタンス {} を起動しました", id.cyan())
                .green()
                .to_string(),
            format!("  残り: {}/{}", remaining, total),
        ],
        ProvisionEvent::Created { kind, id, .. } => vec![
            format!("✓ {} {} を作成しました", kind_label(*kind), id.cyan())
                .green()
                .to_string(),
        ],
        ProvisionEvent::Retrying {
            reason,
            attempt,
            max_retries,
            delay,
            ..
        } => vec![
            format!("⚠ {}, retrying...", reason).yellow().to_string(),
            format!(
                "  {}秒後に再試行します (試行 {}/{})",
                format_delay(*delay),
                attempt,
                max_retries
            ),
        ],
        ProvisionEvent::RetriesExhausted {
            kind,
            reason,
            attempts,
        } => vec![
            format!(
                "✗ {}: {}の作成を {} 回試行しましたが上限に達しました",
                reason,
                kind_label(*kind),
                attempts
            )
            .red()
            .to_string(),
        ],
        ProvisionEvent::Unrecoverable { reason, .. } => {
            vec![format!("✗ {}", reason).red().to_string()]
        }
        ProvisionEvent::NotificationSent { resource_id } => {
            vec![format!("  ✉ {} の通知を送信しました", resource_id)]
        }
        ProvisionEvent::NotificationFailed { error, .. } => vec![
            format!("  ⚠ 通知の送信に失敗しました: {}", error)
                .yellow()
                .to_string(),
        ],
        ProvisionEvent::ConfigAlreadyExists {
            config_name,
            local_marker: Some(path),
        } => vec![
            format!(
                "ℹ 設定ファイル {} が既に存在します。先に削除してください。({} は作成しません)",
                path.display(),
                config_name
            )
            .yellow()
            .to_string(),
        ],
        ProvisionEvent::ConfigAlreadyExists {
            config_name,
            local_marker: None,
        } => vec![
            format!(
                "ℹ エンドポイント設定 {} は既に存在します。先に削除してください。",
                config_name
            )
            .yellow()
            .to_string(),
        ],
        ProvisionEvent::ConfigCleanup {
            config_name,
            error: None,
        } => vec![format!("  ✓ エンドポイント設定 {} を削除しました", config_name)],
        ProvisionEvent::ConfigCleanup {
            config_name,
            error: Some(error),
        } => vec![
            format!(
                "  ⚠ エンドポイント設定 {} の削除に失敗しました: {}",
                config_name, error
            )
            .yellow()
            .to_string(),
        ],
    }
}
