pub mod config;
pub mod endpoint;
pub mod instances;

use crate::console::ConsoleReporter;
use colored::Colorize;
use provisioner_aws::{AwsResourceClient, SnsNotifier};
use provisioner_config::Settings;
use provisioner_core::{EnvCredentialProvider, Provisioner};
use std::sync::Arc;

/// コマンドラインの再試行オプションで設定を上書き
pub fn apply_retry_overrides(
    settings: &mut Settings,
    retry_interval: Option<u64>,
    max_retries: Option<u32>,
) {
    if let Some(interval) = retry_interval {
        settings.retry.interval_secs = interval;
    }
    if let Some(max) = max_retries {
        settings.retry.max_retries = max;
    }
}

/// 環境変数の認証情報で AWS に接続し Provisioner を組み立てる
pub async fn connect(settings: &Settings) -> anyhow::Result<Provisioner> {
    println!("{}", "AWS に接続中...".blue());
    let sdk_config =
        provisioner_aws::load_sdk_config(&EnvCredentialProvider, settings.region.as_deref())
            .await?;

    let mut provisioner = Provisioner::new(Arc::new(AwsResourceClient::new(&sdk_config)))
        .with_reporter(Arc::new(ConsoleReporter));

    match &settings.notification.topic_arn {
        Some(topic_arn) => {
            provisioner =
                provisioner.with_notifier(Arc::new(SnsNotifier::new(&sdk_config)), topic_arn);
        }
        None => tracing::debug!("No SNS topic configured, notifications disabled"),
    }

    Ok(provisioner)
}
