mod commands;
mod console;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "provision")]
#[command(about = "容量不足に負けない、リトライ付きクラウドリソース作成ツール", long_about = None)]
struct Cli {
    /// 設定ファイルのパス
    #[arg(long, global = true, env = "PROVISION_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// AWS リージョン（設定ファイルの region より優先）
    #[arg(long, global = true, env = "PROVISION_REGION")]
    region: Option<String>,

    /// 作成完了を通知する SNS トピック ARN
    #[arg(long, global = true, env = "PROVISION_TOPIC_ARN")]
    topic_arn: Option<String>,

    /// デバッグログを出力
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// EC2 インスタンスを指定数だけ起動
    Instances {
        /// インスタンスタイプ (例: g5.xlarge)
        #[arg(short = 't', long)]
        instance_type: String,
        /// 起動するインスタンス数
        #[arg(short = 'c', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
        /// 再試行までの待機秒数
        #[arg(short = 'i', long)]
        retry_interval: Option<u64>,
        /// 最大試行回数
        #[arg(short = 'r', long = "max-retry")]
        max_retry: Option<u32>,
        /// AMI ID（設定ファイルの instance.image_id より優先）
        #[arg(long, env = "PROVISION_IMAGE_ID")]
        image_id: Option<String>,
    },
    /// SageMaker エンドポイント設定とエンドポイントを作成
    Endpoint {
        /// モデル名
        #[arg(short = 'm', long)]
        model_name: String,
        /// インスタンスタイプ (例: ml.g5.xlarge)
        #[arg(short = 't', long)]
        instance_type: String,
        /// 再試行までの待機秒数
        #[arg(short = 'i', long)]
        retry_interval: Option<u64>,
        /// 最大試行回数
        #[arg(short = 'r', long = "max-retries")]
        max_retries: Option<u32>,
    },
    /// 有効な設定を YAML で表示
    Config,
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 通常の出力は stdout、ログは stderr
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Critical error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Versionコマンドは設定ファイル不要
    if matches!(cli.command, Commands::Version) {
        println!("provisioner {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let (mut settings, loaded_from) = provisioner_config::load(cli.config.as_deref())?;
    if let Some(region) = cli.region {
        settings.region = Some(region);
    }
    if let Some(topic_arn) = cli.topic_arn {
        settings.notification.topic_arn = Some(topic_arn);
    }

    match cli.command {
        Commands::Instances {
            instance_type,
            count,
            retry_interval,
            max_retry,
            image_id,
        } => {
            commands::apply_retry_overrides(&mut settings, retry_interval, max_retry);
            if let Some(image_id) = image_id {
                settings.instance.image_id = Some(image_id);
            }
            commands::instances::handle(&settings, &instance_type, count).await
        }
        Commands::Endpoint {
            model_name,
            instance_type,
            retry_interval,
            max_retries,
        } => {
            commands::apply_retry_overrides(&mut settings, retry_interval, max_retries);
            commands::endpoint::handle(&settings, &model_name, &instance_type).await
        }
        Commands::Config => commands::config::handle(&settings, loaded_from.as_deref()),
        Commands::Version => Ok(()),
    }
}
