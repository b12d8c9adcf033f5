#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

/// 外部の設定や認証情報に影響されないコマンドを作る
fn isolated(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("provision").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("PROVISION_CONFIG_PATH")
        .env_remove("PROVISION_IMAGE_ID")
        .env_remove("PROVISION_REGION")
        .env_remove("PROVISION_TOPIC_ARN")
        .env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY")
        .env_remove("AWS_PROFILE");
    cmd
}

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("provision").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("リトライ付き"))
        .stdout(predicate::str::contains("instances"))
        .stdout(predicate::str::contains("endpoint"))
        .stdout(predicate::str::contains("config"));
}

/// バージョン表示が正しく動作することを確認
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("provision").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("provisioner"));
}

/// instancesコマンドのヘルプにオプションが並ぶことを確認
#[test]
fn test_instances_help() {
    let mut cmd = Command::cargo_bin("provision").unwrap();
    cmd.args(["instances", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--instance-type"))
        .stdout(predicate::str::contains("--count"))
        .stdout(predicate::str::contains("--retry-interval"))
        .stdout(predicate::str::contains("--max-retry"));
}

/// 不正なコマンドでエラーになることを確認
#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("provision").unwrap();
    cmd.arg("invalid-command").assert().failure();
}

/// インスタンスタイプは必須
#[test]
fn test_instances_requires_type() {
    let temp_dir = tempfile::tempdir().unwrap();
    isolated(temp_dir.path())
        .arg("instances")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--instance-type"));
}

/// 作成数 0 は引数の段階で拒否される
#[test]
fn test_instances_rejects_zero_count() {
    let temp_dir = tempfile::tempdir().unwrap();
    isolated(temp_dir.path())
        .args(["instances", "-t", "t3.micro", "-c", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("0"));
}

/// モデル名なしのendpointはエラーになる
#[test]
fn test_endpoint_requires_model_name() {
    let temp_dir = tempfile::tempdir().unwrap();
    isolated(temp_dir.path())
        .args(["endpoint", "-t", "ml.m5.large"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--model-name"));
}

/// AMI未設定なら AWS に接続する前に失敗する
#[test]
fn test_instances_without_image_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    isolated(temp_dir.path())
        .args(["instances", "-t", "t3.micro"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Critical error:"))
        .stderr(predicate::str::contains("instance.image_id"));
}

/// 認証情報がなければ終了コード1
#[test]
fn test_endpoint_without_credentials_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    isolated(temp_dir.path())
        .args(["endpoint", "-m", "bert", "-t", "ml.g5.xlarge"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("AWS_ACCESS_KEY_ID"));
}

/// ローカルに config.json があれば何も作成せず正常終了
#[test]
fn test_endpoint_skips_when_local_marker_exists() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("config.json"), "{}").unwrap();

    isolated(temp_dir.path())
        .env("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE")
        .env("AWS_SECRET_ACCESS_KEY", "secret")
        .args(["--region", "us-east-1"])
        .args(["endpoint", "-m", "bert", "-t", "ml.g5.xlarge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json が既に存在します"));
}

/// configコマンドは読み込んだファイルと有効な設定を表示する
#[test]
fn test_config_shows_effective_settings() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("custom.yaml");
    fs::write(
        &config_path,
        "region: eu-west-1\nretry:\n  max_retries: 4\ninstance:\n  image_id: ami-0abc\n",
    )
    .unwrap();

    isolated(temp_dir.path())
        .env("PROVISION_CONFIG_PATH", &config_path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.yaml"))
        .stdout(predicate::str::contains("region: eu-west-1"))
        .stdout(predicate::str::contains("max_retries: 4"))
        .stdout(predicate::str::contains("image_id: ami-0abc"))
        .stdout(predicate::str::contains("variant_name: AllTraffic"));
}

/// コマンドラインのリージョンが設定ファイルより優先される
#[test]
fn test_config_region_override() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("provision.yaml"), "region: eu-west-1\n").unwrap();

    isolated(temp_dir.path())
        .args(["--region", "ap-northeast-1", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("provision.yaml"))
        .stdout(predicate::str::contains("region: ap-northeast-1"));
}

/// 壊れた設定ファイルはファイル名付きで報告される
#[test]
fn test_config_parse_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("provision.yaml"), "retry: [1, 2]\n").unwrap();

    isolated(temp_dir.path())
        .arg("config")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("provision.yaml"));
}
