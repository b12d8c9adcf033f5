use colored::Colorize;
use provisioner_config::Settings;
use std::path::Path;

pub fn handle(settings: &Settings, loaded_from: Option<&Path>) -> anyhow::Result<()> {
    match loaded_from {
        Some(path) => println!("{} {}", "設定ファイル:".bold(), path.display()),
        None => println!("{}", "設定ファイルが見つかりません。デフォルト値を使用します".dimmed()),
    }
    println!();
    print!("{}", settings.to_yaml()?);
    Ok(())
}
