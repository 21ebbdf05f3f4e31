use anyhow::Context;
use clap::Parser;
use sheet_filter::{cli, config, export, filter_arg, interactive, loader, preview};
use cli::{Cli, Commands};
use config::Config;
use sheet_filter_common::CellValue;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    match cli.command {
        Commands::Columns { input } => {
            let state = loader::load_session(&input)
                .await
                .with_context(|| format!("{} を読み込めません", input.display()))?;

            println!("📄 {}\n", input.display());
            println!("行数: {}", state.original_rows().len());
            println!("列 ({}):", state.columns().len());
            for column in state.columns() {
                println!("  - {}", column.label);
            }
        }

        Commands::Values { input, column, filters } => {
            let state = loader::load_session(&input)
                .await
                .with_context(|| format!("{} を読み込めません", input.display()))?;
            let state = filter_arg::apply_filter_args(&state, &filters)?;

            let configured = state.select_filter_column(Some(&column));
            if configured.active_filter_column().is_none() {
                return Err(sheet_filter::error::SheetFilterError::UnknownColumn(column).into());
            }

            println!("{} の値 ({}行中):", column, state.filtered_len());
            for value in configured.filter_options() {
                let count = state
                    .filtered_rows()
                    .filter(|row| row.value(&column) == value)
                    .count();
                let label = match value {
                    CellValue::Empty => "(空)".to_string(),
                    other => other.to_string(),
                };
                println!("  {} ({})", label, count);
            }
        }

        Commands::Filter { input, columns, all, filters, output, preview, dry_run } => {
            println!("📊 sheet-filter - 絞り込み\n");

            // 1. 読み込み
            println!("[1/3] ファイルを読み込み中...");
            let state = loader::load_session(&input)
                .await
                .with_context(|| format!("{} を読み込めません", input.display()))?;
            println!("✔ {}行 / {}列を検出\n", state.original_rows().len(), state.columns().len());

            // 2. 列選択・絞り込み
            println!("[2/3] 絞り込み中...");
            let state = filter_arg::select_column_args(&state, &columns, all)?;
            let state = filter_arg::apply_filter_args(&state, &filters)?;
            println!("✔ {}行が条件に一致\n", state.filtered_len());

            if preview {
                if let Some(table) = preview::render_preview(&state, config.preview_limit) {
                    println!("{}", table);
                }
            }

            // 3. 出力
            if dry_run {
                println!("[3/3] ドライランのため出力をスキップ");
            } else {
                println!("[3/3] Excelを出力中...");
                let output_path = export::output_path(output.as_deref(), &config.output_file_name());
                export::export_session(&state, &output_path, &config.sheet_name)?;
                println!("✔ Excel出力: {}", output_path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Session { input, output } => {
            println!("📊 sheet-filter - 対話モード\n");
            let state = loader::load_session(&input)
                .await
                .with_context(|| format!("{} を読み込めません", input.display()))?;
            println!("✔ {}行 / {}列を検出", state.original_rows().len(), state.columns().len());
            interactive::run_interactive_session(state, output.as_deref(), &config)?;
        }

        Commands::Config { set_output_name, set_sheet_name, set_preview_limit, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(name) = set_output_name {
                config.set_output_file_name(name)?;
                changed = true;
            }
            if let Some(name) = set_sheet_name {
                config.set_sheet_name(name)?;
                changed = true;
            }
            if let Some(limit) = set_preview_limit {
                config.set_preview_limit(limit)?;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  出力ファイル名: {}", config.output_file_name());
                println!("  シート名: {}", config.sheet_name);
                println!("  プレビュー行数: {}", config.preview_limit);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
