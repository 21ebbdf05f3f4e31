use crate::filter_arg::FilterArg;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheet-filter")]
#[command(about = "Excelの列選択・絞り込み・抽出ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 列の一覧と行数を表示
    Columns {
        /// 入力ファイル（.xlsx / .xls）
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 列の値の一覧を表示（絞り込み後の行から集計）
    Values {
        /// 入力ファイル（.xlsx / .xls）
        #[arg(required = true)]
        input: PathBuf,

        /// 対象の列
        #[arg(short, long)]
        column: String,

        /// 先に適用する絞り込み条件（COL=V1,V2、複数指定可）
        #[arg(short, long = "filter")]
        filters: Vec<FilterArg>,
    },

    /// 列を選択・絞り込みしてExcelに出力
    Filter {
        /// 入力ファイル（.xlsx / .xls）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力する列（カンマ区切り、指定順に出力）
        #[arg(short, long, value_delimiter = ',', conflicts_with = "all")]
        columns: Vec<String>,

        /// すべての列を出力
        #[arg(short, long)]
        all: bool,

        /// 絞り込み条件（COL=V1,V2、複数指定時はすべてを満たす行を残す）
        #[arg(short, long = "filter")]
        filters: Vec<FilterArg>,

        /// 出力ファイル/ディレクトリ（省略時: ./filtered_data.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 結果をプレビュー表示
        #[arg(short, long)]
        preview: bool,

        /// ファイルを出力しない
        #[arg(long)]
        dry_run: bool,
    },

    /// 対話的に列選択・絞り込み・出力を行う
    Session {
        /// 入力ファイル（.xlsx / .xls）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ（省略時: ./filtered_data.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 出力ファイル名を設定
        #[arg(long)]
        set_output_name: Option<String>,

        /// 出力シート名を設定
        #[arg(long)]
        set_sheet_name: Option<String>,

        /// プレビュー表示行数を設定
        #[arg(long)]
        set_preview_limit: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
