use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wage-merge")]
#[command(about = "工资表批量汇总・模板文件自动回填工具", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 输出详细日志（逐行匹配结果）
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 配置文件路径（默认: ~/.config/wage-merge/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 汇总文件夹下的工资表，生成文件A
    Aggregate {
        /// 工资表所在文件夹
        #[arg(required = true)]
        folder: PathBuf,

        /// 输出目录（默认: 源文件夹）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 根据已有的文件A回填模板文件B
    Fill {
        /// 模板文件B
        #[arg(required = true)]
        template: PathBuf,

        /// 文件A（汇总结果）
        #[arg(short, long, required = true)]
        summary: PathBuf,

        /// 输出目录（默认: 模板所在目录）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 汇总后直接回填模板
    Run {
        /// 工资表所在文件夹
        #[arg(required = true)]
        folder: PathBuf,

        /// 模板文件B（省略时只生成文件A）
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// 输出目录
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 显示/初始化配置
    Config {
        /// 显示当前配置
        #[arg(long)]
        show: bool,

        /// 写出默认配置文件
        #[arg(long)]
        init: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fill() {
        let cli = Cli::parse_from(["wage-merge", "fill", "b.xlsx", "--summary", "a.xlsx", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Fill { template, summary, output } => {
                assert_eq!(template, PathBuf::from("b.xlsx"));
                assert_eq!(summary, PathBuf::from("a.xlsx"));
                assert!(output.is_none());
            }
            _ => panic!("fill expected"),
        }
    }

    #[test]
    fn test_parse_run_with_template() {
        let cli = Cli::parse_from(["wage-merge", "--config", "c.json", "run", "in", "-t", "b.xlsx", "-o", "out"]);
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        match cli.command {
            Commands::Run { folder, template, output } => {
                assert_eq!(folder, PathBuf::from("in"));
                assert_eq!(template, Some(PathBuf::from("b.xlsx")));
                assert_eq!(output, Some(PathBuf::from("out")));
            }
            _ => panic!("run expected"),
        }
    }

    #[test]
    fn test_fill_requires_summary() {
        assert!(Cli::try_parse_from(["wage-merge", "fill", "b.xlsx"]).is_err());
    }
}
