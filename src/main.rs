use clap::Parser;
use wage_merge::{cli, config, error, log, summary, template};
use wage_merge_common::FlatLookupMap;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use log::TracingLog;
use std::path::Path;
use summary::SummaryOutcome;

fn main() -> Result<()> {
    let cli = Cli::parse();
    log::init_tracing(cli.verbose);

    match cli.command {
        Commands::Config { show, init } => run_config(cli.config.as_deref(), show, init),
        command => {
            let config = Config::load(cli.config.as_deref())?;
            run(command, &config, cli.verbose)
        }
    }
}

fn run(command: Commands, config: &Config, verbose: bool) -> Result<()> {
    match command {
        Commands::Aggregate { folder, output } => {
            println!("📊 wage-merge - 工资表汇总\n");

            println!("[1/1] 汇总工资表...");
            let mut tracing_log = TracingLog;
            if let SummaryOutcome::Written(report) =
                summary::aggregate_folder(&folder, output.as_deref(), config, &mut tracing_log)?
            {
                print_summary(&report);
                println!("\n✅ 汇总完成");
            }
        }

        Commands::Fill { template: template_path, summary: summary_path, output } => {
            println!("📝 wage-merge - 模板回填\n");

            println!("[1/2] 读取文件A...");
            let table = summary::read_summary(&summary_path)?;
            let lookup = FlatLookupMap::from_table(&table);
            println!("✔ {}个预算单位, {}个工资项目\n", table.unit_count(), table.column_count());

            println!("[2/2] 回填模板...");
            fill(&template_path, &lookup, config, output.as_deref(), verbose)?;

            println!("\n✅ 回填完成");
        }

        Commands::Run { folder, template: template_path, output } => {
            println!("🚀 wage-merge - 一键处理\n");

            let steps = if template_path.is_some() { 2 } else { 1 };

            println!("[1/{}] 汇总工资表...", steps);
            let mut tracing_log = TracingLog;
            let report = match summary::aggregate_folder(&folder, output.as_deref(), config, &mut tracing_log)? {
                SummaryOutcome::Written(report) => report,
                SummaryOutcome::NoData => return Ok(()),
            };
            print_summary(&report);

            if let Some(template_path) = template_path {
                println!("\n[2/2] 回填模板...");
                // 与 fill 命令一致：按文件A的汇总值回填
                let lookup = FlatLookupMap::from_table(&report.table);
                fill(&template_path, &lookup, config, output.as_deref(), verbose)?;
            }

            println!("\n✅ 完成");
        }

        Commands::Config { show, init } => return run_config(None, show, init),
    }

    Ok(())
}

fn print_summary(report: &summary::SummaryReport) {
    println!(
        "✔ {}个文件, {}个预算单位, {}个工资项目",
        report.documents,
        report.table.unit_count(),
        report.table.column_count()
    );
    if !report.skipped.is_empty() {
        println!("  跳过: {}", report.skipped.join(", "));
    }
    println!("✔ 文件A: {}", report.path.display());
}

fn fill(
    template_path: &Path,
    lookup: &FlatLookupMap,
    config: &Config,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let mut tracing_log = TracingLog;
    let filled = template::fill_template(template_path, lookup, config, output, &mut tracing_log)?;

    println!("✔ 匹配 {}行 (工作表: {})", filled.match_count(), filled.sheet);
    if !verbose && !filled.unmatched.is_empty() {
        println!("  未匹配 {}行 (-v 查看明细)", filled.unmatched.len());
    }
    println!("✔ 输出: {}", filled.output_path.display());
    Ok(())
}

fn run_config(explicit: Option<&Path>, show: bool, init: bool) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };

    if init {
        Config::default().save(&path)?;
        println!("✔ 已写出默认配置: {}", path.display());
    }

    if show || !init {
        let config = Config::load(explicit)?;
        println!("配置:");
        println!("  表头行: {}", config.source.header_row);
        println!("  预算单位列: {}", config.source.budget_unit_column);
        println!("  工资列: {}-{}", config.source.wage_first_column, config.source.wage_last_column);
        println!(
            "  模板列: 单位 {}, 项目 {}, 回填 {}",
            config.template.unit_column, config.template.project_column, config.template.target_column
        );
        println!("  文件A: {}", config.summary_file_name);
        println!("  回填前缀: {}", config.updated_prefix);
    }
    Ok(())
}
