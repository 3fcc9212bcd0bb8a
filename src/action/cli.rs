use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use clap::Parser;
use crate::action::interactive::process_interactive_mode;
use crate::config::config::{validate_input_paths, validate_max_size, Cli};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionInput, ConversionOutput};
use crate::models::event::ProgressEvent;
use crate::service::config_service::ConfigService;
use crate::service::reporter::LogReporter;
use crate::service::traits::i_service::ReporterTrait;
use crate::utils::utils::{create_progress_bar, setup_logging};

pub fn process_args(args: Vec<String>) -> io::Result<ExitCode> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode()
    }
}

pub fn process_cli_mode() -> io::Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.quiet, cli.verbose)?;

    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli)));
    let config = config_service.get_config()?;
    log::debug!("實際使用的配置：{:?}", config);

    let reporter: Arc<dyn ReporterTrait> = Arc::new(LogReporter::new());
    let facade = ConversionFacade::with_defaults(reporter, config.max_file_size);
    run_conversion(&facade, &config)
}

/// 以進度條執行轉換並輸出摘要
pub fn run_conversion(facade: &dyn ConversionFacadeTrait, config: &AppConfig) -> io::Result<ExitCode> {
    let pb = create_progress_bar(0, config.quiet || config.no_progress);
    let output = facade.execute_conversion(ConversionInput::from(config), &mut |event| match event {
        ProgressEvent::Started { total } => pb.set_total(*total as u64),
        ProgressEvent::FileFinished { index, source, .. } => pb.update(*index as u64 + 1, source),
        ProgressEvent::Finished { succeeded, failed } => pb.finish(*succeeded, *failed),
        ProgressEvent::Log { .. } => {}
    })?;
    Ok(print_summary(&output, config.quiet))
}

/// 輸出結果摘要並決定結束狀態：任何檔案失敗即為非零
pub fn print_summary(output: &ConversionOutput, quiet: bool) -> ExitCode {
    let report = &output.report;

    if output.single {
        for entry in report.entries() {
            match &entry.outcome {
                Ok(destination) if !quiet => {
                    println!("已轉換：{} -> {}", entry.source.display(), destination.display())
                }
                Ok(_) => {}
                Err(message) => eprintln!("錯誤：{}", message),
            }
        }
    } else if !quiet {
        println!("\n轉換完成：");
        println!("  成功：{}", report.succeeded());
        if report.failed() > 0 {
            eprintln!("  失敗：{}", report.failed());
        }
    }

    if report.failed() > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        validate_input_paths(&self.cli.inputs)?;
        let max_file_size = validate_max_size(self.cli.max_size)?;

        if self.cli.output.is_some() && self.cli.output_dir.is_some() {
            log::warn!("同時指定 --output 與 --output-dir，單一檔案時以 --output 為準");
        }

        Ok(AppConfig {
            inputs: self.cli.inputs.clone(),
            output: self.cli.output.clone(),
            output_dir: self.cli.output_dir.clone(),
            recursive: self.cli.recursive,
            force: self.cli.force,
            preserve_metadata: !self.cli.no_metadata,
            quiet: self.cli.quiet,
            verbose: self.cli.verbose,
            no_progress: self.cli.no_progress,
            max_file_size,
        })
    }
}
