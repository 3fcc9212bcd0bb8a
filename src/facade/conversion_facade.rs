use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use crate::error::ConversionError;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{BatchOptions, BatchReport, ConversionInput, ConversionOutput, ConversionRequest};
use crate::models::event::ProgressEvent;
use crate::models::file::FileCollectInput;
use crate::service::codec::ImageCodec;
use crate::service::converter::ConversionService;
use crate::service::file::FileService;
use crate::service::traits::i_service::{FileServiceTrait, ReporterTrait};
use crate::utils::utils::format_file_size;

pub struct ConversionFacade {
    file_service: Box<dyn FileServiceTrait>,
    converter: ConversionService,
    reporter: Arc<dyn ReporterTrait>,
}

impl ConversionFacade {
    pub fn new(
        file_service: Box<dyn FileServiceTrait>,
        converter: ConversionService,
        reporter: Arc<dyn ReporterTrait>,
    ) -> Self {
        ConversionFacade {
            file_service,
            converter,
            reporter,
        }
    }

    /// 以 FileService 與 ImageCodec 組成的預設 Facade
    pub fn with_defaults(reporter: Arc<dyn ReporterTrait>, max_file_size: u64) -> Self {
        let converter = ConversionService::new(Box::new(ImageCodec::new()), reporter.clone())
            .with_max_file_size(max_file_size);
        ConversionFacade::new(Box::new(FileService::new(reporter.clone())), converter, reporter)
    }

    /// 依序轉換每個來源檔，單一檔案失敗不會中斷批次
    pub fn convert_batch(
        &self,
        sources: &[PathBuf],
        options: &BatchOptions,
        on_progress: &mut dyn FnMut(&ProgressEvent),
    ) -> BatchReport {
        let requests: Vec<ConversionRequest> =
            sources.iter().map(|source| options.request_for(source)).collect();
        self.run_requests(&requests, on_progress)
    }

    fn run_requests(
        &self,
        requests: &[ConversionRequest],
        on_progress: &mut dyn FnMut(&ProgressEvent),
    ) -> BatchReport {
        let total = requests.len();
        let mut report = BatchReport::new();
        on_progress(&ProgressEvent::Started { total });

        for (index, request) in requests.iter().enumerate() {
            let outcome = self.convert_guarded(request).map_err(|e| {
                self.reporter
                    .error(&format!("轉換失敗 {}：{}", request.source.display(), e));
                e.to_string()
            });
            on_progress(&ProgressEvent::FileFinished {
                index,
                total,
                source: request.source.clone(),
                outcome: outcome.clone(),
            });
            report.push(request.source.clone(), outcome);
        }

        on_progress(&ProgressEvent::Finished {
            succeeded: report.succeeded(),
            failed: report.failed(),
        });
        report
    }

    // 轉換過程中的 panic 也歸類為單一檔案的失敗
    fn convert_guarded(&self, request: &ConversionRequest) -> Result<PathBuf, ConversionError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.converter.convert(request))).unwrap_or_else(
            |payload| {
                Err(ConversionError::Unexpected {
                    path: request.source.clone(),
                    message: panic_message(payload.as_ref()),
                })
            },
        )
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(
        &self,
        input: ConversionInput,
        on_progress: &mut dyn FnMut(&ProgressEvent),
    ) -> Result<ConversionOutput, ConversionError> {
        let file_output = self
            .file_service
            .collect_files(FileCollectInput {
                input_paths: input.inputs.clone(),
                recursive: input.recursive,
            })
            .map_err(|e| ConversionError::io(input.inputs.first().cloned().unwrap_or_default(), e))?;

        if file_output.files.is_empty() {
            self.reporter.warn("無符合條件的 WebP 檔案可處理");
            return Err(ConversionError::NoInputFiles);
        }

        if let Some(output) = &input.output {
            if file_output.files.len() == 1 {
                let request = ConversionRequest::new(file_output.files[0].clone())
                    .with_destination(output.clone())
                    .overwrite(input.force)
                    .preserve_metadata(input.preserve_metadata);
                let report = self.run_requests(&[request], on_progress);
                return Ok(ConversionOutput { report, single: true });
            }
            self.reporter.warn(&format!(
                "找到 {} 個檔案，忽略 --output {}",
                file_output.files.len(),
                output.display()
            ));
        }

        if let Some(output_dir) = &input.output_dir {
            std::fs::create_dir_all(output_dir).map_err(|e| ConversionError::io(output_dir, e))?;
        }

        self.reporter.info(&format!(
            "開始轉換 {} 個檔案，總大小：{}",
            file_output.files.len(),
            format_file_size(file_output.total_size)
        ));
        let options = BatchOptions {
            output_dir: input.output_dir.clone(),
            overwrite: input.force,
            preserve_metadata: input.preserve_metadata,
        };
        let report = self.convert_batch(&file_output.files, &options, on_progress);
        Ok(ConversionOutput { report, single: false })
    }
}

/// 在背景執行緒執行轉換，進度事件送往 events
///
/// 建立 Facade 時使用的 Reporter 若也持有同一通道，前景只需消費單一 Receiver。
pub fn spawn_conversion(
    facade: ConversionFacade,
    input: ConversionInput,
    events: Sender<ProgressEvent>,
) -> JoinHandle<Result<ConversionOutput, ConversionError>> {
    thread::spawn(move || {
        facade.execute_conversion(input, &mut |event| {
            let _ = events.send(event.clone());
        })
    })
}
