use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use log::Level;
use rstest::*;
use tempfile::TempDir;
use webp2png::error::ConversionError;
use webp2png::facade::conversion_facade::{spawn_conversion, ConversionFacade};
use webp2png::facade::traits::i_conversion::ConversionFacadeTrait;
use webp2png::models::conversion::{BatchOptions, ConversionInput};
use webp2png::models::event::ProgressEvent;
use webp2png::models::file::FileCollectInput;
use webp2png::service::file::FileService;
use webp2png::service::reporter::ChannelReporter;
use webp2png::service::traits::i_service::{FileServiceTrait, ReporterTrait};
use webp2png::service::validator::MAX_FILE_SIZE;

mod common;
use common::CaptureReporter;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn facade(reporter: Arc<CaptureReporter>) -> ConversionFacade {
    ConversionFacade::with_defaults(reporter, MAX_FILE_SIZE)
}

fn input(inputs: Vec<PathBuf>) -> ConversionInput {
    ConversionInput {
        inputs,
        output: None,
        output_dir: None,
        recursive: false,
        force: false,
        preserve_metadata: true,
    }
}

/// 五個檔案中第三個損毀
fn five_with_third_corrupt(dir: &std::path::Path) -> Vec<PathBuf> {
    (1..=5)
        .map(|i| {
            let path = dir.join(format!("img{}.webp", i));
            if i == 3 {
                common::write_corrupt_webp(&path)
            } else {
                common::write_rgba_webp(&path, 4 + i, 3)
            }
        })
        .collect()
}

// ============================================================================
// Batch coordinator
// ============================================================================

#[rstest]
fn test_one_corrupt_file_does_not_abort_batch(temp_dir: TempDir) {
    let sources = five_with_third_corrupt(temp_dir.path());
    let out_dir = temp_dir.path().join("out");
    let reporter = Arc::new(CaptureReporter::default());
    let options = BatchOptions {
        output_dir: Some(out_dir.clone()),
        overwrite: false,
        preserve_metadata: true,
    };

    let mut events = Vec::new();
    let report = facade(reporter.clone()).convert_batch(&sources, &options, &mut |e| events.push(e.clone()));

    assert_eq!(report.len(), 5);
    assert_eq!(report.succeeded(), 4);
    assert_eq!(report.failed(), 1);

    let order: Vec<_> = report.entries().iter().map(|e| e.source.clone()).collect();
    assert_eq!(order, sources);

    let failed = report.get(&sources[2]).unwrap();
    assert!(failed.destination().is_none());
    assert!(failed.outcome.as_ref().unwrap_err().contains("img3.webp"));
    assert_eq!(report.get(&sources[0]).unwrap().destination(), Some(out_dir.join("img1.png").as_path()));
    assert!(!out_dir.join("img3.png").exists());
    assert_eq!(reporter.count(Level::Error), 1);

    let finished = events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::FileFinished { .. }))
        .count();
    assert_eq!(finished, 5);
    assert!(matches!(events.first(), Some(ProgressEvent::Started { total: 5 })));
    assert!(matches!(events.last(), Some(ProgressEvent::Finished { succeeded: 4, failed: 1 })));
}

#[rstest]
fn test_progress_indices_follow_discovery_order(temp_dir: TempDir) {
    let sources: Vec<_> = ["b.webp", "a.webp", "c.webp"]
        .iter()
        .map(|name| common::write_rgba_webp(&temp_dir.path().join(name), 3, 3))
        .collect();
    let reporter = Arc::new(CaptureReporter::default());

    let mut seen = Vec::new();
    facade(reporter).convert_batch(&sources, &BatchOptions::default(), &mut |e| {
        if let ProgressEvent::FileFinished { index, source, .. } = e {
            seen.push((*index, source.clone()));
        }
    });

    let expected: Vec<_> = sources.iter().cloned().enumerate().collect();
    assert_eq!(seen, expected);
}

// ============================================================================
// Discovery
// ============================================================================

#[rstest]
fn test_discovery_is_sorted_deduplicated_and_case_insensitive(temp_dir: TempDir) {
    let root = temp_dir.path();
    let b = common::write_rgba_webp(&root.join("b.webp"), 2, 2);
    let a = common::write_rgba_webp(&root.join("a.WEBP"), 2, 2);
    common::write_bytes(&root.join("readme.txt"), b"text");
    fs::create_dir(root.join("nested")).unwrap();
    let nested = common::write_rgba_webp(&root.join("nested").join("c.webp"), 2, 2);
    let reporter = Arc::new(CaptureReporter::default());
    let service = FileService::new(reporter);

    let flat = service
        .collect_files(FileCollectInput {
            input_paths: vec![root.to_path_buf(), b.clone()],
            recursive: false,
        })
        .unwrap();
    assert_eq!(flat.files, vec![a.clone(), b.clone()]);

    let deep = service
        .collect_files(FileCollectInput {
            input_paths: vec![root.to_path_buf()],
            recursive: true,
        })
        .unwrap();
    assert_eq!(deep.files, vec![a, b, nested]);
    assert!(deep.total_size > 0);
}

#[rstest]
fn test_discovery_warns_on_missing_and_non_webp_inputs(temp_dir: TempDir) {
    let text = common::write_bytes(&temp_dir.path().join("notes.txt"), b"text");
    let reporter = Arc::new(CaptureReporter::default());
    let service = FileService::new(reporter.clone());

    let output = service
        .collect_files(FileCollectInput {
            input_paths: vec![temp_dir.path().join("missing"), text],
            recursive: false,
        })
        .unwrap();

    assert!(output.files.is_empty());
    assert_eq!(reporter.count(Level::Warn), 2);
}

#[cfg(unix)]
#[rstest]
fn test_discovery_skips_entries_it_cannot_stat(temp_dir: TempDir) {
    use std::os::unix::fs::PermissionsExt;

    if rustix::process::geteuid().is_root() {
        return;
    }
    let good = common::write_rgba_webp(&temp_dir.path().join("good.webp"), 4, 4);
    let listed = temp_dir.path().join("listed");
    fs::create_dir(&listed).unwrap();
    common::write_rgba_webp(&listed.join("hidden.webp"), 4, 4);
    // 可列出目錄內容但無法存取其中項目
    fs::set_permissions(&listed, fs::Permissions::from_mode(0o644)).unwrap();

    let reporter = Arc::new(CaptureReporter::default());
    let service = FileService::new(reporter.clone());
    let output = service.collect_files(FileCollectInput {
        input_paths: vec![good.clone(), listed.clone()],
        recursive: false,
    });
    fs::set_permissions(&listed, fs::Permissions::from_mode(0o755)).unwrap();

    let output = output.unwrap();
    assert_eq!(output.files, vec![good.clone()]);
    assert_eq!(output.total_size, fs::metadata(&good).unwrap().len());
    assert!(reporter
        .messages()
        .iter()
        .any(|(level, message)| *level == Level::Warn && message.contains("hidden.webp")));
}

// ============================================================================
// Facade
// ============================================================================

#[rstest]
fn test_no_matching_files_is_an_error(temp_dir: TempDir) {
    common::write_bytes(&temp_dir.path().join("notes.txt"), b"text");
    let reporter = Arc::new(CaptureReporter::default());

    let err = facade(reporter)
        .execute_conversion(input(vec![temp_dir.path().to_path_buf()]), &mut |_| {})
        .unwrap_err();

    assert!(matches!(err, ConversionError::NoInputFiles));
}

#[rstest]
fn test_output_dir_is_created_recursively(temp_dir: TempDir) {
    let source = common::write_rgba_webp(&temp_dir.path().join("pic.webp"), 3, 3);
    let out_dir = temp_dir.path().join("converted").join("nested");
    let reporter = Arc::new(CaptureReporter::default());
    let mut request = input(vec![source]);
    request.output_dir = Some(out_dir.clone());

    let output = facade(reporter).execute_conversion(request, &mut |_| {}).unwrap();

    assert!(!output.single);
    assert_eq!(output.report.succeeded(), 1);
    assert!(out_dir.join("pic.png").is_file());
}

#[rstest]
fn test_single_input_with_explicit_output(temp_dir: TempDir) {
    let source = common::write_rgba_webp(&temp_dir.path().join("pic.webp"), 3, 3);
    let target = temp_dir.path().join("renamed.png");
    let reporter = Arc::new(CaptureReporter::default());
    let mut request = input(vec![source.clone()]);
    request.output = Some(target.clone());

    let output = facade(reporter).execute_conversion(request, &mut |_| {}).unwrap();

    assert!(output.single);
    assert_eq!(output.report.get(&source).unwrap().destination(), Some(target.as_path()));
}

#[rstest]
fn test_explicit_output_ignored_for_multiple_inputs(temp_dir: TempDir) {
    let first = common::write_rgba_webp(&temp_dir.path().join("one.webp"), 3, 3);
    let second = common::write_rgba_webp(&temp_dir.path().join("two.webp"), 3, 3);
    let reporter = Arc::new(CaptureReporter::default());
    let mut request = input(vec![first, second]);
    request.output = Some(temp_dir.path().join("renamed.png"));

    let output = facade(reporter.clone()).execute_conversion(request, &mut |_| {}).unwrap();

    assert!(!output.single);
    assert_eq!(output.report.succeeded(), 2);
    assert!(!temp_dir.path().join("renamed.png").exists());
    assert!(reporter.count(Level::Warn) >= 1);
}

#[rstest]
fn test_background_conversion_streams_events(temp_dir: TempDir) {
    let sources = five_with_third_corrupt(temp_dir.path());
    let (sender, receiver) = mpsc::channel();
    let reporter: Arc<dyn ReporterTrait> = Arc::new(ChannelReporter::new(sender.clone()));
    let facade = ConversionFacade::with_defaults(reporter, MAX_FILE_SIZE);

    let handle = spawn_conversion(facade, input(vec![temp_dir.path().to_path_buf()]), sender);
    let events: Vec<ProgressEvent> = receiver.iter().collect();
    let output = handle.join().unwrap().unwrap();

    assert_eq!(output.report.succeeded(), 4);
    assert_eq!(output.report.failed(), 1);

    let finished: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::FileFinished { source, .. } => Some(source.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(finished, sources);

    // 失敗只經由日誌事件回報一次，且指明來源檔
    let error_logs: Vec<&String> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::Log { level: Level::Error, message } => Some(message),
            _ => None,
        })
        .collect();
    assert_eq!(error_logs.len(), 1);
    assert!(error_logs[0].contains(&sources[2].display().to_string()));
}
