//! Integration tests for extcp
//!
//! These tests drive a whole run: session setup, enumeration, the background
//! worker, conflict prompts and progress reporting.

use std::fs;
use std::time::Duration;
use tokio::time::timeout;

use extcp_config::{ConfigBuilder, ConfigLoader};
use extcp_engine::{CopySession, RunController, RunOptions, RunPlan};
use extcp_tests::test_utils::{Folder, RecordingView, ScriptedPrompt};
use extcp_types::{ConflictChoice, Error, Extension, PollInterval, ProgressUpdate, RunSummary};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn options(rename_probe_existing: bool) -> RunOptions {
    RunOptions {
        poll_interval: PollInterval::from_millis(10).expect("valid interval"),
        rename_probe_existing,
    }
}

fn session(sources: &[&Folder], destination: &Folder, extension: &str) -> CopySession {
    let mut session = CopySession::new(Extension::parse(extension).expect("valid extension"));
    for source in sources {
        session.add_source(source.path());
    }
    session.set_destination(destination.path());
    session
}

async fn run(
    plan: RunPlan,
    options: RunOptions,
    prompt: &mut ScriptedPrompt,
    view: &mut RecordingView,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let controller = RunController::new(options);
    let summary = timeout(Duration::from_secs(10), controller.run(plan, prompt, view)).await??;
    Ok(summary)
}

#[tokio::test]
async fn test_copies_case_variants_only() -> TestResult {
    let source = Folder::with_files(&["a.jpg", "b.JPG", "c.png"]);
    let destination = Folder::new();

    let plan = session(&[&source], &destination, ".jpg").prepare()?;
    let mut prompt = ScriptedPrompt::default();
    let mut view = RecordingView::default();
    let summary = run(plan, options(false), &mut prompt, &mut view).await?;

    assert_eq!(destination.file_names(), vec!["a.jpg", "b.JPG"]);
    assert_eq!(summary.copied, 2);
    assert!(summary.is_complete());
    assert_eq!(view.started, Some(2));
    assert_eq!(view.last_update(), Some(ProgressUpdate::new(2, 2)));
    assert_eq!(view.last_update().map(|u| u.percent), Some(100.0));
    assert_eq!(view.finished, 1);
    assert!(prompt.asked.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_rename_keeps_original() -> TestResult {
    let source = Folder::with_files(&["a.jpg"]);
    let destination = Folder::new();
    destination.write("a.jpg", "original");

    let plan = session(&[&source], &destination, ".jpg").prepare()?;
    let mut prompt = ScriptedPrompt::new(&[ConflictChoice::Rename]);
    let mut view = RecordingView::default();
    let summary = run(plan, options(false), &mut prompt, &mut view).await?;

    assert_eq!(destination.read("a.jpg"), "original");
    assert_eq!(destination.read("a(1).jpg"), "a.jpg");
    assert_eq!(summary.renamed, 1);
    assert_eq!(prompt.asked, vec!["a.jpg"]);
    Ok(())
}

#[tokio::test]
async fn test_skip_all_prompts_once() -> TestResult {
    let source = Folder::with_files(&["a.jpg", "b.jpg"]);
    let destination = Folder::new();
    destination.write("a.jpg", "old a");
    destination.write("b.jpg", "old b");

    let plan = session(&[&source], &destination, ".jpg").prepare()?;
    let mut prompt = ScriptedPrompt::new(&[ConflictChoice::SkipAll]);
    let mut view = RecordingView::default();
    let summary = run(plan, options(false), &mut prompt, &mut view).await?;

    assert_eq!(prompt.asked.len(), 1);
    assert_eq!(destination.read("a.jpg"), "old a");
    assert_eq!(destination.read("b.jpg"), "old b");
    assert_eq!(summary.files_written(), 0);
    assert_eq!(summary.skipped, 2);
    assert_eq!(view.last_update(), Some(ProgressUpdate::new(2, 2)));
    Ok(())
}

#[tokio::test]
async fn test_one_prompt_per_collision_without_all() -> TestResult {
    let names = ["a.jpg", "b.jpg", "c.jpg"];
    let source = Folder::with_files(&names);
    let destination = Folder::with_files(&names);

    let plan = session(&[&source], &destination, ".jpg").prepare()?;
    let mut prompt = ScriptedPrompt::new(&[
        ConflictChoice::Skip,
        ConflictChoice::Overwrite,
        ConflictChoice::Skip,
    ]);
    let mut view = RecordingView::default();
    let summary = run(plan, options(false), &mut prompt, &mut view).await?;

    assert_eq!(prompt.asked, vec!["a.jpg", "b.jpg", "c.jpg"]);
    assert_eq!(summary.overwritten, 1);
    assert_eq!(summary.skipped, 2);
    Ok(())
}

#[tokio::test]
async fn test_overwrite_all_latches_for_the_run() -> TestResult {
    let names = ["a.jpg", "b.jpg", "c.jpg"];
    let source = Folder::with_files(&names);
    let destination = Folder::new();
    for name in names {
        destination.write(name, "old");
    }

    let plan = session(&[&source], &destination, ".jpg").prepare()?;
    let mut prompt = ScriptedPrompt::new(&[ConflictChoice::OverwriteAll]);
    let mut view = RecordingView::default();
    let summary = run(plan, options(false), &mut prompt, &mut view).await?;

    assert_eq!(prompt.asked.len(), 1);
    assert_eq!(summary.overwritten, 3);
    for name in names {
        assert_eq!(destination.read(name), name);
    }
    Ok(())
}

#[tokio::test]
async fn test_cancel_mid_run() -> TestResult {
    let source = Folder::with_files(&["a.jpg", "b.jpg", "c.jpg"]);
    let destination = Folder::new();
    destination.write("b.jpg", "old b");

    let plan = session(&[&source], &destination, ".jpg").prepare()?;
    let mut prompt = ScriptedPrompt::new(&[ConflictChoice::Cancel]);
    let mut view = RecordingView::default();
    let summary = run(plan, options(false), &mut prompt, &mut view).await?;

    assert!(summary.cancelled);
    assert_eq!(summary.processed_files, 1);
    assert_eq!(destination.file_names(), vec!["a.jpg", "b.jpg"]);
    assert_eq!(destination.read("b.jpg"), "old b");
    assert_eq!(view.last_update(), Some(ProgressUpdate::new(1, 3)));
    assert_eq!(view.finished, 1);
    Ok(())
}

#[tokio::test]
async fn test_cancellation_token_before_start() -> TestResult {
    let source = Folder::with_files(&["a.jpg"]);
    let destination = Folder::new();

    let plan = session(&[&source], &destination, ".jpg").prepare()?;
    let controller = RunController::new(options(false));
    controller.cancel();

    let mut view = RecordingView::default();
    let summary = controller
        .run(plan, &mut ScriptedPrompt::default(), &mut view)
        .await?;

    assert!(summary.cancelled);
    assert!(destination.file_names().is_empty());
    assert_eq!(view.finished, 1);
    Ok(())
}

#[tokio::test]
async fn test_destination_removed_from_sources() -> TestResult {
    let source = Folder::with_files(&["a.jpg"]);
    let destination = Folder::with_files(&["b.jpg"]);

    let mut session = session(&[&source, &destination], &destination, ".jpg");
    let plan = session.prepare()?;
    assert_eq!(plan.removed_sources, vec![destination.path().to_path_buf()]);
    assert_eq!(session.sources().len(), 1);

    let mut prompt = ScriptedPrompt::default();
    let mut view = RecordingView::default();
    let summary = run(plan, options(false), &mut prompt, &mut view).await?;

    assert_eq!(summary.total_files, 1);
    assert!(prompt.asked.is_empty());
    assert_eq!(destination.file_names(), vec!["a.jpg", "b.jpg"]);
    Ok(())
}

#[tokio::test]
async fn test_same_name_in_two_sources_collides_within_run() -> TestResult {
    let first = Folder::with_files(&["x.jpg"]);
    let second = Folder::new();
    second.write("x.jpg", "second");
    let destination = Folder::new();

    let plan = session(&[&first, &second], &destination, ".jpg").prepare()?;
    let mut prompt = ScriptedPrompt::new(&[ConflictChoice::Rename]);
    let mut view = RecordingView::default();
    let summary = run(plan, options(false), &mut prompt, &mut view).await?;

    assert_eq!(prompt.asked, vec!["x.jpg"]);
    assert_eq!(summary.copied, 1);
    assert_eq!(summary.renamed, 1);
    assert_eq!(destination.file_names(), vec!["x(1).jpg", "x.jpg"]);
    Ok(())
}

#[tokio::test]
async fn test_failed_file_does_not_stop_the_run() -> TestResult {
    let source = Folder::with_files(&["a.jpg", "b.jpg", "c.jpg"]);
    let destination = Folder::new();

    let plan = session(&[&source], &destination, ".jpg").prepare()?;
    fs::remove_file(source.join("b.jpg"))?;

    let mut prompt = ScriptedPrompt::default();
    let mut view = RecordingView::default();
    let summary = run(plan, options(false), &mut prompt, &mut view).await?;

    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.failures[0].source, source.join("b.jpg"));
    assert_eq!(view.failures.len(), 1);
    assert_eq!(destination.file_names(), vec!["a.jpg", "c.jpg"]);
    assert_eq!(view.last_update(), Some(ProgressUpdate::new(3, 3)));
    assert!(summary.is_complete());
    Ok(())
}

#[tokio::test]
async fn test_rename_overwrites_generated_name_by_default() -> TestResult {
    let source = Folder::with_files(&["a.jpg"]);
    let destination = Folder::new();
    destination.write("a.jpg", "original");
    destination.write("a(1).jpg", "earlier rename");

    let plan = session(&[&source], &destination, ".jpg").prepare()?;
    let mut prompt = ScriptedPrompt::new(&[ConflictChoice::Rename]);
    let mut view = RecordingView::default();
    run(plan, options(false), &mut prompt, &mut view).await?;

    assert_eq!(destination.read("a(1).jpg"), "a.jpg");
    assert_eq!(destination.file_names().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_rename_probe_skips_existing_names() -> TestResult {
    let source = Folder::with_files(&["a.jpg"]);
    let destination = Folder::new();
    destination.write("a.jpg", "original");
    destination.write("a(1).jpg", "earlier rename");

    let plan = session(&[&source], &destination, ".jpg").prepare()?;
    let mut prompt = ScriptedPrompt::new(&[ConflictChoice::Rename]);
    let mut view = RecordingView::default();
    run(plan, options(true), &mut prompt, &mut view).await?;

    assert_eq!(destination.read("a(1).jpg"), "earlier rename");
    assert_eq!(destination.read("a(2).jpg"), "a.jpg");
    Ok(())
}

#[tokio::test]
async fn test_missing_destination_is_created() -> TestResult {
    let source = Folder::with_files(&["a.jpg"]);
    let parent = Folder::new();
    let target = parent.join("nested").join("photos");

    let mut session = CopySession::new(Extension::parse("jpg")?);
    session.add_source(source.path());
    session.set_destination(&target);
    let plan = session.prepare()?;

    let mut prompt = ScriptedPrompt::default();
    let mut view = RecordingView::default();
    let summary = run(plan, options(false), &mut prompt, &mut view).await?;

    assert_eq!(summary.copied, 1);
    assert!(target.join("a.jpg").is_file());
    Ok(())
}

#[test]
fn test_no_matching_files_is_reported_before_run() {
    let source = Folder::with_files(&["a.png"]);
    let destination = Folder::new();

    let err = session(&[&source], &destination, "jpg")
        .prepare()
        .unwrap_err();
    assert_eq!(
        err,
        Error::NoMatchingFiles {
            extension: ".jpg".to_string()
        }
    );
}

#[tokio::test]
async fn test_configuration_drives_run_options() -> TestResult {
    let dir = Folder::new();
    let config_path = dir.join("extcp.yaml");
    fs::write(
        &config_path,
        "copy:\n  default_extension: png\n  rename_probe_existing: true\nui:\n  poll_interval_ms: 20\n",
    )?;
    let config = ConfigLoader::load_from_file(&config_path)?;
    assert_eq!(config, ConfigBuilder::new().add_source_file(&config_path).build()?);

    let source = Folder::with_files(&["a.png", "b.jpg"]);
    let destination = Folder::new();
    destination.write("a.png", "original");
    destination.write("a(1).png", "earlier rename");

    let mut session = CopySession::new(config.copy.default_extension.clone());
    session.add_source(source.path());
    session.set_destination(destination.path());
    let plan = session.prepare()?;

    let options = RunOptions {
        poll_interval: config.ui.poll_interval,
        rename_probe_existing: config.copy.rename_probe_existing,
    };
    let mut prompt = ScriptedPrompt::new(&[ConflictChoice::Rename]);
    let mut view = RecordingView::default();
    let summary = run(plan, options, &mut prompt, &mut view).await?;

    assert_eq!(summary.total_files, 1);
    assert_eq!(destination.read("a(2).png"), "a.png");
    Ok(())
}
