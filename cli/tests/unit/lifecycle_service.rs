//! Lifecycle controller and archive fetcher tests with stubbed ports.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use solr_zeppelin::application::services::archive::{
    FetchOutcome, ensure_downloaded, ensure_unpacked,
};
use solr_zeppelin::application::services::lifecycle::{
    CleanOutcome, LifecycleController, StopOutcome,
};
use solr_zeppelin::domain::config::PluginSpec;
use solr_zeppelin::domain::{CommandOutcome, InstallLayout, LifecycleError};
use solr_zeppelin::infra::fs::LocalFs;

use crate::helpers::{CapturingReporter, CountingDownloader, FixedProbe, RecordingRunner, layout_in};

const TIMEOUT: Duration = Duration::from_secs(90);

fn controller<'a>(
    layout: &'a InstallLayout,
    runner: &'a RecordingRunner,
    probe: &'a FixedProbe,
    reporter: &'a CapturingReporter,
) -> LifecycleController<'a, RecordingRunner, FixedProbe, LocalFs, CapturingReporter> {
    LifecycleController {
        layout,
        runner,
        probe,
        fs: &LocalFs,
        reporter,
        timeout: TIMEOUT,
    }
}

fn install_daemon(layout: &InstallLayout) {
    std::fs::create_dir_all(layout.daemon_path.parent().unwrap()).unwrap();
    std::fs::write(&layout.daemon_path, "#!/bin/sh\n").unwrap();
}

// ── Archive fetcher ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_download_happens_once() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    std::fs::create_dir_all(&layout.base_dir).unwrap();
    let downloader = CountingDownloader::default();
    let reporter = CapturingReporter::default();

    let first = ensure_downloaded(&layout, &downloader, &LocalFs, &reporter).await.unwrap();
    let second = ensure_downloaded(&layout, &downloader, &LocalFs, &reporter).await.unwrap();

    assert_eq!(first, FetchOutcome::Fetched);
    assert_eq!(second, FetchOutcome::AlreadyPresent);
    assert_eq!(downloader.count(), 1);
}

#[tokio::test]
async fn test_existing_archive_skips_network() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    std::fs::create_dir_all(&layout.base_dir).unwrap();
    std::fs::write(&layout.archive_path, b"cached").unwrap();
    let downloader = CountingDownloader::default();

    let outcome = ensure_downloaded(&layout, &downloader, &LocalFs, &CapturingReporter::default())
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::AlreadyPresent);
    assert_eq!(downloader.count(), 0);
    assert_eq!(std::fs::read(&layout.archive_path).unwrap(), b"cached");
}

#[tokio::test]
async fn test_unpack_runs_tar_once() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    std::fs::create_dir_all(&layout.base_dir).unwrap();
    let runner = RecordingRunner::succeeding();
    let reporter = CapturingReporter::default();

    ensure_unpacked(&layout, &runner, &LocalFs, &reporter, TIMEOUT).await.unwrap();
    // The stub runner does not create the directory; a real tar would.
    std::fs::create_dir_all(&layout.unpacked_dir).unwrap();
    let again = ensure_unpacked(&layout, &runner, &LocalFs, &reporter, TIMEOUT).await.unwrap();

    assert_eq!(again, FetchOutcome::AlreadyPresent);
    assert_eq!(runner.calls.lock().unwrap().len(), 1);
}

// ── Bootstrap ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_bootstrap_runs_steps_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    let runner = RecordingRunner::succeeding();
    let reporter = CapturingReporter::default();
    let downloader = CountingDownloader::default();
    let plugin = PluginSpec::default();

    controller(&layout, &runner, &FixedProbe(false), &reporter)
        .bootstrap(&downloader, &plugin)
        .await
        .unwrap();

    assert!(layout.base_dir.is_dir());
    assert_eq!(downloader.count(), 1);
    let archive = layout.archive_path.display().to_string();
    assert_eq!(
        runner.rendered(),
        vec![
            format!("tar -xvf {archive}"),
            "zeppelin-daemon.sh start".to_string(),
            format!("install-interpreter.sh --name solr --artifact {}", plugin.artifact),
            "zeppelin-daemon.sh restart".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_bootstrap_aborts_on_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    let runner = RecordingRunner::with(CommandOutcome::Completed(Some(1)));
    let reporter = CapturingReporter::default();

    let err = controller(&layout, &runner, &FixedProbe(false), &reporter)
        .bootstrap(&CountingDownloader::default(), &PluginSpec::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LifecycleError>(),
        Some(LifecycleError::CommandFailed { .. })
    ));
    // tar failed, so nothing after it ran and the archive stays for a retry.
    assert_eq!(runner.calls.lock().unwrap().len(), 1);
    assert!(layout.archive_path.exists());
    let lines = reporter.lines.lock().unwrap();
    assert!(lines.iter().any(|l| l.starts_with("warn: unpack output kept")), "got: {lines:?}");
}

#[tokio::test]
async fn test_bootstrap_timeout_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    std::fs::create_dir_all(&layout.unpacked_dir).unwrap();
    std::fs::write(&layout.archive_path, b"cached").unwrap();
    let runner = RecordingRunner::with(CommandOutcome::TimedOut);

    let err = controller(&layout, &runner, &FixedProbe(false), &CapturingReporter::default())
        .bootstrap(&CountingDownloader::default(), &PluginSpec::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LifecycleError>(),
        Some(LifecycleError::CommandTimedOut { secs: 90, .. })
    ));
    assert_eq!(runner.rendered(), vec!["zeppelin-daemon.sh start".to_string()]);
}

// ── Start / stop ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_start_invokes_daemon() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    install_daemon(&layout);
    let runner = RecordingRunner::succeeding();

    controller(&layout, &runner, &FixedProbe(false), &CapturingReporter::default())
        .start()
        .await
        .unwrap();

    let calls = runner.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, layout.daemon_path);
    assert_eq!(calls[0].args, vec!["start".to_string()]);
}

#[tokio::test]
async fn test_start_nonzero_exit_fails() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    install_daemon(&layout);
    let runner = RecordingRunner::with(CommandOutcome::Completed(Some(1)));

    let err = controller(&layout, &runner, &FixedProbe(false), &CapturingReporter::default())
        .start()
        .await
        .unwrap_err();

    assert!(err.to_string().contains("failed with code: 1"), "got: {err}");
}

#[tokio::test]
async fn test_stop_without_install_runs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    let runner = RecordingRunner::succeeding();

    let outcome = controller(&layout, &runner, &FixedProbe(true), &CapturingReporter::default())
        .stop()
        .await
        .unwrap();

    assert_eq!(outcome, StopOutcome::NotInstalled);
    assert!(runner.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_stop_when_not_running_runs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    install_daemon(&layout);
    let runner = RecordingRunner::succeeding();

    let outcome = controller(&layout, &runner, &FixedProbe(false), &CapturingReporter::default())
        .stop()
        .await
        .unwrap();

    assert_eq!(outcome, StopOutcome::AlreadyStopped);
    assert!(runner.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_stop_running_daemon() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    install_daemon(&layout);
    let runner = RecordingRunner::succeeding();

    let outcome = controller(&layout, &runner, &FixedProbe(true), &CapturingReporter::default())
        .stop()
        .await
        .unwrap();

    assert_eq!(outcome, StopOutcome::Stopped);
    assert_eq!(runner.rendered(), vec!["zeppelin-daemon.sh stop".to_string()]);
}

#[tokio::test]
async fn test_stop_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    install_daemon(&layout);
    let runner = RecordingRunner::with(CommandOutcome::Completed(Some(3)));

    let result = controller(&layout, &runner, &FixedProbe(true), &CapturingReporter::default())
        .stop()
        .await;

    assert!(result.is_err());
}

// ── Clean ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_clean_removes_everything() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    install_daemon(&layout);
    std::fs::write(&layout.archive_path, b"cached").unwrap();
    let runner = RecordingRunner::succeeding();

    let outcome = controller(&layout, &runner, &FixedProbe(false), &CapturingReporter::default())
        .clean()
        .await
        .unwrap();

    assert_eq!(
        outcome,
        CleanOutcome {
            stopped: false,
            removed: true
        }
    );
    assert!(!layout.base_dir.exists());
    assert!(!layout.archive_path.exists());
    assert!(!layout.unpacked_dir.exists());
    assert!(runner.calls.lock().unwrap().is_empty());
    assert!(dir.path().exists(), "install root itself must survive");
}

#[tokio::test]
async fn test_clean_stops_running_daemon_first() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    install_daemon(&layout);
    let runner = RecordingRunner::succeeding();

    let outcome = controller(&layout, &runner, &FixedProbe(true), &CapturingReporter::default())
        .clean()
        .await
        .unwrap();

    assert!(outcome.stopped);
    assert!(outcome.removed);
    assert_eq!(runner.rendered(), vec!["zeppelin-daemon.sh stop".to_string()]);
}

#[tokio::test]
async fn test_clean_keeps_tree_when_stop_fails() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    install_daemon(&layout);
    let runner = RecordingRunner::with(CommandOutcome::TimedOut);

    let result = controller(&layout, &runner, &FixedProbe(true), &CapturingReporter::default())
        .clean()
        .await;

    assert!(result.is_err());
    assert!(layout.base_dir.exists());
}

#[tokio::test]
async fn test_clean_with_nothing_installed() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    let runner = RecordingRunner::succeeding();

    let outcome = controller(&layout, &runner, &FixedProbe(false), &CapturingReporter::default())
        .clean()
        .await
        .unwrap();

    assert!(!outcome.removed);
    assert!(!outcome.stopped);
}
