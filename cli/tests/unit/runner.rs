//! The real `TokioCommandRunner` driving lifecycle operations against
//! `/bin/sh` stand-ins for the Zeppelin scripts.

#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::{Duration, Instant};

use solr_zeppelin::application::services::lifecycle::LifecycleController;
use solr_zeppelin::domain::config::PluginSpec;
use solr_zeppelin::domain::{InstallLayout, LifecycleError};
use solr_zeppelin::infra::command_runner::TokioCommandRunner;
use solr_zeppelin::infra::fs::LocalFs;

use crate::helpers::{CapturingReporter, CountingDownloader, FixedProbe, layout_in, write_script};

fn record_calls(layout: &InstallLayout) -> std::path::PathBuf {
    let log = layout.base_dir.join("calls.log");
    write_script(
        &layout.daemon_path,
        &format!("echo \"daemon $*\" >> '{}'", log.display()),
    );
    write_script(
        &layout.interpreter_installer_path,
        &format!("echo \"installer $*\" >> '{}'", log.display()),
    );
    log
}

#[tokio::test]
async fn test_bootstrap_with_real_scripts() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    let log = record_calls(&layout);
    std::fs::write(&layout.archive_path, b"cached").unwrap();
    let runner = TokioCommandRunner::new();
    let reporter = CapturingReporter::default();

    LifecycleController {
        layout: &layout,
        runner: &runner,
        probe: &FixedProbe(false),
        fs: &LocalFs,
        reporter: &reporter,
        timeout: Duration::from_secs(10),
    }
    .bootstrap(&CountingDownloader::default(), &PluginSpec::default())
    .await
    .unwrap();

    let calls = std::fs::read_to_string(&log).unwrap();
    assert_eq!(
        calls,
        "daemon start\ninstaller --name solr --artifact com.lucidworks.zeppelin:zeppelin-solr:0.1.6\ndaemon restart\n"
    );
}

#[tokio::test]
async fn test_hanging_daemon_is_killed_at_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    write_script(&layout.daemon_path, "sleep 30");
    let runner = TokioCommandRunner::new();
    let started = Instant::now();

    let err = LifecycleController {
        layout: &layout,
        runner: &runner,
        probe: &FixedProbe(false),
        fs: &LocalFs,
        reporter: &CapturingReporter::default(),
        timeout: Duration::from_millis(300),
    }
    .start()
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LifecycleError>(),
        Some(LifecycleError::CommandTimedOut { .. })
    ));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_failing_daemon_exit_code_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    write_script(&layout.daemon_path, "exit 7");
    let runner = TokioCommandRunner::new();

    let err = LifecycleController {
        layout: &layout,
        runner: &runner,
        probe: &FixedProbe(false),
        fs: &LocalFs,
        reporter: &CapturingReporter::default(),
        timeout: Duration::from_secs(10),
    }
    .start()
    .await
    .unwrap_err();

    assert!(err.to_string().contains("code: 7"), "got: {err}");
}

#[tokio::test]
async fn test_start_without_install_is_launch_failure() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    let runner = TokioCommandRunner::new();

    let err = LifecycleController {
        layout: &layout,
        runner: &runner,
        probe: &FixedProbe(false),
        fs: &LocalFs,
        reporter: &CapturingReporter::default(),
        timeout: Duration::from_secs(5),
    }
    .start()
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LifecycleError>(),
        Some(LifecycleError::CommandLaunch { .. })
    ));
}
