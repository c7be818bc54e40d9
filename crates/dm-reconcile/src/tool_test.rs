use super::*;

fn sh(script: &str) -> ToolRunner {
    // Extra arguments land in $1.. because "sh" fills $0
    ToolRunner::new(ToolConfig::new("sh", &["-c", script, "sh"]))
}

#[tokio::test]
async fn test_output_captures_streams_and_status() {
    let out = sh("echo out; echo err >&2; exit 2").output(&[]).await.unwrap();
    assert!(!out.success);
    assert_eq!(out.exit_code, 2);
    assert_eq!(out.stdout, "out\n");
    assert_eq!(out.stderr, "err\n");
    assert_eq!(out.diagnostic(), "err\n");
}

#[tokio::test]
async fn test_extra_args_follow_configured_args() {
    let out = sh("printf '%s|' \"$@\"")
        .run(&["revert", "--dry-run"])
        .await
        .unwrap();
    assert_eq!(out.stdout, "revert|--dry-run|");
}

#[tokio::test]
async fn test_run_reports_non_zero_exit_verbatim() {
    let err = sh("echo 'error: no database' >&2; exit 3")
        .run(&["info"])
        .await
        .unwrap_err();
    match err {
        ToolError::NonZeroExit {
            command,
            code,
            diagnostic,
        } => {
            assert!(command.starts_with("sh -c"));
            assert!(command.ends_with(" info"));
            assert_eq!(code, 3);
            assert_eq!(diagnostic, "error: no database\n");
        }
        other => panic!("expected NonZeroExit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_diagnostic_falls_back_to_stdout() {
    let err = sh("echo 'only stdout'; exit 1").run(&[]).await.unwrap_err();
    assert!(matches!(
        err,
        ToolError::NonZeroExit { ref diagnostic, .. } if diagnostic == "only stdout\n"
    ));
}

#[tokio::test]
async fn test_missing_program_is_spawn_error() {
    let runner = ToolRunner::new(ToolConfig::new("devmig-no-such-program", &["migrate"]));
    let err = runner.run(&["info"]).await.unwrap_err();
    match err {
        ToolError::Spawn { command, .. } => {
            assert_eq!(command, "devmig-no-such-program migrate info");
        }
        other => panic!("expected Spawn, got {:?}", other),
    }
}

#[tokio::test]
async fn test_working_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker"), "").unwrap();

    let out = sh("test -f marker")
        .with_working_dir(dir.path())
        .output(&[])
        .await
        .unwrap();
    assert!(out.success);
}
