//! End-to-end navigation tests.
//!
//! These drive the controller and the terminal session against a fake
//! `cscope` program inside a temporary workspace.
#![cfg(unix)]

mod common;

use common::{RecordingHost, TestWorkspace};
use cscope_nav::cscope::{CscopeExecutor, DatabaseLocator, OperationKind};
use cscope_nav::error::NavError;
use cscope_nav::nav::{Command, Controller, QueryOutcome};
use cscope_nav::terminal::{TerminalHost, run_session};
use serial_test::serial;

const THREE_MATCHES: &str = "src/util.h <global> 1 int add(int a, int b);\n\
                             src/util.c add 3 int add(int a, int b) {\n\
                             src/main.c main 4 return add(1, 2);\n";

fn controller(ws: &TestWorkspace) -> Controller<CscopeExecutor, String> {
    Controller::new(common::fake_executor(ws), DatabaseLocator::default(), 1024)
}

#[tokio::test]
#[serial]
async fn test_database_is_located_from_working_directory_and_cached() {
    let ws = TestWorkspace::builder()
        .fixture(&common::sample_project())
        .cscope_output("src/util.c add 3 int add(int a, int b) {\n")
        .build();
    let mut ctl = controller(&ws);
    let mut host = RecordingHost::at("main.c", 10);

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(ws.apath("src")).unwrap();
    let outcome = ctl
        .find(&mut host, OperationKind::FindGlobalDefinition, Some("add"))
        .await;
    std::env::set_current_dir(&original_dir).unwrap();

    assert!(matches!(outcome, Ok(QueryOutcome::Jumped(_))));
    assert_eq!(ctl.database_dir(), Some(ws.canonical_root().as_path()));
    assert!(
        host.statuses
            .iter()
            .any(|s| s.starts_with("symbol database at:"))
    );

    // Cached: resolution no longer depends on the working directory
    let outcome = ctl
        .find(&mut host, OperationKind::FindGlobalDefinition, Some("add"))
        .await;
    assert!(outcome.is_ok());
    assert_eq!(ctl.stack().len(), 2);
}

#[tokio::test]
#[serial]
async fn test_missing_database_spawns_nothing() {
    let ws = TestWorkspace::builder()
        .without_database()
        .cscope_output("a.c f 1 x\n")
        .build();
    let mut ctl = controller(&ws);
    let mut host = RecordingHost::at("main.c", 0);

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(ws.canonical_root()).unwrap();
    let result = ctl
        .run(
            &mut host,
            Command::Find {
                kind: OperationKind::FindSymbol,
                symbol: Some("x".to_string()),
            },
        )
        .await;
    std::env::set_current_dir(&original_dir).unwrap();

    assert!(matches!(result, Err(NavError::DatabaseNotFound)));
    assert!(host.last_status().starts_with("no symbol database located"));
    assert!(ws.recorded_args().is_empty(), "cscope must not run");
}

#[tokio::test]
#[serial]
async fn test_jump_select_and_pop_round_trip() {
    let ws = TestWorkspace::builder()
        .fixture(&common::sample_project())
        .cscope_output(THREE_MATCHES)
        .build();
    let mut ctl = controller(&ws).with_database_dir(ws.canonical_root()).unwrap();
    let mut host = RecordingHost::at("main.c", 77);

    let outcome = ctl
        .find(&mut host, OperationKind::FindSymbol, Some("add"))
        .await
        .unwrap();
    assert_eq!(outcome, QueryOutcome::Choices(3));
    assert!(ctl.stack().is_empty());
    assert_eq!(host.choices.len(), 1);
    assert_eq!(host.choices[0][2].scope, "main");

    let picked = ctl.select(&mut host, 1).unwrap();
    assert_eq!(picked.file, "src/util.c");
    assert_eq!(ctl.stack().len(), 1);
    assert_eq!(host.jumps, vec![(ws.apath("src/util.c"), 3)]);

    // Second pick from the same list saves the location we jumped to
    ctl.select(&mut host, 2).unwrap();
    assert_eq!(ctl.stack().len(), 2);

    let first = ctl.pop_mark(&mut host).unwrap();
    assert_eq!(first.buffer, ws.apath("src/util.c").display().to_string());
    assert_eq!(first.offset, 3);
    let second = ctl.pop_mark(&mut host).unwrap();
    assert_eq!((second.buffer.as_str(), second.offset), ("main.c", 77));
    assert!(matches!(
        ctl.pop_mark(&mut host),
        Err(NavError::Stack(_))
    ));
}

#[tokio::test]
#[serial]
async fn test_failed_cscope_run_is_reported() {
    let ws = TestWorkspace::builder()
        .cscope_failure("cscope: cannot read file version from file cscope.out")
        .build();
    let mut ctl = controller(&ws).with_database_dir(ws.canonical_root()).unwrap();
    let mut host = RecordingHost::at("main.c", 5);

    let result = ctl
        .run(
            &mut host,
            Command::Find {
                kind: OperationKind::FindSymbol,
                symbol: Some("main".to_string()),
            },
        )
        .await;

    assert!(matches!(result, Err(NavError::Query(_))));
    assert!(host.last_status().starts_with("cscope query failed"));
    assert!(host.last_status().ends_with("cannot read file version from file cscope.out"));
    assert!(ctl.stack().is_empty());
}

#[tokio::test]
#[serial]
async fn test_set_database_directory_then_query() {
    let ws = TestWorkspace::builder()
        .fixture(&common::sample_project())
        .database_in("index")
        .cscope_output("src/util.c add 3 int add(int a, int b) {\n")
        .build();
    let mut ctl = controller(&ws);
    let mut host = RecordingHost::at("main.c", 0);

    let bad = ctl
        .run(
            &mut host,
            Command::SetDatabaseDirectory(ws.apath("src").display().to_string()),
        )
        .await;
    assert!(matches!(bad, Err(NavError::InvalidDirectory(_))));
    assert!(host.last_status().starts_with("no symbol file in"));
    assert_eq!(ctl.database_dir(), None);

    let index = ws.apath("index");
    ctl.run(
        &mut host,
        Command::SetDatabaseDirectory(index.display().to_string()),
    )
    .await
    .unwrap();

    ctl.find(&mut host, OperationKind::FindCallers, Some("add"))
        .await
        .unwrap();
    let db_file = index.join("cscope.out").display().to_string();
    assert_eq!(ws.recorded_args()[3], db_file);
    assert_eq!(ws.recorded_args()[4], "-L3");
    assert_eq!(host.jumps, vec![(index.join("src/util.c"), 3)]);
}

#[tokio::test]
#[serial]
async fn test_terminal_session_transcript() {
    let ws = TestWorkspace::builder()
        .fixture(&common::sample_project())
        .cscope_output(THREE_MATCHES)
        .build();
    let mut ctl = controller(&ws);
    let mut host = TerminalHost::new(Vec::new());

    let input = format!(
        "set-database-directory {}\n\
         find-symbol add\n\
         select 3\n\
         find-callers\n\
         change-text foo\n\
         bogus\n\
         pop-navigation-mark\n\
         pop-navigation-mark\n\
         quit\n\
         find-symbol never-run\n",
        ws.canonical_root().display()
    );

    run_session(&mut ctl, &mut host, input.as_bytes())
        .await
        .expect("session should read all input");

    assert_eq!(host.location(), ("*scratch*", 0));
    let transcript = String::from_utf8(host.into_inner()).unwrap();

    assert!(transcript.contains("  1  src/util.h"));
    assert!(transcript.contains("  3  src/main.c"));
    let main_c = ws.apath("src/main.c");
    assert!(transcript.contains(&format!("-> {}:4", main_c.display())));
    assert!(transcript.contains("Find functions calling this function [default add]: add"));
    assert!(transcript.contains("[Change text string not supported]"));
    assert!(transcript.contains("[unknown command: bogus]"));
    assert!(transcript.contains("[navigation history empty]"));
    assert_eq!(ws.recorded_args().last().map(String::as_str), Some("add"));
}
