//! The text front end over the in-memory store: subcommands and the numbered menu.

use cheeper::app::App;
use cheeper::console::{run_command, run_menu};
use cheeper::domain_model::UserId;
use cheeper::infra_memory::MemoryKvStore;
use cheeper::settings::{Command, OutputFormat};
use std::sync::Arc;

fn uid(s: &str) -> UserId {
    s.parse().unwrap()
}

fn app() -> App {
    App::with_store(Arc::new(MemoryKvStore::new()))
}

async fn run(app: &App, command: Command) -> String {
    let mut out = Vec::new();
    run_command(app.graph_service.as_ref(), command, &mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

async fn menu(app: &App, input: &str) -> String {
    let mut out = Vec::new();
    run_menu(app.graph_service.as_ref(), input.as_bytes(), &mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn subcommands_report_outcomes() {
    let app = app();
    let add_ann = Command::AddUser {
        id: uid("1"),
        name: "Ann".to_string(),
        login: "ann1".to_string(),
    };

    assert_eq!(run(&app, add_ann.clone()).await, "User Ann added.\n");
    assert_eq!(run(&app, add_ann).await, "Error: user 1 already exists.\n");

    let out = run(
        &app,
        Command::AddFriend {
            user: uid("1"),
            friend: uid("2"),
        },
    )
    .await;
    assert_eq!(out, "Error: user 2 does not exist.\n");

    let out = run(
        &app,
        Command::AddMessage {
            user: uid("1"),
            text: "hi".to_string(),
        },
    )
    .await;
    assert_eq!(out, "Message 1 added for user 1.\n");

    let out = run(&app, Command::FriendCount { user: uid("1") }).await;
    assert_eq!(out, "Friend count: 0\n");

    let out = run(&app, Command::Friends { user: uid("1") }).await;
    assert_eq!(out, "No friends.\n");

    let out = run(&app, Command::Friends { user: uid("9") }).await;
    assert_eq!(out, "User 9 does not exist.\n");
}

#[tokio::test]
async fn users_dump_in_both_formats() {
    let app = app();
    assert_eq!(
        run(&app, Command::Users { format: OutputFormat::Table }).await,
        "No users in the system.\n"
    );

    run(
        &app,
        Command::AddUser {
            id: uid("1"),
            name: "Ann".to_string(),
            login: "ann1".to_string(),
        },
    )
    .await;

    let table = run(&app, Command::Users { format: OutputFormat::Table }).await;
    assert!(table.contains("| 1  | Ann  | ann1  | no friends | no messages |"));

    let json = run(&app, Command::Users { format: OutputFormat::Json }).await;
    let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(rows[0]["login"], "ann1");
}

#[tokio::test]
async fn menu_drives_a_session() {
    let app = app();
    let input = "\
1\n1\nAnn\nann1\n\
1\n2\nBob\nbob2\n\
3\n1\n2\n\
2\n1\nhello\n\
5\n1\n\
6\n2\n\
4\n1\ny\nnot-a-date\n\n\n\
9\n\
8\n";

    let out = menu(&app, input).await;

    assert!(out.contains("User Ann added."));
    assert!(out.contains("User Bob added."));
    assert!(out.contains("Users 1 and 2 are now friends."));
    assert!(out.contains("Message 1 added for user 1."));
    assert!(out.contains("User ID: Bob\n"));
    assert!(out.contains("Friend count: 1"));
    assert!(out.contains("Error: invalid date \"not-a-date\", expected YYYY-MM-DD."));
    assert!(out.contains(": hello"));
    assert!(out.contains("Invalid choice, try again."));
}

#[tokio::test]
async fn menu_stops_at_end_of_input() {
    let app = app();
    let out = menu(&app, "1\n42\n").await;
    assert!(out.contains("Name: "));
    assert!(!out.contains("added"));
}

#[tokio::test]
async fn menu_rejects_bad_user_id() {
    let app = app();
    let out = menu(&app, "6\nuser:1\n8\n").await;
    assert!(out.contains("Error: user id must not contain ':'"));
}
