use tokio::net::TcpListener;

use todo_app::api::router;
use todo_app::client::TodoApiClient;
use todo_app::dashboard::Dashboard;
use todo_app::db;
use todo_app::error::AppError;
use todo_app::models::{NewTodoRequest, UpdateTodoRequest, WELCOME_MESSAGE};
use todo_app::state::AppState;

/// Serves a fresh in-memory app on an ephemeral port and returns its base URL.
async fn spawn_server() -> String {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create database");
    db::init_schema(&pool).await.expect("Failed to create schema");

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router(AppState { db: pool }))
            .await
            .expect("server failed");
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn client_drives_full_crud_cycle() {
    let client = TodoApiClient::new(spawn_server().await).unwrap();

    let welcome = client.welcome().await.unwrap();
    assert_eq!(welcome.message, WELCOME_MESSAGE);

    let created = client
        .create(&NewTodoRequest {
            title: "t1".to_string(),
            description: "d1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(client.list().await.unwrap(), vec![created.clone()]);

    let updated = client
        .update(
            created.id,
            &UpdateTodoRequest {
                title: None,
                description: Some("d2".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "t1");
    assert_eq!(updated.description, "d2");

    client.delete(created.id).await.unwrap();
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn client_reports_not_found_detail() {
    let client = TodoApiClient::new(spawn_server().await).unwrap();

    match client.delete(42).await {
        Err(AppError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Todo not found");
        }
        other => panic!("expected not found, got {:?}", other),
    }
}

#[tokio::test]
async fn dashboard_forms_mutate_and_rerender() {
    let client = TodoApiClient::new(spawn_server().await).unwrap();

    let script = "\
add
buy milk
two litres
update
1

semi-skimmed
delete
1
delete
1
quit
";
    let mut dashboard = Dashboard::new(client.clone(), script.as_bytes(), Vec::new());
    dashboard.run().await.unwrap();
    let output = String::from_utf8(dashboard.into_output()).unwrap();

    assert!(output.contains("[ok] Todo added successfully"));
    assert!(output.contains("| 1  | buy milk | two litres  |"));
    assert!(output.contains("[ok] Todo updated successfully"));
    assert!(output.contains("| 1  | buy milk | semi-skimmed |"));
    assert!(output.contains("[ok] Todo deleted successfully"));
    assert!(output.contains("[error] Failed to delete todo (404: Todo not found)"));
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_reports_unreachable_api() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = TodoApiClient::new(format!("http://{}", addr)).unwrap();
    let mut dashboard = Dashboard::new(client, "q\n".as_bytes(), Vec::new());
    dashboard.run().await.unwrap();
    let output = String::from_utf8(dashboard.into_output()).unwrap();

    assert!(output.contains("[error] Failed to fetch todos"));
}
