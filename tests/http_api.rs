//! End-to-end checks of the HTTP contract against a served router backed
//! by the in-memory repository.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use salgado_api::api;
use salgado_api::app_state::AppState;
use salgado_api::persistence::InMemorySalgadoRepository;

async fn spawn_server() -> SocketAddr {
    let state = AppState::new(Arc::new(InMemorySalgadoRepository::new()));
    let app = api::build_app(state, None);

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("cannot bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn json_of(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let Ok(body) = response.json::<Value>().await else {
        panic!("response body is not JSON");
    };
    (status, body)
}

#[tokio::test]
async fn full_lifecycle_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();
    let base = format!("http://{addr}/salgado");

    // Create
    let Ok(response) = client
        .post(&base)
        .json(&json!({ "name": "Coxinha", "price": 5.5 }))
        .send()
        .await
    else {
        panic!("POST failed");
    };
    let (status, created) = json_of(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["nome"], "Coxinha");
    assert_eq!(created["preco"], 5.5);
    assert!(!created["id"].is_null());
    assert!(!created["data_inclusao"].is_null());
    let id = created["id"].clone();

    // Read by id
    let Ok(response) = client.get(format!("{base}?id={id}")).send().await else {
        panic!("GET failed");
    };
    let (_, found) = json_of(response).await;
    assert_eq!(found, created);

    // Update price only
    let Ok(response) = client
        .patch(format!("{base}/{id}"))
        .json(&json!({ "price": 6.0 }))
        .send()
        .await
    else {
        panic!("PATCH failed");
    };
    let (status, updated) = json_of(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["nome"], "Coxinha");
    assert_eq!(updated["preco"], 6.0);

    // Delete twice
    for expected in [1, 0] {
        let Ok(response) = client.delete(format!("{base}/{id}")).send().await else {
            panic!("DELETE failed");
        };
        let (status, body) = json_of(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "rows_deleted": expected }));
    }

    // Gone
    let Ok(response) = client.get(format!("{base}?id={id}")).send().await else {
        panic!("GET failed");
    };
    let (_, gone) = json_of(response).await;
    assert_eq!(gone, Value::Null);
}

#[tokio::test]
async fn listing_and_name_filter() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();
    let base = format!("http://{addr}/salgado");

    for (nome, preco) in [("Coxinha", 5.5), ("Kibe", 4.0), ("Coxinha", 6.5)] {
        let Ok(response) = client
            .post(&base)
            .json(&json!({ "nome": nome, "preco": preco }))
            .send()
            .await
        else {
            panic!("POST failed");
        };
        assert_eq!(response.status(), StatusCode::OK);
    }

    let Ok(response) = client.get(&base).send().await else {
        panic!("GET failed");
    };
    let (_, all) = json_of(response).await;
    let Some(all) = all.as_array() else {
        panic!("expected an array");
    };
    let names: Vec<&str> = all.iter().filter_map(|s| s["nome"].as_str()).collect();
    assert_eq!(names, vec!["Coxinha", "Kibe", "Coxinha"]);

    let Ok(response) = client.get(format!("{base}?name=Coxinha")).send().await else {
        panic!("GET failed");
    };
    let (_, coxinhas) = json_of(response).await;
    let Some(coxinhas) = coxinhas.as_array() else {
        panic!("expected an array");
    };
    assert_eq!(coxinhas.len(), 2);
    assert!(coxinhas.iter().all(|s| s["nome"] == "Coxinha"));
}

#[tokio::test]
async fn invalid_input_gets_structured_error() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let Ok(response) = client
        .post(format!("http://{addr}/salgado"))
        .json(&json!({ "name": "Coxinha" }))
        .send()
        .await
    else {
        panic!("POST failed");
    };
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let Ok(response) = client.get(format!("http://{addr}/health")).send().await else {
        panic!("GET /health failed");
    };
    assert_eq!(response.status(), StatusCode::OK);

    let Ok(response) = client
        .get(format!("http://{addr}/api-docs/openapi.json"))
        .send()
        .await
    else {
        panic!("GET openapi failed");
    };
    let (status, doc) = json_of(response).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/salgado"].is_object());
}
