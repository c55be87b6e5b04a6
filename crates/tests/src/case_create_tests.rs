use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{create_case, get, post_json, test_app};

#[tokio::test]
async fn first_case_gets_number_one_and_starts_active() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "codCliente": "C001",
        "codEspecializacion": "ESP01",
        "fechaInicio": "2024-01-10",
        "valor": 500000,
    });
    let (status, resp) = post_json(&app, "/api/caso/crear", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["success"], true);
    assert_eq!(resp["noCaso"], 1);

    let (status, case) = get(&app, "/api/caso/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        case,
        json!({
            "noCaso": 1,
            "codCliente": "C001",
            "codEspecializacion": "ESP01",
            "fechaInicio": "2024-01-10",
            "fechaFin": null,
            "valor": 500000,
        })
    );
}

#[tokio::test]
async fn numbers_continue_from_current_max() {
    let Some((app, pool, _guard)) = test_app().await else { return };

    sqlx::query(
        "INSERT INTO caso (no_caso, cod_cliente, cod_especializacion, fecha_inicio, valor) \
         VALUES (41, 'C002', 'ESP02', '2023-05-01', 0)",
    )
    .execute(&pool)
    .await
    .unwrap();

    assert_eq!(create_case(&app, "C001", "ESP01").await, 42);
    assert_eq!(create_case(&app, "C002", "ESP01").await, 43);
}

#[tokio::test]
async fn value_accepted_as_numeric_string() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "codCliente": "C001",
        "codEspecializacion": "ESP01",
        "fechaInicio": "2024-01-10",
        "valor": "750000",
    });
    let (status, resp) = post_json(&app, "/api/caso/crear", &body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, case) = get(&app, &format!("/api/caso/{}", resp["noCaso"])).await;
    assert_eq!(case["valor"], 750000);
}

#[tokio::test]
async fn negative_value_fails_validation() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "codCliente": "C001",
        "codEspecializacion": "ESP01",
        "fechaInicio": "2024-01-10",
        "valor": -1,
    });
    let (status, resp) = post_json(&app, "/api/caso/crear", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["kind"], "ValidationError");
}

#[tokio::test]
async fn unknown_client_or_specialization_is_404() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "codCliente": "C999",
        "codEspecializacion": "ESP01",
        "fechaInicio": "2024-01-10",
        "valor": 1,
    });
    let (status, _) = post_json(&app, "/api/caso/crear", &body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body = json!({
        "codCliente": "C001",
        "codEspecializacion": "NOPE",
        "fechaInicio": "2024-01-10",
        "valor": 1,
    });
    let (status, _) = post_json(&app, "/api/caso/crear", &body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Nothing was written by the failed attempts.
    assert_eq!(create_case(&app, "C001", "ESP01").await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_contiguous_numbers() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    const N: i64 = 12;
    let mut handles = Vec::new();
    for i in 0..N {
        let app = app.clone();
        let client = if i % 2 == 0 { "C001" } else { "C002" };
        handles.push(tokio::spawn(async move { create_case(&app, client, "ESP01").await }));
    }

    let mut numbers = Vec::new();
    for handle in handles {
        numbers.push(handle.await.unwrap());
    }
    numbers.sort_unstable();

    assert_eq!(numbers, (1..=N).collect::<Vec<_>>());
}

#[tokio::test]
async fn missing_case_is_404() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, resp) = get(&app, "/api/caso/77").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["kind"], "NotFound");
}
