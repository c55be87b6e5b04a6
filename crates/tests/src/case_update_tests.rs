use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{close_case, create_case, get, put_json, test_app};

#[tokio::test]
async fn update_active_case_persists_fields() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;

    let body = json!({
        "codEspecializacion": "ESP02",
        "fechaInicio": "2024-03-01",
        "valor": "900000",
    });
    let (status, resp) = put_json(&app, &format!("/api/caso/{no_caso}"), &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["success"], true);

    let (_, case) = get(&app, &format!("/api/caso/{no_caso}")).await;
    assert_eq!(case["codEspecializacion"], "ESP02");
    assert_eq!(case["fechaInicio"], "2024-03-01");
    assert_eq!(case["valor"], 900000);
    assert_eq!(case["fechaFin"], json!(null));
}

#[tokio::test]
async fn closed_case_rejects_every_update() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;
    close_case(&app, no_caso).await;

    let (_, case) = get(&app, &format!("/api/caso/{no_caso}")).await;
    assert_eq!(case["fechaFin"], "2024-06-30");

    let body = json!({
        "codEspecializacion": "ESP01",
        "fechaInicio": "2024-01-10",
        "valor": 1,
    });
    let (status, resp) = put_json(&app, &format!("/api/caso/{no_caso}"), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["kind"], "InvalidState");

    // Unchanged.
    let (_, after) = get(&app, &format!("/api/caso/{no_caso}")).await;
    assert_eq!(after, case);
}

#[tokio::test]
async fn update_missing_case_is_404() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "codEspecializacion": "ESP01",
        "fechaInicio": "2024-01-10",
        "valor": 1,
    });
    let (status, _) = put_json(&app, "/api/caso/404", &body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn end_date_before_start_is_rejected() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;

    let body = json!({
        "codEspecializacion": "ESP01",
        "fechaInicio": "2024-05-01",
        "fechaFin": "2024-04-30",
        "valor": 1,
    });
    let (status, resp) = put_json(&app, &format!("/api/caso/{no_caso}"), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["kind"], "BadRequest");

    let (_, case) = get(&app, &format!("/api/caso/{no_caso}")).await;
    assert_eq!(case["fechaFin"], json!(null));
}

#[tokio::test]
async fn latest_and_active_lists_skip_closed_cases() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let first = create_case(&app, "C001", "ESP01").await;
    let second = create_case(&app, "C001", "ESP02").await;
    let third = create_case(&app, "C001", "ESP01").await;
    create_case(&app, "C002", "ESP01").await;
    close_case(&app, third).await;

    let (status, latest) = get(&app, "/api/caso/ultimo/C001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest["noCaso"], second);

    let (_, active) = get(&app, "/api/caso/activos/C001").await;
    let numbers: Vec<i64> = active
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["noCaso"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![second, first]);

    let (_, all) = get(&app, "/api/caso/cliente/C001").await;
    assert_eq!(all.as_array().unwrap().len(), 3);
    assert_eq!(all[0]["noCaso"], third);
}

#[tokio::test]
async fn latest_active_is_null_without_open_cases() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, latest) = get(&app, "/api/caso/ultimo/C002").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest, json!(null));
}
