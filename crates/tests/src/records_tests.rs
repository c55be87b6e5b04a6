use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{
    close_case, create_case, create_case_file, get, key_body, key_path, post_json, test_app,
};

fn numbers(list: &Value, field: &str) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|row| row[field].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn event_numbers_are_scoped_to_their_case_file() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;
    let a = create_case_file(&app, no_caso).await;
    let b = create_case_file(&app, no_caso).await;

    for (file, expected) in [(&a, 1), (&a, 2), (&b, 1), (&a, 3)] {
        let (status, resp) =
            post_json(&app, "/api/suceso/crear", &key_body(file, "descSuceso", "Audiencia")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(resp["conSuceso"], expected);
    }

    let (_, events) = get(&app, &format!("/api/suceso/{}", key_path(&a))).await;
    assert_eq!(numbers(&events, "conSuceso"), vec![1, 2, 3]);
    let (_, events) = get(&app, &format!("/api/suceso/{}", key_path(&b))).await;
    assert_eq!(numbers(&events, "conSuceso"), vec![1]);
}

#[tokio::test]
async fn each_record_kind_counts_on_its_own() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;
    let file = create_case_file(&app, no_caso).await;

    post_json(&app, "/api/suceso/crear", &key_body(&file, "descSuceso", "Radicacion")).await;
    post_json(&app, "/api/suceso/crear", &key_body(&file, "descSuceso", "Notificacion")).await;

    let (status, resp) =
        post_json(&app, "/api/resultado/crear", &key_body(&file, "descResul", "Admitida")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["conResul"], 1);

    let (status, resp) =
        post_json(&app, "/api/documento/crear", &key_body(&file, "ubicaDoc", "Archivo A-12")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["conDoc"], 1);

    let (_, results) = get(&app, &format!("/api/resultado/{}", key_path(&file))).await;
    assert_eq!(results, json!([{ "conResul": 1, "descResul": "Admitida" }]));

    let (_, docs) = get(&app, &format!("/api/documento/{}", key_path(&file))).await;
    assert_eq!(docs, json!([{ "conDoc": 1, "ubicaDoc": "Archivo A-12" }]));
}

#[tokio::test]
async fn detail_includes_child_records_in_order() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;
    let file = create_case_file(&app, no_caso).await;

    for desc in ["Radicacion", "Reparto", "Admision"] {
        post_json(&app, "/api/suceso/crear", &key_body(&file, "descSuceso", desc)).await;
    }
    post_json(&app, "/api/documento/crear", &key_body(&file, "ubicaDoc", "Caja 3")).await;

    let (status, detail) = get(&app, &format!("/api/expediente/{}", key_path(&file))).await;
    assert_eq!(status, StatusCode::OK);
    let descs: Vec<&str> = detail["sucesos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["descSuceso"].as_str().unwrap())
        .collect();
    assert_eq!(descs, vec!["Radicacion", "Reparto", "Admision"]);
    assert_eq!(detail["resultados"], json!([]));
    assert_eq!(detail["documentos"][0]["ubicaDoc"], "Caja 3");
}

#[tokio::test]
async fn closed_case_rejects_new_records() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;
    let file = create_case_file(&app, no_caso).await;
    close_case(&app, no_caso).await;

    let (status, resp) =
        post_json(&app, "/api/suceso/crear", &key_body(&file, "descSuceso", "Tarde")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["kind"], "InvalidState");

    let (status, _) =
        post_json(&app, "/api/documento/crear", &key_body(&file, "ubicaDoc", "Caja 9")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, events) = get(&app, &format!("/api/suceso/{}", key_path(&file))).await;
    assert_eq!(events, json!([]));
}

#[tokio::test]
async fn unknown_case_file_is_404() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;

    let body = json!({
        "codEspecializacion": "ESP01",
        "pasoEtapa": 1,
        "noCaso": no_caso,
        "consecExpe": 7,
        "descResul": "Fallo",
    });
    let (status, resp) = post_json(&app, "/api/resultado/crear", &body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["kind"], "NotFound");
}

#[tokio::test]
async fn listing_unknown_case_file_is_empty() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, events) = get(&app, "/api/suceso/ESP01/1/500/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events, json!([]));
}

#[tokio::test]
async fn blank_description_fails_validation() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;
    let file = create_case_file(&app, no_caso).await;

    let (status, resp) =
        post_json(&app, "/api/suceso/crear", &key_body(&file, "descSuceso", "")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["fieldErrors"]["desc_suceso"].is_string());
}
