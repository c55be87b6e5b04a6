use axum::http::StatusCode;
use case_service::repo::case_file::find_by_key;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::CaseFileKey;

use crate::common::{
    close_case, create_case, create_case_file, get, key_path, post_json, put_json, test_app,
};

#[tokio::test]
async fn create_starts_at_first_step_of_stage_flow() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;

    let file = create_case_file(&app, no_caso).await;
    assert_eq!(file["success"], true);
    assert_eq!(file["codEspecializacion"], "ESP01");
    assert_eq!(file["pasoEtapa"], 1);
    assert_eq!(file["noCaso"], no_caso);
    assert_eq!(file["consecExpe"], 1);

    let (_, detail) = get(&app, &format!("/api/expediente/{}", key_path(&file))).await;
    assert_eq!(detail["codEtapa"], "ET01");
    assert_eq!(detail["nomEtapa"], "Demanda");
}

#[tokio::test]
async fn first_step_is_the_lowest_defined_step() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    // ESP02's flow starts at step 2.
    let no_caso = create_case(&app, "C001", "ESP02").await;

    let file = create_case_file(&app, no_caso).await;
    assert_eq!(file["pasoEtapa"], 2);

    let (_, detail) = get(&app, &format!("/api/expediente/{}", key_path(&file))).await;
    assert_eq!(detail["codEtapa"], "ET03");
}

#[tokio::test]
async fn sequence_is_numbered_per_case() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let a = create_case(&app, "C001", "ESP01").await;
    let b = create_case(&app, "C002", "ESP01").await;

    assert_eq!(create_case_file(&app, a).await["consecExpe"], 1);
    assert_eq!(create_case_file(&app, a).await["consecExpe"], 2);
    assert_eq!(create_case_file(&app, b).await["consecExpe"], 1);

    let (status, files) = get(&app, &format!("/api/expediente/caso/{a}")).await;
    assert_eq!(status, StatusCode::OK);
    let seqs: Vec<i64> = files
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["consecExpe"].as_i64().unwrap())
        .collect();
    assert_eq!(seqs, vec![1, 2]);
}

#[tokio::test]
async fn specialization_without_flow_is_rejected() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP03").await;

    let body = json!({ "noCaso": no_caso, "fechaEtapa": "2024-02-01" });
    let (status, resp) = post_json(&app, "/api/expediente/crear", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["kind"], "BadRequest");
}

#[tokio::test]
async fn missing_case_is_404_and_closed_case_is_400() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({ "noCaso": 999, "fechaEtapa": "2024-02-01" });
    let (status, _) = post_json(&app, "/api/expediente/crear", &body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let no_caso = create_case(&app, "C001", "ESP01").await;
    close_case(&app, no_caso).await;
    let body = json!({ "noCaso": no_caso, "fechaEtapa": "2024-02-01" });
    let (status, resp) = post_json(&app, "/api/expediente/crear", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["kind"], "InvalidState");
}

#[tokio::test]
async fn lawyer_must_practise_the_specialization() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    // Lawyer 200 practises ESP01 only.
    let no_caso = create_case(&app, "C001", "ESP02").await;

    let body = json!({ "noCaso": no_caso, "cedula": "200", "fechaEtapa": "2024-02-01" });
    let (status, _) = post_json(&app, "/api/expediente/crear", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({ "noCaso": no_caso, "cedula": "100", "codLugar": "J02", "fechaEtapa": "2024-02-01" });
    let (status, resp) = post_json(&app, "/api/expediente/crear", &body).await;
    assert_eq!(status, StatusCode::CREATED, "{resp}");
}

#[tokio::test]
async fn detail_of_fresh_case_file_has_empty_lists() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;
    let file = create_case_file(&app, no_caso).await;

    let (status, detail) = get(&app, &format!("/api/expediente/{}", key_path(&file))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["sucesos"], json!([]));
    assert_eq!(detail["resultados"], json!([]));
    assert_eq!(detail["documentos"], json!([]));
    assert_eq!(detail["nomLugar"], json!(null));
    assert_eq!(detail["cedula"], json!(null));
    assert_eq!(detail["nInstancia"], 1);
    assert_eq!(detail["fechaEtapa"], "2024-02-01");
}

#[tokio::test]
async fn detail_of_unknown_key_is_404() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;
    create_case_file(&app, no_caso).await;

    let (status, resp) = get(&app, &format!("/api/expediente/ESP01/1/{no_caso}/9")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["kind"], "NotFound");

    let (status, _) = get(&app, &format!("/api/expediente/ESP01/2/{no_caso}/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_sets_place_lawyer_and_date() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;
    let file = create_case_file(&app, no_caso).await;
    let uri = format!("/api/expediente/{}", key_path(&file));

    let body = json!({ "codLugar": "J01", "cedula": "300", "fechaEtapa": "2024-03-15" });
    let (status, resp) = put_json(&app, &uri, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["success"], true);

    let (_, detail) = get(&app, &uri).await;
    assert_eq!(detail["codLugar"], "J01");
    assert_eq!(detail["nomLugar"], "Juzgado 1 Civil");
    assert_eq!(detail["cedula"], "300");
    assert_eq!(detail["fechaEtapa"], "2024-03-15");
}

#[tokio::test]
async fn find_by_key_reads_stored_row() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;
    create_case_file(&app, no_caso).await;
    let no_caso = no_caso as i32;
    let mut conn = pool.acquire().await.unwrap();

    let key = CaseFileKey::new("ESP01", 1, no_caso, 1);
    let file = find_by_key(&mut conn, &key, false)
        .await
        .unwrap()
        .expect("case file stored");
    assert_eq!(file.key(), key);
    assert_eq!(file.cod_etapa.as_deref(), Some("ET01"));
    assert_eq!(file.fecha_etapa, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());

    let missing = CaseFileKey::new("ESP01", 1, no_caso, 2);
    assert_eq!(find_by_key(&mut conn, &missing, false).await.unwrap(), None);
}

#[tokio::test]
async fn update_rejects_unknown_place_missing_file_and_closed_case() {
    let Some((app, _pool, _guard)) = test_app().await else { return };
    let no_caso = create_case(&app, "C001", "ESP01").await;
    let file = create_case_file(&app, no_caso).await;
    let uri = format!("/api/expediente/{}", key_path(&file));

    let (status, _) = put_json(&app, &uri, &json!({ "codLugar": "XXX", "fechaEtapa": "2024-03-15" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = put_json(
        &app,
        &format!("/api/expediente/ESP01/1/{no_caso}/5"),
        &json!({ "fechaEtapa": "2024-03-15" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    close_case(&app, no_caso).await;
    let (status, resp) = put_json(&app, &uri, &json!({ "fechaEtapa": "2024-03-15" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["kind"], "InvalidState");
}
