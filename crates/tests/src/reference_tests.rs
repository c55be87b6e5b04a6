use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{get, test_app};

fn column<'a>(list: &'a Value, field: &str) -> Vec<&'a str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|row| row[field].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn cities_are_root_places_sorted_by_name() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, cities) = get(&app, "/api/lugar/ciudades").await;
    assert_eq!(status, StatusCode::OK);
    // SUBA is typed as a city but hangs off BOG.
    assert_eq!(column(&cities, "nomLugar"), vec!["Bogota", "Medellin"]);
    assert!(cities[0]["lugCodLugar"].is_null());
}

#[tokio::test]
async fn entities_of_city_sorted_by_name() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, entities) = get(&app, "/api/lugar/entidades/BOG").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(column(&entities, "codLugar"), vec!["J01", "SUBA", "T01"]);

    let (_, none) = get(&app, "/api/lugar/entidades/J01").await;
    assert_eq!(none, serde_json::json!([]));
}

#[tokio::test]
async fn place_by_code() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, place) = get(&app, "/api/lugar/J02").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(place["nomLugar"], "Juzgado 2 Penal");
    assert_eq!(place["lugCodLugar"], "MED");

    let (status, _) = get(&app, "/api/lugar/NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lawyers_of_specialization_sorted_by_surname_then_name() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, lawyers) = get(&app, "/api/abogado/especializacion/ESP01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(column(&lawyers, "cedula"), vec!["300", "200", "100"]);

    let (_, lawyers) = get(&app, "/api/abogado/especializacion/ESP03").await;
    assert_eq!(lawyers, serde_json::json!([]));
}

#[tokio::test]
async fn lawyer_by_id() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, lawyer) = get(&app, "/api/abogado/100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lawyer["apellido"], "Zapata");
    assert_eq!(lawyer["nTarjetaProfesional"], "TP-100");

    let (status, _) = get(&app, "/api/abogado/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stage_flow_is_ordered_by_step() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, flow) = get(&app, "/api/especia-etapa/ESP01").await;
    assert_eq!(status, StatusCode::OK);
    let steps: Vec<i64> = flow
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["pasoEtapa"].as_i64().unwrap())
        .collect();
    assert_eq!(steps, vec![1, 2, 3, 4]);
    assert_eq!(
        column(&flow, "nomEtapa"),
        vec!["Demanda", "Contestacion", "Audiencia", "Apelacion"]
    );
}

#[tokio::test]
async fn single_stage_flow_step() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, step) = get(&app, "/api/especia-etapa/ESP01/4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(step["codEtapa"], "ET05");
    assert_eq!(step["idImpugna"], "AP");
    assert_eq!(step["nInstancia"], 2);

    let (status, _) = get(&app, "/api/especia-etapa/ESP02/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn specializations_sorted_by_name_with_or_without_slash() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, specs) = get(&app, "/api/especializacion").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(column(&specs, "nomEspecializacion"), vec!["Civil", "Laboral", "Penal"]);

    let (status, slashed) = get(&app, "/api/especializacion/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slashed, specs);
}

#[tokio::test]
async fn stages_and_document_types() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, stages) = get(&app, "/api/etapa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stages.as_array().unwrap().len(), 5);

    let (status, types) = get(&app, "/api/tipo-documento").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(column(&types, "idTipoDoc"), vec!["CC", "CE", "NIT"]);
}
