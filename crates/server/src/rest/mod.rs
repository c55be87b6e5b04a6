pub mod case;
pub mod case_file;
pub mod client;
pub mod records;
pub mod reference;

use axum::{routing::{get, post}, Router};
use crate::db::AppState;
use crate::health;

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Clients
        .route("/api/cliente/buscar/{nombre}/{apellido}", get(client::search_clients))
        .route("/api/cliente/codigo/{cod_cliente}", get(client::get_client_by_code))
        .route("/api/cliente/crear", post(client::create_client))
        .route("/api/cliente/{documento}", get(client::get_client_by_document))
        // Cases
        .route("/api/caso/ultimo/{cod_cliente}", get(case::latest_active_case))
        .route("/api/caso/activos/{cod_cliente}", get(case::list_active_cases))
        .route("/api/caso/cliente/{cod_cliente}", get(case::list_client_cases))
        .route("/api/caso/crear", post(case::create_case))
        .route("/api/caso/{no_caso}", get(case::get_case).put(case::update_case))
        // Case files
        .route("/api/expediente/caso/{no_caso}", get(case_file::list_case_files))
        .route("/api/expediente/crear", post(case_file::create_case_file))
        .route(
            "/api/expediente/{cod_esp}/{paso_etapa}/{no_caso}/{consec_expe}",
            get(case_file::get_case_file_detail).put(case_file::update_case_file),
        )
        // Events, results, documents
        .route("/api/suceso/crear", post(records::create_event))
        .route("/api/suceso/{cod_esp}/{paso_etapa}/{no_caso}/{consec_expe}", get(records::list_events))
        .route("/api/resultado/crear", post(records::create_result))
        .route("/api/resultado/{cod_esp}/{paso_etapa}/{no_caso}/{consec_expe}", get(records::list_results))
        .route("/api/documento/crear", post(records::create_document))
        .route("/api/documento/{cod_esp}/{paso_etapa}/{no_caso}/{consec_expe}", get(records::list_documents))
        // Reference data
        .route("/api/especializacion", get(reference::list_specializations))
        .route("/api/especializacion/", get(reference::list_specializations))
        .route("/api/etapa", get(reference::list_stages))
        .route("/api/especia-etapa/{cod_especializacion}", get(reference::list_stage_flow))
        .route("/api/especia-etapa/{cod_especializacion}/{paso_etapa}", get(reference::get_stage_flow_step))
        .route("/api/abogado/especializacion/{cod_especializacion}", get(reference::list_lawyers_by_specialization))
        .route("/api/abogado/{cedula}", get(reference::get_lawyer))
        .route("/api/lugar/ciudades", get(reference::list_cities))
        .route("/api/lugar/entidades/{cod_ciudad}", get(reference::list_entities_by_city))
        .route("/api/lugar/{cod_lugar}", get(reference::get_place))
        .route("/api/tipo-documento", get(reference::list_document_types))
        // Liveness
        .route("/api/health", get(health::health_check))
}
