use axum::Router;
use shared_types::{
    AppError, AppErrorKind, Case, CaseDocument, CaseEvent, CaseFile, CaseFileDetail, CaseFileKey,
    CaseFileView, CaseResult, CaseStatus, Client, CreateCaseFileRequest, CreateCaseFileResponse,
    CreateCaseRequest, CreateCaseResponse, CreateClientRequest, CreateClientResponse,
    CreateDocumentRequest, CreateDocumentResponse, CreateEventRequest, CreateEventResponse,
    CreateResultRequest, CreateResultResponse, DocumentType, FeatureFlags, Lawyer,
    MessageResponse, Place, Specialization, Stage, StageFlowStep, UpdateCaseFileRequest,
    UpdateCaseRequest,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        // Clients
        rest::client::search_clients,
        rest::client::get_client_by_document,
        rest::client::get_client_by_code,
        rest::client::create_client,
        // Cases
        rest::case::latest_active_case,
        rest::case::list_active_cases,
        rest::case::list_client_cases,
        rest::case::create_case,
        rest::case::get_case,
        rest::case::update_case,
        // Case files
        rest::case_file::list_case_files,
        rest::case_file::get_case_file_detail,
        rest::case_file::create_case_file,
        rest::case_file::update_case_file,
        // Events, results, documents
        rest::records::create_event,
        rest::records::list_events,
        rest::records::create_result,
        rest::records::list_results,
        rest::records::create_document,
        rest::records::list_documents,
        // Reference data
        rest::reference::list_specializations,
        rest::reference::list_stages,
        rest::reference::list_stage_flow,
        rest::reference::get_stage_flow_step,
        rest::reference::list_lawyers_by_specialization,
        rest::reference::get_lawyer,
        rest::reference::list_cities,
        rest::reference::list_entities_by_city,
        rest::reference::get_place,
        rest::reference::list_document_types,
        // Health
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind, MessageResponse, CaseFileKey,
        Client, CreateClientRequest, CreateClientResponse,
        Case, CaseStatus, CreateCaseRequest, CreateCaseResponse, UpdateCaseRequest,
        CaseFile, CaseFileView, CaseFileDetail, CreateCaseFileRequest, CreateCaseFileResponse,
        UpdateCaseFileRequest,
        CaseEvent, CaseResult, CaseDocument,
        CreateEventRequest, CreateEventResponse,
        CreateResultRequest, CreateResultResponse,
        CreateDocumentRequest, CreateDocumentResponse,
        Specialization, Stage, StageFlowStep, Lawyer, Place, DocumentType,
        health::HealthResponse,
    )),
    tags(
        (name = "clients", description = "Client intake and lookup"),
        (name = "cases", description = "Case lifecycle endpoints"),
        (name = "case-files", description = "Case file (expediente) endpoints"),
        (name = "events", description = "Case file events (sucesos)"),
        (name = "results", description = "Case file results (resultados)"),
        (name = "documents", description = "Case file documents (documentos)"),
        (name = "reference", description = "Specializations, stage flow, lawyers and places"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Case Workflow API",
        description = "Case and case-file tracking for a law office",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build the application router: the REST API under `/api/*`, plus the API
/// reference at `/docs` when enabled.
pub fn api_router(state: AppState, flags: &FeatureFlags) -> Router {
    let router = rest::api_router().with_state(state);

    if flags.docs {
        router.merge(Scalar::with_url("/docs", ApiDoc::openapi()))
    } else {
        router
    }
}
