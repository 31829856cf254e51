//! ApiClient against a mock records service.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use glowtrack_api::{ApiClient, ApiConfig, ApiError, ListParams};
use glowtrack_core::models::{PatientDraft, PatientPatch, SkinType, TreatmentDraft};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig::default().with_base_url(server.uri())).unwrap()
}

fn patient_json(id: &str, first: &str, last: &str) -> serde_json::Value {
    json!({
        "id": id,
        "clinic_id": "clinic-demo-001",
        "first_name": first,
        "last_name": last,
        "skin_type": "combination",
        "total_treatments": 3,
        "created_at": "2024-01-15T08:30:00Z"
    })
}

#[tokio::test]
async fn test_clinic_patients_sends_paging_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/patients/clinic/clinic-demo-001"))
        .and(query_param("skip", "20"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clinic_id": "clinic-demo-001",
            "patients": [patient_json("p1", "张", "三")],
            "total": 21
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = ListParams { skip: Some(20), limit: Some(10) };
    let response = client.clinic_patients("clinic-demo-001", params).await.unwrap();

    assert_eq!(response.total, 21);
    assert_eq!(response.patients[0].skin_type, Some(SkinType::Combination));
    assert_eq!(response.patients[0].total_treatments, 3);
}

#[tokio::test]
async fn test_not_found_carries_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/patients/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Patient not found" })),
        )
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).patient("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status_code(), 404);
    match err {
        ApiError::Status { detail, .. } => assert_eq!(detail, "Patient not found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_detail_uses_status_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/treatments/t1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).delete_treatment("t1").await.unwrap_err();
    match err {
        ApiError::Status { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "Internal Server Error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_patient_posts_draft() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/patients/"))
        .and(body_partial_json(json!({ "first_name": "李", "skin_type": "oily" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(patient_json("p9", "李", "四")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let draft = PatientDraft {
        clinic_id: "clinic-demo-001".into(),
        first_name: "李".into(),
        last_name: "四".into(),
        skin_type: Some(SkinType::Oily),
        ..Default::default()
    };
    let created = client_for(&mock_server).create_patient(&draft).await.unwrap();
    assert_eq!(created.id, "p9");
}

#[tokio::test]
async fn test_invalid_drafts_never_reach_the_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let draft = PatientDraft {
        clinic_id: "clinic-demo-001".into(),
        first_name: "".into(),
        last_name: "四".into(),
        ..Default::default()
    };
    assert!(matches!(
        client.create_patient(&draft).await,
        Err(ApiError::Validation(_))
    ));

    assert!(matches!(
        client.update_patient("p1", &PatientPatch::default()).await,
        Err(ApiError::Validation(_))
    ));

    let treatment = TreatmentDraft {
        patient_id: "p1".into(),
        provider_id: "dr-1".into(),
        treatment_date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        treatment_type: "水光针".into(),
        treatment_area: "全脸".into(),
        product_name: None,
        product_amount: None,
        cost: Some(-1.0),
        notes: None,
    };
    let err = client.create_treatment(&treatment).await.unwrap_err();
    assert_eq!(err.status_code(), -1);
}

#[tokio::test]
async fn test_patient_treatments_accepts_id_alias() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/treatments/patient/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "patient_id": "p1",
            "treatments": [{
                "id": "t1",
                "patient_id": "p1",
                "provider_id": "dr-1",
                "treatment_date": "2024-05-01",
                "treatment_type": "超声刀",
                "treatment_area": "下颌线",
                "cost": 6800.0
            }]
        })))
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server).patient_treatments("p1").await.unwrap();
    assert_eq!(response.treatments[0].treatment_id, "t1");
    assert_eq!(response.treatments[0].photos_count, 0);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/analysis/results/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).analysis_results("a1").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.status_code(), -1);
}

#[tokio::test]
async fn test_analysis_results_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/analysis/results/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "analysis_id": "a1",
            "status": "completed",
            "results": {}
        })))
        .mount(&mock_server)
        .await;

    let envelope = client_for(&mock_server).analysis_results("a1").await.unwrap();
    assert_eq!(envelope.status, "completed");
    assert_eq!(envelope.results, json!({}));
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ApiConfig::default().with_base_url(format!("http://127.0.0.1:{}", port));
    let client = ApiClient::new(config).unwrap();

    let err = client.patient("p1").await.unwrap_err();
    assert!(matches!(err, ApiError::Connection(_)));
    assert_eq!(err.status_code(), 0);
}
