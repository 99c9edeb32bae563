//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: endpoint catalog → HTTP requests →
//! paginated fetch → normalized records.

use async_trait::async_trait;
use rdskit::http::{ApiClient, RequestConfig};
use rdskit::poll::{wait_for_job, JobProbe, JobStatus};
use rdskit::search;
use rdskit::{endpoints, Fetcher, MutationDispatcher, Result, ServiceConfig, StringMap};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ServiceConfig {
    ServiceConfig::new(server.uri(), "cn-north-1", "pid-1")
        .with_token("test-token")
        .with_page_size(2)
}

fn fetcher_for(service: &ServiceConfig) -> Fetcher {
    Fetcher::new(ApiClient::from_service(service).unwrap())
}

fn instance_vars() -> HashMap<String, String> {
    HashMap::from([("instance_id".to_string(), "inst-1".to_string())])
}

// ============================================================================
// Catalog read flows
// ============================================================================

#[tokio::test]
async fn test_backups_paginated_by_total_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/pid-1/backups"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .and(header("X-Auth-Token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "backups": [
                {"id": "b1", "name": "nightly-1", "type": "auto", "status": "COMPLETED"},
                {"id": "b2", "name": "nightly-2", "type": "auto", "status": "COMPLETED"}
            ],
            "total_count": 3
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/pid-1/backups"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "backups": [
                {"id": "b3", "name": "adhoc", "type": "manual", "status": "COMPLETED"}
            ],
            "total_count": 3
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let fetcher = fetcher_for(&service);

    let records = endpoints::find("backups")
        .unwrap()
        .read(&fetcher, &service, &HashMap::new(), &StringMap::new(), &HashMap::new())
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    // server order survives pagination and normalization
    let ids: Vec<_> = records
        .iter()
        .map(|r| r.get("id").and_then(|v| v.as_str()).unwrap())
        .collect();
    assert_eq!(ids, vec!["b1", "b2", "b3"]);
    assert_eq!(records[2].get("backup_type"), Some(&json!("manual")));
}

#[tokio::test]
async fn test_accounts_page_numbered_until_short_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/pid-1/instances/inst-1/db_user/detail"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                {"name": "root", "hosts": ["%"]},
                {"name": "app", "hosts": ["10.0.0.0/8"]}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/pid-1/instances/inst-1/db_user/detail"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"name": "readonly"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let fetcher = fetcher_for(&service);

    let records = endpoints::find("accounts")
        .unwrap()
        .read(&fetcher, &service, &instance_vars(), &StringMap::new(), &HashMap::new())
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].get("name"), Some(&json!("root")));
    // normalization fills the fixed key set with defaults
    assert_eq!(records[2].get("hosts"), Some(&json!([])));
}

#[tokio::test]
async fn test_slow_logs_marker_cursor_in_post_body() {
    let mock_server = MockServer::start().await;

    // first page carries no marker
    Mock::given(method("POST"))
        .and(path("/v3/pid-1/instances/inst-1/slowlog"))
        .and(body_partial_json(json!({"limit": 2, "start_date": "2026-08-01"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slow_log_list": [
                {"time": "1.2s", "query_sample": "SELECT 1", "line_num": "101"},
                {"time": "2.5s", "query_sample": "SELECT 2", "line_num": "102"}
            ]
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    // marker is the line_num of the last record of the previous page,
    // carried over verbatim
    Mock::given(method("POST"))
        .and(path("/v3/pid-1/instances/inst-1/slowlog"))
        .and(body_partial_json(json!({"limit": 2, "line_num": "102"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slow_log_list": [
                {"time": "4.0s", "query_sample": "SELECT 3", "line_num": "103"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let fetcher = fetcher_for(&service);
    let filters = StringMap::from([("start_date".to_string(), "2026-08-01".to_string())]);

    let records = endpoints::find("slow_logs")
        .unwrap()
        .read(&fetcher, &service, &instance_vars(), &filters, &HashMap::new())
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[2].get("query_sample"), Some(&json!("SELECT 3")));
}

#[tokio::test]
async fn test_missing_subresource_reads_as_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/pid-1/instances/inst-1/replication/publications"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error_code": "DBS.280238",
            "error_msg": "instance not found"
        })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let fetcher = fetcher_for(&service);

    let records = endpoints::find("publications")
        .unwrap()
        .read_or_empty(&fetcher, &service, &instance_vars(), &StringMap::new(), &HashMap::new())
        .await
        .unwrap();

    assert!(records.is_empty());
}

// ============================================================================
// Mutation + job polling flow
// ============================================================================

struct HttpJobProbe {
    client: ApiClient,
    job_id: String,
}

#[async_trait]
impl JobProbe for HttpJobProbe {
    async fn status(&self) -> Result<JobStatus> {
        let body = self
            .client
            .get_json(&format!("v3/pid-1/jobs/{}", self.job_id), &RequestConfig::new())
            .await?;
        let status = search::search_string("job.status", &body).unwrap_or_default();
        Ok(match status.as_str() {
            "Completed" => JobStatus::Success(body["job"].clone()),
            "Failed" => JobStatus::Failed(
                search::search_string("job.fail_reason", &body).unwrap_or_default(),
            ),
            _ => JobStatus::Pending,
        })
    }
}

#[tokio::test]
async fn test_mutation_then_poll_job_to_completion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/pid-1/instances/inst-1/db_user"))
        .and(body_partial_json(json!({"name": "new_user"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"job_id": "job-9"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    // pending once, then complete
    Mock::given(method("GET"))
        .and(path("/v3/pid-1/jobs/job-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job": {"id": "job-9", "status": "Running"}
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/pid-1/jobs/job-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job": {"id": "job-9", "status": "Completed"}
        })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let dispatcher = MutationDispatcher::new(ApiClient::from_service(&service).unwrap());

    let response = dispatcher
        .create(
            "inst-1",
            "v3/pid-1/instances/inst-1/db_user",
            json!({"name": "new_user", "password": "s3cret"}),
        )
        .await
        .unwrap();
    let job_id = response["job_id"].as_str().unwrap().to_string();

    let probe = HttpJobProbe {
        client: ApiClient::from_service(&service).unwrap(),
        job_id,
    };
    let result = wait_for_job(&probe, Duration::from_millis(10), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(result["status"], json!("Completed"));
}

#[tokio::test]
async fn test_mutations_on_same_instance_serialize() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v3/pid-1/instances/inst-1/database/orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(100))
                .set_body_json(json!({})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v3/pid-1/instances/inst-1/database/staging"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let dispatcher =
        std::sync::Arc::new(MutationDispatcher::new(ApiClient::from_service(&service).unwrap()));

    let first = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            dispatcher
                .delete("inst-1", "v3/pid-1/instances/inst-1/database/orders")
                .await
        })
    };
    // give the first mutation time to take the instance lock
    tokio::time::sleep(Duration::from_millis(20)).await;

    let started = std::time::Instant::now();
    dispatcher
        .delete("inst-1", "v3/pid-1/instances/inst-1/database/staging")
        .await
        .unwrap();

    // the second call could not start until the delayed first one finished
    assert!(started.elapsed() >= Duration::from_millis(50));
    first.await.unwrap().unwrap();
}
