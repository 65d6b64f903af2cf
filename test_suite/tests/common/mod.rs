use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    routing::get,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use crudquery::{ApiError, ListParams, ListResource, Page, QueryParameters, list_handler};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr, Set};
use sea_orm_migration::prelude::*;
use serde::Deserialize;
use tower::ServiceExt;
use utoipa::OpenApi;
use uuid::Uuid;


use worker_entity::{CurrentWorker, Worker};

// Helper function to get database URL from environment or default to SQLite
fn get_test_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string())
}

// Cleanup function for persistent databases
async fn cleanup_test_tables(db: &DatabaseConnection) {
    let _ = db.execute_unprepared("DROP TABLE IF EXISTS workers").await;
    let _ = db
        .execute_unprepared("DROP TABLE IF EXISTS seaql_migrations")
        .await;
}

#[allow(dead_code)]
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let database_url = get_test_database_url();
    let db = Database::connect(&database_url).await?;

    // For persistent databases, clean up any existing tables
    if !database_url.starts_with("sqlite::memory:") {
        cleanup_test_tables(&db).await;
    }

    Migrator::up(&db, None).await?;
    Ok(db)
}

#[allow(dead_code)]
pub fn setup_test_app(db: &DatabaseConnection) -> Router {
    let api = Router::new()
        .route("/workers", get(list_workers))
        .route("/current-workers", get(list_handler::<CurrentWorker>))
        .route("/openapi.json", get(|| async { Json(api_doc()) }))
        .with_state(db.clone());

    Router::new().nest("/api/v1", api)
}

#[utoipa::path(
    get,
    path = "/workers",
    params(ListParams),
    responses(
        (status = 200, description = "One page of workers"),
        (status = 400, description = "A filter value does not fit its field")
    )
)]
async fn list_workers(
    state: State<DatabaseConnection>,
    params: QueryParameters,
) -> Result<(HeaderMap, Json<Page<Worker>>), ApiError> {
    list_handler::<Worker>(state, params).await
}

#[derive(OpenApi)]
#[openapi(paths(list_workers))]
struct ApiDoc;

/// OpenAPI document with the worker field lists filled in.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if let Some(operation) = doc
        .paths
        .paths
        .get_mut("/workers")
        .and_then(|item| item.get.as_mut())
    {
        operation.description = Some(Worker::query_description());
    }
    doc
}

/// Install a test-writer tracing subscriber once; later calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Deterministic creation time: minute `n` after 2024-01-01T00:00:00Z.
#[allow(dead_code)]
pub fn minute(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(n)
}

/// Row description for [`insert_worker`]; defaults describe an active
/// permanent worker created at minute 0.
#[derive(Clone, Debug)]
pub struct WorkerSeed {
    pub name: String,
    pub status: &'static str,
    pub worker_type: &'static str,
    pub amount: i64,
    pub manager_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[allow(dead_code)]
impl WorkerSeed {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "active",
            worker_type: "permanent",
            amount: 0,
            manager_id: None,
            created_at: minute(0),
            deleted_at: None,
        }
    }

    pub fn status(mut self, status: &'static str) -> Self {
        self.status = status;
        self
    }

    pub fn worker_type(mut self, worker_type: &'static str) -> Self {
        self.worker_type = worker_type;
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn manager(mut self, manager_id: Uuid) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn deleted_at(mut self, deleted_at: DateTime<Utc>) -> Self {
        self.deleted_at = Some(deleted_at);
        self
    }
}

#[allow(dead_code)]
pub async fn insert_worker(
    db: &DatabaseConnection,
    seed: WorkerSeed,
) -> Result<worker_entity::Model, DbErr> {
    worker_entity::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(seed.name),
        status: Set(seed.status.to_string()),
        worker_type: Set(seed.worker_type.to_string()),
        amount: Set(seed.amount),
        manager_id: Set(seed.manager_id),
        created_at: Set(seed.created_at),
        deleted_at: Set(seed.deleted_at),
    }
    .insert(db)
    .await
}

#[allow(dead_code)]
pub async fn insert_workers(
    db: &DatabaseConnection,
    seeds: impl IntoIterator<Item = WorkerSeed>,
) -> Result<Vec<worker_entity::Model>, DbErr> {
    let mut models = Vec::new();
    for seed in seeds {
        models.push(insert_worker(db, seed).await?);
    }
    Ok(models)
}

/// The page envelope as a client sees it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct PageBody<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

#[allow(dead_code)]
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap();
    (status, headers, json)
}

/// GET a list endpoint that must succeed and decode its page.
#[allow(dead_code)]
pub async fn get_page(app: &Router, uri: &str) -> PageBody<Worker> {
    let (status, _, json) = get_json(app, uri).await;
    assert_eq!(status, StatusCode::OK, "GET {uri} failed: {json}");
    serde_json::from_value(json).unwrap()
}

#[allow(dead_code)]
pub fn names(page: &PageBody<Worker>) -> Vec<&str> {
    page.items.iter().map(|w| w.name.as_str()).collect()
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateWorkerTable)]
    }
}

pub struct CreateWorkerTable;

#[async_trait::async_trait]
impl MigrationName for CreateWorkerTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_worker_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateWorkerTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(WorkerTable)
            .if_not_exists()
            .col(
                ColumnDef::new(WorkerColumn::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(WorkerColumn::Name).text().not_null())
            .col(ColumnDef::new(WorkerColumn::Status).text().not_null())
            .col(ColumnDef::new(WorkerColumn::WorkerType).text().not_null())
            .col(
                ColumnDef::new(WorkerColumn::Amount)
                    .big_integer()
                    .not_null()
                    .default(0),
            )
            .col(ColumnDef::new(WorkerColumn::ManagerId).uuid().null())
            .col(
                ColumnDef::new(WorkerColumn::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(WorkerColumn::DeletedAt)
                    .timestamp_with_time_zone()
                    .null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkerTable).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum WorkerColumn {
    Id,
    Name,
    Status,
    WorkerType,
    Amount,
    ManagerId,
    CreatedAt,
    DeletedAt,
}

impl Iden for WorkerColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
                Self::Status => "status",
                Self::WorkerType => "worker_type",
                Self::Amount => "amount",
                Self::ManagerId => "manager_id",
                Self::CreatedAt => "created_at",
                Self::DeletedAt => "deleted_at",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct WorkerTable;

impl Iden for WorkerTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "workers").unwrap();
    }
}
