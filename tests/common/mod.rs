//! A small fake SDK shared by the integration tests.
//!
//! Each client routes its request methods through a `MethodTable`, the way a
//! real client wrapper would. Unmocked calls fall through to `None`.

#![allow(dead_code)]

use std::sync::Arc;

use client_mock::mock::MethodTable;
use client_mock::request::Request;
use client_mock::service::{Method, MethodInfo, Service, ServiceFactory};
use client_mock::ServiceError;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

impl ClientConfig {
    pub fn region(region: &str) -> Self {
        Self {
            region: Some(region.to_owned()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetSecretValueRequest {
    pub secret_id: String,
}

impl GetSecretValueRequest {
    pub fn new(secret_id: &str) -> Self {
        Self {
            secret_id: secret_id.to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSecretValueResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_string: Option<String>,
}

impl GetSecretValueResponse {
    pub fn with_secret(secret: &str) -> Self {
        Self {
            name: None,
            secret_string: Some(secret.to_owned()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateSecretRequest {
    pub name: String,
    pub secret_string: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSecretResponse {
    pub arn: String,
}

pub struct SecretsManager {
    config: ClientConfig,
    methods: MethodTable,
}

impl SecretsManager {
    pub const GET_SECRET_VALUE: Method<GetSecretValueRequest, GetSecretValueResponse> =
        Method::new("get_secret_value");
    pub const CREATE_SECRET: Method<CreateSecretRequest, CreateSecretResponse> =
        Method::new("create_secret");

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn get_secret_value(
        &self,
        request: GetSecretValueRequest,
    ) -> Option<Request<GetSecretValueResponse>> {
        self.methods.dispatch(&Self::GET_SECRET_VALUE, request)
    }

    pub fn create_secret(
        &self,
        request: CreateSecretRequest,
    ) -> Option<Request<CreateSecretResponse>> {
        self.methods.dispatch(&Self::CREATE_SECRET, request)
    }
}

impl Service for SecretsManager {
    type Config = ClientConfig;
    const NAME: &'static str = "SecretsManager";
    const METHODS: &'static [MethodInfo] =
        &[Self::GET_SECRET_VALUE.info(), Self::CREATE_SECRET.info()];

    fn construct(config: ClientConfig) -> Self {
        Self {
            config,
            methods: MethodTable::new(),
        }
    }

    fn methods(&self) -> &MethodTable {
        &self.methods
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    pub account: String,
    pub arn: String,
}

pub fn identity() -> CallerIdentity {
    CallerIdentity {
        account: "123456789012".to_owned(),
        arn: "arn:aws:iam::123456789012:user/tester".to_owned(),
    }
}

#[derive(Default)]
pub struct Sts {
    methods: MethodTable,
}

impl Sts {
    pub const GET_CALLER_IDENTITY: Method<(), CallerIdentity> =
        Method::new("get_caller_identity");

    pub fn get_caller_identity(&self) -> Option<Request<CallerIdentity>> {
        self.methods.dispatch(&Self::GET_CALLER_IDENTITY, ())
    }
}

impl Service for Sts {
    type Config = ClientConfig;
    const NAME: &'static str = "Sts";
    const METHODS: &'static [MethodInfo] = &[Self::GET_CALLER_IDENTITY.info()];

    fn construct(_config: ClientConfig) -> Self {
        Self::default()
    }

    fn methods(&self) -> &MethodTable {
        &self.methods
    }
}

/// An untyped document client: params and results are plain JSON.
#[derive(Default)]
pub struct DocumentClient {
    methods: MethodTable,
}

impl DocumentClient {
    pub const SCAN: Method<serde_json::Value, serde_json::Value> = Method::new("scan");

    pub fn scan(&self, params: serde_json::Value) -> Option<Request<serde_json::Value>> {
        self.methods.dispatch(&Self::SCAN, params)
    }
}

impl Service for DocumentClient {
    type Config = ClientConfig;
    const NAME: &'static str = "DocumentClient";
    const METHODS: &'static [MethodInfo] = &[Self::SCAN.info()];

    fn construct(_config: ClientConfig) -> Self {
        Self::default()
    }

    fn methods(&self) -> &MethodTable {
        &self.methods
    }
}

/// Code under test: builds its own client and reads one secret.
pub async fn read_secret(
    factory: &dyn ServiceFactory<SecretsManager>,
    region: &str,
    secret_id: &str,
) -> Result<Option<String>, ServiceError> {
    let client = factory.create(ClientConfig::region(region));
    let Some(request) = client.get_secret_value(GetSecretValueRequest::new(secret_id)) else {
        return Err(ServiceError::new("no response"));
    };
    Ok(request.promise().await?.secret_string)
}

/// Code under test: creates a secret unless one already exists.
pub async fn ensure_secret(
    factory: &dyn ServiceFactory<SecretsManager>,
    name: &str,
    value: &str,
) -> Result<String, ServiceError> {
    let client: Arc<SecretsManager> = factory.create_default();
    if let Some(existing) = client.get_secret_value(GetSecretValueRequest::new(name)) {
        if existing.promise().await.is_ok() {
            return Ok(name.to_owned());
        }
    }
    let created = client
        .create_secret(CreateSecretRequest {
            name: name.to_owned(),
            secret_string: value.to_owned(),
        })
        .ok_or_else(|| ServiceError::new("no response"))?
        .promise()
        .await?;
    Ok(created.arn)
}
