//! Example: Testing a secret rotation routine
//!
//! `rotate` reads the current secret, writes a new version and retries once
//! when the write is throttled. The scripted stand-ins below drive it through
//! the happy path and the retry path without a real secrets service.

use std::sync::Arc;

use client_mock::mock::MethodTable;
use client_mock::prelude::*;
use client_mock::service::{DirectFactory, MethodInfo};
use serde::Serialize;

#[derive(Clone, Debug, Default)]
struct VaultConfig {
    region: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
struct SecretVersion {
    version: u32,
    value: String,
}

#[derive(Clone, Debug)]
struct PutSecret {
    name: String,
    value: String,
}

#[derive(Default)]
struct Vault {
    methods: MethodTable,
}

impl Vault {
    const READ: Method<String, SecretVersion> = Method::new("read");
    const WRITE: Method<PutSecret, SecretVersion> = Method::new("write");

    fn read(&self, name: &str) -> Option<Request<SecretVersion>> {
        self.methods.dispatch(&Self::READ, name.to_owned())
    }

    fn write(&self, put: PutSecret) -> Option<Request<SecretVersion>> {
        self.methods.dispatch(&Self::WRITE, put)
    }
}

impl Service for Vault {
    type Config = VaultConfig;
    const NAME: &'static str = "Vault";
    const METHODS: &'static [MethodInfo] = &[Self::READ.info(), Self::WRITE.info()];

    fn construct(_config: VaultConfig) -> Self {
        Self::default()
    }

    fn methods(&self) -> &MethodTable {
        &self.methods
    }
}

/// Rotate `name` and return the new version number.
async fn rotate(factory: &dyn ServiceFactory<Vault>, name: &str) -> Result<u32, ServiceError> {
    let vault = factory.create(VaultConfig {
        region: Some("eu-central-1".to_owned()),
    });
    let current = vault
        .read(name)
        .ok_or_else(|| ServiceError::new("read fell through"))?
        .promise()
        .await?;

    let put = PutSecret {
        name: name.to_owned(),
        value: format!("{}-rotated", current.value),
    };
    for attempt in 1..=2 {
        let written = vault
            .write(put.clone())
            .ok_or_else(|| ServiceError::new("write fell through"))?
            .promise()
            .await;
        match written {
            Ok(version) => return Ok(version.version),
            Err(err) if err.code() == Some("Throttling") && attempt < 2 => {
                println!("   Attempt {attempt}: throttled, retrying");
            }
            Err(err) => return Err(err),
        }
    }
    Err(ServiceError::new("retries exhausted"))
}

#[tokio::main]
async fn main() {
    println!("🔑 client-mock - Secret Rotation Example\n");

    example_happy_path().await;
    example_throttled_write().await;
    example_unmocked_client().await;

    println!("\n✅ All rotation examples completed!");
}

/// Both calls answer on the first try
async fn example_happy_path() {
    println!("📌 Example 1: Happy path");

    let recorder = SnapshotRecorder::new();
    let m = on_with(Target::<Vault>::of_type(), MockOptions::new().sink(recorder.clone()))
        .mock(Vault::READ)
        .resolve(SecretVersion {
            version: 1,
            value: "hunter2".into(),
        })
        .and()
        .mock(Vault::WRITE)
        .resolve(Response::from_fn(|| SecretVersion {
            version: 2,
            value: "hunter2-rotated".into(),
        }));

    let version = rotate(m.and().constructor(), "db-password").await;
    println!("   New version: {version:?}");
    println!("   Write calls: {}", m.call_count());
    println!(
        "   Constructed with: {:?}",
        m.and().constructor().nth_call(0).map(|call| call.args)
    );
    println!("   Snapshots captured: {}", recorder.len());
}

/// The first write is throttled, the retry succeeds
async fn example_throttled_write() {
    println!("\n📌 Example 2: Throttled write");

    let m = on(Target::<Vault>::of_type())
        .mock(Vault::READ)
        .resolve(SecretVersion {
            version: 4,
            value: "s3cr3t".into(),
        })
        .and()
        .mock(Vault::WRITE)
        .resolve(SecretVersion {
            version: 5,
            value: "s3cr3t-rotated".into(),
        })
        .reject_once(ServiceError::new("Rate exceeded").with_code("Throttling"));

    let version = rotate(m.and().constructor(), "api-key").await;
    println!("   New version: {version:?}");
    println!("   Write calls: {}", m.call_count());
    if let Some(call) = m.interceptor().last_call() {
        println!("   Last write: {} = {}", call.args.name, call.args.value);
    }
}

/// Without stand-ins, calls fall through
async fn example_unmocked_client() {
    println!("\n📌 Example 3: Unmocked client");

    let factory = DirectFactory::<Vault>::new();
    let vault: Arc<Vault> = factory.create_default();
    println!("   Mocked methods: {:?}", vault.methods().mocked_methods());

    match rotate(&factory, "db-password").await {
        Ok(version) => println!("   Unexpected version {version}"),
        Err(err) => println!("   Rotation failed: {err}"),
    }
}
