//! Embedded PostgreSQL databases for the Diesel adapter suites.
//!
//! Every test gets its own database. Migrated databases are cloned from a
//! template keyed by a hash of `migrations/`, so the schema is applied once
//! per cluster rather than once per test.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use diesel::sql_types::{Numeric, Text, Uuid as SqlUuid};
use diesel::{Connection, PgConnection, RunQueryDsl};
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use rust_decimal::Decimal;
use salad_backend::domain::{SaladId, UserId};
use salad_backend::outbound::persistence::run_migrations;
use salad_backend::test_support::hash_password;
use uuid::Uuid;

use super::cluster_skip::handle_cluster_setup_failure;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_PREFIX: &str = "salad_template";
const PROVISION_RETRIES: usize = 3;
const PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

fn template_name() -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let short = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_PREFIX}_{short}"))
}

fn new_database_name() -> String {
    format!("salad_test_{}", Uuid::new_v4().simple())
}

/// Create the migrated template unless an earlier test already did.
fn ensure_template(cluster: &ClusterHandle) -> Result<String, String> {
    let name = template_name()?;
    let _guard = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        run_migrations(&cluster.connection().database_url(&name))
            .map_err(|err| format!("migrate template: {err}"))?;
    }
    Ok(name)
}

fn clone_database(
    template: impl Fn(&ClusterHandle) -> Result<String, String>,
) -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| err.to_string())?;
    let mut last_error = String::new();
    for attempt in 1..=PROVISION_RETRIES {
        let cloned = template(cluster).and_then(|template| {
            cluster
                .temporary_database_from_template(new_database_name().as_str(), template.as_str())
                .map_err(|err| format!("clone {template}: {err:?}"))
        });
        match cloned {
            Ok(database) => return Ok(database),
            Err(err) => last_error = format!("attempt {attempt}/{PROVISION_RETRIES}: {err}"),
        }
        if attempt < PROVISION_RETRIES {
            std::thread::sleep(PROVISION_RETRY_DELAY);
        }
    }
    Err(last_error)
}

/// A fresh database with every migration applied.
///
/// Returns `None` only when the cluster cannot start and `SKIP_TEST_CLUSTER`
/// is set; otherwise setup failures panic.
pub fn migrated_database() -> Option<TemporaryDatabase> {
    clone_database(ensure_template).map_or_else(handle_cluster_setup_failure, Some)
}

/// A fresh database with no migrations applied.
pub fn blank_database() -> Option<TemporaryDatabase> {
    clone_database(|_| Ok("template1".to_owned())).map_or_else(handle_cluster_setup_failure, Some)
}

fn connect(url: &str) -> PgConnection {
    PgConnection::establish(url).expect("connect to test database")
}

/// Insert a customer with a unique, mixed-case email and return its id.
pub fn insert_user(url: &str, password: &str) -> (UserId, String) {
    let id = UserId::random();
    let email = format!("Customer.{}@Example.com", id.as_uuid().simple());
    diesel::sql_query(
        "INSERT INTO users (id, email, password_hash, name, points, salad_streak) \
         VALUES ($1, $2, $3, 'Test Customer', 15, 1)",
    )
    .bind::<SqlUuid, _>(*id.as_uuid())
    .bind::<Text, _>(&email)
    .bind::<Text, _>(hash_password(password).to_string())
    .execute(&mut connect(url))
    .expect("insert user");
    (id, email)
}

/// Insert a salad and return its id.
pub fn insert_salad(url: &str, name: &str, price: Decimal) -> SaladId {
    let id = SaladId::random();
    diesel::sql_query(
        "INSERT INTO salads (id, name, price, ingredients) VALUES ($1, $2, $3, '[\"lettuce\"]')",
    )
    .bind::<SqlUuid, _>(*id.as_uuid())
    .bind::<Text, _>(name)
    .bind::<Numeric, _>(price)
    .execute(&mut connect(url))
    .expect("insert salad");
    id
}
