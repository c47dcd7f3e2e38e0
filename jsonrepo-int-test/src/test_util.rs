use fake::faker::address::en::CityName;
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use jsonrepo::collection::Document;
use jsonrepo::doc;
use jsonrepo::errors::{ErrorKind, RepoError, RepoResult};
use jsonrepo::repository::Repository;
use jsonrepo::repository_builder::RepositoryBuilder;
use std::backtrace::Backtrace;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::time::Instant;
use std::{env, fs};

/// Runs a test between a setup and a teardown step.
///
/// The teardown runs whether the test fails or not; a panic anywhere is
/// reported with the elapsed time and re-raised.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> RepoResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> RepoResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> RepoResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    let start_time = Instant::now();

    let result = std::panic::catch_unwind(|| {
        let backtrace = Backtrace::capture();
        match before() {
            Ok(ctx) => match std::panic::catch_unwind(AssertUnwindSafe(|| test(ctx.clone()))) {
                Ok(Ok(_)) => after(ctx)
                    .map_err(|e| (format!("After run failed: {:?}", e), backtrace.to_string())),
                Ok(Err(e)) => {
                    let _ = after(ctx);
                    Err((format!("Test failed: {:?}", e), backtrace.to_string()))
                }
                Err(panic) => {
                    let _ = after(ctx);
                    std::panic::resume_unwind(panic)
                }
            },
            Err(e) => Err((format!("Before run failed: {:?}", e), backtrace.to_string())),
        }
    });

    let elapsed = start_time.elapsed();
    match result {
        Ok(Ok(_)) => {}
        Ok(Err((e, bt))) => {
            eprintln!("\n==================== TEST FAILED ====================");
            eprintln!("Failed after {:?}", elapsed);
            eprintln!("Error: {}", e);
            if !bt.is_empty() && !bt.contains("disabled") {
                eprintln!("\nBacktrace:\n{}", bt);
            }
            eprintln!("=====================================================\n");
            panic!("Test failed: {}", e);
        }
        Err(panic) => {
            eprintln!("\n========== Test Panicked (took {:?}) ==========", elapsed);
            std::panic::resume_unwind(panic);
        }
    }
}

#[derive(Clone)]
pub struct TestContext {
    path: PathBuf,
    repository: Repository,
}

impl TestContext {
    pub fn new(path: PathBuf, repository: Repository) -> Self {
        Self { path, repository }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository(&self) -> Repository {
        self.repository.clone()
    }

    /// Path of an entity file below the context directory.
    pub fn entity_file(&self, entity: &str) -> PathBuf {
        self.path.join(format!("{}.json", entity))
    }

    /// Reads an entity file the way another process would.
    pub fn read_entity_file(&self, entity: &str) -> RepoResult<Vec<Document>> {
        let content = fs::read_to_string(self.entity_file(entity))?;
        Ok(serde_json::from_str(&content)?)
    }
}

pub fn random_path() -> PathBuf {
    let id = uuid::Uuid::new_v4();
    env::temp_dir().join(format!("jsonrepo-test-{}", id))
}

/// A file backed repository with the default settings in a fresh directory.
pub fn create_test_context() -> RepoResult<TestContext> {
    create_test_context_with(|builder| builder)
}

/// A file backed repository in a fresh directory, further configured by
/// `configure`.
pub fn create_test_context_with<F>(configure: F) -> RepoResult<TestContext>
where
    F: FnOnce(RepositoryBuilder) -> RepositoryBuilder,
{
    let path = random_path();
    if path.exists() {
        return Err(RepoError::new(
            &format!("Test directory {} already exists", path.display()),
            ErrorKind::InternalError,
        ));
    }

    let repository = configure(Repository::builder().base_path(&path)).open()?;
    Ok(TestContext::new(path, repository))
}

/// A file backed repository that keeps backups and writes compact JSON.
pub fn create_backup_test_context() -> RepoResult<TestContext> {
    create_test_context_with(|builder| builder.backup(true).pretty_print(false))
}

/// A repository that fails on entities it has not created.
pub fn create_strict_test_context() -> RepoResult<TestContext> {
    create_test_context_with(|builder| builder.auto_create_entity(false))
}

/// An in-memory repository; the path is never created.
pub fn create_memory_test_context() -> RepoResult<TestContext> {
    let repository = Repository::builder().in_memory().open()?;
    Ok(TestContext::new(random_path(), repository))
}

pub fn cleanup(ctx: TestContext) -> RepoResult<()> {
    match fs::remove_dir_all(ctx.path()) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            // leftovers in the temp dir are harmless
            eprintln!(
                "Warning: Failed to remove test directory {}: {:?}",
                ctx.path().display(),
                e
            );
            Ok(())
        }
    }
}

/// Three people with known ids, ages and cities.
pub fn create_test_docs() -> Vec<Document> {
    vec![
        doc! {
            "_id": "p1",
            name: "Anna",
            age: 30,
            city: "Rome",
            email: "anna@example.com",
            address: { street: "Via Roma 1", zip: "00100" },
            tags: ["admin", "user"]
        },
        doc! {
            "_id": "p2",
            name: "Bob",
            age: 20,
            city: "Turin",
            tags: ["user"]
        },
        doc! {
            "_id": "p3",
            name: "Carla",
            age: 45,
            city: "Rome",
            email: (jsonrepo::common::Value::Null),
            address: { street: "Corso Italia 9", zip: "00198" }
        },
    ]
}

/// Random people without ids.
pub fn create_fake_docs(count: usize) -> Vec<Document> {
    (0..count)
        .map(|_| {
            doc! {
                first_name: (FirstName().fake::<String>()),
                last_name: (LastName().fake::<String>()),
                email: (FreeEmail().fake::<String>()),
                age: ((18..90).fake::<i64>()),
                address: { city: (CityName().fake::<String>()) }
            }
        })
        .collect()
}

pub fn ids(documents: &[Document]) -> Vec<String> {
    documents
        .iter()
        .filter_map(|document| document.id().map(str::to_string))
        .collect()
}
