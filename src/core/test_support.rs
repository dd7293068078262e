use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ISOLATED_VARS: [&str; 4] = [
    "MODEL_HEALTH_PROJECT_ROOT",
    "MODEL_HEALTH_CONFIG_DIR",
    "MODEL_HEALTH_ENV_FILE",
    "SIMPLISMART_API_KEY",
];

/// Harness to isolate filesystem and environment side effects per test.
pub(crate) struct TestProject {
    root: TempDir,
    original: Vec<(&'static str, Option<OsString>)>,
}

impl TestProject {
    /// Create a temporary project root with its own config directory and a clean credential.
    pub fn new() -> Self {
        let root = TempDir::new().expect("failed to create temp project root");
        let original = ISOLATED_VARS.iter().map(|key| (*key, env::var_os(key))).collect();
        unsafe {
            // SAFETY: tests touching the environment are serialized.
            env::set_var("MODEL_HEALTH_PROJECT_ROOT", root.path());
            env::set_var("MODEL_HEALTH_CONFIG_DIR", root.path().join("config"));
            env::remove_var("MODEL_HEALTH_ENV_FILE");
            env::remove_var("SIMPLISMART_API_KEY");
        }
        Self { root, original }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root().join("config")
    }

    /// Create a custom `.env` file for tests.
    pub fn write_env_file(&self, contents: &str) {
        fs::write(self.root().join(".env"), contents).expect("failed to write .env file");
    }
}

impl Drop for TestProject {
    fn drop(&mut self) {
        for (key, value) in &self.original {
            match value {
                Some(value) => unsafe {
                    // SAFETY: restoring the original value is serialized at drop time.
                    env::set_var(key, value);
                },
                None => unsafe {
                    // SAFETY: restoring the original value is serialized at drop time.
                    env::remove_var(key);
                },
            }
        }
    }
}
