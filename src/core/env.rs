use crate::core::paths;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};

pub const API_KEY_VAR: &str = "SIMPLISMART_API_KEY";

static ENV_LOADED: AtomicBool = AtomicBool::new(false);

fn load_env_once() {
    if ENV_LOADED.load(Ordering::SeqCst) {
        return;
    }

    if ENV_LOADED.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_err() {
        return;
    }

    if let Ok(path) = env::var("MODEL_HEALTH_ENV_FILE") {
        let _ = dotenvy::from_filename(path);
        return;
    }

    if let Ok(root) = paths::project_root() {
        let candidate = root.join(".env");
        if candidate.exists() {
            let _ = dotenvy::from_path(&candidate);
        }
    }
}

#[cfg(test)]
pub(crate) fn reset_cache_for_tests() {
    ENV_LOADED.store(false, Ordering::SeqCst);
}

/// Raw credential as found in the environment. Emptiness is judged by the run context.
pub fn api_key() -> Option<String> {
    load_env_once();
    env::var(API_KEY_VAR).ok()
}
