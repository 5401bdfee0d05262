//! First-run bootstrap: default links and API environments.

use qadeck_core::models::environment::ApiEnvironment;
use qadeck_core::models::link::LinkRecord;
use qadeck_core::{AppError, Database};
use serde::Deserialize;

/// Embedded default link set, loaded once when the store holds no links.
const DEFAULT_LINKS_JSON: &str = include_str!("../assets/default_links.json");

#[derive(Debug, Deserialize)]
struct SeedLink {
    name: String,
    url: String,
    #[serde(default)]
    category: String,
}

fn default_environments() -> Vec<ApiEnvironment> {
    [
        ("Beta1", "https://beta1.example.com/product/findbysku?sku={{sku}}"),
        ("Beta2", "https://beta2.example.com/product/findbysku?sku={{sku}}"),
        ("Preprod", "https://preprod.example.com/product/findbysku?sku={{sku}}"),
    ]
    .into_iter()
    .map(|(name, url)| ApiEnvironment::new(name.to_string(), url.to_string()))
    .collect()
}

/// Seed default links and environments into an empty store.
///
/// A malformed embedded seed file degrades to an empty link list with a
/// warning; it never aborts startup.
///
/// # Errors
/// Returns an error when storage access fails.
pub fn seed_if_empty(db: &Database) -> Result<(), AppError> {
    if db.links.list()?.is_empty() {
        match serde_json::from_str::<Vec<SeedLink>>(DEFAULT_LINKS_JSON) {
            Ok(defaults) => {
                let count = defaults.len();
                for seed in defaults {
                    let link = LinkRecord::new(seed.name, seed.url, seed.category);
                    db.links.create(&link)?;
                }
                tracing::info!("Seeded {} default links", count);
            }
            Err(err) => {
                tracing::warn!("Failed to parse embedded default links: {}", err);
            }
        }
    }

    if db.environments.is_empty()? {
        let defaults = default_environments();
        let count = defaults.len();
        for environment in &defaults {
            db.environments.create(environment)?;
        }
        tracing::info!("Seeded {} default API environments", count);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp_db() -> (Database, TempDir) {
        let temp_dir = TempDir::new().expect("temp dir");
        let db_path = temp_dir.path().join("db");
        let db = Database::new(db_path.to_str().expect("db path")).expect("open db");
        (db, temp_dir)
    }

    #[test]
    fn seeding_populates_empty_store_once() {
        let (db, _temp) = open_temp_db();
        seed_if_empty(&db).expect("seed");

        let links = db.links.list().expect("list");
        assert!(!links.is_empty());
        assert!(links.iter().all(|link| !link.id.is_empty()));
        let environments = db.environments.list().expect("list");
        assert_eq!(environments.len(), 3);

        // Second run must not duplicate anything.
        seed_if_empty(&db).expect("seed again");
        assert_eq!(db.links.list().expect("list").len(), links.len());
        assert_eq!(db.environments.list().expect("list").len(), 3);
    }

    #[test]
    fn seeded_environments_carry_the_sku_placeholder() {
        let (db, _temp) = open_temp_db();
        seed_if_empty(&db).expect("seed");
        for environment in db.environments.list().expect("list") {
            assert!(environment.url.contains("{{sku}}"), "env: {}", environment.name);
        }
    }
}
