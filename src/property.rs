use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;

use crate::engine::Engine;
use crate::limits::*;
use crate::model::Day;
use crate::seed;

/// Reserved property name served from the built-in demo data set.
pub const DEMO_PROPERTY: &str = "demo";

/// Manages per-property engines. Each property gets one immutable engine,
/// built lazily on first use from its seed source.
///
/// Seed resolution order: cached engine → `<data_dir>/<name>.json` →
/// built-in demo data (for the reserved name) → empty engine. Unknown
/// properties resolve to empty catalogs rather than errors, matching the
/// engine's empty-means-empty behavior.
pub struct PropertyManager {
    engines: DashMap<String, Arc<Engine>>,
    data_dir: PathBuf,
    /// Explicit "today" for seed data placed relative to the current date.
    today: Day,
}

impl PropertyManager {
    pub fn new(data_dir: PathBuf, today: Day) -> Self {
        Self {
            engines: DashMap::new(),
            data_dir,
            today,
        }
    }

    /// Get or lazily create the engine for the given property.
    pub fn get_or_create(&self, property: &str) -> io::Result<Arc<Engine>> {
        if let Some(engine) = self.engines.get(property) {
            return Ok(engine.value().clone());
        }
        if property.len() > MAX_PROPERTY_NAME_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "property name too long",
            ));
        }
        if self.engines.len() >= MAX_PROPERTIES {
            return Err(io::Error::other("too many properties"));
        }

        // Sanitize the name to prevent path traversal.
        let safe_name: String = property
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        if safe_name.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty property name",
            ));
        }

        let seed_path = self.data_dir.join(format!("{safe_name}.json"));
        let engine = if seed_path.is_file() {
            let seed = seed::load_file(&seed_path).map_err(io::Error::other)?;
            Arc::new(Engine::new(seed))
        } else if safe_name == DEMO_PROPERTY {
            Arc::new(Engine::new(seed::demo(self.today)))
        } else {
            tracing::info!(property = %safe_name, "no seed source, serving empty engine");
            Arc::new(Engine::empty())
        };

        self.engines.insert(property.to_string(), engine.clone());
        metrics::gauge!(crate::observability::PROPERTIES_ACTIVE).set(self.engines.len() as f64);
        Ok(engine)
    }
}
