//! Multiplier factory and registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::multiplier::{
    ClassicMultiplier, ParallelStrassenMultiplier, SquareMultiplier, StrassenMultiplier,
};
use crate::options::Options;

/// Error returned for unknown strategy names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm: {0} (expected one of: classic, strassen, parallel)")]
pub struct UnknownAlgorithm(pub String);

/// Factory trait for creating multipliers.
pub trait MultiplierFactory: Send + Sync {
    /// Get or create a multiplier by name.
    fn get(&self, name: &str) -> Result<Arc<dyn SquareMultiplier>, UnknownAlgorithm>;

    /// List all available multiplier names.
    fn available(&self) -> Vec<&str>;
}

/// Default factory with lazy creation and cache, configured by [`Options`].
pub struct DefaultFactory {
    opts: Options,
    cache: RwLock<HashMap<String, Arc<dyn SquareMultiplier>>>,
}

impl DefaultFactory {
    /// Create a factory whose Strassen strategies use `opts`.
    #[must_use]
    pub fn new(opts: Options) -> Self {
        Self {
            opts: opts.normalize(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Options used for Strassen strategies.
    #[must_use]
    pub fn options(&self) -> Options {
        self.opts
    }

    fn create(&self, name: &str) -> Result<Arc<dyn SquareMultiplier>, UnknownAlgorithm> {
        match name {
            "classic" => Ok(Arc::new(ClassicMultiplier::new())),
            "strassen" => Ok(Arc::new(StrassenMultiplier::new(self.opts.cutoff))),
            "parallel" | "strassen-parallel" => Ok(Arc::new(ParallelStrassenMultiplier::new(
                self.opts.cutoff,
                self.opts.parallel_grain,
            ))),
            _ => Err(UnknownAlgorithm(name.to_string())),
        }
    }
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl MultiplierFactory for DefaultFactory {
    fn get(&self, name: &str) -> Result<Arc<dyn SquareMultiplier>, UnknownAlgorithm> {
        let key = name.trim().to_ascii_lowercase();
        if let Some(m) = self.cache.read().get(&key) {
            return Ok(Arc::clone(m));
        }

        let m = self.create(&key)?;
        self.cache.write().insert(key, Arc::clone(&m));
        Ok(m)
    }

    fn available(&self) -> Vec<&str> {
        vec!["classic", "strassen", "parallel"]
    }
}

/// Resolve a comma-separated selection such as `"classic,strassen"`.
///
/// `"all"` selects every available multiplier. Duplicates are kept once, in
/// first-seen order.
pub fn select_multipliers(
    selection: &str,
    factory: &dyn MultiplierFactory,
) -> Result<Vec<Arc<dyn SquareMultiplier>>, UnknownAlgorithm> {
    let names: Vec<String> = if selection.trim().eq_ignore_ascii_case("all") {
        factory.available().into_iter().map(str::to_string).collect()
    } else {
        selection
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    };
    if names.is_empty() {
        return Err(UnknownAlgorithm(selection.to_string()));
    }

    let mut selected: Vec<Arc<dyn SquareMultiplier>> = Vec::new();
    for name in names {
        let m = factory.get(&name)?;
        if !selected.iter().any(|s| s.name() == m.name()) {
            selected.push(m);
        }
    }
    Ok(selected)
}
