//! Type-keyed routine cache.
//!
//! Each type is compiled at most once per cache. Lookups take a read lock; a miss takes the
//! write lock, checks again and compiles while holding it, so concurrent first use of a
//! type stores and hands out a single routine. Failed compilations are not cached.

use crate::{compile, CloneRoutine, FreezeConfig, FreezeResult, Replicate};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type RoutineMap = HashMap<TypeId, Box<dyn Any + Send + Sync>>;

static GLOBAL_CACHE: OnceLock<RoutineCache> = OnceLock::new();

/// Thread-safe cache of clone routines keyed by type.
///
/// Cloning the cache yields another handle to the same storage.
#[derive(Clone, Default)]
pub struct RoutineCache {
    routines: Arc<RwLock<RoutineMap>>,
    config: FreezeConfig,
}

impl RoutineCache {
    /// Create an empty cache with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache that compiles with `config`.
    pub fn with_config(config: FreezeConfig) -> Self {
        Self {
            routines: Arc::default(),
            config,
        }
    }

    /// The process-wide cache used by [`wrap`](crate::wrap) and [`Immutable::new`](crate::Immutable::new).
    pub fn global() -> &'static RoutineCache {
        GLOBAL_CACHE.get_or_init(RoutineCache::new)
    }

    /// The configuration routines are compiled with.
    pub fn config(&self) -> &FreezeConfig {
        &self.config
    }

    /// Get the routine for `T`, compiling it on first use.
    pub fn routine<T: Replicate>(&self) -> FreezeResult<CloneRoutine<T>> {
        if let Some(routine) = Self::lookup::<T>(&self.read()) {
            tracing::trace!(type_name = routine.type_name(), "clone routine cache hit");
            return Ok(routine);
        }

        let mut routines = self.write();
        if let Some(routine) = Self::lookup::<T>(&routines) {
            return Ok(routine);
        }

        let routine = compile::<T>(&self.config).map_err(|e| {
            tracing::warn!(
                error = %e,
                type_name = std::any::type_name::<T>(),
                "clone routine compilation rejected"
            );
            e
        })?;
        routines.insert(TypeId::of::<T>(), Box::new(routine.clone()));
        Ok(routine)
    }

    /// Whether a routine for `T` is cached.
    pub fn contains<T: Replicate>(&self) -> bool {
        self.read().contains_key(&TypeId::of::<T>())
    }

    /// Number of cached routines.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the cache holds no routines.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every cached routine. Routines already handed out keep working.
    pub fn clear(&self) {
        let mut routines = self.write();
        let purged = routines.len();
        routines.clear();
        tracing::debug!(purged, "cleared clone routine cache");
    }

    fn lookup<T: Replicate>(routines: &RoutineMap) -> Option<CloneRoutine<T>> {
        routines
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<CloneRoutine<T>>())
            .cloned()
    }

    fn read(&self) -> RwLockReadGuard<'_, RoutineMap> {
        self.routines.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RoutineMap> {
        self.routines.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RoutineCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutineCache")
            .field("routines", &self.len())
            .field("config", &self.config)
            .finish()
    }
}

/// Get `T`'s routine from the global cache.
pub fn routine<T: Replicate>() -> FreezeResult<CloneRoutine<T>> {
    RoutineCache::global().routine::<T>()
}

/// Purge the global cache.
pub fn clear_routines() {
    RoutineCache::global().clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FreezeError;

    #[test]
    fn test_same_routine_on_repeat_lookup() {
        let cache = RoutineCache::new();
        let first = cache.routine::<[u32; 4]>().unwrap();
        let second = cache.routine::<[u32; 4]>().unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = RoutineCache::new();
        let other = cache.clone();
        let routine = cache.routine::<Box<[i8; 2]>>().unwrap();
        assert!(other.contains::<Box<[i8; 2]>>());
        assert!(other.routine::<Box<[i8; 2]>>().unwrap().ptr_eq(&routine));
    }

    #[test]
    fn test_failures_are_not_cached() {
        let cache = RoutineCache::new();
        let err = cache.routine::<Option<Vec<u8>>>().unwrap_err();
        assert!(matches!(err, FreezeError::ShapeRejected { .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_keeps_handed_out_routines_working() {
        let cache = RoutineCache::new();
        let before = cache.routine::<[String; 1]>().unwrap();
        cache.clear();
        assert!(cache.is_empty());

        assert_eq!(before.apply(&["a".to_string()]), ["a".to_string()]);
        let after = cache.routine::<[String; 1]>().unwrap();
        assert!(!before.ptr_eq(&after));
    }

    #[test]
    fn test_config_applies_to_compilation() {
        let cache = RoutineCache::with_config(FreezeConfig::with_max_depth(1));
        cache.routine::<[u8; 2]>().unwrap();
        let err = cache.routine::<[[u8; 2]; 2]>().unwrap_err();
        assert!(matches!(err, FreezeError::DepthExceeded { depth: 2, .. }));
    }
}
