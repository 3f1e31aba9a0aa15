//! Lazily-loaded, read-only classifier handle.
//!
//! The artifact is loaded on first use and never again for the lifetime of
//! the handle. A failed load is cached as well: later callers receive the
//! same error instead of retrying.

use std::sync::OnceLock;

use crate::ports::{ClassifierLoader, ModelError};

/// Single-shot cache around a [`ClassifierLoader`].
pub struct LazyClassifier<L>
where
    L: ClassifierLoader,
{
    loader: L,
    cell: OnceLock<Result<L::Classifier, ModelError>>,
}

impl<L> LazyClassifier<L>
where
    L: ClassifierLoader,
{
    /// Wrap a loader. Nothing is loaded until [`LazyClassifier::get`].
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            cell: OnceLock::new(),
        }
    }

    /// Get the classifier, loading it on first access.
    ///
    /// Concurrent first callers block until the single load completes.
    ///
    /// # Errors
    /// Returns the (cached) load error if the artifact could not be loaded.
    pub fn get(&self) -> Result<&L::Classifier, ModelError> {
        self.cell
            .get_or_init(|| {
                tracing::info!("Loading baseline classifier...");
                let loaded = self.loader.load();
                if let Err(e) = &loaded {
                    tracing::error!("Baseline classifier unavailable: {e}");
                }
                loaded
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Whether a load has been attempted and succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureVector;
    use crate::ports::BaselineClassifier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Constant(f64);

    impl BaselineClassifier for Constant {
        fn predict_probability(&self, _: &FeatureVector) -> Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    struct CountingLoader {
        loads: Arc<AtomicUsize>,
        fail: bool,
    }

    impl ClassifierLoader for CountingLoader {
        type Classifier = Constant;

        fn load(&self) -> Result<Constant, ModelError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(20));
            if self.fail {
                Err(ModelError::NotFound("heart_model.json".into()))
            } else {
                Ok(Constant(0.25))
            }
        }
    }

    #[test]
    fn test_loads_once_under_concurrent_first_access() {
        let loads = Arc::new(AtomicUsize::new(0));
        let handle = LazyClassifier::new(CountingLoader {
            loads: loads.clone(),
            fail: false,
        });
        assert!(!handle.is_loaded());

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    let c = handle.get().expect("load succeeds");
                    assert_eq!(c.0, 0.25);
                });
            }
        });

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(handle.is_loaded());
    }

    #[test]
    fn test_load_failure_is_cached() {
        let loads = Arc::new(AtomicUsize::new(0));
        let handle = LazyClassifier::new(CountingLoader {
            loads: loads.clone(),
            fail: true,
        });

        let first = handle.get().err();
        let second = handle.get().err();

        assert_eq!(
            first,
            Some(ModelError::NotFound("heart_model.json".into()))
        );
        assert_eq!(first, second);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(!handle.is_loaded());
    }
}
