//! Computed field evaluation, sequential or on the context's worker pool.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use parking_lot::Mutex;
use rayon::ThreadPool;
use rayon::prelude::*;

use crate::error::{DocweaveError, Result};
use crate::indexing::builder::IndexDocumentBuilder;
use crate::indexing::computed::ComputedField;

/// Runs the computed field definitions of a context against one item and
/// feeds the results back into its builder.
pub(crate) struct ComputedFieldEvaluator<'b, 'a> {
    builder: &'b IndexDocumentBuilder<'a>,
}

impl<'b, 'a> ComputedFieldEvaluator<'b, 'a> {
    pub(crate) fn new(builder: &'b IndexDocumentBuilder<'a>) -> Self {
        Self { builder }
    }

    pub(crate) fn evaluate(&self) -> Result<()> {
        debug!("Computed field evaluation started for item {}", self.builder.item().unique_id());
        let result = match self.builder.context().pool() {
            Some(pool) if self.builder.context().settings().parallel_computed_fields => {
                self.evaluate_in_parallel(pool)
            }
            _ => self.evaluate_in_sequence(),
        };
        debug!("Computed field evaluation finished for item {}", self.builder.item().unique_id());
        result
    }

    /// Declaration order. The first escalated failure aborts the rest.
    fn evaluate_in_sequence(&self) -> Result<()> {
        let stop_on_error = self.builder.context().settings().stop_on_crawl_field_error;

        for computed in self.builder.context().computed_fields() {
            match computed.compute(self.builder.item()) {
                Ok(value) => self
                    .builder
                    .add_computed_index_field(computed.field_name(), value),
                Err(err) => {
                    self.log_failure(computed.as_ref(), &err);
                    if stop_on_error {
                        return Err(self.failure(computed.as_ref(), err));
                    }
                }
            }
        }

        Ok(())
    }

    /// Unordered. An escalated failure stops workers from picking up new
    /// definitions; definitions already running still complete and keep
    /// their fields. All escalated failures surface as one aggregate.
    fn evaluate_in_parallel(&self, pool: &ThreadPool) -> Result<()> {
        let stop_on_error = self.builder.context().settings().stop_on_crawl_field_error;
        let stop = AtomicBool::new(false);
        let failures = Mutex::new(Vec::new());

        pool.install(|| {
            self.builder
                .context()
                .computed_fields()
                .par_iter()
                .for_each(|computed| {
                    if stop.load(Ordering::Acquire) {
                        return;
                    }

                    match computed.compute(self.builder.item()) {
                        Ok(value) => self
                            .builder
                            .add_computed_index_field(computed.field_name(), value),
                        Err(err) => {
                            self.log_failure(computed.as_ref(), &err);
                            if stop_on_error {
                                failures.lock().push(self.failure(computed.as_ref(), err));
                                stop.store(true, Ordering::Release);
                            }
                        }
                    }
                });
        });

        let failures = failures.into_inner();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(DocweaveError::Aggregate(failures))
        }
    }

    fn log_failure(&self, computed: &dyn ComputedField, err: &anyhow::Error) {
        warn!(
            "Could not compute value for computed field: {} for item: {}: {err:#}",
            computed.field_name(),
            self.builder.item().unique_id()
        );
        debug!("{err:?}");
    }

    fn failure(&self, computed: &dyn ComputedField, err: anyhow::Error) -> DocweaveError {
        DocweaveError::computed_field(
            computed.field_name(),
            self.builder.item().unique_id(),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use anyhow::anyhow;

    use super::*;
    use crate::config::settings::IndexingSettings;
    use crate::document::indexable::{ContentItem, Indexable};
    use crate::document::value::FieldInput;
    use crate::indexing::builder::DocumentBuilder;
    use crate::indexing::computed::FnComputedField;
    use crate::indexing::context::IndexContext;

    fn ok(name: &'static str, value: &'static str) -> FnComputedField<impl Fn(&dyn Indexable) -> anyhow::Result<FieldInput> + Send + Sync> {
        FnComputedField::new(name, move |_: &dyn Indexable| Ok(FieldInput::from(value)))
    }

    fn failing(name: &'static str) -> FnComputedField<impl Fn(&dyn Indexable) -> anyhow::Result<FieldInput> + Send + Sync> {
        FnComputedField::new(name, move |_: &dyn Indexable| Err(anyhow!("{name} exploded")))
    }

    fn settings(parallel: bool, stop: bool) -> IndexingSettings {
        IndexingSettings {
            stop_on_crawl_field_error: stop,
            parallel_computed_fields: parallel,
            max_degree_of_parallelism: Some(4),
            verbose_logging: false,
        }
    }

    #[test]
    fn test_sequential_skips_failure_without_stop() {
        let ctx = IndexContext::builder()
            .computed_field(ok("a", "1"))
            .computed_field(failing("rank"))
            .computed_field(ok("b", "2"))
            .settings(settings(false, false))
            .build()
            .unwrap();
        let item = ContentItem::new("item");
        let builder = IndexDocumentBuilder::new(&item, &ctx);

        builder.add_computed_index_fields().unwrap();

        let names: Vec<_> = builder.collected_fields().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_sequential_stop_aborts_remaining() {
        let evaluated = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evaluated);
        let ctx = IndexContext::builder()
            .computed_field(ok("a", "1"))
            .computed_field(failing("rank"))
            .computed_field(FnComputedField::new("c", move |_: &dyn Indexable| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(FieldInput::from("3"))
            }))
            .settings(settings(false, true))
            .build()
            .unwrap();
        let item = ContentItem::new("item");
        let builder = IndexDocumentBuilder::new(&item, &ctx);

        let err = builder.add_computed_index_fields().unwrap_err();

        assert_eq!(err.computed_field_name(), Some("rank"));
        assert_eq!(evaluated.load(Ordering::SeqCst), 0);
        let names: Vec<_> = builder.collected_fields().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_parallel_without_failures_adds_everything() {
        let mut builder = IndexContext::builder().settings(settings(true, true));
        for i in 0..32 {
            let name = format!("f{i}");
            builder = builder.computed_field(FnComputedField::new(name, move |_: &dyn Indexable| {
                Ok(FieldInput::from(i as i64))
            }));
        }
        let ctx = builder.build().unwrap();
        let item = ContentItem::new("item");
        let doc_builder = IndexDocumentBuilder::new(&item, &ctx);

        doc_builder.add_computed_index_fields().unwrap();

        let mut names: Vec<_> = doc_builder
            .collected_fields()
            .into_iter()
            .map(|f| f.name)
            .collect();
        names.sort();
        let mut expected: Vec<_> = (0..32).map(|i| format!("f{i}")).collect();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_parallel_failure_without_stop_is_swallowed() {
        let ctx = IndexContext::builder()
            .computed_field(ok("a", "1"))
            .computed_field(failing("rank"))
            .computed_field(ok("b", "2"))
            .settings(settings(true, false))
            .build()
            .unwrap();
        let item = ContentItem::new("item");
        let builder = IndexDocumentBuilder::new(&item, &ctx);

        builder.add_computed_index_fields().unwrap();

        assert_eq!(builder.collected_fields().len(), 2);
    }

    #[test]
    fn test_parallel_stop_aggregates_failure() {
        let ctx = IndexContext::builder()
            .computed_field(failing("rank"))
            .settings(settings(true, true))
            .build()
            .unwrap();
        let item = ContentItem::new("item");
        let builder = IndexDocumentBuilder::new(&item, &ctx);

        let err = builder.add_computed_index_fields().unwrap_err();

        assert_eq!(err.inner_errors().len(), 1);
        assert_eq!(err.inner_errors()[0].computed_field_name(), Some("rank"));
    }
}
