//! Drives the document builder over items.

use std::sync::Arc;

use log::{debug, warn};

use crate::document::document::IndexDocument;
use crate::document::indexable::Indexable;
use crate::error::{DocweaveError, Result};
use crate::indexing::builder::{DocumentBuilder, IndexDocumentBuilder};
use crate::indexing::context::IndexContext;

/// Feed one item through a builder: declared fields in order, computed
/// fields once, then the item boost.
pub fn populate<B: DocumentBuilder + ?Sized>(builder: &mut B, item: &dyn Indexable) -> Result<()> {
    for field in item.data_fields() {
        builder.add_data_field(field);
    }
    builder.add_computed_index_fields()?;
    builder.add_boost();
    Ok(())
}

/// Outcome of crawling a batch of items.
#[derive(Debug, Default)]
pub struct CrawlReport {
    /// Documents built successfully, in input order.
    pub documents: Vec<IndexDocument>,

    /// Items that failed, with the error that failed them.
    pub failures: Vec<(String, DocweaveError)>,
}

impl CrawlReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds documents with a shared [`IndexContext`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use docweave::document::indexable::{ContentItem, DataField};
/// use docweave::indexing::computed::FieldNamesField;
/// use docweave::indexing::context::IndexContext;
/// use docweave::indexing::crawler::DocumentCrawler;
///
/// let context = IndexContext::builder()
///     .computed_field(FieldNamesField::new("_fields"))
///     .build()
///     .unwrap();
/// let crawler = DocumentCrawler::new(Arc::new(context));
///
/// let item = ContentItem::new("home").with_field(DataField::new("Title", "text", "Hello"));
/// let document = crawler.build_document(&item).unwrap();
/// assert_eq!(document.values_of("_fields"), vec!["Title"]);
/// ```
#[derive(Debug, Clone)]
pub struct DocumentCrawler {
    context: Arc<IndexContext>,
}

impl DocumentCrawler {
    pub fn new(context: Arc<IndexContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &IndexContext {
        &self.context
    }

    /// Build the document for one item.
    pub fn build_document(&self, item: &dyn Indexable) -> Result<IndexDocument> {
        let mut builder = IndexDocumentBuilder::new(item, &self.context);
        populate(&mut builder, item)?;
        let document = builder.into_document();
        debug!(
            "Built document for item {} with {} field(s)",
            document.id,
            document.len()
        );
        Ok(document)
    }

    /// Build documents for many items. A failing item is recorded and the
    /// remaining items are still processed.
    pub fn crawl<'i, I>(&self, items: I) -> CrawlReport
    where
        I: IntoIterator<Item = &'i dyn Indexable>,
    {
        let mut report = CrawlReport::default();
        for item in items {
            match self.build_document(item) {
                Ok(document) => report.documents.push(document),
                Err(err) => {
                    warn!("Failed to build document for item {}: {err}", item.unique_id());
                    report.failures.push((item.unique_id().to_string(), err));
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::IndexingSettings;
    use crate::document::indexable::{ContentItem, DataField};
    use crate::indexing::computed::CopyField;

    #[test]
    fn test_crawl_records_failures_and_continues() {
        let context = IndexContext::builder()
            .computed_field(CopyField::new("headline", "Title").required(true))
            .settings(IndexingSettings {
                stop_on_crawl_field_error: true,
                ..Default::default()
            })
            .build()
            .unwrap();
        let crawler = DocumentCrawler::new(Arc::new(context));

        let good = ContentItem::new("good").with_field(DataField::new("Title", "memo", "Hi"));
        let bad = ContentItem::new("bad");
        let items: Vec<&dyn Indexable> = vec![&good, &bad];

        let report = crawler.crawl(items);

        assert!(!report.is_success());
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.documents[0].values_of("headline"), vec!["Hi"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "bad");
    }
}
