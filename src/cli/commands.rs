//! Command implementations for the Docweave CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::index_config::IndexConfig;
use crate::document::indexable::{ContentItem, Indexable};
use crate::error::{DocweaveError, Result};
use crate::indexing::context::IndexContext;
use crate::indexing::crawler::DocumentCrawler;

/// Execute a CLI command.
pub fn execute_command(args: DocweaveArgs) -> Result<()> {
    match &args.command {
        Command::Build(build_args) => build(build_args, &args),
        Command::CheckConfig(check_args) => check_config(check_args, &args),
    }
}

/// Build documents and fail when any item failed.
fn build(args: &BuildArgs, cli_args: &DocweaveArgs) -> Result<()> {
    let summary = build_documents(args)?;

    if args.output.is_some() {
        output_result("Build completed", &summary, cli_args)?;
    }

    if summary.failed_items.is_empty() {
        Ok(())
    } else {
        Err(DocweaveError::other(format!(
            "{} item(s) failed",
            summary.failed_items.len()
        )))
    }
}

/// Build one document per item line and write them as JSON lines.
pub fn build_documents(args: &BuildArgs) -> Result<BuildSummary> {
    let start = Instant::now();

    let mut config = IndexConfig::from_file(&args.config)?;
    if let Some(parallel) = args.parallel {
        config.settings.parallel_computed_fields = parallel;
    }
    if let Some(stop) = args.stop_on_error {
        config.settings.stop_on_crawl_field_error = stop;
    }
    config.validate()?;

    let crawler = DocumentCrawler::new(Arc::new(IndexContext::from_config(&config)?));
    let (items, mut failed_items) = load_items(&args.items)?;
    let items_read = items.len() + failed_items.len();

    let report = crawler.crawl(items.iter().map(|item| item as &dyn Indexable));
    for (id, err) in &report.failures {
        eprintln!("Error building document for item {id}: {err}");
        failed_items.push(id.clone());
    }

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    for document in &report.documents {
        serde_json::to_writer(&mut writer, document)?;
        writeln!(writer)?;
    }
    writer.flush()?;

    let summary = BuildSummary {
        items_read,
        documents_built: report.documents.len(),
        fields_emitted: report.documents.iter().map(|d| d.len()).sum(),
        failed_items,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Built {} document(s) from {} item(s) in {} ms",
        summary.documents_built, summary.items_read, summary.duration_ms
    );
    Ok(summary)
}

/// Read items from a JSON lines file. Lines that fail to parse are reported
/// and returned as `line N` entries.
pub fn load_items<P: AsRef<Path>>(path: P) -> Result<(Vec<ContentItem>, Vec<String>)> {
    let reader = BufReader::new(File::open(path)?);
    let mut items = Vec::new();
    let mut failed = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ContentItem>(&line) {
            Ok(item) => items.push(item),
            Err(e) => {
                eprintln!("Error parsing item on line {}: {}", line_num + 1, e);
                failed.push(format!("line {}", line_num + 1));
            }
        }
    }

    Ok((items, failed))
}

/// Load a configuration, build its context and summarize it.
fn check_config(args: &CheckConfigArgs, cli_args: &DocweaveArgs) -> Result<()> {
    let config = IndexConfig::from_file(&args.config)?;
    let context = IndexContext::from_config(&config)?;

    let summary = ConfigSummary {
        configured_fields: config.field_map.field_count(),
        configured_types: config.field_map.type_count(),
        computed_fields: context
            .computed_fields()
            .iter()
            .map(|c| c.field_name().to_string())
            .collect(),
        parallel_computed_fields: config.settings.parallel_computed_fields,
        degree_of_parallelism: config.settings.degree_of_parallelism(),
        stop_on_crawl_field_error: config.settings.stop_on_crawl_field_error,
    };

    output_result("Configuration is valid", &summary, cli_args)
}
