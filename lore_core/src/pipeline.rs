//! Pipeline - the only part of the crate that touches the filesystem.
//!
//! Loads configuration and records, runs extraction and reasoning, and
//! writes the graph and its statistics.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use lore_schema::{LoreConfig, Record};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LoreError, LoreResult};
use crate::export::{write_graph, OutputFormat};
use crate::extraction::{EntityExtractor, ExtractionReport};
use crate::knowledge_base::KnowledgeGraph;
use crate::reasoner::{Reasoner, ReasoningReport};
use crate::stats::GraphStatistics;

/// Record input: a plain array, or the parsed-pages document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordInput {
    Records(Vec<Record>),
    Pages(PagesDocument),
}

#[derive(Debug, Deserialize)]
struct PagesDocument {
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    infoboxes: Vec<Infobox>,
    #[serde(default)]
    wikilinks: Vec<WikiLink>,
}

#[derive(Debug, Deserialize)]
struct Infobox {
    name: String,
    #[serde(default)]
    params: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct WikiLink {
    target: String,
}

impl RecordInput {
    fn into_records(self) -> Vec<Record> {
        match self {
            RecordInput::Records(records) => records,
            // One record per infobox; pages without infoboxes contribute nothing.
            RecordInput::Pages(document) => document
                .pages
                .into_iter()
                .flat_map(|page| {
                    let links: Vec<String> = page.wikilinks.into_iter().map(|l| l.target).collect();
                    let title = page.title;
                    page.infoboxes.into_iter().map(move |infobox| Record {
                        name: title.clone(),
                        tag: infobox.name,
                        params: infobox.params,
                        links: links.clone(),
                    })
                })
                .collect(),
        }
    }
}

/// Parse records from JSON text in either input form.
pub fn parse_records(json: &str) -> serde_json::Result<Vec<Record>> {
    let input: RecordInput = serde_json::from_str(json)?;
    Ok(input.into_records())
}

/// Read records from a JSON file.
pub fn load_records(path: &Path) -> LoreResult<Vec<Record>> {
    let json = fs::read_to_string(path).map_err(|e| LoreError::io(path, e))?;
    let records = parse_records(&json).map_err(|source| LoreError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

/// Read a TOML configuration file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> LoreResult<LoreConfig> {
    let Some(path) = path else {
        return Ok(LoreConfig::default());
    };
    let source = fs::read_to_string(path).map_err(|e| LoreError::io(path, e))?;
    let config = LoreConfig::from_toml(&source)?;
    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Everything a run produces.
#[derive(Debug)]
pub struct PipelineOutput {
    pub graph: KnowledgeGraph,
    pub extraction: ExtractionReport,
    /// `None` when reasoning was disabled.
    pub reasoning: Option<ReasoningReport>,
    /// Statistics of the extracted graph, before reasoning.
    pub extracted: GraphStatistics,
    /// Statistics of the final graph.
    pub statistics: GraphStatistics,
}

/// The serializable part of a run.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub extraction: &'a ExtractionReport,
    pub reasoning: Option<&'a ReasoningReport>,
    pub extracted: &'a GraphStatistics,
    pub statistics: &'a GraphStatistics,
}

impl PipelineOutput {
    pub fn summary(&self) -> RunSummary<'_> {
        RunSummary {
            extraction: &self.extraction,
            reasoning: self.reasoning.as_ref(),
            extracted: &self.extracted,
            statistics: &self.statistics,
        }
    }

    /// The run summary as pretty-printed JSON.
    pub fn summary_json(&self) -> LoreResult<String> {
        serde_json::to_string_pretty(&self.summary()).map_err(LoreError::Stats)
    }
}

/// Extract every record, then reason over the result unless `reason` is off.
pub fn run(records: &[Record], config: &LoreConfig, reason: bool) -> PipelineOutput {
    let mut graph = KnowledgeGraph::new();

    let mut extractor = EntityExtractor::new(&config.tables);
    extractor.extract_all(records, &mut graph);
    let extraction = extractor.finish(&mut graph);
    let extracted = GraphStatistics::collect(&graph);
    info!(triples = graph.len(), entities = graph.subject_count(), "graph extracted");

    let reasoning = reason.then(|| {
        Reasoner::new(&config.ontology, config.reasoner.clone()).run(&mut graph)
    });
    let statistics = GraphStatistics::collect(&graph);

    PipelineOutput {
        graph,
        extraction,
        reasoning,
        extracted,
        statistics,
    }
}

/// Write the graph to a file, or to stdout when no path is given.
pub fn write_output(graph: &KnowledgeGraph, format: OutputFormat, path: Option<&Path>) -> LoreResult<()> {
    match path {
        Some(path) => {
            let file = fs::File::create(path).map_err(|e| LoreError::io(path, e))?;
            let mut writer = write_graph(graph, format, std::io::BufWriter::new(file))?;
            writer.flush().map_err(|e| LoreError::io(path, e))?;
            info!(path = %path.display(), triples = graph.len(), "graph written");
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = write_graph(graph, format, stdout.lock())?;
            writer.flush().map_err(LoreError::Serialize)?;
        }
    }
    Ok(())
}

/// Write the run summary as JSON.
pub fn write_summary(output: &PipelineOutput, path: &Path) -> LoreResult<()> {
    let json = output.summary_json()?;
    fs::write(path, json).map_err(|e| LoreError::io(path, e))?;
    info!(path = %path.display(), "statistics written");
    Ok(())
}
