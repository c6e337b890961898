//! Training corpora as JSON Lines: one `{"text": ..., "label": [[s, e, "LABEL"], ...]}`
//! object per line.

use std::fs;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

use super::annotation::{AnnotationOutcome, Annotator, SkipReason};
use crate::document::ContractDocument;
use crate::types::{AlignmentCounters, Label, RecognizedEntity, Span, TrainingRecord};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Malformed record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Output file already exists: {0}")]
    OutputExists(PathBuf),
}

/// Written as one line per record. Returns the number of lines written.
pub fn write_training_records<'a, W, I>(writer: W, records: I) -> Result<usize, CorpusError>
where
    W: Write,
    I: IntoIterator<Item = &'a TrainingRecord>,
{
    let mut sink = LineSink::new(writer);
    for record in records {
        sink.write(record)?;
    }
    sink.finish().map(|(written, _)| written)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedCorpus {
    pub records: Vec<TrainingRecord>,
    pub alignment: AlignmentCounters,
}

#[derive(Deserialize)]
struct RawRecord {
    text: String,
    #[serde(default)]
    label: Vec<(usize, usize, Label)>,
}

/// Reads records back, dropping spans that are empty, fall outside their
/// text, or overlap an earlier span of the same record. Blank lines are
/// ignored; a line that is not a record at all is an error.
pub fn read_training_records<R: BufRead>(reader: R) -> Result<LoadedCorpus, CorpusError> {
    let mut corpus = LoadedCorpus::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let raw: RawRecord = serde_json::from_str(&line).map_err(|source| CorpusError::Parse {
            line: index + 1,
            source,
        })?;

        let mut empty = 0;
        let spans: Vec<Span> = raw
            .label
            .into_iter()
            .filter_map(|(start, end, label)| match Span::unbounded(start, end, label) {
                Ok(span) => Some(span),
                Err(_) => {
                    empty += 1;
                    None
                }
            })
            .collect();

        let (record, mut counters) = TrainingRecord::aligned(raw.text, spans);
        counters.empty = empty;
        if counters.dropped() > 0 {
            debug!(
                line = index + 1,
                empty = counters.empty,
                out_of_bounds = counters.out_of_bounds,
                overlapping = counters.overlapping,
                "dropped misaligned spans"
            );
        }

        corpus.alignment.add(counters);
        corpus.records.push(record);
    }

    Ok(corpus)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusSummary {
    pub documents: usize,
    pub written: usize,
    pub skipped_illegible: usize,
    pub skipped_empty: usize,
    /// `sha256:<hex>` of the bytes written.
    pub corpus_version: String,
}

/// Annotate each document and stream the labelled ones to `writer`.
pub fn annotate_corpus<'d, W, I>(
    annotator: &Annotator<'_>,
    documents: I,
    writer: W,
) -> Result<CorpusSummary, CorpusError>
where
    W: Write,
    I: IntoIterator<Item = (&'d ContractDocument, &'d [RecognizedEntity])>,
{
    let mut summary = CorpusSummary::default();
    let mut sink = LineSink::new(writer);

    for (document, recognized) in documents {
        summary.documents += 1;
        match annotator.annotate(document, recognized).outcome {
            AnnotationOutcome::Labelled(record) => sink.write(&record)?,
            AnnotationOutcome::Skipped(SkipReason::Illegible { .. }) => {
                summary.skipped_illegible += 1
            }
            AnnotationOutcome::Skipped(SkipReason::NoSpans) => summary.skipped_empty += 1,
        }
    }

    let (written, corpus_version) = sink.finish()?;
    summary.written = written;
    summary.corpus_version = corpus_version;

    info!(
        documents = summary.documents,
        written = summary.written,
        skipped_illegible = summary.skipped_illegible,
        skipped_empty = summary.skipped_empty,
        corpus_version = %summary.corpus_version,
        "annotated corpus"
    );

    Ok(summary)
}

/// Like [`annotate_corpus`], into a new file at `path`. The corpus is written to
/// a sibling temp file and renamed into place, so `path` never holds a partial
/// corpus.
pub fn write_corpus_file<'d, I>(
    annotator: &Annotator<'_>,
    documents: I,
    path: &Path,
) -> Result<CorpusSummary, CorpusError>
where
    I: IntoIterator<Item = (&'d ContractDocument, &'d [RecognizedEntity])>,
{
    if path.exists() {
        return Err(CorpusError::OutputExists(path.to_path_buf()));
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let result = fs::File::create(&temp_path)
        .map_err(CorpusError::from)
        .and_then(|file| annotate_corpus(annotator, documents, BufWriter::new(file)));

    match result {
        Ok(summary) => {
            fs::rename(&temp_path, path)?;
            Ok(summary)
        }
        Err(err) => {
            let _ = fs::remove_file(&temp_path);
            Err(err)
        }
    }
}

/// JSON Lines writer that hashes what it writes.
struct LineSink<W: Write> {
    writer: W,
    hasher: Sha256,
    lines: usize,
}

impl<W: Write> LineSink<W> {
    fn new(writer: W) -> Self {
        Self {
            writer,
            hasher: Sha256::new(),
            lines: 0,
        }
    }

    fn write(&mut self, record: &TrainingRecord) -> Result<(), CorpusError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        self.writer.write_all(&line)?;
        self.hasher.update(&line);
        self.lines += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<(usize, String), CorpusError> {
        self.writer.flush()?;
        let version = format!("sha256:{}", hex::encode(self.hasher.finalize()));
        Ok((self.lines, version))
    }
}
