//! Text and JSON processing over an engine

use anyhow::Context;
use ghostmask_pii::{RedactionCounts, RedactionEngine, Redactor};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Lines handed to each worker per batch
const LINES_PER_WORKER: usize = 1024;

/// Lines of a reader with terminators stripped
///
/// Unlike [`BufRead::lines`], invalid UTF-8 does not end the stream: offending
/// bytes are replaced with U+FFFD and the line is still yielded.
struct LossyLines<R> {
    input: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.input.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Redact `input` line by line into `output`. Returns the number of lines.
///
/// With more than one thread, lines are read in batches and each batch is
/// split into contiguous chunks redacted on blocking tasks. Output order
/// always matches input order.
pub async fn process_text<R, W>(
    engine: &mut RedactionEngine,
    input: R,
    output: &mut W,
    threads: usize,
) -> anyhow::Result<u64>
where
    R: BufRead,
    W: Write,
{
    if threads <= 1 {
        let mut processed = 0u64;
        for line in LossyLines::new(input) {
            let line = line.context("error reading input")?;
            writeln!(output, "{}", engine.redact(&line))?;
            processed += 1;
        }
        return Ok(processed);
    }

    let redactor = engine.redactor();
    let batch_size = threads * LINES_PER_WORKER;
    let mut lines = LossyLines::new(input);
    let mut processed = 0u64;

    loop {
        let mut batch = Vec::with_capacity(batch_size);
        let mut read_error = None;

        while batch.len() < batch_size {
            match lines.next() {
                Some(Ok(line)) => batch.push(line),
                Some(Err(e)) => {
                    read_error = Some(e);
                    break;
                }
                None => break,
            }
        }

        let exhausted = batch.len() < batch_size;
        if !batch.is_empty() {
            processed += batch.len() as u64;
            for line in redact_batch(engine, &redactor, batch, threads).await? {
                writeln!(output, "{}", line)?;
            }
        }

        if let Some(e) = read_error {
            return Err(e).context("error reading input");
        }
        if exhausted {
            break;
        }
    }

    Ok(processed)
}

async fn redact_batch(
    engine: &mut RedactionEngine,
    redactor: &Arc<Redactor>,
    mut batch: Vec<String>,
    threads: usize,
) -> anyhow::Result<Vec<String>> {
    let chunk_size = batch.len().div_ceil(threads);
    let mut handles = Vec::with_capacity(threads);

    while !batch.is_empty() {
        let rest = batch.split_off(chunk_size.min(batch.len()));
        let chunk = std::mem::replace(&mut batch, rest);
        let redactor = Arc::clone(redactor);

        handles.push(tokio::task::spawn_blocking(move || {
            let mut counts = RedactionCounts::new();
            let redacted: Vec<String> = chunk
                .iter()
                .map(|line| redactor.redact_into(line, &mut counts))
                .collect();
            (redacted, counts)
        }));
    }

    debug!(workers = handles.len(), "Redacting batch");

    let mut output = Vec::new();
    for handle in handles {
        let (redacted, counts) = handle.await.context("redaction worker failed")?;
        engine.absorb(counts);
        output.extend(redacted);
    }

    Ok(output)
}

/// Redact every string value of one JSON document and write it pretty-printed
pub fn process_json<R, W>(engine: &mut RedactionEngine, input: R, output: &mut W) -> anyhow::Result<()>
where
    R: Read,
    W: Write,
{
    // Only the first document is read; anything after it is ignored
    let mut document: Value = serde_json::Deserializer::from_reader(input)
        .into_iter::<Value>()
        .next()
        .context("error parsing JSON input: no document")?
        .context("error parsing JSON input")?;

    engine.redact_value(&mut document);

    serde_json::to_writer_pretty(&mut *output, &document)?;
    writeln!(output)?;
    Ok(())
}

/// Write the count report as pretty JSON to `path`, or to stderr for `-`
pub fn write_report(counts: &BTreeMap<String, u64>, path: &Path) -> anyhow::Result<()> {
    let report = serde_json::to_string_pretty(counts)?;

    if path.as_os_str() == "-" {
        eprintln!("{}", report);
    } else {
        std::fs::write(path, report)?;
    }

    Ok(())
}
