use std::{
    collections::HashSet,
    io::Read,
    path::Path,
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{models::Record, search::normalize};

/// Max length of a derived id.
const SLUG_MAX_LEN: usize = 80;
const SLUG_FALLBACK: &str = "test";

// Known dataset headers. Matched case-insensitively.
const COL_ID: &str = "id";
const COL_NAME: &str = "Test Name";
const COL_SYNONYMS: &str = "Synonyms";
const COL_PURPOSE: &str = "Clinical purpose";
const COL_BIOMARKER: &str = "biomarker or parameter";
const COL_RANGE: &str = "All possible Range / Values";
const COL_INTERPRETATION: &str = "Meaning Result Interpretation";
const COL_NOTES: &str = "General Notes";

lazy_static! {
    static ref RE_NON_SLUG: Regex = Regex::new(r"[^a-z0-9]+").expect("invalid slug regex");
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Validation(String),
    #[error("no test records found. Ensure the CSV has a header row and at least one row with a Test Name")]
    Empty,
}

/// Column positions resolved from the header row.
#[derive(Debug, Default)]
struct Columns {
    id: Option<usize>,
    name: usize,
    synonyms: Option<usize>,
    purpose: Option<usize>,
    biomarker: Option<usize>,
    range: Option<usize>,
    interpretation: Option<usize>,
    notes: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, ImportError> {
        let cleaned: Vec<String> = headers.iter().map(|h| normalize(&clean_header(h))).collect();
        let find = |name: &str| {
            let name = normalize(name);
            cleaned.iter().position(|h| *h == name)
        };

        let name = find(COL_NAME).ok_or_else(|| {
            ImportError::Validation(format!("line 1: missing '{}' column", COL_NAME))
        })?;

        Ok(Self {
            id: find(COL_ID),
            name,
            synonyms: find(COL_SYNONYMS),
            purpose: find(COL_PURPOSE),
            biomarker: find(COL_BIOMARKER),
            range: find(COL_RANGE),
            interpretation: find(COL_INTERPRETATION),
            notes: find(COL_NOTES),
        })
    }
}

/// Load test records from a CSV file.
pub fn import_csv(file_path: &Path) -> Result<Vec<Record>, ImportError> {
    log::info!("importing data from {} ...", file_path.display());

    let file = std::fs::File::open(file_path)?;
    let records = read_records(file)?;

    log::info!("finished. loaded {} tests", records.len());
    Ok(records)
}

/// Parse test records from CSV data. The first row is the header.
pub fn read_records<R: Read>(mut rdr: R) -> Result<Vec<Record>, ImportError> {
    let mut text = String::new();
    rdr.read_to_string(&mut text)?;
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let cols = Columns::from_headers(reader.headers()?)?;

    let mut out: Vec<Record> = Vec::new();
    let mut ids: HashSet<String> = HashSet::new();
    let mut skipped = 0;

    for (n, result) in reader.records().enumerate() {
        let row = result?;
        let get = |i: Option<usize>| i.and_then(|i| row.get(i)).map(str::trim).unwrap_or("");

        let name = get(Some(cols.name));
        if name.is_empty() {
            // Header is line 1.
            log::debug!("line {}: skipping row without a test name", n + 2);
            skipped += 1;
            continue;
        }

        let id = match get(cols.id) {
            "" => slugify(name),
            id => id.to_string(),
        };
        let id = unique_id(id, &mut ids);

        out.push(Record {
            id,
            name: name.to_string(),
            synonyms: get(cols.synonyms).to_string(),
            purpose: optional(get(cols.purpose)),
            biomarker: optional(get(cols.biomarker)),
            range: optional(get(cols.range)),
            interpretation: optional(get(cols.interpretation)),
            notes: optional(get(cols.notes)),
        });
    }

    if skipped > 0 {
        log::warn!("skipped {} rows without a test name", skipped);
    }

    if out.is_empty() {
        return Err(ImportError::Empty);
    }

    Ok(out)
}

/// Derive a URL-safe id from a display name.
pub fn slugify(s: &str) -> String {
    let slug = RE_NON_SLUG.replace_all(&normalize(s), "-").to_string();
    let slug: String = slug.trim_matches('-').chars().take(SLUG_MAX_LEN).collect();

    if slug.is_empty() {
        SLUG_FALLBACK.to_string()
    } else {
        slug
    }
}

/// Return `id`, or `id-N` with the lowest free N >= 2 if it's taken.
fn unique_id(id: String, seen: &mut HashSet<String>) -> String {
    if seen.insert(id.clone()) {
        return id;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", id, n);
        if seen.insert(candidate.clone()) {
            log::warn!("duplicate id '{}', using '{}'", id, candidate);
            return candidate;
        }
        n += 1;
    }
}

fn clean_header(h: &str) -> String {
    h.trim_start_matches('\u{FEFF}').trim().to_string()
}

fn optional(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
