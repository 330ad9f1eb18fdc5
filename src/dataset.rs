use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::date::parse_date_token;
use crate::error::{DatasetError, ValidationIssue};
use crate::ir::{Conference, Dataset};

pub const INDEX_FILE: &str = "index.json";
pub const SCHEMA_FILE: &str = "schema.json";

const CONFERENCE_KEYS: [&str; 4] = ["id", "conference", "full_name", "installments"];
const INSTALLMENT_KEYS: [&str; 3] = ["year", "website", "cycles"];
const CYCLE_KEYS: [&str; 2] = ["name", "dates"];
const DATE_KEYS: [&str; 2] = ["date", "description"];
const MIN_YEAR: i64 = 2000;

/// Outcome of validating one dataset source on its own.
#[derive(Debug)]
pub struct SourceReport {
    pub source_name: String,
    pub result: Result<usize, DatasetError>,
}

impl SourceReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Loads a dataset from a JSON file (array or single conference) or from a
/// directory of per-conference files.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let conferences = if path.is_dir() {
        load_directory(path)?
    } else {
        load_file(path)?
    };
    tracing::debug!(
        path = %path.display(),
        conferences = conferences.len(),
        "dataset loaded"
    );
    Ok(Dataset::new(conferences))
}

pub fn load_file(path: &Path) -> Result<Vec<Conference>, DatasetError> {
    let contents = read_source(path)?;
    parse_conferences(&contents, &source_name(path))
}

pub fn load_directory(dir: &Path) -> Result<Vec<Conference>, DatasetError> {
    let mut conferences = Vec::new();
    for path in directory_sources(dir)? {
        conferences.extend(load_file(&path)?);
    }
    Ok(conferences)
}

/// Validates every source independently so one broken file does not hide
/// problems in the others.
pub fn check_sources(path: &Path) -> Result<Vec<SourceReport>, DatasetError> {
    let sources = if path.is_dir() {
        conference_files(path)?
    } else {
        vec![path.to_path_buf()]
    };
    Ok(sources
        .into_iter()
        .map(|source| SourceReport {
            source_name: source_name(&source),
            result: load_file(&source).map(|confs| confs.len()),
        })
        .collect())
}

/// Parses and validates JSON text holding either one conference object or an
/// array of them.
pub fn parse_conferences(input: &str, source_name: &str) -> Result<Vec<Conference>, DatasetError> {
    let value: Value = serde_json::from_str(input).map_err(|source| DatasetError::Json {
        source_name: source_name.to_string(),
        source,
    })?;

    let mut issues = Vec::new();
    let items = match value {
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                validate_conference(item, &format!("[{idx}]"), &mut issues);
            }
            items
        }
        Value::Object(_) => {
            validate_conference(&value, "", &mut issues);
            vec![value]
        }
        _ => {
            push_issue(
                &mut issues,
                "",
                "expected a conference object or an array of conferences",
            );
            Vec::new()
        }
    };
    if !issues.is_empty() {
        return Err(DatasetError::Invalid {
            source_name: source_name.to_string(),
            issues,
        });
    }

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).map_err(|source| DatasetError::Json {
                source_name: source_name.to_string(),
                source,
            })
        })
        .collect()
}

fn read_source(path: &Path) -> Result<String, DatasetError> {
    std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Files to load from a data directory: the order given by `index.json`
/// when present, otherwise every conference file sorted by name.
fn directory_sources(dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    let index_path = dir.join(INDEX_FILE);
    if !index_path.exists() {
        return conference_files(dir);
    }
    let contents = read_source(&index_path)?;
    let ids: Vec<String> = serde_json::from_str(&contents).map_err(|source| DatasetError::Json {
        source_name: INDEX_FILE.to_string(),
        source,
    })?;
    ids.into_iter()
        .map(|id| {
            let path = dir.join(format!("{id}.json"));
            if path.is_file() {
                Ok(path)
            } else {
                Err(DatasetError::MissingIndexEntry { id, path })
            }
        })
        .collect()
}

fn conference_files(dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DatasetError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DatasetError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_json = path.extension().and_then(|ext| ext.to_str()) == Some("json");
        if !is_json || !path.is_file() {
            continue;
        }
        let name = source_name(&path);
        if name == INDEX_FILE || name == SCHEMA_FILE {
            continue;
        }
        files.push(path);
    }
    files.sort();
    if files.is_empty() {
        tracing::warn!(dir = %dir.display(), "no conference JSON files found");
    }
    Ok(files)
}

fn push_issue(issues: &mut Vec<ValidationIssue>, path: &str, message: impl Into<String>) {
    issues.push(ValidationIssue {
        path: path.to_string(),
        message: message.into(),
    });
}

fn field_path(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{base}.{key}")
    }
}

fn as_object<'a>(
    value: &'a Value,
    path: &str,
    what: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'a Map<String, Value>> {
    let obj = value.as_object();
    if obj.is_none() {
        push_issue(issues, path, format!("expected {what} object"));
    }
    obj
}

fn reject_unknown_keys(
    obj: &Map<String, Value>,
    allowed: &[&str],
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    for key in obj.keys() {
        if !allowed.contains(&key.as_str()) {
            push_issue(issues, &field_path(path, key), "unknown field");
        }
    }
}

fn require_string(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    allow_empty: bool,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    let path = field_path(path, key);
    match obj.get(key) {
        None => {
            push_issue(issues, &path, "missing required field");
            None
        }
        Some(Value::String(text)) => {
            if !allow_empty && text.trim().is_empty() {
                push_issue(issues, &path, "must not be empty");
            }
            Some(text.clone())
        }
        Some(_) => {
            push_issue(issues, &path, "expected a string");
            None
        }
    }
}

/// Optional array field; absence means "no children".
fn optional_array<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> &'a [Value] {
    match obj.get(key) {
        None => &[],
        Some(Value::Array(items)) => items,
        Some(_) => {
            push_issue(issues, &field_path(path, key), "expected an array");
            &[]
        }
    }
}

fn validate_conference(value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = as_object(value, path, "a conference", issues) else {
        return;
    };
    reject_unknown_keys(obj, &CONFERENCE_KEYS, path, issues);
    require_string(obj, "id", path, false, issues);
    require_string(obj, "conference", path, false, issues);
    require_string(obj, "full_name", path, false, issues);
    let installments_path = field_path(path, "installments");
    for (idx, item) in optional_array(obj, "installments", path, issues).iter().enumerate() {
        validate_installment(item, &format!("{installments_path}[{idx}]"), issues);
    }
}

fn validate_installment(value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = as_object(value, path, "an installment", issues) else {
        return;
    };
    reject_unknown_keys(obj, &INSTALLMENT_KEYS, path, issues);

    let year_path = field_path(path, "year");
    match obj.get("year") {
        None => push_issue(issues, &year_path, "missing required field"),
        Some(year) => match year.as_i64() {
            Some(year) if year < MIN_YEAR => {
                push_issue(issues, &year_path, format!("must be >= {MIN_YEAR}"))
            }
            Some(year) if i32::try_from(year).is_err() => {
                push_issue(issues, &year_path, "out of range")
            }
            Some(_) => {}
            None => push_issue(issues, &year_path, "expected an integer"),
        },
    }

    match obj.get("website") {
        None | Some(Value::Null) => {}
        Some(Value::String(url)) if is_web_uri(url) => {}
        Some(Value::String(_)) => push_issue(
            issues,
            &field_path(path, "website"),
            "expected an http(s) URI",
        ),
        Some(_) => push_issue(issues, &field_path(path, "website"), "expected a string"),
    }

    let cycles_path = field_path(path, "cycles");
    for (idx, item) in optional_array(obj, "cycles", path, issues).iter().enumerate() {
        validate_cycle(item, &format!("{cycles_path}[{idx}]"), issues);
    }
}

fn validate_cycle(value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = as_object(value, path, "a cycle", issues) else {
        return;
    };
    reject_unknown_keys(obj, &CYCLE_KEYS, path, issues);
    require_string(obj, "name", path, true, issues);
    let dates_path = field_path(path, "dates");
    for (idx, item) in optional_array(obj, "dates", path, issues).iter().enumerate() {
        validate_event_date(item, &format!("{dates_path}[{idx}]"), issues);
    }
}

fn validate_event_date(value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = as_object(value, path, "a date", issues) else {
        return;
    };
    reject_unknown_keys(obj, &DATE_KEYS, path, issues);
    if let Some(token) = require_string(obj, "date", path, true, issues) {
        if let Err(err) = parse_date_token(&token) {
            push_issue(issues, &field_path(path, "date"), err.to_string());
        }
    }
    require_string(obj, "description", path, true, issues);
}

fn is_web_uri(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or("");
            !host.is_empty() && !url.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
