use crate::problem::{Guest, NamedProblem, Problem, TimeValue};
use log::debug;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, derive_more::Display)]
pub enum ParseError {
    #[display(fmt = "{}", _0)]
    Io(std::io::Error),
    #[display(fmt = "{}", _0)]
    Json(serde_json::Error),
    #[display(fmt = "line {}: unrecognized record `{}`", line, record)]
    Syntax { line: usize, record: String },
    #[display(fmt = "line {}: expected field `{}`", line, field)]
    MissingField { line: usize, field: &'static str },
    #[display(fmt = "line {}: `{}` is not a number", line, value)]
    InvalidNumber { line: usize, value: String },
    #[display(fmt = "no Target record")]
    MissingTarget,
    #[display(fmt = "line {}: Target given twice", line)]
    DuplicateTarget { line: usize },
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            ParseError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e)
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::Json(e)
    }
}

pub fn read_file(path: &Path) -> Result<NamedProblem, ParseError> {
    let _p = hprof::enter("read_file");
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());
    let contents = std::fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", contents.len(), path.display());

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json(&name, &contents),
        _ => parse_txt(&name, &contents),
    }
}

#[derive(Deserialize)]
struct JsonInstance {
    times: Vec<(TimeValue, TimeValue)>,
    #[serde(rename = "targetFriend", alias = "target_friend")]
    target_friend: usize,
}

pub fn parse_json(name: &str, json: &str) -> Result<NamedProblem, ParseError> {
    let instance: JsonInstance = serde_json::from_str(json)?;
    Ok(NamedProblem {
        name: name.to_string(),
        problem: Problem::from_times(&instance.times),
        target: instance.target_friend,
    })
}

/// Reads the line-based format:
///
/// ```text
/// Target=1
/// Guest Arrival=1 Departure=4
/// Guest Arrival=2 Departure=3
/// ```
///
/// Guests are numbered in the order they appear.
pub fn parse_txt(name: &str, txt: &str) -> Result<NamedProblem, ParseError> {
    let mut problem = Problem::default();
    let mut target = None;

    for (line_idx, line) in txt.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_ascii_whitespace();
        let record = fields.next().unwrap_or_default();
        let syntax = || ParseError::Syntax {
            line: line_no,
            record: line.to_string(),
        };

        if record == "Guest" {
            let arrival = get_number(&mut fields, "Arrival", line_no)?;
            let departure = get_number(&mut fields, "Departure", line_no)?;
            if fields.next().is_some() {
                return Err(syntax());
            }
            problem.guests.push(Guest { arrival, departure });
        } else if let Some(("Target", value)) = record.split_once('=') {
            if fields.next().is_some() {
                return Err(syntax());
            }
            if target.is_some() {
                return Err(ParseError::DuplicateTarget { line: line_no });
            }
            target = Some(parse_number::<usize>(value, line_no)?);
        } else {
            return Err(syntax());
        }
    }

    Ok(NamedProblem {
        name: name.to_string(),
        problem,
        target: target.ok_or(ParseError::MissingTarget)?,
    })
}

fn get_number<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    field: &'static str,
    line: usize,
) -> Result<TimeValue, ParseError> {
    let missing = ParseError::MissingField { line, field };
    let (key, value) = fields
        .next()
        .and_then(|pair| pair.split_once('='))
        .ok_or(missing)?;
    if key != field {
        return Err(ParseError::MissingField { line, field });
    }
    parse_number(value, line)
}

fn parse_number<T: std::str::FromStr>(value: &str, line: usize) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}
