use crate::model::task::{Task, done_flag};

/// Minimum number of fields a row needs to become a task
pub const TASK_FIELDS: usize = 3;

/// One delimited record with the 1-based line it started on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    /// At the start of a field, nothing consumed yet
    Start,
    Unquoted,
    Quoted,
    /// Saw a `"` inside a quoted field: either an escape or the closing quote
    QuoteInQuoted,
}

/// Split comma-delimited text into records.
///
/// Follows RFC 4180 quoting: a field starting with `"` runs until the
/// matching unescaped `"`, `""` inside it is a literal quote, and commas and
/// line breaks inside it are data. Records end at LF or CRLF. Blank lines
/// produce no record. Text after a closing quote is kept as data rather
/// than rejected, and an unterminated quote runs to end of input.
pub fn split_records(source: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut state = FieldState::Start;
    let mut line = 1;
    let mut record_line = 1;
    let mut record_started = false;

    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        let in_quotes = state == FieldState::Quoted;
        let is_break = (c == '\n' || c == '\r') && !in_quotes;

        if is_break {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            if record_started {
                fields.push(std::mem::take(&mut field));
                records.push(Record {
                    line: record_line,
                    fields: std::mem::take(&mut fields),
                });
            }
            line += 1;
            record_started = false;
            state = FieldState::Start;
            continue;
        }

        if !record_started {
            record_started = true;
            record_line = line;
        }
        if c == '\n' {
            line += 1;
        }

        state = match (state, c) {
            (FieldState::Start, '"') => FieldState::Quoted,
            (FieldState::Start | FieldState::Unquoted | FieldState::QuoteInQuoted, ',') => {
                fields.push(std::mem::take(&mut field));
                FieldState::Start
            }
            (FieldState::Quoted, '"') => FieldState::QuoteInQuoted,
            (FieldState::QuoteInQuoted, '"') => {
                field.push('"');
                FieldState::Quoted
            }
            (FieldState::Quoted, c) => {
                field.push(c);
                FieldState::Quoted
            }
            (_, c) => {
                field.push(c);
                FieldState::Unquoted
            }
        };
    }

    if record_started {
        fields.push(field);
        records.push(Record {
            line: record_line,
            fields,
        });
    }

    records
}

/// Parse the task file from its source text.
///
/// Returns the tasks in file order together with the line numbers of rows
/// that were dropped for having fewer than three fields. Fields past the
/// third are ignored.
pub fn parse_records(source: &str) -> (Vec<Task>, Vec<usize>) {
    let mut tasks = Vec::new();
    let mut dropped = Vec::new();

    for record in split_records(source) {
        if record.fields.len() < TASK_FIELDS {
            dropped.push(record.line);
            continue;
        }
        let mut fields = record.fields.into_iter();
        let (Some(id), Some(description), Some(done)) = (fields.next(), fields.next(), fields.next())
        else {
            dropped.push(record.line);
            continue;
        };
        tasks.push(Task::new(id, description, done_flag::parse(&done)));
    }

    (tasks, dropped)
}
