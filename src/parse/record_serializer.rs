use crate::model::task::Task;

/// Record terminator written after every row
pub const LINE_TERMINATOR: &str = "\r\n";

/// Quote a field only when it holds a delimiter, a quote or a line break.
pub fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Serialize tasks as one `id,description,done` record each, in order.
pub fn serialize_records(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&quote_field(&task.id));
        out.push(',');
        out.push_str(&quote_field(&task.description));
        out.push(',');
        out.push_str(task.done_str());
        out.push_str(LINE_TERMINATOR);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::record_parser::parse_records;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_fields_are_not_quoted() {
        let tasks = vec![
            Task::new("1".into(), "Buy milk".into(), false),
            Task::new("2".into(), "Call Bob".into(), true),
        ];
        assert_eq!(
            serialize_records(&tasks),
            "1,Buy milk,false\r\n2,Call Bob,true\r\n"
        );
    }

    #[test]
    fn special_fields_are_quoted() {
        assert_eq!(quote_field("milk, eggs"), "\"milk, eggs\"");
        assert_eq!(quote_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quote_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(quote_field("plain"), "plain");
    }

    #[test]
    fn empty_collection_is_empty_text() {
        assert_eq!(serialize_records(&[]), "");
    }

    #[test]
    fn awkward_descriptions_survive_a_round_trip() {
        let tasks = vec![
            Task::new("1".into(), "milk, eggs, \"fresh\" bread".into(), false),
            Task::new("2".into(), "line one\r\nline two".into(), true),
            Task::new("3".into(), "  padded  ".into(), false),
            Task::new("4".into(), "".into(), true),
        ];
        let (parsed, dropped) = parse_records(&serialize_records(&tasks));
        assert!(dropped.is_empty());
        assert_eq!(parsed, tasks);
    }
}
