//! One simulation outcome and the fixed twelve-line text schema it is read from.

use thiserror::Error;

/// Numeric type a schema line is converted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
}

/// One line of the result schema.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub percent: bool,
}

impl FieldSpec {
    const fn int(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Int,
            percent: false,
        }
    }

    const fn float(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Float,
            percent: false,
        }
    }

    const fn percent(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Float,
            percent: true,
        }
    }
}

/// Line order written by the simulator's analysis report.
pub const SCHEMA: [FieldSpec; 12] = [
    FieldSpec::int("coins", "Number of coins"),
    FieldSpec::int("fractals", "Number of fractal rings"),
    FieldSpec::int("run_coins", "Number of run coins"),
    FieldSpec::float(
        "submit_fractal",
        "Average number of submitted fractal rings per trader",
    ),
    FieldSpec::percent(
        "accept_fractal",
        "Average fractal ring acceptance rate per trader",
    ),
    FieldSpec::int(
        "invalid_accept_fractal",
        "Number of invalid accepted fractal rings",
    ),
    FieldSpec::int(
        "valid_reject_fractal",
        "Number of valid rejected fractal rings",
    ),
    FieldSpec::percent("coin_satisfaction", "Average satisfaction per coin"),
    FieldSpec::percent("trader_satisfaction", "Average satisfaction per trader"),
    FieldSpec::float("average_adjacency", "Average adjacency per trader"),
    FieldSpec::int("max_adjacency", "Maximum adjacency per trader"),
    FieldSpec::int("max_cooperation", "Maximum cooperation ring count"),
];

const SEPARATOR: &str = ": ";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResultRecord {
    pub coins: i64,
    pub fractals: i64,
    pub run_coins: i64,
    pub submit_fractal: f64,
    /// Percent, sign already stripped.
    pub accept_fractal: f64,
    pub invalid_accept_fractal: i64,
    pub valid_reject_fractal: i64,
    pub coin_satisfaction: f64,
    pub trader_satisfaction: f64,
    pub average_adjacency: f64,
    pub max_adjacency: i64,
    pub max_cooperation: i64,
}

/// Why a result file was dropped. Every variant names the file; line-level
/// variants carry the index and name of the failing schema field.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{file}: failed to read: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{file}: expected 12 lines, found {found}")]
    LineCount { file: String, found: usize },
    #[error("{file}: field {field} ({name}): missing \": \" separator in {line:?}")]
    MissingSeparator {
        file: String,
        field: usize,
        name: &'static str,
        line: String,
    },
    #[error("{file}: field {field} ({name}): expected label {expected:?}, found {found:?}")]
    LabelMismatch {
        file: String,
        field: usize,
        name: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("{file}: field {field} ({name}): missing trailing %")]
    MissingPercent {
        file: String,
        field: usize,
        name: &'static str,
    },
    #[error("{file}: field {field} ({name}): unexpected %")]
    UnexpectedPercent {
        file: String,
        field: usize,
        name: &'static str,
    },
    #[error("{file}: field {field} ({name}): invalid number {value:?}")]
    InvalidNumber {
        file: String,
        field: usize,
        name: &'static str,
        value: String,
    },
}

impl ParseError {
    pub fn file(&self) -> &str {
        match self {
            Self::Io { file, .. }
            | Self::LineCount { file, .. }
            | Self::MissingSeparator { file, .. }
            | Self::LabelMismatch { file, .. }
            | Self::MissingPercent { file, .. }
            | Self::UnexpectedPercent { file, .. }
            | Self::InvalidNumber { file, .. } => file,
        }
    }

    /// Schema index of the failing line, when the failure is line-level.
    pub fn field(&self) -> Option<usize> {
        match self {
            Self::MissingSeparator { field, .. }
            | Self::LabelMismatch { field, .. }
            | Self::MissingPercent { field, .. }
            | Self::UnexpectedPercent { field, .. }
            | Self::InvalidNumber { field, .. } => Some(*field),
            Self::Io { .. } | Self::LineCount { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    fn as_i64(self) -> i64 {
        match self {
            Value::Int(v) => v,
            Value::Float(v) => v as i64,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Value::Int(v) => v as f64,
            Value::Float(v) => v,
        }
    }
}

impl ResultRecord {
    /// Parse the text of one result file. `file` is only used for diagnostics.
    pub fn parse(file: &str, text: &str, strict_labels: bool) -> Result<Self, ParseError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() != SCHEMA.len() {
            return Err(ParseError::LineCount {
                file: file.to_string(),
                found: lines.len(),
            });
        }

        let mut values = [Value::Int(0); SCHEMA.len()];
        for (field, (spec, line)) in SCHEMA.iter().zip(&lines).enumerate() {
            values[field] = parse_line(file, field, spec, line, strict_labels)?;
        }

        Ok(Self {
            coins: values[0].as_i64(),
            fractals: values[1].as_i64(),
            run_coins: values[2].as_i64(),
            submit_fractal: values[3].as_f64(),
            accept_fractal: values[4].as_f64(),
            invalid_accept_fractal: values[5].as_i64(),
            valid_reject_fractal: values[6].as_i64(),
            coin_satisfaction: values[7].as_f64(),
            trader_satisfaction: values[8].as_f64(),
            average_adjacency: values[9].as_f64(),
            max_adjacency: values[10].as_i64(),
            max_cooperation: values[11].as_i64(),
        })
    }
}

fn parse_line(
    file: &str,
    field: usize,
    spec: &FieldSpec,
    line: &str,
    strict_labels: bool,
) -> Result<Value, ParseError> {
    let mut parts = line.split(SEPARATOR);
    let label = parts.next().unwrap_or_default();
    let raw = parts.next().ok_or_else(|| ParseError::MissingSeparator {
        file: file.to_string(),
        field,
        name: spec.name,
        line: line.to_string(),
    })?;

    if strict_labels && label.trim() != spec.label {
        return Err(ParseError::LabelMismatch {
            file: file.to_string(),
            field,
            name: spec.name,
            expected: spec.label,
            found: label.trim().to_string(),
        });
    }

    let raw = raw.trim();
    let number = match raw.strip_suffix('%') {
        Some(stripped) if spec.percent && !stripped.contains('%') => stripped.trim(),
        None if spec.percent => {
            return Err(ParseError::MissingPercent {
                file: file.to_string(),
                field,
                name: spec.name,
            });
        }
        None if !raw.contains('%') => raw,
        _ => {
            return Err(ParseError::UnexpectedPercent {
                file: file.to_string(),
                field,
                name: spec.name,
            });
        }
    };

    let invalid = || ParseError::InvalidNumber {
        file: file.to_string(),
        field,
        name: spec.name,
        value: number.to_string(),
    };
    match spec.kind {
        FieldKind::Int => number.parse::<i64>().map(Value::Int).map_err(|_| invalid()),
        FieldKind::Float => number.parse::<f64>().map(Value::Float).map_err(|_| invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Number of coins: 100
Number of fractal rings: 50
Number of run coins: 80
Average number of submitted fractal rings per trader: 2.50
Average fractal ring acceptance rate per trader: 91.25%
Number of invalid accepted fractal rings: 5
Number of valid rejected fractal rings: 3
Average satisfaction per coin: 72.10%
Average satisfaction per trader: -4.00%
Average adjacency per trader: 12.75
Maximum adjacency per trader: 40
Maximum cooperation ring count: 7
";

    #[test]
    fn parses_every_field_in_order() {
        let record = ResultRecord::parse("0-0.result", SAMPLE, true).expect("parse");
        assert_eq!(record.coins, 100);
        assert_eq!(record.fractals, 50);
        assert_eq!(record.run_coins, 80);
        assert_eq!(record.submit_fractal, 2.5);
        assert_eq!(record.accept_fractal, 91.25);
        assert_eq!(record.invalid_accept_fractal, 5);
        assert_eq!(record.valid_reject_fractal, 3);
        assert_eq!(record.coin_satisfaction, 72.1);
        assert_eq!(record.trader_satisfaction, -4.0);
        assert_eq!(record.average_adjacency, 12.75);
        assert_eq!(record.max_adjacency, 40);
        assert_eq!(record.max_cooperation, 7);
    }

    #[test]
    fn trailing_blank_lines_are_tolerated() {
        let text = format!("{SAMPLE}\n\n");
        assert!(ResultRecord::parse("a.result", &text, false).is_ok());
    }

    #[test]
    fn missing_line_is_a_line_count_error() {
        let text: String = SAMPLE.lines().take(11).map(|l| format!("{l}\n")).collect();
        let err = ResultRecord::parse("a.result", &text, false).unwrap_err();
        assert!(matches!(err, ParseError::LineCount { found: 11, .. }));
        assert_eq!(err.file(), "a.result");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn extra_line_is_a_line_count_error() {
        let text = format!("{SAMPLE}Extra: 1\n");
        let err = ResultRecord::parse("a.result", &text, false).unwrap_err();
        assert!(matches!(err, ParseError::LineCount { found: 13, .. }));
    }

    #[test]
    fn non_numeric_value_reports_field_index() {
        let text = SAMPLE.replace("Number of run coins: 80", "Number of run coins: many");
        let err = ResultRecord::parse("b.result", &text, false).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: 2, .. }));
        assert_eq!(err.field(), Some(2));
    }

    #[test]
    fn int_field_rejects_decimal() {
        let text = SAMPLE.replace("Maximum adjacency per trader: 40", "Maximum adjacency per trader: 40.0");
        let err = ResultRecord::parse("b.result", &text, false).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: 10, .. }));
    }

    #[test]
    fn percent_sign_is_checked_both_ways() {
        let missing = SAMPLE.replace("72.10%", "72.10");
        let err = ResultRecord::parse("c.result", &missing, false).unwrap_err();
        assert!(matches!(err, ParseError::MissingPercent { field: 7, .. }));

        let extra = SAMPLE.replace("12.75", "12.75%");
        let err = ResultRecord::parse("c.result", &extra, false).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedPercent { field: 9, .. }));
    }

    #[test]
    fn missing_separator_is_reported() {
        let text = SAMPLE.replace("Number of coins: 100", "Number of coins 100");
        let err = ResultRecord::parse("d.result", &text, false).unwrap_err();
        assert!(matches!(err, ParseError::MissingSeparator { field: 0, .. }));
    }

    #[test]
    fn labels_are_only_checked_when_strict() {
        let text = SAMPLE.replace("Number of coins", "Coins");
        assert!(ResultRecord::parse("e.result", &text, false).is_ok());
        let err = ResultRecord::parse("e.result", &text, true).unwrap_err();
        assert!(matches!(err, ParseError::LabelMismatch { field: 0, .. }));
    }

    #[test]
    fn nan_is_a_valid_float() {
        let text = SAMPLE.replace("91.25%", "NaN%");
        let record = ResultRecord::parse("f.result", &text, false).expect("parse");
        assert!(record.accept_fractal.is_nan());
    }
}
