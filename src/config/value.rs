use super::tree::Config;
use super::tree::OneOf;
use anyhow::bail;
use std::collections::BTreeMap;

/// one node of the configuration tree. scalars keep their dynamic
/// type: strict updates may change an Int to another Int but never to
/// a Float or a Str.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Dict(BTreeMap<String, Value>),
    Tree(Config),
    Choice(OneOf),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Tree(_) => "config",
            Value::Choice(_) => "one-of",
        }
    }

    /// parse a literal scalar or collection. lists may be written with
    /// [] or (); dicts with {"key": value}.
    pub fn parse_literal(text: &str) -> anyhow::Result<Self> {
        let text = text.trim();
        if text == "true" {
            return Ok(Value::Bool(true));
        }
        if text == "false" {
            return Ok(Value::Bool(false));
        }
        if let Some(inner) = strip_delimiters(text, '"', '"').or(strip_delimiters(text, '\'', '\'')) {
            return Ok(Value::Str(inner.to_string()));
        }
        if let Some(inner) = strip_delimiters(text, '[', ']').or(strip_delimiters(text, '(', ')')) {
            return split_top(inner, ',')
                .into_iter()
                .filter(|piece| !piece.trim().is_empty())
                .map(Value::parse_literal)
                .collect::<anyhow::Result<Vec<Value>>>()
                .map(Value::List);
        }
        if let Some(inner) = strip_delimiters(text, '{', '}') {
            let mut entries = BTreeMap::new();
            for piece in split_top(inner, ',') {
                if piece.trim().is_empty() {
                    continue;
                }
                let colon = split_top(piece, ':');
                if colon.len() != 2 {
                    bail!("expected \"key\": value, got \"{}\"", piece);
                }
                let key = match Value::parse_literal(colon[0])? {
                    Value::Str(key) => key,
                    other => bail!("dict keys must be strings, got {}", other.kind()),
                };
                entries.insert(key, Value::parse_literal(colon[1])?);
            }
            return Ok(Value::Dict(entries));
        }
        if let Ok(int) = text.parse::<i64>() {
            return Ok(Value::Int(int));
        }
        if let Ok(float) = text.parse::<f64>() {
            return Ok(Value::Float(float));
        }
        bail!("unparseable literal \"{}\"", text)
    }
}

fn strip_delimiters(text: &str, open: char, close: char) -> Option<&str> {
    if text.len() >= 2 && text.starts_with(open) && text.ends_with(close) {
        Some(&text[open.len_utf8()..text.len() - close.len_utf8()])
    } else {
        None
    }
}

/// split on a separator, ignoring separators nested inside balanced
/// (), [] or {} groups.
pub fn split_top(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            c if c == separator && depth == 0 => {
                pieces.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalars() {
        assert_eq!(Value::Bool(true), Value::parse_literal("true").unwrap());
        assert_eq!(Value::Int(-42), Value::parse_literal("-42").unwrap());
        assert_eq!(Value::Float(3e-5), Value::parse_literal("3e-5").unwrap());
        assert_eq!(
            Value::Str("hello world".to_string()),
            Value::parse_literal("\"hello world\"").unwrap()
        );
    }

    #[test]
    fn parses_collections() {
        assert_eq!(
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
            Value::parse_literal("[1, 2, 3]").unwrap()
        );
        assert_eq!(
            Value::List(vec![Value::Int(10), Value::Int(20)]),
            Value::parse_literal("(10, 20)").unwrap()
        );
        let dict = Value::parse_literal("{\"a\": 1, \"b\": [2, 3]}").unwrap();
        let Value::Dict(entries) = dict else {
            panic!("expected dict")
        };
        assert_eq!(Some(&Value::Int(1)), entries.get("a"));
        assert_eq!(
            Some(&Value::List(vec![Value::Int(2), Value::Int(3)])),
            entries.get("b")
        );
    }

    #[test]
    fn refuses_junk() {
        assert!(Value::parse_literal("bare_word").is_err());
        assert!(Value::parse_literal("").is_err());
    }

    #[test]
    fn splitting_respects_nesting() {
        assert_eq!(
            vec!["a=1", "b=[2,3]", "c=c(d=4,e=(5,6))"],
            split_top("a=1,b=[2,3],c=c(d=4,e=(5,6))", ',')
        );
    }
}
