use log::debug;

use super::{error::EvalError, value::Value, Context};
use crate::{error::CoreError, parsing::{parse, Node}};

/// One recorded input line.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub source: String,
    pub ast: Node,
    /// Set once the entry's own evaluation succeeded.
    pub value: Option<Value>,
}

/// Append-only list of every expression that parsed, addressable as `[n]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    entries: im::Vector<Entry>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Records a parsed expression without evaluating it and returns its index.
    pub fn append(&mut self, source: &str, ast: Node) -> usize {
        self.entries.push_back(Entry {
            source: source.to_string(),
            ast,
            value: None,
        });
        self.entries.len() - 1
    }

    /// Evaluates an existing entry afresh, refreshing its cached value.
    pub fn reevaluate(&mut self, index: usize) -> Result<Value, EvalError> {
        let result = Context::new(self).eval_entry(index);

        if let (Ok(value), Some(entry)) = (&result, self.entries.get_mut(index)) {
            entry.value = Some(value.clone());
        }

        result
    }

    /// Parses `input`, records it and evaluates it.
    ///
    /// An input that parses keeps its index even when evaluation fails, and
    /// may refer to every earlier entry but not to itself.
    pub fn evaluate_and_record(&mut self, input: &str) -> Result<(usize, Value), CoreError> {
        let ast = parse(input)?;
        let index = self.append(input.trim(), ast);

        let value = self
            .reevaluate(index)
            .map_err(|source| CoreError::Eval { index, source })?;

        debug!("recorded [{}] {:?} = {}", index, input.trim(), value);
        Ok((index, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_it;

    #[test]
    fn test_append_returns_index() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.append("1", parse_it!("1")), 0);
        assert_eq!(history.append("a", parse_it!("a")), 1);
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(1).unwrap().value, None);
        assert_eq!(
            history.iter().map(|e| e.source.as_str()).collect::<Vec<_>>(),
            vec!["1", "a"]
        );
    }

    #[test]
    fn test_back_reference() {
        let mut history = History::new();
        assert_eq!(history.evaluate_and_record("3+4").unwrap(), (0, Value::integer(7)));
        assert_eq!(history.evaluate_and_record("[0]*2").unwrap(), (1, Value::integer(14)));
        assert_eq!(history.get(1).unwrap().value, Some(Value::integer(14)));
        assert_eq!(crate::eval_it!("[0] + [1]", &history), "21");
    }

    #[test]
    fn test_self_reference_is_cyclic() {
        let mut history = History::new();
        let err = history.evaluate_and_record("[0]").unwrap_err();
        assert_eq!(
            err,
            CoreError::Eval {
                index: 0,
                source: EvalError::CyclicReference { index: 0 },
            }
        );
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0).unwrap().value, None);
    }

    #[test]
    fn test_forward_reference_becomes_cycle() {
        let mut history = History::new();
        let err = history.evaluate_and_record("[1] + 1").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Eval {
                index: 0,
                source: EvalError::UnknownIndex { len: 1, .. }
            }
        ));

        let err = history.evaluate_and_record("[0]").unwrap_err();
        assert_eq!(err.index(), Some(1));
        assert!(matches!(
            err,
            CoreError::Eval {
                source: EvalError::CyclicReference { index: 1 },
                ..
            }
        ));
    }

    #[test]
    fn test_parse_failure_is_not_recorded() {
        let mut history = History::new();
        assert!(matches!(
            history.evaluate_and_record("2+"),
            Err(CoreError::Parse(_))
        ));
        assert!(history.is_empty());
    }

    #[test]
    fn test_failed_entry_is_reevaluated_on_reference() {
        let mut history = History::new();
        history.evaluate_and_record("a").unwrap();
        assert!(history.evaluate_and_record("[0] + b").is_err());
        assert!(history.evaluate_and_record("[1]").is_err());
        assert_eq!(history.len(), 3);
        assert!(history.reevaluate(1).is_err());
        assert_eq!(history.reevaluate(0).unwrap(), Value::symbol("a"));
    }
}
