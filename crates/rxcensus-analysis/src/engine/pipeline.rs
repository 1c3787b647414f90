//! Pipeline-scoped matching: `source.pipe(operator(args), ...)`.

use super::matcher::{CountStrategy, OperatorCounts};

const ANCHOR: &str = "pipe(";

/// Credits an operator once per `pipe(` window that opens with `operator(`.
///
/// A window runs from just after one anchor to the next anchor or the end of
/// the text. Only the call immediately after the anchor is seen: in
/// `pipe(map(x), filter(y))` only `map` is credited. Text before the first
/// anchor never counts.
#[derive(Debug, Clone)]
pub struct PipelineStrategy {
    calls: Vec<(String, String)>,
}

impl PipelineStrategy {
    pub fn new<'a, I>(operators: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        Self {
            calls: operators
                .into_iter()
                .map(|op| (op.clone(), format!("{op}(")))
                .collect(),
        }
    }
}

impl CountStrategy for PipelineStrategy {
    fn count(&self, text: &str) -> OperatorCounts {
        let mut counts: OperatorCounts =
            self.calls.iter().map(|(op, _)| (op.clone(), 0)).collect();

        let Some(first) = text.find(ANCHOR) else {
            return counts;
        };
        let mut start = first + ANCHOR.len();
        loop {
            let next = text[start..].find(ANCHOR).map(|offset| start + offset);
            let window = &text[start..next.unwrap_or(text.len())];
            for (op, call) in &self.calls {
                if window.starts_with(call.as_str()) {
                    if let Some(n) = counts.get_mut(op) {
                        *n += 1;
                    }
                }
            }
            match next {
                Some(anchor) => start = anchor + ANCHOR.len(),
                None => break,
            }
        }
        counts
    }

    fn operators(&self) -> Vec<&str> {
        self.calls.iter().map(|(op, _)| op.as_str()).collect()
    }
}
