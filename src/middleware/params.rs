use std::collections::HashMap;
use std::fmt;

/// Request parameters grouped by name, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: Vec<(String, Vec<String>)>,
    /// Position of each name in `entries`.
    index: HashMap<String, usize>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.index.get(&name) {
            Some(&position) => self.entries[position].1.push(value),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, vec![value]));
            }
        }
    }

    /// Adds every pair of an `application/x-www-form-urlencoded` string.
    pub fn extend_urlencoded(&mut self, input: &[u8]) {
        for (name, value) in url::form_urlencoded::parse(input) {
            self.push(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.index
            .get(name)
            .map(|&position| self.entries[position].1.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `key=[v1, v2];` for every parameter, concatenated.
impl fmt::Display for RequestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, values) in &self.entries {
            write!(f, "{name}=[{}];", values.join(", "))?;
        }
        Ok(())
    }
}
