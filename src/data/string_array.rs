//! Arrays of strings, one per tuple

/// Named array holding one string per tuple
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringDataArray {
    name: String,
    values: Vec<String>,
}

impl StringDataArray {
    /// `num_tuples` empty strings
    pub fn new(name: impl Into<String>, num_tuples: usize) -> Self {
        Self {
            name: name.into(),
            values: vec![String::new(); num_tuples],
        }
    }

    pub fn from_vec(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn num_tuples(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.values.get(i).map(String::as_str)
    }

    /// # Panics
    ///
    /// Panics if `i >= num_tuples()`.
    pub fn set_value(&mut self, i: usize, value: impl Into<String>) {
        self.values[i] = value.into();
    }

    pub fn as_slice(&self) -> &[String] {
        &self.values
    }

    pub fn resize(&mut self, num_tuples: usize) {
        self.values.resize(num_tuples, String::new());
    }
}
