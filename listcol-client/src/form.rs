use crate::error::ClientResult;
use crate::scan::input_names;
use std::collections::BTreeMap;

/// The edit form opened for a row: its element id and named inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    id: String,
    inputs: BTreeMap<String, String>,
}

impl EditForm {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inputs: BTreeMap::new(),
        }
    }

    /// Builds a form from rendered field markup; every input starts empty.
    pub fn from_markup(id: impl Into<String>, markup: &str) -> ClientResult<Self> {
        let mut form = Self::new(id);
        for name in input_names(markup)? {
            form.inputs.insert(name, String::new());
        }
        Ok(form)
    }

    pub fn with_input(mut self, name: &str, value: &str) -> Self {
        self.inputs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.inputs.get(name).map(String::as_str)
    }

    /// Sets an existing input. Returns false if the form has no such input.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        match self.inputs.get_mut(name) {
            Some(input) => {
                *input = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Submitted values by input name.
    pub fn into_submission(self) -> BTreeMap<String, String> {
        self.inputs
    }
}
