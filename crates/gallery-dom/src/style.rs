//! Inline style declarations.

use std::fmt;

/// An ordered list of inline CSS declarations.
///
/// Setting a property that already exists replaces its value in place, so the
/// serialized order matches the order properties were first assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    declarations: Vec<(String, String)>,
}

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property. Custom properties (`--name`) are stored like any other.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();

        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some((_, existing)) => *existing = value,
            None => self.declarations.push((property, value)),
        }
    }

    /// Get a property value.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a property, returning its previous value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let pos = self.declarations.iter().position(|(p, _)| p == property)?;
        Some(self.declarations.remove(pos).1)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Iterate declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", property, value)?;
        }
        Ok(())
    }
}
