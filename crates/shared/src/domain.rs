use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Activities keyed by name, in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivitySet(pub IndexMap<String, ActivityDetails>);

impl ActivitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, details: ActivityDetails) {
        self.0.insert(name.into(), details);
    }

    pub fn get(&self, name: &str) -> Option<&ActivityDetails> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ActivityDetails)> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ActivityDetails)> for ActivitySet {
    fn from_iter<T: IntoIterator<Item = (String, ActivityDetails)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl ActivityDetails {
    /// Capacity minus signups. Not clamped: an overbooked activity goes negative.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
