// src/recipe/requirements.rs

//! Build requirements
//!
//! A requirement is a package reference of the form
//! `name/version@user/channel`. The requirement list keeps insertion order
//! and holds at most one entry per package name.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A reference to another package this recipe builds against
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requirement {
    pub name: String,
    pub version: String,
    pub user: String,
    pub channel: String,
}

impl Requirement {
    pub fn new(name: &str, version: &str, user: &str, channel: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            user: user.to_string(),
            channel: channel.to_string(),
        }
    }

    /// Parse a `name/version@user/channel` reference
    pub fn parse(reference: &str) -> Result<Self> {
        let invalid = || {
            Error::ParseError(format!(
                "Invalid requirement '{}', expected name/version@user/channel",
                reference
            ))
        };

        let (package, origin) = reference.trim().split_once('@').ok_or_else(invalid)?;
        let (name, version) = package.split_once('/').ok_or_else(invalid)?;
        let (user, channel) = origin.split_once('/').ok_or_else(invalid)?;

        if [name, version, user, channel]
            .iter()
            .any(|part| part.is_empty() || part.contains(['/', '@']))
        {
            return Err(invalid());
        }

        Ok(Self::new(name, version, user, channel))
    }

    /// The `user/channel` the package is published under
    pub fn origin(&self) -> String {
        format!("{}/{}", self.user, self.channel)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}/{}", self.name, self.version, self.user, self.channel)
    }
}

impl FromStr for Requirement {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Requirement::parse(s)
    }
}

impl Serialize for Requirement {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered, duplicate-free list of requirements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequirementList {
    items: Vec<Requirement>,
}

impl RequirementList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a requirement unless a package of the same name is present
    ///
    /// Returns `true` if the requirement was added.
    pub fn add(&mut self, requirement: Requirement) -> bool {
        if self.contains(&requirement.name) {
            return false;
        }
        self.items.push(requirement);
        true
    }

    /// Parse and append a reference
    pub fn add_reference(&mut self, reference: &str) -> Result<bool> {
        Ok(self.add(Requirement::parse(reference)?))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|r| r.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.items.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.items.iter()
    }

    /// Package names in order
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|r| r.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a RequirementList {
    type Item = &'a Requirement;
    type IntoIter = std::slice::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference() {
        let req = Requirement::parse("libjpeg/9c@bincrafters/stable").unwrap();
        assert_eq!(req.name, "libjpeg");
        assert_eq!(req.version, "9c");
        assert_eq!(req.origin(), "bincrafters/stable");
        assert_eq!(req.to_string(), "libjpeg/9c@bincrafters/stable");
    }

    #[test]
    fn test_parse_invalid_references() {
        for bad in [
            "zlib",
            "zlib/1.2.11",
            "zlib@conan/stable",
            "zlib/1.2.11@conan",
            "/1.2.11@conan/stable",
            "zlib/1.2/11@conan/stable",
        ] {
            assert!(Requirement::parse(bad).is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn test_add_ignores_duplicate_names() {
        let mut list = RequirementList::new();
        assert!(list.add_reference("zlib/1.2.11@conan/stable").unwrap());
        assert!(!list.add_reference("zlib/1.2.11@conan/stable").unwrap());
        assert!(!list.add_reference("zlib/1.2.8@conan/stable").unwrap());
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("zlib").unwrap().version, "1.2.11");
    }

    #[test]
    fn test_order_preserved() {
        let mut list = RequirementList::new();
        list.add_reference("b/1@u/c").unwrap();
        list.add_reference("a/1@u/c").unwrap();
        assert_eq!(list.names(), vec!["b", "a"]);
    }

    #[test]
    fn test_serialize_as_references() {
        let mut list = RequirementList::new();
        list.add_reference("lcms/2.9@bincrafters/stable").unwrap();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"["lcms/2.9@bincrafters/stable"]"#);
    }
}
