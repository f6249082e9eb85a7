// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The tag table: names by which calls refer to one another.
//!
//! A tag may be referenced before it is defined. The table is seeded with
//! the base tags so that their numbers are fixed across databases.

use crate::compiler::errors::CompileErrorKind;
use crate::compiler::keywords::BASE_TAGS;
use crate::database::flags::MAX_TAGS;
use crate::database::TagId;
use std::collections::HashMap;

/// Where a tag was used, for reporting it if it is never defined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagUse {
    pub line: usize,
    pub column: usize,
    pub source_line: Option<String>,
    /// The call whose body holds the reference.
    pub call: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TagEntry {
    name: String,
    defined: bool,
    /// The first reference, if any.
    first_use: Option<TagUse>,
}

#[derive(Debug, Clone)]
pub struct TagTable {
    entries: Vec<TagEntry>,
    by_name: HashMap<String, TagId>,
}

impl Default for TagTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TagTable {
    pub fn new() -> Self {
        let mut table = TagTable {
            entries: Vec::with_capacity(BASE_TAGS.len()),
            by_name: HashMap::new(),
        };
        for (i, &name) in BASE_TAGS.iter().enumerate() {
            table.entries.push(TagEntry {
                name: name.to_string(),
                // Tag 0 stands for "no call" and can never be defined.
                defined: i == 0,
                first_use: None,
            });
            table.by_name.insert(name.to_string(), i as TagId);
        }
        table
    }

    fn find_or_add(&mut self, name: &str) -> Result<TagId, CompileErrorKind> {
        if let Some(&id) = self.by_name.get(name) {
            return Ok(id);
        }
        if self.entries.len() >= MAX_TAGS {
            return Err(CompileErrorKind::TooManyTags);
        }
        let id = self.entries.len() as TagId;
        self.entries.push(TagEntry {
            name: name.to_string(),
            defined: false,
            first_use: None,
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Record the definition of `name` by a call header.
    pub fn define(&mut self, name: &str) -> Result<TagId, CompileErrorKind> {
        let id = self.find_or_add(name)?;
        let entry = &mut self.entries[usize::from(id)];
        if entry.defined {
            return Err(CompileErrorKind::DuplicateTag(name.to_string()));
        }
        entry.defined = true;
        Ok(id)
    }

    /// Record a use of `name` from a definition body at `site`.
    pub fn reference(&mut self, name: &str, site: TagUse) -> Result<TagId, CompileErrorKind> {
        let id = self.find_or_add(name)?;
        let entry = &mut self.entries[usize::from(id)];
        if entry.first_use.is_none() {
            entry.first_use = Some(site);
        }
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn id(&self, name: &str) -> Option<TagId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: TagId) -> Option<&str> {
        self.entries.get(usize::from(id)).map(|e| e.name.as_str())
    }

    pub fn is_defined(&self, id: TagId) -> bool {
        self.entries.get(usize::from(id)).is_some_and(|e| e.defined)
    }

    /// Tags that are used somewhere but never defined, in table order.
    pub fn undefined(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.first_use.is_some() && !e.defined)
            .map(|e| e.name.clone())
            .collect()
    }

    /// The earliest reference to any undefined tag.
    pub fn first_undefined_use(&self) -> Option<&TagUse> {
        self.entries
            .iter()
            .filter(|e| !e.defined)
            .filter_map(|e| e.first_use.as_ref())
            .min_by_key(|site| (site.line, site.column))
    }

    /// Non-base tags that are defined but never used.
    pub fn unreferenced(&self) -> Vec<String> {
        self.entries
            .iter()
            .skip(BASE_TAGS.len())
            .filter(|e| e.defined && e.first_use.is_none())
            .map(|e| e.name.clone())
            .collect()
    }
}
