//! Structural diff of two resolved component sets
//!
//! Components are compared category by category through their serialized
//! form. Build-derived fields are stripped first, so only author-facing
//! declarations show up in the changelog.

use crate::Result;
use crate::model::{
    Component, ComponentKind, ComponentMap, ComponentSet, Dashboard, Folder, Panel, SavedSearch,
    Variable,
};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;

/// Maximum recursion depth for diff operations
const MAX_DIFF_DEPTH: usize = 128;

/// Category order of a changelog.
pub const DIFF_ORDER: [ComponentKind; 5] = [
    ComponentKind::Variable,
    ComponentKind::Panel,
    ComponentKind::SavedSearch,
    ComponentKind::Dashboard,
    ComponentKind::Folder,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

/// One classified difference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    #[serde(serialize_with = "serialize_category")]
    pub category: ComponentKind,
    /// Key of the component the change belongs to.
    pub key: String,
    /// Field path inside the component; empty when the whole component was
    /// created or deleted.
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Value>,
}

impl Change {
    /// The field path joined with dots, e.g. `layout.layoutStructures.0.key`.
    pub fn field_path(&self) -> Option<String> {
        (!self.path.is_empty()).then(|| self.path.join("."))
    }
}

fn serialize_category<S: Serializer>(kind: &ComponentKind, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.category())
}

/// Changes of one component, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeGroup<'a> {
    #[serde(serialize_with = "serialize_category")]
    pub category: ComponentKind,
    pub key: &'a str,
    pub changes: Vec<&'a Change>,
}

/// The changelog between two component sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeSet {
    pub changes: Vec<Change>,
}

impl ChangeSet {
    /// Compare `old` to `new`, in [`DIFF_ORDER`].
    pub fn compute(old: &ComponentSet, new: &ComponentSet) -> Result<Self> {
        let mut changes = Vec::new();
        for kind in DIFF_ORDER {
            match kind {
                ComponentKind::Variable => diff_components::<Variable>(old, new, &mut changes)?,
                ComponentKind::Panel => diff_components::<Panel>(old, new, &mut changes)?,
                ComponentKind::SavedSearch => diff_components::<SavedSearch>(old, new, &mut changes)?,
                ComponentKind::Dashboard => diff_components::<Dashboard>(old, new, &mut changes)?,
                ComponentKind::Folder => diff_components::<Folder>(old, new, &mut changes)?,
            }
        }
        Ok(Self { changes })
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn by_category(&self, category: ComponentKind) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(move |c| c.category == category)
    }

    pub fn count(&self, category: ComponentKind, kind: ChangeKind) -> usize {
        self.by_category(category).filter(|c| c.kind == kind).count()
    }

    /// Consecutive changes of the same component, in changelog order.
    pub fn groups(&self) -> Vec<ChangeGroup<'_>> {
        let mut groups: Vec<ChangeGroup<'_>> = Vec::new();
        for change in &self.changes {
            match groups.last_mut() {
                Some(group) if group.category == change.category && group.key == change.key => {
                    group.changes.push(change);
                }
                _ => groups.push(ChangeGroup {
                    category: change.category,
                    key: &change.key,
                    changes: vec![change],
                }),
            }
        }
        groups
    }
}

fn diff_components<T: Component>(
    old: &ComponentSet,
    new: &ComponentSet,
    changes: &mut Vec<Change>,
) -> Result<()> {
    let (old, new): (&ComponentMap<T>, &ComponentMap<T>) = (T::collection(old), T::collection(new));
    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

    for key in keys {
        let mut differ = Differ {
            category: T::KIND,
            key,
            changes: &mut *changes,
        };
        match (old.get(key), new.get(key)) {
            (Some(before), Some(after)) => {
                if before != after {
                    differ.values(&declared(before)?, &declared(after)?, &mut Vec::new(), 0);
                }
            }
            (Some(before), None) => differ.push(ChangeKind::Delete, Vec::new(), Some(declared(before)?), None),
            (None, Some(after)) => differ.push(ChangeKind::Create, Vec::new(), None, Some(declared(after)?)),
            (None, None) => {}
        }
    }

    Ok(())
}

/// Serialized form of a component without its build-derived fields.
fn declared<T: Component>(component: &T) -> Result<Value> {
    let mut value = serde_json::to_value(component)?;
    if let Value::Object(fields) = &mut value {
        for field in T::DERIVED_FIELDS {
            fields.remove(*field);
        }
    }
    Ok(value)
}

struct Differ<'a> {
    category: ComponentKind,
    key: &'a str,
    changes: &'a mut Vec<Change>,
}

impl Differ<'_> {
    fn push(&mut self, kind: ChangeKind, path: Vec<String>, from: Option<Value>, to: Option<Value>) {
        self.changes.push(Change {
            kind,
            category: self.category,
            key: self.key.to_string(),
            path,
            from,
            to,
        });
    }

    fn values(&mut self, old: &Value, new: &Value, path: &mut Vec<String>, depth: usize) {
        // Depth limit: treat deeply nested differences as a single update
        if depth > MAX_DIFF_DEPTH {
            if old != new {
                self.push(ChangeKind::Update, path.clone(), Some(old.clone()), Some(new.clone()));
            }
            return;
        }

        match (old, new) {
            (Value::Object(old_obj), Value::Object(new_obj)) => {
                for (field, old_value) in old_obj {
                    path.push(field.clone());
                    match new_obj.get(field) {
                        Some(new_value) => self.values(old_value, new_value, path, depth + 1),
                        None => self.push(ChangeKind::Delete, path.clone(), Some(old_value.clone()), None),
                    }
                    path.pop();
                }
                for (field, new_value) in new_obj {
                    if !old_obj.contains_key(field) {
                        path.push(field.clone());
                        self.push(ChangeKind::Create, path.clone(), None, Some(new_value.clone()));
                        path.pop();
                    }
                }
            }
            (Value::Array(old_arr), Value::Array(new_arr)) => {
                for i in 0..old_arr.len().max(new_arr.len()) {
                    path.push(i.to_string());
                    match (old_arr.get(i), new_arr.get(i)) {
                        (Some(old_val), Some(new_val)) => self.values(old_val, new_val, path, depth + 1),
                        (Some(old_val), None) => {
                            self.push(ChangeKind::Delete, path.clone(), Some(old_val.clone()), None)
                        }
                        (None, Some(new_val)) => {
                            self.push(ChangeKind::Create, path.clone(), None, Some(new_val.clone()))
                        }
                        (None, None) => {}
                    }
                    path.pop();
                }
            }
            _ => {
                if old != new {
                    self.push(ChangeKind::Update, path.clone(), Some(old.clone()), Some(new.clone()));
                }
            }
        }
    }
}
