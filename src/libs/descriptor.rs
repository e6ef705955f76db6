//! Static descriptions of a table's shape and the forms generated for it.
//!
//! Descriptors are `'static` data built from constants in [`crate::catalog`].
//! They describe shape only and never hold records.

use std::borrow::Cow;

use crate::error::DescriptorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
    Email,
    Password,
    Number,
    Date,
    Time,
    Select,
}

impl FieldKind {
    /// The HTML `<input type>` for single-line kinds.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Textarea | FieldKind::Select => "text",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
        }
    }
}

/// A value/label pair for a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: Cow<'static, str>,
    pub label: Cow<'static, str>,
}

impl SelectOption {
    pub const fn fixed(value: &'static str, label: &'static str) -> Self {
        Self {
            value: Cow::Borrowed(value),
            label: Cow::Borrowed(label),
        }
    }

    pub fn new(value: String, label: String) -> Self {
        Self {
            value: Cow::Owned(value),
            label: Cow::Owned(label),
        }
    }
}

/// One form input.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub options: Option<&'static [SelectOption]>,
    pub options_query: Option<&'static str>,
    pub step: Option<&'static str>,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            options: None,
            options_query: None,
            step: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn with_options(mut self, options: &'static [SelectOption]) -> Self {
        self.options = Some(options);
        self
    }

    pub const fn with_options_query(mut self, query: &'static str) -> Self {
        self.options_query = Some(query);
        self
    }

    pub const fn with_step(mut self, step: &'static str) -> Self {
        self.step = Some(step);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    Text,
    Money,
    TextLong,
}

/// A column shown on the list page.
#[derive(Debug, Clone, Copy)]
pub struct DisplayColumn {
    pub key: &'static str,
    pub label: &'static str,
    pub render: RenderKind,
}

impl DisplayColumn {
    pub const fn new(key: &'static str, label: &'static str, render: RenderKind) -> Self {
        Self { key, label, render }
    }
}

/// How rows of a table are identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKey {
    Single(&'static str),
    /// A pair of foreign keys; such tables get no update operation.
    Composite(&'static str, &'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct TableDescriptor {
    /// Path segment and the identifier display names derive from.
    pub route: &'static str,
    pub storage_name: &'static str,
    pub key: TableKey,
    pub list_query: &'static str,
    pub display_columns: &'static [DisplayColumn],
    pub creation_fields: &'static [FieldDescriptor],
    pub insert_fields: &'static [&'static str],
    pub update_fields: &'static [&'static str],
}

impl TableDescriptor {
    pub fn primary_key(&self) -> Option<&'static str> {
        match self.key {
            TableKey::Single(field) => Some(field),
            TableKey::Composite(..) => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.creation_fields.iter().find(|f| f.name == name)
    }

    /// Human readable plural label, e.g. `job_applications` -> `Job Applications`.
    pub fn display_name(&self) -> String {
        display_name(self.route)
    }

    /// Checks the subset and key invariants.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        for &name in self.insert_fields {
            if self.field(name).is_none() {
                return Err(DescriptorError::UnknownInsertField {
                    table: self.route,
                    field: name,
                });
            }
        }
        for &name in self.update_fields {
            if !self.insert_fields.contains(&name) {
                return Err(DescriptorError::UpdateNotInsertable {
                    table: self.route,
                    field: name,
                });
            }
        }
        if matches!(self.key, TableKey::Composite(..)) && !self.update_fields.is_empty() {
            return Err(DescriptorError::CompositeKeyUpdate { table: self.route });
        }
        for field in self.creation_fields {
            let has_source = field.options.is_some() || field.options_query.is_some();
            if field.kind == FieldKind::Select {
                if field.options.is_some() && field.options_query.is_some() {
                    return Err(DescriptorError::AmbiguousOptions {
                        table: self.route,
                        field: field.name,
                    });
                }
            } else if has_source {
                return Err(DescriptorError::OptionsOnNonSelect {
                    table: self.route,
                    field: field.name,
                });
            }
        }
        Ok(())
    }
}

/// Title-cases `identifier` with underscores as spaces, then pluralizes it.
pub fn display_name(identifier: &str) -> String {
    let titled = title_case(&identifier.replace('_', " "));
    if let Some(stem) = titled.strip_suffix('y') {
        format!("{stem}ies")
    } else if titled.ends_with('s') {
        titled
    } else {
        format!("{titled}s")
    }
}

// A letter is uppercased at the start of a word (after a non-letter) and lowercased inside one.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::new("a", "A", FieldKind::Text).required(),
        FieldDescriptor::new("b", "B", FieldKind::Number),
    ];

    fn table(key: TableKey, insert: &'static [&'static str], update: &'static [&'static str]) -> TableDescriptor {
        TableDescriptor {
            route: "things",
            storage_name: "THING",
            key,
            list_query: "SELECT * FROM THING",
            display_columns: &[],
            creation_fields: FIELDS,
            insert_fields: insert,
            update_fields: update,
        }
    }

    #[test]
    fn pluralizes_display_names() {
        assert_eq!(display_name("job_applications"), "Job Applications");
        assert_eq!(display_name("caregivers"), "Caregivers");
        assert_eq!(display_name("category"), "Categories");
        assert_eq!(display_name("user"), "Users");
        assert_eq!(display_name("ADDRESS"), "Address");
    }

    #[test]
    fn accepts_valid_subsets() {
        assert!(table(TableKey::Single("a"), &["a", "b"], &["b"]).validate().is_ok());
        assert!(table(TableKey::Composite("a", "b"), &["a", "b"], &[]).validate().is_ok());
    }

    #[test]
    fn rejects_insert_field_outside_creation_fields() {
        let err = table(TableKey::Single("a"), &["a", "zzz"], &[]).validate().unwrap_err();
        assert!(matches!(err, DescriptorError::UnknownInsertField { field: "zzz", .. }));
    }

    #[test]
    fn rejects_update_field_outside_insert_fields() {
        let err = table(TableKey::Single("a"), &["a"], &["b"]).validate().unwrap_err();
        assert!(matches!(err, DescriptorError::UpdateNotInsertable { field: "b", .. }));
    }

    #[test]
    fn rejects_updates_on_composite_key() {
        let err = table(TableKey::Composite("a", "b"), &["a", "b"], &["b"]).validate().unwrap_err();
        assert!(matches!(err, DescriptorError::CompositeKeyUpdate { .. }));
    }
}
