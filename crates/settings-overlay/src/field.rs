//! Declarative record descriptions
//!
//! A [`RecordSpec`] is a static table describing one settings record:
//! its fields, their semantic types, numeric bounds, and whether a user
//! override may change them. The merge, validation and schema modules
//! all consult the same table.

/// Description of a structured settings record.
#[derive(Debug)]
pub struct RecordSpec {
    /// Type name; used for `$defs` keys and derived file names.
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordSpec {
    /// Look up a field by its serialized key.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Closed set of string values.
#[derive(Debug)]
pub struct EnumSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub variants: &'static [&'static str],
}

impl EnumSpec {
    pub fn contains(&self, value: &str) -> bool {
        self.variants.contains(&value)
    }
}

/// Semantic type of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Enum(&'static EnumSpec),
    Record(&'static RecordSpec),
}

impl FieldKind {
    /// JSON-schema type keyword, if the kind maps to a primitive.
    pub fn json_type(&self) -> Option<&'static str> {
        match self {
            FieldKind::String => Some("string"),
            FieldKind::Integer => Some("integer"),
            FieldKind::Number => Some("number"),
            FieldKind::Enum(_) | FieldKind::Record(_) => None,
        }
    }

    /// Human-readable name used in type-mismatch diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Enum(_) => "string",
            FieldKind::Record(_) => "object",
        }
    }
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl Bounds {
    pub const NONE: Bounds = Bounds {
        minimum: None,
        maximum: None,
    };

    pub fn is_empty(&self) -> bool {
        self.minimum.is_none() && self.maximum.is_none()
    }
}

/// One field of a record.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Serialized key.
    pub name: &'static str,
    pub kind: FieldKind,
    pub bounds: Bounds,
    /// Whether a user override may change this field.
    pub updatable: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            bounds: Bounds::NONE,
            updatable: true,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub const fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub const fn one_of(name: &'static str, spec: &'static EnumSpec) -> Self {
        Self::new(name, FieldKind::Enum(spec))
    }

    pub const fn record(name: &'static str, spec: &'static RecordSpec) -> Self {
        Self::new(name, FieldKind::Record(spec))
    }

    pub const fn min(mut self, minimum: f64) -> Self {
        self.bounds.minimum = Some(minimum);
        self
    }

    pub const fn max(mut self, maximum: f64) -> Self {
        self.bounds.maximum = Some(maximum);
        self
    }

    /// Mark the field as not overridable by user documents.
    pub const fn locked(mut self) -> Self {
        self.updatable = false;
        self
    }

    /// Title derived from the key: `min_object_size` -> `Min Object Size`.
    pub fn title(&self) -> String {
        self.name
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Join a parent path and a key into a dotted field path.
pub(crate) fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}
