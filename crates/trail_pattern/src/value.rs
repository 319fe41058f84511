use std::fmt::Display;

/// A value handed to the builder, for a path variable or a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Absent,
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
    /// Something with no textual form, named by its kind.
    Opaque(&'static str),
}

/// What the builder does with values that have no textual form.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Coercion {
    /// Substitute the empty string.
    Lenient,
    Strict,
}

impl Default for Coercion {
    fn default() -> Self {
        Coercion::Lenient
    }
}

/// Result of stringifying a single [`Value`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Stringified {
    Absent,
    Text(String),
    Unrepresentable(&'static str),
}

impl Value {
    /// Captures any type through its `Display` form.
    pub fn display(value: &impl Display) -> Self {
        Value::Text(value.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent value",
            Value::Text(_) => "string",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Opaque(kind) => kind,
        }
    }

    pub fn to_text(&self) -> Stringified {
        match self {
            Value::Absent => Stringified::Absent,
            Value::Text(s) => Stringified::Text(s.clone()),
            Value::Int(i) => Stringified::Text(i.to_string()),
            Value::UInt(u) => Stringified::Text(u.to_string()),
            Value::Float(f) => Stringified::Text(f.to_string()),
            Value::Bool(b) => Stringified::Text(b.to_string()),
            Value::List(_) | Value::Map(_) | Value::Opaque(_) => {
                Stringified::Unrepresentable(self.kind())
            }
        }
    }
}

macro_rules! from_value {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(<$target>::from(v))
                }
            }
        )+
    };
}

from_value!(Text as String: String, &str, &String, char);
from_value!(Int as i64: i8, i16, i32, i64);
from_value!(UInt as u64: u8, u16, u32, u64);
from_value!(Float as f64: f32, f64);
from_value!(Bool as bool: bool);

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int(v as i64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Absent, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalars_stringify() {
        assert_eq!(Value::from(42).to_text(), Stringified::Text("42".into()));
        assert_eq!(Value::from(-7i64).to_text(), Stringified::Text("-7".into()));
        assert_eq!(Value::from(1.5).to_text(), Stringified::Text("1.5".into()));
        assert_eq!(Value::from(true).to_text(), Stringified::Text("true".into()));
        assert_eq!(Value::from(false).to_text(), Stringified::Text("false".into()));
        assert_eq!(Value::from('x').to_text(), Stringified::Text("x".into()));
    }

    #[test]
    fn option_maps_to_absent() {
        assert_eq!(Value::from(None::<&str>), Value::Absent);
        assert_eq!(Value::from(Some("a")), Value::Text("a".into()));
        assert_eq!(Value::Absent.to_text(), Stringified::Absent);
    }

    #[test]
    fn containers_have_no_text() {
        assert_eq!(
            Value::from(vec![1, 2]).to_text(),
            Stringified::Unrepresentable("list")
        );
        assert_eq!(
            Value::Map(vec![]).to_text(),
            Stringified::Unrepresentable("map")
        );
        assert_eq!(
            Value::Opaque("handler").to_text(),
            Stringified::Unrepresentable("handler")
        );
    }

    #[test]
    fn display_captures_custom_types() {
        struct Slug(&'static str);
        impl Display for Slug {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "slug-{}", self.0)
            }
        }
        assert_eq!(Value::display(&Slug("a")), Value::Text("slug-a".into()));
    }
}
