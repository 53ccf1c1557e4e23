//! [`Inspect`] implementations for standard types.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;

use super::traits::{Inspect, Kind, Number};

macro_rules! impl_inspect_number {
    ($($ty:ty => $variant:ident as $repr:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn kind(&self) -> Kind<'_> {
                    Kind::Number(Number::$variant(*self as $repr))
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

impl_inspect_number!(
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    isize => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    usize => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
);

impl Inspect for String {
    fn kind(&self) -> Kind<'_> {
        Kind::Text(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Inspect for bool {
    fn kind(&self) -> Kind<'_> {
        Kind::Bool(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Inspect for DateTime<Utc> {
    fn kind(&self) -> Kind<'_> {
        Kind::Time(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn kind(&self) -> Kind<'_> {
        Kind::Optional(self.as_ref().map(|inner| inner as &dyn Inspect))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Inspect> Inspect for Box<T> {
    fn kind(&self) -> Kind<'_> {
        (**self).kind()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn kind(&self) -> Kind<'_> {
        Kind::List(self.iter().map(|item| item as &dyn Inspect).collect())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// Keys are sorted so the first reported error does not depend on hash order.
impl<V: Inspect> Inspect for HashMap<String, V> {
    fn kind(&self) -> Kind<'_> {
        let mut entries: Vec<(&str, &dyn Inspect)> = self
            .iter()
            .map(|(key, value)| (key.as_str(), value as &dyn Inspect))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        Kind::Map(entries)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<V: Inspect> Inspect for BTreeMap<String, V> {
    fn kind(&self) -> Kind<'_> {
        Kind::Map(
            self.iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Inspect))
                .collect(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<V: Inspect> Inspect for IndexMap<String, V> {
    fn kind(&self) -> Kind<'_> {
        Kind::Map(
            self.iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Inspect))
                .collect(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Inspect for Value {
    fn kind(&self) -> Kind<'_> {
        Kind::Open {
            is_empty: self.is_null(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
