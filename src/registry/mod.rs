//registry/mod.rs
use crate::collections::{find_first, insert_unique};
use crate::schema::ParameterSchema;
use crate::{Category, ParamValue, ParsedName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryValues {
    pub name: String,
    pub values: Vec<ParamValue>,
}

/// Distinct values seen per category, in first-seen order.
///
/// Not synchronized. Callers that register from several threads wrap it in
/// a lock (see [`crate::parallel`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    entries: Vec<CategoryValues>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One empty value set per schema entry.
    pub fn from_schema(schema: &ParameterSchema) -> Self {
        let mut registry = Self::new();
        for descriptor in schema.iter() {
            registry.add_category(descriptor.label);
        }
        registry
    }

    /// Returns `false` if the category already exists.
    pub fn add_category(&mut self, name: &str) -> bool {
        if self.entry(name).is_some() {
            return false;
        }
        self.entries.push(CategoryValues {
            name: name.to_string(),
            values: Vec::new(),
        });
        true
    }

    fn entry(&self, name: &str) -> Option<&CategoryValues> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Records `value` under `category` and hands it back. Unknown
    /// categories are left alone.
    pub fn register(&mut self, category: &str, value: ParamValue) -> ParamValue {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == category) {
            insert_unique(&mut entry.values, value.clone());
        }
        value
    }

    /// Registers every present field of `parsed`.
    pub fn record(&mut self, parsed: &ParsedName) {
        for category in Category::ALL {
            if let Some(value) = parsed.get(category) {
                self.register(category.label(), value);
            }
        }
    }

    pub fn values(&self, category: &str) -> Option<&[ParamValue]> {
        self.entry(category).map(|e| e.values.as_slice())
    }

    /// The registered copy of `value`, if any.
    pub fn canonical(&self, category: &str, value: &ParamValue) -> Option<&ParamValue> {
        self.entry(category).and_then(|e| find_first(&e.values, value))
    }

    pub fn categories(&self) -> impl Iterator<Item = &CategoryValues> {
        self.entries.iter()
    }
}

/// Free-function form of [`CategoryRegistry::register`], convenient inline
/// while mapping over values.
pub fn register_value<V: Into<ParamValue>>(
    category: &str,
    value: V,
    registry: &mut CategoryRegistry,
) -> ParamValue {
    registry.register(category, value.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::get_schema;
    use crate::parser::extract_fields;

    fn buffer_registry() -> CategoryRegistry {
        let mut registry = CategoryRegistry::new();
        registry.add_category("BufferType");
        register_value("BufferType", "Direct", &mut registry);
        registry
    }

    #[test]
    fn register_appends_new_value() {
        let mut registry = buffer_registry();
        let returned = register_value("BufferType", "Heap", &mut registry);
        assert_eq!(returned, ParamValue::from("Heap"));
        assert_eq!(
            registry.values("BufferType").unwrap(),
            &[ParamValue::from("Direct"), ParamValue::from("Heap")]
        );
    }

    #[test]
    fn register_is_idempotent_on_duplicates() {
        let mut registry = buffer_registry();
        register_value("BufferType", "Heap", &mut registry);
        register_value("BufferType", "Heap", &mut registry);
        assert_eq!(registry.values("BufferType").unwrap().len(), 2);
    }

    #[test]
    fn register_unknown_category_is_noop() {
        let mut registry = buffer_registry();
        let returned = register_value("Operation", "Read", &mut registry);
        assert_eq!(returned, ParamValue::from("Read"));
        assert_eq!(registry.values("Operation"), None);
        assert_eq!(registry.categories().count(), 1);
    }

    #[test]
    fn record_parsed_names() {
        let mut registry = CategoryRegistry::from_schema(get_schema());
        for name in ["DirectStringRead1Kb", "HeapStringRead1Kb", "DirectBufferWrite56Kb"] {
            registry.record(&extract_fields(name));
        }
        assert_eq!(
            registry.values("BufferType").unwrap(),
            &[ParamValue::from("Direct"), ParamValue::from("Heap")]
        );
        assert_eq!(
            registry.values("Size").unwrap(),
            &[ParamValue::Number(1), ParamValue::Number(56)]
        );
        assert_eq!(registry.values("SizeUnit").unwrap(), &[ParamValue::from("Kb")]);
    }

    #[test]
    fn record_skips_absent_fields() {
        let mut registry = CategoryRegistry::from_schema(get_schema());
        registry.record(&extract_fields("Direct"));
        assert_eq!(registry.values("BufferType").unwrap().len(), 1);
        assert!(registry.values("Size").unwrap().is_empty());
    }

    #[test]
    fn add_category_rejects_duplicates() {
        let mut registry = CategoryRegistry::from_schema(get_schema());
        assert!(!registry.add_category("Size"));
        assert!(registry.add_category("Threads"));
        assert_eq!(registry.categories().count(), 6);
    }

    #[test]
    fn canonical_lookup() {
        let registry = buffer_registry();
        assert_eq!(
            registry.canonical("BufferType", &ParamValue::from("Direct")),
            Some(&ParamValue::from("Direct"))
        );
        assert_eq!(registry.canonical("BufferType", &ParamValue::from("Heap")), None);
    }
}
