//! The working set of parameter values for one simulator run

use rustc_hash::FxHashMap;

use crate::catalog;
use crate::error::CatalogError;
use crate::value::ParamValue;

/// Parameter name to value mapping. Only catalog names are ever stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputDeck {
    values: FxHashMap<String, ParamValue>,
}

impl InputDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, rejecting names the simulator does not know
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<Option<ParamValue>, CatalogError> {
        catalog::kind_of(name)?;
        Ok(self.values.insert(name.to_string(), value.into()))
    }

    pub(crate) fn insert_catalog_entry(&mut self, name: &'static str, value: ParamValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        catalog::CATALOG
            .iter()
            .filter_map(|(name, _)| self.values.get(*name).map(|v| (*name, v)))
    }

    /// Apply every override, or none of them if any name is unknown
    pub fn merge<'a, I>(&mut self, overrides: I) -> Result<(), CatalogError>
    where
        I: IntoIterator<Item = (&'a str, &'a ParamValue)>,
    {
        let overrides: Vec<_> = overrides.into_iter().collect();
        for (name, _) in &overrides {
            catalog::kind_of(name)?;
        }
        for (name, value) in overrides {
            self.values.insert(name.to_string(), value.clone());
        }
        Ok(())
    }
}

impl FromIterator<(&'static str, ParamValue)> for InputDeck {
    /// Collect known entries; unknown names are dropped
    fn from_iter<T: IntoIterator<Item = (&'static str, ParamValue)>>(iter: T) -> Self {
        let mut deck = InputDeck::new();
        for (name, value) in iter {
            if catalog::contains(name) {
                deck.insert_catalog_entry(name, value);
            }
        }
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_rejects_unknown_name() {
        let mut deck = InputDeck::new();
        assert!(deck.set("nt", 10i64).unwrap().is_none());
        assert_eq!(
            deck.set("month", 1i64),
            Err(CatalogError::UnknownParameter("month".into()))
        );
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_set_returns_previous() {
        let mut deck = catalog::default_inputs();
        let previous = deck.set("tmzone", 2.0).unwrap();
        assert_eq!(previous, Some(ParamValue::Float(0.0)));
        assert_eq!(deck.get("tmzone"), Some(&ParamValue::Float(2.0)));
    }

    #[test]
    fn test_merge_is_all_or_nothing() {
        let mut deck = catalog::default_inputs();
        let nt = ParamValue::Int(1);
        let bogus = ParamValue::Int(1);
        let result = deck.merge([("nt", &nt), ("bogus", &bogus)]);
        assert!(result.is_err());
        assert_eq!(deck.get("nt"), Some(&ParamValue::Int(5)));

        deck.merge([("nt", &nt)]).unwrap();
        assert_eq!(deck.get("nt"), Some(&ParamValue::Int(1)));
    }

    #[test]
    fn test_iter_follows_catalog_order() {
        let deck: InputDeck = [("nmj", ParamValue::Int(0)), ("inpfil", "usrinp".into())]
            .into_iter()
            .collect();
        let names: Vec<&str> = deck.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["inpfil", "nmj"]);
    }
}
