//! Ordered species table: name → slot and diffusion coefficient.

use crate::error::GridError;
use crate::id::SpeciesId;
use indexmap::IndexMap;

/// The species registered in a grid, with their diffusion coefficients.
///
/// Insertion order defines the slot of each species: the n-th name gets
/// `SpeciesId(n)`. Names and coefficients live in one map, so the two
/// always share the same key set. The set of names is fixed at
/// construction; only coefficients can change afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpeciesRegistry {
    entries: IndexMap<String, f64>,
}

impl SpeciesRegistry {
    /// Build a registry from an ordered list of names, all with coefficient 0.0.
    ///
    /// Returns `Err(GridError::InvalidParameter)` if a name appears twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use biodiff_core::{SpeciesId, SpeciesRegistry};
    ///
    /// let reg = SpeciesRegistry::new(["AHL", "LuxR"]).unwrap();
    /// assert_eq!(reg.id("LuxR").unwrap(), SpeciesId(1));
    /// assert_eq!(reg.coefficient("AHL").unwrap(), 0.0);
    ///
    /// assert!(SpeciesRegistry::new(["AHL", "AHL"]).is_err());
    /// ```
    pub fn new<I, S>(names: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries = IndexMap::new();
        for name in names {
            let name = name.into();
            if entries.contains_key(&name) {
                return Err(GridError::invalid(format!(
                    "duplicate species name '{name}'"
                )));
            }
            entries.insert(name, 0.0);
        }
        if entries.len() > u32::MAX as usize {
            return Err(GridError::invalid(format!(
                "species count {} exceeds u32::MAX",
                entries.len()
            )));
        }
        Ok(Self { entries })
    }

    /// Number of registered species.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no species are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a name to its slot.
    pub fn id(&self, name: &str) -> Result<SpeciesId, GridError> {
        self.entries
            .get_index_of(name)
            .map(|i| SpeciesId(i as u32))
            .ok_or_else(|| GridError::UnknownSpecies {
                name: name.to_string(),
            })
    }

    /// Names in slot order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Current diffusion coefficient of `name`.
    pub fn coefficient(&self, name: &str) -> Result<f64, GridError> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| GridError::UnknownSpecies {
                name: name.to_string(),
            })
    }

    /// Set the diffusion coefficient of `name`.
    ///
    /// Zero and negative values are stored as given; the diffusion step
    /// treats any non-positive coefficient as immobile. Non-finite values
    /// are rejected with `InvalidParameter`; unknown names with
    /// `UnknownSpecies`.
    pub fn set_coefficient(&mut self, name: &str, d: f64) -> Result<(), GridError> {
        if !d.is_finite() {
            return Err(GridError::invalid(format!(
                "diffusion coefficient for '{name}' must be finite, got {d}"
            )));
        }
        match self.entries.get_mut(name) {
            Some(slot) => {
                *slot = d;
                Ok(())
            }
            None => Err(GridError::UnknownSpecies {
                name: name.to_string(),
            }),
        }
    }

    /// `(id, name, coefficient)` triples in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &str, f64)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (n, &d))| (SpeciesId(i as u32), n.as_str(), d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slots_follow_input_order() {
        let reg = SpeciesRegistry::new(["a", "b", "c"]).unwrap();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.id("a").unwrap(), SpeciesId(0));
        assert_eq!(reg.id("c").unwrap(), SpeciesId(2));
        assert_eq!(reg.id("b").unwrap(), SpeciesId(1));
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_registry_is_allowed() {
        let reg = SpeciesRegistry::new(Vec::<String>::new()).unwrap();
        assert!(reg.is_empty());
        assert!(matches!(
            reg.id("AHL"),
            Err(GridError::UnknownSpecies { .. })
        ));
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = SpeciesRegistry::new(["AHL", "LuxR", "AHL"]).unwrap_err();
        match err {
            GridError::InvalidParameter { reason } => assert!(reason.contains("AHL")),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn coefficients_default_to_zero_and_update() {
        let mut reg = SpeciesRegistry::new(["AHL"]).unwrap();
        assert_eq!(reg.coefficient("AHL").unwrap(), 0.0);
        reg.set_coefficient("AHL", 0.5).unwrap();
        assert_eq!(reg.coefficient("AHL").unwrap(), 0.5);
        assert_eq!(reg.iter().next(), Some((SpeciesId(0), "AHL", 0.5)));

        // Negative values are stored; they mean "immobile" downstream.
        reg.set_coefficient("AHL", -1.0).unwrap();
        assert_eq!(reg.coefficient("AHL").unwrap(), -1.0);
    }

    #[test]
    fn set_coefficient_rejects_unknown_and_non_finite() {
        let mut reg = SpeciesRegistry::new(["AHL"]).unwrap();
        assert!(matches!(
            reg.set_coefficient("GFP", 1.0),
            Err(GridError::UnknownSpecies { .. })
        ));
        assert!(matches!(
            reg.set_coefficient("AHL", f64::NAN),
            Err(GridError::InvalidParameter { .. })
        ));
        assert!(matches!(
            reg.set_coefficient("AHL", f64::INFINITY),
            Err(GridError::InvalidParameter { .. })
        ));
        assert_eq!(reg.coefficient("AHL").unwrap(), 0.0);
    }

    proptest! {
        #[test]
        fn distinct_names_roundtrip_through_ids(
            names in prop::collection::hash_set("[a-z]{1,6}", 0..12),
        ) {
            let names: Vec<String> = names.into_iter().collect();
            let reg = SpeciesRegistry::new(names.clone()).unwrap();
            prop_assert_eq!(reg.len(), names.len());
            for (i, n) in names.iter().enumerate() {
                let id = reg.id(n).unwrap();
                prop_assert_eq!(id.index(), i);
                prop_assert_eq!(reg.name(id), Some(n.as_str()));
            }
        }
    }
}
