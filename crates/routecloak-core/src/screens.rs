//! Static dispatch table from decoded `(master, module)` pairs to screens.
//!
//! Keyed by plain names, not tokens: the router consults it only after both
//! path segments have been decoded.

use std::collections::HashMap;

use serde::Serialize;

use crate::path::ViewMode;
use crate::vocabulary::RouteKey;

/// A list screen and its create/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenFamily {
    /// Entity name the screens are generated from, e.g. `Continent`.
    pub entity: &'static str,
    /// Human-readable title for menus and headers.
    pub title: &'static str,
}

impl ScreenFamily {
    /// Component name for a view mode: `<Entity>List` or `<Entity>Form`.
    pub fn screen_for(&self, mode: &ViewMode) -> String {
        match mode {
            ViewMode::List => format!("{}List", self.entity),
            ViewMode::New | ViewMode::Edit { .. } => format!("{}Form", self.entity),
        }
    }
}

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenEntry {
    pub master: RouteKey,
    pub module: RouteKey,
    pub family: ScreenFamily,
}

const fn entry(
    master: RouteKey,
    module: RouteKey,
    entity: &'static str,
    title: &'static str,
) -> ScreenEntry {
    ScreenEntry {
        master,
        module,
        family: ScreenFamily { entity, title },
    }
}

const ADMIN_PANEL_SCREENS: [ScreenEntry; 17] = [
    entry(RouteKey::Masters, RouteKey::Continents, "Continent", "Continents"),
    entry(RouteKey::Masters, RouteKey::Countries, "Country", "Countries"),
    entry(RouteKey::Masters, RouteKey::States, "State", "States"),
    entry(RouteKey::Masters, RouteKey::Districts, "District", "Districts"),
    entry(RouteKey::Masters, RouteKey::Cities, "City", "Cities"),
    entry(RouteKey::Masters, RouteKey::Sites, "Site", "Sites"),
    entry(RouteKey::Masters, RouteKey::Plants, "Plant", "Plants"),
    entry(RouteKey::EmMasters, RouteKey::Equipment, "Equipment", "Equipment"),
    entry(RouteKey::EmMasters, RouteKey::EquipmentTypes, "EquipmentType", "Equipment Types"),
    entry(RouteKey::EmMasters, RouteKey::Vehicles, "Vehicle", "Vehicles"),
    entry(RouteKey::EmMasters, RouteKey::VehicleTypes, "VehicleType", "Vehicle Types"),
    entry(RouteKey::Admins, RouteKey::Users, "User", "Users"),
    entry(RouteKey::Admins, RouteKey::UserType, "UserType", "User Types"),
    entry(RouteKey::Admins, RouteKey::Roles, "Role", "Roles"),
    entry(RouteKey::Admins, RouteKey::Permissions, "Permission", "Permissions"),
    entry(RouteKey::Admins, RouteKey::Departments, "Department", "Departments"),
    entry(RouteKey::Admins, RouteKey::Designations, "Designation", "Designations"),
];

/// Nested `master -> module -> screen family` lookup.
#[derive(Debug, Clone)]
pub struct ScreenTable {
    entries: Vec<ScreenEntry>,
    index: HashMap<&'static str, HashMap<&'static str, usize>>,
}

impl ScreenTable {
    /// Build a table from entries. Later duplicates of a pair win.
    pub fn new(entries: Vec<ScreenEntry>) -> Self {
        let mut index: HashMap<&'static str, HashMap<&'static str, usize>> = HashMap::new();
        for (i, e) in entries.iter().enumerate() {
            index
                .entry(e.master.plain())
                .or_default()
                .insert(e.module.plain(), i);
        }
        Self { entries, index }
    }

    /// The admin panel's master-data screens.
    pub fn admin_panel() -> Self {
        Self::new(ADMIN_PANEL_SCREENS.to_vec())
    }

    /// Look up a decoded pair.
    pub fn lookup(&self, master: &str, module: &str) -> Option<&ScreenFamily> {
        let i = *self.index.get(master)?.get(module)?;
        self.entries.get(i).map(|e| &e.family)
    }

    /// Entries in declaration order, for menu building.
    pub fn entries(&self) -> &[ScreenEntry] {
        &self.entries
    }
}

impl Default for ScreenTable {
    fn default() -> Self {
        Self::admin_panel()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::vocabulary::Namespace;

    #[test]
    fn continents_resolve_to_continent_screens() {
        let table = ScreenTable::admin_panel();
        let family = table.lookup("masters", "continents").unwrap();
        assert_eq!(family.screen_for(&ViewMode::List), "ContinentList");
        assert_eq!(family.screen_for(&ViewMode::New), "ContinentForm");
        assert_eq!(
            family.screen_for(&ViewMode::Edit { id: "1".to_owned() }),
            "ContinentForm"
        );
    }

    #[test]
    fn unknown_pairs_are_absent() {
        let table = ScreenTable::admin_panel();
        assert!(table.lookup("masters", "users").is_none());
        assert!(table.lookup("continents", "masters").is_none());
        assert!(table.lookup("nope", "continents").is_none());
    }

    #[test]
    fn entries_use_module_then_submodule_keys() {
        for e in ScreenTable::admin_panel().entries() {
            assert_eq!(e.master.namespace(), Namespace::Module);
            assert_eq!(e.module.namespace(), Namespace::SubModule);
        }
    }

    #[test]
    fn every_submodule_has_a_screen() {
        let table = ScreenTable::admin_panel();
        for key in RouteKey::ALL
            .into_iter()
            .filter(|k| k.namespace() == Namespace::SubModule)
        {
            assert!(
                table.entries().iter().any(|e| e.module == key),
                "no screen for {key}"
            );
        }
    }
}
