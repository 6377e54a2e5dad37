//! The closed set of route segment names the admin panel knows about.
//!
//! Top-level modules and sub-modules live in separate namespaces: a name is
//! only unique within its own namespace, and the router decodes each path
//! position independently.

use std::fmt;

use serde::Serialize;

/// Which path position a segment name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// First path segment (`masters`, `admins`, `em-masters`).
    Module,
    /// Second path segment (`continents`, `user-type`, ...).
    SubModule,
}

/// A known route segment, addressed by its symbolic name in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteKey {
    Masters,
    Admins,
    EmMasters,
    Continents,
    Countries,
    States,
    Districts,
    Cities,
    Sites,
    Plants,
    Equipment,
    EquipmentTypes,
    Vehicles,
    VehicleTypes,
    Users,
    UserType,
    Roles,
    Permissions,
    Departments,
    Designations,
}

impl RouteKey {
    /// Every key, modules first.
    pub const ALL: [Self; 20] = [
        Self::Masters,
        Self::Admins,
        Self::EmMasters,
        Self::Continents,
        Self::Countries,
        Self::States,
        Self::Districts,
        Self::Cities,
        Self::Sites,
        Self::Plants,
        Self::Equipment,
        Self::EquipmentTypes,
        Self::Vehicles,
        Self::VehicleTypes,
        Self::Users,
        Self::UserType,
        Self::Roles,
        Self::Permissions,
        Self::Departments,
        Self::Designations,
    ];

    /// Symbolic name used by link-building code, e.g. `encContinents`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Masters => "encMasters",
            Self::Admins => "encAdmins",
            Self::EmMasters => "encEmMasters",
            Self::Continents => "encContinents",
            Self::Countries => "encCountries",
            Self::States => "encStates",
            Self::Districts => "encDistricts",
            Self::Cities => "encCities",
            Self::Sites => "encSites",
            Self::Plants => "encPlants",
            Self::Equipment => "encEquipment",
            Self::EquipmentTypes => "encEquipmentTypes",
            Self::Vehicles => "encVehicles",
            Self::VehicleTypes => "encVehicleTypes",
            Self::Users => "encUsers",
            Self::UserType => "encUserType",
            Self::Roles => "encRoles",
            Self::Permissions => "encPermissions",
            Self::Departments => "encDepartments",
            Self::Designations => "encDesignations",
        }
    }

    /// Plain segment name as it appears after decoding.
    pub fn plain(self) -> &'static str {
        match self {
            Self::Masters => "masters",
            Self::Admins => "admins",
            Self::EmMasters => "em-masters",
            Self::Continents => "continents",
            Self::Countries => "countries",
            Self::States => "states",
            Self::Districts => "districts",
            Self::Cities => "cities",
            Self::Sites => "sites",
            Self::Plants => "plants",
            Self::Equipment => "equipment",
            Self::EquipmentTypes => "equipment-types",
            Self::Vehicles => "vehicles",
            Self::VehicleTypes => "vehicle-types",
            Self::Users => "users",
            Self::UserType => "user-type",
            Self::Roles => "roles",
            Self::Permissions => "permissions",
            Self::Departments => "departments",
            Self::Designations => "designations",
        }
    }

    pub fn namespace(self) -> Namespace {
        match self {
            Self::Masters | Self::Admins | Self::EmMasters => Namespace::Module,
            _ => Namespace::SubModule,
        }
    }

    /// Find a key by its symbolic name.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.symbol() == symbol)
    }

    /// Find the key for a decoded plain name in a given path position.
    pub fn lookup(namespace: Namespace, plain: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.namespace() == namespace && k.plain() == plain)
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
