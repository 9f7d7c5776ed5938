use crate::{
    error::{StaffingError, StaffingResult},
    types::RoleName,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleConfig {
    pub name: RoleName,
    /// Shifts per week one full-time occupant of this role covers.
    pub divisor: f64,
}

/// Ordered role catalog. Order drives export rows, chart series and
/// every other per-role listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCatalog(Vec<RoleConfig>);

impl RoleCatalog {
    pub fn new(roles: Vec<RoleConfig>) -> Self {
        Self(roles)
    }

    pub fn divisor(&self, role: &str) -> Option<f64> {
        self.0.iter().find(|r| r.name == role).map(|r| r.divisor)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|r| r.name == role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleConfig> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A restaurant the plan is made for. Export context only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id:   String,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RolesFile {
    roles: Vec<RoleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct LocationsFile {
    locations: Vec<Location>,
}

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub roles:     RoleCatalog,
    pub locations: Vec<Location>,
}

impl PlannerConfig {
    /// Load from the data/ directory.
    /// Without a data directory, use PlannerConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let roles_path = format!("{data_dir}/roles.json");
        let roles_content = std::fs::read_to_string(&roles_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {roles_path}: {e}"))?;
        let roles_file: RolesFile = serde_json::from_str(&roles_content)?;

        let locations_path = format!("{data_dir}/locations.json");
        let locations_content = std::fs::read_to_string(&locations_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {locations_path}: {e}"))?;
        let locations_file: LocationsFile = serde_json::from_str(&locations_content)?;

        let config = Self {
            roles:     RoleCatalog::new(roles_file.roles),
            locations: locations_file.locations,
        };
        config.validate()?;
        log::info!(
            "Loaded {} roles and {} locations from {data_dir}",
            config.roles.len(),
            config.locations.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> StaffingResult<()> {
        if self.roles.is_empty() {
            return Err(StaffingError::EmptyCatalog);
        }
        for role in self.roles.iter() {
            if !role.divisor.is_finite() || role.divisor <= 0.0 {
                return Err(StaffingError::InvalidDivisor {
                    role:    role.name.clone(),
                    divisor: role.divisor,
                });
            }
        }
        let mut names = HashSet::new();
        if let Some(dup) = self.roles.names().find(|n| !names.insert(*n)) {
            return Err(anyhow::anyhow!("Duplicate role '{dup}' in catalog").into());
        }
        if self.locations.is_empty() {
            return Err(StaffingError::NoLocations);
        }
        let mut ids = HashSet::new();
        if let Some(dup) = self.locations.iter().find(|l| !ids.insert(l.id.as_str())) {
            return Err(anyhow::anyhow!("Duplicate location id '{}'", dup.id).into());
        }
        Ok(())
    }

    /// The original seven-role catalog, before Expo, Barback and Support
    /// were added. Saved sessions from that era only carry these roles.
    pub fn legacy() -> Self {
        let mut config = Self::default();
        config.roles = RoleCatalog::new(config.roles.0.into_iter().take(7).collect());
        config
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let role = |name: &str, divisor: f64| RoleConfig {
            name: name.into(),
            divisor,
        };
        let location = |id: &str, name: &str, code: &str| Location {
            id:   id.into(),
            name: name.into(),
            code: code.into(),
        };
        Self {
            roles: RoleCatalog::new(vec![
                role("Server", 4.5),
                role("Bartender", 4.0),
                role("Host", 4.5),
                role("Busser", 4.0),
                role("Runner", 4.0),
                role("Togo", 4.0),
                role("QA", 4.0),
                role("Expo", 4.0),
                role("Barback", 4.0),
                role("Support", 4.0),
            ]),
            locations: vec![
                location("AH", "Auburn Hills", "C00605"),
                location("SH", "Shelby", "C00734"),
                location("OM", "Oakland Mall", "C00316"),
                location("RH", "Rochester Hills", "C00195"),
                location("GA", "Gratiot Ave", "C00954"),
                location("FG", "Fort Gratiot", "C01107"),
                location("WA", "Warren", "C01142"),
            ],
        }
    }
}
