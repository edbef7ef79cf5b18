//! The fifteen entity specifications
//!
//! Field lists mirror the deployed `wayanad_disaster` schema. The three log
//! tables are written by database triggers and are read-only here.

use super::{FieldKind, FieldSpec, TableSpec};
use crate::error::InputError;
use std::fmt;

const READ_ONLY_SUFFIX: &str = " (Read-only)";

/// Every table the client knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Person,
    Victim,
    Camp,
    VictimCamp,
    Supply,
    SupplyMovement,
    Donation,
    MissingPerson,
    BodyIdentification,
    RehabAllocation,
    RescueTeam,
    RescueOperation,
    ActivityLog,
    SupplyAudit,
    TransferErrorLog,
}

impl Entity {
    /// Order of the manager buttons on the main dashboard
    pub const DASHBOARD: [Entity; 15] = [
        Entity::Person,
        Entity::Victim,
        Entity::Camp,
        Entity::VictimCamp,
        Entity::Supply,
        Entity::SupplyMovement,
        Entity::Donation,
        Entity::MissingPerson,
        Entity::BodyIdentification,
        Entity::RehabAllocation,
        Entity::RescueTeam,
        Entity::RescueOperation,
        Entity::ActivityLog,
        Entity::SupplyAudit,
        Entity::TransferErrorLog,
    ];

    /// Order of the table selector in the viewer
    pub const VIEWER: [Entity; 15] = [
        Entity::Person,
        Entity::Victim,
        Entity::Camp,
        Entity::VictimCamp,
        Entity::RescueTeam,
        Entity::RescueOperation,
        Entity::Supply,
        Entity::SupplyMovement,
        Entity::Donation,
        Entity::MissingPerson,
        Entity::BodyIdentification,
        Entity::RehabAllocation,
        Entity::ActivityLog,
        Entity::SupplyAudit,
        Entity::TransferErrorLog,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            Entity::Person => "Person",
            Entity::Victim => "Victim",
            Entity::Camp => "Camp",
            Entity::VictimCamp => "Victim_Camp",
            Entity::Supply => "Supply",
            Entity::SupplyMovement => "Supply_Movement",
            Entity::Donation => "Donation",
            Entity::MissingPerson => "MissingPerson",
            Entity::BodyIdentification => "BodyIdentification",
            Entity::RehabAllocation => "RehabAllocation",
            Entity::RescueTeam => "RescueTeam",
            Entity::RescueOperation => "RescueOperation",
            Entity::ActivityLog => "Activity_Log",
            Entity::SupplyAudit => "Supply_Audit",
            Entity::TransferErrorLog => "Transfer_Error_Log",
        }
    }

    /// Trigger-populated log tables
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            Entity::ActivityLog | Entity::SupplyAudit | Entity::TransferErrorLog
        )
    }

    /// Label used on the dashboard
    pub fn menu_label(self) -> String {
        if self.is_read_only() {
            format!("{}{}", self.table_name(), READ_ONLY_SUFFIX)
        } else {
            self.table_name().to_string()
        }
    }

    /// Resolve a table name or a dashboard label
    pub fn from_label(label: &str) -> Option<Entity> {
        let name = label.trim();
        let name = name.strip_suffix(READ_ONLY_SUFFIX).unwrap_or(name).trim();
        Entity::DASHBOARD
            .into_iter()
            .find(|e| e.table_name() == name)
    }

    /// Build this entity's specification
    pub fn spec(self) -> TableSpec {
        match self {
            Entity::Person => person(),
            Entity::Victim => victim(),
            Entity::Camp => camp(),
            Entity::VictimCamp => victim_camp(),
            Entity::Supply => supply(),
            Entity::SupplyMovement => supply_movement(),
            Entity::Donation => donation(),
            Entity::MissingPerson => missing_person(),
            Entity::BodyIdentification => body_identification(),
            Entity::RehabAllocation => rehab_allocation(),
            Entity::RescueTeam => rescue_team(),
            Entity::RescueOperation => rescue_operation(),
            Entity::ActivityLog => activity_log(),
            Entity::SupplyAudit => supply_audit(),
            Entity::TransferErrorLog => transfer_error_log(),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Specification for a table name or dashboard label
pub fn spec_by_name(name: &str) -> Result<TableSpec, InputError> {
    Entity::from_label(name)
        .map(Entity::spec)
        .ok_or_else(|| InputError::UnknownManager {
            name: name.to_string(),
        })
}

const PERSON_VICTIMS: &str =
    "SELECT person_id AS id, CONCAT(person_id,' - ',name) AS label FROM Person WHERE role='victim'";
const PERSON_DONORS: &str =
    "SELECT person_id AS id, CONCAT(person_id,' - ',name) AS label FROM Person WHERE role='donor'";
const VICTIMS: &str = "SELECT victim_id AS id, victim_id AS label FROM Victim";
const CAMPS: &str = "SELECT camp_id AS id, CONCAT(camp_id,' - ',name) AS label FROM Camp";
const SUPPLIES: &str = "SELECT supply_id AS id, CONCAT(supply_id,' - ',name) AS label FROM Supply";
const MISSING: &str =
    "SELECT missing_id AS id, CONCAT(missing_id,' - ',name) AS label FROM MissingPerson";
const TEAMS: &str = "SELECT team_id AS id, CONCAT(team_id,' - ',agency) AS label FROM RescueTeam";

use FieldKind::{Boolean, Date, DateTime, Decimal, Integer, Text};

fn person() -> TableSpec {
    TableSpec::new("Person", "person_id", false)
        .field(FieldSpec::required("person_id", "Person ID", Integer))
        .field(FieldSpec::required("name", "Name", Text))
        .field(FieldSpec::optional("age", "Age", Integer))
        .field(FieldSpec::optional("gender", "Gender", FieldKind::enumeration("M,F,O")))
        .field(FieldSpec::optional("aadhar_no", "Aadhar", Text))
        .field(FieldSpec::optional("phone", "Phone", Text))
        .field(FieldSpec::required(
            "role",
            "Role",
            FieldKind::enumeration("victim,volunteer,rescuer,donor,admin"),
        ))
        .field(FieldSpec::optional("created_on", "Created On", DateTime).read_only())
}

fn victim() -> TableSpec {
    TableSpec::new("Victim", "victim_id", false)
        .field(FieldSpec::required(
            "victim_id",
            "Victim (Person ID)",
            FieldKind::reference(PERSON_VICTIMS),
        ))
        .field(FieldSpec::optional("family_id", "Family ID", Text))
        .field(FieldSpec::optional(
            "status",
            "Status",
            FieldKind::enumeration("missing,rescued,deceased,hospitalized,relocated"),
        ))
        .field(FieldSpec::optional("injuries", "Injuries", Text))
        .field(FieldSpec::optional("displaced", "Displaced", Boolean))
        .field(FieldSpec::optional("registration_date", "Reg Date", Date))
}

fn camp() -> TableSpec {
    TableSpec::new("Camp", "camp_id", true)
        .field(FieldSpec::optional("camp_id", "Camp ID (auto)", Integer).read_only())
        .field(FieldSpec::required("name", "Name", Text))
        .field(FieldSpec::optional("location", "Location", Text))
        .field(FieldSpec::optional("capacity", "Capacity", Integer))
        .field(FieldSpec::optional("established_date", "Established", Date))
        .field(FieldSpec::optional("current_occupancy", "Current Occupancy", Integer).read_only())
}

fn victim_camp() -> TableSpec {
    TableSpec::new("Victim_Camp", "vc_id", true)
        .field(FieldSpec::optional("vc_id", "VC ID (auto)", Integer).read_only())
        .field(FieldSpec::required("victim_id", "Victim", FieldKind::reference(VICTIMS)))
        .field(FieldSpec::required("camp_id", "Camp", FieldKind::reference(CAMPS)))
        .field(FieldSpec::optional("date_admitted", "Date Admitted", Date))
        .field(FieldSpec::optional("date_released", "Date Released", Date))
}

fn supply() -> TableSpec {
    TableSpec::new("Supply", "supply_id", true)
        .field(FieldSpec::optional("supply_id", "Supply ID (auto)", Integer).read_only())
        .field(FieldSpec::required("name", "Name", Text))
        .field(FieldSpec::required("quantity_on_hand", "Quantity", Integer))
        .field(FieldSpec::optional("unit", "Unit", Text))
}

fn supply_movement() -> TableSpec {
    TableSpec::new("Supply_Movement", "move_id", true)
        .field(FieldSpec::optional("move_id", "Move ID (auto)", Integer).read_only())
        .field(FieldSpec::required("supply_id", "Supply", FieldKind::reference(SUPPLIES)))
        .field(FieldSpec::optional("from_location", "From Location", Text))
        .field(FieldSpec::optional("to_camp_id", "To Camp", FieldKind::reference(CAMPS)))
        .field(FieldSpec::required("qty", "Quantity", Integer))
        .field(FieldSpec::optional(
            "moved_on",
            "Moved On (YYYY-MM-DD HH:MM:SS)",
            DateTime,
        ))
}

fn donation() -> TableSpec {
    TableSpec::new("Donation", "donation_id", true)
        .field(FieldSpec::optional("donation_id", "Donation ID (auto)", Integer).read_only())
        .field(FieldSpec::required(
            "donor_id",
            "Donor (Person)",
            FieldKind::reference(PERSON_DONORS),
        ))
        .field(FieldSpec::required("amount", "Amount", Decimal))
        .field(FieldSpec::optional("donation_type", "Type", Text))
        .field(FieldSpec::optional("date_received", "Date", Date))
        .field(FieldSpec::optional("notes", "Notes", Text))
}

fn missing_person() -> TableSpec {
    TableSpec::new("MissingPerson", "missing_id", true)
        .field(FieldSpec::optional("missing_id", "Missing ID (auto)", Integer).read_only())
        .field(FieldSpec::required("name", "Name", Text))
        .field(FieldSpec::optional("age", "Age", Integer))
        .field(FieldSpec::optional("gender", "Gender", FieldKind::enumeration("M,F,O")))
        .field(FieldSpec::optional("last_seen_location", "Last Seen Location", Text))
        .field(FieldSpec::optional("date_reported", "Date Reported", Date))
        .field(FieldSpec::optional(
            "status",
            "Status",
            FieldKind::enumeration("missing,found,identified"),
        ))
}

fn body_identification() -> TableSpec {
    TableSpec::new("BodyIdentification", "body_id", true)
        .field(FieldSpec::optional("body_id", "Body ID (auto)", Integer).read_only())
        .field(FieldSpec::optional("missing_id", "Missing Ref", FieldKind::reference(MISSING)))
        .field(FieldSpec::optional("dna_sample_id", "DNA Sample ID", Text))
        .field(FieldSpec::optional("identified", "Identified", Boolean))
        .field(FieldSpec::optional("id_date", "Identified Date", Date))
        .field(FieldSpec::optional("notes", "Notes", Text))
}

fn rehab_allocation() -> TableSpec {
    TableSpec::new("RehabAllocation", "alloc_id", true)
        .field(FieldSpec::optional("alloc_id", "Alloc ID (auto)", Integer).read_only())
        .field(FieldSpec::required("victim_id", "Victim", FieldKind::reference(VICTIMS)))
        .field(FieldSpec::optional("house_id", "House ID", Text))
        .field(FieldSpec::optional("allocation_date", "Allocation Date", Date))
        .field(FieldSpec::optional("amount_granted", "Amount Granted", Decimal))
}

fn rescue_team() -> TableSpec {
    TableSpec::new("RescueTeam", "team_id", true)
        .field(FieldSpec::optional("team_id", "Team ID (auto)", Integer).read_only())
        .field(FieldSpec::required("agency", "Agency", Text))
        .field(FieldSpec::optional("team_type", "Team Type", Text))
        .field(FieldSpec::optional("contact", "Contact", Text))
}

fn rescue_operation() -> TableSpec {
    TableSpec::new("RescueOperation", "op_id", true)
        .field(FieldSpec::optional("op_id", "Op ID (auto)", Integer).read_only())
        .field(FieldSpec::required("team_id", "Team", FieldKind::reference(TEAMS)))
        .field(FieldSpec::optional("location", "Location", Text))
        .field(FieldSpec::optional(
            "start_time",
            "Start Time (YYYY-MM-DD HH:MM:SS)",
            DateTime,
        ))
        .field(FieldSpec::optional(
            "end_time",
            "End Time (YYYY-MM-DD HH:MM:SS)",
            DateTime,
        ))
        .field(FieldSpec::optional("personnel_count", "Personnel Count", Integer))
        .field(FieldSpec::optional("notes", "Notes", Text))
}

fn activity_log() -> TableSpec {
    TableSpec::new("Activity_Log", "log_id", true)
        .read_only(true)
        .field(FieldSpec::optional("log_id", "Log ID", Integer).read_only())
        .field(FieldSpec::optional("table_name", "Table", Text).read_only())
        .field(
            FieldSpec::optional(
                "action_type",
                "Action",
                FieldKind::enumeration("INSERT,UPDATE,DELETE"),
            )
            .read_only(),
        )
        .field(FieldSpec::optional("record_id", "Record ID", Integer).read_only())
        .field(FieldSpec::optional("action_timestamp", "Timestamp", DateTime).read_only())
}

fn supply_audit() -> TableSpec {
    TableSpec::new("Supply_Audit", "audit_id", true)
        .read_only(true)
        .field(FieldSpec::optional("audit_id", "Audit ID", Integer).read_only())
        .field(FieldSpec::optional("supply_id", "Supply", Integer).read_only())
        .field(FieldSpec::optional("change_qty", "Change", Integer).read_only())
        .field(FieldSpec::optional("new_qty", "New Qty", Integer).read_only())
        .field(FieldSpec::optional("changed_on", "Changed On", DateTime).read_only())
        .field(FieldSpec::optional("reason", "Reason", Text).read_only())
}

fn transfer_error_log() -> TableSpec {
    TableSpec::new("Transfer_Error_Log", "log_id", true)
        .read_only(true)
        .field(FieldSpec::optional("log_id", "Log ID", Integer).read_only())
        .field(FieldSpec::optional("supply_id", "Supply ID", Integer).read_only())
        .field(FieldSpec::optional("requested_qty", "Requested Qty", Integer).read_only())
        .field(FieldSpec::optional("adjusted_qty", "Adjusted Qty", Integer).read_only())
        .field(FieldSpec::optional("message", "Message", Text).read_only())
        .field(FieldSpec::optional("log_time", "Log Time", DateTime).read_only())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_specification_is_valid() {
        for entity in Entity::DASHBOARD {
            let spec = entity.spec();
            assert_eq!(spec.validate(), Ok(()), "{}", entity);
            assert_eq!(spec.table, entity.table_name());
        }
    }

    #[test]
    fn dashboard_and_viewer_cover_the_same_fifteen_tables() {
        let dashboard: HashSet<_> = Entity::DASHBOARD.into_iter().collect();
        let viewer: HashSet<_> = Entity::VIEWER.into_iter().collect();
        assert_eq!(dashboard.len(), 15);
        assert_eq!(dashboard, viewer);
    }

    #[test]
    fn log_tables_are_read_only_throughout() {
        for entity in Entity::DASHBOARD {
            let spec = entity.spec();
            assert_eq!(spec.read_only, entity.is_read_only(), "{}", entity);
            if spec.read_only {
                assert!(spec.fields.iter().all(|f| f.read_only), "{}", entity);
                assert!(spec.updatable_fields().is_empty());
                assert!(spec.insertable_fields().is_empty());
            }
        }
    }

    #[test]
    fn labels_resolve_with_or_without_suffix() {
        assert_eq!(Entity::ActivityLog.menu_label(), "Activity_Log (Read-only)");
        assert_eq!(
            Entity::from_label("Supply_Audit (Read-only)"),
            Some(Entity::SupplyAudit)
        );
        assert_eq!(Entity::from_label("Victim_Camp"), Some(Entity::VictimCamp));
        assert_eq!(Entity::from_label("victim_camp"), None);
    }

    #[test]
    fn unknown_manager_is_an_input_error() {
        assert_eq!(
            spec_by_name("Shelter"),
            Err(InputError::UnknownManager {
                name: "Shelter".to_string()
            })
        );
        assert_eq!(spec_by_name("Camp").map(|s| s.primary_key), Ok("camp_id"));
    }

    #[test]
    fn victim_key_is_a_person_reference() {
        let spec = Entity::Victim.spec();
        let key = spec.get_field(spec.primary_key).unwrap();
        assert!(!spec.key_generated);
        assert!(matches!(key.kind, FieldKind::Reference { lookup } if lookup.contains("role='victim'")));
    }
}
