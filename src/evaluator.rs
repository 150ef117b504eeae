use crate::caller::Caller;
use crate::conditions::{self, Context, Operation, Role};
use crate::config::Config;
use crate::path::FieldPath;
use crate::record;
use crate::redact;
use serde_json::Value;
use std::{error, fmt};

/// Coarse flags for a whole kind of record. Fixed by role.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_view: bool
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Kid,
    Vehicle
}

impl RecordKind {
    /// Where this kind's fields sit in the rule tables.
    pub fn namespace(self) -> Option<&'static str> {
        match self {
            RecordKind::Kid => None,
            RecordKind::Vehicle => Some("vehicle")
        }
    }

    pub fn qualify(self, path: &FieldPath) -> FieldPath {
        match self.namespace() {
            Some(namespace) => path.under(namespace),
            None => path.clone()
        }
    }
}

/// The record a decision is about.
#[derive(Copy, Clone, Debug)]
pub struct Target<'a> {
    pub record: &'a Value,
    pub kind: RecordKind,
    /// The record ownership is read from. For kids this is the record
    /// itself; a vehicle is owned through the kid it's assigned to.
    pub owner: &'a Value
}

impl<'a> Target<'a> {
    pub fn kid(record: &'a Value) -> Target<'a> {
        Target::of(record, RecordKind::Kid)
    }

    /// Without a kid, the vehicle's own `parentInfo` and `instructorId`
    /// decide ownership.
    pub fn vehicle(vehicle: &'a Value, kid: Option<&'a Value>) -> Target<'a> {
        Target {
            record: vehicle,
            kind: RecordKind::Vehicle,
            owner: kid.unwrap_or(vehicle)
        }
    }

    pub fn of(record: &'a Value, kind: RecordKind) -> Target<'a> {
        Target {
            record: record,
            kind: kind,
            owner: record
        }
    }
}

/// A write that would touch fields the caller may not change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Denied {
    pub operation: Operation,
    /// Offending paths, sorted. Empty when the change set wasn't an object.
    pub paths: Vec<String>
}

impl fmt::Display for Denied {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let operation = match self.operation {
            Operation::View => "view",
            Operation::Edit => "edit"
        };

        if self.paths.is_empty() {
            write!(f, "{} denied: change set is not an object", operation)
        } else {
            write!(f, "{} denied for {}", operation, self.paths.join(", "))
        }
    }
}

impl error::Error for Denied {}

/// Answers access questions for one session.
///
/// Holds nothing but the caller and the flags worked out from its role, so
/// a single instance can be shared between threads freely. Nothing here
/// fails: missing records, missing links and malformed paths are all
/// plain denials.
#[derive(Clone, Debug)]
pub struct Evaluator {
    caller: Caller,
    capabilities: Capabilities
}

impl Evaluator {
    pub fn new(caller: Caller) -> Evaluator {
        let capabilities = {
            let ctx = Context::new(&caller, None);
            Capabilities {
                can_create: conditions::create_record.check(&ctx),
                can_edit: conditions::edit_record.check(&ctx),
                can_delete: conditions::delete_record.check(&ctx),
                can_view: conditions::view_record.check(&ctx)
            }
        };

        Evaluator {
            caller: caller,
            capabilities: capabilities
        }
    }

    pub fn from_session(id: &str, attrs: &Value, config: &Config) -> Evaluator {
        Evaluator::new(Caller::from_session(id, attrs, config))
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn is_admin(&self) -> bool {
        self.caller.role.known() == Some(Role::admin)
    }

    /// Whether the caller may see that the kid exists at all.
    pub fn can_view_kid(&self, kid: &Value) -> bool {
        self.can_view_record(&Target::kid(kid))
    }

    pub fn can_view_record(&self, target: &Target) -> bool {
        conditions::view_kid.check(&Context::new(&self.caller, Some(target.owner)))
    }

    pub fn can_view_field(&self, path: &str, target: &Target) -> bool {
        self.can(Operation::View, path, target)
    }

    pub fn can_edit_field(&self, path: &str, target: &Target) -> bool {
        self.can(Operation::Edit, path, target)
    }

    /// `path` is relative to the target record, e.g. `batteryType` for a
    /// vehicle rather than `vehicle.batteryType`.
    pub fn can(&self, op: Operation, path: &str, target: &Target) -> bool {
        match FieldPath::parse(path) {
            Ok(path) => self.allows(op, &path, target),
            Err(_) if self.is_admin() => true,
            Err(e) => {
                debug!("Refusing {:?} on {:?}: {}.", op, path, e);
                false
            }
        }
    }

    /// The check behind every field decision. Admins always pass; everyone
    /// else needs a record and its owner to be objects.
    pub fn allows(&self, op: Operation, path: &FieldPath, target: &Target) -> bool {
        if self.is_admin() {
            return true;
        }

        if !target.record.is_object() || !target.owner.is_object() {
            trace!("{:?} {} on a missing record -> false.", op, path);
            return false;
        }

        self.decide(op, &target.kind.qualify(path), target)
    }

    // `path` is already qualified with the target's namespace.
    fn decide(&self, op: Operation, path: &FieldPath, target: &Target) -> bool {
        let role = match self.caller.role.known() {
            Some(role) => role,
            None => return false
        };

        let policy = match conditions::field_policy(role) {
            Some(policy) => policy,
            None => return false
        };

        let ctx = Context::new(&self.caller, Some(target.owner));
        let allowed = policy.gate.check(&ctx) && policy.permits(op, path);

        trace!("{} {:?} {} -> {}.", role.name(), op, path, allowed);
        allowed
    }

    /// A copy of the target record with everything the caller can't view
    /// taken out.
    pub fn filter(&self, target: &Target) -> Value {
        if self.is_admin() {
            return target.record.clone();
        }

        redact::redact(target.record, |path| self.allows(Operation::View, path, target))
    }

    /// The records the caller may see, each one filtered.
    pub fn visible(&self, records: &[Value], kind: RecordKind) -> Vec<Value> {
        records.iter()
            .map(|record| Target::of(record, kind))
            .filter(|target| self.can_view_record(target))
            .map(|target| self.filter(&target))
            .collect()
    }

    /// Checks every field a change set would write. All of them have to be
    /// editable; the error lists each one that isn't.
    pub fn check_edit(&self, target: &Target, changes: &Value) -> Result<(), Denied> {
        if self.is_admin() {
            return Ok(());
        }

        if !changes.is_object() {
            return Err(Denied {
                operation: Operation::Edit,
                paths: Vec::new()
            });
        }

        let (paths, mut denied) = record::leaves(changes);
        denied.extend(paths.iter()
            .filter(|path| !self.allows(Operation::Edit, path, target))
            .map(ToString::to_string));

        if denied.is_empty() {
            return Ok(());
        }

        denied.sort();
        denied.dedup();
        debug!("User {} may not edit {}.", self.caller.id, denied.join(", "));

        Err(Denied {
            operation: Operation::Edit,
            paths: denied
        })
    }
}
