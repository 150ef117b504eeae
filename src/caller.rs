use crate::conditions::Role;
use crate::config::{Config, MissingRole};
use serde_json::Value;

/// The role a session claims, as far as it could be made sense of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleClaim {
    Known(Role),
    /// Anything that isn't one of the role names. Carries what was sent,
    /// for logging. Gets no access.
    Unrecognized(String)
}

impl RoleClaim {
    /// `None` is a session without a role attribute at all.
    pub fn parse(raw: Option<&Value>, config: &Config) -> RoleClaim {
        match raw {
            None | Some(&Value::Null) => match config.missing_role {
                MissingRole::Guest => RoleClaim::Known(Role::guest),
                MissingRole::Deny => RoleClaim::Unrecognized(String::new())
            },
            Some(&Value::String(ref name)) => RoleClaim::from_name(name),
            Some(other) => RoleClaim::Unrecognized(other.to_string())
        }
    }

    pub fn from_name(name: &str) -> RoleClaim {
        // The dashboards call guests hosts.
        if name == "host" {
            return RoleClaim::Known(Role::guest);
        }

        match Role::from_name(name) {
            Some(role) => RoleClaim::Known(role),
            None => RoleClaim::Unrecognized(name.to_owned())
        }
    }

    pub fn known(&self) -> Option<Role> {
        match *self {
            RoleClaim::Known(role) => Some(role),
            RoleClaim::Unrecognized(_) => None
        }
    }
}

/// Whoever is making the request. Fixed for the length of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub id: String,
    pub role: RoleClaim,
    /// Only instructors have one.
    pub instructor_id: Option<String>
}

impl Caller {
    pub fn new<S: Into<String>>(id: S, role: Role) -> Caller {
        Caller {
            id: id.into(),
            role: RoleClaim::Known(role),
            instructor_id: None
        }
    }

    pub fn unrecognized<S: Into<String>, R: Into<String>>(id: S, raw: R) -> Caller {
        Caller {
            id: id.into(),
            role: RoleClaim::Unrecognized(raw.into()),
            instructor_id: None
        }
    }

    pub fn with_instructor_id<S: Into<String>>(mut self, id: S) -> Caller {
        self.instructor_id = Some(id.into());
        self
    }

    /// Builds a caller from the attributes stored on the user's document,
    /// e.g. `{"role": "instructor", "instructorId": "ins-4"}`.
    pub fn from_session(id: &str, attrs: &Value, config: &Config) -> Caller {
        let role = RoleClaim::parse(attrs.get("role"), config);

        if let RoleClaim::Unrecognized(ref raw) = role {
            warn!("User {} has an unrecognized role {:?}.", id, raw);
        }

        let instructor_id = attrs.get("instructorId")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Caller {
            id: id.to_owned(),
            role: role,
            instructor_id: instructor_id
        }
    }
}
