use std::env;

/// What a session without a role claim is treated as.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MissingRole {
    /// Read-only guest access, the dashboards' long-standing behaviour.
    Guest,
    /// No access at all.
    Deny
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub missing_role: MissingRole
}

impl Default for Config {
    fn default() -> Config {
        Config {
            missing_role: MissingRole::Guest
        }
    }
}

impl Config {
    pub fn get() -> Config {
        Config::from_vars(env::var("MISSING_ROLE").ok())
    }

    pub fn from_vars(missing_role: Option<String>) -> Config {
        let missing_role = missing_role
            .ok_or("unspecified")
            .and_then(|value| match value.trim() {
                "guest" => Ok(MissingRole::Guest),
                "none" => Ok(MissingRole::Deny),
                _ => Err("invalid")
            })
            .unwrap_or_else(|e| {
                warn!("MISSING_ROLE {}, defaulting to guest.", e);
                MissingRole::Guest
            });

        Config {
            missing_role: missing_role
        }
    }
}
