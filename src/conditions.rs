#![allow(non_upper_case_globals, non_camel_case_types)]

use crate::caller::Caller;
use crate::path::{FieldPath, Relation};
use crate::record;
use serde_json::Value;
pub use self::user_defined::*;

/// Whether a check is about reading a field or writing it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    View,
    Edit
}

#[derive(Debug)]
pub enum Conditions {
    anyone,
    nobody, // Closes a capability or a field block off entirely.
    all(&'static [Conditions]),
    any(&'static [Conditions]),
    has_role(Role), // That one is sufficiently privileged.
    is(Role), // Exactly that role, rank doesn't matter.
    parent_of, // The record lists the caller as a parent.
    instructor_of // The record is assigned to the caller's instructor id.
}

/// A field rule. Paths are compared segment by segment, never as strings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    exact(&'static str),
    subtree(&'static str),
    everything
}

/// Everything a role is allowed to do with the fields of a record.
#[derive(Debug)]
pub struct FieldPolicy {
    /// Relationship the caller needs with the record before any rule applies.
    pub gate: Conditions,
    pub view: &'static [Rule],
    pub hide: &'static [Rule],
    pub edit: &'static [Rule],
    pub lock: &'static [Rule]
}

/// What a condition gets to look at.
pub struct Context<'a> {
    pub caller: &'a Caller,
    /// The record that decides ownership, if there is one.
    pub owner: Option<&'a Value>
}

impl<'a> Context<'a> {
    pub fn new(caller: &'a Caller, owner: Option<&'a Value>) -> Context<'a> {
        Context {
            caller: caller,
            owner: owner
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.caller.role.known()
    }

    pub fn parent(&self) -> bool {
        match self.owner {
            Some(owner) => record::has_parent(owner, &self.caller.id),
            None => false
        }
    }

    pub fn instructor(&self) -> bool {
        let mine = match self.caller.instructor_id {
            Some(ref id) if !id.is_empty() => id.as_str(),
            _ => return false
        };

        self.owner
            .and_then(record::instructor_id)
            .map_or(false, |theirs| theirs == mine)
    }
}

impl Conditions {
    pub fn check(&self, ctx: &Context) -> bool {
        use self::Conditions::*;

        match self {
            &anyone =>
                true,
            &nobody =>
                false,
            &all(ref parts) =>
                parts.iter().all(|x| x.check(ctx)),
            &any(ref parts) =>
                parts.iter().any(|x| x.check(ctx)),
            &has_role(minimum) =>
                ctx.role().map_or(false, |role| role.rank() >= minimum.rank()),
            &is(role) =>
                ctx.role() == Some(role),
            &parent_of =>
                ctx.parent(),
            &instructor_of =>
                ctx.instructor()
        }
    }
}

impl Rule {
    /// The rule covers `path` itself.
    pub fn matches(&self, path: &FieldPath) -> bool {
        use self::Rule::*;

        match *self {
            exact(rule) => path.relation(rule) == Relation::Equal,
            subtree(rule) => match path.relation(rule) {
                Relation::Equal | Relation::Below => true,
                _ => false
            },
            everything => true
        }
    }

    /// The rule names something strictly inside `path`, so handing out
    /// `path` whole would hand that out too.
    pub fn beneath(&self, path: &FieldPath) -> bool {
        use self::Rule::*;

        match *self {
            exact(rule) | subtree(rule) => path.relation(rule) == Relation::Above,
            everything => false
        }
    }
}

impl FieldPolicy {
    pub fn rules(&self, op: Operation) -> (&'static [Rule], &'static [Rule]) {
        match op {
            Operation::View => (self.view, self.hide),
            Operation::Edit => (self.edit, self.lock)
        }
    }

    /// Deny always wins over allow, whatever order the lists are in.
    pub fn permits(&self, op: Operation, path: &FieldPath) -> bool {
        let (allow, deny) = self.rules(op);

        if deny.iter().any(|x| x.matches(path) || x.beneath(path)) {
            return false;
        }

        allow.iter().any(|x| x.matches(path))
    }
}

// Credit goes to [@krdln](users.rust-lang.org/users/krdln).
macro_rules! cond {
    // end recursion
    (@array $array:tt {}) => {
        $array
    };

    // parse comma (and run nested cond!)
    (@array [ $($array:tt)* ] { $($current:tt)* } , $($tail:tt)*) => {
        cond!(@array [ $($array)* cond!($($current)*) , ] {} $($tail)* )
    };

    // parse anything else
    (@array $array:tt { $($current:tt)* } $x:tt $($tail:tt)*) => {
        cond!(@array $array { $($current)* $x } $($tail)* )
    };

    // add trailing comma
    (@array $array:tt $current:tt) => {
        cond!(@array $array $current ,)
    };

    (all( $($tt:tt)* )) => {
        all(&cond!( @array [] {} $($tt)* ))
    };
    (any( $($tt:tt)* )) => {
        any(&cond!( @array [] {} $($tt)* ))
    };
    ($x:expr) => {
        $x
    };
}

macro_rules! permissions {
    ([ $( $a:ident = $b:tt )|* ]
     $( [ $x:ident $($y:tt)* ] )*
     $( { $role:ident when $gate:tt
          view [ $($view:expr),* $(,)* ]
          hide [ $($hide:expr),* $(,)* ]
          edit [ $($edit:expr),* $(,)* ]
          lock [ $($lock:expr),* $(,)* ] } )*) => {
        use $crate::conditions::{Conditions, FieldPolicy};
        use $crate::conditions::Conditions::*;
        use $crate::conditions::Rule::*;
        use self::Role::*;

        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
        pub enum Role {
            $($a = $b),*
        }

        pub static ROLES: &'static [Role] = &[$($a),*];

        impl Role {
            pub fn name(self) -> &'static str {
                match self {
                    $($a => stringify!($a)),*
                }
            }

            pub fn rank(self) -> i64 {
                self as i64
            }

            pub fn from_name(name: &str) -> Option<Role> {
                match name {
                    $(stringify!($a) => Some($a),)*
                    _ => None
                }
            }
        }

        $( pub const $x : Conditions = cond!( $($y)* ); )*

        /// Field rules for a role. Roles without an entry get none.
        pub fn field_policy(role: Role) -> Option<&'static FieldPolicy> {
            match role {
                $($role => {
                    static POLICY: FieldPolicy = FieldPolicy {
                        gate: cond!($gate),
                        view: &[$($view),*],
                        hide: &[$($hide),*],
                        edit: &[$($edit),*],
                        lock: &[$($lock),*]
                    };
                    Some(&POLICY)
                })*
                _ => None
            }
        }
    };
}

mod user_defined {
    #![forbid(dead_code)]
    include!(concat!(env!("CARGO_MANIFEST_DIR"), "/permissions.rs"));
}
