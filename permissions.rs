permissions! {
// These are the roles. Higher ranks automatically get the record
// capabilities of lower ranks, but never their field rules.
// Role names are matched exactly. "host" is read as guest, see caller.rs.
[ guest = 10 | parent = 20 | instructor = 50 | admin = 100 ]

// These are the record capabilities.
// The first bit is the capability name. Don't change this.
// Everything afterwards is the condition that needs to be met:
// - has_role(ROLE): The caller's rank needs to meet or exceed the given rank.
// - is(ROLE): The caller holds exactly that role.
// - parent_of: The record lists the caller in parentInfo.parentIds, or in
//   the older parentInfo.parentId.
// - instructor_of: The record's instructorId is the caller's instructorId.
// - any(CONDITION, ...): One or more of the given conditions needs to be met.
// - all(CONDITION, ...): All of the given conditions need to be met.
// - anyone: Use this if there are no conditions to be met.
// An unrecognized role meets none of these except anyone.

[ create_record has_role(instructor) ]
[ edit_record has_role(instructor) ]
[ delete_record has_role(admin) ]
[ view_record has_role(guest) ]

[ view_kid any(
    has_role(admin),
    all(is(parent), parent_of),
    all(is(instructor), instructor_of),
    is(guest)
) ]

// These are the field rules, one block per role. Admins don't need one.
// `when` is the relationship the caller must have with the record before
// any of the lists are looked at.
// - view / edit: what may be read / written.
// - hide / lock: what may never be read / written. These win over view and
//   edit, and also block any path that contains them.
// Rules:
// - exact("a.b"): That field and nothing else.
// - subtree("a"): That field and everything inside it.
// - everything: Every field.
// Vehicle fields live under "vehicle".

{ parent when parent_of
  view [
    exact("participantNumber"),
    exact("status"),
    exact("teamId"),
    exact("teamName"),
    subtree("personalInfo"),
    subtree("parentInfo"),
    subtree("medicalInfo"),
    subtree("comments"),
    exact("notes"),
    subtree("vehicle"),
  ]
  hide [
    exact("comments.teamLeader"),
    exact("comments.organization"),
  ]
  edit [
    exact("comments.parent"),
    exact("notes"),
    exact("personalInfo.photo"),
    exact("personalInfo.emergencyContact.phone"),
    exact("parentInfo.phone"),
    exact("parentInfo.grandparentsInfo.phone"),
  ]
  lock [] }

{ instructor when instructor_of
  view [ everything ]
  hide []
  edit [
    exact("comments.teamLeader"),
    exact("medicalInfo.notes"),
    subtree("vehicle"),
  ]
  lock [
    exact("vehicle.number"),
  ] }

{ guest when anyone
  view [
    exact("participantNumber"),
    exact("status"),
    exact("teamName"),
    exact("personalInfo.firstName"),
    exact("personalInfo.lastName"),
    exact("personalInfo.photo"),
    subtree("comments"),
    subtree("vehicle"),
  ]
  hide [
    subtree("parentInfo"),
    subtree("medicalInfo"),
    subtree("personalInfo.emergencyContact"),
    exact("personalInfo.dateOfBirth"),
    exact("personalInfo.address"),
    exact("comments.parent"),
    exact("comments.teamLeader"),
  ]
  edit [
    exact("comments.organization"),
  ]
  lock [] }
}
