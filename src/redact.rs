use crate::path::FieldPath;
use serde_json::{Map, Value};

/// Copies `record`, keeping only what `visible` lets through.
///
/// The walk follows the record's own keys, so a field nobody wrote a rule
/// for is dropped rather than leaked. A visible field is kept whole. An
/// object that isn't visible is walked and always kept, possibly empty, so
/// the dashboards can still index into it. Anything else that isn't
/// visible is dropped. A record that isn't an object has nothing to show
/// and comes back as null.
pub fn redact<F>(record: &Value, visible: F) -> Value
    where F: Fn(&FieldPath) -> bool
{
    match record.as_object() {
        Some(map) => Value::Object(walk(map, None, &visible)),
        None => Value::Null
    }
}

fn walk<F>(map: &Map<String, Value>, base: Option<&FieldPath>, visible: &F) -> Map<String, Value>
    where F: Fn(&FieldPath) -> bool
{
    let mut out = Map::new();

    for (key, value) in map {
        let path = match base {
            Some(base) => base.child(key.as_str()),
            None => FieldPath::root(key.as_str())
        };

        if visible(&path) {
            out.insert(key.clone(), value.clone());
            continue;
        }

        if let Some(inner) = value.as_object() {
            let kept = walk(inner, Some(&path), visible);
            out.insert(key.clone(), Value::Object(kept));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn only(allowed: &'static [&'static str]) -> impl Fn(&FieldPath) -> bool {
        move |path: &FieldPath| {
            let path = path.to_string();
            allowed.iter().any(|x| *x == path)
        }
    }

    #[test]
    fn keeps_visible_subtrees_whole() {
        let record = json!({
            "personalInfo": { "firstName": "Ada", "photo": "a.png" },
            "notes": "n"
        });

        assert_eq!(
            redact(&record, only(&["personalInfo"])),
            json!({ "personalInfo": { "firstName": "Ada", "photo": "a.png" } })
        );
    }

    #[test]
    fn drops_leaves_but_keeps_emptied_objects() {
        let record = json!({
            "personalInfo": { "firstName": "Ada", "dateOfBirth": "2012-01-01" },
            "medicalInfo": { "notes": "asthma", "plan": { "dose": 2 } },
            "tags": ["a", "b"]
        });

        assert_eq!(
            redact(&record, only(&["personalInfo.firstName"])),
            json!({
                "personalInfo": { "firstName": "Ada" },
                "medicalInfo": { "plan": {} }
            })
        );
    }

    #[test]
    fn unknown_fields_do_not_leak() {
        let record = json!({ "participantNumber": 7, "secretField": "x" });
        assert_eq!(
            redact(&record, only(&["participantNumber"])),
            json!({ "participantNumber": 7 })
        );
    }

    #[test]
    fn non_objects_redact_to_null() {
        assert_eq!(redact(&json!("kid"), |_: &FieldPath| true), Value::Null);
        assert_eq!(redact(&Value::Null, |_: &FieldPath| true), Value::Null);
    }

    #[test]
    fn redacting_twice_changes_nothing() {
        let record = json!({
            "a": { "b": 1, "c": { "d": 2, "e": {} } },
            "f": {}
        });
        let visible = only(&["a.b", "a.c.e", "f"]);
        let once = redact(&record, &visible);
        assert_eq!(redact(&once, &visible), once);
        assert_eq!(once, json!({ "a": { "b": 1, "c": { "e": {} } }, "f": {} }));

        let hidden = redact(&record, only(&[]));
        assert_eq!(hidden, json!({ "a": { "c": { "e": {} } }, "f": {} }));
        assert_eq!(redact(&hidden, only(&[])), hidden);
    }
}
