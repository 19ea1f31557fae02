use serde::Serialize;
use sqlx::FromRow;

use super::definition::BehaviorDefinition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub user_id: i64,
}

impl Subject {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectWithDefinitions {
    #[serde(flatten)]
    pub subject: Subject,
    pub definitions: Vec<BehaviorDefinition>,
}

impl SubjectWithDefinitions {
    /// Attach each definition to its subject, keeping both orders intact.
    pub fn group(subjects: Vec<Subject>, definitions: Vec<BehaviorDefinition>) -> Vec<Self> {
        let mut grouped: Vec<Self> = subjects
            .into_iter()
            .map(|subject| Self { subject, definitions: Vec::new() })
            .collect();

        for definition in definitions {
            if let Some(entry) = grouped.iter_mut().find(|s| s.subject.id == definition.subject_id) {
                entry.definitions.push(definition);
            }
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(id: i64) -> Subject {
        Subject { id, name: format!("s{}", id), description: None, user_id: 1 }
    }

    fn definition(id: i64, subject_id: i64) -> BehaviorDefinition {
        BehaviorDefinition { id, name: format!("d{}", id), description: None, subject_id }
    }

    #[test]
    fn group_attaches_definitions_in_order() {
        let grouped = SubjectWithDefinitions::group(
            vec![subject(1), subject(2), subject(3)],
            vec![definition(10, 2), definition(11, 1), definition(12, 2), definition(13, 99)],
        );

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].definitions.iter().map(|d| d.id).collect::<Vec<_>>(), vec![11]);
        assert_eq!(grouped[1].definitions.iter().map(|d| d.id).collect::<Vec<_>>(), vec![10, 12]);
        assert!(grouped[2].definitions.is_empty());
    }

    #[test]
    fn serializes_flat_with_definitions() {
        let value = serde_json::to_value(SubjectWithDefinitions {
            subject: subject(1),
            definitions: vec![definition(5, 1)],
        })
        .unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "s1");
        assert!(value["description"].is_null());
        assert_eq!(value["definitions"][0]["subject_id"], 1);
    }

    #[test]
    fn ownership() {
        assert!(subject(1).is_owned_by(1));
        assert!(!subject(1).is_owned_by(2));
    }
}
