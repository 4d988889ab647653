use serde::Deserialize;
use serde_json::Value;

/// One element of the stargazers listing, in the `star+json` representation.
#[derive(Deserialize, PartialEq, Clone, Debug)]
pub struct StarEvent {
    pub starred_at: String,
    #[serde(default)]
    pub user: Option<Stargazer>,
}

#[derive(Deserialize, PartialEq, Clone, Debug)]
pub struct Stargazer {
    pub login: String,
}

#[derive(PartialEq, Eq, Copy, Clone, Default, Debug)]
pub struct RepositoryMetadata {
    pub stargazer_count: u64,
}

impl RepositoryMetadata {
    /// Reads metadata out of a repository document.
    ///
    /// Anything that is not an object, or lacks a usable `stargazer_count`,
    /// yields zero.
    pub fn from_body(body: &Value) -> Self {
        let stargazer_count = body
            .as_object()
            .and_then(|x| x.get("stargazer_count"))
            .and_then(Value::as_u64)
            .unwrap_or_default();
        Self { stargazer_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_from_body() {
        let count = |x: Value| RepositoryMetadata::from_body(&x).stargazer_count;
        assert_eq!(count(json!({"stargazer_count": 42})), 42);
        assert_eq!(count(json!({"stargazer_count": 0})), 0);
        // absent
        assert_eq!(count(json!({"stargazers_count": 42})), 0);
        // not an object
        assert_eq!(count(json!([1, 2, 3])), 0);
        assert_eq!(count(Value::Null), 0);
        // not a count
        assert_eq!(count(json!({"stargazer_count": "many"})), 0);
        assert_eq!(count(json!({"stargazer_count": -1})), 0);
    }

    #[test]
    fn test_deserialize_star_event() {
        let event: StarEvent = serde_json::from_value(json!({
            "starred_at": "2024-06-01T08:30:00Z",
            "user": {"login": "kafji", "id": 1}
        }))
        .unwrap();
        assert_eq!(
            event,
            StarEvent {
                starred_at: "2024-06-01T08:30:00Z".to_owned(),
                user: Some(Stargazer {
                    login: "kafji".to_owned()
                }),
            }
        );

        let event: StarEvent =
            serde_json::from_value(json!({"starred_at": "2024-06-01T08:30:00Z"})).unwrap();
        assert_eq!(event.user, None);
    }
}
