use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A cat as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    pub id: String,
    pub name: String,
    pub age: i32,
}

impl From<models::cat::Model> for Cat {
    fn from(m: models::cat::Model) -> Self {
        Cat { id: m.id, name: m.name, age: m.age }
    }
}

/// The two cats every fresh collection starts with.
pub fn fixtures() -> Vec<Cat> {
    vec![
        Cat { id: "0".into(), name: "sandy".into(), age: 12 },
        Cat { id: "1".into(), name: "rocky".into(), age: 8 },
    ]
}

/// A scalar the browser forms may send either as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Text(String),
}

impl Scalar {
    /// `None` for blank text; the caller treats that like an absent field.
    fn as_text(&self) -> Option<String> {
        match self {
            Scalar::Int(n) => Some(n.to_string()),
            Scalar::Text(s) if s.trim().is_empty() => None,
            Scalar::Text(s) => Some(s.trim().to_string()),
        }
    }

    fn as_age(&self) -> Option<Result<i32, ServiceError>> {
        let parsed = match self {
            Scalar::Int(n) => i32::try_from(*n).map_err(|_| ()),
            Scalar::Text(s) if s.trim().is_empty() => return None,
            Scalar::Text(s) => s.trim().parse::<i32>().map_err(|_| ()),
        };
        Some(parsed.map_err(|_| ServiceError::Validation("malformed request: age must be an integer".into())))
    }
}

/// Validated name/age pair, used for both creation and replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatFields {
    pub name: String,
    pub age: i32,
}

/// Body of `POST /cat`. Every field is optional here so that presence is
/// checked by `validate` instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCatInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<Scalar>,
}

impl CreateCatInput {
    pub fn validate(&self) -> Result<CatFields, ServiceError> {
        const MISSING: &str = "malformed request: name and age properties expected";
        let name = present_name(self.name.as_deref()).ok_or_else(|| ServiceError::Validation(MISSING.into()))?;
        let age = self
            .age
            .as_ref()
            .and_then(Scalar::as_age)
            .ok_or_else(|| ServiceError::Validation(MISSING.into()))??;
        Ok(CatFields { name, age })
    }
}

/// Body of `PUT /cat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCatInput {
    #[serde(default)]
    pub id: Option<Scalar>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<Scalar>,
}

impl UpdateCatInput {
    pub fn validate(&self) -> Result<(String, CatFields), ServiceError> {
        const MISSING: &str = "malformed request: id, name and age properties expected";
        let id = self
            .id
            .as_ref()
            .and_then(Scalar::as_text)
            .ok_or_else(|| ServiceError::Validation(MISSING.into()))?;
        let name = present_name(self.name.as_deref()).ok_or_else(|| ServiceError::Validation(MISSING.into()))?;
        let age = self
            .age
            .as_ref()
            .and_then(Scalar::as_age)
            .ok_or_else(|| ServiceError::Validation(MISSING.into()))??;
        Ok((id, CatFields { name, age }))
    }
}

fn present_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: serde_json::Value) -> Result<CatFields, ServiceError> {
        serde_json::from_value::<CreateCatInput>(body).unwrap().validate()
    }

    #[test]
    fn create_accepts_number_or_numeric_text_age() {
        assert_eq!(create(json!({"name": "mittens", "age": 3})).unwrap(), CatFields { name: "mittens".into(), age: 3 });
        assert_eq!(create(json!({"name": "mittens", "age": " 4 "})).unwrap().age, 4);
    }

    #[test]
    fn create_requires_name_and_age() {
        assert!(matches!(create(json!({"age": 3})), Err(ServiceError::Validation(_))));
        assert!(matches!(create(json!({"name": "mittens"})), Err(ServiceError::Validation(_))));
        assert!(matches!(create(json!({"name": "", "age": 3})), Err(ServiceError::Validation(_))));
        assert!(matches!(create(json!({"name": "mittens", "age": ""})), Err(ServiceError::Validation(_))));
        assert!(matches!(create(json!({"name": "mittens", "age": null})), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn create_rejects_non_integer_age() {
        let err = create(json!({"name": "mittens", "age": "three"})).unwrap_err();
        assert!(err.to_string().contains("age must be an integer"));
        assert!(create(json!({"name": "mittens", "age": 1_099_511_627_776_i64})).is_err());
    }

    #[test]
    fn zero_age_counts_as_present() {
        assert_eq!(create(json!({"name": "kitten", "age": 0})).unwrap().age, 0);
    }

    #[test]
    fn fractional_age_does_not_deserialize() {
        assert!(serde_json::from_value::<CreateCatInput>(json!({"name": "x", "age": 2.5})).is_err());
    }

    #[test]
    fn update_requires_all_three_fields() {
        let ok: UpdateCatInput = serde_json::from_value(json!({"id": 1, "name": "rocky", "age": "9"})).unwrap();
        let (id, fields) = ok.validate().unwrap();
        assert_eq!(id, "1");
        assert_eq!(fields, CatFields { name: "rocky".into(), age: 9 });

        let no_id: UpdateCatInput = serde_json::from_value(json!({"name": "rocky", "age": 9})).unwrap();
        assert!(matches!(no_id.validate(), Err(ServiceError::Validation(_))));
        let blank_id: UpdateCatInput = serde_json::from_value(json!({"id": " ", "name": "rocky", "age": 9})).unwrap();
        assert!(matches!(blank_id.validate(), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn fixtures_are_sandy_and_rocky() {
        let f = fixtures();
        assert_eq!(f.len(), 2);
        assert_eq!((f[0].id.as_str(), f[0].name.as_str(), f[0].age), ("0", "sandy", 12));
        assert_eq!((f[1].id.as_str(), f[1].name.as_str(), f[1].age), ("1", "rocky", 8));
    }
}
