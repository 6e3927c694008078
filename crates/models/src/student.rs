use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const GPA_MIN: f64 = 0.0;
pub const GPA_MAX: f64 = 4.0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub major: Option<String>,
    pub gpa: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Reject a gpa outside the allowed range. Absent gpa is fine.
pub fn validate_gpa(gpa: Option<f64>) -> Result<(), ModelError> {
    match gpa {
        Some(g) if !(GPA_MIN..=GPA_MAX).contains(&g) => Err(ModelError::Validation(format!(
            "gpa {} outside allowed range {}..={}",
            g, GPA_MIN, GPA_MAX
        ))),
        _ => Ok(()),
    }
}

pub async fn create(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    email: &str,
    major: Option<&str>,
    gpa: Option<f64>,
) -> Result<Model, ModelError> {
    validate_gpa(gpa)?;
    let am = ActiveModel {
        id: NotSet,
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        email: Set(email.to_string()),
        major: Set(major.map(|s| s.to_string())),
        gpa: Set(gpa),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
