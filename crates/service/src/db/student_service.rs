use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::errors::ServiceError;
use models::student::{self, Entity as StudentEntity};

/// List every student. Order is whatever the store yields.
pub async fn list_students(db: &DatabaseConnection) -> Result<Vec<student::Model>, ServiceError> {
    let rows = StudentEntity::find().all(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Create a student after validation. The store assigns the id.
pub async fn create_student(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    email: &str,
    major: Option<&str>,
    gpa: Option<f64>,
) -> Result<student::Model, ServiceError> {
    // gpa range validation lives in models::student
    let created = student::create(db, first_name, last_name, email, major, gpa).await?;
    Ok(created)
}

/// Get a student by id.
pub async fn get_student(db: &DatabaseConnection, id: i32) -> Result<Option<student::Model>, ServiceError> {
    let found = StudentEntity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Replace every mutable field of a student. Supplying `major`/`gpa` as
/// absent clears them; nothing is merged with prior values.
pub async fn update_student(
    db: &DatabaseConnection,
    id: i32,
    first_name: &str,
    last_name: &str,
    email: &str,
    major: Option<&str>,
    gpa: Option<f64>,
) -> Result<student::Model, ServiceError> {
    student::validate_gpa(gpa)?;
    let current = StudentEntity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Err(ServiceError::not_found("student")); };
    let mut am: student::ActiveModel = existing.into();
    am.first_name = Set(first_name.to_string());
    am.last_name = Set(last_name.to_string());
    am.email = Set(email.to_string());
    am.major = Set(major.map(|s| s.to_string()));
    am.gpa = Set(gpa);
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Delete a student; returns true if a row was removed.
pub async fn delete_student(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let deleted = student::hard_delete(db, id).await?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn student_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let a = create_student(&db, "Ada", "Lovelace", "ada@x.io", Some("Mathematics"), Some(3.9)).await?;
        let found = get_student(&db, a.id).await?.unwrap();
        assert_eq!(found.first_name, "Ada");
        assert_eq!(found.gpa, Some(3.9));

        let updated = update_student(&db, a.id, "A", "L", "a@l.io", None, None).await?;
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.first_name, "A");
        assert_eq!(updated.email, "a@l.io");
        // full replacement: optional fields supplied as absent come back absent
        assert!(updated.major.is_none());
        assert!(updated.gpa.is_none());

        let list_all = list_students(&db).await?;
        assert_eq!(list_all.len(), 1);
        assert!(list_all.iter().any(|x| x.id == a.id));

        let deleted = delete_student(&db, a.id).await?;
        assert!(deleted);
        let after = get_student(&db, a.id).await?;
        assert!(after.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_gpa() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let err = create_student(&db, "Bob", "Smith", "bob@example.com", None, Some(4.5))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        // rejected record must not show up in list()
        let all = list_students(&db).await?;
        assert!(all.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_student_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let err = update_student(&db, 9999, "A", "L", "a@l.io", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        Ok(())
    }

    #[tokio::test]
    async fn update_validates_before_writing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let a = create_student(&db, "Ada", "Lovelace", "ada@x.io", None, Some(3.0)).await?;
        let err = update_student(&db, a.id, "Ada", "Lovelace", "ada@x.io", None, Some(9.9))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        // prior state untouched
        let found = get_student(&db, a.id).await?.unwrap();
        assert_eq!(found.gpa, Some(3.0));

        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_student_reports_false() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let deleted = delete_student(&db, 123).await?;
        assert!(!deleted);
        Ok(())
    }
}
