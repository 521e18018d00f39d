//! Idols service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::idols::{
        data::{IdolUpdate, NewIdol},
        errors::IdolsServiceError,
        records::IdolRecord,
        repository::PgIdolsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgIdolsService {
    db: Db,
    repository: PgIdolsRepository,
}

impl PgIdolsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgIdolsRepository::new(),
        }
    }
}

#[async_trait]
impl IdolsService for PgIdolsService {
    async fn list_idols(&self) -> Result<Vec<IdolRecord>, IdolsServiceError> {
        let mut tx = self.db.begin().await?;

        let idols = self.repository.list_idols(&mut tx).await?;

        tx.commit().await?;

        Ok(idols)
    }

    async fn get_idol(&self, id: i64) -> Result<IdolRecord, IdolsServiceError> {
        let mut tx = self.db.begin().await?;

        let idol = self.repository.get_idol(&mut tx, id).await?;

        tx.commit().await?;

        Ok(idol)
    }

    async fn create_idol(&self, idol: NewIdol) -> Result<IdolRecord, IdolsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_idol(&mut tx, &idol).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_idol(
        &self,
        id: i64,
        update: IdolUpdate,
    ) -> Result<IdolRecord, IdolsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_idol(&mut tx, id, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_idol(&self, id: i64, deleted_by: &str) -> Result<(), IdolsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_idol(&mut tx, id, deleted_by).await?;

        if rows_affected == 0 {
            return Err(IdolsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait IdolsService: Send + Sync {
    /// Retrieves all live idols ordered by id.
    async fn list_idols(&self) -> Result<Vec<IdolRecord>, IdolsServiceError>;

    /// Retrieve a single live idol.
    async fn get_idol(&self, id: i64) -> Result<IdolRecord, IdolsServiceError>;

    /// Creates a new idol.
    async fn create_idol(&self, idol: NewIdol) -> Result<IdolRecord, IdolsServiceError>;

    /// Replaces an idol's fields and bumps its version.
    async fn update_idol(
        &self,
        id: i64,
        update: IdolUpdate,
    ) -> Result<IdolRecord, IdolsServiceError>;

    /// Soft-deletes an idol.
    async fn delete_idol(&self, id: i64, deleted_by: &str) -> Result<(), IdolsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_idol(name: &str) -> NewIdol {
        NewIdol {
            name: name.to_string(),
            group: "TWICE".to_string(),
            position: "Leader".to_string(),
            created_by: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn migrations_seed_two_idols() -> TestResult {
        let ctx = TestContext::new().await;

        let idols = ctx.idols.list_idols().await?;
        let names: Vec<_> = idols.iter().map(|idol| idol.name.as_str()).collect();

        assert_eq!(names, vec!["Jisung", "Karina"]);

        Ok(())
    }

    #[tokio::test]
    async fn create_idol_records_author_and_version() -> TestResult {
        let ctx = TestContext::new().await;

        let idol = ctx.idols.create_idol(new_idol("Jihyo")).await?;

        assert_eq!(idol.name, "Jihyo");
        assert_eq!(idol.group, "TWICE");
        assert_eq!(idol.position, "Leader");
        assert_eq!(idol.created_by, "alice");
        assert_eq!(idol.updated_by, "alice");
        assert_eq!(idol.version, 1);
        assert!(idol.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_idol_returns_created_idol() -> TestResult {
        let ctx = TestContext::new().await;
        let created = ctx.idols.create_idol(new_idol("Nayeon")).await?;

        let idol = ctx.idols.get_idol(created.id).await?;

        assert_eq!(idol, created);

        Ok(())
    }

    #[tokio::test]
    async fn get_idol_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.idols.get_idol(i64::MAX).await;

        assert!(
            matches!(result, Err(IdolsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_idol_blank_name_is_invalid() {
        let ctx = TestContext::new().await;

        let result = ctx.idols.create_idol(new_idol("   ")).await;

        assert!(
            matches!(result, Err(IdolsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_idol_overlong_name_is_invalid() {
        let ctx = TestContext::new().await;

        let result = ctx.idols.create_idol(new_idol(&"x".repeat(101))).await;

        assert!(
            matches!(result, Err(IdolsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_idol_bumps_version() -> TestResult {
        let ctx = TestContext::new().await;
        let created = ctx.idols.create_idol(new_idol("Momo")).await?;

        let updated = ctx
            .idols
            .update_idol(
                created.id,
                IdolUpdate {
                    name: "Momo".to_string(),
                    group: "TWICE".to_string(),
                    position: "Main Dancer".to_string(),
                    updated_by: "bob".to_string(),
                },
            )
            .await?;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.position, "Main Dancer");
        assert_eq!(updated.created_by, "alice");
        assert_eq!(updated.updated_by, "bob");
        assert_eq!(updated.version, 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_idol_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .idols
            .update_idol(
                i64::MAX,
                IdolUpdate {
                    name: "Sana".to_string(),
                    group: "TWICE".to_string(),
                    position: "Vocalist".to_string(),
                    updated_by: "bob".to_string(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(IdolsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_idol_hides_it_from_reads() -> TestResult {
        let ctx = TestContext::new().await;
        let created = ctx.idols.create_idol(new_idol("Mina")).await?;

        ctx.idols.delete_idol(created.id, "alice").await?;

        let result = ctx.idols.get_idol(created.id).await;

        assert!(
            matches!(result, Err(IdolsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let listed = ctx.idols.list_idols().await?;

        assert!(listed.iter().all(|idol| idol.id != created.id));

        Ok(())
    }

    #[tokio::test]
    async fn delete_idol_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let created = ctx.idols.create_idol(new_idol("Tzuyu")).await?;

        ctx.idols.delete_idol(created.id, "alice").await?;

        let result = ctx.idols.delete_idol(created.id, "alice").await;

        assert!(
            matches!(result, Err(IdolsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
