//! PostgreSQL implementations of the item and skill listing repositories.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::support::{column, db_error, timestamp, user_id};
use crate::domain::foundation::{
    DomainError, ErrorCode, ItemListingId, OwnedByUser, Page, PageRequest, SkillListingId,
    UserId,
};
use crate::domain::listing::{ItemDetails, ItemListing, SkillDetails, SkillListing};
use crate::ports::{ItemFilter, ItemListingRepository, SkillFilter, SkillListingRepository};

const ITEM_COLUMNS: &str = "id, owner_id, title, description, category, images, \
                            exchange_preference, available, created_at, updated_at";

const SKILL_COLUMNS: &str = "id, owner_id, title, description, availability, images, \
                             exchange_preference, active, created_at, updated_at";

fn listing_not_found(id: impl std::fmt::Display) -> DomainError {
    DomainError::not_found(ErrorCode::ListingNotFound, "Listing", id)
}

/// Which listing table a cascade starts from.
#[derive(Clone, Copy)]
enum ListingTable {
    Items,
    Skills,
}

impl ListingTable {
    fn table(self) -> &'static str {
        match self {
            ListingTable::Items => "item_listings",
            ListingTable::Skills => "skill_listings",
        }
    }

    /// Column in `exchange_requests` and `notifications` pointing at this table.
    fn reference_column(self) -> &'static str {
        match self {
            ListingTable::Items => "item_listing_id",
            ListingTable::Skills => "skill_listing_id",
        }
    }
}

/// Deletes a listing with its exchanges, their messages and reviews, and
/// clears the deep links of every notification that pointed at any of them.
async fn delete_listing_cascade(
    pool: &PgPool,
    listing: ListingTable,
    id: &Uuid,
) -> Result<bool, DomainError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| db_error("Failed to start transaction", e))?;
    let reference = listing.reference_column();

    sqlx::query(&format!(
        r#"
        UPDATE notifications
        SET exchange_id = NULL, item_listing_id = NULL, skill_listing_id = NULL
        WHERE {reference} = $1
           OR exchange_id IN (SELECT id FROM exchange_requests WHERE {reference} = $1)
        "#
    ))
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| db_error("Failed to unlink notifications", e))?;

    for dependent in ["messages", "reviews"] {
        sqlx::query(&format!(
            "DELETE FROM {dependent} WHERE exchange_id IN \
             (SELECT id FROM exchange_requests WHERE {reference} = $1)"
        ))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to delete exchange dependents", e))?;
    }

    sqlx::query(&format!(
        "DELETE FROM exchange_requests WHERE {reference} = $1"
    ))
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| db_error("Failed to delete exchange requests", e))?;

    let deleted = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", listing.table()))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to delete listing", e))?;

    if deleted.rows_affected() == 0 {
        // Dropping the transaction rolls back the unlinking above.
        return Ok(false);
    }

    tx.commit()
        .await
        .map_err(|e| db_error("Failed to commit transaction", e))?;
    Ok(true)
}

fn offset_limit(page: PageRequest) -> (i64, i64) {
    (page.offset() as i64, page.limit() as i64)
}

// ─────────────────────────────────────────────────────────────────────────────
// Items
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PostgresItemListingRepository {
    pool: PgPool,
}

impl PostgresItemListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemListingRepository for PostgresItemListingRepository {
    async fn save(&self, item: &ItemListing) -> Result<(), DomainError> {
        let details = item.details();
        sqlx::query(
            r#"
            INSERT INTO item_listings (
                id, owner_id, title, description, category, images,
                exchange_preference, available, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.owner_id().as_uuid())
        .bind(&details.title)
        .bind(&details.description)
        .bind(&details.category)
        .bind(&details.images)
        .bind(&details.exchange_preference)
        .bind(item.available())
        .bind(item.created_at().as_datetime())
        .bind(item.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert item listing", e))?;

        Ok(())
    }

    async fn update(&self, item: &ItemListing) -> Result<(), DomainError> {
        let details = item.details();
        let result = sqlx::query(
            r#"
            UPDATE item_listings SET
                title = $2,
                description = $3,
                category = $4,
                images = $5,
                exchange_preference = $6,
                available = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(&details.title)
        .bind(&details.description)
        .bind(&details.category)
        .bind(&details.images)
        .bind(&details.exchange_preference)
        .bind(item.available())
        .bind(item.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update item listing", e))?;

        if result.rows_affected() == 0 {
            return Err(listing_not_found(item.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: &ItemListingId) -> Result<(), DomainError> {
        if !delete_listing_cascade(&self.pool, ListingTable::Items, id.as_uuid()).await? {
            return Err(listing_not_found(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ItemListingId) -> Result<Option<ItemListing>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM item_listings WHERE id = $1",
            ITEM_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch item listing", e))?;

        row.map(row_to_item).transpose()
    }

    async fn search(
        &self,
        filter: &ItemFilter,
        page: PageRequest,
    ) -> Result<Page<ItemListing>, DomainError> {
        const WHERE: &str = "($1::text IS NULL OR category = $1) \
                             AND ($2::text IS NULL OR strpos(lower(title), lower($2)) > 0)";
        let (offset, limit) = offset_limit(page);

        let total: (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM item_listings WHERE {}", WHERE))
                .bind(&filter.category)
                .bind(&filter.search)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count item listings", e))?;

        let rows = sqlx::query(&format!(
            "SELECT {} FROM item_listings WHERE {} ORDER BY created_at DESC LIMIT $3 OFFSET $4",
            ITEM_COLUMNS, WHERE
        ))
        .bind(&filter.category)
        .bind(&filter.search)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to search item listings", e))?;

        let items = rows
            .into_iter()
            .map(row_to_item)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, total.0 as u64, page))
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<ItemListing>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM item_listings WHERE owner_id = $1 ORDER BY created_at DESC",
            ITEM_COLUMNS
        ))
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch item listings by owner", e))?;

        rows.into_iter().map(row_to_item).collect()
    }
}

fn row_to_item(row: PgRow) -> Result<ItemListing, DomainError> {
    let id: Uuid = column(&row, "id")?;
    let details = ItemDetails {
        title: column(&row, "title")?,
        description: column(&row, "description")?,
        category: column(&row, "category")?,
        images: column(&row, "images")?,
        exchange_preference: column(&row, "exchange_preference")?,
    };

    Ok(ItemListing::reconstitute(
        ItemListingId::from_uuid(id),
        user_id(&row, "owner_id")?,
        details,
        column(&row, "available")?,
        timestamp(&row, "created_at")?,
        timestamp(&row, "updated_at")?,
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// Skills
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PostgresSkillListingRepository {
    pool: PgPool,
}

impl PostgresSkillListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SkillListingRepository for PostgresSkillListingRepository {
    async fn save(&self, skill: &SkillListing) -> Result<(), DomainError> {
        let details = skill.details();
        sqlx::query(
            r#"
            INSERT INTO skill_listings (
                id, owner_id, title, description, availability, images,
                exchange_preference, active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(skill.id().as_uuid())
        .bind(skill.owner_id().as_uuid())
        .bind(&details.title)
        .bind(&details.description)
        .bind(&details.availability)
        .bind(&details.images)
        .bind(&details.exchange_preference)
        .bind(skill.active())
        .bind(skill.created_at().as_datetime())
        .bind(skill.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert skill listing", e))?;

        Ok(())
    }

    async fn update(&self, skill: &SkillListing) -> Result<(), DomainError> {
        let details = skill.details();
        let result = sqlx::query(
            r#"
            UPDATE skill_listings SET
                title = $2,
                description = $3,
                availability = $4,
                images = $5,
                exchange_preference = $6,
                active = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(skill.id().as_uuid())
        .bind(&details.title)
        .bind(&details.description)
        .bind(&details.availability)
        .bind(&details.images)
        .bind(&details.exchange_preference)
        .bind(skill.active())
        .bind(skill.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update skill listing", e))?;

        if result.rows_affected() == 0 {
            return Err(listing_not_found(skill.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: &SkillListingId) -> Result<(), DomainError> {
        if !delete_listing_cascade(&self.pool, ListingTable::Skills, id.as_uuid()).await? {
            return Err(listing_not_found(id));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &SkillListingId,
    ) -> Result<Option<SkillListing>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM skill_listings WHERE id = $1",
            SKILL_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch skill listing", e))?;

        row.map(row_to_skill).transpose()
    }

    async fn search(
        &self,
        filter: &SkillFilter,
        page: PageRequest,
    ) -> Result<Page<SkillListing>, DomainError> {
        const WHERE: &str = "($1::text IS NULL OR strpos(lower(title), lower($1)) > 0)";
        let (offset, limit) = offset_limit(page);

        let total: (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM skill_listings WHERE {}", WHERE))
                .bind(&filter.search)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count skill listings", e))?;

        let rows = sqlx::query(&format!(
            "SELECT {} FROM skill_listings WHERE {} ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            SKILL_COLUMNS, WHERE
        ))
        .bind(&filter.search)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to search skill listings", e))?;

        let skills = rows
            .into_iter()
            .map(row_to_skill)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(skills, total.0 as u64, page))
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<SkillListing>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM skill_listings WHERE owner_id = $1 ORDER BY created_at DESC",
            SKILL_COLUMNS
        ))
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch skill listings by owner", e))?;

        rows.into_iter().map(row_to_skill).collect()
    }
}

fn row_to_skill(row: PgRow) -> Result<SkillListing, DomainError> {
    let id: Uuid = column(&row, "id")?;
    let details = SkillDetails {
        title: column(&row, "title")?,
        description: column(&row, "description")?,
        availability: column(&row, "availability")?,
        images: column(&row, "images")?,
        exchange_preference: column(&row, "exchange_preference")?,
    };

    Ok(SkillListing::reconstitute(
        SkillListingId::from_uuid(id),
        user_id(&row, "owner_id")?,
        details,
        column(&row, "active")?,
        timestamp(&row, "created_at")?,
        timestamp(&row, "updated_at")?,
    ))
}
