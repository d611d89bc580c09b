use rand::Rng;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, ColumnTrait, TransactionTrait};
use models::cafe::{self, Entity as CafeEntity, NewCafe};
use crate::errors::ServiceError;

/// List every cafe.
pub async fn list_cafes(db: &DatabaseConnection) -> Result<Vec<cafe::Model>, ServiceError> {
    let rows = CafeEntity::find().order_by_asc(cafe::Column::Id).all(db).await?;
    Ok(rows)
}

/// First cafe whose location equals `location` exactly.
pub async fn find_cafe_by_location(db: &DatabaseConnection, location: &str) -> Result<Option<cafe::Model>, ServiceError> {
    let found = CafeEntity::find()
        .filter(cafe::Column::Location.eq(location))
        .one(db)
        .await?;
    Ok(found)
}

const RANDOM_PICK_ATTEMPTS: usize = 3;

/// Pick one cafe uniformly at random; `NotFound` when the table is empty.
pub async fn random_cafe(db: &DatabaseConnection) -> Result<cafe::Model, ServiceError> {
    pick_cafe(db, |total| rand::thread_rng().gen_range(0..total)).await
}

/// Count, then fetch the row at offset `choose(total)`. A delete between the two queries can push
/// the offset past the end: recount and retry, then settle for the first remaining row.
async fn pick_cafe<F>(db: &DatabaseConnection, choose: F) -> Result<cafe::Model, ServiceError>
where
    F: Fn(u64) -> u64 + Send + Sync,
{
    for attempt in 1..=RANDOM_PICK_ATTEMPTS {
        let total = CafeEntity::find().count(db).await?;
        if total == 0 {
            return Err(ServiceError::not_found("cafe"));
        }
        let found = CafeEntity::find()
            .order_by_asc(cafe::Column::Id)
            .offset(choose(total))
            .limit(1)
            .one(db)
            .await?;
        match found {
            Some(c) => return Ok(c),
            None => tracing::debug!(attempt, total, "random offset missed; table shrank"),
        }
    }
    CafeEntity::find()
        .order_by_asc(cafe::Column::Id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("cafe"))
}

/// Validate and insert a cafe in its own transaction.
pub async fn create_cafe(db: &DatabaseConnection, new: NewCafe) -> Result<cafe::Model, ServiceError> {
    let txn = db.begin().await?;
    match cafe::create(&txn, new).await {
        Ok(created) => {
            txn.commit().await?;
            Ok(created)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e.into())
        }
    }
}

/// Set `coffee_price` on an existing cafe, leaving every other column alone.
pub async fn update_cafe_price(db: &DatabaseConnection, id: i32, price: Option<String>) -> Result<cafe::Model, ServiceError> {
    let txn = db.begin().await?;
    let Some(updated) = cafe::set_coffee_price(&txn, id, price).await? else {
        txn.rollback().await?;
        return Err(ServiceError::not_found("cafe"));
    };
    txn.commit().await?;
    Ok(updated)
}

/// Delete one cafe by id; `NotFound` when absent.
pub async fn delete_cafe(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if CafeEntity::find_by_id(id).one(&txn).await?.is_none() {
        txn.rollback().await?;
        return Err(ServiceError::not_found("cafe"));
    }
    CafeEntity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use crate::test_support::{get_db, new_cafe};

    async fn get_cafe(db: &DatabaseConnection, id: i32) -> Result<Option<cafe::Model>, ServiceError> {
        Ok(CafeEntity::find_by_id(id).one(db).await?)
    }

    #[tokio::test]
    async fn cafe_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let a = create_cafe(&db, new_cafe("Blue Bottle", "Downtown")).await?;
        let found = get_cafe(&db, a.id).await?.unwrap();
        assert_eq!(found.name, "Blue Bottle");

        let all = list_cafes(&db).await?;
        assert!(all.iter().any(|c| c.id == a.id));

        let by_loc = find_cafe_by_location(&db, "Downtown").await?.unwrap();
        assert_eq!(by_loc.id, a.id);
        assert!(find_cafe_by_location(&db, "downtown").await?.is_none());

        let updated = update_cafe_price(&db, a.id, Some("$3.50".into())).await?;
        assert_eq!(updated.coffee_price.as_deref(), Some("$3.50"));
        assert_eq!(updated.location, "Downtown");

        delete_cafe(&db, a.id).await?;
        assert!(get_cafe(&db, a.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_cafe(&db, new_cafe("Same", "A")).await?;
        let err = create_cafe(&db, new_cafe("Same", "B")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "unexpected: {err:?}");
        assert_eq!(list_cafes(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn missing_field_is_validation() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let mut new = new_cafe("Nameless", "A");
        new.name.clear();
        let err = create_cafe(&db, new).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn random_on_empty_table_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = random_cafe(&db).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn random_eventually_covers_every_cafe() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let mut ids = HashSet::new();
        for (name, loc) in [("One", "N"), ("Two", "E"), ("Three", "S")] {
            ids.insert(create_cafe(&db, new_cafe(name, loc)).await?.id);
        }
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(random_cafe(&db).await?.id);
            if seen == ids { break; }
        }
        assert_eq!(seen, ids);
        Ok(())
    }

    #[tokio::test]
    async fn random_picks_row_at_chosen_offset() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_cafe(&db, new_cafe("First", "A")).await?;
        let second = create_cafe(&db, new_cafe("Second", "B")).await?;
        let picked = pick_cafe(&db, |_| 1).await?;
        assert_eq!(picked.id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn random_offset_past_end_still_returns_a_cafe() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let first = create_cafe(&db, new_cafe("Left", "A")).await?;
        create_cafe(&db, new_cafe("Right", "B")).await?;
        // every offset misses, as if rows were deleted right after each count
        let picked = pick_cafe(&db, |total| total + 10).await?;
        assert_eq!(picked.id, first.id);

        delete_cafe(&db, first.id).await?;
        let picked = pick_cafe(&db, |total| total).await?;
        assert_eq!(picked.name, "Right");
        Ok(())
    }

    #[tokio::test]
    async fn random_after_emptying_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let only = create_cafe(&db, new_cafe("Only", "A")).await?;
        delete_cafe(&db, only.id).await?;
        let err = pick_cafe(&db, |total| total).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_missing_are_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let kept = create_cafe(&db, new_cafe("Kept", "A")).await?;

        let err = update_cafe_price(&db, kept.id + 100, Some("£9".into())).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = delete_cafe(&db, kept.id + 100).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let still = get_cafe(&db, kept.id).await?.unwrap();
        assert_eq!(still, kept);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_only_target() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_cafe(&db, new_cafe("Stay", "A")).await?;
        let b = create_cafe(&db, new_cafe("Go", "B")).await?;
        delete_cafe(&db, b.id).await?;
        let ids: Vec<i32> = list_cafes(&db).await?.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a.id]);
        Ok(())
    }
}
