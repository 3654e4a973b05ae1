//! `SQLite` implementation of [`DataGateway`].

use sqlx::SqlitePool;

use lendstock_app::ports::DataGateway;
use lendstock_domain::equipment::Equipment;
use lendstock_domain::error::{LendError, NotFoundError};
use lendstock_domain::id::{EquipmentId, RentalId};
use lendstock_domain::person::Person;
use lendstock_domain::rental::{Rental, RentalDetails};

use crate::{equipment_repo, person_repo, rental_repo};

/// `SQLite`-backed data gateway.
///
/// Each call is a single statement; nothing spans a transaction.
#[derive(Clone)]
pub struct SqliteGateway {
    pool: SqlitePool,
}

impl SqliteGateway {
    /// Create a new gateway using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn expect_one(affected: u64, missing: impl FnOnce() -> NotFoundError) -> Result<(), LendError> {
    if affected == 0 {
        return Err(missing().into());
    }
    Ok(())
}

impl DataGateway for SqliteGateway {
    async fn list_equipment(&self) -> Result<Vec<Equipment>, LendError> {
        Ok(equipment_repo::list(&self.pool).await?)
    }

    async fn get_equipment(&self, id: EquipmentId) -> Result<Option<Equipment>, LendError> {
        Ok(equipment_repo::get(&self.pool, id).await?)
    }

    async fn create_equipment(&self, equipment: Equipment) -> Result<Equipment, LendError> {
        equipment_repo::insert(&self.pool, &equipment).await?;
        Ok(equipment)
    }

    async fn update_equipment_count(&self, id: EquipmentId, count: u32) -> Result<(), LendError> {
        let affected = equipment_repo::update_count(&self.pool, id, count).await?;
        expect_one(affected, || NotFoundError::equipment(id))
    }

    async fn delete_equipment(&self, id: EquipmentId) -> Result<(), LendError> {
        let affected = equipment_repo::delete(&self.pool, id).await?;
        expect_one(affected, || NotFoundError::equipment(id))
    }

    async fn list_lenders(&self) -> Result<Vec<Person>, LendError> {
        Ok(person_repo::list_lenders(&self.pool).await?)
    }

    async fn find_person(&self, name: &str, email: &str) -> Result<Option<Person>, LendError> {
        Ok(person_repo::find(&self.pool, name, email).await?)
    }

    async fn create_person(&self, person: Person) -> Result<Person, LendError> {
        person_repo::insert(&self.pool, &person).await?;
        Ok(person)
    }

    async fn get_rental(&self, id: RentalId) -> Result<Option<Rental>, LendError> {
        Ok(rental_repo::get(&self.pool, id).await?)
    }

    async fn create_rental(&self, rental: Rental) -> Result<Rental, LendError> {
        rental_repo::insert(&self.pool, &rental).await?;
        Ok(rental)
    }

    async fn delete_rental(&self, id: RentalId) -> Result<(), LendError> {
        let affected = rental_repo::delete(&self.pool, id).await?;
        expect_one(affected, || NotFoundError::rental(id))
    }

    async fn list_rentals_with_joins(&self) -> Result<Vec<RentalDetails>, LendError> {
        Ok(rental_repo::list_joined(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use lendstock_domain::time::parse_date;

    async fn setup() -> SqliteGateway {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteGateway::new(db.pool().clone())
    }

    fn equipment(name: &str, count: u32) -> Equipment {
        Equipment::builder()
            .name(name)
            .available_count(count)
            .build()
            .unwrap()
    }

    fn rental(equipment: &Equipment, lender: &Person, borrower: &Person, start: &str) -> Rental {
        Rental {
            id: RentalId::new(),
            equipment_id: equipment.id,
            lender_id: lender.id,
            borrower_id: borrower.id,
            start_date: parse_date("start_date", start).unwrap(),
            end_date: parse_date("end_date", "2024-12-31").unwrap(),
        }
    }

    #[tokio::test]
    async fn should_create_and_retrieve_equipment() {
        let gateway = setup().await;
        let drill = gateway.create_equipment(equipment("Drill", 3)).await.unwrap();

        let fetched = gateway.get_equipment(drill.id).await.unwrap();

        assert_eq!(fetched, Some(drill));
    }

    #[tokio::test]
    async fn should_return_none_when_equipment_not_found() {
        let gateway = setup().await;
        let result = gateway.get_equipment(EquipmentId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_equipment_ordered_by_name() {
        let gateway = setup().await;
        gateway.create_equipment(equipment("Saw", 1)).await.unwrap();
        gateway.create_equipment(equipment("Drill", 2)).await.unwrap();
        gateway.create_equipment(equipment("Ladder", 0)).await.unwrap();

        let names: Vec<String> = gateway
            .list_equipment()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();

        assert_eq!(names, ["Drill", "Ladder", "Saw"]);
    }

    #[tokio::test]
    async fn should_update_equipment_count() {
        let gateway = setup().await;
        let drill = gateway.create_equipment(equipment("Drill", 3)).await.unwrap();

        gateway.update_equipment_count(drill.id, 0).await.unwrap();

        let fetched = gateway.get_equipment(drill.id).await.unwrap().unwrap();
        assert_eq!(fetched.available_count, 0);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_equipment() {
        let gateway = setup().await;
        let result = gateway.update_equipment_count(EquipmentId::new(), 1).await;
        assert!(matches!(result, Err(LendError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_find_person_by_exact_name_and_email() {
        let gateway = setup().await;
        let alice = gateway
            .create_person(Person::borrower("Alice", "alice@x.com"))
            .await
            .unwrap();

        let found = gateway.find_person("Alice", "alice@x.com").await.unwrap();
        assert_eq!(found, Some(alice));

        let other = gateway.find_person("Alice", "other@x.com").await.unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn should_list_only_lenders() {
        let gateway = setup().await;
        gateway
            .create_person(Person::lender("Zoe", None))
            .await
            .unwrap();
        gateway
            .create_person(Person::borrower("Alice", "alice@x.com"))
            .await
            .unwrap();
        gateway
            .create_person(Person::lender("Marc", Some("marc@x.com".to_string())))
            .await
            .unwrap();

        let names: Vec<String> = gateway
            .list_lenders()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, ["Marc", "Zoe"]);
    }

    #[tokio::test]
    async fn should_list_rentals_with_resolved_relations() {
        let gateway = setup().await;
        let drill = gateway.create_equipment(equipment("Drill", 1)).await.unwrap();
        let lender = gateway
            .create_person(Person::lender("Louise", None))
            .await
            .unwrap();
        let borrower = gateway
            .create_person(Person::borrower("Alice", "alice@x.com"))
            .await
            .unwrap();
        let created = gateway
            .create_rental(rental(&drill, &lender, &borrower, "2024-01-01"))
            .await
            .unwrap();

        let listing = gateway.list_rentals_with_joins().await.unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].rental, created);
        assert_eq!(listing[0].borrower.as_ref(), Some(&borrower));
        assert_eq!(listing[0].lender.as_ref(), Some(&lender));
        assert_eq!(listing[0].equipment, Some(drill.summary()));
    }

    #[tokio::test]
    async fn should_reject_rental_referencing_unknown_lender() {
        let gateway = setup().await;
        let drill = gateway.create_equipment(equipment("Drill", 1)).await.unwrap();
        let borrower = gateway
            .create_person(Person::borrower("Alice", "alice@x.com"))
            .await
            .unwrap();
        let ghost = Person::lender("Ghost", None);

        let result = gateway
            .create_rental(rental(&drill, &ghost, &borrower, "2024-01-01"))
            .await;

        assert!(matches!(result, Err(LendError::Remote(_))));
        assert!(gateway.list_rentals_with_joins().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_get_and_delete_rental() {
        let gateway = setup().await;
        let drill = gateway.create_equipment(equipment("Drill", 1)).await.unwrap();
        let lender = gateway
            .create_person(Person::lender("Louise", None))
            .await
            .unwrap();
        let created = gateway
            .create_rental(rental(&drill, &lender, &lender, "2024-01-01"))
            .await
            .unwrap();
        assert_eq!(
            gateway.get_rental(created.id).await.unwrap(),
            Some(created.clone())
        );

        gateway.delete_rental(created.id).await.unwrap();

        assert!(gateway.get_rental(created.id).await.unwrap().is_none());
        let again = gateway.delete_rental(created.id).await;
        assert!(matches!(again, Err(LendError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_refuse_deleting_equipment_still_rented() {
        let gateway = setup().await;
        let drill = gateway.create_equipment(equipment("Drill", 1)).await.unwrap();
        let lender = gateway
            .create_person(Person::lender("Louise", None))
            .await
            .unwrap();
        gateway
            .create_rental(rental(&drill, &lender, &lender, "2024-01-01"))
            .await
            .unwrap();

        let result = gateway.delete_equipment(drill.id).await;

        assert!(matches!(result, Err(LendError::Remote(_))));
        assert!(gateway.get_equipment(drill.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn should_delete_unreferenced_equipment() {
        let gateway = setup().await;
        let drill = gateway.create_equipment(equipment("Drill", 1)).await.unwrap();

        gateway.delete_equipment(drill.id).await.unwrap();

        assert!(gateway.get_equipment(drill.id).await.unwrap().is_none());
        let again = gateway.delete_equipment(drill.id).await;
        assert!(matches!(again, Err(LendError::NotFound(_))));
    }
}
