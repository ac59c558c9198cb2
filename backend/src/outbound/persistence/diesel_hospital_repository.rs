//! PostgreSQL-backed `HospitalRepository` implementation using Diesel ORM.
//!
//! Inventory lives in eight integer columns on `hospitals`; reviews live in
//! `hospital_reviews` and are loaded newest first.

use std::collections::HashMap;
use std::fmt::Display;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{HospitalListFilter, HospitalRepository, HospitalRepositoryError};
use crate::domain::{
    AccountCredentials, BloodGroup, EmailAddress, EmergencyContact, Hospital, HospitalDraft,
    HospitalId, Inventory, Location, OperatingHours, PasswordHash, PhoneNumber, Rating, Review,
};

use super::diesel_donor_repository::row_to_credentials;
use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{
    CredentialsRow, HospitalRow, InventoryColumns, NewHospitalRow, NewReviewRow, ReviewRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{hospital_reviews, hospitals};

const EMAIL_CONSTRAINT: &str = "hospitals_email_key";

/// Diesel-backed implementation of the [`HospitalRepository`] port.
#[derive(Clone)]
pub struct DieselHospitalRepository {
    pool: DbPool,
}

impl DieselHospitalRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> HospitalRepositoryError {
    map_pool_error(error, HospitalRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> HospitalRepositoryError {
    map_diesel_error(
        error,
        HospitalRepositoryError::query,
        HospitalRepositoryError::connection,
    )
}

fn corrupt(field: &str, error: impl Display) -> HospitalRepositoryError {
    HospitalRepositoryError::query(format!("stored hospital {field} is invalid: {error}"))
}

fn counter_to_column(group: BloodGroup, units: u32) -> Result<i32, HospitalRepositoryError> {
    i32::try_from(units).map_err(|err| {
        HospitalRepositoryError::query(format!("{} counter out of range: {err}", group.as_str()))
    })
}

fn inventory_to_columns(
    inventory: &Inventory,
) -> Result<InventoryColumns, HospitalRepositoryError> {
    let column = |group| counter_to_column(group, inventory.units(group));
    Ok(InventoryColumns {
        a_positive: column(BloodGroup::APositive)?,
        a_negative: column(BloodGroup::ANegative)?,
        b_positive: column(BloodGroup::BPositive)?,
        b_negative: column(BloodGroup::BNegative)?,
        ab_positive: column(BloodGroup::AbPositive)?,
        ab_negative: column(BloodGroup::AbNegative)?,
        o_positive: column(BloodGroup::OPositive)?,
        o_negative: column(BloodGroup::ONegative)?,
    })
}

fn columns_to_inventory(columns: InventoryColumns) -> Result<Inventory, HospitalRepositoryError> {
    let pairs = [
        (BloodGroup::APositive, columns.a_positive),
        (BloodGroup::ANegative, columns.a_negative),
        (BloodGroup::BPositive, columns.b_positive),
        (BloodGroup::BNegative, columns.b_negative),
        (BloodGroup::AbPositive, columns.ab_positive),
        (BloodGroup::AbNegative, columns.ab_negative),
        (BloodGroup::OPositive, columns.o_positive),
        (BloodGroup::ONegative, columns.o_negative),
    ];
    pairs
        .into_iter()
        .try_fold(Inventory::default(), |inventory, (group, value)| {
            let units = u32::try_from(value).map_err(|err| corrupt(group.counter_key(), err))?;
            Ok(inventory.with_units(group, units))
        })
}

fn row_to_review(row: ReviewRow) -> Result<Review, HospitalRepositoryError> {
    let rating = Rating::new(i64::from(row.rating)).map_err(|err| corrupt("rating", err))?;
    Review::new(row.user_name, rating, row.comment, row.reviewed_at)
        .map_err(|err| corrupt("review", err))
}

fn row_to_hospital(
    row: HospitalRow,
    reviews: Vec<ReviewRow>,
) -> Result<Hospital, HospitalRepositoryError> {
    let emergency_contact = match (row.emergency_contact_name, row.emergency_contact_phone) {
        (Some(name), Some(phone)) => Some(EmergencyContact {
            name,
            phone: PhoneNumber::new(phone).map_err(|err| corrupt("emergency contact", err))?,
        }),
        _ => None,
    };
    let reviews = reviews
        .into_iter()
        .map(row_to_review)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Hospital::from(HospitalDraft {
        id: HospitalId::from_uuid(row.id),
        hospital_name: row.hospital_name,
        email: EmailAddress::new(&row.email).map_err(|err| corrupt("email", err))?,
        phone: PhoneNumber::new(&row.phone).map_err(|err| corrupt("phone", err))?,
        registration_number: row.registration_number,
        location: Location::new(row.city, row.state).map_err(|err| corrupt("location", err))?,
        inventory: columns_to_inventory(row.inventory)?,
        status: row.status.parse().map_err(|err| corrupt("status", err))?,
        operating_hours: OperatingHours::from_parts(
            Some(row.open_time.as_str()),
            Some(row.close_time.as_str()),
        )
        .map_err(|err| corrupt("operating hours", err))?,
        emergency_contact,
        reviews,
        created_at: row.created_at,
    }))
}

#[async_trait]
impl HospitalRepository for DieselHospitalRepository {
    async fn insert(
        &self,
        hospital: &Hospital,
        password_hash: &PasswordHash,
    ) -> Result<(), HospitalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let contact = hospital.emergency_contact();
        let row = NewHospitalRow {
            id: *hospital.id().as_uuid(),
            hospital_name: hospital.hospital_name(),
            email: hospital.email().as_ref(),
            phone: hospital.phone().as_ref(),
            password_hash: password_hash.as_str(),
            registration_number: hospital.registration_number(),
            city: hospital.location().city(),
            city_key: Location::city_key(hospital.location().city()),
            state: hospital.location().state(),
            status: hospital.status().as_str(),
            open_time: hospital.operating_hours().open(),
            close_time: hospital.operating_hours().close(),
            emergency_contact_name: contact.map(|c| c.name.as_str()),
            emergency_contact_phone: contact.map(|c| c.phone.as_ref()),
            inventory: inventory_to_columns(hospital.inventory())?,
            created_at: hospital.created_at(),
        };

        diesel::insert_into(hospitals::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err, EMAIL_CONSTRAINT) {
                    HospitalRepositoryError::duplicate_email(hospital.email().as_ref())
                } else {
                    diesel_error(err)
                }
            })
    }

    async fn find_by_id(
        &self,
        id: &HospitalId,
    ) -> Result<Option<Hospital>, HospitalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let Some(row) = hospitals::table
            .find(*id.as_uuid())
            .select(HospitalRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
        else {
            return Ok(None);
        };

        let reviews: Vec<ReviewRow> = hospital_reviews::table
            .filter(hospital_reviews::hospital_id.eq(row.id))
            .order(hospital_reviews::reviewed_at.desc())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        row_to_hospital(row, reviews).map(Some)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountCredentials>, HospitalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<CredentialsRow> = hospitals::table
            .filter(hospitals::email.eq(email))
            .select((
                hospitals::id,
                hospitals::hospital_name,
                hospitals::email,
                hospitals::password_hash,
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(|row| row_to_credentials(row, HospitalRepositoryError::query))
            .transpose()
    }

    async fn list(
        &self,
        filter: &HospitalListFilter,
    ) -> Result<Vec<Hospital>, HospitalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = hospitals::table
            .select(HospitalRow::as_select())
            .order((hospitals::hospital_name.asc(), hospitals::id.asc()))
            .into_boxed();
        if let Some(city) = filter.city.as_deref() {
            query = query.filter(hospitals::city_key.eq(Location::city_key(city)));
        }
        let rows: Vec<HospitalRow> = query.load(&mut conn).await.map_err(diesel_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let review_rows: Vec<ReviewRow> = hospital_reviews::table
            .filter(hospital_reviews::hospital_id.eq_any(ids))
            .order(hospital_reviews::reviewed_at.desc())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        let mut reviews_by_hospital: HashMap<Uuid, Vec<ReviewRow>> = HashMap::new();
        for review in review_rows {
            reviews_by_hospital
                .entry(review.hospital_id)
                .or_default()
                .push(review);
        }

        rows.into_iter()
            .map(|row| {
                let reviews = reviews_by_hospital.remove(&row.id).unwrap_or_default();
                row_to_hospital(row, reviews)
            })
            .collect()
    }

    async fn save_inventory(
        &self,
        id: &HospitalId,
        inventory: &Inventory,
    ) -> Result<(), HospitalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let columns = inventory_to_columns(inventory)?;

        let updated = diesel::update(hospitals::table.find(*id.as_uuid()))
            .set(&columns)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(HospitalRepositoryError::query(format!(
                "hospital {id} not found for inventory update"
            )));
        }
        Ok(())
    }

    async fn add_review(
        &self,
        id: &HospitalId,
        review: &Review,
    ) -> Result<(), HospitalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewReviewRow {
            id: Uuid::new_v4(),
            hospital_id: *id.as_uuid(),
            user_name: review.user_name(),
            rating: i16::from(review.rating().value()),
            comment: review.comment(),
            reviewed_at: review.date(),
        };

        diesel::insert_into(hospital_reviews::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn inventory_round_trips_through_columns() {
        let inventory = Inventory::default()
            .with_units(BloodGroup::AbNegative, 7)
            .with_units(BloodGroup::OPositive, 12);
        let columns = inventory_to_columns(&inventory).expect("in range");
        assert_eq!(columns.ab_negative, 7);
        assert_eq!(columns.o_positive, 12);
        assert_eq!(columns_to_inventory(columns).expect("valid"), inventory);
    }

    #[rstest]
    fn negative_column_is_reported_with_counter_name() {
        let columns = InventoryColumns {
            a_positive: 0,
            a_negative: 0,
            b_positive: -3,
            b_negative: 0,
            ab_positive: 0,
            ab_negative: 0,
            o_positive: 0,
            o_negative: 0,
        };
        let error = columns_to_inventory(columns).expect_err("negative counter");
        assert!(error.to_string().contains("bPositive"));
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    fn stored_rating_out_of_range_is_corrupt(#[case] rating: i16) {
        let row = ReviewRow {
            hospital_id: Uuid::new_v4(),
            user_name: "Asha".to_owned(),
            rating,
            comment: String::new(),
            reviewed_at: chrono::Utc::now(),
        };
        assert!(row_to_review(row).is_err());
    }
}
