//! PostgreSQL-backed `DonorRepository` implementation using Diesel ORM.

use std::fmt::Display;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DonorRepository, DonorRepositoryError};
use crate::domain::{
    AccountCredentials, Donation, Donor, DonorDraft, DonorId, EmailAddress, HospitalId,
    Location, PasswordHash, PhoneNumber,
};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{CredentialsRow, DonationRow, DonorRow, NewDonorRow};
use super::pool::DbPool;
use super::schema::{donations, donors};

const EMAIL_CONSTRAINT: &str = "donors_email_key";

/// Diesel-backed implementation of the [`DonorRepository`] port.
#[derive(Clone)]
pub struct DieselDonorRepository {
    pool: DbPool,
}

impl DieselDonorRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: super::pool::PoolError) -> DonorRepositoryError {
    map_pool_error(error, DonorRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> DonorRepositoryError {
    map_diesel_error(
        error,
        DonorRepositoryError::query,
        DonorRepositoryError::connection,
    )
}

fn corrupt(field: &str, error: impl Display) -> DonorRepositoryError {
    DonorRepositoryError::query(format!("stored donor {field} is invalid: {error}"))
}

fn row_to_donation(row: DonationRow) -> Result<Donation, DonorRepositoryError> {
    Ok(Donation {
        date: row.donated_at,
        hospital_id: row.hospital_id.map(HospitalId::from_uuid),
        units: u32::try_from(row.units).map_err(|err| corrupt("donation units", err))?,
    })
}

fn row_to_donor(row: DonorRow, history: Vec<DonationRow>) -> Result<Donor, DonorRepositoryError> {
    let donation_history = history
        .into_iter()
        .map(row_to_donation)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Donor::from(DonorDraft {
        id: DonorId::from_uuid(row.id),
        name: row.name,
        email: EmailAddress::new(&row.email).map_err(|err| corrupt("email", err))?,
        phone: PhoneNumber::new(&row.phone).map_err(|err| corrupt("phone", err))?,
        blood_group: row
            .blood_group
            .parse()
            .map_err(|err| corrupt("blood group", err))?,
        location: Location::new(row.city, row.state).map_err(|err| corrupt("location", err))?,
        last_donation: row.last_donation,
        donation_history,
        created_at: row.created_at,
    }))
}

pub(crate) fn row_to_credentials<E>(
    row: CredentialsRow,
    corrupt: impl FnOnce(String) -> E,
) -> Result<AccountCredentials, E> {
    let email = match EmailAddress::new(&row.email) {
        Ok(email) => email,
        Err(err) => return Err(corrupt(format!("stored email is invalid: {err}"))),
    };
    Ok(AccountCredentials {
        id: row.id,
        name: row.name,
        email,
        password_hash: PasswordHash::new(row.password_hash),
    })
}

#[async_trait]
impl DonorRepository for DieselDonorRepository {
    async fn insert(
        &self,
        donor: &Donor,
        password_hash: &PasswordHash,
    ) -> Result<(), DonorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewDonorRow {
            id: *donor.id().as_uuid(),
            name: donor.name(),
            email: donor.email().as_ref(),
            phone: donor.phone().as_ref(),
            password_hash: password_hash.as_str(),
            blood_group: donor.blood_group().as_str(),
            city: donor.location().city(),
            state: donor.location().state(),
            last_donation: donor.last_donation(),
            created_at: donor.created_at(),
        };

        diesel::insert_into(donors::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err, EMAIL_CONSTRAINT) {
                    DonorRepositoryError::duplicate_email(donor.email().as_ref())
                } else {
                    diesel_error(err)
                }
            })
    }

    async fn find_by_id(&self, id: &DonorId) -> Result<Option<Donor>, DonorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let Some(row) = donors::table
            .find(*id.as_uuid())
            .select(DonorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
        else {
            return Ok(None);
        };

        let history: Vec<DonationRow> = donations::table
            .filter(donations::donor_id.eq(row.id))
            .order(donations::donated_at.asc())
            .select(DonationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        row_to_donor(row, history).map(Some)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountCredentials>, DonorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<CredentialsRow> = donors::table
            .filter(donors::email.eq(email))
            .select((donors::id, donors::name, donors::email, donors::password_hash))
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(|row| row_to_credentials(row, DonorRepositoryError::query))
            .transpose()
    }
}
