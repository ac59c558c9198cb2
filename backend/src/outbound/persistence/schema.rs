//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered individual donors.
    donors (id) {
        id -> Uuid,
        name -> Varchar,
        /// Lower-cased; unique across donors.
        email -> Varchar,
        phone -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// One of `A+`, `A-`, `B+`, `B-`, `AB+`, `AB-`, `O+`, `O-`.
        blood_group -> Varchar,
        city -> Varchar,
        state -> Varchar,
        last_donation -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered hospitals with their eight inventory counters.
    hospitals (id) {
        id -> Uuid,
        hospital_name -> Varchar,
        /// Lower-cased; unique across hospitals.
        email -> Varchar,
        phone -> Varchar,
        password_hash -> Text,
        registration_number -> Varchar,
        city -> Varchar,
        /// Case-folded city used by the directory filter.
        city_key -> Varchar,
        state -> Varchar,
        /// `ACTIVE`, `INACTIVE` or `PENDING`.
        status -> Varchar,
        open_time -> Varchar,
        close_time -> Varchar,
        emergency_contact_name -> Nullable<Varchar>,
        emergency_contact_phone -> Nullable<Varchar>,
        a_positive -> Int4,
        a_negative -> Int4,
        b_positive -> Int4,
        b_negative -> Int4,
        ab_positive -> Int4,
        ab_negative -> Int4,
        o_positive -> Int4,
        o_negative -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reviews left on hospitals.
    hospital_reviews (id) {
        id -> Uuid,
        hospital_id -> Uuid,
        user_name -> Varchar,
        rating -> Int2,
        comment -> Text,
        reviewed_at -> Timestamptz,
    }
}

diesel::table! {
    /// Donation history entries.
    donations (id) {
        id -> Uuid,
        donor_id -> Uuid,
        hospital_id -> Nullable<Uuid>,
        units -> Int4,
        donated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Donor requests addressed to hospitals.
    blood_requests (id) {
        id -> Uuid,
        patient_name -> Varchar,
        blood_group -> Varchar,
        units_required -> Int4,
        /// `NORMAL`, `URGENT` or `EMERGENCY`.
        priority -> Varchar,
        /// `PENDING`, `APPROVED`, `REJECTED`, `FULFILLED` or `CANCELLED`.
        status -> Varchar,
        donor_id -> Uuid,
        hospital_id -> Uuid,
        request_date -> Timestamptz,
        response_date -> Nullable<Timestamptz>,
        notes -> Nullable<Text>,
        /// JSON array of `{status, date, notes}` entries, oldest first.
        timeline -> Jsonb,
    }
}

diesel::joinable!(hospital_reviews -> hospitals (hospital_id));
diesel::joinable!(donations -> donors (donor_id));
diesel::joinable!(blood_requests -> donors (donor_id));
diesel::joinable!(blood_requests -> hospitals (hospital_id));

diesel::allow_tables_to_appear_in_same_query!(
    blood_requests,
    donations,
    donors,
    hospital_reviews,
    hospitals,
);
