//! Domain records with fixed timestamps for the Diesel repository suites.
//!
//! Timestamps are whole seconds so they survive the microsecond precision
//! of `timestamptz` unchanged.

use chrono::{DateTime, TimeZone, Utc};

use bloodbank::domain::{
    BloodGroup, Donor, DonorDraft, DonorId, EmailAddress, EmergencyContact, Hospital,
    HospitalDraft, HospitalId, HospitalStatus, Inventory, Location, OperatingHours, PasswordHash,
    PhoneNumber,
};

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0)
        .single()
        .expect("fixed timestamp")
}

pub fn password_hash() -> PasswordHash {
    PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g")
}

pub fn donor(email: &str, blood_group: BloodGroup) -> Donor {
    Donor::from(DonorDraft {
        id: DonorId::random(),
        name: "Asha Rao".to_owned(),
        email: EmailAddress::new(email).expect("valid email"),
        phone: PhoneNumber::new("9876543210").expect("valid phone"),
        blood_group,
        location: Location::new("Pune", "Maharashtra").expect("valid location"),
        last_donation: Some(at(1, 9)),
        donation_history: Vec::new(),
        created_at: at(2, 9),
    })
}

pub fn hospital(email: &str, name: &str, city: &str) -> Hospital {
    Hospital::from(HospitalDraft {
        id: HospitalId::random(),
        hospital_name: name.to_owned(),
        email: EmailAddress::new(email).expect("valid email"),
        phone: PhoneNumber::new("02012345678").expect("valid phone"),
        registration_number: "REG-2041".to_owned(),
        location: Location::new(city, "Maharashtra").expect("valid location"),
        inventory: Inventory::default(),
        status: HospitalStatus::Active,
        operating_hours: OperatingHours::from_parts(Some("08:00"), Some("20:00"))
            .expect("valid hours"),
        emergency_contact: Some(EmergencyContact {
            name: "Night desk".to_owned(),
            phone: PhoneNumber::new("02087654321").expect("valid phone"),
        }),
        reviews: Vec::new(),
        created_at: at(2, 10),
    })
}
