//! Mock data set served by the dev backend

use chrono::{DateTime, Duration, Utc};

use crate::models::{Hospital, Medicine, StockLevel};

struct HospitalSeed {
    name: &'static str,
    district: &'static str,
    state: &'static str,
    total_beds: u32,
    available_beds: u32,
    icu_beds: u32,
    available_icu: u32,
    contact: &'static str,
    address: &'static str,
    updated_minutes_ago: i64,
}

const HOSPITALS: [HospitalSeed; 5] = [
    HospitalSeed {
        name: "City General Hospital",
        district: "Mumbai",
        state: "Maharashtra",
        total_beds: 150,
        available_beds: 45,
        icu_beds: 20,
        available_icu: 3,
        contact: "+91-22-1234-5678",
        address: "123 Medical Street, Mumbai, Maharashtra 400001",
        updated_minutes_ago: 5,
    },
    HospitalSeed {
        name: "Regional Medical Center",
        district: "Delhi",
        state: "Delhi",
        total_beds: 200,
        available_beds: 12,
        icu_beds: 30,
        available_icu: 1,
        contact: "+91-11-2345-6789",
        address: "456 Health Avenue, New Delhi, Delhi 110001",
        updated_minutes_ago: 10,
    },
    HospitalSeed {
        name: "Metro Hospital",
        district: "Bangalore",
        state: "Karnataka",
        total_beds: 100,
        available_beds: 60,
        icu_beds: 15,
        available_icu: 8,
        contact: "+91-80-3456-7890",
        address: "789 Care Road, Bangalore, Karnataka 560001",
        updated_minutes_ago: 2,
    },
    HospitalSeed {
        name: "Central Hospital",
        district: "Chennai",
        state: "Tamil Nadu",
        total_beds: 180,
        available_beds: 25,
        icu_beds: 25,
        available_icu: 2,
        contact: "+91-44-4567-8901",
        address: "321 Wellness Lane, Chennai, Tamil Nadu 600001",
        updated_minutes_ago: 15,
    },
    HospitalSeed {
        name: "Sunshine Medical",
        district: "Hyderabad",
        state: "Telangana",
        total_beds: 120,
        available_beds: 80,
        icu_beds: 18,
        available_icu: 10,
        contact: "+91-40-5678-9012",
        address: "654 Healing Street, Hyderabad, Telangana 500001",
        updated_minutes_ago: 8,
    },
];

/// All mock hospitals, stamped relative to `now`
pub fn hospitals(now: DateTime<Utc>) -> Vec<Hospital> {
    HOSPITALS
        .iter()
        .zip(1u64..)
        .map(|(seed, id)| Hospital {
            id,
            name: seed.name.to_string(),
            district: seed.district.to_string(),
            state: Some(seed.state.to_string()),
            contact: seed.contact.to_string(),
            address: seed.address.to_string(),
            total_beds: seed.total_beds,
            available_beds: seed.available_beds,
            icu_beds: seed.icu_beds,
            available_icu: seed.available_icu,
            last_updated: Some(now - Duration::minutes(seed.updated_minutes_ago)),
        })
        .collect()
}

fn fallback(
    id: u64,
    name: &str,
    manufacturer: &str,
    category: &str,
    availability: StockLevel,
    warning: Option<&str>,
) -> Medicine {
    Medicine {
        id,
        name: name.to_string(),
        manufacturer: manufacturer.to_string(),
        category: category.to_string(),
        availability,
        warning: warning.map(str::to_string),
        recall: false,
        classification: None,
        recall_status: None,
        recall_date: None,
        source: Some("fallback".to_string()),
    }
}

/// Fallback medicine catalog
pub fn medicines() -> Vec<Medicine> {
    let mut levothyroxine = fallback(
        4,
        "Levothyroxine 50mcg Tablets",
        "Hormone Pharma",
        "Hormone Replacement",
        StockLevel::Low,
        Some("Recall issued - contamination detected"),
    );
    levothyroxine.recall = true;
    levothyroxine.classification = Some("Class II".to_string());

    vec![
        fallback(
            1,
            "Paracetamol 500mg",
            "ABC Pharmaceuticals",
            "Analgesic",
            StockLevel::High,
            None,
        ),
        fallback(
            2,
            "Insulin Glargine 100 Units/mL",
            "Diabetes Care Inc",
            "Antidiabetic",
            StockLevel::Low,
            Some("Supply shortage - limited availability"),
        ),
        fallback(
            3,
            "Amoxicillin 250mg Capsules",
            "Generic Pharma",
            "Antibiotic",
            StockLevel::Moderate,
            Some("Moderate stock levels"),
        ),
        levothyroxine,
        fallback(
            5,
            "Atorvastatin 20mg Tablets",
            "CardioMed",
            "Statin",
            StockLevel::Low,
            Some("Critical shortage nationwide"),
        ),
    ]
}
