use serde_json::{json, Value};

pub const DRAFT_STATUS: &str = "draft";

/// Shape of a fresh compensation case. Stored records and patches are
/// merged over this, so every field the intake form reads has a value.
pub fn builtin_case_defaults() -> Value {
    json!({
        "status": DRAFT_STATUS,
        "applicant": {
            "type": null,
            "firstName": null,
            "lastName": null,
            "dateOfBirth": null,
            "phone": null,
            "email": null,
            "address": {
                "street": null,
                "city": null,
                "state": "IN",
                "zip": null
            },
            "relationshipToVictim": null
        },
        "victim": {
            "sameAsApplicant": true,
            "firstName": null,
            "lastName": null,
            "dateOfBirth": null,
            "isMinor": false,
            "deceased": false
        },
        "crime": {
            "date": null,
            "county": null,
            "description": null,
            "reportedToPolice": null,
            "policeReportNumber": null,
            "reportDate": null
        },
        "losses": {
            "medical": 0,
            "counseling": 0,
            "funeral": 0,
            "lostWages": 0,
            "other": 0,
            "insuranceCoverage": null
        },
        "eligibility": null,
        "documents": []
    })
}
