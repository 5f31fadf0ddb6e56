//! Tests for the record data model.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

fn draft() -> RecordDraft {
    RecordDraft {
        full_name: FullName::new("Asha Verma").expect("name"),
        gender: Gender::Female,
        mobile_number: MobileNumber::new("9876543210").expect("mobile"),
        designation: Designation::Counsellor,
        district: District::Chennai,
        status: RecordStatus::Active,
        bio: "Counsellor for the southern hub.".to_owned(),
    }
}

#[fixture]
fn record() -> Record {
    Record::new(
        RecordId::new("pQ7sK2m9Xb").expect("id"),
        draft(),
        Password::from("CO210"),
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).single().expect("timestamp"),
    )
}

#[rstest]
#[case("", RecordValidationError::EmptyId)]
#[case("   ", RecordValidationError::EmptyId)]
fn record_id_rejects_blank_input(#[case] raw: &str, #[case] expected: RecordValidationError) {
    let err = RecordId::new(raw).expect_err("blank id must fail");
    assert_eq!(err, expected);
}

#[rstest]
fn full_name_trims_surrounding_whitespace() {
    let name = FullName::new("  Asha Verma  ").expect("valid name");
    assert_eq!(name.as_ref(), "Asha Verma");
}

#[rstest]
fn full_name_rejects_blank_input() {
    let err = FullName::new("   ").expect_err("blank name must fail");
    assert_eq!(err, RecordValidationError::EmptyFullName);
}

#[rstest]
#[case("987654321")]
#[case("98765432100")]
#[case("987654321x")]
#[case("98765 4321")]
#[case("")]
fn mobile_number_rejects_anything_but_ten_digits(#[case] raw: &str) {
    let err = MobileNumber::new(raw).expect_err("invalid mobile must fail");
    assert_eq!(err, RecordValidationError::MobileNumberFormat);
}

#[rstest]
fn mobile_number_exposes_final_three_digits() {
    let mobile = MobileNumber::new("9876543210").expect("valid mobile");
    assert_eq!(mobile.last_three(), "210");
}

#[rstest]
#[case("Male", Gender::Male)]
#[case("Female", Gender::Female)]
#[case("Other", Gender::Other)]
fn gender_parses_known_labels(#[case] label: &str, #[case] expected: Gender) {
    assert_eq!(Gender::try_from(label.to_owned()).expect("label"), expected);
}

#[rstest]
fn gender_rejects_unknown_labels() {
    let err = Gender::try_from("male".to_owned()).expect_err("labels are case sensitive");
    assert!(matches!(err, RecordValidationError::UnknownGender { label } if label == "male"));
}

#[rstest]
#[case("National Admin", Designation::NationalAdmin)]
#[case("Hub Manager", Designation::HubManager)]
#[case("Counsellor", Designation::Counsellor)]
#[case("Doctor", Designation::Doctor)]
fn designation_parses_known_labels(#[case] label: &str, #[case] expected: Designation) {
    assert_eq!(Designation::from(label), expected);
}

#[rstest]
fn designation_keeps_unknown_labels_open() {
    let parsed = Designation::from("Auditor");
    assert_eq!(parsed, Designation::Other("Auditor".to_owned()));
    assert_eq!(parsed.label(), "Auditor");
    assert_eq!(String::from(parsed), "Auditor");
}

#[rstest]
#[case("Amritsar, Punjab", District::Amritsar)]
#[case("West Delhi, Delhi NCR", District::WestDelhi)]
fn district_parses_full_labels(#[case] label: &str, #[case] expected: District) {
    assert_eq!(District::try_from(label.to_owned()).expect("label"), expected);
}

#[rstest]
fn district_rejects_bare_city_names() {
    let err = District::try_from("Chennai".to_owned()).expect_err("label includes the state");
    assert!(matches!(err, RecordValidationError::UnknownDistrict { .. }));
}

#[rstest]
fn status_rejects_unknown_labels() {
    let err = RecordStatus::try_from("Retired".to_owned()).expect_err("unknown status");
    assert!(matches!(err, RecordValidationError::UnknownStatus { label } if label == "Retired"));
}

#[rstest]
fn record_serialises_camel_case_labels(record: Record) {
    let value = serde_json::to_value(&record).expect("serialise record");
    assert_eq!(value.get("fullName"), Some(&json!("Asha Verma")));
    assert_eq!(value.get("mobileNumber"), Some(&json!("9876543210")));
    assert_eq!(value.get("designation"), Some(&json!("Counsellor")));
    assert_eq!(value.get("district"), Some(&json!("Chennai, Tamil Nadu")));
    assert_eq!(value.get("status"), Some(&json!("Active")));
    assert_eq!(value.get("password"), Some(&json!("CO210")));
    assert!(value.get("createdAt").is_some());
    assert!(value.get("full_name").is_none());
}

#[rstest]
fn record_round_trips_through_json(record: Record) {
    let value = serde_json::to_value(&record).expect("serialise record");
    let parsed: Record = serde_json::from_value(value).expect("parse record");
    assert_eq!(parsed, record);
}

#[rstest]
fn record_deserialisation_validates_fields(record: Record) {
    let mut value = serde_json::to_value(&record).expect("serialise record");
    if let Some(field) = value.get_mut("mobileNumber") {
        *field = json!("123");
    }
    let result: Result<Record, _> = serde_json::from_value(value);
    assert!(result.is_err(), "short mobile number must fail validation");
}

#[rstest]
fn draft_round_trips_through_record(record: Record) {
    let copy = record.draft();
    assert_eq!(copy, draft());
}

#[rstest]
fn patch_defaults_to_keeping_the_password(record: Record) {
    let patch = RecordPatch::from_draft(record.draft());
    assert!(patch.password.is_none());

    let repatched = patch.with_password(Password::from("HM210"));
    assert_eq!(repatched.password, Some(Password::from("HM210")));
}
